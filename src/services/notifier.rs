//! Announces newly discovered postings to a chat.

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::{config::TelegramConfig, sources::JobPosting};

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Failures while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to reach the notification endpoint")]
    /// The HTTP request could not be completed.
    Send {
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status.
    #[error("notification endpoint rejected the message with status {status}")]
    Rejected { status: StatusCode },
}

/// Delivers one message per new posting.
pub trait Notifier: Send + Sync {
    /// Announce `posting`.
    fn notify(&self, posting: JobPosting) -> BoxFuture<'static, Result<(), NotifyError>>;
}

/// Render the chat message announcing `posting`.
pub fn format_message(posting: &JobPosting) -> String {
    format!(
        "New job: {}\nCompany: {}\nPortal: {}\nPosted: {}\n{}",
        posting.title, posting.company, posting.portal, posting.posted_date, posting.link
    )
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Telegram Bot API `sendMessage` notifier.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Send through `client` to the bot and chat of `config`.
    pub fn new(client: Client, config: &TelegramConfig) -> Self {
        Self {
            client,
            endpoint: format!("{TELEGRAM_API}/bot{}/sendMessage", config.bot_token),
            chat_id: config.chat_id.clone(),
        }
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, posting: JobPosting) -> BoxFuture<'static, Result<(), NotifyError>> {
        let notifier = self.clone();
        Box::pin(async move {
            let text = format_message(&posting);
            let response = notifier
                .client
                .post(&notifier.endpoint)
                .json(&SendMessage {
                    chat_id: &notifier.chat_id,
                    text: &text,
                    disable_web_page_preview: true,
                })
                .send()
                .await
                .map_err(|source| NotifyError::Send { source })?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(NotifyError::Rejected {
                    status: response.status(),
                })
            }
        })
    }
}
