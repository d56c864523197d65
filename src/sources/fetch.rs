use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Failures while downloading a portal page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    #[error("request to `{url}` failed")]
    /// Sending the request failed or timed out.
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response body from `{url}`")]
    /// Reading the response body failed.
    Body {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Downloads portal pages.
pub trait PageFetcher: Send + Sync {
    /// Resolve to the body of a `200 OK` response, or `None` for any other status.
    fn fetch(&self, url: Url) -> BoxFuture<'static, Result<Option<String>, FetchError>>;
}

#[derive(Clone)]
/// [`PageFetcher`] backed by a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher presenting a browser user agent, with a per-request timeout.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| FetchError::ClientBuilder { source })?;
        Ok(Self { client })
    }

    /// Shared client, reused by the notifier.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: Url) -> BoxFuture<'static, Result<Option<String>, FetchError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let response = client
                .get(url.clone())
                .send()
                .await
                .map_err(|source| FetchError::Request {
                    url: url.clone(),
                    source,
                })?;

            if response.status() != StatusCode::OK {
                tracing::debug!(%url, status = %response.status(), "portal answered without content");
                return Ok(None);
            }

            response
                .text()
                .await
                .map(Some)
                .map_err(|source| FetchError::Body { url, source })
        })
    }
}
