//! Application-level configuration, resolved from environment variables.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::{dao::job_store::sqlite::SqliteConfig, sources::SkillSet};

const DEFAULT_SKILLS: &str =
    "java,spring,spring boot,microservices,hibernate,jpa,rest api,sql,mysql,postgres,docker,kubernetes";
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;
const MIN_CHECK_INTERVAL_SECS: u64 = 30;
const DEFAULT_MAX_DAYS_OLD: i64 = 10;
const DEFAULT_DASHBOARD_USER: &str = "admin";
const DEFAULT_DASHBOARD_PASS: &str = "password";
const DEFAULT_PORT: u16 = 8080;

/// Credentials protecting the dashboard with HTTP Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCredentials {
    /// Expected Basic auth user name.
    pub username: String,
    /// Expected Basic auth password.
    pub password: String,
}

impl DashboardCredentials {
    /// Whether the supplied pair equals the configured credentials.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Telegram bot used to announce new postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    pub bot_token: String,
    /// Chat receiving the announcements.
    pub chat_id: String,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Skills searched for and matched against postings.
    pub skills: SkillSet,
    /// Pause between two scheduled scans.
    pub check_interval: Duration,
    /// Postings older than this many days are ignored.
    pub max_days_old: i64,
    /// Credentials guarding every route but the health check.
    pub dashboard: DashboardCredentials,
    /// `None` disables notifications.
    pub telegram: Option<TelegramConfig>,
    /// HTTP listen port.
    pub port: u16,
    /// Where the seen-jobs database lives.
    pub database: SqliteConfig,
    /// Run the first scheduled scan immediately instead of after one interval.
    pub scan_on_startup: bool,
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|key| env::var(key).ok());
        info!(
            skills = config.skills.as_slice().len(),
            check_interval_secs = config.check_interval.as_secs(),
            max_days_old = config.max_days_old,
            telegram = config.telegram.is_some(),
            "loaded configuration from environment"
        );
        config
    }

    /// Resolve the configuration through `lookup`, falling back to defaults for unset or
    /// unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let skills = SkillSet::parse(&text("JOB_SKILLS").unwrap_or_else(|| DEFAULT_SKILLS.into()));
        if skills.is_empty() {
            warn!("JOB_SKILLS lists no skills; every posting will be filtered out");
        }

        let telegram = match (text("TELEGRAM_BOT_TOKEN"), text("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Self {
            skills,
            check_interval: check_interval(text("CHECK_INTERVAL")),
            max_days_old: parse_or("MAX_DAYS_OLD", text("MAX_DAYS_OLD"), DEFAULT_MAX_DAYS_OLD),
            dashboard: DashboardCredentials {
                username: lookup("DASHBOARD_USER").unwrap_or_else(|| DEFAULT_DASHBOARD_USER.into()),
                password: lookup("DASHBOARD_PASS").unwrap_or_else(|| DEFAULT_DASHBOARD_PASS.into()),
            },
            telegram,
            port: parse_or("PORT", text("PORT"), DEFAULT_PORT),
            database: text("DATABASE_URL")
                .map(SqliteConfig::new)
                .unwrap_or_default(),
            scan_on_startup: parse_flag("SCAN_ON_STARTUP", text("SCAN_ON_STARTUP"), true),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + Display,
    T::Err: Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|err| {
            warn!(key, value = %value, error = %err, fallback = %default, "invalid setting; using default");
            default
        }),
    }
}

fn check_interval(raw: Option<String>) -> Duration {
    let secs = parse_or("CHECK_INTERVAL", raw, DEFAULT_CHECK_INTERVAL_SECS);
    if secs < MIN_CHECK_INTERVAL_SECS {
        warn!(
            requested = secs,
            minimum = MIN_CHECK_INTERVAL_SECS,
            "CHECK_INTERVAL too short; using minimum"
        );
        return Duration::from_secs(MIN_CHECK_INTERVAL_SECS);
    }
    Duration::from_secs(secs)
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(|value| value.trim().to_ascii_lowercase()) {
        None => default,
        Some(value) => match value.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!(key, value = %value, fallback = default, "invalid flag; using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::default();
        assert_eq!(config.skills.as_slice().len(), 12);
        assert_eq!(config.skills.as_slice()[2], "spring boot");
        assert_eq!(config.check_interval, Duration::from_secs(300));
        assert_eq!(config.max_days_old, 10);
        assert!(config.dashboard.matches("admin", "password"));
        assert!(config.telegram.is_none());
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.url, "sqlite://data/jobs.db");
        assert!(config.scan_on_startup);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("JOB_SKILLS", "Rust, Tokio"),
            ("CHECK_INTERVAL", "60"),
            ("MAX_DAYS_OLD", "3"),
            ("DASHBOARD_USER", "ops"),
            ("DASHBOARD_PASS", "s3cret"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100"),
            ("PORT", "9000"),
            ("DATABASE_URL", "sqlite:///app/data/jobs.db"),
            ("SCAN_ON_STARTUP", "false"),
        ]);

        assert_eq!(config.skills.as_slice(), ["rust", "tokio"]);
        assert_eq!(config.check_interval, Duration::from_secs(60));
        assert_eq!(config.max_days_old, 3);
        assert!(config.dashboard.matches("ops", "s3cret"));
        assert!(!config.dashboard.matches("admin", "password"));
        assert_eq!(
            config.telegram,
            Some(TelegramConfig {
                bot_token: "123:abc".into(),
                chat_id: "-100".into(),
            })
        );
        assert_eq!(config.port, 9000);
        assert_eq!(config.database.url, "sqlite:///app/data/jobs.db");
        assert!(!config.scan_on_startup);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[("CHECK_INTERVAL", "soon"), ("PORT", "99999")]);
        assert_eq!(config.check_interval, Duration::from_secs(300));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn check_interval_has_a_floor() {
        let config = config_from(&[("CHECK_INTERVAL", "0")]);
        assert_eq!(config.check_interval, Duration::from_secs(30));

        let config = config_from(&[("CHECK_INTERVAL", "31")]);
        assert_eq!(config.check_interval, Duration::from_secs(31));
    }

    #[test]
    fn telegram_needs_token_and_chat() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]);
        assert!(config.telegram.is_none());

        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "123:abc"), ("TELEGRAM_CHAT_ID", " ")]);
        assert!(config.telegram.is_none());
    }
}
