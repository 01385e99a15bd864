use std::time::Duration;

use reqwest::Url;

use crate::SyncError;

pub const DEFAULT_CHANNEL: &str = "#general";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_SONAR_URL: &str = "SONAR_URL";
pub const ENV_SONAR_USERNAME: &str = "SONAR_USERNAME";
pub const ENV_SONAR_PASSWORD: &str = "SONAR_PASSWORD";
pub const ENV_PROJECT: &str = "PROJECT_ALIAS_NAME";
pub const ENV_HOOK_URL: &str = "SLACK_HOOK_URL";
pub const ENV_CHANNEL: &str = "SLACK_CHANNEL";
pub const ENV_TIMEOUT: &str = "SONARPUSH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sonar_url: String,
    pub username: String,
    pub password: String,
    pub project_key: String,
    pub webhook_url: String,
    pub channel: String,
    /// Set when `SLACK_CHANNEL` was absent and `channel` holds the default.
    pub channel_defaulted: bool,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(SyncError::ConfigurationMissing(key));

        let sonar_url = require(ENV_SONAR_URL)?;
        let username = require(ENV_SONAR_USERNAME)?;
        let project_key = require(ENV_PROJECT)?;
        let webhook_url = require(ENV_HOOK_URL)?;

        let password = get(ENV_SONAR_PASSWORD).unwrap_or_default();
        let (channel, channel_defaulted) = match get(ENV_CHANNEL) {
            Some(c) => (c, false),
            None => (DEFAULT_CHANNEL.to_string(), true),
        };

        let timeout_secs = match get(ENV_TIMEOUT) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(SyncError::InvalidConfiguration {
                        var: ENV_TIMEOUT,
                        reason: "must be at least 1 second".to_string(),
                    })
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(SyncError::InvalidConfiguration {
                        var: ENV_TIMEOUT,
                        reason: format!("{raw:?}: {e}"),
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            sonar_url: sonar_url.trim_end_matches('/').to_string(),
            username,
            password,
            project_key,
            webhook_url,
            channel,
            channel_defaulted,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn measures_url(&self) -> String {
        format!("{}/api/measures/component", self.sonar_url)
    }

    /// Project dashboard link, or `None` when `sonar_url` is not a valid URL.
    pub fn dashboard_url(&self) -> Option<String> {
        let mut url = Url::parse(&format!("{}/dashboard", self.sonar_url)).ok()?;
        url.query_pairs_mut().append_pair("id", &self.project_key);
        Some(url.into())
    }
}
