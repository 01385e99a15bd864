use reqwest::blocking::Client;

use crate::{config::Config, transform::METRIC_KEYS, SyncError};

/// Source of the raw measures response for one project.
pub trait MetricsSource {
    fn fetch(&self, project_key: &str) -> Result<Vec<u8>, SyncError>;
}

pub struct SonarClient {
    measures_url: String,
    username: String,
    password: String,
    http: Client,
}

impl SonarClient {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SyncError::Fetch(format!("build http client: {e}")))?;
        Ok(Self {
            measures_url: config.measures_url(),
            username: config.username.clone(),
            password: config.password.clone(),
            http,
        })
    }
}

impl MetricsSource for SonarClient {
    fn fetch(&self, project_key: &str) -> Result<Vec<u8>, SyncError> {
        let metric_keys = METRIC_KEYS.join(",");
        let resp = self
            .http
            .get(&self.measures_url)
            .query(&[
                ("metricKeys", metric_keys.as_str()),
                ("componentKey", project_key),
            ])
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| SyncError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        let body = resp
            .bytes()
            .map_err(|e| SyncError::Fetch(format!("read body: {e}")))?;
        Ok(body.to_vec())
    }
}
