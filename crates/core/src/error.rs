use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("missing required configuration {0}")]
    ConfigurationMissing(&'static str),

    #[error("invalid configuration {var}: {reason}")]
    InvalidConfiguration { var: &'static str, reason: String },

    #[error("fetch measures failed: {0}")]
    Fetch(String),

    #[error("decode measures response")]
    Decode(#[source] serde_json::Error),

    #[error("deliver notification failed: {0}")]
    Delivery(String),
}

impl SyncError {
    /// True when the failure happened after the payload was built.
    pub fn is_delivery(&self) -> bool {
        matches!(self, SyncError::Delivery(_))
    }
}
