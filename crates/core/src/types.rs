use serde::Deserialize;

/// Body of `GET /api/measures/component`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RawMetricsResponse {
    pub component: Component,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Component {
    pub id: String,
    pub key: String,
    pub name: String,
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Measure {
    pub metric: String,
    pub value: String,
}

impl RawMetricsResponse {
    pub fn from_json(bytes: &[u8]) -> Result<Self, crate::SyncError> {
        serde_json::from_slice(bytes).map_err(crate::SyncError::Decode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityGate {
    Error,
    Warn,
    Ok,
}

impl QualityGate {
    pub fn from_alert_status(token: &str) -> Option<Self> {
        match token {
            "ERROR" => Some(QualityGate::Error),
            "WARN" => Some(QualityGate::Warn),
            "OK" => Some(QualityGate::Ok),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityGate::Error => "DANGER",
            QualityGate::Warn => "WARNING",
            QualityGate::Ok => "GREAT!",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            QualityGate::Error => "danger",
            QualityGate::Warn => "warning",
            QualityGate::Ok => "good",
        }
    }
}

/// Display-ready summary of one measures response. Every field is a string;
/// an absent metric leaves its field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationContent {
    pub id: String,
    pub key: String,
    pub name: String,
    pub alert_status: String,
    pub status: String,
    pub color: String,
    pub bugs: String,
    pub code_smells: String,
    pub duplicated_lines_density: String,
    /// Technical debt in 8-hour workdays.
    pub sqale_index: String,
    pub coverage: String,
}

impl NotificationContent {
    pub fn quality_gate(&self) -> Option<QualityGate> {
        QualityGate::from_alert_status(&self.alert_status)
    }
}
