use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::{NotificationContent, QualityGate, RawMetricsResponse};

const MINUTES_PER_WORKDAY: f64 = 60.0 * 8.0;

type MetricRule = fn(&mut NotificationContent, &str);

static METRIC_RULES: Lazy<HashMap<&'static str, MetricRule>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, MetricRule> = HashMap::new();
    rules.insert("bugs", |c, v| c.bugs = v.to_string());
    rules.insert("code_smells", |c, v| c.code_smells = v.to_string());
    rules.insert("duplicated_lines_density", |c, v| {
        c.duplicated_lines_density = v.to_string()
    });
    rules.insert("coverage", |c, v| c.coverage = v.to_string());
    rules.insert("alert_status", apply_alert_status);
    rules.insert("sqale_index", |c, v| c.sqale_index = debt_days(v));
    rules
});

/// Metric keys requested from the server, in request order.
pub const METRIC_KEYS: [&str; 6] = [
    "bugs",
    "duplicated_lines_density",
    "code_smells",
    "alert_status",
    "sqale_index",
    "coverage",
];

pub fn convert_to_notification(raw: &RawMetricsResponse) -> NotificationContent {
    let mut content = NotificationContent {
        id: raw.component.id.clone(),
        key: raw.component.key.clone(),
        name: raw.component.name.clone(),
        ..NotificationContent::default()
    };

    for measure in &raw.component.measures {
        if let Some(rule) = METRIC_RULES.get(measure.metric.as_str()) {
            rule(&mut content, &measure.value);
        }
    }

    content
}

fn apply_alert_status(content: &mut NotificationContent, value: &str) {
    content.alert_status = value.to_string();
    match QualityGate::from_alert_status(value) {
        Some(gate) => {
            content.status = gate.label().to_string();
            content.color = gate.color().to_string();
        }
        None => {
            content.status.clear();
            content.color.clear();
        }
    }
}

/// Converts a debt duration in minutes into whole workdays, rounding up.
/// Unparseable or non-finite input yields `"0"`.
pub fn debt_days(minutes: &str) -> String {
    match minutes.parse::<f64>() {
        Ok(m) if m.is_finite() => {
            let days = (m / MINUTES_PER_WORKDAY).ceil();
            // -0.0 from small negative inputs
            if days == 0.0 {
                "0".to_string()
            } else {
                days.to_string()
            }
        }
        _ => "0".to_string(),
    }
}
