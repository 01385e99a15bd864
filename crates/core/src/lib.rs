pub mod client;
pub mod config;
pub mod error;
pub mod notifier;
pub mod payload;
pub mod transform;
pub mod types;

pub use error::SyncError;

use crate::{
    client::MetricsSource,
    config::Config,
    notifier::Notifier,
    payload::{format_payload, NotificationPayload, Target},
    transform::convert_to_notification,
    types::{NotificationContent, RawMetricsResponse},
};

/// Result of one successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub content: NotificationContent,
    pub payload: NotificationPayload,
}

/// Turns a raw measures body into the content and payload for `config`.
pub fn build_notification(
    body: &[u8],
    config: &Config,
) -> Result<(NotificationContent, NotificationPayload), SyncError> {
    let raw = RawMetricsResponse::from_json(body)?;
    let content = convert_to_notification(&raw);

    let dashboard_url = config.dashboard_url();
    let target = Target {
        project_name: &config.project_key,
        channel: &config.channel,
        dashboard_url: dashboard_url.as_deref(),
    };
    let payload = format_payload(&content, &target);

    Ok((content, payload))
}

/// Fetch, transform, format and send, in that order. Any failure ends the
/// run; nothing is sent unless the fetch and decode both succeeded.
pub fn run<S, N>(config: &Config, source: &S, notifier: &N) -> Result<RunSummary, SyncError>
where
    S: MetricsSource + ?Sized,
    N: Notifier + ?Sized,
{
    let body = source.fetch(&config.project_key)?;
    let (content, payload) = build_notification(&body, config)?;

    notifier.send(&payload, &config.webhook_url)?;

    Ok(RunSummary { content, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    struct CannedSource(Result<&'static str, &'static str>);

    impl MetricsSource for CannedSource {
        fn fetch(&self, _project_key: &str) -> Result<Vec<u8>, SyncError> {
            match self.0 {
                Ok(body) => Ok(body.as_bytes().to_vec()),
                Err(e) => Err(SyncError::Fetch(e.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: RefCell<Vec<(NotificationPayload, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, payload: &NotificationPayload, webhook_url: &str) -> Result<(), SyncError> {
            self.sent
                .borrow_mut()
                .push((payload.clone(), webhook_url.to_string()));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn config() -> Config {
        Config::from_lookup(|k| match k {
            "SONAR_URL" => Some("https://sonar.example.com/".to_string()),
            "SONAR_USERNAME" => Some("token".to_string()),
            "PROJECT_ALIAS_NAME" => Some("proj:x".to_string()),
            "SLACK_HOOK_URL" => Some("https://hooks.example.com/T0".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn fetch_failure_aborts_before_delivery() {
        let notifier = RecordingNotifier::default();
        let err = run(&config(), &CannedSource(Err("connection refused")), &notifier).unwrap_err();

        assert!(matches!(err, SyncError::Fetch(_)));
        assert!(notifier.sent.borrow().is_empty());
    }

    #[test]
    fn decode_failure_aborts_before_delivery() {
        let notifier = RecordingNotifier::default();
        let err = run(&config(), &CannedSource(Ok("<html>oops</html>")), &notifier).unwrap_err();

        assert!(matches!(err, SyncError::Decode(_)));
        assert!(notifier.sent.borrow().is_empty());
    }

    #[test]
    fn successful_run_sends_once_to_configured_webhook() {
        let notifier = RecordingNotifier::default();
        let body = r#"{"component":{"id":"1","key":"proj:x","name":"X","measures":[{"metric":"alert_status","value":"WARN"}]}}"#;
        let summary = run(&config(), &CannedSource(Ok(body)), &notifier).unwrap();

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "https://hooks.example.com/T0");
        assert_eq!(sent[0].0, summary.payload);
        assert_eq!(summary.content.status, "WARNING");
        assert_eq!(summary.payload.channel, "#general");
        assert_eq!(
            summary.payload.attachments[0].title_link,
            "https://sonar.example.com/dashboard?id=proj%3Ax"
        );
    }
}
