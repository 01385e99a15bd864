use sonarpush_core::config::Config;
use sonarpush_core::types::RawMetricsResponse;
use sonarpush_core::{build_notification, transform::convert_to_notification, SyncError};

const SCENARIO: &str = r#"{"component":{"id":"1","key":"proj:x","name":"X","measures":[{"metric":"bugs","value":"3"},{"metric":"alert_status","value":"OK"},{"metric":"sqale_index","value":"960"},{"metric":"code_smells","value":"12"},{"metric":"duplicated_lines_density","value":"2.5"}]}}"#;

fn config() -> Config {
    Config::from_lookup(|k| match k {
        "SONAR_URL" => Some("https://sonar.example.com".to_string()),
        "SONAR_USERNAME" => Some("ci".to_string()),
        "PROJECT_ALIAS_NAME" => Some("proj:x".to_string()),
        "SLACK_HOOK_URL" => Some("https://hooks.example.com/T0".to_string()),
        "SLACK_CHANNEL" => Some("#quality".to_string()),
        _ => None,
    })
    .expect("complete config")
}

#[test]
fn scenario_response_yields_expected_content() {
    let raw = RawMetricsResponse::from_json(SCENARIO.as_bytes()).expect("decode scenario");
    let content = convert_to_notification(&raw);

    assert_eq!(content.id, "1");
    assert_eq!(content.key, "proj:x");
    assert_eq!(content.name, "X");
    assert_eq!(content.bugs, "3");
    assert_eq!(content.status, "GREAT!");
    assert_eq!(content.color, "good");
    assert_eq!(content.sqale_index, "2");
    assert_eq!(content.code_smells, "12");
    assert_eq!(content.duplicated_lines_density, "2.5");
    assert_eq!(content.coverage, "");

    let text = content.body_text();
    for needle in ["GREAT!", "3", "2 days", "2.5", "12"] {
        assert!(text.contains(needle), "body missing {needle}: {text}");
    }
}

#[test]
fn end_to_end_payload() {
    let (_, payload) = build_notification(SCENARIO.as_bytes(), &config()).expect("build");
    insta::assert_json_snapshot!("end_to_end_payload", payload);
}

#[test]
fn response_tolerates_missing_and_extra_fields() {
    let body = br#"{"component":{"key":"k","qualifier":"TRK","measures":[{"metric":"bugs","value":"0","bestValue":true}]}}"#;
    let raw = RawMetricsResponse::from_json(body).expect("decode partial");
    assert_eq!(raw.component.id, "");
    assert_eq!(raw.component.key, "k");
    assert_eq!(raw.component.measures.len(), 1);

    let content = convert_to_notification(&raw);
    assert_eq!(content.bugs, "0");
}

#[test]
fn non_json_body_is_a_decode_failure() {
    let err = build_notification(b"Bad Gateway", &config()).unwrap_err();
    assert!(matches!(err, SyncError::Decode(_)));
}
