// Validator tests: required fields, numeric coercion, defaults, server-side stamping

use chrono::{TimeZone, Utc};
use serde_json::{Map, Value, json};
use speedtest_results::error::ValidationError;
use speedtest_results::models::SubmissionMeta;
use speedtest_results::validator::{format_timestamp, parse_payload, validate_and_build};

fn obj(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

fn full_payload() -> Map<String, Value> {
    obj(json!({
        "download": 93.5,
        "upload": 11.2,
        "ping": 14.0,
        "jitter": 1.3,
        "packetLoss": 0.0,
        "server": "LAX",
        "country": "US"
    }))
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}

#[test]
fn test_valid_submission_builds_record() {
    let meta = SubmissionMeta {
        client_ip: Some("198.51.100.4".into()),
        user_agent: Some("curl/8.0".into()),
    };
    let r = validate_and_build(&full_payload(), &meta, now()).unwrap();
    assert_eq!(r.timestamp, "2024-01-02T03:04:05.000000Z");
    assert_eq!(r.server, "LAX");
    assert_eq!(r.country, "US");
    assert_eq!(r.download, 93.5);
    assert_eq!(r.upload, 11.2);
    assert_eq!(r.ping, 14.0);
    assert_eq!(r.jitter, 1.3);
    assert_eq!(r.packet_loss, 0.0);
    assert_eq!(r.ip, "198.51.100.4");
    assert_eq!(r.user_agent, "curl/8.0");
    assert_eq!(r.test_method, "Cloudflare");
    assert_eq!(r.colo, "");
    assert_eq!(r.client_time, "");
}

#[test]
fn test_defaults_for_absent_optional_fields() {
    let mut p = full_payload();
    p.remove("server");
    p.remove("country");
    let r = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap();
    assert_eq!(r.server, "Unknown");
    assert_eq!(r.country, "Unknown");
    assert_eq!(r.user_agent, "Unknown");
    assert_eq!(r.ip, "");
}

#[test]
fn test_missing_any_required_field_rejected() {
    for key in ["download", "upload", "ping", "jitter", "packetLoss"] {
        let mut p = full_payload();
        p.remove(key);
        let err = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingFields), "{key}");
        assert_eq!(err.to_string(), "Missing required fields");
    }
}

#[test]
fn test_snake_case_packet_loss_does_not_count() {
    let mut p = full_payload();
    p.remove("packetLoss");
    p.insert("packet_loss".into(), json!(0.0));
    assert!(matches!(
        validate_and_build(&p, &SubmissionMeta::default(), now()),
        Err(ValidationError::MissingFields)
    ));
}

#[test]
fn test_non_numeric_required_field_rejected() {
    let mut p = full_payload();
    p.insert("download".into(), json!("fast"));
    let err = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap_err();
    match &err {
        ValidationError::InvalidFormat { field, .. } => assert_eq!(*field, "download"),
        other => panic!("unexpected {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.starts_with("Invalid data format"), "{msg}");
    assert!(msg.contains("fast"), "{msg}");
}

#[test]
fn test_null_and_structured_required_values_rejected() {
    for bad in [json!(null), json!([1.0]), json!({"v": 1.0}), json!("")] {
        let mut p = full_payload();
        p.insert("jitter".into(), bad.clone());
        let err = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidFormat { field: "jitter", .. }),
            "{bad}"
        );
    }
}

#[test]
fn test_numeric_strings_and_booleans_coerced() {
    let mut p = full_payload();
    p.insert("download".into(), json!(" 42.25 "));
    p.insert("upload".into(), json!("7"));
    p.insert("packetLoss".into(), json!(true));
    let r = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap();
    assert_eq!(r.download, 42.25);
    assert_eq!(r.upload, 7.0);
    assert_eq!(r.packet_loss, 1.0);
}

#[test]
fn test_negative_values_accepted_as_is() {
    let mut p = full_payload();
    p.insert("download".into(), json!(-5.5));
    p.insert("packetLoss".into(), json!(250.0));
    let r = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap();
    assert_eq!(r.download, -5.5);
    assert_eq!(r.packet_loss, 250.0);
}

#[test]
fn test_client_cannot_override_server_fields() {
    let mut p = full_payload();
    p.insert("test_method".into(), json!("Ookla"));
    p.insert("timestamp".into(), json!("1999-12-31T23:59:59Z"));
    let r = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap();
    assert_eq!(r.test_method, "Cloudflare");
    assert_eq!(r.timestamp, "2024-01-02T03:04:05.000000Z");
    assert_eq!(r.client_time, "1999-12-31T23:59:59Z");
}

#[test]
fn test_payload_ip_preferred_over_request_ip() {
    let mut p = full_payload();
    p.insert("ip".into(), json!("192.0.2.1"));
    let meta = SubmissionMeta {
        client_ip: Some("10.0.0.1".into()),
        user_agent: None,
    };
    let r = validate_and_build(&p, &meta, now()).unwrap();
    assert_eq!(r.ip, "192.0.2.1");
}

#[test]
fn test_optional_non_string_values_stored_as_text() {
    let mut p = full_payload();
    p.insert("colo".into(), json!(42));
    p.insert("country".into(), json!(null));
    let r = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap();
    assert_eq!(r.colo, "42");
    assert_eq!(r.country, "");
}

#[test]
fn test_timestamp_is_utc_iso8601_with_z() {
    let ts = format_timestamp(Utc::now());
    assert!(ts.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "{ts}");
}

#[test]
fn test_parse_payload_requires_json_object() {
    assert!(parse_payload(br#"{"download": 1}"#).is_ok());
    let bodies: [&[u8]; 5] = [b"not json", b"[1, 2]", b"42", b"null", b""];
    for body in bodies {
        let err = parse_payload(body).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBody(_)));
        assert!(err.to_string().starts_with("Invalid data format"));
    }
}

#[test]
fn test_out_of_range_numbers_rejected_in_both_forms() {
    let mut p = full_payload();
    p.insert("download".into(), json!("1e400"));
    let err = validate_and_build(&p, &SubmissionMeta::default(), now()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidFormat { field: "download", .. }));
    assert!(err.to_string().starts_with("Invalid data format"));

    let body = br#"{"download": 1e400, "upload": 1, "ping": 1, "jitter": 1, "packetLoss": 0}"#;
    let err = parse_payload(body).unwrap_err();
    assert!(err.to_string().starts_with("Invalid data format"));
}

#[test]
fn test_non_finite_strings_rejected() {
    for bad in ["inf", "-infinity", "NaN"] {
        let mut p = full_payload();
        p.insert("ping".into(), json!(bad));
        assert!(
            matches!(
                validate_and_build(&p, &SubmissionMeta::default(), now()),
                Err(ValidationError::InvalidFormat { field: "ping", .. })
            ),
            "{bad}"
        );
    }
}
