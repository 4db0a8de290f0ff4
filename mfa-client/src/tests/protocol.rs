use crate::protocol::{Envelope, Params};

use serde_json::json;

// ============================================
// ENVELOPE
// ============================================

/// **VALUE**: Verifies a success envelope decodes with its data payload.
#[test]
fn given_success_body_when_decoded_then_data_and_no_error_fields() {
    let body = r#"{"data": {"unique_id": "bob"}}"#;

    let envelope: Envelope = serde_json::from_str(body).expect("valid envelope");

    assert_eq!(envelope.data, json!({"unique_id": "bob"}));
    assert!(envelope.error_message.is_none());
    assert!(envelope.error_code.is_none());
}

/// **VALUE**: Verifies an error envelope keeps the service's message and code.
#[test]
fn given_error_body_when_decoded_then_error_fields_present() {
    let body = r#"{"data": null, "error_message": "no such user", "error_code": "404_1"}"#;

    let envelope: Envelope = serde_json::from_str(body).expect("valid envelope");

    assert!(envelope.data.is_null());
    assert_eq!(envelope.error_message.as_deref(), Some("no such user"));
    assert_eq!(envelope.error_code.as_deref(), Some("404_1"));
}

/// **VALUE**: Verifies an empty JSON object is still an acceptable envelope.
///
/// **WHY THIS MATTERS**: The dispatcher's failover rule is "not a JSON
/// object". `{}` is an object; rejecting it would turn a quirky-but-valid
/// response into an access-point failure.
#[test]
fn given_empty_object_when_decoded_then_defaults_apply() {
    let envelope: Envelope = serde_json::from_str("{}").expect("empty object is an envelope");

    assert!(envelope.data.is_null());
    assert!(envelope.error_message.is_none());
}

/// **VALUE**: Verifies non-object JSON bodies are rejected.
///
/// **WHY THIS MATTERS**: Arrays and bare scalars are what an interposed
/// proxy or captive portal tends to return; they must trigger failover,
/// not decode into an empty envelope.
#[test]
fn given_non_object_bodies_when_decoded_then_all_fail() {
    for body in ["[1, 2, 3]", r#""a string""#, "42", "true", "not json at all"] {
        assert!(
            serde_json::from_str::<Envelope>(body).is_err(),
            "{body} must not decode as an envelope"
        );
    }
}

// ============================================
// PARAMS
// ============================================

/// **VALUE**: Verifies insertion order is preserved.
///
/// **WHY THIS MATTERS**: Deterministic ordering keeps outgoing requests
/// reproducible, which the wire-level tests rely on.
#[test]
fn given_pushed_params_when_read_then_insertion_order_preserved() {
    let mut params = Params::new();
    params.push("unique_id", "bob");
    params.push("display_name", "Bob");

    let pairs = params.as_slice();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0], ("unique_id", String::from("bob")));
    assert_eq!(pairs[1], ("display_name", String::from("Bob")));
}

/// **VALUE**: Verifies omitted optional values never enter the mapping.
///
/// **WHY THIS MATTERS**: The service distinguishes an absent parameter from
/// an empty one; sending `email=` would clear a stored address instead of
/// leaving it untouched.
#[test]
fn given_none_value_when_push_opt_then_key_is_absent() {
    let mut params = Params::new();
    params.push_opt("email", None::<String>);
    params.push_opt("sms_number", Some("+15551230000"));

    let pairs = params.as_slice();

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "sms_number");
    assert!(pairs.iter().all(|(key, _)| *key != "email"));
}

/// **VALUE**: Verifies emptiness tracks pushes.
#[test]
fn given_no_pushes_when_checked_then_params_empty() {
    let mut params = Params::new();
    assert!(params.is_empty());

    params.push("token", "abc");
    assert!(!params.is_empty());
}
