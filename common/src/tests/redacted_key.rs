use crate::RedactedApiKey;

/// **VALUE**: Verifies that Debug and Display output never contain the key.
///
/// **WHY THIS MATTERS**: The API key authorizes every request against the MFA
/// service. One `{:?}` in a log line must not be enough to leak it.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Debug is switched back to a derive
/// - Display starts forwarding to the inner string
#[test]
fn given_secret_key_when_debug_or_display_formatted_then_value_is_redacted() {
    // GIVEN: A key with a recognizable value
    let key = RedactedApiKey::new(String::from("super-secret-key"));

    // WHEN: Formatting both ways
    let debug = format!("{:?}", key);
    let display = format!("{}", key);

    // THEN: Neither output contains the value
    assert!(!debug.contains("super-secret-key"), "Debug must redact");
    assert!(!display.contains("super-secret-key"), "Display must redact");
    assert!(debug.contains("REDACTED"));
    assert!(display.contains("REDACTED"));
}

/// **VALUE**: Verifies the raw value stays reachable for transmission.
#[test]
fn given_secret_key_when_as_str_called_then_returns_raw_value() {
    let key = RedactedApiKey::new(String::from("api-key-123"));

    assert_eq!(key.as_str(), "api-key-123");
    assert_eq!(key.len(), 11);
    assert!(!key.is_empty());
}

/// **VALUE**: Verifies serde serialization is refused.
///
/// **WHY THIS MATTERS**: Serializing a config or client struct for debugging
/// must not silently embed the credential in the output.
#[test]
fn given_secret_key_when_serialized_then_returns_error() {
    let key = RedactedApiKey::new(String::from("do-not-serialize"));

    let result = serde_json::to_string(&key);

    assert!(result.is_err(), "Serialization must be refused");
}
