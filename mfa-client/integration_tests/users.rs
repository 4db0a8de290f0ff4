use crate::helpers::client_for;

use mfa_client::UserAttributes;

use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Per-operation tests: parameter marshaling and typed payload decoding
// ============================================================================

/// **VALUE**: Verifies create followed by get round-trips the user's fields.
///
/// **WHY THIS MATTERS**: Callers provision a user and later read it back to
/// drive enrollment UIs; a decode mismatch between the two paths would make
/// freshly-created users appear corrupted.
#[tokio::test]
async fn given_created_user_when_fetched_then_fields_round_trip() {
    // GIVEN: A service that stores and returns the user
    let payload = json!({
        "unique_id": "bob@example.com",
        "display_name": "Bob",
        "email": "bob@example.com",
        "sms_number": "+1 555-123-0000",
        "voice_number": "+1 555-123-0001",
        "otp": "482913"
    });

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": payload})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/bob@example.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": payload})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    // WHEN: Creating then fetching
    let attributes = UserAttributes::default()
        .with_email("bob@example.com")
        .with_sms_number("+15551230000")
        .with_voice_number("+15551230001");
    let created = client
        .create_user("bob@example.com", "Bob", attributes)
        .await
        .expect("create succeeds");
    let fetched = client
        .get_user("bob@example.com")
        .await
        .expect("get succeeds");

    // THEN: Fields match, server-side phone formatting passed through as-is
    assert_eq!(created, fetched);
    assert_eq!(fetched.display_name.as_deref(), Some("Bob"));
    assert_eq!(fetched.email.as_deref(), Some("bob@example.com"));
    assert_eq!(fetched.sms_number.as_deref(), Some("+1 555-123-0000"));
    assert_eq!(fetched.voice_number.as_deref(), Some("+1 555-123-0001"));
}

/// **VALUE**: Verifies omitted optional attributes never reach the wire.
///
/// **WHY THIS MATTERS**: The service treats `email=` as "clear the email".
/// Sending empty strings for unset attributes would wipe stored
/// destinations on every update.
///
/// **BUG THIS CATCHES**: Would catch if the parameter mapping started
/// serializing `None` as an empty value.
#[tokio::test]
async fn given_no_optional_attributes_when_creating_then_only_required_params_sent() {
    // GIVEN: A mock that only matches the exact two-parameter body
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_string("unique_id=eve&display_name=Eve"))
        .and(query_param("unique_id", "eve"))
        .and(query_param("display_name", "Eve"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"unique_id": "eve", "display_name": "Eve"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    // WHEN/THEN: The exact-body mock answers, so nothing extra was sent
    let user = client
        .create_user("eve", "Eve", UserAttributes::default())
        .await
        .expect("create succeeds");
    assert_eq!(user.unique_id, "eve");
}

/// **VALUE**: Verifies set attributes are marshaled, with meta JSON-encoded
/// into a single parameter.
#[tokio::test]
async fn given_attributes_when_updating_then_params_sent_in_query_and_body() {
    // GIVEN: A mock requiring the attribute parameters in both encodings
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/eve/"))
        .and(query_param("display_name", "Evelyn"))
        .and(query_param("sms_number", "+15551230000"))
        .and(query_param("meta", r#"{"seat":7}"#))
        .and(body_string_contains("display_name=Evelyn"))
        .and(body_string_contains("sms_number="))
        .and(body_string_contains("meta="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"unique_id": "eve", "display_name": "Evelyn"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    // WHEN: Updating with a display name, an SMS number, and metadata
    let attributes = UserAttributes::default()
        .with_sms_number("+15551230000")
        .with_meta(json!({"seat": 7}));
    let user = client
        .update_user("eve", Some("Evelyn"), attributes)
        .await
        .expect("update succeeds");

    // THEN: The updated record decodes
    assert_eq!(user.display_name.as_deref(), Some("Evelyn"));
}

/// **VALUE**: Verifies delete decodes the service's confirmation flag.
#[tokio::test]
async fn given_existing_user_when_deleted_then_confirmation_returned() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/bob/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    assert!(client.delete_user("bob").await.expect("delete succeeds"));
}

/// **VALUE**: Verifies token lookup posts the token and decodes the user.
#[tokio::test]
async fn given_issued_token_when_looked_up_then_user_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .and(body_string("token=tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"unique_id": "bob"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    let user = client
        .get_user_by_token("tok-123")
        .await
        .expect("lookup succeeds");
    assert_eq!(user.unique_id, "bob");
}

/// **VALUE**: Verifies SMS delivery sends the override number only when given.
#[tokio::test]
async fn given_sms_delivery_when_destination_omitted_then_only_unique_id_sent() {
    let server = MockServer::start().await;
    // Stored-number delivery: exactly one parameter
    Mock::given(method("POST"))
        .and(path("/sms/"))
        .and(body_string("unique_id=bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"unique_id": "bob"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Override delivery: both parameters
    Mock::given(method("POST"))
        .and(path("/voice/"))
        .and(query_param("unique_id", "bob"))
        .and(query_param("voice_number", "+15551230001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"unique_id": "bob"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    client.send_sms("bob", None).await.expect("sms succeeds");
    client
        .send_voice("bob", Some("+15551230001"))
        .await
        .expect("voice succeeds");
}

/// **VALUE**: Verifies the error catalog decodes as a typed list.
#[tokio::test]
async fn given_error_catalog_when_listed_then_entries_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/errors/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"code": "401_1", "message": "API key invalid"},
                {"code": "406_2", "message": "unique_id required"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    let catalog = client.api_errors().await.expect("catalog lists");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].code, "401_1");
    assert_eq!(catalog[1].message, "unique_id required");
}
