use crate::helpers::{DEAD_ACCESS_POINT, client_for};

use mfa_client::ApiError;

use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// OTP verification: check_auth and the fail-open variant
// ============================================================================

async fn mock_check(server: &MockServer, authenticated: bool) {
    Mock::given(method("POST"))
        .and(path("/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"authenticated": authenticated}
        })))
        .mount(server)
        .await;
}

/// **VALUE**: Verifies check_auth posts both parameters and returns the
/// service's verdict.
#[tokio::test]
async fn given_valid_code_when_checking_auth_then_returns_true() {
    // GIVEN: A service accepting the code
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check/"))
        .and(body_string("unique_id=bob&auth_code=482913"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"authenticated": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    // WHEN/THEN
    assert!(client.check_auth("bob", "482913").await.expect("check succeeds"));
}

/// **VALUE**: Verifies a rejected code comes back as Ok(false), not an error.
#[tokio::test]
async fn given_wrong_code_when_checking_auth_then_returns_false() {
    let server = MockServer::start().await;
    mock_check(&server, false).await;

    let client = client_for(&[&server.uri()]);

    assert!(!client.check_auth("bob", "000000").await.expect("check succeeds"));
}

/// **VALUE**: Verifies check_auth propagates typed errors unchanged.
///
/// **WHY THIS MATTERS**: Without the fail-open variant, callers must be able
/// to distinguish "wrong code" from "your API key is bad" - collapsing them
/// would hide operator errors behind user-facing rejections.
#[tokio::test]
async fn given_credential_error_when_checking_auth_then_error_propagates() {
    // GIVEN: A service rejecting the API key
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "data": null, "error_message": "API key invalid", "error_code": "401_1"
        })))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    // WHEN: Checking with propagation semantics
    let error = client.check_auth("bob", "482913").await.unwrap_err();

    // THEN: The credential error surfaces with the service's message
    match error {
        ApiError::Credential { message, .. } => assert_eq!(message, "API key invalid"),
        other => panic!("expected Credential, got {other}"),
    }
}

/// **VALUE**: Verifies the fail-open variant converts a credential error
/// into "authenticated".
///
/// **WHY THIS MATTERS**: This is the documented fail-open contract - and
/// exactly why the method carries the policy in its name. The test pins the
/// behavior so nobody "fixes" it without noticing what they are changing.
///
/// **BUG THIS CATCHES**: Would catch if fail-open started propagating
/// errors, locking every user out during an MFA-service outage for callers
/// that chose availability over strictness.
#[tokio::test]
async fn given_credential_error_when_checking_fail_open_then_returns_true() {
    // GIVEN: A service rejecting the API key
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "data": null, "error_message": "API key invalid", "error_code": "401_1"
        })))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);

    // WHEN/THEN: Fail-open reports authenticated
    assert!(client.check_auth_fail_open("bob", "482913").await);
}

/// **VALUE**: Verifies fail-open covers total outages too.
#[tokio::test]
async fn given_all_access_points_dead_when_checking_fail_open_then_returns_true() {
    // GIVEN: Nothing listening anywhere
    let client = client_for(&[DEAD_ACCESS_POINT]);

    // WHEN/THEN: Even ApiError::Server is swallowed into "authenticated"
    assert!(client.check_auth_fail_open("bob", "482913").await);
}

/// **VALUE**: Verifies fail-open does not touch genuine rejections.
///
/// **WHY THIS MATTERS**: Fail-open converts *errors*, not verdicts. A wrong
/// code with a healthy service must still be rejected, or the whole check
/// is theater.
#[tokio::test]
async fn given_wrong_code_when_checking_fail_open_then_returns_false() {
    // GIVEN: A healthy service rejecting the code
    let server = MockServer::start().await;
    mock_check(&server, false).await;

    let client = client_for(&[&server.uri()]);

    // WHEN/THEN: The service's verdict stands
    assert!(!client.check_auth_fail_open("bob", "000000").await);
}
