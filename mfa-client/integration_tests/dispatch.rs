use crate::helpers::{DEAD_ACCESS_POINT, client_for};

use mfa_client::ApiError;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Request dispatcher tests: failover and status classification through the
// public API, with wiremock standing in for the service's access points
// ============================================================================

/// **VALUE**: Verifies failover is transparent when the primary is unreachable.
///
/// **WHY THIS MATTERS**: The second access point exists precisely so that a
/// regional outage of the primary never surfaces to callers. If failover
/// breaks, the backup is dead weight and every primary outage becomes a
/// client-visible error.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The dispatcher stops iterating access points on connection errors
/// - A connection error is misclassified as a typed API error
#[tokio::test]
async fn given_dead_primary_when_dispatching_then_backup_result_returned() {
    // GIVEN: A dead primary and a healthy backup
    let backup = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"unique_id": "bob"}]
        })))
        .expect(1)
        .mount(&backup)
        .await;

    let client = client_for(&[DEAD_ACCESS_POINT, &backup.uri()]);

    // WHEN: Dispatching through the public API
    let users = client.get_all_users().await.expect("backup should answer");

    // THEN: The backup's payload is returned as if nothing happened
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].unique_id, "bob");
}

/// **VALUE**: Verifies exhausting every access point raises the Server error.
///
/// **BUG THIS CATCHES**: Would catch if the dispatcher returned a partial or
/// default payload after running out of access points.
#[tokio::test]
async fn given_all_access_points_dead_when_dispatching_then_server_error() {
    // GIVEN: Two dead access points
    let client = client_for(&[DEAD_ACCESS_POINT, "http://127.0.0.1:19/"]);

    // WHEN: Dispatching
    let result = client.get_all_users().await;

    // THEN: A Server error with no structured code
    let error = result.unwrap_err();
    assert!(matches!(error, ApiError::Server { .. }), "got {error}");
    assert_eq!(error.status(), None);
    assert_eq!(error.error_code(), None);
}

/// **VALUE**: Verifies a non-JSON body abandons the access point.
///
/// **WHY THIS MATTERS**: Captive portals and misconfigured proxies answer
/// with HTML on port 443; those responses must count as infrastructure
/// failures, not be force-fed to payload decoding.
#[tokio::test]
async fn given_malformed_body_on_primary_when_dispatching_then_fails_over() {
    // GIVEN: A primary answering 200 with garbage, a healthy backup
    let primary = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .expect(1)
        .mount(&primary)
        .await;

    let backup = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&backup)
        .await;

    let client = client_for(&[&primary.uri(), &backup.uri()]);

    // WHEN/THEN: The backup's (empty) listing comes back
    let users = client.get_all_users().await.expect("backup should answer");
    assert!(users.is_empty());
}

/// **VALUE**: Verifies an unrecognized error status abandons the access point.
///
/// **WHY THIS MATTERS**: A 500 is the access point's problem, not the
/// request's; the backup may well serve the same request fine.
#[tokio::test]
async fn given_unrecognized_status_on_primary_when_dispatching_then_fails_over() {
    // GIVEN: A primary answering 500 (with a well-formed envelope, even), a
    // healthy backup
    let primary = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "data": null, "error_message": "boom", "error_code": "500_1"
        })))
        .expect(1)
        .mount(&primary)
        .await;

    let backup = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&backup)
        .await;

    let client = client_for(&[&primary.uri(), &backup.uri()]);

    // WHEN/THEN: Failover succeeds
    assert!(client.get_all_users().await.is_ok());
}

/// **VALUE**: Verifies a structured error is raised without trying the backup.
///
/// **WHY THIS MATTERS**: A 404 indicts the request, not the access point.
/// Retrying it against the backup doubles load during incidents and can
/// turn one idempotency violation into two.
///
/// **BUG THIS CATCHES**: Would catch if the dispatcher kept iterating after
/// accepting a structured error response.
#[tokio::test]
async fn given_structured_error_on_primary_when_dispatching_then_no_failover() {
    // GIVEN: A primary answering 404, a backup that must see zero requests
    let primary = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "data": null, "error_message": "no such user", "error_code": "404_1"
        })))
        .expect(1)
        .mount(&primary)
        .await;

    let backup = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(0)
        .mount(&backup)
        .await;

    let client = client_for(&[&primary.uri(), &backup.uri()]);

    // WHEN: Requesting a missing user
    let error = client.get_user("ghost").await.unwrap_err();

    // THEN: NotFound, carrying the service's message and code
    match error {
        ApiError::NotFound { message, code, .. } => {
            assert_eq!(message, "no such user");
            assert_eq!(code, "404_1");
        }
        other => panic!("expected NotFound, got {other}"),
    }
    // Backup's expect(0) is verified when the mock server drops
}

/// **VALUE**: Verifies the full status-to-error table end to end.
///
/// **WHY THIS MATTERS**: This is the service's documented contract; unit
/// tests cover `classify` in isolation, this proves the dispatcher feeds it
/// real responses correctly.
#[tokio::test]
async fn given_each_structured_status_when_dispatching_then_typed_error_raised() {
    let cases: [(u16, fn(&ApiError) -> bool); 5] = [
        (401, |e| matches!(e, ApiError::Credential { .. })),
        (402, |e| matches!(e, ApiError::RateLimit { .. })),
        (404, |e| matches!(e, ApiError::NotFound { .. })),
        (406, |e| matches!(e, ApiError::Parameter { .. })),
        (409, |e| matches!(e, ApiError::Conflict { .. })),
    ];

    for (status, is_expected_variant) in cases {
        // GIVEN: An access point answering with the structured status
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "data": null,
                "error_message": format!("error for {status}"),
                "error_code": format!("{status}_1")
            })))
            .mount(&server)
            .await;

        let client = client_for(&[&server.uri()]);

        // WHEN: Dispatching
        let error = client.get_all_users().await.unwrap_err();

        // THEN: The documented variant, message and code
        assert!(is_expected_variant(&error), "status {status} gave {error}");
        assert_eq!(error.error_code().unwrap(), format!("{status}_1"));
        assert_eq!(error.status().unwrap().0, status);
    }
}
