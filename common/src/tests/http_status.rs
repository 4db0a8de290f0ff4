use crate::HttpStatusCode;

/// **VALUE**: Verifies the structured-error status set is exactly {401, 402, 404, 406, 409}.
///
/// **WHY THIS MATTERS**: The dispatcher uses this predicate to decide between
/// raising a typed error and failing over to the next access point. A wrong set
/// either swallows real errors into failover or surfaces infrastructure noise
/// as typed errors.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - A status is added to or dropped from the recognized set
/// - A typo swaps a recognized code (e.g. 403 for 404)
#[test]
fn given_each_status_when_checking_structured_error_then_matches_documented_set() {
    // GIVEN/WHEN/THEN: Only the documented codes are structured errors
    for code in [401u16, 402, 404, 406, 409] {
        assert!(
            HttpStatusCode(code).is_structured_error(),
            "{code} should be a structured error"
        );
    }
    for code in [200u16, 301, 400, 403, 405, 410, 418, 429, 500, 502, 503] {
        assert!(
            !HttpStatusCode(code).is_structured_error(),
            "{code} should not be a structured error"
        );
    }
}

/// **VALUE**: Verifies the success range is exactly 2xx.
#[test]
fn given_status_ranges_when_checking_success_then_only_2xx_matches() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(199).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(!HttpStatusCode(404).is_success());
}

/// **VALUE**: Verifies the 4xx/5xx range splits used in failover log lines.
#[test]
fn given_status_ranges_when_classifying_then_client_and_server_ranges_split_at_500() {
    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(500).is_server_error());
    assert!(HttpStatusCode(599).is_server_error());
    assert!(!HttpStatusCode(499).is_server_error());
}

/// **VALUE**: Verifies From<u16> and Display round the raw code through unchanged.
#[test]
fn given_u16_when_converting_and_formatting_then_code_preserved() {
    let status = HttpStatusCode::from(406);
    assert_eq!(status, HttpStatusCode(406));
    assert_eq!(format!("{status}"), "406");
}
