use crate::HttpStatusCode;

/// **VALUE**: Verifies which statuses count as a credential rejection.
///
/// **WHY THIS MATTERS**: Login maps these to `InvalidCredentials`; a 500 must not be
/// reported to the user as a wrong password.
#[test]
fn given_status_codes_when_checking_credential_rejection_then_only_auth_failures_match() {
    // GIVEN/WHEN/THEN
    assert!(HttpStatusCode(400).is_credential_rejection());
    assert!(HttpStatusCode(401).is_credential_rejection());
    assert!(HttpStatusCode(403).is_credential_rejection());
    assert!(!HttpStatusCode(404).is_credential_rejection());
    assert!(!HttpStatusCode(500).is_credential_rejection());
}

#[test]
fn given_status_codes_when_classifying_then_client_and_server_ranges_are_disjoint() {
    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(503).is_client_error());
    assert!(!HttpStatusCode(200).is_client_error());
    assert_eq!(HttpStatusCode::from(418).to_string(), "418");
}
