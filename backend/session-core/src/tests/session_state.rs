// Unit tests for the pure session reducer.

use crate::session::{SessionAction, SessionState, User};
use crate::tests::fake_auth_api::test_user;

use common::RedactedToken;

fn credentials(token: &str, refresh: &str, user: Option<User>) -> SessionAction {
    SessionAction::SetCredentials {
        token: RedactedToken::new(token),
        refresh_token: RedactedToken::new(refresh),
        user,
    }
}

fn all_actions() -> Vec<SessionAction> {
    vec![
        credentials("t", "r", Some(test_user())),
        credentials("t", "r", None),
        SessionAction::SetToken(RedactedToken::new("t-only")),
        SessionAction::SetRefreshToken(RedactedToken::new("r-only")),
        SessionAction::SetUser(Some(test_user())),
        SessionAction::SetUser(None),
        SessionAction::Logout,
    ]
}

fn assert_flag_matches_token(state: &SessionState) {
    assert_eq!(
        state.is_authenticated(),
        state.token().is_some(),
        "is_authenticated must mirror token presence: {state:?}"
    );
}

/// **VALUE**: Verifies that `is_authenticated == token.is_some()` after every transition,
/// for every action sequence up to length 4.
///
/// **WHY THIS MATTERS**: The presentation layer only reads the flag. A flag that says
/// "authenticated" without a token makes every request go out anonymous while the UI
/// shows a signed-in user.
///
/// **BUG THIS CATCHES**: Would catch a reducer arm that forgets to set or clear the flag.
#[test]
fn given_any_action_sequence_when_applied_then_flag_always_mirrors_token() {
    let actions = all_actions();
    let n = actions.len();

    for a in 0..n {
        for b in 0..n {
            for c in 0..n {
                for d in 0..n {
                    let mut state = SessionState::anonymous();
                    assert_flag_matches_token(&state);
                    for index in [a, b, c, d] {
                        state = state.apply(actions[index].clone());
                        assert_flag_matches_token(&state);
                    }
                }
            }
        }
    }
}

#[test]
fn given_anonymous_state_when_credentials_with_user_set_then_all_fields_visible() {
    // GIVEN: Empty state
    let state = SessionState::anonymous();

    // WHEN: Setting full credentials
    let next = state.apply(credentials("t1", "r1", Some(test_user())));

    // THEN: Everything is populated
    assert_eq!(next.token().map(RedactedToken::as_str), Some("t1"));
    assert_eq!(next.refresh_token().map(RedactedToken::as_str), Some("r1"));
    assert!(next.is_authenticated());
    assert_eq!(next.user(), Some(&test_user()));

    // AND: The original value is untouched
    assert_eq!(state, SessionState::anonymous());
}

/// **VALUE**: Verifies that credentials without a user keep the previous profile.
///
/// **BUG THIS CATCHES**: Would catch a refresh wiping the signed-in user's profile.
#[test]
fn given_user_present_when_credentials_without_user_set_then_user_preserved() {
    let state = SessionState::anonymous().apply(credentials("t1", "r1", Some(test_user())));

    let next = state.apply(credentials("t2", "r2", None));

    assert_eq!(next.token().map(RedactedToken::as_str), Some("t2"));
    assert_eq!(next.refresh_token().map(RedactedToken::as_str), Some("r2"));
    assert_eq!(next.user(), Some(&test_user()));
}

#[test]
fn given_authenticated_state_when_set_token_then_refresh_token_and_user_untouched() {
    let state = SessionState::anonymous().apply(credentials("t1", "r1", Some(test_user())));

    let next = state.apply(SessionAction::SetToken(RedactedToken::new("t9")));

    assert_eq!(next.token().map(RedactedToken::as_str), Some("t9"));
    assert_eq!(next.refresh_token().map(RedactedToken::as_str), Some("r1"));
    assert_eq!(next.user(), Some(&test_user()));
    assert!(next.is_authenticated());
}

#[test]
fn given_anonymous_state_when_set_refresh_token_then_still_anonymous() {
    let next = SessionState::anonymous()
        .apply(SessionAction::SetRefreshToken(RedactedToken::new("r1")));

    assert_eq!(next.refresh_token().map(RedactedToken::as_str), Some("r1"));
    assert!(next.token().is_none());
    assert!(!next.is_authenticated());
}

#[test]
fn given_authenticated_state_when_set_user_none_then_only_user_cleared() {
    let state = SessionState::anonymous().apply(credentials("t1", "r1", Some(test_user())));

    let next = state.apply(SessionAction::SetUser(None));

    assert!(next.user().is_none());
    assert!(next.is_authenticated());
    assert_eq!(next.token().map(RedactedToken::as_str), Some("t1"));
}

/// **VALUE**: Verifies that logout is idempotent and always yields the empty state.
///
/// **BUG THIS CATCHES**: Would catch a logout arm that leaves a refresh token behind.
#[test]
fn given_any_state_when_logout_applied_twice_then_same_as_once() {
    for action in all_actions() {
        let state = SessionState::anonymous()
            .apply(credentials("t1", "r1", Some(test_user())))
            .apply(action);

        let once = state.apply(SessionAction::Logout);
        let twice = once.apply(SessionAction::Logout);

        assert_eq!(once, SessionState::anonymous());
        assert_eq!(once, twice);
        assert!(once.token().is_none());
        assert!(once.refresh_token().is_none());
        assert!(once.user().is_none());
        assert!(!once.is_authenticated());
    }
}

#[test]
fn given_actions_when_named_then_names_never_include_token_values() {
    let action = credentials("secret-token", "secret-refresh", None);
    assert_eq!(action.name(), "set_credentials");
    assert!(!format!("{action:?}").contains("secret-token"));
}
