#![cfg(not(feature = "csr"))]

use leptos::reactive::owner::Owner;

use super::*;
use crate::net::api::ApiError;
use crate::state::auth::AuthPhase;

fn with_owner<T>(f: impl FnOnce() -> T) -> T {
    Owner::new().with(f)
}

#[test]
fn new_session_is_loading_until_started() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        assert_eq!(session.state().get_untracked().phase(), AuthPhase::Loading);
    });
}

#[test]
fn start_without_stored_token_settles_signed_out() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        session.start();
        assert_eq!(session.state().get_untracked(), AuthState::signed_out());
    });
}

#[test]
fn sign_in_without_reachable_backend_waits_instead_of_redirecting() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        session.sign_in("tok".to_owned());
        let state = session.state().get_untracked();
        assert_eq!(state.token.as_deref(), Some("tok"));
        assert_eq!(state.phase(), AuthPhase::AuthenticatedPending);
    });
}

#[test]
fn sign_out_tears_down_to_unauthenticated() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        session.sign_in("tok".to_owned());
        session.sign_out();
        assert_eq!(session.state().get_untracked().phase(), AuthPhase::Unauthenticated);
    });
}

#[test]
fn late_identity_for_replaced_token_is_discarded() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        session.state().set(AuthState::resolving(Some("new".to_owned())));
        let user = User { id: 3, username: "bob".to_owned(), email: None, full_name: None };
        session.finish("old", Ok(user));
        assert_eq!(session.state().get_untracked().phase(), AuthPhase::Loading);
    });
}

#[test]
fn provide_auth_session_is_idempotent() {
    with_owner(|| {
        let first = provide_auth_session(ClientConfig::default());
        first.state().set(AuthState::resolving(Some("marker".to_owned())));
        let second = provide_auth_session(ClientConfig::default());
        assert_eq!(second.state().get_untracked().token.as_deref(), Some("marker"));
        assert_eq!(use_auth_session().state().get_untracked().token.as_deref(), Some("marker"));
    });
}

#[test]
fn rejected_credential_settles_signed_out() {
    for status in [401, 403] {
        with_owner(|| {
            let session = AuthSession::new(ClientConfig::default());
            session.state().set(AuthState::resolving(Some("expired".to_owned())));
            let rejected = ApiError::Status { endpoint: "/api/users/me".to_owned(), status };
            session.finish("expired", Err(rejected));
            let state = session.state().get_untracked();
            assert_eq!(state, AuthState::signed_out());
            assert_eq!(state.phase(), AuthPhase::Unauthenticated);
        });
    }
}

#[test]
fn transient_failure_keeps_credential_and_waits() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        session.state().set(AuthState::resolving(Some("tok".to_owned())));
        let outage = ApiError::Status { endpoint: "/api/users/me".to_owned(), status: 503 };
        session.finish("tok", Err(outage));
        let state = session.state().get_untracked();
        assert_eq!(state.token.as_deref(), Some("tok"));
        assert_eq!(state.phase(), AuthPhase::AuthenticatedPending);
    });
}

#[test]
fn late_rejection_for_replaced_token_keeps_new_session() {
    with_owner(|| {
        let session = AuthSession::new(ClientConfig::default());
        session.state().set(AuthState::resolving(Some("new".to_owned())));
        let rejected = ApiError::Status { endpoint: "/api/users/me".to_owned(), status: 401 };
        session.finish("old", Err(rejected));
        let state = session.state().get_untracked();
        assert_eq!(state.token.as_deref(), Some("new"));
        assert_eq!(state.phase(), AuthPhase::Loading);
    });
}
