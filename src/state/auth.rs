//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The snapshot is written by
//! `state::session` and only ever read by `components::auth_gate`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication snapshot: credential, resolved identity, and loading flag.
///
/// The three fields are not assumed to agree with each other. A token may be
/// present while the user is still missing (or never resolves), and `loading`
/// wins over everything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub loading: bool,
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Which of the gate's states a snapshot falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthPhase {
    /// Identity resolution in flight.
    Loading,
    /// No credential. Triggers the redirect to the public landing page.
    Unauthenticated,
    /// Credential issued but no identity yet. Waited out, never redirected.
    AuthenticatedPending,
    /// Credential and identity both present.
    Authorized,
}

impl AuthPhase {
    pub fn of(state: &AuthState) -> Self {
        if state.loading {
            return Self::Loading;
        }
        match (&state.token, &state.user) {
            (None, _) => Self::Unauthenticated,
            (Some(_), None) => Self::AuthenticatedPending,
            (Some(_), Some(_)) => Self::Authorized,
        }
    }

    /// Whether entering this phase should send the visitor away.
    pub fn redirects(self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

impl AuthState {
    /// Snapshot while the identity behind `token` is being fetched.
    pub fn resolving(token: Option<String>) -> Self {
        Self { loading: true, token, user: None }
    }

    /// Snapshot after sign-out or when no credential was ever stored.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AuthPhase {
        AuthPhase::of(self)
    }

    /// Apply a fetched identity if it still belongs to the current token.
    ///
    /// Returns `false` and leaves the state untouched when the token changed
    /// (or was cleared) while the fetch was in flight.
    pub fn apply_identity(&mut self, token: &str, user: User) -> bool {
        if self.token.as_deref() != Some(token) {
            return false;
        }
        self.user = Some(user);
        self.loading = false;
        true
    }

    /// Finish resolution without an identity. The token is kept so the gate
    /// waits instead of redirecting.
    pub fn identity_unresolved(&mut self, token: &str) -> bool {
        if self.token.as_deref() != Some(token) {
            return false;
        }
        self.user = None;
        self.loading = false;
        true
    }

    /// The backend refused `token`: forget it and settle signed out.
    pub fn credential_rejected(&mut self, token: &str) -> bool {
        if self.token.as_deref() != Some(token) {
            return false;
        }
        *self = Self::signed_out();
        true
    }
}
