//! Auth session provider: the single owner of [`AuthState`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The app root calls [`provide_auth_session`] once at startup. Pages and
//! gates read the snapshot through [`AuthSession::state`]; only this module
//! writes it. Sign-out is the teardown path: the stored credential is dropped
//! and the snapshot returns to signed out.
//!
//! Identity fetches are keyed by the token they were started for, so a late
//! response for an old token can never resurrect a session. A 401/403 on the
//! identity fetch means the credential is dead: it is dropped and the session
//! settles signed out. Any other failure keeps the credential and waits.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::util::token_storage;

#[derive(Clone, Copy, Debug)]
pub struct AuthSession {
    state: RwSignal<AuthState>,
    config: StoredValue<ClientConfig>,
}

/// Create the session, start identity resolution, and provide it as context.
///
/// Calling this again under the same owner returns the existing session.
pub fn provide_auth_session(config: ClientConfig) -> AuthSession {
    if let Some(existing) = use_context::<AuthSession>() {
        leptos::logging::warn!("auth session already provided; reusing existing session");
        return existing;
    }
    let session = AuthSession::new(config);
    provide_context(session);
    session.start();
    session
}

/// The session provided by [`provide_auth_session`].
///
/// # Panics
///
/// Panics if no session was provided above the calling component.
pub fn use_auth_session() -> AuthSession {
    expect_context::<AuthSession>()
}

impl AuthSession {
    /// Build an unstarted session. Resolution is pending until [`start`](Self::start).
    pub fn new(config: ClientConfig) -> Self {
        Self { state: RwSignal::new(AuthState::resolving(None)), config: StoredValue::new(config) }
    }

    pub fn state(self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn config(self) -> ClientConfig {
        self.config.get_value()
    }

    /// Resume from a stored credential, or settle as signed out.
    pub fn start(self) {
        let key = self.config.with_value(|c| c.token_storage_key.clone());
        match token_storage::read_token(&key) {
            Some(token) => self.resolve(token),
            None => self.state.set(AuthState::signed_out()),
        }
    }

    /// Persist a freshly issued credential and resolve its identity.
    pub fn sign_in(self, token: String) {
        let key = self.config.with_value(|c| c.token_storage_key.clone());
        token_storage::store_token(&key, &token);
        self.resolve(token);
    }

    /// Drop the credential and identity.
    pub fn sign_out(self) {
        let key = self.config.with_value(|c| c.token_storage_key.clone());
        token_storage::clear_token(&key);
        self.state.set(AuthState::signed_out());
        leptos::logging::log!("auth session: signed out");
    }

    fn resolve(self, token: String) {
        self.state.set(AuthState::resolving(Some(token.clone())));
        #[cfg(feature = "csr")]
        {
            let api_base = self.config.with_value(|c| c.api_base_url.clone());
            leptos::task::spawn_local(async move {
                let result = crate::net::api::fetch_current_user(&api_base, &token).await;
                self.finish(&token, result);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            self.finish(&token, Err(crate::net::api::ApiError::Unavailable));
        }
    }

    fn finish(self, token: &str, result: Result<User, crate::net::api::ApiError>) {
        let applied = match result {
            Ok(user) => {
                let mut applied = false;
                self.state.update(|s| applied = s.apply_identity(token, user));
                applied
            }
            Err(err) if err.is_unauthorized() => {
                leptos::logging::warn!("auth session: credential rejected: {err}");
                let mut applied = false;
                self.state.update(|s| applied = s.credential_rejected(token));
                if applied {
                    let key = self.config.with_value(|c| c.token_storage_key.clone());
                    token_storage::clear_token(&key);
                }
                applied
            }
            Err(err) => {
                leptos::logging::warn!("auth session: identity resolution failed: {err}");
                let mut applied = false;
                self.state.update(|s| applied = s.identity_unresolved(token));
                applied
            }
        };
        if !applied {
            leptos::logging::log!("auth session: discarded identity result for a replaced token");
        }
    }
}
