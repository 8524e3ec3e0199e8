//! REST API helpers for the auth flow.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`.
//! Elsewhere: stubs returning [`ApiError::Unavailable`], since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so identity fetch failures
//! degrade to an unresolved session rather than crashing the app.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::User;
#[cfg(feature = "csr")]
use super::types::TokenResponse;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Whether the backend rejected the credential itself.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

#[cfg(any(test, feature = "csr"))]
fn current_user_endpoint(api_base: &str) -> String {
    format!("{api_base}/users/me")
}

#[cfg(any(test, feature = "csr"))]
fn token_endpoint(api_base: &str) -> String {
    format!("{api_base}/token")
}

#[cfg(any(test, feature = "csr"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Fetch the user the given access token belongs to.
///
/// # Errors
///
/// Returns [`ApiError`] if the request fails, the backend rejects the token,
/// or the body is not a user record.
pub async fn fetch_current_user(api_base: &str, token: &str) -> Result<User, ApiError> {
    #[cfg(feature = "csr")]
    {
        let endpoint = current_user_endpoint(api_base);
        let resp = gloo_net::http::Request::get(&endpoint)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status { endpoint, status: resp.status() });
        }
        resp.json::<User>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_base, token);
        Err(ApiError::Unavailable)
    }
}

/// Exchange username and password for an access token via the OAuth2
/// password form at `POST {api_base}/token`.
///
/// # Errors
///
/// Returns [`ApiError`] if the request fails, the credentials are rejected,
/// or the body carries no token.
pub async fn login(api_base: &str, username: &str, password: &str) -> Result<String, ApiError> {
    #[cfg(feature = "csr")]
    {
        let endpoint = token_endpoint(api_base);
        let form = web_sys::UrlSearchParams::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
        form.append("username", username);
        form.append("password", password);
        let resp = gloo_net::http::Request::post(&endpoint)
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status { endpoint, status: resp.status() });
        }
        let body: TokenResponse = resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.access_token)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_base, username, password);
        Err(ApiError::Unavailable)
    }
}
