//! Access-token persistence in `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; outside the browser the
//! helpers no-op so the auth session simply starts signed out.

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the stored access token, ignoring blank values.
pub fn read_token(key: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        storage()?
            .get_item(key)
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Persist `token` under `key`.
pub fn store_token(key: &str, token: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = storage() {
            if storage.set_item(key, token).is_err() {
                leptos::logging::warn!("token storage: failed to persist token under {key}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, token);
    }
}

/// Remove any token stored under `key`.
pub fn clear_token(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}
