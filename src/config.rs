//! Client configuration baked in at build time.
//!
//! The browser has no process environment, so overrides are read with
//! `option_env!` when the WASM bundle is compiled. Parsing goes through a
//! plain lookup function so it can be exercised without touching the real
//! environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_LANDING_PATH: &str = "/";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "wardrobe_access_token";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an absolute path starting with '/', got {value:?}")]
    RelativePath { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for REST calls, without a trailing slash.
    pub api_base_url: String,
    /// Public destination for visitors without a credential.
    pub landing_path: String,
    pub login_path: String,
    /// `localStorage` key holding the access token.
    pub token_storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            landing_path: DEFAULT_LANDING_PATH.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `WARDROBE_API_BASE_URL`: default `/api`
    /// - `WARDROBE_LANDING_PATH`: default `/`
    /// - `WARDROBE_LOGIN_PATH`: default `/login`
    /// - `WARDROBE_TOKEN_STORAGE_KEY`: default `wardrobe_access_token`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a path is relative or a value is blank.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(build_env)
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a path is relative or a value is blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = non_empty("WARDROBE_API_BASE_URL", lookup("WARDROBE_API_BASE_URL"))?
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let landing_path = absolute_path("WARDROBE_LANDING_PATH", lookup("WARDROBE_LANDING_PATH"), DEFAULT_LANDING_PATH)?;
        let login_path = absolute_path("WARDROBE_LOGIN_PATH", lookup("WARDROBE_LOGIN_PATH"), DEFAULT_LOGIN_PATH)?;
        let token_storage_key = non_empty("WARDROBE_TOKEN_STORAGE_KEY", lookup("WARDROBE_TOKEN_STORAGE_KEY"))?
            .unwrap_or_else(|| DEFAULT_TOKEN_STORAGE_KEY.to_owned());

        Ok(Self { api_base_url, landing_path, login_path, token_storage_key })
    }
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "WARDROBE_API_BASE_URL" => option_env!("WARDROBE_API_BASE_URL"),
        "WARDROBE_LANDING_PATH" => option_env!("WARDROBE_LANDING_PATH"),
        "WARDROBE_LOGIN_PATH" => option_env!("WARDROBE_LOGIN_PATH"),
        "WARDROBE_TOKEN_STORAGE_KEY" => option_env!("WARDROBE_TOKEN_STORAGE_KEY"),
        _ => None,
    };
    value.map(str::to_owned)
}

fn non_empty(var: &'static str, raw: Option<String>) -> Result<Option<String>, ConfigError> {
    match raw {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(Some(value.trim().to_owned())),
        None => Ok(None),
    }
}

fn absolute_path(var: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    let Some(value) = non_empty(var, raw)? else {
        return Ok(default.to_owned());
    };
    if !value.starts_with('/') {
        return Err(ConfigError::RelativePath { var, value });
    }
    Ok(value)
}
