//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read environment variables at runtime, so the API
//! origin is baked in when the crate is compiled. Set `UNISELL_API_BASE` to
//! point a build at a different backend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// `localStorage` key holding the bearer token as plain text.
pub const TOKEN_KEY: &str = "token";

/// `localStorage` key holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// Image shown when a listing has no photos.
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=800";

/// Route users land on after signing in.
pub const HOME_ROUTE: &str = "/browse";

/// Origin of the marketplace REST API, without a trailing slash.
pub fn api_base() -> &'static str {
    option_env!("UNISELL_API_BASE")
        .map(|base| base.trim_end_matches('/'))
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

/// Absolute URL for an API path such as `/api/auth/login`.
pub fn api_url(path: &str) -> String {
    format!("{}{path}", api_base())
}
