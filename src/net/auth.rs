//! Credential exchange with the auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state::auth::Session` drives the session lifecycle through the
//! `AuthBackend` seam. The browser build talks HTTP via `HttpAuthBackend`;
//! tests substitute a scripted backend.

#![allow(clippy::unused_async)]

use super::error::ApiError;
use super::types::{LoginRequest, LoginResponse, RegisterRequest, User};

/// Network operations the session store depends on.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// `POST /api/auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /api/auth/register`. The success payload is not used.
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// `GET /api/auth/me` authorized with the bearer `token`.
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;
}

/// `AuthBackend` backed by `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthBackend;

impl AuthBackend for HttpAuthBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::api::http;

            let url = crate::config::api_url("/api/auth/login");
            let request = gloo_net::http::Request::post(&url).json(request).map_err(http::network)?;
            http::send_json(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::api::http;

            let url = crate::config::api_url("/api/auth/register");
            let request = gloo_net::http::Request::post(&url).json(request).map_err(http::network)?;
            http::send(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::api::{bearer, http};

            let url = crate::config::api_url("/api/auth/me");
            let request = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer(token))
                .header("Content-Type", "application/json")
                .build()
                .map_err(http::network)?;
            http::send_json(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(ApiError::Unavailable)
        }
    }
}
