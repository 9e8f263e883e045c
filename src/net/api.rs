//! REST API helpers for the marketplace endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `ApiError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-2xx responses carry the
//! server's `detail`/`message` text so views can show it verbatim or fall
//! back to their own wording.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::types::{Chat, CreateChatRequest, Listing, PurchaseResult, Rating, RatingRequest};

/// Query parameters accepted by `GET /api/listings`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ListingFilter {
    /// Encoded query string including the leading `?`, or empty when no filter is set.
    pub fn query_string(&self) -> String {
        let pairs: Vec<String> = [("category", &self.category), ("search", &self.search)]
            .into_iter()
            .filter_map(|(key, value)| {
                let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
                Some(format!("{key}={}", urlencoding::encode(value)))
            })
            .collect();
        if pairs.is_empty() { String::new() } else { format!("?{}", pairs.join("&")) }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn listings_endpoint(filter: &ListingFilter) -> String {
    format!("/api/listings{}", filter.query_string())
}

#[cfg(any(test, feature = "hydrate"))]
fn listing_endpoint(id: &str) -> String {
    format!("/api/listings/{}", urlencoding::encode(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn purchase_endpoint(id: &str) -> String {
    format!("{}/purchase", listing_endpoint(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn ratings_endpoint(id: &str) -> String {
    format!("{}/ratings", listing_endpoint(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn admin_listing_endpoint(id: &str) -> String {
    format!("/api/admin/listings/{}", urlencoding::encode(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn ban_user_endpoint(user_id: &str) -> String {
    format!("/api/admin/users/{}/ban", urlencoding::encode(user_id))
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Browser transport shared by every endpoint helper.
#[cfg(feature = "hydrate")]
pub(crate) mod http {
    use gloo_net::http::{Request, Response};
    use serde::de::DeserializeOwned;

    use crate::net::error::ApiError;
    use crate::net::types::ErrorBody;

    pub(crate) fn network(err: gloo_net::Error) -> ApiError {
        ApiError::Network(err.to_string())
    }

    async fn checked(request: Request) -> Result<Response, ApiError> {
        let resp = request.send().await.map_err(network)?;
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.json::<ErrorBody>().await.unwrap_or_default();
        Err(ApiError::from_body(status, &body))
    }

    /// Send `request` and decode a JSON body on success.
    pub(crate) async fn send_json<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
        let resp = checked(request).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send `request` and ignore the body on success.
    pub(crate) async fn send(request: Request) -> Result<(), ApiError> {
        checked(request).await.map(|_| ())
    }
}

/// Fetch listings from `GET /api/listings`, filtered by category and search text.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a listing array.
pub async fn fetch_listings(filter: &ListingFilter) -> Result<Vec<Listing>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&listings_endpoint(filter));
        let request = gloo_net::http::Request::get(&url).build().map_err(http::network)?;
        http::send_json(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filter;
        Err(ApiError::Unavailable)
    }
}

/// Fetch a single listing from `GET /api/listings/{id}`.
///
/// # Errors
///
/// Returns an error if the listing does not exist or the request fails.
pub async fn fetch_listing(id: &str) -> Result<Listing, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&listing_endpoint(id));
        let request = gloo_net::http::Request::get(&url).build().map_err(http::network)?;
        http::send_json(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// Fetch reviews for a listing from `GET /api/listings/{id}/ratings`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn fetch_listing_ratings(id: &str) -> Result<Vec<Rating>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&ratings_endpoint(id));
        let request = gloo_net::http::Request::get(&url).build().map_err(http::network)?;
        http::send_json(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// Buy `quantity` units via `POST /api/listings/{id}/purchase`.
///
/// # Errors
///
/// Returns the server's rejection (insufficient balance, out of stock, ...)
/// or a transport error.
pub async fn purchase_listing(token: &str, id: &str, quantity: u32) -> Result<PurchaseResult, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&purchase_endpoint(id));
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .json(&serde_json::json!({ "quantity": quantity }))
            .map_err(http::network)?;
        http::send_json::<crate::net::types::PurchaseResponse>(request)
            .await
            .map(crate::net::types::PurchaseResponse::into_result)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, id, quantity);
        Err(ApiError::Unavailable)
    }
}

/// Open a conversation between two users via `POST /api/chats`.
///
/// # Errors
///
/// Returns an error if the chat cannot be created. A 400 whose message
/// contains "already exists" means the conversation is already open.
pub async fn create_chat(token: &str, request: &CreateChatRequest) -> Result<Chat, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url("/api/chats");
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(http::network)?;
        http::send_json(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, request);
        Err(ApiError::Unavailable)
    }
}

/// Submit a review via `POST /api/listings/{id}/ratings`.
///
/// # Errors
///
/// Returns an error if the rating is rejected or the request fails.
pub async fn rate_listing(token: &str, id: &str, request: &RatingRequest) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&ratings_endpoint(id));
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(http::network)?;
        http::send(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, id, request);
        Err(ApiError::Unavailable)
    }
}

/// Remove a listing via `DELETE /api/admin/listings/{id}`. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the request fails.
pub async fn delete_listing(token: &str, id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&admin_listing_endpoint(id));
        let request = gloo_net::http::Request::delete(&url)
            .header("Authorization", &bearer(token))
            .build()
            .map_err(http::network)?;
        http::send(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, id);
        Err(ApiError::Unavailable)
    }
}

/// Ban a user via `POST /api/admin/users/{id}/ban`. Admin only.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the request fails.
pub async fn ban_user(token: &str, user_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = crate::config::api_url(&ban_user_endpoint(user_id));
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .build()
            .map_err(http::network)?;
        http::send(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, user_id);
        Err(ApiError::Unavailable)
    }
}
