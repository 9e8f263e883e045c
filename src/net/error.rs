//! Transport-level failures for REST calls.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;

/// Why an API call did not produce the expected payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (offline, CORS, DNS, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status. `message` is the display
    /// text (`detail` first); `message_field` is the body's `message` verbatim.
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        status: u16,
        message: Option<String>,
        message_field: Option<String>,
    },
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Browser-only endpoint invoked during server rendering.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Rejection built from a decoded error body.
    pub fn from_body(status: u16, body: &ErrorBody) -> Self {
        Self::Status {
            status,
            message: body.text(),
            message_field: body.message.clone(),
        }
    }

    /// Rejection whose body was a bare `{"message": ...}`, or unreadable when `None`.
    pub fn rejected(status: u16, message: Option<&str>) -> Self {
        Self::Status {
            status,
            message: message.map(str::to_owned),
            message_field: message.map(str::to_owned),
        }
    }

    /// Server-supplied message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The body's `message` field, ignoring `detail`.
    pub fn message_field(&self) -> Option<&str> {
        match self {
            Self::Status { message_field, .. } => message_field.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message to show a user: the server's text, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}
