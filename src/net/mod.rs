//! Networking modules for the marketplace REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` exchanges credentials for a session, `api` covers listings,
//! purchases, chats, ratings and moderation, `types` defines the wire schema
//! and `error` the shared failure type.

pub mod api;
pub mod auth;
pub mod error;
pub mod types;
