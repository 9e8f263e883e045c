//! Reactive bindings between views and the auth `Session`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views hold an `RwSignal<AuthState>` from context. Each helper here builds
//! a short-lived `AppSession` from the current snapshot, runs one operation,
//! and publishes the resulting state back to the signal once it settles.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use serde_json::{Map, Value};

use crate::net::auth::HttpAuthBackend;
use crate::state::auth::{AuthError, AuthState, RegisterForm, Session};
use crate::state::storage::BrowserStorage;

/// Session wired to the real API and `localStorage`.
pub type AppSession = Session<HttpAuthBackend, BrowserStorage>;

fn resume(auth: RwSignal<AuthState>) -> AppSession {
    Session::resume(HttpAuthBackend, BrowserStorage, auth.get_untracked())
}

/// Load the persisted session once at startup and clear `loading`.
pub fn initialize(auth: RwSignal<AuthState>) {
    let mut session = AppSession::new(HttpAuthBackend, BrowserStorage);
    session.initialize();
    auth.set(session.into_state());
}

/// Sign in and publish the new session.
///
/// # Errors
///
/// See `Session::login`.
pub async fn login(auth: RwSignal<AuthState>, email: String, password: String) -> Result<(), AuthError> {
    let mut session = resume(auth);
    let result = session.login(&email, &password).await;
    auth.set(session.into_state());
    result
}

/// Create an account, sign in, and publish the new session.
///
/// # Errors
///
/// See `Session::register`.
pub async fn register(auth: RwSignal<AuthState>, form: RegisterForm) -> Result<(), AuthError> {
    let mut session = resume(auth);
    let result = session.register(&form).await;
    auth.set(session.into_state());
    result
}

pub fn logout(auth: RwSignal<AuthState>) {
    let mut session = resume(auth);
    session.logout();
    auth.set(session.into_state());
}

pub fn update_user(auth: RwSignal<AuthState>, partial: Map<String, Value>) {
    let mut session = resume(auth);
    session.update_user(partial);
    auth.set(session.into_state());
}

/// Re-fetch the user record. Dropped if the token changed while in flight
/// so a logout is never undone by a late response.
pub async fn refresh_user(auth: RwSignal<AuthState>) {
    let mut session = resume(auth);
    let token = session.state().token.clone();
    session.refresh_user().await;
    let refreshed = session.into_state();
    auth.update(|state| {
        if state.token == token {
            state.user = refreshed.user;
        }
    });
}

/// Redirect target for the auth page, returning to `from` afterwards.
pub fn auth_redirect(from: &str) -> String {
    format!("/auth?redirect={}", urlencoding::encode(from))
}

