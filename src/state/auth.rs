//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` is the snapshot every view reads (provided as an
//! `RwSignal<AuthState>` context). `Session` is the owner that mutates it:
//! it validates input, talks to the `AuthBackend`, and keeps the persisted
//! copy in `SessionStorage` consistent with memory.
//!
//! LIFECYCLE
//! =========
//! `loading` is true from startup until `initialize` runs once. After that
//! the session is authenticated iff both `token` and `user` are present.
//! Login and registration replace both; `update_user` and `refresh_user`
//! touch only the user; `logout` clears everything.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde_json::{Map, Value};

use crate::config::{TOKEN_KEY, USER_KEY};
use crate::net::auth::AuthBackend;
use crate::net::error::ApiError;
use crate::net::types::{LoginRequest, RegisterRequest, User};
use crate::state::storage::SessionStorage;
use crate::util::email::is_edu_email;

/// Authentication state tracking the current user, token and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// State before persisted storage has been read.
    pub fn starting() -> Self {
        Self { loading: true, ..Self::default() }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Token and user, when both are present.
    pub fn credentials(&self) -> Option<(&str, &User)> {
        Some((self.token.as_deref()?, self.user.as_ref()?))
    }

    pub fn user_id(&self) -> Option<String> {
        self.user.as_ref().and_then(User::id)
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Why a session operation failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please use a .edu email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// The server refused the request; `message` is ready for display.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        cause: ApiError,
    },
}

impl AuthError {
    fn rejected(cause: ApiError, fallback: &str) -> Self {
        Self::Rejected { message: cause.user_message(fallback), cause }
    }
}

/// Sign-up form input before it is mapped to the API shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub university_id: String,
    pub password: String,
}

impl From<&RegisterForm> for RegisterRequest {
    fn from(form: &RegisterForm) -> Self {
        Self {
            username: form.username.clone(),
            email: form.email.clone(),
            full_name: format!("{} {}", form.first_name, form.last_name),
            university: form.university_id.clone(),
            password: form.password.clone(),
        }
    }
}

/// Owner of the auth session: network via `B`, persistence via `S`.
#[derive(Debug)]
pub struct Session<B, S> {
    backend: B,
    storage: S,
    state: AuthState,
}

impl<B: AuthBackend, S: SessionStorage> Session<B, S> {
    /// Fresh session in the `loading` state; call `initialize` next.
    pub fn new(backend: B, storage: S) -> Self {
        Self::resume(backend, storage, AuthState::starting())
    }

    /// Session continuing from an existing snapshot.
    pub fn resume(backend: B, storage: S, state: AuthState) -> Self {
        Self { backend, storage, state }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn into_state(self) -> AuthState {
        self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Restore the session persisted by a previous page load.
    ///
    /// Anything short of a token plus a parseable user record is discarded
    /// and both keys are removed. Always leaves `loading == false`.
    pub fn initialize(&mut self) {
        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);
        let restored = match (token, user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some((token, user)),
                Err(e) => {
                    log::warn!("discarding stored user record: {e}");
                    None
                }
            },
            _ => None,
        };

        match restored {
            Some((token, user)) => {
                self.state.token = Some(token);
                self.state.user = Some(user);
            }
            None => {
                self.state.token = None;
                self.state.user = None;
                self.clear_persisted();
            }
        }
        self.state.loading = false;
    }

    /// Exchange credentials for a token and make it the current session.
    ///
    /// # Errors
    ///
    /// `InvalidEmail` before any network call when `email` is not a `.edu`
    /// address; `Rejected` with the server message (or "Login failed").
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        if !is_edu_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let response = self.backend.login(&request).await.map_err(|e| {
            log::warn!("login failed: {e}");
            AuthError::rejected(e, "Login failed")
        })?;

        self.persist_token(&response.access_token);
        self.persist_user(&response.user);
        self.state.token = Some(response.access_token);
        self.state.user = Some(response.user);
        Ok(())
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// # Errors
    ///
    /// `InvalidEmail` before any network call; `Rejected` with the server
    /// message (or "Registration failed"); any error from the follow-up login.
    pub async fn register(&mut self, form: &RegisterForm) -> Result<(), AuthError> {
        if !is_edu_email(&form.email) {
            return Err(AuthError::InvalidEmail);
        }
        let request = RegisterRequest::from(form);
        self.backend.register(&request).await.map_err(|e| {
            log::warn!("registration failed: {e}");
            AuthError::rejected(e, "Registration failed")
        })?;

        self.login(&form.email, &form.password).await
    }

    /// Drop the session from memory and storage. No network call.
    pub fn logout(&mut self) {
        self.state.user = None;
        self.state.token = None;
        self.clear_persisted();
    }

    /// Shallow-merge `partial` into the current user. No-op when signed out.
    pub fn update_user(&mut self, partial: Map<String, Value>) {
        let Some(user) = self.state.user.as_mut() else {
            return;
        };
        user.merge(partial);
        let merged = user.clone();
        self.persist_user(&merged);
    }

    /// Re-fetch the user record with the current token.
    ///
    /// Failures are logged and leave the session untouched. The result is
    /// dropped if the stored token changed while the request was in flight
    /// (logout or another login in a different view or tab).
    pub async fn refresh_user(&mut self) {
        let Some(token) = self.state.token.clone() else {
            return;
        };
        match self.backend.current_user(&token).await {
            Ok(_) if self.storage.get(TOKEN_KEY).as_deref() != Some(token.as_str()) => {
                log::debug!("stored session changed during refresh; discarding user record");
            }
            Ok(user) => {
                self.persist_user(&user);
                self.state.user = Some(user);
            }
            Err(e) => log::error!("refreshing user data failed: {e}"),
        }
    }

    fn persist_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    fn persist_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(e) => log::error!("serializing user record failed: {e}"),
        }
    }

    fn clear_persisted(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}
