use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::types::LoginResponse;
use crate::state::storage::MemoryStorage;

// =============================================================
// Scripted backend
// =============================================================

#[derive(Clone, Debug)]
struct ScriptedBackend {
    login: Result<LoginResponse, ApiError>,
    register: Result<(), ApiError>,
    me: Result<User, ApiError>,
    /// Storage writes applied while `/me` is in flight: `Some` sets, `None` removes.
    during_me: Option<(MemoryStorage, Vec<(&'static str, Option<&'static str>)>)>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedBackend {
    fn accepting() -> Self {
        Self {
            login: Ok(LoginResponse { access_token: "tok-1".to_owned(), user: user(json!({ "id": 1, "email": "ana@state.edu" })) }),
            register: Ok(()),
            me: Ok(user(json!({ "id": 1, "email": "ana@state.edu", "balance": 99 }))),
            during_me: None,
            calls: Rc::default(),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl AuthBackend for ScriptedBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.calls.borrow_mut().push(format!("login:{}", request.email));
        self.login.clone()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("register:{}:{}", request.full_name, request.university));
        self.register.clone()
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        self.calls.borrow_mut().push(format!("me:{token}"));
        if let Some((storage, writes)) = &self.during_me {
            for (key, value) in writes {
                match value {
                    Some(value) => storage.set(key, value),
                    None => storage.remove(key),
                }
            }
        }
        self.me.clone()
    }
}

fn user(value: Value) -> User {
    serde_json::from_value(value).expect("user object")
}

fn rejected(status: u16, message: Option<&str>) -> ApiError {
    ApiError::rejected(status, message)
}

fn signed_in(backend: ScriptedBackend, storage: MemoryStorage) -> Session<ScriptedBackend, MemoryStorage> {
    let mut session = Session::new(backend, storage);
    session.initialize();
    block_on(session.login("ana@state.edu", "pw")).expect("login");
    session
}

fn register_form(email: &str) -> RegisterForm {
    RegisterForm {
        username: "ana".to_owned(),
        email: email.to_owned(),
        first_name: "Ana".to_owned(),
        last_name: "Lopez".to_owned(),
        university_id: "U123".to_owned(),
        password: "pw".to_owned(),
    }
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn auth_state_starting_is_loading() {
    assert!(AuthState::starting().loading);
    assert!(!AuthState::default().loading);
}

#[test]
fn authenticated_requires_both_token_and_user() {
    let only_token = AuthState { token: Some("t".to_owned()), ..AuthState::default() };
    assert!(!only_token.is_authenticated());
    assert!(only_token.credentials().is_none());
    let only_user = AuthState { user: Some(user(json!({ "id": 1 }))), ..AuthState::default() };
    assert!(!only_user.is_authenticated());
    let both = AuthState { token: Some("t".to_owned()), ..only_user };
    assert!(both.is_authenticated());
    assert_eq!(both.user_id().as_deref(), Some("1"));
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_restores_persisted_session() {
    let storage = MemoryStorage::with_entries([("token", "tok-9"), ("user", r#"{"id":3,"is_admin":true}"#)]);
    let mut session = Session::new(ScriptedBackend::accepting(), storage);
    session.initialize();
    let state = session.state();
    assert!(!state.loading);
    assert_eq!(state.token.as_deref(), Some("tok-9"));
    assert!(state.is_admin());
}

#[test]
fn initialize_discards_unparsable_user() {
    let storage = MemoryStorage::with_entries([("token", "tok-9"), ("user", "{broken")]);
    let mut session = Session::new(ScriptedBackend::accepting(), storage.clone());
    session.initialize();
    assert!(!session.state().is_authenticated());
    assert!(session.state().token.is_none());
    assert!(!session.state().loading);
    assert!(storage.is_empty());
}

#[test]
fn initialize_discards_token_without_user() {
    let storage = MemoryStorage::with_entries([("token", "tok-9")]);
    let mut session = Session::new(ScriptedBackend::accepting(), storage.clone());
    session.initialize();
    assert_eq!(session.state(), &AuthState::default());
    assert!(storage.is_empty());
}

#[test]
fn initialize_with_empty_storage_finishes_loading() {
    let mut session = Session::new(ScriptedBackend::accepting(), MemoryStorage::new());
    session.initialize();
    assert!(!session.state().loading);
    assert!(!session.state().is_authenticated());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_rejects_non_edu_email_without_network() {
    let backend = ScriptedBackend::accepting();
    let mut session = Session::new(backend.clone(), MemoryStorage::new());
    session.initialize();
    for email in ["ana@gmail.com", "ana@state.edu ", "ana", "@state.edu"] {
        assert_eq!(block_on(session.login(email, "pw")), Err(AuthError::InvalidEmail));
    }
    assert!(backend.calls().is_empty());
    assert!(!session.state().is_authenticated());
}

#[test]
fn login_persists_token_and_user() {
    let storage = MemoryStorage::new();
    let session = signed_in(ScriptedBackend::accepting(), storage.clone());
    let state = session.state();
    assert_eq!(state.token.as_deref(), Some("tok-1"));
    assert_eq!(storage.get("token").as_deref(), Some("tok-1"));
    let persisted: User = serde_json::from_str(&storage.get("user").expect("persisted user")).expect("user json");
    assert_eq!(Some(&persisted), state.user.as_ref());
}

#[test]
fn login_surfaces_server_message() {
    let backend = ScriptedBackend { login: Err(rejected(401, Some("Invalid credentials"))), ..ScriptedBackend::accepting() };
    let storage = MemoryStorage::new();
    let mut session = Session::new(backend, storage.clone());
    session.initialize();
    let err = block_on(session.login("ana@state.edu", "bad")).expect_err("rejected");
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!session.state().is_authenticated());
    assert!(storage.is_empty());
}

#[test]
fn login_falls_back_to_generic_message() {
    let backend = ScriptedBackend { login: Err(rejected(500, None)), ..ScriptedBackend::accepting() };
    let mut session = Session::new(backend, MemoryStorage::new());
    let err = block_on(session.login("ana@state.edu", "pw")).expect_err("rejected");
    assert_eq!(err.to_string(), "Login failed");
    let network = ScriptedBackend { login: Err(ApiError::Network("offline".to_owned())), ..ScriptedBackend::accepting() };
    let mut session = Session::new(network, MemoryStorage::new());
    let err = block_on(session.login("ana@state.edu", "pw")).expect_err("rejected");
    assert_eq!(err.to_string(), "Login failed");
}

#[test]
fn login_replaces_previous_session_wholesale() {
    let storage = MemoryStorage::with_entries([("token", "old"), ("user", r#"{"id":7,"nickname":"x"}"#)]);
    let mut session = Session::new(ScriptedBackend::accepting(), storage.clone());
    session.initialize();
    block_on(session.login("ana@state.edu", "pw")).expect("login");
    assert_eq!(session.state().user_id().as_deref(), Some("1"));
    assert!(session.state().user.as_ref().and_then(|u| u.get("nickname")).is_none());
    assert_eq!(storage.get("token").as_deref(), Some("tok-1"));
}

// =============================================================
// register
// =============================================================

#[test]
fn register_maps_fields_and_auto_logs_in() {
    let backend = ScriptedBackend::accepting();
    let mut session = Session::new(backend.clone(), MemoryStorage::new());
    session.initialize();
    block_on(session.register(&register_form("ana@state.edu"))).expect("register");
    assert_eq!(backend.calls(), vec!["register:Ana Lopez:U123".to_owned(), "login:ana@state.edu".to_owned()]);
    assert!(session.state().is_authenticated());
}

#[test]
fn register_rejects_non_edu_email_without_network() {
    let backend = ScriptedBackend::accepting();
    let mut session = Session::new(backend.clone(), MemoryStorage::new());
    assert_eq!(block_on(session.register(&register_form("ana@gmail.com"))), Err(AuthError::InvalidEmail));
    assert!(backend.calls().is_empty());
}

#[test]
fn register_failure_skips_login() {
    let backend = ScriptedBackend { register: Err(rejected(400, Some("Email already registered"))), ..ScriptedBackend::accepting() };
    let mut session = Session::new(backend.clone(), MemoryStorage::new());
    let err = block_on(session.register(&register_form("ana@state.edu"))).expect_err("rejected");
    assert_eq!(err.to_string(), "Email already registered");
    assert_eq!(backend.calls().len(), 1);
    let bare = ScriptedBackend { register: Err(rejected(500, None)), ..ScriptedBackend::accepting() };
    let mut session = Session::new(bare, MemoryStorage::new());
    let err = block_on(session.register(&register_form("ana@state.edu"))).expect_err("rejected");
    assert_eq!(err.to_string(), "Registration failed");
}

#[test]
fn register_propagates_auto_login_failure() {
    let backend = ScriptedBackend { login: Err(rejected(401, Some("Account pending"))), ..ScriptedBackend::accepting() };
    let mut session = Session::new(backend, MemoryStorage::new());
    let err = block_on(session.register(&register_form("ana@state.edu"))).expect_err("login failure");
    assert_eq!(err.to_string(), "Account pending");
    assert!(!session.state().is_authenticated());
}

// =============================================================
// logout / update_user / refresh_user
// =============================================================

#[test]
fn logout_clears_memory_and_storage() {
    let storage = MemoryStorage::new();
    let mut session = signed_in(ScriptedBackend::accepting(), storage.clone());
    session.logout();
    assert!(session.state().user.is_none());
    assert!(session.state().token.is_none());
    assert!(storage.is_empty());
}

#[test]
fn update_user_merges_and_persists() {
    let storage = MemoryStorage::with_entries([("token", "t"), ("user", r#"{"balance":10,"id":1}"#)]);
    let mut session = Session::new(ScriptedBackend::accepting(), storage.clone());
    session.initialize();
    let Value::Object(partial) = json!({ "balance": 50 }) else {
        unreachable!()
    };
    session.update_user(partial);
    let expected = user(json!({ "balance": 50, "id": 1 }));
    assert_eq!(session.state().user.as_ref(), Some(&expected));
    let persisted: User = serde_json::from_str(&storage.get("user").expect("persisted")).expect("user json");
    assert_eq!(persisted, expected);
}

#[test]
fn update_user_is_noop_when_signed_out() {
    let storage = MemoryStorage::new();
    let mut session = Session::new(ScriptedBackend::accepting(), storage.clone());
    session.initialize();
    let Value::Object(partial) = json!({ "balance": 50 }) else {
        unreachable!()
    };
    session.update_user(partial);
    assert!(session.state().user.is_none());
    assert!(storage.is_empty());
}

#[test]
fn refresh_user_without_token_skips_network() {
    let backend = ScriptedBackend::accepting();
    let mut session = Session::new(backend.clone(), MemoryStorage::new());
    session.initialize();
    let before = session.state().clone();
    block_on(session.refresh_user());
    assert!(backend.calls().is_empty());
    assert_eq!(session.state(), &before);
}

#[test]
fn refresh_user_overwrites_user_with_bearer_token() {
    let backend = ScriptedBackend::accepting();
    let storage = MemoryStorage::new();
    let mut session = signed_in(backend.clone(), storage.clone());
    block_on(session.refresh_user());
    assert_eq!(backend.calls().last().map(String::as_str), Some("me:tok-1"));
    assert_eq!(session.state().user.as_ref().and_then(User::balance), Some(99.0));
    assert!(storage.get("user").expect("persisted").contains("99"));
}

#[test]
fn refresh_user_failure_keeps_last_known_user() {
    let backend = ScriptedBackend { me: Err(rejected(401, None)), ..ScriptedBackend::accepting() };
    let storage = MemoryStorage::new();
    let mut session = signed_in(backend, storage.clone());
    let before = session.state().clone();
    let persisted_before = storage.get("user");
    block_on(session.refresh_user());
    assert_eq!(session.state(), &before);
    assert_eq!(storage.get("user"), persisted_before);
}

#[test]
fn refresh_user_discards_result_after_newer_login() {
    let storage = MemoryStorage::new();
    let mut backend = ScriptedBackend::accepting();
    backend.during_me = Some((storage.clone(), vec![("token", Some("tok-B")), ("user", Some(r#"{"id":2}"#))]));
    let mut session = signed_in(backend, storage.clone());
    let before = session.state().clone();
    block_on(session.refresh_user());
    assert_eq!(storage.get("token").as_deref(), Some("tok-B"));
    assert_eq!(storage.get("user").as_deref(), Some(r#"{"id":2}"#));
    assert_eq!(session.state(), &before);
}

#[test]
fn refresh_user_discards_result_after_logout() {
    let storage = MemoryStorage::new();
    let mut backend = ScriptedBackend::accepting();
    backend.during_me = Some((storage.clone(), vec![("token", None), ("user", None)]));
    let mut session = signed_in(backend, storage.clone());
    block_on(session.refresh_user());
    assert!(storage.is_empty());
}

#[test]
fn register_form_maps_to_api_shape() {
    let request = RegisterRequest::from(&register_form("ana@state.edu"));
    assert_eq!(request.full_name, "Ana Lopez");
    assert_eq!(request.university, "U123");
    assert_eq!(request.username, "ana");
}
