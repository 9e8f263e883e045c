//! Login and sign-up page gated to university email addresses.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entry point for unauthenticated users. Guarded actions elsewhere send
//! users here with `?redirect=<path>` so they return after signing in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
#[cfg(feature = "hydrate")]
use leptos_router::{NavigateOptions, hooks::use_navigate};

use crate::components::navbar::Navbar;
use crate::config::HOME_ROUTE;
use crate::state::auth::{AuthError, AuthState, RegisterForm};
use crate::util::email::EmailFeedback;

/// Where to go after login: a same-origin path from `redirect`, else the browse page.
pub fn redirect_target(raw: Option<String>) -> String {
    raw.filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| HOME_ROUTE.to_owned())
}

/// Inline hint shown while typing: both fields filled and different.
pub fn passwords_differ(password: &str, confirm: &str) -> bool {
    !password.is_empty() && !confirm.is_empty() && password != confirm
}

/// Submit-time password check. Never reaches the network on failure.
///
/// # Errors
///
/// Returns `AuthError::PasswordMismatch` when the two fields differ.
pub fn check_passwords(password: &str, confirm: &str) -> Result<(), AuthError> {
    if password == confirm { Ok(()) } else { Err(AuthError::PasswordMismatch) }
}

/// Sign-up button state: valid email, matching passwords, nothing in flight.
pub fn can_submit_signup(email: &str, password: &str, confirm: &str, busy: bool) -> bool {
    EmailFeedback::for_input(email) == EmailFeedback::Valid && password == confirm && !busy
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Login,
    SignUp,
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let tab = RwSignal::new(Tab::Login);
    let query = use_query_map();
    let redirect = Memo::new(move |_| redirect_target(query.read().get("redirect")));

    view! {
        <div class="page auth-page">
            <Navbar/>
            <div class="auth-page__container">
                <div class="auth-page__intro">
                    <span class="badge badge--outline">"Verified Students Only"</span>
                    <h1>"Welcome to UniSell"</h1>
                    <p class="muted">"Sign in with your university email to get started"</p>
                </div>
                <div class="tabs" role="tablist">
                    <button
                        class="tabs__trigger"
                        class:tabs__trigger--active=move || tab.get() == Tab::Login
                        on:click=move |_| tab.set(Tab::Login)
                    >
                        "Login"
                    </button>
                    <button
                        class="tabs__trigger"
                        class:tabs__trigger--active=move || tab.get() == Tab::SignUp
                        on:click=move |_| tab.set(Tab::SignUp)
                    >
                        "Sign Up"
                    </button>
                </div>
                <Show when=move || tab.get() == Tab::Login fallback=|| view! { <SignUpForm/> }>
                    <LoginForm redirect=redirect/>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn LoginForm(redirect: Memo<String>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let (email_value, password_value) = (email.get(), password.get());
            leptos::task::spawn_local(async move {
                match crate::util::session::login(auth, email_value, password_value).await {
                    Ok(()) => {
                        let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
                        navigate(&redirect.get_untracked(), options);
                    }
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, redirect);
        }
    };

    view! {
        <form class="card auth-form" on:submit=on_submit>
            <h2 class="card__title">"Login to Your Account"</h2>
            <p class="card__description">"Enter your credentials to access your account"</p>
            <label class="field">
                "University Email"
                <input
                    class="field__input"
                    type="email"
                    placeholder="student@university.edu"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label class="field">
                "Password"
                <input
                    class="field__input"
                    type="password"
                    placeholder="Enter your password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <button class="button button--wide" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Logging in..." } else { "Login" }}
            </button>
            <Show when=move || !error.get().is_empty()>
                <p class="form-error">{move || error.get()}</p>
            </Show>
        </form>
    }
}

#[component]
fn SignUpForm() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let university_id = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let feedback = Memo::new(move |_| EmailFeedback::for_input(&email.get()));
    let mismatch = move || passwords_differ(&password.get(), &confirm.get());
    let submit_enabled = move || can_submit_signup(&email.get(), &password.get(), &confirm.get(), busy.get());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        if let Err(e) = check_passwords(&password.get(), &confirm.get()) {
            error.set(e.to_string());
            return;
        }
        busy.set(true);
        let form = RegisterForm {
            username: username.get(),
            email: email.get(),
            first_name: first_name.get(),
            last_name: last_name.get(),
            university_id: university_id.get(),
            password: password.get(),
        };

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::util::session::register(auth, form).await {
                    Ok(()) => navigate(HOME_ROUTE, NavigateOptions::default()),
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, form);
        }
    };

    let text_field = move |label: &'static str, placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <label class="field">
                {label}
                <input
                    class="field__input"
                    type="text"
                    placeholder=placeholder
                    required
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <form class="card auth-form" on:submit=on_submit>
            <h2 class="card__title">"Create Your Account"</h2>
            <p class="card__description">"Use your university email to verify your student status"</p>
            <div class="field-row">
                {text_field("First Name", "John", first_name)}
                {text_field("Last Name", "Doe", last_name)}
            </div>
            {text_field("Username", "johndoe123", username)}
            {text_field("University ID", "U12345", university_id)}
            <label class="field">
                "University Email"
                <input
                    class="field__input"
                    class:field__input--valid=move || feedback.get() == EmailFeedback::Valid
                    class:field__input--invalid=move || feedback.get() == EmailFeedback::Invalid
                    type="email"
                    placeholder="student@university.edu"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <Show when=move || feedback.get() != EmailFeedback::Empty>
                <p
                    class="field__hint"
                    class:field__hint--ok=move || feedback.get() == EmailFeedback::Valid
                    class:field__hint--error=move || feedback.get() == EmailFeedback::Invalid
                >
                    {move || feedback.get().message().unwrap_or_default()}
                </p>
            </Show>
            <label class="field">
                "Password"
                <input
                    class="field__input"
                    type="password"
                    placeholder="Create a strong password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <label class="field">
                "Confirm Password"
                <input
                    class="field__input"
                    type="password"
                    placeholder="Re-enter your password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
            </label>
            <Show when=mismatch>
                <p class="field__hint field__hint--error">"Passwords do not match"</p>
            </Show>
            <Show when=move || !error.get().is_empty()>
                <p class="form-error">{move || error.get()}</p>
            </Show>
            <button class="button button--wide" type="submit" disabled=move || !submit_enabled()>
                {move || if busy.get() { "Creating Account..." } else { "Create Account" }}
            </button>
            <p class="auth-form__note">
                "Your account will be created immediately and you can start using the marketplace"
            </p>
        </form>
    }
}
