//! Top navigation bar shared by every page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::session;

/// Brand, browse link, and either the signed-in user or a login link.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        session::logout(auth);
        toasts.update(|t| {
            t.info("Logged out");
        });
        navigate("/auth", NavigateOptions::default());
    };

    let display_name = move || auth.get().user.map(|u| u.display_name()).unwrap_or_default();
    let balance = move || {
        auth.get()
            .user
            .and_then(|u| u.balance())
            .map(|b| format!("${b:.2}"))
            .unwrap_or_default()
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/browse">"UniSell"</a>
            <a class="navbar__link" href="/browse">"Browse"</a>
            <div class="navbar__spacer"></div>
            <Show
                when=move || auth.get().is_authenticated()
                fallback=|| view! { <a class="navbar__link navbar__link--login" href="/auth">"Login"</a> }
            >
                <span class="navbar__user">{display_name}</span>
                <span class="navbar__balance">{balance}</span>
                <button class="navbar__logout" on:click=on_logout.clone()>"Logout"</button>
            </Show>
        </nav>
    }
}
