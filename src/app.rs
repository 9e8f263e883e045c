//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::toast_host::ToastHost;
use crate::config::HOME_ROUTE;
use crate::pages::{auth::AuthPage, browse::BrowsePage, listing_detail::ListingDetailPage};
use crate::state::{auth::AuthState, toast::ToastState};
use crate::util::session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and toast contexts, restores any persisted session
/// once mounted in the browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::starting());
    let toasts = RwSignal::new(ToastState::default());
    provide_context(auth);
    provide_context(toasts);

    // Effects only run after hydration, where localStorage is reachable.
    Effect::new(move |_| session::initialize(auth));

    view! {
        <Stylesheet id="leptos" href="/pkg/unisell.css"/>
        <Title text="UniSell"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=HOME_ROUTE/> }/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=StaticSegment("browse") view=BrowsePage/>
                <Route path=(StaticSegment("listing"), ParamSegment("id")) view=ListingDetailPage/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}
