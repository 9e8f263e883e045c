//! # unisell
//!
//! Leptos front end for a campus marketplace where students with `.edu`
//! addresses buy, sell and review listings.
//!
//! The library is compiled twice: to WASM with `hydrate` for the browser, and
//! natively with `ssr` for the Axum host in `main.rs` that renders the shell
//! and serves the bundle. All REST calls happen in the browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
