//! # client
//!
//! Leptos + WASM front end for the Harvest Hub market manager portal.
//!
//! Pages and components read the theme through the `theme` crate's runtime,
//! which `App` provides as context. Browser bindings for that runtime live in
//! `util::dark_mode`; the server renders `app::shell`, whose head carries the
//! pre-paint script so the first frame is already in the right theme.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {err}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
