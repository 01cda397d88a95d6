//! # client
//!
//! Leptos + WASM chat front end for the EcoGen demo assistant.
//!
//! This crate contains the chat page, message renderers, conversation state
//! and the socket bridge that folds relay events into that state. The relay
//! server renders it with SSR (`ssr` feature) and the browser hydrates it
//! (`hydrate` feature).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
