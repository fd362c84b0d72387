//! # homework-portal-ui
//!
//! WASM glue loaded on every server-rendered page of the homework portal.
//! The server renders plain HTML with Bootstrap; this crate wires the
//! client-side behavior on top of that markup.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`net`] | JSON request helper with bearer auth and 401 handling |
//! | [`state`] | Auth context: token store and navigation seams |
//! | [`components`] | Notifications, status badges, previews, form guards |
//! | [`page`] | One-shot page bootstrap that runs the initializers |
//! | [`config`] | Page-level configuration with defaults |
//! | [`util`] | Cancellation and once-only helpers |
//! | [`widgets`] | Bindings to the Bootstrap JS widgets |
//! | [`bindings`] | Functions exposed to page scripts |
//!
//! Browser-only code sits behind the `hydrate` feature; everything else
//! compiles natively so the decision logic can be unit tested.

pub mod bindings;
pub mod components;
pub mod config;
pub mod net;
pub mod page;
pub mod state;
pub mod util;
pub mod widgets;

/// WASM entry point: install logging and bootstrap the page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match config::UiConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (config::UiConfig::default(), Some(err)),
    };
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(config.log_level);
    if let Some(err) = config_error {
        log::warn!("ui config ignored, using defaults: {err}");
    }

    bindings::install_globals();
    page::schedule(config);
}
