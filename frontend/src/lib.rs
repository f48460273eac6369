//! Browser entry point of the agency forms.
//!
//! `tracing` events from the `forms` crate reach the console through its
//! `log` feature, so installing `console_log` is enough to see submit traces.

use log::Level;

/// Console verbosity for the current build profile.
#[must_use]
pub const fn console_level() -> Level {
    if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Warn
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    if console_log::init_with_level(console_level()).is_err() {
        leptos::logging::warn!("Console logger already installed");
    }
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(app::component);
}
