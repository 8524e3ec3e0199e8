//! # wardrobe-client
//!
//! Leptos + WASM frontend for the digital wardrobe application.
//!
//! The interesting part of this crate is how protected views are gated on
//! asynchronous authentication state (`components::auth_gate`) and how
//! feature areas are isolated from each other's rendering faults
//! (`components::fault_boundary`). Everything else is routing and thin page
//! composition around those two pieces.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install panic/console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
