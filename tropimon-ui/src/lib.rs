//! Tropimon Stats Dashboard
//!
//! Browser host for the capture statistics page, compiled to WebAssembly.
//!
//! # Architecture
//!
//! The host page ships the markup: four counters and six canvases, plus
//! Chart.js. This crate supplies the pieces the shared
//! `DashboardController` needs to populate them:
//!
//! - [`api::FetchSource`]: `fetch`-backed JSON source
//! - [`pages::DocumentPage`]: the live DOM
//! - [`components::chart`]: Chart.js binding
//! - [`logging`]: `tracing` to browser console

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod api;
pub mod components;
pub mod logging;
pub mod pages;

/// Start the dashboard once the document is ready
pub fn start() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    logging::init();

    on_page_ready(|| {
        wasm_bindgen_futures::spawn_local(async {
            pages::dashboard::run().await;
        });
    });
}

/// Run `f` exactly once, when the DOM has been parsed
fn on_page_ready(f: impl FnOnce() + 'static) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        tracing::error!("No document available");
        return;
    };

    if document.ready_state() != "loading" {
        f();
        return;
    }

    let callback = Closure::once_into_js(f);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        tracing::error!(error = ?e, "Failed to register DOMContentLoaded listener");
    }
}
