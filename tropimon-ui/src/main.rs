//! Tropimon Stats Dashboard
//!
//! WASM entry point. Everything happens in [`tropimon_ui::start`].

fn main() {
    tropimon_ui::start();
}
