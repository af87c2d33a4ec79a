//! Console Logging
//!
//! A `tracing` layer that writes events to the browser console, so the
//! shared dashboard code logs the same way in both hosts.

use std::fmt::{self, Write};
use std::str::FromStr;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::JsValue;

/// Local storage key holding a log level override (e.g. "debug")
pub const LOG_LEVEL_KEY: &str = "tropimon_log_level";

/// Forwards events at or above `max_level` to `console.*`
pub struct ConsoleLayer {
    max_level: Level,
}

impl ConsoleLayer {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        // Levels grow with verbosity: TRACE > DEBUG > ... > ERROR.
        if *meta.level() > self.max_level {
            return;
        }

        let mut visitor = ConsoleVisitor::default();
        event.record(&mut visitor);
        let line = JsValue::from(format!(
            "[{}] {}{}",
            meta.target(),
            visitor.message,
            visitor.fields
        ));

        match *meta.level() {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::log_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

#[derive(Default)]
struct ConsoleVisitor {
    message: String,
    fields: String,
}

impl Visit for ConsoleVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Configured log level: local storage override, else INFO
fn log_level() -> Level {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(LOG_LEVEL_KEY).ok().flatten())
        .and_then(|level| Level::from_str(&level).ok())
        .unwrap_or(Level::INFO)
}

/// Install the console layer as the global subscriber
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::new(log_level()))
        .try_init();
}
