//! UI Components
//!
//! Bindings for the widgets the dashboard draws.

pub mod chart;

pub use chart::{mount_bar_chart, ChartJs};
