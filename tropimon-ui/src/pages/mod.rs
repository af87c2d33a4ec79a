//! Pages
//!
//! Host pages the dashboard knows how to populate.

pub mod dashboard;

pub use dashboard::DocumentPage;
