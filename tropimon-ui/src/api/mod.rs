//! API Module
//!
//! HTTP client for communicating with the Tropimon stats API.

mod client;

pub use client::*;
