//! # Tropimon Stats
//!
//! Capture statistics dashboard for the Tropimon game server. Fetches the
//! capture summary and six leaderboards from the stats API and renders them
//! as counters and bar charts.
//!
//! ## Modules
//!
//! - [`dashboard`]: Fetch-and-render orchestration and its host seams
//! - [`client`]: reqwest client for the stats API (feature `cli`)
//! - [`terminal`]: Text rendering of the dashboard page (feature `cli`)
//! - [`config`]: TOML + environment configuration (feature `cli`)
//!
//! The browser build (`tropimon-ui`) depends on this crate with default
//! features off and supplies its own DOM and fetch hosts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tropimon_stats::client::StatsClient;
//! use tropimon_stats::dashboard::DashboardController;
//! use tropimon_stats::terminal::TerminalPage;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = StatsClient::new("http://localhost:8000");
//!     let page = TerminalPage::new(40);
//!
//!     let controller = DashboardController::new(&client, &page)
//!         .with_api_base(client.base_url());
//!     controller.init_dashboard().await;
//!
//!     println!("{}", page.render());
//! }
//! ```

pub mod dashboard;

#[cfg(feature = "cli")]
pub mod client;
#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod terminal;

// Re-export top-level types for convenience
pub use dashboard::{
    Board, DashboardController, DashboardReport, FetchError, JsonSource, MountError, Page,
    PanelOutcome, RankedPlayerRow, RankedSpeciesRow, SpeciesDetail, SummaryStats,
};

#[cfg(feature = "cli")]
pub use client::{Leaderboard, StatsClient};

#[cfg(feature = "cli")]
pub use config::{Config, ConfigError};

#[cfg(feature = "cli")]
pub use terminal::TerminalPage;
