//! Stats dashboard
//!
//! Fetches the capture summary and the six leaderboards from the stats API
//! and renders them into a page.
//!
//! ## Architecture
//!
//! - **DashboardController**: fetch-and-render orchestration
//! - **JsonSource / Page**: host seams (network, document)
//! - **BarChartSpec**: host-independent chart description
//!
//! ## Flow
//!
//! 1. Host calls `init_dashboard` once its page is ready
//! 2. Pages without the dashboard anchor are left alone
//! 3. Summary counters are written into their text targets
//! 4. Each leaderboard is fetched and mounted on its canvas, one at a time

mod chart;
mod controller;
mod error;
mod host;
mod types;

pub use chart::{BarChartSpec, ChartConfig};
pub use controller::{
    ChartPanel, DashboardController, DashboardReport, PanelOutcome, PanelReport,
    DASHBOARD_ANCHOR, DASHBOARD_PANELS, STAT_TARGETS, STAT_TOTAL_CAPTURES,
    STAT_TOTAL_LEGENDARIES, STAT_TOTAL_MYTHICALS, STAT_TOTAL_SHINY, SUMMARY_PATH,
};
pub use error::{FetchError, MountError};
pub use host::{JsonSource, Page};
pub use types::{
    normalize_species_id, Board, RankedPlayerRow, RankedRow, RankedSpeciesRow, RowKind,
    PayloadError, SpeciesDetail, SummaryStats, UnknownBoard, SPECIES_NAMESPACE,
};
