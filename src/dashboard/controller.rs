//! Dashboard Controller
//!
//! Fetch-and-render orchestration. `init_dashboard` is the single entry
//! point; the host calls it once when its page is ready.
//!
//! Every unit of work (the summary block, each chart) fails on its own:
//! a missing element or a failed request leaves that widget empty and the
//! sequence moves on.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::chart::BarChartSpec;
use super::host::{JsonSource, Page};
use super::types::{Board, RankedPlayerRow, RankedRow, RankedSpeciesRow, RowKind, SummaryStats};

/// Summary endpoint
pub const SUMMARY_PATH: &str = "/api/summary";

/// Element whose presence marks a page as the dashboard
pub const DASHBOARD_ANCHOR: &str = STAT_TOTAL_CAPTURES;

pub const STAT_TOTAL_CAPTURES: &str = "stat-total-captures";
pub const STAT_TOTAL_SHINY: &str = "stat-total-shiny";
pub const STAT_TOTAL_LEGENDARIES: &str = "stat-total-legendaries";
pub const STAT_TOTAL_MYTHICALS: &str = "stat-total-mythicals";

/// Text targets, in display order
pub const STAT_TARGETS: [&str; 4] = [
    STAT_TOTAL_CAPTURES,
    STAT_TOTAL_SHINY,
    STAT_TOTAL_LEGENDARIES,
    STAT_TOTAL_MYTHICALS,
];

/// One chart on the dashboard: a canvas bound to a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPanel {
    pub canvas_id: &'static str,
    pub board: Board,
}

/// Chart panels in the order they are built
pub const DASHBOARD_PANELS: [ChartPanel; 6] = [
    ChartPanel {
        canvas_id: "chart-top-captures",
        board: Board::Captures,
    },
    ChartPanel {
        canvas_id: "chart-top-shiny",
        board: Board::Shiny,
    },
    ChartPanel {
        canvas_id: "chart-top-legendaries",
        board: Board::Legendaries,
    },
    ChartPanel {
        canvas_id: "chart-top-mythicals",
        board: Board::Mythicals,
    },
    ChartPanel {
        canvas_id: "chart-top-species",
        board: Board::Species,
    },
    ChartPanel {
        canvas_id: "chart-top-shiny-species",
        board: Board::ShinySpecies,
    },
];

/// What happened to one unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Rendered,
    /// Target element absent; nothing was requested
    MissingTarget,
    FetchFailed,
    InvalidPayload,
    MountFailed,
}

/// Outcome of one chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelReport {
    pub canvas_id: &'static str,
    pub outcome: PanelOutcome,
}

/// Result of a full dashboard run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardReport {
    /// Page has no dashboard anchor; nothing was requested
    NotDashboard,
    Loaded {
        summary: PanelOutcome,
        panels: Vec<PanelReport>,
    },
}

impl DashboardReport {
    /// Number of charts that made it onto the page
    pub fn charts_rendered(&self) -> usize {
        match self {
            DashboardReport::NotDashboard => 0,
            DashboardReport::Loaded { panels, .. } => panels
                .iter()
                .filter(|p| p.outcome == PanelOutcome::Rendered)
                .count(),
        }
    }
}

/// Drives one dashboard page
pub struct DashboardController<S, P> {
    source: S,
    page: P,
    api_base: String,
}

impl<S: JsonSource, P: Page> DashboardController<S, P> {
    /// Create a controller that requests same-origin paths
    pub fn new(source: S, page: P) -> Self {
        Self {
            source,
            page,
            api_base: String::new(),
        }
    }

    /// Prefix every endpoint path with this base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Full URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// GET a JSON resource, logging and swallowing any failure
    pub async fn fetch_json(&self, url: &str) -> Option<Value> {
        match self.source.get_json(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(url = %url, status = ?e.status(), error = %e, "API request failed");
                None
            }
        }
    }

    /// Fill the four summary counters
    pub async fn load_summary(&self) -> PanelOutcome {
        let url = self.url_for(SUMMARY_PATH);
        let Some(value) = self.fetch_json(&url).await else {
            return PanelOutcome::FetchFailed;
        };

        let stats: SummaryStats = match serde_json::from_value(value) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Unexpected summary payload");
                return PanelOutcome::InvalidPayload;
            }
        };

        let fields = [
            (STAT_TOTAL_CAPTURES, stats.total_captures),
            (STAT_TOTAL_SHINY, stats.total_shiny),
            (STAT_TOTAL_LEGENDARIES, stats.total_legendaries),
            (STAT_TOTAL_MYTHICALS, stats.total_mythicals),
        ];

        for (id, count) in fields {
            if !self.page.set_text(id, &count.to_string()) {
                tracing::debug!(element = id, "Summary target missing, skipped");
            }
        }

        PanelOutcome::Rendered
    }

    /// Fetch ranked rows from `url` and mount them as a bar chart on `target_id`
    ///
    /// The row type decides the bar labels and whether x-axis ticks are
    /// shown. The target is checked before any request goes out.
    pub async fn build_chart<R>(&self, target_id: &str, url: &str, label: &str) -> PanelOutcome
    where
        R: RankedRow + DeserializeOwned,
    {
        if !self.page.has_element(target_id) {
            tracing::debug!(canvas = target_id, "Chart target missing, skipped");
            return PanelOutcome::MissingTarget;
        }

        let Some(value) = self.fetch_json(url).await else {
            return PanelOutcome::FetchFailed;
        };

        let rows: Vec<R> = match serde_json::from_value(value) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(url = %url, canvas = target_id, error = %e, "Unexpected leaderboard payload");
                return PanelOutcome::InvalidPayload;
            }
        };

        let spec = BarChartSpec::from_rows(label, &rows);

        match self.page.mount_bar_chart(target_id, &spec) {
            Ok(()) => {
                tracing::debug!(canvas = target_id, bars = spec.values.len(), "Chart mounted");
                PanelOutcome::Rendered
            }
            Err(e) => {
                tracing::error!(canvas = target_id, error = %e, "Failed to mount chart");
                PanelOutcome::MountFailed
            }
        }
    }

    /// Player leaderboard chart, x-axis labels shown
    pub async fn build_player_chart(&self, target_id: &str, url: &str, label: &str) -> PanelOutcome {
        self.build_chart::<RankedPlayerRow>(target_id, url, label).await
    }

    /// Species leaderboard chart, x-axis labels hidden
    pub async fn build_species_chart(&self, target_id: &str, url: &str, label: &str) -> PanelOutcome {
        self.build_chart::<RankedSpeciesRow>(target_id, url, label).await
    }

    /// Build one dashboard panel
    pub async fn build_panel(&self, panel: &ChartPanel) -> PanelOutcome {
        let url = self.url_for(panel.board.path());
        let label = panel.board.title();

        match panel.board.row_kind() {
            RowKind::Player => self.build_player_chart(panel.canvas_id, &url, label).await,
            RowKind::Species => self.build_species_chart(panel.canvas_id, &url, label).await,
        }
    }

    /// Populate the dashboard
    ///
    /// Does nothing on pages without the dashboard anchor. Otherwise loads
    /// the summary, then builds each chart panel one after the other.
    pub async fn init_dashboard(&self) -> DashboardReport {
        if !self.page.has_element(DASHBOARD_ANCHOR) {
            tracing::debug!("Not a dashboard page");
            return DashboardReport::NotDashboard;
        }

        let summary = self.load_summary().await;

        let mut panels = Vec::with_capacity(DASHBOARD_PANELS.len());
        for panel in &DASHBOARD_PANELS {
            let outcome = self.build_panel(panel).await;
            panels.push(PanelReport {
                canvas_id: panel.canvas_id,
                outcome,
            });
        }

        let report = DashboardReport::Loaded { summary, panels };
        tracing::info!(
            summary = ?summary,
            charts = report.charts_rendered(),
            "Dashboard loaded"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::error::{FetchError, MountError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    /// Canned responses keyed by URL; anything unknown is a 404
    #[derive(Default)]
    struct FakeSource {
        responses: HashMap<String, Value>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn with(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), body);
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl JsonSource for FakeSource {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[derive(Default)]
    struct FakePage {
        elements: HashSet<String>,
        texts: RefCell<HashMap<String, String>>,
        charts: RefCell<Vec<(String, BarChartSpec)>>,
        reject_charts: bool,
    }

    impl FakePage {
        fn with_elements(ids: &[&str]) -> Self {
            Self {
                elements: ids.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }

        fn full_dashboard() -> Self {
            let mut ids: Vec<&str> = STAT_TARGETS.to_vec();
            ids.extend(DASHBOARD_PANELS.iter().map(|p| p.canvas_id));
            Self::with_elements(&ids)
        }

        fn text(&self, id: &str) -> Option<String> {
            self.texts.borrow().get(id).cloned()
        }
    }

    impl Page for FakePage {
        fn has_element(&self, id: &str) -> bool {
            self.elements.contains(id)
        }

        fn set_text(&self, id: &str, text: &str) -> bool {
            if !self.has_element(id) {
                return false;
            }
            self.texts.borrow_mut().insert(id.to_string(), text.to_string());
            true
        }

        fn mount_bar_chart(&self, id: &str, spec: &BarChartSpec) -> Result<(), MountError> {
            if self.reject_charts {
                return Err(MountError::Backend("Chart is not defined".to_string()));
            }
            self.charts.borrow_mut().push((id.to_string(), spec.clone()));
            Ok(())
        }
    }

    fn all_endpoints_source() -> FakeSource {
        let mut source = FakeSource::default().with(
            SUMMARY_PATH,
            json!({
                "total_captures": 120,
                "total_shiny": 7,
                "total_legendaries": 3,
                "total_mythicals": 1
            }),
        );
        for board in Board::ALL {
            let body = match board.row_kind() {
                RowKind::Player => json!([{"player": "Player #A1B2", "count": 4}]),
                RowKind::Species => json!([{"species": "cobblemon:geodude", "count": 9}]),
            };
            source = source.with(board.path(), body);
        }
        source
    }

    #[tokio::test]
    async fn test_fetch_json_not_found_returns_none() {
        let source = FakeSource::default();
        let page = FakePage::default();
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.fetch_json("/api/nope").await, None);
        assert_eq!(source.requests(), vec!["/api/nope"]);
    }

    #[tokio::test]
    async fn test_load_summary_writes_all_fields() {
        let source = all_endpoints_source();
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.load_summary().await, PanelOutcome::Rendered);
        assert_eq!(page.text(STAT_TOTAL_CAPTURES).as_deref(), Some("120"));
        assert_eq!(page.text(STAT_TOTAL_SHINY).as_deref(), Some("7"));
        assert_eq!(page.text(STAT_TOTAL_LEGENDARIES).as_deref(), Some("3"));
        assert_eq!(page.text(STAT_TOTAL_MYTHICALS).as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_load_summary_missing_keys_render_zero() {
        let source = FakeSource::default().with(SUMMARY_PATH, json!({"total_shiny": 42}));
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        controller.load_summary().await;

        assert_eq!(page.text(STAT_TOTAL_CAPTURES).as_deref(), Some("0"));
        assert_eq!(page.text(STAT_TOTAL_SHINY).as_deref(), Some("42"));
        assert_eq!(page.text(STAT_TOTAL_LEGENDARIES).as_deref(), Some("0"));
        assert_eq!(page.text(STAT_TOTAL_MYTHICALS).as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_load_summary_skips_missing_elements() {
        let source = all_endpoints_source();
        let page = FakePage::with_elements(&[STAT_TOTAL_CAPTURES, STAT_TOTAL_MYTHICALS]);
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.load_summary().await, PanelOutcome::Rendered);
        assert_eq!(page.texts.borrow().len(), 2);
        assert_eq!(page.text(STAT_TOTAL_MYTHICALS).as_deref(), Some("1"));
        assert_eq!(page.text(STAT_TOTAL_SHINY), None);
    }

    #[tokio::test]
    async fn test_load_summary_fetch_failure_leaves_page_untouched() {
        let source = FakeSource::default();
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.load_summary().await, PanelOutcome::FetchFailed);
        assert!(page.texts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_load_summary_invalid_payload() {
        let source = FakeSource::default().with(SUMMARY_PATH, json!(["not", "a", "summary"]));
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.load_summary().await, PanelOutcome::InvalidPayload);
        assert!(page.texts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_load_summary_positional_array_is_invalid() {
        let source = FakeSource::default().with(SUMMARY_PATH, json!([7, 8, 9, 10]));
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.load_summary().await, PanelOutcome::InvalidPayload);
        assert_eq!(page.text(STAT_TOTAL_CAPTURES), None);
        assert!(page.texts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_chart_without_canvas_makes_no_request() {
        let source = all_endpoints_source();
        let page = FakePage::with_elements(&[STAT_TOTAL_CAPTURES]);
        let controller = DashboardController::new(&source, &page);

        let outcome = controller
            .build_player_chart("chart-top-captures", "/api/top/captures", "Top Captures")
            .await;

        assert_eq!(outcome, PanelOutcome::MissingTarget);
        assert!(source.requests().is_empty());
        assert!(page.charts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_player_chart_projection() {
        let source = FakeSource::default().with(
            "/api/top/captures",
            json!([{"player": "P1", "count": 5}, {"player": "P2", "count": 2}]),
        );
        let page = FakePage::with_elements(&["chart-top-captures"]);
        let controller = DashboardController::new(&source, &page);

        let outcome = controller
            .build_player_chart("chart-top-captures", "/api/top/captures", "Top Captures")
            .await;

        assert_eq!(outcome, PanelOutcome::Rendered);
        let charts = page.charts.borrow();
        let (canvas, spec) = &charts[0];
        assert_eq!(canvas, "chart-top-captures");
        assert_eq!(spec.label, "Top Captures");
        assert_eq!(spec.labels, vec!["P1", "P2"]);
        assert_eq!(spec.values, vec![5, 2]);
        assert!(spec.show_x_labels);
    }

    #[tokio::test]
    async fn test_species_chart_hides_x_labels() {
        let source = FakeSource::default().with(
            "/api/top/species",
            json!([{"species": "mod:bulbasaur", "count": 10}]),
        );
        let page = FakePage::with_elements(&["chart-top-species"]);
        let controller = DashboardController::new(&source, &page);

        controller
            .build_species_chart("chart-top-species", "/api/top/species", "Top Species")
            .await;

        let charts = page.charts.borrow();
        let spec = &charts[0].1;
        assert_eq!(spec.labels, vec!["mod:bulbasaur"]);
        assert!(!spec.show_x_labels);
    }

    #[tokio::test]
    async fn test_chart_wrong_row_shape_is_invalid() {
        let source = FakeSource::default().with(
            "/api/top/species",
            json!([{"player": "Player #0001", "count": 1}]),
        );
        let page = FakePage::with_elements(&["chart-top-species"]);
        let controller = DashboardController::new(&source, &page);

        let outcome = controller
            .build_species_chart("chart-top-species", "/api/top/species", "Top Species")
            .await;

        assert_eq!(outcome, PanelOutcome::InvalidPayload);
        assert!(page.charts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_chart_positional_rows_are_invalid() {
        let source = FakeSource::default().with("/api/top/captures", json!([["P1", 5]]));
        let page = FakePage::with_elements(&["chart-top-captures"]);
        let controller = DashboardController::new(&source, &page);

        let outcome = controller
            .build_player_chart("chart-top-captures", "/api/top/captures", "Top Captures")
            .await;

        assert_eq!(outcome, PanelOutcome::InvalidPayload);
        assert!(page.charts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_chart_mount_failure_is_reported() {
        let source = all_endpoints_source();
        let page = FakePage {
            reject_charts: true,
            ..FakePage::full_dashboard()
        };
        let controller = DashboardController::new(&source, &page);

        let outcome = controller.build_panel(&DASHBOARD_PANELS[0]).await;
        assert_eq!(outcome, PanelOutcome::MountFailed);
    }

    #[tokio::test]
    async fn test_same_canvas_twice_mounts_twice() {
        let source = all_endpoints_source();
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        controller.build_panel(&DASHBOARD_PANELS[1]).await;
        controller.build_panel(&DASHBOARD_PANELS[1]).await;

        assert_eq!(page.charts.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_non_dashboard_page_makes_no_requests() {
        let source = all_endpoints_source();
        let page = FakePage::with_elements(&["chart-top-captures", "chart-top-species"]);
        let controller = DashboardController::new(&source, &page);

        assert_eq!(controller.init_dashboard().await, DashboardReport::NotDashboard);
        assert!(source.requests().is_empty());
        assert!(page.charts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_init_dashboard_requests_in_declaration_order() {
        let source = all_endpoints_source();
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        let report = controller.init_dashboard().await;

        assert_eq!(
            source.requests(),
            vec![
                "/api/summary",
                "/api/top/captures",
                "/api/top/shiny",
                "/api/top/legendaries",
                "/api/top/mythicals",
                "/api/top/species",
                "/api/top/shiny-species",
            ]
        );
        assert_eq!(report.charts_rendered(), 6);

        let charts = page.charts.borrow();
        let titles: Vec<&str> = charts.iter().map(|(_, spec)| spec.label.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Top Captures",
                "Top Shiny",
                "Top Légendaires",
                "Top Mythiques",
                "Top Species",
                "Top Shiny Species",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_panel_does_not_stop_the_rest() {
        let mut source = all_endpoints_source();
        source.responses.remove(SUMMARY_PATH);
        source.responses.remove("/api/top/shiny");
        let page = FakePage::full_dashboard();
        let controller = DashboardController::new(&source, &page);

        let report = controller.init_dashboard().await;

        let DashboardReport::Loaded { summary, panels } = report else {
            panic!("expected a loaded dashboard");
        };
        assert_eq!(summary, PanelOutcome::FetchFailed);
        assert_eq!(panels[1].canvas_id, "chart-top-shiny");
        assert_eq!(panels[1].outcome, PanelOutcome::FetchFailed);
        assert_eq!(
            panels.iter().filter(|p| p.outcome == PanelOutcome::Rendered).count(),
            5
        );
        assert_eq!(source.requests().len(), 7);
    }

    #[tokio::test]
    async fn test_api_base_prefixes_every_request() {
        let source = FakeSource::default();
        let page = FakePage::full_dashboard();
        let controller =
            DashboardController::new(&source, &page).with_api_base("http://stats.local:8000/");

        assert_eq!(controller.api_base(), "http://stats.local:8000");
        controller.init_dashboard().await;

        let requests = source.requests();
        assert_eq!(requests.len(), 7);
        assert_eq!(requests[0], "http://stats.local:8000/api/summary");
        assert!(requests.iter().all(|u| u.starts_with("http://stats.local:8000/api/")));
    }
}
