//! Dashboard Page
//!
//! The host page's DOM, seen through the controller's `Page` seam, and the
//! entry point that populates it.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use tropimon_stats::dashboard::{BarChartSpec, DashboardController, DashboardReport, MountError, Page};

use crate::api::{get_api_base, FetchSource};
use crate::components::mount_bar_chart;

/// Live document of the current page
pub struct DocumentPage {
    document: Document,
}

impl DocumentPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl Page for DocumentPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn mount_bar_chart(&self, id: &str, spec: &BarChartSpec) -> Result<(), MountError> {
        let canvas = self
            .document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| MountError::NotACanvas(id.to_string()))?;

        mount_bar_chart(&canvas, spec).map(|_| ())
    }
}

/// Populate the dashboard on the current page
pub async fn run() -> DashboardReport {
    let Some(page) = DocumentPage::current() else {
        tracing::error!("No document available, dashboard not loaded");
        return DashboardReport::NotDashboard;
    };

    DashboardController::new(FetchSource, page)
        .with_api_base(get_api_base())
        .init_dashboard()
        .await
}
