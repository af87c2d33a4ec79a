//! Chart Component
//!
//! Bar charts drawn by Chart.js, which the host page loads as a global.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use tropimon_stats::dashboard::{BarChartSpec, MountError};

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart instance
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<ChartJs, JsValue>;
}

/// Bind a bar chart to `canvas`
///
/// Chart.js keeps its own reference to the instance; the returned handle
/// can be dropped.
pub fn mount_bar_chart(canvas: &HtmlCanvasElement, spec: &BarChartSpec) -> Result<ChartJs, MountError> {
    let config = serde_json::to_string(&spec.to_chart_config())
        .map_err(|e| MountError::Backend(e.to_string()))?;
    let config = js_sys::JSON::parse(&config).map_err(|e| MountError::Backend(describe(&e)))?;

    ChartJs::new(canvas, &config).map_err(|e| MountError::Backend(describe(&e)))
}

/// Best-effort message for a thrown JS value
fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
