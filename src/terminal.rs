//! Terminal page
//!
//! In-memory stand-in for the dashboard's host page. It declares every
//! element of the dashboard's DOM contract, records what the controller
//! writes into it, and renders the result as text.

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;

use crate::dashboard::{
    BarChartSpec, MountError, Page, DASHBOARD_PANELS, STAT_TARGETS, STAT_TOTAL_CAPTURES,
    STAT_TOTAL_LEGENDARIES, STAT_TOTAL_MYTHICALS, STAT_TOTAL_SHINY,
};

const BAR_GLYPH: char = '█';

/// Display name of a summary text target
fn stat_caption(id: &str) -> &str {
    match id {
        STAT_TOTAL_CAPTURES => "Total captures",
        STAT_TOTAL_SHINY => "Total shiny",
        STAT_TOTAL_LEGENDARIES => "Total legendaries",
        STAT_TOTAL_MYTHICALS => "Total mythicals",
        other => other,
    }
}

/// Text rendering of the dashboard page
pub struct TerminalPage {
    bar_width: usize,
    texts: RefCell<HashMap<String, String>>,
    charts: RefCell<Vec<(String, BarChartSpec)>>,
}

impl TerminalPage {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
            texts: RefCell::new(HashMap::new()),
            charts: RefCell::new(Vec::new()),
        }
    }

    /// Text currently held by an element
    pub fn text(&self, id: &str) -> Option<String> {
        self.texts.borrow().get(id).cloned()
    }

    /// Number of charts mounted so far
    pub fn chart_count(&self) -> usize {
        self.charts.borrow().len()
    }

    /// Page contents as JSON: summary texts keyed by element id, then charts in mount order
    pub fn to_json(&self) -> serde_json::Value {
        let charts: Vec<serde_json::Value> = self
            .charts
            .borrow()
            .iter()
            .map(|(canvas, spec)| serde_json::json!({ "canvas": canvas, "chart": spec }))
            .collect();

        serde_json::json!({
            "stats": &*self.texts.borrow(),
            "charts": charts,
        })
    }

    /// Render the page, stamped with the current time
    pub fn render(&self) -> String {
        self.render_at(Utc::now())
    }

    /// Render the page, stamped with `at`
    pub fn render_at(&self, at: DateTime<Utc>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Tropimon Stats ({})", at.format("%Y-%m-%d %H:%M UTC"));
        out.push('\n');

        let texts = self.texts.borrow();
        for id in STAT_TARGETS {
            let value = texts.get(id).map(String::as_str).unwrap_or("-");
            let _ = writeln!(out, "  {:<20} {:>10}", stat_caption(id), value);
        }

        for (_, spec) in self.charts.borrow().iter() {
            out.push('\n');
            out.push_str(&render_bar_chart(spec, self.bar_width));
        }

        out
    }
}

impl Page for TerminalPage {
    fn has_element(&self, id: &str) -> bool {
        STAT_TARGETS.contains(&id) || DASHBOARD_PANELS.iter().any(|p| p.canvas_id == id)
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        if !STAT_TARGETS.contains(&id) {
            return false;
        }
        self.texts.borrow_mut().insert(id.to_string(), text.to_string());
        true
    }

    fn mount_bar_chart(&self, id: &str, spec: &BarChartSpec) -> Result<(), MountError> {
        if !DASHBOARD_PANELS.iter().any(|p| p.canvas_id == id) {
            return Err(MountError::NotACanvas(id.to_string()));
        }
        self.charts.borrow_mut().push((id.to_string(), spec.clone()));
        Ok(())
    }
}

/// Render one chart as horizontal bars
///
/// Bars are scaled so the largest one is `width` glyphs long. Charts with
/// hidden x labels show the rank instead of the label.
pub fn render_bar_chart(spec: &BarChartSpec, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", spec.label);

    if spec.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let labels: Vec<String> = spec
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if spec.show_x_labels {
                label.clone()
            } else {
                format!("#{}", i + 1)
            }
        })
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = spec.max_value();

    for (label, value) in labels.iter().zip(&spec.values) {
        let bar: String = std::iter::repeat(BAR_GLYPH)
            .take(bar_length(*value, max, width))
            .collect();
        let pad = label_width - label.chars().count();
        let _ = writeln!(out, "  {}{} {} {}", label, " ".repeat(pad), bar, value);
    }

    out
}

/// Bar length for `value`, scaled against `max`; non-zero values get at least one glyph
fn bar_length(value: u64, max: u64, width: usize) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    let width = width.max(1);
    let scaled = (value as f64 / max as f64 * width as f64).round() as usize;
    scaled.clamp(1, width)
}
