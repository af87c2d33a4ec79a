//! Bar chart description
//!
//! `BarChartSpec` is what the controller hands to a host. Hosts either
//! draw it themselves (terminal) or turn it into a Chart.js configuration
//! object with [`BarChartSpec::to_chart_config`] (browser).

use serde::Serialize;

use super::types::RankedRow;

/// Host-independent description of one bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChartSpec {
    /// Dataset label (chart title)
    pub label: String,
    /// One label per bar, in input order
    pub labels: Vec<String>,
    /// One value per bar, parallel to `labels`
    pub values: Vec<u64>,
    /// Whether x-axis tick labels are drawn
    pub show_x_labels: bool,
}

impl BarChartSpec {
    /// Project ranked rows into parallel label/value sequences
    ///
    /// Row order is kept as-is; the backend already ranks them.
    pub fn from_rows<R: RankedRow>(label: impl Into<String>, rows: &[R]) -> Self {
        let (labels, values) = rows
            .iter()
            .map(|row| (row.label().to_string(), row.count()))
            .unzip();

        Self {
            label: label.into(),
            labels,
            values,
            show_x_labels: R::SHOW_X_LABELS,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest bar, or zero for an empty chart
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Chart.js configuration for this chart
    pub fn to_chart_config(&self) -> ChartConfig {
        ChartConfig {
            kind: "bar",
            data: ChartData {
                labels: self.labels.clone(),
                datasets: vec![ChartDataset {
                    label: self.label.clone(),
                    data: self.values.clone(),
                    hidden: false,
                }],
            },
            options: ChartOptions {
                plugins: ChartPlugins {
                    legend: Toggle { display: false },
                },
                scales: ChartScales {
                    x: Axis {
                        begin_at_zero: None,
                        ticks: Toggle {
                            display: self.show_x_labels,
                        },
                    },
                    y: Axis {
                        begin_at_zero: Some(true),
                        ticks: Toggle { display: true },
                    },
                },
            },
        }
    }
}

// ============ Chart.js configuration ============

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPlugins {
    pub legend: Toggle,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartScales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub ticks: Toggle,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Toggle {
    pub display: bool,
}
