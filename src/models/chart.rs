//! Line chart configuration models
//!
//! Field names serialize in the charting library's JSON shape, so a
//! `ChartConfig` can be handed to the browser library verbatim or drawn
//! natively by the plotters backend.

use serde::{Deserialize, Serialize};

/// Id of the canvas element the close price chart is drawn into
pub const CHART_ELEMENT_ID: &str = "stockChart";
pub const CLOSE_PRICE_LABEL: &str = "Close Price";
pub const LINE_COLOR: &str = "#0d6efd";
pub const FILL_COLOR: &str = "rgba(13,110,253,0.1)";
pub const LINE_TENSION: f64 = 0.2;
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price (USD)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
}

/// Complete chart descriptor consumed once by a charting library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A single plotted series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

impl Axis {
    /// Axis with a displayed title
    pub fn titled(text: &str) -> Self {
        Axis {
            title: AxisTitle {
                display: true,
                text: text.to_string(),
            },
        }
    }
}

impl ChartConfig {
    /// The first (and for close price charts, only) dataset
    pub fn primary_dataset(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }
}
