//! Values the host page provides to the chart renderer

use serde::{Deserialize, Serialize};

/// Date labels and close prices for the quoted symbol.
///
/// Either may be absent, in which case nothing is drawn. An empty sequence
/// still counts as present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    #[serde(default)]
    pub chart_dates: Option<Vec<String>>,
    #[serde(default)]
    pub chart_closes: Option<Vec<f64>>,
}

impl PageData {
    pub fn new(chart_dates: Option<Vec<String>>, chart_closes: Option<Vec<f64>>) -> Self {
        PageData {
            chart_dates,
            chart_closes,
        }
    }

    /// Both sequences, if both are present
    pub fn series(&self) -> Option<(&[String], &[f64])> {
        match (&self.chart_dates, &self.chart_closes) {
            (Some(dates), Some(closes)) => Some((dates.as_slice(), closes.as_slice())),
            _ => None,
        }
    }
}
