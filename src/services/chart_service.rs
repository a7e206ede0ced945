use tracing::debug;

use crate::models::chart::{
    CHART_ELEMENT_ID, CLOSE_PRICE_LABEL, FILL_COLOR, LINE_COLOR, LINE_TENSION, X_AXIS_TITLE,
    Y_AXIS_TITLE,
};
use crate::models::{Axis, ChartConfig, ChartData, ChartOptions, ChartType, Dataset, PageData, Scales};
use crate::page::Document;
use crate::services::chart_library::ChartLibrary;
use crate::utils::ChartError;

/// Result of a render attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    Skipped,
}

/// Build the single-series close price line chart.
/// Inputs are copied as-is; lengths and values are not checked.
pub fn build_close_price_config(dates: &[String], closes: &[f64]) -> ChartConfig {
    ChartConfig {
        kind: ChartType::Line,
        data: ChartData {
            labels: dates.to_vec(),
            datasets: vec![Dataset {
                label: CLOSE_PRICE_LABEL.to_string(),
                data: closes.to_vec(),
                border_color: LINE_COLOR.to_string(),
                background_color: FILL_COLOR.to_string(),
                fill: true,
                tension: LINE_TENSION,
            }],
        },
        options: ChartOptions {
            scales: Scales {
                x: Axis::titled(X_AXIS_TITLE),
                y: Axis::titled(Y_AXIS_TITLE),
            },
        },
    }
}

/// Draws the close price chart once the page has loaded
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    element_id: String,
}

impl ChartRenderer {
    pub fn new(element_id: &str) -> Self {
        ChartRenderer {
            element_id: element_id.to_string(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Render the chart if both dates and closes are present.
    ///
    /// Missing data is a silent no-op. A missing element or a library
    /// failure is returned to the caller untouched.
    pub fn render_if_available(
        &self,
        doc: &mut Document<'_>,
        data: &PageData,
        library: &dyn ChartLibrary,
    ) -> Result<RenderOutcome, ChartError> {
        let Some((dates, closes)) = data.series() else {
            return Ok(RenderOutcome::Skipped);
        };

        let config = build_close_price_config(dates, closes);

        let canvas = doc
            .get_element_by_id(&self.element_id)
            .ok_or_else(|| ChartError::ElementNotFound(self.element_id.clone()))?;

        debug!(
            "Drawing {} close price(s) over {} label(s) into #{} with {}",
            closes.len(),
            dates.len(),
            self.element_id,
            library.name()
        );
        library.construct(canvas.get_context_2d(), &config)?;

        Ok(RenderOutcome::Rendered)
    }

    /// Register the render attempt on the page's content-loaded signal.
    /// Returns false if the page has already loaded.
    pub fn install<'a>(
        self,
        doc: &mut Document<'a>,
        data: &'a PageData,
        library: &'a dyn ChartLibrary,
    ) -> bool {
        doc.on_content_loaded(move |doc| {
            self.render_if_available(doc, data, library).map(|_| ())
        })
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(CHART_ELEMENT_ID)
    }
}
