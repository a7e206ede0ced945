use tracing::debug;

use crate::models::ChartConfig;
use crate::page::{Frame, RenderingContext2d};
use crate::services::chart_library::ChartLibrary;
use crate::utils::ChartError;

pub const DEFAULT_SCRIPT_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Browser backend: writes a standalone HTML page that loads the charting
/// library and constructs the chart on `DOMContentLoaded`
#[derive(Debug, Clone)]
pub struct ChartJsPage {
    script_src: String,
}

impl ChartJsPage {
    pub fn new(script_src: &str) -> Self {
        ChartJsPage {
            script_src: script_src.to_string(),
        }
    }

    /// The constructor call handing context and configuration to the library
    pub fn constructor_call(element_id: &str, config: &ChartConfig) -> Result<String, ChartError> {
        Ok(format!(
            "new Chart(document.getElementById({}).getContext('2d'), {});",
            script_json(&element_id)?,
            script_json(config)?
        ))
    }

    fn document(&self, ctx: &RenderingContext2d, config: &ChartConfig) -> Result<String, ChartError> {
        let (width, height) = ctx.size();
        let call = Self::constructor_call(ctx.element_id(), config)?;

        Ok(format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <script src=\"{src}\"></script>\n\
             </head>\n\
             <body>\n\
             <canvas id=\"{id}\" width=\"{width}\" height=\"{height}\"></canvas>\n\
             <script>\n\
             window.addEventListener('DOMContentLoaded', function() {{\n    {call}\n}});\n\
             </script>\n\
             </body>\n\
             </html>\n",
            src = html_attr(&self.script_src),
            id = html_attr(ctx.element_id()),
            width = width,
            height = height,
            call = call,
        ))
    }
}

impl Default for ChartJsPage {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT_SRC)
    }
}

impl ChartLibrary for ChartJsPage {
    fn name(&self) -> &str {
        "chartjs-page"
    }

    fn construct(&self, ctx: &mut RenderingContext2d, config: &ChartConfig) -> Result<(), ChartError> {
        let html = self.document(ctx, config)?;
        debug!("Emitted {} byte page for #{}", html.len(), ctx.element_id());
        ctx.present(Frame::Html(html));
        Ok(())
    }
}

/// JSON safe to inline in a `<script>` element
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ChartError> {
    Ok(serde_json::to_string(value)?
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

fn html_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::canvas::Canvas;
    use crate::services::chart_service::build_close_price_config;

    fn sample_config() -> ChartConfig {
        build_close_price_config(
            &["2024-01-01".to_string(), "2024-01-02".to_string()],
            &[100.5, 101.2],
        )
    }

    #[test]
    fn test_constructor_call() {
        let call = ChartJsPage::constructor_call("stockChart", &sample_config()).unwrap();
        assert!(call.starts_with(
            "new Chart(document.getElementById(\"stockChart\").getContext('2d'), {\"type\":\"line\""
        ));
        assert!(call.ends_with("});"));

        let json = call
            .trim_start_matches("new Chart(document.getElementById(\"stockChart\").getContext('2d'), ")
            .trim_end_matches(");");
        let parsed: ChartConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, sample_config());
    }

    #[test]
    fn test_page_contains_canvas_and_listener() {
        let mut canvas = Canvas::new("stockChart", 800, 400);
        let ctx = canvas.get_context_2d();
        ChartJsPage::default().construct(ctx, &sample_config()).unwrap();

        let Some(Frame::Html(html)) = ctx.frame() else {
            panic!("expected an html frame");
        };
        assert!(html.contains("<canvas id=\"stockChart\" width=\"800\" height=\"400\"></canvas>"));
        assert!(html.contains("<script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>"));
        assert!(html.contains("window.addEventListener('DOMContentLoaded'"));
        assert!(html.contains("\"label\":\"Close Price\""));
    }

    #[test]
    fn test_labels_cannot_close_script() {
        let config = build_close_price_config(&["</script><b>".to_string()], &[1.0]);
        let call = ChartJsPage::constructor_call("stockChart", &config).unwrap();
        assert!(!call.contains("</script>"));
        assert!(call.contains("<\\/script>"));
    }
}
