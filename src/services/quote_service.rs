use std::io::Read;

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::PageData;
use crate::utils::ChartError;

/// Key of the one-minute series in an intraday time-series document
pub const INTRADAY_SERIES_KEY: &str = "Time Series (1min)";
/// Number of most recent intraday points shown on the quote page
pub const CHART_POINTS: usize = 30;

const CLOSE_FIELD: &str = "4. close";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Load the values the quote page hands to the chart.
///
/// Accepts either a quote document carrying `chart_dates`/`chart_closes`, or a
/// raw intraday time-series document.
pub fn load_page_data<R: Read>(reader: R) -> Result<PageData, ChartError> {
    let value: Value = serde_json::from_reader(reader)?;

    if !value.is_object() {
        return Err(ChartError::InvalidInput(
            "page data must be a JSON object".to_string(),
        ));
    }

    if let Some(series) = value.get(INTRADAY_SERIES_KEY) {
        return Ok(page_data_from_intraday(series));
    }

    Ok(serde_json::from_value(value)?)
}

/// Most recent `CHART_POINTS` closes in chronological order.
/// An empty or unreadable series leaves both values absent.
pub fn page_data_from_intraday(series: &Value) -> PageData {
    match intraday_points(series) {
        Ok(points) if !points.is_empty() => {
            let (dates, closes): (Vec<String>, Vec<f64>) = points.into_iter().unzip();
            debug!("Loaded {} intraday point(s)", dates.len());
            PageData::new(Some(dates), Some(closes))
        }
        Ok(_) => PageData::default(),
        Err(e) => {
            warn!("Ignoring intraday series: {}", e);
            PageData::default()
        }
    }
}

fn intraday_points(series: &Value) -> Result<Vec<(String, f64)>, ChartError> {
    let entries = series
        .as_object()
        .ok_or_else(|| ChartError::InvalidInput("time series is not an object".to_string()))?;

    let mut points = Vec::with_capacity(entries.len());
    for (stamp, bar) in entries {
        let at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .map_err(|e| ChartError::InvalidInput(format!("bad timestamp '{}': {}", stamp, e)))?;
        let close = bar
            .get(CLOSE_FIELD)
            .and_then(close_value)
            .ok_or_else(|| ChartError::InvalidInput(format!("missing close at '{}'", stamp)))?;
        points.push((at, stamp.clone(), close));
    }

    // Newest first, keep the window, then back to chronological order
    points.sort_by(|a, b| b.0.cmp(&a.0));
    points.truncate(CHART_POINTS);
    points.reverse();

    Ok(points.into_iter().map(|(_, stamp, close)| (stamp, close)).collect())
}

fn close_value(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intraday(minutes: u32) -> Value {
        let mut series = serde_json::Map::new();
        for m in 0..minutes {
            series.insert(
                format!("2024-01-02 {:02}:{:02}:00", 10 + m / 60, m % 60),
                json!({ "1. open": "1.0", "4. close": format!("{}.5", m) }),
            );
        }
        json!({ "Meta Data": {}, "Time Series (1min)": series })
    }

    #[test]
    fn test_quote_document() {
        let doc = r#"{"symbol":"AAPL","chart_dates":["2024-01-01","2024-01-02"],"chart_closes":[100.5,101.2]}"#;
        let data = load_page_data(doc.as_bytes()).unwrap();
        assert_eq!(data.chart_dates.unwrap(), vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(data.chart_closes.unwrap(), vec![100.5, 101.2]);
    }

    #[test]
    fn test_quote_without_series_is_absent() {
        let data = load_page_data(r#"{"symbol":"AAPL","chart_dates":null}"#.as_bytes()).unwrap();
        assert!(data.series().is_none());
    }

    #[test]
    fn test_intraday_keeps_latest_window_in_order() {
        let doc = intraday(45).to_string();
        let data = load_page_data(doc.as_bytes()).unwrap();
        let (dates, closes) = data.series().unwrap();

        assert_eq!(dates.len(), CHART_POINTS);
        assert_eq!(dates[0], "2024-01-02 10:15:00");
        assert_eq!(dates[CHART_POINTS - 1], "2024-01-02 10:44:00");
        assert_eq!(closes[0], 15.5);
        assert_eq!(closes[CHART_POINTS - 1], 44.5);
    }

    #[test]
    fn test_short_intraday_series() {
        let data = page_data_from_intraday(&intraday(3)["Time Series (1min)"]);
        assert_eq!(data.chart_closes.unwrap(), vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_empty_or_broken_intraday_is_absent() {
        assert!(page_data_from_intraday(&json!({})).series().is_none());
        assert!(page_data_from_intraday(&json!([])).series().is_none());
        assert!(page_data_from_intraday(&json!({
            "2024-01-02 10:00:00": { "4. close": "abc" }
        }))
        .series()
        .is_none());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            load_page_data("[1,2]".as_bytes()),
            Err(ChartError::InvalidInput(_))
        ));
        assert!(matches!(load_page_data("{".as_bytes()), Err(ChartError::Json(_))));
    }
}
