use std::path::PathBuf;
use std::str::FromStr;

use crate::services::chartjs_page::DEFAULT_SCRIPT_SRC;
use crate::services::{ChartJsPage, ChartLibrary, ImageFormat, PlottersChart};
use crate::utils::ChartError;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 400;
const MAX_DIMENSION: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Html => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "html" | "chartjs" => Ok(OutputFormat::Html),
            other => Err(ChartError::Config(format!(
                "Unknown CHART_FORMAT '{}'. Supported: svg, png, html",
                other
            ))),
        }
    }
}

/// Host settings, read from the environment (after `.env`) and the command line
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Path of the page data JSON, `-` for stdin
    pub page_data: String,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub data_uri: bool,
    pub script_src: String,
}

impl HostConfig {
    pub fn from_env() -> Result<Self, ChartError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dimension = |key: &str, default: u32| -> Result<u32, ChartError> {
            match lookup(key) {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ChartError::Config(format!("{} must be a positive integer, got '{}'", key, v))),
                None => Ok(default),
            }
        };

        Ok(HostConfig {
            page_data: lookup("CHART_PAGE_DATA").unwrap_or_else(|| "-".to_string()),
            output: lookup("CHART_OUTPUT").map(PathBuf::from),
            format: match lookup("CHART_FORMAT") {
                Some(v) => v.parse()?,
                None => OutputFormat::Svg,
            },
            width: dimension("CHART_WIDTH", DEFAULT_WIDTH)?,
            height: dimension("CHART_HEIGHT", DEFAULT_HEIGHT)?,
            data_uri: lookup("CHART_DATA_URI")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            script_src: lookup("CHART_SCRIPT_SRC").unwrap_or_else(|| DEFAULT_SCRIPT_SRC.to_string()),
        })
    }

    /// Positional arguments override the environment: `[PAGE_DATA] [OUTPUT]`
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(input) = args.first() {
            self.page_data = input.clone();
        }
        if let Some(output) = args.get(1) {
            self.output = Some(PathBuf::from(output));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        for (name, value) in [("CHART_WIDTH", self.width), ("CHART_HEIGHT", self.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(ChartError::Config(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_DIMENSION, value
                )));
            }
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("chart.{}", self.format.extension())))
    }

    /// The charting library for the configured output format
    pub fn library(&self) -> Box<dyn ChartLibrary> {
        match self.format {
            OutputFormat::Svg => Box::new(PlottersChart::new(ImageFormat::Svg)),
            OutputFormat::Png => Box::new(PlottersChart::new(ImageFormat::Png)),
            OutputFormat::Html => Box::new(ChartJsPage::new(&self.script_src)),
        }
    }
}
