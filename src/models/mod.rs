//! Data models shared by the page host and the chart services

pub mod chart;
pub mod page_data;

pub use chart::{Axis, ChartConfig, ChartData, ChartOptions, ChartType, Dataset, Scales};
pub use page_data::PageData;
