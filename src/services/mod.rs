pub mod chart_library;
pub mod chart_service;
pub mod chartjs_page;
pub mod plotters_chart;
pub mod quote_service;

pub use chart_library::ChartLibrary;
pub use chart_service::ChartRenderer;
pub use chartjs_page::ChartJsPage;
pub use plotters_chart::{ImageFormat, PlottersChart};
pub use quote_service::load_page_data;
