pub mod color;
pub mod curve;
pub mod errors;
pub mod format;

pub use color::parse_css_color;
pub use curve::spline_path;
pub use errors::ChartError;
pub use format::usd;
