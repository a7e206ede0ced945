use crate::models::ChartConfig;
use crate::page::RenderingContext2d;
use crate::utils::ChartError;

/// An external charting library.
///
/// `construct` draws the configured chart into the context as a side effect.
/// The caller does not keep a handle to the resulting chart.
pub trait ChartLibrary {
    fn name(&self) -> &str;

    fn construct(&self, ctx: &mut RenderingContext2d, config: &ChartConfig) -> Result<(), ChartError>;
}
