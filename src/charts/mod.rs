//! Charts module - Chart catalog and PNG rendering

mod catalog;
mod renderer;

pub use catalog::{standard_charts, ChartSpec};
pub use renderer::{ChartError, StaticChartRenderer};
