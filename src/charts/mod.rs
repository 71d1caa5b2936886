//! Charts module - Chart data preparation and PNG rendering

mod eda;
mod plotter;
mod renderer;

pub use eda::{render_all, EdaReport};
pub use plotter::{ChartPlotter, EntitySeries, HistogramBin, TimeSeriesPlan};
pub use renderer::{RenderError, StaticChartRenderer};
