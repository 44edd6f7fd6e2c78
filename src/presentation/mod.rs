//! Read-only presentation of the dataset and forecasts
//!
//! Everything here renders to serialisable values. A selection that matches
//! no rows yields a view carrying a warning `Notice`, never an error.

mod forecast;
mod summary;
mod views;

pub use forecast::{load_forecasts, ForecastRow, ForecastTable, FORECAST_COLUMNS};
pub use summary::{
    average_growth, growth_rates, summarize_dataset, temporal_coverage, CoverageRow,
    DatasetSummary, GrowthPoint, MISSING_BUCKET,
};
pub use views::{
    render_view, DashboardConfig, LineStyle, Metric, Notice, NoticeLevel, Point, Series,
    Threshold, View, ViewModel, ViewRequest,
};
