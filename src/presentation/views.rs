//! Dashboard views rendered to serialisable view models

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::observability::{Event, Logger};
use crate::records::{Record, RecordType};

use super::forecast::{ForecastRow, ForecastTable};
use super::summary::{average_growth, date_order};

/// Indicator codes and projection settings used by the views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Indicator code for account ownership
    #[serde(default = "default_access_code")]
    pub access_code: String,
    /// Indicator code for digital payment usage
    #[serde(default = "default_usage_code")]
    pub usage_code: String,
    /// Reference line drawn on the projections view (percent)
    #[serde(default = "default_projection_target")]
    pub projection_target: f64,
    #[serde(default = "default_projection_indicator")]
    pub projection_indicator: String,
    #[serde(default = "default_projection_scenario")]
    pub projection_scenario: String,
}

fn default_access_code() -> String {
    "ACC_OWNERSHIP".to_string()
}

fn default_usage_code() -> String {
    "USG_DIGITAL_PAYMENT".to_string()
}

fn default_projection_target() -> f64 {
    60.0
}

fn default_projection_indicator() -> String {
    "access".to_string()
}

fn default_projection_scenario() -> String {
    "base".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            access_code: default_access_code(),
            usage_code: default_usage_code(),
            projection_target: default_projection_target(),
            projection_indicator: default_projection_indicator(),
            projection_scenario: default_projection_scenario(),
        }
    }
}

/// The navigable dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Overview,
    Trends,
    Forecasts,
    InclusionProjections,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Trends => "trends",
            View::Forecasts => "forecasts",
            View::InclusionProjections => "inclusion-projections",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator selection for one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub view: View,
    /// Trends: indicator code. Forecasts: forecast indicator name.
    pub indicator: Option<String>,
    /// Forecasts only
    pub scenario: Option<String>,
}

impl ViewRequest {
    pub fn new(view: View) -> Self {
        Self {
            view,
            indicator: None,
            scenario: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// User-visible message, used for empty selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// A headline number; `value` is `None` when no data backs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: Option<f64>,
    /// Display text, `N/A` when there is no value
    pub formatted: String,
}

impl Metric {
    fn new(label: &str, value: Option<f64>, precision: usize) -> Self {
        let formatted = match value {
            Some(v) => format!("{:.*}", precision, v),
            None => "N/A".to_string(),
        };
        Self {
            label: label.to_string(),
            value,
            formatted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub style: LineStyle,
    pub points: Vec<Point>,
}

/// Horizontal reference line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub value: f64,
    pub label: String,
}

/// Rendered view, ready to serialise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub view: View,
    pub title: String,
    pub metrics: Vec<Metric>,
    pub series: Vec<Series>,
    pub threshold: Option<Threshold>,
    pub notice: Option<Notice>,
}

impl ViewModel {
    fn new(view: View, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            metrics: Vec::new(),
            series: Vec::new(),
            threshold: None,
            notice: None,
        }
    }

    fn with_notice(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(Notice::warning(message));
        self
    }

    /// True when the view carries a notice instead of (or besides) data
    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }
}

/// Renders one view. `forecasts` is `None` when the forecast file could not
/// be loaded; forecast views then carry a notice.
pub fn render_view(
    request: &ViewRequest,
    dataset: &Dataset,
    forecasts: Option<&ForecastTable>,
    config: &DashboardConfig,
) -> ViewModel {
    let model = match request.view {
        View::Overview => overview(dataset.records(), config),
        View::Trends => {
            let code = request.indicator.as_deref().unwrap_or(&config.access_code);
            trends(dataset.records(), code)
        }
        View::Forecasts => {
            let scenario = request.scenario.as_deref().unwrap_or("base");
            let indicator = request.indicator.as_deref().unwrap_or("access");
            forecast_view(forecasts, scenario, indicator)
        }
        View::InclusionProjections => projections(forecasts, config),
    };

    let event = if model.has_notice() {
        Event::ViewEmpty
    } else {
        Event::ViewRendered
    };
    let series = model.series.len().to_string();
    Logger::info(
        event.as_str(),
        &[("series", series.as_str()), ("view", model.view.as_str())],
    );
    model
}

fn overview(records: &[Record], config: &DashboardConfig) -> ViewModel {
    let mut model = ViewModel::new(View::Overview, "Overview");

    let access_latest = latest_value(records, &config.access_code, false);
    let usage_latest = latest_value(records, &config.usage_code, true);
    let latest_year = records
        .iter()
        .filter_map(|r| r.observation_date)
        .map(|d| d.year())
        .max();

    model.metrics = vec![
        Metric::new("Account Ownership (%)", access_latest, 1),
        Metric::new("Digital Payment Usage (%)", usage_latest, 1),
        Metric::new("Latest Data Year", latest_year.map(f64::from), 0),
        Metric::new(
            "Average Access Growth (pp per period)",
            Some(average_growth(records, &config.access_code)),
            2,
        ),
        Metric::new(
            "Average Usage Growth (pp per period)",
            Some(average_growth(records, &config.usage_code)),
            2,
        ),
    ];

    if access_latest.is_none() {
        model = model.with_notice("No account ownership data available");
    } else if usage_latest.is_none() {
        model = model.with_notice("No digital payment usage data available");
    }
    model
}

/// Most recent value for an indicator code. With `observations_only`, only
/// observation rows with a value are considered.
fn latest_value(records: &[Record], code: &str, observations_only: bool) -> Option<f64> {
    let mut rows: Vec<&Record> = records
        .iter()
        .filter(|r| r.indicator_code.as_deref() == Some(code))
        .filter(|r| {
            !observations_only
                || (r.kind() == Some(RecordType::Observation) && r.value_numeric.is_some())
        })
        .collect();
    rows.sort_by(|a, b| date_order(a.observation_date, b.observation_date));
    rows.last().and_then(|r| r.value_numeric)
}

fn trends(records: &[Record], code: &str) -> ViewModel {
    let model = ViewModel::new(View::Trends, "Indicator Trend Over Time");

    let mut rows: Vec<&Record> = records
        .iter()
        .filter(|r| r.indicator_code.as_deref() == Some(code))
        .collect();
    rows.sort_by(|a, b| date_order(a.observation_date, b.observation_date));

    let points: Vec<Point> = rows
        .iter()
        .filter_map(|r| match (r.observation_date, r.value_numeric) {
            (Some(d), Some(v)) => Some(Point {
                year: d.year(),
                value: v,
            }),
            _ => None,
        })
        .collect();

    if points.is_empty() {
        return model.with_notice(format!("No data available for {}", code));
    }

    let mut model = model;
    model.series.push(Series {
        name: code.to_string(),
        style: LineStyle::Solid,
        points,
    });
    model
}

fn forecast_view(forecasts: Option<&ForecastTable>, scenario: &str, indicator: &str) -> ViewModel {
    let model = ViewModel::new(View::Forecasts, "Forecast with Scenario");
    let Some(table) = forecasts else {
        return model.with_notice("Forecast data unavailable");
    };

    let rows = table.select(scenario, indicator);
    if rows.is_empty() {
        return model.with_notice("No forecast data available for the selected combination");
    }

    let mut model = model;
    model.series.push(Series {
        name: "Forecast".to_string(),
        style: LineStyle::Solid,
        points: rows.iter().map(|r| Point { year: r.year, value: r.forecast }).collect(),
    });
    model.series.extend(band_series("Lower CI", &rows, |r| r.lower_ci));
    model.series.extend(band_series("Upper CI", &rows, |r| r.upper_ci));
    model
}

/// Dashed confidence line; `None` when no row carries the bound
fn band_series(
    name: &str,
    rows: &[&ForecastRow],
    bound: impl Fn(&ForecastRow) -> Option<f64>,
) -> Option<Series> {
    let points: Vec<Point> = rows
        .iter()
        .filter_map(|r| bound(*r).map(|value| Point { year: r.year, value }))
        .collect();
    if points.is_empty() {
        return None;
    }
    Some(Series {
        name: name.to_string(),
        style: LineStyle::Dashed,
        points,
    })
}

fn projections(forecasts: Option<&ForecastTable>, config: &DashboardConfig) -> ViewModel {
    let target = config.projection_target;
    let model = ViewModel::new(
        View::InclusionProjections,
        format!("Progress Toward {}% Financial Inclusion Target", target),
    );
    let Some(table) = forecasts else {
        return model.with_notice("Forecast data unavailable");
    };

    let rows = table.select(&config.projection_scenario, &config.projection_indicator);
    if rows.is_empty() {
        return model.with_notice("No forecast data available");
    }

    let mut model = model;
    model.series.push(Series {
        name: "Forecast".to_string(),
        style: LineStyle::Solid,
        points: rows.iter().map(|r| Point { year: r.year, value: r.forecast }).collect(),
    });
    model.threshold = Some(Threshold {
        value: target,
        label: format!("{}% Target", target),
    });
    model
}
