//! Country report view
//!
//! Inputs: selected country and metric.
//! Outputs: a title and a descending bar chart of the country's resorts.

use serde::Serialize;

use crate::dataset::{Dataset, Metric};
use crate::query::{resolve_metric, sorted_by_metric, QueryResult};
use crate::views::ViewUpdate;

pub const EMPTY_REPORT_MESSAGE: &str = "No resorts found for the selected country.";

/// Inputs of the report node
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInputs {
    pub country: Option<String>,
    pub metric: String,
}

impl ReportInputs {
    pub fn new(country: Option<&str>, metric: impl Into<String>) -> Self {
        Self {
            country: country.map(str::to_string),
            metric: metric.into(),
        }
    }

    /// Selected country, treating an empty string as no selection
    fn selected_country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.is_empty())
    }
}

/// A single bar of the report chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Resort name on the category axis
    pub category: String,
    pub value: Option<f64>,
    /// Payload echoed back in hover events: `[resort name]`
    pub customdata: Vec<String>,
}

/// Declarative bar chart specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub metric: Metric,
    pub bars: Vec<Bar>,
    pub show_tick_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Outputs of the report node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub title: String,
    pub chart: BarChart,
}

pub fn report_title(country: &str, metric: Metric) -> String {
    format!("Top Resorts in {} by {}", country, metric.column())
}

/// Compute the report view
///
/// With no country selected the node has nothing to show and reports
/// [`ViewUpdate::Unchanged`]; the metric is only checked once a country is set.
pub fn report_view(
    dataset: &Dataset,
    inputs: &ReportInputs,
) -> QueryResult<ViewUpdate<ReportView>> {
    let Some(country) = inputs.selected_country() else {
        return Ok(ViewUpdate::Unchanged);
    };

    let metric = resolve_metric(dataset, &inputs.metric)?;

    let bars: Vec<Bar> = sorted_by_metric(dataset, country, metric)
        .into_iter()
        .map(|r| Bar {
            category: r.name.clone(),
            value: r.metric(metric),
            customdata: vec![r.name.clone()],
        })
        .collect();

    let empty_message = bars.is_empty().then(|| EMPTY_REPORT_MESSAGE.to_string());

    Ok(ViewUpdate::Changed(ReportView {
        title: report_title(country, metric),
        chart: BarChart {
            metric,
            bars,
            show_tick_labels: false,
            empty_message,
        },
    }))
}
