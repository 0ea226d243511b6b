//! Filter Engine
//!
//! Pure selections over the immutable dataset. Every function returns
//! references into the dataset, so callers keep each row's identity
//! (`Resort::row`) and source order.
//!
//! # Pipeline
//!
//! ```text
//! map:     price < ceiling AND night == n AND summer == s AND snowpark == p
//! report:  continent → countries → resorts of country → sort desc by metric
//! ```

use std::cmp::Ordering;

use crate::dataset::{Dataset, Flag, Metric, Resort};
use crate::query::error::{QueryError, QueryResult};

/// Parameters of the map view filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFilter {
    /// Resorts must be strictly cheaper than this
    pub price_ceiling: f64,
    pub night_skiing: Flag,
    pub summer_skiing: Flag,
    pub snowpark: Flag,
}

impl MapFilter {
    pub fn new(
        price_ceiling: f64,
        night_skiing: Flag,
        summer_skiing: Flag,
        snowpark: Flag,
    ) -> Self {
        Self {
            price_ceiling,
            night_skiing,
            summer_skiing,
            snowpark,
        }
    }

    /// Reject ceilings that cannot be compared meaningfully
    pub fn validate(&self) -> QueryResult<()> {
        if self.price_ceiling.is_nan() {
            return Err(QueryError::Validation(
                "price ceiling must be a number".to_string(),
            ));
        }
        Ok(())
    }

    /// Check whether a resort passes this filter
    pub fn matches(&self, resort: &Resort) -> bool {
        resort.price < self.price_ceiling
            && resort.night_skiing == self.night_skiing
            && resort.summer_skiing == self.summer_skiing
            && resort.snowpark == self.snowpark
    }
}

/// Resorts passing the map filter, in source order
///
/// An empty result is a legitimate outcome, not an error.
pub fn filter_map<'a>(dataset: &'a Dataset, filter: &MapFilter) -> Vec<&'a Resort> {
    dataset
        .resorts()
        .iter()
        .filter(|r| filter.matches(r))
        .collect()
}

/// Distinct countries with at least one resort on `continent`
///
/// Each country appears exactly once, in first-appearance order. An unknown
/// continent yields an empty list.
pub fn filter_by_continent<'a>(dataset: &'a Dataset, continent: &str) -> Vec<&'a str> {
    dataset
        .countries_in(continent)
        .iter()
        .map(String::as_str)
        .collect()
}

/// Resolve a metric column name against the metrics this dataset carries
pub fn resolve_metric(dataset: &Dataset, name: &str) -> QueryResult<Metric> {
    Metric::from_column(name)
        .filter(|m| dataset.has_metric(*m))
        .ok_or_else(|| QueryError::InvalidMetric(name.to_string()))
}

/// Resorts of `country`, sorted descending by the metric named `metric`
///
/// The sort is stable: resorts with equal values keep their source order.
/// Resorts lacking an optional metric sort last. An empty country yields an
/// empty list; the metric is still validated.
pub fn filter_by_country<'a>(
    dataset: &'a Dataset,
    country: &str,
    metric: &str,
) -> QueryResult<Vec<&'a Resort>> {
    let metric = resolve_metric(dataset, metric)?;
    Ok(sorted_by_metric(dataset, country, metric))
}

/// Typed variant of [`filter_by_country`] for an already resolved metric
pub fn sorted_by_metric<'a>(
    dataset: &'a Dataset,
    country: &str,
    metric: Metric,
) -> Vec<&'a Resort> {
    if country.is_empty() {
        return Vec::new();
    }

    let mut resorts: Vec<&Resort> = dataset
        .resorts()
        .iter()
        .filter(|r| r.country == country)
        .collect();

    resorts.sort_by(|a, b| descending(a.metric(metric), b.metric(metric)));
    resorts
}

/// Descending order with missing values last
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
