//! Data Transfer Objects
//!
//! Request parameters and response bodies of the REST endpoints that are not
//! view specifications themselves (those live in [`crate::views`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::Metric;

// ============================================
// MAP DTOs
// ============================================

/// Query parameters of `GET /api/v1/map`
///
/// Missing parameters fall back to the dashboard defaults.
#[derive(Debug, Default, Deserialize)]
pub struct MapParams {
    /// Price ceiling (exclusive)
    #[serde(default)]
    pub price: Option<f64>,
    /// "Yes" or "No"
    #[serde(default)]
    pub night_ski: Option<String>,
    #[serde(default)]
    pub summer_ski: Option<String>,
    #[serde(default)]
    pub snowpark: Option<String>,
}

// ============================================
// OPTION DTOs
// ============================================

/// Query parameters of `GET /api/v1/countries`
#[derive(Debug, Default, Deserialize)]
pub struct CountriesParams {
    #[serde(default)]
    pub continent: Option<String>,
}

/// Continents in first-appearance order
#[derive(Debug, Serialize)]
pub struct ContinentsResponse {
    pub continents: Vec<String>,
}

/// A selectable report metric
#[derive(Debug, Serialize)]
pub struct MetricDto {
    /// Column header, accepted as `metric=` value
    pub column: Metric,
    /// Whether every dataset carries it
    pub required: bool,
}

impl From<Metric> for MetricDto {
    fn from(metric: Metric) -> Self {
        Self {
            column: metric,
            required: metric.is_required(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: Vec<MetricDto>,
}

// ============================================
// REPORT DTOs
// ============================================

/// Query parameters of `GET /api/v1/report`
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub country: Option<String>,
    /// Defaults to the configured default metric
    #[serde(default)]
    pub metric: Option<String>,
}

/// Query parameters of `GET /api/v1/report-card`
#[derive(Debug, Default, Deserialize)]
pub struct CardParams {
    /// Defaults to the configured default resort
    #[serde(default)]
    pub resort: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    pub resorts: usize,
    pub countries: usize,
    /// Source the dataset was loaded from
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub active_sessions: usize,
}
