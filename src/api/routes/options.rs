//! Option Routes
//!
//! Choices and descriptors for the dashboard controls.
//!
//! - GET /api/v1/continents - Continents in first-appearance order
//! - GET /api/v1/countries - Countries of a continent
//! - GET /api/v1/metrics - Metrics a report can be sorted by
//! - GET /api/v1/controls - Slider range, flag choices and defaults

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ContinentsResponse, CountriesParams, MetricDto, MetricsResponse};
use crate::api::state::AppState;
use crate::views::{controls, country_options, Controls, CountryOptions};

/// GET /api/v1/continents
pub async fn list_continents(State(state): State<Arc<AppState>>) -> Json<ContinentsResponse> {
    Json(ContinentsResponse {
        continents: state.dataset().continents().to_vec(),
    })
}

/// GET /api/v1/countries?continent=
///
/// Without a continent the configured default is used.
pub async fn get_countries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountriesParams>,
) -> Json<CountryOptions> {
    let continent = params
        .continent
        .unwrap_or_else(|| state.dashboard.config().default_continent.clone());

    Json(country_options(state.dataset(), &continent))
}

/// GET /api/v1/metrics
pub async fn list_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: state
            .dataset()
            .metrics()
            .iter()
            .copied()
            .map(MetricDto::from)
            .collect(),
    })
}

/// GET /api/v1/controls
pub async fn get_controls(State(state): State<Arc<AppState>>) -> Json<Controls> {
    Json(controls(state.dataset(), state.dashboard.config()))
}
