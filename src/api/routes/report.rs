//! Report Routes
//!
//! - GET /api/v1/report - Country bar chart sorted by a metric

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ReportParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::views::{report_view, ReportInputs, ViewUpdate};

/// GET /api/v1/report?country=&metric=
///
/// Responds `204 No Content` when no country is selected, telling the client
/// to keep its current chart.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> ApiResult<Response> {
    let metric = params
        .metric
        .unwrap_or_else(|| state.dashboard.config().default_metric.clone());
    let inputs = ReportInputs::new(params.country.as_deref(), metric);

    match report_view(state.dataset(), &inputs)? {
        ViewUpdate::Changed(view) => Ok(Json(view).into_response()),
        ViewUpdate::Unchanged => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
