//! Report Card Routes
//!
//! - GET /api/v1/report-card - Card of a named resort
//! - POST /api/v1/report-card - Card of the resort in a chart hover payload

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::CardParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::views::{card_view, CardView, HoverData};

/// GET /api/v1/report-card?resort=
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CardParams>,
) -> ApiResult<Json<CardView>> {
    let card = card_view(
        state.dataset(),
        params.resort.as_deref(),
        &state.dashboard.config().default_resort,
    )?;
    Ok(Json(card))
}

/// POST /api/v1/report-card
///
/// A payload without a hovered resort yields the default resort's card.
pub async fn hover_card(
    State(state): State<Arc<AppState>>,
    Json(hover): Json<HoverData>,
) -> ApiResult<Json<CardView>> {
    let card = card_view(
        state.dataset(),
        hover.selected_resort(),
        &state.dashboard.config().default_resort,
    )?;
    Ok(Json(card))
}
