//! Map Routes
//!
//! - GET /api/v1/map - Density map of resorts under a price ceiling

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::MapParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::Flag;
use crate::query::MapFilter;
use crate::views::{map_view, MapView};

/// GET /api/v1/map?price=&night_ski=&summer_ski=&snowpark=
pub async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapParams>,
) -> ApiResult<Json<MapView>> {
    let defaults = state.dashboard.config();

    let filter = MapFilter::new(
        params.price.unwrap_or(defaults.price.default),
        parse_flag("night_ski", params.night_ski.as_deref(), defaults.default_night_skiing)?,
        parse_flag("summer_ski", params.summer_ski.as_deref(), defaults.default_summer_skiing)?,
        parse_flag("snowpark", params.snowpark.as_deref(), defaults.default_snowpark)?,
    );

    let view = map_view(state.dataset(), &filter, &defaults.map)?;

    tracing::debug!(
        price = filter.price_ceiling,
        points = view.figure.points.len(),
        "Map computed"
    );

    Ok(Json(view))
}

fn parse_flag(param: &str, value: Option<&str>, default: Flag) -> ApiResult<Flag> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| ApiError::Validation(format!("{}: {}", param, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("snowpark", None, Flag::No).unwrap(), Flag::No);
        assert_eq!(parse_flag("snowpark", Some("yes"), Flag::No).unwrap(), Flag::Yes);
        assert!(parse_flag("snowpark", Some("maybe"), Flag::No).is_err());
    }
}
