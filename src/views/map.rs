//! Map view
//!
//! Inputs: price ceiling and the three feature flags.
//! Outputs: a title and a density-map figure of the matching resorts.

use serde::Serialize;

use crate::config::MapLayout;
use crate::dataset::Dataset;
use crate::query::{filter_map, MapFilter, QueryResult};

pub const EMPTY_MAP_MESSAGE: &str = "No resorts match the selected filters.";

/// One weighted point of the density map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Density weight (total slopes)
    pub weight: f64,
    /// Hover label (resort name)
    pub label: String,
    /// Source row of the resort
    pub row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Declarative density map specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub kind: &'static str,
    pub points: Vec<MapPoint>,
    pub center: GeoPoint,
    pub zoom: f64,
    pub style: String,
    pub color_scale: String,
    pub height: u32,
    /// Set when no resort matches, so the renderer shows an explicit empty state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Outputs of the map node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub title: String,
    pub figure: MapFigure,
}

impl MapView {
    pub fn is_empty(&self) -> bool {
        self.figure.points.is_empty()
    }
}

/// Title of the map tab for a price ceiling
pub fn map_title(price_ceiling: f64) -> String {
    format!("Resorts with a ticket price less than ${}.", price_ceiling)
}

/// Compute the map view for the given filter
pub fn map_view(dataset: &Dataset, filter: &MapFilter, layout: &MapLayout) -> QueryResult<MapView> {
    filter.validate()?;

    let points: Vec<MapPoint> = filter_map(dataset, filter)
        .into_iter()
        .map(|r| MapPoint {
            lat: r.latitude,
            lon: r.longitude,
            weight: r.total_slopes,
            label: r.name.clone(),
            row: r.row,
        })
        .collect();

    let empty_message = points.is_empty().then(|| EMPTY_MAP_MESSAGE.to_string());

    Ok(MapView {
        title: map_title(filter.price_ceiling),
        figure: MapFigure {
            kind: "density_map",
            points,
            center: GeoPoint {
                lat: layout.center_lat,
                lon: layout.center_lon,
            },
            zoom: layout.zoom,
            style: layout.style.clone(),
            color_scale: layout.color_scale.clone(),
            height: layout.height,
            empty_message,
        },
    })
}
