//! Report card view
//!
//! Input: the resort selected by hovering a report bar.
//! Outputs: the resort name and its four per-country rank strings.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::query::{report_card, QueryResult};

/// Chart hover payload: `{"points":[{"customdata":["Hemsedal"]}]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverData {
    #[serde(default)]
    pub points: Vec<HoverPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    #[serde(default)]
    pub customdata: Vec<String>,
}

impl HoverData {
    /// Hover payload pointing at a single resort
    pub fn for_resort(name: impl Into<String>) -> Self {
        Self {
            points: vec![HoverPoint {
                customdata: vec![name.into()],
            }],
        }
    }

    /// Resort name carried by the first hovered point, if any
    pub fn selected_resort(&self) -> Option<&str> {
        self.points
            .first()
            .and_then(|p| p.customdata.first())
            .map(String::as_str)
    }
}

/// Outputs of the report card node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub resort: String,
    pub elevation: String,
    pub price: String,
    pub slopes: String,
    pub cannons: String,
}

/// Compute the report card, falling back to `default_resort` without a selection
pub fn card_view(
    dataset: &Dataset,
    selected: Option<&str>,
    default_resort: &str,
) -> QueryResult<CardView> {
    let name = selected.unwrap_or(default_resort);
    let card = report_card(dataset, name)?;

    Ok(CardView {
        resort: card.name,
        elevation: format!("Elevation Rank: {}", card.elevation_rank),
        price: format!("Price Rank: {}", card.price_rank),
        slopes: format!("Slope Rank: {}", card.slope_rank),
        cannons: format!("Cannon Rank: {}", card.cannon_rank),
    })
}
