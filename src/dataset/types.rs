//! Core data types for the resort dataset
//!
//! This module defines the fundamental types used throughout the dataset layer:
//! - `Resort`: A single ski resort row with its derived country ranks
//! - `Metric`: The numeric feature columns a resort can be ranked or plotted by
//! - `Flag`: The two-valued feature columns (night skiing, summer skiing, snowpark)
//! - `CountryRanks`: Per-country rank values computed once at load time

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A two-valued feature flag as stored in the source ("Yes" / "No")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Flag {
    Yes,
    No,
}

impl Flag {
    /// Both flag values, in display order
    pub fn all() -> &'static [Flag] {
        &[Flag::Yes, Flag::No]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Flag::Yes)
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Flag::Yes),
            "no" => Ok(Flag::No),
            other => Err(format!("Invalid flag value: {}. Use Yes or No", other)),
        }
    }
}

/// Numeric feature column of the dataset
///
/// Identifier and coordinate columns (`ID`, `Latitude`, `Longitude`) and the
/// derived rank columns are deliberately not metrics: they cannot be plotted
/// or sorted by in the report view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    #[serde(rename = "Price")]
    Price,
    #[serde(rename = "Highest point")]
    HighestPoint,
    #[serde(rename = "Lowest point")]
    LowestPoint,
    #[serde(rename = "Beginner slopes")]
    BeginnerSlopes,
    #[serde(rename = "Intermediate slopes")]
    IntermediateSlopes,
    #[serde(rename = "Difficult slopes")]
    DifficultSlopes,
    #[serde(rename = "Total slopes")]
    TotalSlopes,
    #[serde(rename = "Longest run")]
    LongestRun,
    #[serde(rename = "Snow cannons")]
    SnowCannons,
    #[serde(rename = "Surface lifts")]
    SurfaceLifts,
    #[serde(rename = "Chair lifts")]
    ChairLifts,
    #[serde(rename = "Gondola lifts")]
    GondolaLifts,
    #[serde(rename = "Total lifts")]
    TotalLifts,
    #[serde(rename = "Lift capacity")]
    LiftCapacity,
}

impl Metric {
    /// All metrics in source column order
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Price,
            Metric::HighestPoint,
            Metric::LowestPoint,
            Metric::BeginnerSlopes,
            Metric::IntermediateSlopes,
            Metric::DifficultSlopes,
            Metric::TotalSlopes,
            Metric::LongestRun,
            Metric::SnowCannons,
            Metric::SurfaceLifts,
            Metric::ChairLifts,
            Metric::GondolaLifts,
            Metric::TotalLifts,
            Metric::LiftCapacity,
        ]
    }

    /// Column header of this metric in the source file
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Price => "Price",
            Metric::HighestPoint => "Highest point",
            Metric::LowestPoint => "Lowest point",
            Metric::BeginnerSlopes => "Beginner slopes",
            Metric::IntermediateSlopes => "Intermediate slopes",
            Metric::DifficultSlopes => "Difficult slopes",
            Metric::TotalSlopes => "Total slopes",
            Metric::LongestRun => "Longest run",
            Metric::SnowCannons => "Snow cannons",
            Metric::SurfaceLifts => "Surface lifts",
            Metric::ChairLifts => "Chair lifts",
            Metric::GondolaLifts => "Gondola lifts",
            Metric::TotalLifts => "Total lifts",
            Metric::LiftCapacity => "Lift capacity",
        }
    }

    /// Metrics every dataset must carry (they feed the map and the rank columns)
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Metric::Price | Metric::HighestPoint | Metric::TotalSlopes | Metric::SnowCannons
        )
    }

    /// Look up a metric by its column header or snake_case form, ignoring case
    pub fn from_column(name: &str) -> Option<Metric> {
        let wanted = name.trim().to_lowercase().replace('_', " ");
        Metric::all()
            .iter()
            .copied()
            .find(|m| m.column().to_lowercase() == wanted)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Rank of a resort within its own country (1 = highest value)
///
/// Tied values share the average of the positions they span, so two resorts
/// tied for second place both hold 2.5.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct CountryRanks {
    /// Rank by `Highest point`
    pub elevation: f64,
    /// Rank by `Price`
    pub price: f64,
    /// Rank by `Total slopes`
    pub slopes: f64,
    /// Rank by `Snow cannons`
    pub cannons: f64,
}

/// A single ski resort row
#[derive(Debug, Clone, Serialize)]
pub struct Resort {
    /// Zero-based position of the row in the source file
    pub row: usize,
    /// Optional `ID` column of the source
    pub id: Option<u32>,
    pub name: String,
    pub country: String,
    pub continent: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub highest_point: f64,
    pub total_slopes: f64,
    pub snow_cannons: f64,
    pub night_skiing: Flag,
    pub summer_skiing: Flag,
    pub snowpark: Flag,
    pub season: Option<String>,
    pub child_friendly: Option<Flag>,
    /// Optional metrics present in the source row
    pub extra: BTreeMap<Metric, f64>,
    /// Derived per-country ranks
    pub ranks: CountryRanks,
}

impl Resort {
    /// Value of a metric for this resort, if the row carries it
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Price => Some(self.price),
            Metric::HighestPoint => Some(self.highest_point),
            Metric::TotalSlopes => Some(self.total_slopes),
            Metric::SnowCannons => Some(self.snow_cannons),
            other => self.extra.get(&other).copied(),
        }
    }
}
