//! Snow Atlas Views
//!
//! Declarative view specifications computed from the dataset and the current
//! control inputs. Nothing here renders: each node returns plain data
//! (titles, figure specs, option lists) for a frontend to draw.
//!
//! - **graph**: Signals, nodes and their dependencies
//! - **map**: Density map of resorts under a price ceiling
//! - **options**: Continent → country cascade and control descriptors
//! - **report**: Per-country bar chart sorted by a metric
//! - **card**: Report card of the hovered resort
//! - **dashboard**: Per-session dispatcher over the graph

mod card;
mod dashboard;
pub mod graph;
mod map;
mod options;
mod report;

use serde::Serialize;

pub use card::{card_view, CardView, HoverData, HoverPoint};
pub use dashboard::{Dashboard, InputEvent, InputState, NodeOutput, NodeResult, NodeValue};
pub use graph::{dependents, NodeId, Signal, ViewNode, VIEW_GRAPH};
pub use map::{map_title, map_view, GeoPoint, MapFigure, MapPoint, MapView, EMPTY_MAP_MESSAGE};
pub use options::{controls, country_options, Controls, CountryOptions, FlagControl, FlagOption};
pub use report::{
    report_title, report_view, Bar, BarChart, ReportInputs, ReportView, EMPTY_REPORT_MESSAGE,
};

/// Result of a node whose inputs may not warrant new output
///
/// `Unchanged` tells the caller to keep whatever it displayed before.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ViewUpdate<T> {
    Changed(T),
    Unchanged,
}

impl<T> ViewUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, ViewUpdate::Unchanged)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ViewUpdate<U> {
        match self {
            ViewUpdate::Changed(value) => ViewUpdate::Changed(f(value)),
            ViewUpdate::Unchanged => ViewUpdate::Unchanged,
        }
    }

    pub fn changed(self) -> Option<T> {
        match self {
            ViewUpdate::Changed(value) => Some(value),
            ViewUpdate::Unchanged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_update_serialization() {
        let json = serde_json::to_value(ViewUpdate::Changed(3)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "changed", "value": 3}));

        let json = serde_json::to_value(ViewUpdate::<u32>::Unchanged).unwrap();
        assert_eq!(json, serde_json::json!({"status": "unchanged"}));
    }

    #[test]
    fn test_view_update_map() {
        assert_eq!(ViewUpdate::Changed(2).map(|v| v * 2).changed(), Some(4));
        assert!(ViewUpdate::<u32>::Unchanged.map(|v| v * 2).is_unchanged());
    }
}
