//! View dependency graph
//!
//! Declares which input signals each view node reads and which named outputs
//! it writes. The graph is static and acyclic: nodes read only input signals,
//! never other nodes' outputs, so a changed signal re-evaluates exactly the
//! nodes listed as its dependents.
//!
//! ```text
//! PriceCeiling ─┐
//! NightSkiing  ─┤
//! SummerSkiing ─┼─▶ Map            ─▶ map.title, map.figure
//! Snowpark     ─┘
//! Continent    ───▶ CountryOptions ─▶ country.options
//! Country      ─┬─▶ Report         ─▶ report.title, report.chart
//! Metric       ─┘
//! SelectedResort ─▶ ReportCard     ─▶ card.resort, card.elevation, card.price,
//!                                     card.slopes, card.cannons
//! ```

use serde::Serialize;

/// Input signal fed by an external control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    PriceCeiling,
    NightSkiing,
    SummerSkiing,
    Snowpark,
    Continent,
    Country,
    Metric,
    SelectedResort,
}

impl Signal {
    pub fn all() -> &'static [Signal] {
        &[
            Signal::PriceCeiling,
            Signal::NightSkiing,
            Signal::SummerSkiing,
            Signal::Snowpark,
            Signal::Continent,
            Signal::Country,
            Signal::Metric,
            Signal::SelectedResort,
        ]
    }
}

/// A view node of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    Map,
    CountryOptions,
    Report,
    ReportCard,
}

/// Declared inputs and outputs of a node
#[derive(Debug)]
pub struct ViewNode {
    pub id: NodeId,
    pub inputs: &'static [Signal],
    pub outputs: &'static [&'static str],
}

/// The dashboard graph, in evaluation order
pub const VIEW_GRAPH: &[ViewNode] = &[
    ViewNode {
        id: NodeId::Map,
        inputs: &[
            Signal::PriceCeiling,
            Signal::NightSkiing,
            Signal::SummerSkiing,
            Signal::Snowpark,
        ],
        outputs: &["map.title", "map.figure"],
    },
    ViewNode {
        id: NodeId::CountryOptions,
        inputs: &[Signal::Continent],
        outputs: &["country.options"],
    },
    ViewNode {
        id: NodeId::Report,
        inputs: &[Signal::Country, Signal::Metric],
        outputs: &["report.title", "report.chart"],
    },
    ViewNode {
        id: NodeId::ReportCard,
        inputs: &[Signal::SelectedResort],
        outputs: &[
            "card.resort",
            "card.elevation",
            "card.price",
            "card.slopes",
            "card.cannons",
        ],
    },
];

impl NodeId {
    /// Declaration of this node in [`VIEW_GRAPH`]
    pub fn node(&self) -> &'static ViewNode {
        let idx = match self {
            NodeId::Map => 0,
            NodeId::CountryOptions => 1,
            NodeId::Report => 2,
            NodeId::ReportCard => 3,
        };
        &VIEW_GRAPH[idx]
    }

    /// Whether this node reads `signal`
    pub fn depends_on(&self, signal: Signal) -> bool {
        self.node().inputs.contains(&signal)
    }
}

/// Nodes to re-evaluate after `signal` changes, in evaluation order
pub fn dependents(signal: Signal) -> impl Iterator<Item = NodeId> {
    VIEW_GRAPH
        .iter()
        .filter(move |n| n.inputs.contains(&signal))
        .map(|n| n.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_signal_has_a_dependent() {
        for &signal in Signal::all() {
            assert!(dependents(signal).count() >= 1, "{:?} feeds nothing", signal);
        }
    }

    #[test]
    fn test_dependents() {
        assert_eq!(dependents(Signal::Snowpark).collect::<Vec<_>>(), vec![NodeId::Map]);
        assert_eq!(
            dependents(Signal::Continent).collect::<Vec<_>>(),
            vec![NodeId::CountryOptions]
        );
        assert_eq!(dependents(Signal::Metric).collect::<Vec<_>>(), vec![NodeId::Report]);
        assert_eq!(
            dependents(Signal::SelectedResort).collect::<Vec<_>>(),
            vec![NodeId::ReportCard]
        );
    }

    #[test]
    fn test_continent_does_not_touch_report() {
        assert!(!NodeId::Report.depends_on(Signal::Continent));
        assert!(NodeId::Report.depends_on(Signal::Country));
    }

    #[test]
    fn test_outputs_are_disjoint() {
        let mut seen = HashSet::new();
        for node in VIEW_GRAPH {
            for output in node.outputs {
                assert!(seen.insert(*output), "output {} declared twice", output);
            }
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_node_lookup() {
        for node in VIEW_GRAPH {
            assert_eq!(node.id.node().id, node.id);
        }
    }
}
