//! Dashboard dispatcher
//!
//! Owns the shared dataset and the dashboard defaults. Each session keeps its
//! own [`InputState`]; events update that state and re-evaluate only the
//! nodes reading the changed signal.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::dataset::{Dataset, Flag};
use crate::query::{resolve_metric, MapFilter, QueryError, QueryResult};
use crate::views::card::{card_view, CardView, HoverData};
use crate::views::graph::{dependents, NodeId, Signal, VIEW_GRAPH};
use crate::views::map::{map_view, MapView};
use crate::views::options::{country_options, CountryOptions};
use crate::views::report::{report_view, ReportInputs, ReportView};
use crate::views::ViewUpdate;

/// Current value of every input signal of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputState {
    pub price_ceiling: f64,
    pub night_skiing: Flag,
    pub summer_skiing: Flag,
    pub snowpark: Flag,
    pub continent: String,
    pub country: Option<String>,
    pub metric: String,
    pub selected_resort: Option<String>,
}

impl InputState {
    pub fn map_filter(&self) -> MapFilter {
        MapFilter::new(
            self.price_ceiling,
            self.night_skiing,
            self.summer_skiing,
            self.snowpark,
        )
    }

    pub fn report_inputs(&self) -> ReportInputs {
        ReportInputs::new(self.country.as_deref(), self.metric.clone())
    }

    /// Apply an event, returning the signal it changed
    ///
    /// A hover without a resort leaves the selection as it was and changes
    /// nothing.
    fn apply(&mut self, event: InputEvent) -> Option<Signal> {
        let signal = event.signal();
        match event {
            InputEvent::SetPriceCeiling(value) => self.price_ceiling = value,
            InputEvent::SetNightSkiing(flag) => self.night_skiing = flag,
            InputEvent::SetSummerSkiing(flag) => self.summer_skiing = flag,
            InputEvent::SetSnowpark(flag) => self.snowpark = flag,
            InputEvent::SelectContinent(continent) => self.continent = continent,
            InputEvent::SelectCountry(country) => self.country = country,
            InputEvent::SelectMetric(metric) => self.metric = metric,
            InputEvent::SelectResort(name) => self.selected_resort = Some(name),
            InputEvent::Hover(hover) => {
                let name = hover.selected_resort()?;
                self.selected_resort = Some(name.to_string());
            }
        }
        Some(signal)
    }
}

/// A change to one input signal
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SetPriceCeiling(f64),
    SetNightSkiing(Flag),
    SetSummerSkiing(Flag),
    SetSnowpark(Flag),
    SelectContinent(String),
    SelectCountry(Option<String>),
    SelectMetric(String),
    Hover(HoverData),
    SelectResort(String),
}

impl InputEvent {
    pub fn signal(&self) -> Signal {
        match self {
            InputEvent::SetPriceCeiling(_) => Signal::PriceCeiling,
            InputEvent::SetNightSkiing(_) => Signal::NightSkiing,
            InputEvent::SetSummerSkiing(_) => Signal::SummerSkiing,
            InputEvent::SetSnowpark(_) => Signal::Snowpark,
            InputEvent::SelectContinent(_) => Signal::Continent,
            InputEvent::SelectCountry(_) => Signal::Country,
            InputEvent::SelectMetric(_) => Signal::Metric,
            InputEvent::Hover(_) | InputEvent::SelectResort(_) => Signal::SelectedResort,
        }
    }
}

/// Value produced by a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Map(MapView),
    CountryOptions(CountryOptions),
    Report(ReportView),
    Card(CardView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NodeResult {
    Changed { value: NodeValue },
    /// Keep the previously displayed output
    Unchanged,
    /// Evaluation was rejected; keep the previously displayed output
    Error { message: String },
}

/// Outcome of evaluating one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOutput {
    pub node: NodeId,
    #[serde(flatten)]
    pub result: NodeResult,
}

impl NodeOutput {
    pub fn value(&self) -> Option<&NodeValue> {
        match &self.result {
            NodeResult::Changed { value } => Some(value),
            _ => None,
        }
    }
}

/// View dispatcher shared by all sessions
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    config: Arc<DashboardConfig>,
}

impl Dashboard {
    /// Create a dispatcher, checking that the configured defaults exist
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> QueryResult<Self> {
        resolve_metric(&dataset, &config.default_metric)?;
        if dataset.get(&config.default_resort).is_none() {
            return Err(QueryError::ResortNotFound(config.default_resort.clone()));
        }
        if config.price.default.is_nan() {
            return Err(QueryError::Validation(
                "default price ceiling must be a number".to_string(),
            ));
        }

        Ok(Self {
            dataset,
            config: Arc::new(config),
        })
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Input values shown before any interaction
    pub fn initial_state(&self) -> InputState {
        InputState {
            price_ceiling: self.config.price.default,
            night_skiing: self.config.default_night_skiing,
            summer_skiing: self.config.default_summer_skiing,
            snowpark: self.config.default_snowpark,
            continent: self.config.default_continent.clone(),
            country: None,
            metric: self.config.default_metric.clone(),
            selected_resort: None,
        }
    }

    /// Evaluate every node of the graph
    pub fn render_all(&self, state: &InputState) -> Vec<NodeOutput> {
        VIEW_GRAPH
            .iter()
            .map(|node| self.evaluate(node.id, state))
            .collect()
    }

    /// Apply `event` to `state` and re-evaluate the nodes depending on it
    pub fn dispatch(&self, state: &mut InputState, event: InputEvent) -> Vec<NodeOutput> {
        let Some(signal) = state.apply(event) else {
            debug!("Event carried no change");
            return Vec::new();
        };

        dependents(signal)
            .map(|node| self.evaluate(node, state))
            .collect()
    }

    /// Evaluate a single node; failures become [`NodeResult::Error`]
    pub fn evaluate(&self, node: NodeId, state: &InputState) -> NodeOutput {
        let dataset = self.dataset.as_ref();

        let update: QueryResult<ViewUpdate<NodeValue>> = match node {
            NodeId::Map => map_view(dataset, &state.map_filter(), &self.config.map)
                .map(|view| ViewUpdate::Changed(NodeValue::Map(view))),
            NodeId::CountryOptions => Ok(ViewUpdate::Changed(NodeValue::CountryOptions(
                country_options(dataset, &state.continent),
            ))),
            NodeId::Report => report_view(dataset, &state.report_inputs())
                .map(|update| update.map(NodeValue::Report)),
            NodeId::ReportCard => card_view(
                dataset,
                state.selected_resort.as_deref(),
                &self.config.default_resort,
            )
            .map(|card| ViewUpdate::Changed(NodeValue::Card(card))),
        };

        let result = match update {
            Ok(ViewUpdate::Changed(value)) => NodeResult::Changed { value },
            Ok(ViewUpdate::Unchanged) => NodeResult::Unchanged,
            Err(e) => {
                warn!(node = ?node, error = %e, "View evaluation failed");
                NodeResult::Error {
                    message: e.to_string(),
                }
            }
        };

        NodeOutput { node, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(sample_dataset()), DashboardConfig::default()).unwrap()
    }

    fn nodes(outputs: &[NodeOutput]) -> Vec<NodeId> {
        outputs.iter().map(|o| o.node).collect()
    }

    #[test]
    fn test_new_validates_defaults() {
        let dataset = Arc::new(sample_dataset());

        let mut config = DashboardConfig::default();
        config.default_resort = "Narnia Peaks".to_string();
        assert_eq!(
            Dashboard::new(dataset.clone(), config).unwrap_err(),
            QueryError::ResortNotFound("Narnia Peaks".to_string())
        );

        let mut config = DashboardConfig::default();
        config.default_metric = "Latitude".to_string();
        assert!(Dashboard::new(dataset, config).is_err());
    }

    #[test]
    fn test_initial_state() {
        let state = dashboard().initial_state();
        assert_eq!(state.price_ceiling, 150.0);
        assert_eq!(state.night_skiing, Flag::No);
        assert_eq!(state.continent, "Europe");
        assert_eq!(state.country, None);
        assert_eq!(state.metric, "Price");
        assert_eq!(state.selected_resort, None);
    }

    #[test]
    fn test_render_all() {
        let dashboard = dashboard();
        let outputs = dashboard.render_all(&dashboard.initial_state());

        assert_eq!(
            nodes(&outputs),
            vec![NodeId::Map, NodeId::CountryOptions, NodeId::Report, NodeId::ReportCard]
        );
        // No country yet
        assert_eq!(outputs[2].result, NodeResult::Unchanged);

        match outputs[3].value() {
            Some(NodeValue::Card(card)) => assert_eq!(card.resort, "Hemsedal"),
            other => panic!("unexpected card output: {:?}", other),
        }
        match outputs[1].value() {
            Some(NodeValue::CountryOptions(options)) => {
                assert_eq!(options.countries, vec!["Norway", "Austria", "Switzerland"])
            }
            other => panic!("unexpected options output: {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_only_reevaluates_dependents() {
        let dashboard = dashboard();
        let mut state = dashboard.initial_state();

        let outputs = dashboard.dispatch(&mut state, InputEvent::SetPriceCeiling(50.0));
        assert_eq!(nodes(&outputs), vec![NodeId::Map]);
        match outputs[0].value() {
            Some(NodeValue::Map(map)) => {
                assert_eq!(map.title, "Resorts with a ticket price less than $50.");
                assert_eq!(map.figure.points.len(), 3);
            }
            other => panic!("unexpected map output: {:?}", other),
        }

        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectCountry(Some("Norway".into())));
        assert_eq!(nodes(&outputs), vec![NodeId::Report]);
        match outputs[0].value() {
            Some(NodeValue::Report(report)) => {
                assert_eq!(report.title, "Top Resorts in Norway by Price")
            }
            other => panic!("unexpected report output: {:?}", other),
        }
    }

    #[test]
    fn test_clearing_country_leaves_report_unchanged() {
        let dashboard = dashboard();
        let mut state = dashboard.initial_state();

        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectCountry(Some("Norway".into())));
        assert!(matches!(outputs[0].value(), Some(NodeValue::Report(_))));

        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectCountry(Some(String::new())));
        assert_eq!(nodes(&outputs), vec![NodeId::Report]);
        assert_eq!(outputs[0].result, NodeResult::Unchanged);
        assert_eq!(state.country.as_deref(), Some(""));

        // An invalid metric is not reported while no country is selected
        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectMetric("Latitude".into()));
        assert_eq!(outputs[0].result, NodeResult::Unchanged);
    }

    #[test]
    fn test_continent_change_keeps_country() {
        let dashboard = dashboard();
        let mut state = dashboard.initial_state();
        dashboard.dispatch(&mut state, InputEvent::SelectCountry(Some("Norway".into())));

        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectContinent("Asia".to_string()));
        assert_eq!(nodes(&outputs), vec![NodeId::CountryOptions]);
        assert_eq!(state.country.as_deref(), Some("Norway"));
        match outputs[0].value() {
            Some(NodeValue::CountryOptions(options)) => {
                assert_eq!(options.countries, vec!["Japan"])
            }
            other => panic!("unexpected options output: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_metric_becomes_error_output() {
        let dashboard = dashboard();
        let mut state = dashboard.initial_state();
        dashboard.dispatch(&mut state, InputEvent::SelectCountry(Some("Japan".into())));

        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectMetric("Latitude".into()));
        assert_eq!(
            outputs[0].result,
            NodeResult::Error {
                message: "Invalid metric: Latitude".to_string()
            }
        );
    }

    #[test]
    fn test_hover_selects_resort() {
        let dashboard = dashboard();
        let mut state = dashboard.initial_state();

        let outputs =
            dashboard.dispatch(&mut state, InputEvent::Hover(HoverData::for_resort("Stowe")));
        assert_eq!(nodes(&outputs), vec![NodeId::ReportCard]);
        match outputs[0].value() {
            Some(NodeValue::Card(card)) => {
                assert_eq!(card.resort, "Stowe");
                // Tied with Killington at 110: 2.5 truncated
                assert_eq!(card.price, "Price Rank: 2");
            }
            other => panic!("unexpected card output: {:?}", other),
        }

        // Empty hover keeps the selection and emits nothing
        let outputs = dashboard.dispatch(&mut state, InputEvent::Hover(HoverData::default()));
        assert!(outputs.is_empty());
        assert_eq!(state.selected_resort.as_deref(), Some("Stowe"));
    }

    #[test]
    fn test_unknown_selection_is_error() {
        let dashboard = dashboard();
        let mut state = dashboard.initial_state();
        let outputs =
            dashboard.dispatch(&mut state, InputEvent::SelectResort("Narnia Peaks".into()));
        assert!(matches!(outputs[0].result, NodeResult::Error { .. }));
    }

    #[test]
    fn test_node_output_serialization() {
        let dashboard = dashboard();
        let state = dashboard.initial_state();

        let json = serde_json::to_value(dashboard.evaluate(NodeId::Report, &state)).unwrap();
        assert_eq!(json, serde_json::json!({"node": "report", "status": "unchanged"}));

        let json = serde_json::to_value(dashboard.evaluate(NodeId::ReportCard, &state)).unwrap();
        assert_eq!(json["node"], "report_card");
        assert_eq!(json["status"], "changed");
        assert_eq!(json["value"]["elevation"], "Elevation Rank: 2");
    }
}
