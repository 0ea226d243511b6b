//! Control options
//!
//! The continent → country cascade and the static descriptors of every input
//! control (slider range, flag choices, defaults).

use serde::Serialize;

use crate::config::{DashboardConfig, PriceSlider};
use crate::dataset::{Dataset, Flag, Metric};
use crate::query::filter_by_continent;

/// Valid country choices for a continent
///
/// Changing the continent only replaces this option set; it never picks or
/// clears the country itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryOptions {
    pub continent: String,
    pub countries: Vec<String>,
}

pub fn country_options(dataset: &Dataset, continent: &str) -> CountryOptions {
    CountryOptions {
        continent: continent.to_string(),
        countries: filter_by_continent(dataset, continent)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

/// A labelled choice of a flag control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagOption {
    pub label: String,
    pub value: Flag,
}

/// Radio control of one feature flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagControl {
    pub id: &'static str,
    pub options: Vec<FlagOption>,
    pub default: Flag,
}

impl FlagControl {
    fn new(id: &'static str, feature: &str, default: Flag) -> Self {
        Self {
            id,
            options: vec![
                FlagOption {
                    label: format!("Has {}", feature),
                    value: Flag::Yes,
                },
                FlagOption {
                    label: format!("No {}", feature),
                    value: Flag::No,
                },
            ],
            default,
        }
    }
}

/// Descriptors and defaults of every dashboard control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub price: PriceSlider,
    pub flags: Vec<FlagControl>,
    pub continents: Vec<String>,
    pub default_continent: String,
    pub metrics: Vec<Metric>,
    pub default_metric: String,
    pub default_resort: String,
}

pub fn controls(dataset: &Dataset, config: &DashboardConfig) -> Controls {
    Controls {
        price: config.price,
        flags: vec![
            FlagControl::new("night_skiing", "Night Skiing", config.default_night_skiing),
            FlagControl::new("summer_skiing", "Summer Skiing", config.default_summer_skiing),
            FlagControl::new("snowpark", "Snowpark", config.default_snowpark),
        ],
        continents: dataset.continents().to_vec(),
        default_continent: config.default_continent.clone(),
        metrics: dataset.metrics().to_vec(),
        default_metric: config.default_metric.clone(),
        default_resort: config.default_resort.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;

    #[test]
    fn test_country_options() {
        let dataset = sample_dataset();
        let options = country_options(&dataset, "North America");
        assert_eq!(options.continent, "North America");
        assert_eq!(options.countries, vec!["United States", "Canada"]);

        let options = country_options(&dataset, "Atlantis");
        assert!(options.countries.is_empty());
    }

    #[test]
    fn test_controls() {
        let dataset = sample_dataset();
        let controls = controls(&dataset, &DashboardConfig::default());

        assert_eq!(controls.price.max, 150.0);
        assert_eq!(controls.price.step, 25.0);
        assert_eq!(controls.flags.len(), 3);
        assert_eq!(controls.flags[0].options[0].label, "Has Night Skiing");
        assert_eq!(controls.flags[2].options[1].label, "No Snowpark");
        assert_eq!(controls.flags[1].default, Flag::No);
        assert_eq!(controls.continents.len(), 4);
        assert_eq!(controls.metrics.first(), Some(&Metric::Price));
        assert_eq!(controls.default_resort, "Hemsedal");
    }
}
