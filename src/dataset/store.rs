//! Immutable in-memory dataset
//!
//! A `Dataset` is built exactly once from parsed rows. Construction validates
//! the uniqueness of resort names, computes the per-country rank columns and
//! builds the lookup indexes. Afterwards nothing hands out mutable access, so a
//! `Dataset` can be shared behind an `Arc` without locking.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::error::{DataLoadError, DataLoadResult};
use super::rank::assign_country_ranks;
use super::types::{Metric, Resort};

/// Loaded resorts plus derived columns and indexes
#[derive(Debug)]
pub struct Dataset {
    resorts: Vec<Resort>,
    /// Resort name → position in `resorts`
    by_name: HashMap<String, usize>,
    /// Continents in first-appearance order
    continents: Vec<String>,
    /// Continent → countries in first-appearance order
    countries_by_continent: HashMap<String, Vec<String>>,
    /// Country → number of resorts
    country_sizes: HashMap<String, usize>,
    /// Metrics whose column exists in the source
    metrics: Vec<Metric>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from parsed rows
    ///
    /// `resorts` must be in source order; each row's `row` field is reset to
    /// its position. Rows are reported as if each sat on its own line below a
    /// one-line header. Fails on an empty input or on duplicate resort names.
    pub fn from_resorts(
        resorts: Vec<Resort>,
        metrics: Vec<Metric>,
        source: impl Into<String>,
    ) -> DataLoadResult<Self> {
        let lines = (0..resorts.len()).map(|idx| idx as u64 + 2).collect();
        Self::from_source_rows(resorts, lines, metrics, source)
    }

    /// Build a dataset from rows read at the given source lines
    pub(crate) fn from_source_rows(
        mut resorts: Vec<Resort>,
        lines: Vec<u64>,
        metrics: Vec<Metric>,
        source: impl Into<String>,
    ) -> DataLoadResult<Self> {
        if resorts.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut by_name = HashMap::with_capacity(resorts.len());
        for (idx, resort) in resorts.iter_mut().enumerate() {
            resort.row = idx;
            if let Some(first) = by_name.insert(resort.name.clone(), idx) {
                return Err(DataLoadError::DuplicateResort {
                    name: resort.name.clone(),
                    line: lines.get(idx).copied().unwrap_or_default(),
                    first_line: lines.get(first).copied().unwrap_or_default(),
                });
            }
        }

        assign_country_ranks(&mut resorts);

        let mut continents: Vec<String> = Vec::new();
        let mut countries_by_continent: HashMap<String, Vec<String>> = HashMap::new();
        let mut country_sizes: HashMap<String, usize> = HashMap::new();

        for resort in &resorts {
            if !continents.contains(&resort.continent) {
                continents.push(resort.continent.clone());
            }

            let countries = countries_by_continent
                .entry(resort.continent.clone())
                .or_default();
            if !countries.contains(&resort.country) {
                countries.push(resort.country.clone());
            }

            *country_sizes.entry(resort.country.clone()).or_insert(0) += 1;
        }

        let mut metrics = metrics;
        metrics.sort();
        metrics.dedup();

        Ok(Self {
            resorts,
            by_name,
            continents,
            countries_by_continent,
            country_sizes,
            metrics,
            source: source.into(),
            loaded_at: Utc::now(),
        })
    }

    /// All resorts in source order
    pub fn resorts(&self) -> &[Resort] {
        &self.resorts
    }

    pub fn len(&self) -> usize {
        self.resorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resorts.is_empty()
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&Resort> {
        self.by_name.get(name).map(|&idx| &self.resorts[idx])
    }

    /// Continents in first-appearance order
    pub fn continents(&self) -> &[String] {
        &self.continents
    }

    /// Countries of a continent in first-appearance order (empty if unknown)
    pub fn countries_in(&self, continent: &str) -> &[String] {
        self.countries_by_continent
            .get(continent)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Number of resorts in a country
    pub fn country_size(&self, country: &str) -> usize {
        self.country_sizes.get(country).copied().unwrap_or(0)
    }

    /// Number of distinct countries
    pub fn country_count(&self) -> usize {
        self.country_sizes.len()
    }

    /// Resorts of a country in source order
    pub fn resorts_in_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a Resort> {
        self.resorts.iter().filter(move |r| r.country == country)
    }

    /// Metrics available for plotting and sorting, in column order
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }

    /// Description of where the data came from (path or "<reader>")
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;
    use crate::dataset::types::{CountryRanks, Flag};
    use std::collections::BTreeMap;

    fn resort(name: &str, country: &str, price: f64) -> Resort {
        Resort {
            row: 0,
            id: None,
            name: name.to_string(),
            country: country.to_string(),
            continent: "Europe".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            price,
            highest_point: 1000.0,
            total_slopes: 10.0,
            snow_cannons: 0.0,
            night_skiing: Flag::No,
            summer_skiing: Flag::No,
            snowpark: Flag::No,
            season: None,
            child_friendly: None,
            extra: BTreeMap::new(),
            ranks: CountryRanks::default(),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let rows = vec![
            resort("Alpha", "Norway", 10.0),
            resort("Beta", "Norway", 20.0),
            resort("Alpha", "Sweden", 30.0),
        ];
        let err = Dataset::from_resorts(rows, vec![Metric::Price], "test").unwrap_err();
        match err {
            DataLoadError::DuplicateResort {
                name,
                line,
                first_line,
            } => {
                assert_eq!(name, "Alpha");
                assert_eq!(line, 4);
                assert_eq!(first_line, 2);
            }
            other => panic!("Expected DuplicateResort, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_rejected() {
        let err = Dataset::from_resorts(Vec::new(), vec![], "test").unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn test_ranks_assigned_per_country() {
        let rows = vec![
            resort("A", "Norway", 10.0),
            resort("B", "Sweden", 99.0),
            resort("C", "Norway", 20.0),
        ];
        let dataset = Dataset::from_resorts(rows, vec![Metric::Price], "test").unwrap();
        assert_eq!(dataset.get("A").unwrap().ranks.price, 2.0);
        assert_eq!(dataset.get("B").unwrap().ranks.price, 1.0);
        assert_eq!(dataset.get("C").unwrap().ranks.price, 1.0);
        // All share highest_point, so they tie within their country
        assert_eq!(dataset.get("A").unwrap().ranks.elevation, 1.5);
        assert_eq!(dataset.get("B").unwrap().ranks.elevation, 1.0);
    }

    #[test]
    fn test_indexes() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 18);
        assert_eq!(
            dataset.continents(),
            &["Europe", "North America", "Southern Hemisphere", "Asia"]
        );
        assert_eq!(
            dataset.countries_in("Europe"),
            &["Norway", "Austria", "Switzerland"]
        );
        assert!(dataset.countries_in("Antarctica").is_empty());
        assert_eq!(dataset.country_size("Norway"), 5);
        assert_eq!(dataset.country_size("Atlantis"), 0);
        assert_eq!(dataset.country_count(), 8);
        assert_eq!(dataset.resorts_in_country("Japan").count(), 2);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let dataset = sample_dataset();
        for (idx, resort) in dataset.resorts().iter().enumerate() {
            assert_eq!(resort.row, idx);
        }
    }
}
