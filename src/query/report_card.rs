//! Resort report card
//!
//! Looks up the precomputed per-country ranks of one resort.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::query::error::{QueryError, QueryResult};

/// Country ranks of a single resort, as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub name: String,
    pub country: String,
    /// Number of resorts in the country (upper bound of every rank)
    pub country_size: usize,
    pub elevation_rank: u32,
    pub price_rank: u32,
    pub slope_rank: u32,
    pub cannon_rank: u32,
}

/// Build the report card of `resort_name`
///
/// Lookup is by exact name. Names are unique by construction of the
/// dataset, so the only failure is an unknown name.
pub fn report_card(dataset: &Dataset, resort_name: &str) -> QueryResult<ReportCard> {
    let resort = dataset
        .get(resort_name)
        .ok_or_else(|| QueryError::ResortNotFound(resort_name.to_string()))?;

    Ok(ReportCard {
        name: resort.name.clone(),
        country: resort.country.clone(),
        country_size: dataset.country_size(&resort.country),
        elevation_rank: display_rank(resort.ranks.elevation),
        price_rank: display_rank(resort.ranks.price),
        slope_rank: display_rank(resort.ranks.slopes),
        cannon_rank: display_rank(resort.ranks.cannons),
    })
}

/// Truncate a fractional tie rank for display (2.5 → 2)
pub fn display_rank(rank: f64) -> u32 {
    rank.trunc() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;

    #[test]
    fn test_hemsedal_card() {
        let dataset = sample_dataset();
        let card = report_card(&dataset, "Hemsedal").unwrap();
        assert_eq!(
            card,
            ReportCard {
                name: "Hemsedal".to_string(),
                country: "Norway".to_string(),
                country_size: 5,
                elevation_rank: 2,
                // Tied with Kvitfjell at 45: 2.5 truncated
                price_rank: 2,
                slope_rank: 2,
                cannon_rank: 2,
            }
        );
    }

    #[test]
    fn test_unknown_resort() {
        let dataset = sample_dataset();
        let err = report_card(&dataset, "Narnia Peaks").unwrap_err();
        assert_eq!(err, QueryError::ResortNotFound("Narnia Peaks".to_string()));

        // Exact match only
        assert!(report_card(&dataset, "hemsedal").is_err());
    }

    #[test]
    fn test_ranks_within_country_bounds() {
        let dataset = sample_dataset();
        for resort in dataset.resorts() {
            let card = report_card(&dataset, &resort.name).unwrap();
            for rank in [
                card.elevation_rank,
                card.price_rank,
                card.slope_rank,
                card.cannon_rank,
            ] {
                assert!(rank >= 1);
                assert!(rank as usize <= card.country_size);
            }
        }
    }

    #[test]
    fn test_ranks_follow_better_count_in_country() {
        let dataset = sample_dataset();
        for resort in dataset.resorts() {
            let peers: Vec<f64> = dataset
                .resorts_in_country(&resort.country)
                .map(|r| r.highest_point)
                .collect();
            let better = peers.iter().filter(|v| **v > resort.highest_point).count() as f64;
            let tied = peers.iter().filter(|v| **v == resort.highest_point).count() as f64;
            assert_eq!(resort.ranks.elevation, better + (tied + 1.0) / 2.0);
        }
    }

    #[test]
    fn test_us_price_tie() {
        let dataset = sample_dataset();
        assert_eq!(dataset.get("Killington").unwrap().ranks.price, 2.5);
        assert_eq!(dataset.get("Stowe").unwrap().ranks.price, 2.5);
        assert_eq!(report_card(&dataset, "Stowe").unwrap().price_rank, 2);
        assert_eq!(report_card(&dataset, "Vail").unwrap().price_rank, 1);
    }

    #[test]
    fn test_display_rank() {
        assert_eq!(display_rank(1.0), 1);
        assert_eq!(display_rank(2.5), 2);
        assert_eq!(display_rank(3.999), 3);
    }
}
