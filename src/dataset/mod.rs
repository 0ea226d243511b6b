//! Snow Atlas Dataset
//!
//! This module provides the read-only resort table every view is computed from:
//!
//! - **types**: Core data structures (Resort, Metric, Flag, CountryRanks)
//! - **loader**: CSV parsing and row validation
//! - **rank**: Grouped descending ranking with average tie ranks
//! - **store**: The immutable `Dataset` with its lookup indexes
//! - **error**: Error types
//!
//! # Load Pipeline
//!
//! ```text
//!   CSV bytes → decode (latin1/utf8) → validate rows → uniqueness check
//!             → per-country ranks → indexes → Dataset (immutable)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use snowatlas::dataset::{DatasetLoader, Encoding};
//! use std::path::Path;
//!
//! let dataset = DatasetLoader::new()
//!     .with_encoding(Encoding::Latin1)
//!     .load_path(Path::new("data/resorts.csv"))?;
//!
//! let hemsedal = dataset.get("Hemsedal").expect("resort exists");
//! println!("Price rank in {}: {}", hemsedal.country, hemsedal.ranks.price);
//! # Ok::<(), snowatlas::dataset::DataLoadError>(())
//! ```

pub mod error;
pub mod loader;
pub mod rank;
pub mod store;
pub mod types;

pub use error::{DataLoadError, DataLoadResult};
pub use loader::{DatasetLoader, Encoding};
pub use rank::{rank_descending, rank_within_groups};
pub use store::Dataset;
pub use types::{CountryRanks, Flag, Metric, Resort};

/// Bundled sample table (ISO-8859-1), shared by tests across the crate
#[cfg(test)]
pub(crate) const SAMPLE_CSV: &[u8] = include_bytes!("../../data/resorts.csv");

#[cfg(test)]
pub(crate) fn sample_dataset() -> Dataset {
    DatasetLoader::new()
        .load_reader(SAMPLE_CSV)
        .expect("sample dataset loads")
}
