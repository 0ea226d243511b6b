//! Snow Atlas Query Engine
//!
//! Pure, per-request selections over the immutable dataset:
//!
//! - **filter**: Map filter, continent → countries, country → ranked resorts
//! - **report_card**: Per-country rank lookup for one resort
//!
//! # Examples
//!
//! ```rust,ignore
//! use snowatlas::query::{filter_map, filter_by_country, report_card, MapFilter};
//! use snowatlas::dataset::Flag;
//!
//! let cheap = filter_map(&dataset, &MapFilter::new(50.0, Flag::No, Flag::No, Flag::No));
//! let norway = filter_by_country(&dataset, "Norway", "Total slopes")?;
//! let card = report_card(&dataset, "Hemsedal")?;
//! ```

mod error;
mod filter;
mod report_card;

pub use error::{QueryError, QueryResult};
pub use filter::{
    filter_by_continent, filter_by_country, filter_map, resolve_metric, sorted_by_metric,
    MapFilter,
};
pub use report_card::{display_rank, report_card, ReportCard};
