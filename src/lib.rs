//! # Snow Atlas
//!
//! Backend of an interactive ski resort dashboard: a resort table loaded once
//! at startup, per-country rankings, cascading filters and declarative view
//! specifications served over REST and WebSocket.
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading, validation and derived per-country ranks
//! - [`query`]: Map filter, continent → country cascade, report card lookup
//! - [`views`]: View nodes, their dependency graph and the session dispatcher
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Per-session dashboard over WebSocket
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snowatlas::dataset::{DatasetLoader, Flag};
//! use snowatlas::query::{filter_map, report_card, MapFilter};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::new().load_path(Path::new("data/resorts.csv"))?;
//!
//!     // Cheap resorts without night skiing, summer skiing or a snowpark
//!     let filter = MapFilter::new(50.0, Flag::No, Flag::No, Flag::No);
//!     for resort in filter_map(&dataset, &filter) {
//!         println!("{} ({})", resort.name, resort.country);
//!     }
//!
//!     let card = report_card(&dataset, "Hemsedal")?;
//!     println!("Price rank in {}: {}", card.country, card.price_rank);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod query;
pub mod views;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{
    CountryRanks, DataLoadError, DataLoadResult, Dataset, DatasetLoader, Encoding, Flag, Metric,
    Resort,
};

pub use query::{
    filter_by_continent, filter_by_country, filter_map, report_card, MapFilter, QueryError,
    QueryResult, ReportCard,
};

pub use views::{Dashboard, InputEvent, InputState, NodeId, NodeOutput, Signal, ViewUpdate};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, HubConfig, HubError, ServerMessage, SessionHub,
};

pub use config::{
    ApiConfig, Config, ConfigError, ConfigWarning, DashboardConfig, DatasetConfig, LoadedConfig,
    LoggingConfig,
};
