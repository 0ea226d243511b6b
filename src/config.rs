//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dataset::{Encoding, Flag};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub encoding: Encoding,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/resorts.csv")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            encoding: Encoding::default(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5010
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Defaults and control ranges of the dashboard views
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Resort shown on the report card before any chart interaction
    #[serde(default = "default_resort")]
    pub default_resort: String,

    #[serde(default = "default_continent")]
    pub default_continent: String,

    #[serde(default = "default_metric")]
    pub default_metric: String,

    #[serde(default)]
    pub price: PriceSlider,

    #[serde(default = "default_flag")]
    pub default_night_skiing: Flag,

    #[serde(default = "default_flag")]
    pub default_summer_skiing: Flag,

    #[serde(default = "default_flag")]
    pub default_snowpark: Flag,

    #[serde(default)]
    pub map: MapLayout,
}

fn default_resort() -> String {
    "Hemsedal".to_string()
}

fn default_continent() -> String {
    "Europe".to_string()
}

fn default_metric() -> String {
    "Price".to_string()
}

fn default_flag() -> Flag {
    Flag::No
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_resort: default_resort(),
            default_continent: default_continent(),
            default_metric: default_metric(),
            price: PriceSlider::default(),
            default_night_skiing: default_flag(),
            default_summer_skiing: default_flag(),
            default_snowpark: default_flag(),
            map: MapLayout::default(),
        }
    }
}

/// Price ceiling slider range
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq)]
pub struct PriceSlider {
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_price_max")]
    pub max: f64,
    #[serde(default = "default_price_step")]
    pub step: f64,
    #[serde(default = "default_price_max")]
    pub default: f64,
}

fn default_price_max() -> f64 {
    150.0
}

fn default_price_step() -> f64 {
    25.0
}

impl Default for PriceSlider {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_price_max(),
            step: default_price_step(),
            default: default_price_max(),
        }
    }
}

/// Layout of the density map figure
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct MapLayout {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_map_style")]
    pub style: String,
    #[serde(default = "default_color_scale")]
    pub color_scale: String,
    #[serde(default = "default_map_height")]
    pub height: u32,
}

fn default_center_lat() -> f64 {
    45.0
}

fn default_center_lon() -> f64 {
    -100.0
}

fn default_zoom() -> f64 {
    2.5
}

fn default_map_style() -> String {
    "open-street-map".to_string()
}

fn default_color_scale() -> String {
    "redor".to_string()
}

fn default_map_height() -> u32 {
    1000
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            style: default_map_style(),
            color_scale: default_color_scale(),
            height: default_map_height(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> LoadedConfig {
        let mut config = Config::default();
        let warnings = config.apply_env_overrides();
        LoadedConfig {
            config,
            source: None,
            warnings,
        }
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::load(path)?;
        let warnings = config.apply_env_overrides();
        Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
            warnings,
        })
    }

    /// Load from default locations or environment
    ///
    /// Nothing is logged here: the returned [`LoadedConfig`] carries the
    /// problems met on the way and is logged once tracing is installed.
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("snowatlas").join("config.toml")),
            Some(PathBuf::from("/etc/snowatlas/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    /// Load the first readable file of `paths`, falling back to defaults
    fn load_first<F>(paths: &[PathBuf], var: F) -> LoadedConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        let mut source = None;
        let mut config = Config::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(loaded) => {
                    config = loaded;
                    source = Some(path.clone());
                    break;
                }
                Err(e) => warnings.push(ConfigWarning::InvalidFile {
                    path: path.clone(),
                    error: e.to_string(),
                }),
            }
        }

        warnings.extend(config.apply_overrides(var));
        LoadedConfig {
            config,
            source,
            warnings,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<ConfigWarning> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    fn apply_overrides<F>(&mut self, var: F) -> Vec<ConfigWarning>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        // Dataset overrides
        if let Some(path) = var("SNOWATLAS_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }
        if let Some(encoding) = var("SNOWATLAS_ENCODING") {
            match encoding.parse() {
                Ok(e) => self.dataset.encoding = e,
                Err(e) => warnings.push(ConfigWarning::InvalidEnv {
                    var: "SNOWATLAS_ENCODING",
                    value: encoding,
                    error: format!("{}", e),
                }),
            }
        }

        // API overrides
        if let Some(host) = var("SNOWATLAS_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("SNOWATLAS_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(e) => warnings.push(ConfigWarning::InvalidEnv {
                    var: "SNOWATLAS_API_PORT",
                    value: port,
                    error: format!("{}", e),
                }),
            }
        }

        // Logging overrides
        if let Some(level) = var("SNOWATLAS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SNOWATLAS_LOG_FORMAT") {
            self.logging.format = format;
        }

        warnings
    }
}

/// A configuration problem that fell back to a default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A config file exists but could not be read or parsed
    InvalidFile { path: PathBuf, error: String },
    /// An environment override had an unusable value
    InvalidEnv {
        var: &'static str,
        value: String,
        error: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::InvalidFile { path, error } => {
                write!(f, "Ignoring config file {:?}: {}", path, error)
            }
            ConfigWarning::InvalidEnv { var, value, error } => {
                write!(f, "Ignoring {}={:?}: {}", var, value, error)
            }
        }
    }
}

/// Configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration was read from, `None` for defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

impl LoadedConfig {
    /// Report the source and every warning through `tracing`
    pub fn log(&self) {
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Snow Atlas Configuration
#
# Environment variables override these settings:
# - SNOWATLAS_DATASET
# - SNOWATLAS_ENCODING
# - SNOWATLAS_API_HOST
# - SNOWATLAS_API_PORT
# - SNOWATLAS_LOG_LEVEL
# - SNOWATLAS_LOG_FORMAT

[dataset]
# Resort table (CSV with a header row)
path = "data/resorts.csv"

# Source encoding: latin1 or utf8
encoding = "latin1"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5010

# Allowed CORS origins (empty = allow any)
cors_origins = []

# Maximum concurrent dashboard sessions (WebSocket)
max_sessions = 1000

[dashboard]
# Resort shown on the report card before any chart interaction
default_resort = "Hemsedal"

# Continent preselected in the country report
default_continent = "Europe"

# Metric preselected in the country report
default_metric = "Price"

# Feature flag defaults: "Yes" or "No"
default_night_skiing = "No"
default_summer_skiing = "No"
default_snowpark = "No"

[dashboard.price]
# Price ceiling slider
min = 0
max = 150
step = 25
default = 150

[dashboard.map]
center_lat = 45.0
center_lon = -100.0
zoom = 2.5
style = "open-street-map"
color_scale = "redor"
height = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
