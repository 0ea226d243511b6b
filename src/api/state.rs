//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::dataset::Dataset;
use crate::views::Dashboard;
use crate::websocket::{HubConfig, SessionHub};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// View dispatcher over the immutable dataset
    pub dashboard: Arc<Dashboard>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Live websocket sessions
    pub sessions: Arc<SessionHub>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, config: ApiConfig) -> Self {
        let hub_config = HubConfig {
            max_sessions: config.max_sessions,
        };

        Self {
            dashboard: Arc::new(dashboard),
            config: Arc::new(config),
            start_time: Instant::now(),
            sessions: Arc::new(SessionHub::new(hub_config)),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.dashboard.dataset()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.session_count().await
    }
}
