use crate::analytics::AnalyticsConfig;
use crate::database::Database;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub analytics: AnalyticsConfig,
}

impl AppState {
    pub fn new(db: Database, analytics: AnalyticsConfig) -> Self {
        Self { db, analytics }
    }
}
