use crate::datalayer::DbManager;
use crate::logging::ProductMetrics;

/// Application state shared across all handlers
///
/// Handed to every handler through axum's `State`; there is no global database handle.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Owner of the database connection lifecycle
    pub db: DbManager,
    pub metrics: ProductMetrics,
}

impl AppState {
    pub fn new(db: DbManager) -> Self {
        Self {
            db,
            metrics: ProductMetrics::new(),
        }
    }
}
