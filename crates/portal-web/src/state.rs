//! Application state shared across handlers.

use database::{AdminSeed, Database};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Administrator seeded by schema initialization.
    pub admin_seed: AdminSeed,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, admin_seed: AdminSeed) -> Self {
        Self { db, admin_seed }
    }
}
