//! Shared application state for the web server.

use std::sync::Arc;

use openpip_db::{Database, ProteinRepository};

use crate::config::ApiConfig;

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub proteins: ProteinRepository,
    pub api: ApiConfig,
}

impl AppState {
    pub fn new(db: Arc<Database>, api: ApiConfig) -> Self {
        Self { proteins: ProteinRepository::new(db), api }
    }

    /// State over a fresh in-memory database with the schema in place.
    pub async fn in_memory(api: ApiConfig) -> openpip_db::Result<Self> {
        let db = Database::in_memory().await?;
        db.initialize().await?;
        Ok(Self::new(Arc::new(db), api))
    }
}

pub type SharedState = Arc<AppState>;
