use sea_orm::DatabaseConnection;
use services::AnalysisService;
use std::sync::Arc;

/// Shared application state: the database handle plus the analysis pipeline,
/// constructed once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    analysis: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, analysis: Arc<AnalysisService>) -> Self {
        Self { db, analysis }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn analysis(&self) -> &AnalysisService {
        &self.analysis
    }
}
