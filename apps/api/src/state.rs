use std::sync::Arc;

use sqlx::PgPool;

use crate::applications::repo::ApplicationRepo;
use crate::config::Config;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Repository behind the application workflow. Postgres in production,
    /// in-memory in unit tests.
    pub applications: Arc<dyn ApplicationRepo>,
    /// Upload capability for resume attachments.
    pub resumes: Arc<dyn ResumeStore>,
}
