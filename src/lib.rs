use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod seed_data;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, utils, web};

use repositories::{project::ProjectRepository, sqlx_repo::SqlxProjectRepo};
use use_cases::projects::ProjectHandler;

pub struct AppState {
    pub project_handler: AppProjectHandler,
}

pub type AppProjectHandler = ProjectHandler<dyn ProjectRepository>;

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self::with_repository(Arc::new(SqlxProjectRepo::new(pool)))
    }

    /// Builds the state around any repository, e.g. a mock in tests.
    pub fn with_repository(project_repo: Arc<dyn ProjectRepository>) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo),
        }
    }
}
