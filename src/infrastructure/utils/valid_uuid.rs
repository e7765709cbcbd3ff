use uuid::Uuid;

use crate::errors::AppError;

/// Parses a project id taken from the request path. Ids are opaque to
/// clients, so one that cannot be parsed names no project.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("Project with ID {} not found", id)))
}
