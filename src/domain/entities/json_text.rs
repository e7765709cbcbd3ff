//! JSON-in-TEXT columns.
//!
//! The `projects` table stores list and object fields as serialized JSON in
//! plain `TEXT` columns. Everything written to those columns goes through
//! [`encode_json_text`] and everything read back goes through
//! [`decode_json_text`], so callers above the use-case layer only ever see
//! native values.

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

pub fn encode_json_text<T>(column: &str, value: &T) -> Result<String, AppError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).map_err(|e| {
        AppError::InternalError(format!("Failed to encode `{}`: {}", column, e))
    })
}

/// Decodes a stored column. A failure means the row is corrupted and is
/// reported as an internal error, never as an empty value.
pub fn decode_json_text<T>(column: &str, raw: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!(column, error = %e, "Stored JSON text could not be decoded");
        AppError::InternalError(format!("Corrupted `{}` column: {}", column, e))
    })
}

pub fn decode_optional_json_text<T>(column: &str, raw: Option<&str>) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
{
    raw.map(|r| decode_json_text(column, r)).transpose()
}
