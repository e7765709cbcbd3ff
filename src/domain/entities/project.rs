use std::{borrow::Cow, collections::HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    entities::{
        json_text::{decode_json_text, decode_optional_json_text, encode_json_text},
        option_fields::{OptionField, PatchString, PatchVec},
    },
    errors::AppError,
};

/// Free-form JSON object used by `media`, `sections` and `metrics`.
pub type JsonObject = Map<String, Value>;

// ───── Database Models ───────────────────────────────────────────────

/// A `projects` row exactly as stored. List and object fields are still
/// encoded JSON text here.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: String,
    pub technologies: String,
    pub media: String,
    pub challenges: String,
    pub highlights: String,
    pub sections: String,
    pub metrics: Option<String>,
    pub featured: bool,
    pub display_order: i32,
    pub duration: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: String,
    pub technologies: String,
    pub media: String,
    pub challenges: String,
    pub highlights: String,
    pub sections: String,
    pub metrics: Option<String>,
    pub featured: bool,
    pub display_order: i32,
    pub duration: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Encoded column changes for a partial update. `None` / `Unchanged` leaves
/// the column untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub subtitle: OptionField<String>,
    pub description: Option<String>,
    pub image_url: OptionField<String>,
    pub demo_url: OptionField<String>,
    pub github_url: OptionField<String>,
    pub tags: Option<String>,
    pub technologies: Option<String>,
    pub media: Option<String>,
    pub challenges: Option<String>,
    pub highlights: Option<String>,
    pub sections: Option<String>,
    pub metrics: OptionField<String>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
    pub duration: OptionField<String>,
    pub status: OptionField<String>,
    pub role: OptionField<String>,
    pub team_size: OptionField<i32>,
    pub start_date: OptionField<NaiveDate>,
    pub end_date: OptionField<NaiveDate>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    pub media: Vec<JsonObject>,
    pub challenges: Vec<String>,
    pub highlights: Vec<String>,
    pub sections: Vec<JsonObject>,
    pub metrics: Option<JsonObject>,
    pub featured: bool,
    pub order: i32,
    pub duration: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub data: Vec<Project>,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectOrderResponse {
    pub message: String,
    pub updated: usize,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub demo_url: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub technologies: Option<Vec<String>>,

    #[serde(default)]
    pub media: Option<Vec<JsonObject>>,

    #[serde(default)]
    pub challenges: Option<Vec<String>>,

    #[serde(default)]
    pub highlights: Option<Vec<String>>,

    #[serde(default)]
    pub sections: Option<Vec<JsonObject>>,

    #[serde(default)]
    pub metrics: Option<JsonObject>,

    #[serde(default)]
    pub featured: Option<bool>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: Option<i32>,

    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Team size must be at least 1"))]
    pub team_size: Option<i32>,

    #[serde(default)]
    #[validate(custom(function = "validate_date"))]
    pub start_date: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_date"))]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(custom(function = "validate_optional_not_blank"))]
    pub title: PatchString,

    pub subtitle: PatchString,

    #[validate(custom(function = "validate_optional_not_blank"))]
    pub description: PatchString,

    #[validate(custom(function = "validate_optional_url"))]
    pub image_url: PatchString,

    #[validate(custom(function = "validate_optional_url"))]
    pub demo_url: PatchString,

    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: PatchString,

    pub tags: PatchVec<String>,
    pub technologies: PatchVec<String>,
    pub media: PatchVec<JsonObject>,
    pub challenges: PatchVec<String>,
    pub highlights: PatchVec<String>,
    pub sections: PatchVec<JsonObject>,
    pub metrics: OptionField<JsonObject>,
    pub featured: OptionField<bool>,

    #[validate(custom(function = "validate_optional_order"))]
    pub order: OptionField<i32>,

    pub duration: PatchString,
    pub status: PatchString,
    pub role: PatchString,

    #[validate(custom(function = "validate_optional_team_size"))]
    pub team_size: OptionField<i32>,

    #[validate(custom(function = "validate_optional_date"))]
    pub start_date: PatchString,

    #[validate(custom(function = "validate_optional_date"))]
    pub end_date: PatchString,
}

/// Ids are taken as opaque strings. One that is not a stored project id
/// simply matches nothing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderProjectsRequest {
    #[validate(custom(function = "validate_unique_ids"))]
    pub project_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkProjectIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkStatusRequest {
    pub ids: Vec<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub status: String,
}

/// Keeps the ids that can name a stored project. The rest cannot match a
/// row and are dropped.
pub fn known_project_ids(ids: &[String]) -> Vec<Uuid> {
    ids.iter()
        .filter_map(|id| Uuid::parse_str(id).ok())
        .collect()
}

// ───── Validation Helpers ───────────────────────────────────────────

/// Accepts absolute http(s) URLs and site-relative paths such as
/// `/images/projects/portfolio.jpg`.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.starts_with('/') && !url.starts_with("//") {
        return Ok(());
    }
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Value must not be blank"));
    }
    Ok(())
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    match parse_project_date(value) {
        Some(_) => Ok(()),
        None => Err(new_validation_error("invalid_date", "Date must be YYYY-MM-DD or an RFC 3339 timestamp")),
    }
}

pub fn validate_optional_url(value: &PatchString) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_url(url)?;
    }
    Ok(())
}

pub fn validate_optional_not_blank(value: &PatchString) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(s) = value {
        validate_not_blank(s)?;
    }
    Ok(())
}

pub fn validate_optional_date(value: &PatchString) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(s) = value {
        validate_date(s)?;
    }
    Ok(())
}

pub fn validate_optional_order(value: &OptionField<i32>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(order) if *order < 0 => {
            Err(new_validation_error("range", "Order must not be negative"))
        }
        _ => Ok(()),
    }
}

pub fn validate_optional_team_size(value: &OptionField<i32>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(size) if *size < 1 => {
            Err(new_validation_error("range", "Team size must be at least 1"))
        }
        _ => Ok(()),
    }
}

pub fn validate_unique_ids(ids: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(id)) {
        Ok(())
    } else {
        Err(new_validation_error("duplicate_ids", "Project ids must not repeat"))
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp (taking its UTC date).
pub fn parse_project_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

fn parse_date_field(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    parse_project_date(value)
        .ok_or_else(|| AppError::invalid(field, "Date must be YYYY-MM-DD or an RFC 3339 timestamp"))
}

/// Non-nullable columns may be left out of an update but not set to null.
fn required<T>(field: &str, value: OptionField<T>) -> Result<Option<T>, AppError> {
    match value {
        OptionField::SetToNull => Err(AppError::invalid(field, "Field cannot be null")),
        other => Ok(other.into_option().flatten()),
    }
}

fn encode_required<T: Serialize>(field: &str, value: OptionField<T>) -> Result<Option<String>, AppError> {
    required(field, value)?
        .map(|v| encode_json_text(field, &v))
        .transpose()
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = AppError;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let start_date = value.start_date
            .as_deref()
            .map(|d| parse_date_field("startDate", d))
            .transpose()?;
        let end_date = value.end_date
            .as_deref()
            .map(|d| parse_date_field("endDate", d))
            .transpose()?;

        Ok(ProjectInsert {
            tags: encode_json_text("tags", &value.tags.unwrap_or_default())?,
            technologies: encode_json_text("technologies", &value.technologies.unwrap_or_default())?,
            media: encode_json_text("media", &value.media.unwrap_or_default())?,
            challenges: encode_json_text("challenges", &value.challenges.unwrap_or_default())?,
            highlights: encode_json_text("highlights", &value.highlights.unwrap_or_default())?,
            sections: encode_json_text("sections", &value.sections.unwrap_or_default())?,
            metrics: value.metrics
                .map(|m| encode_json_text("metrics", &m))
                .transpose()?,
            title: value.title,
            subtitle: value.subtitle,
            description: value.description,
            image_url: value.image_url,
            demo_url: value.demo_url,
            github_url: value.github_url,
            featured: value.featured.unwrap_or(false),
            display_order: value.order.unwrap_or(0),
            duration: value.duration,
            status: value.status,
            role: value.role,
            team_size: value.team_size,
            start_date,
            end_date,
        })
    }
}

impl TryFrom<UpdateProjectRequest> for ProjectChanges {
    type Error = AppError;

    fn try_from(value: UpdateProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(ProjectChanges {
            title: required("title", value.title)?,
            subtitle: value.subtitle,
            description: required("description", value.description)?,
            image_url: value.image_url,
            demo_url: value.demo_url,
            github_url: value.github_url,
            tags: encode_required("tags", value.tags)?,
            technologies: encode_required("technologies", value.technologies)?,
            media: encode_required("media", value.media)?,
            challenges: encode_required("challenges", value.challenges)?,
            highlights: encode_required("highlights", value.highlights)?,
            sections: encode_required("sections", value.sections)?,
            metrics: value.metrics.try_map_value(|m| encode_json_text("metrics", &m))?,
            featured: required("featured", value.featured)?,
            display_order: required("order", value.order)?,
            duration: value.duration,
            status: value.status,
            role: value.role,
            team_size: value.team_size,
            start_date: value.start_date.try_map_value(|d| parse_date_field("startDate", &d))?,
            end_date: value.end_date.try_map_value(|d| parse_date_field("endDate", &d))?,
        })
    }
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        *self == ProjectChanges::default()
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let decoded = (|| {
            Ok::<_, AppError>(Project {
                tags: decode_json_text("tags", &row.tags)?,
                technologies: decode_json_text("technologies", &row.technologies)?,
                media: decode_json_text("media", &row.media)?,
                challenges: decode_json_text("challenges", &row.challenges)?,
                highlights: decode_json_text("highlights", &row.highlights)?,
                sections: decode_json_text("sections", &row.sections)?,
                metrics: decode_optional_json_text("metrics", row.metrics.as_deref())?,
                id: row.id,
                title: row.title.clone(),
                subtitle: row.subtitle.clone(),
                description: row.description.clone(),
                image_url: row.image_url.clone(),
                demo_url: row.demo_url.clone(),
                github_url: row.github_url.clone(),
                featured: row.featured,
                order: row.display_order,
                duration: row.duration.clone(),
                status: row.status.clone(),
                role: row.role.clone(),
                team_size: row.team_size,
                start_date: row.start_date,
                end_date: row.end_date,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        })();

        decoded.map_err(|e| match e {
            AppError::InternalError(msg) => {
                AppError::InternalError(format!("Project {}: {}", row.id, msg))
            }
            other => other,
        })
    }
}
