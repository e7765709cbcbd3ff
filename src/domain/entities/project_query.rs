use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{entities::project::parse_project_date, errors::AppError};

/// Raw `GET /projects` query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub skip: Option<i64>,
    pub take: Option<i64>,
    /// `true` keeps featured projects, any other non-empty value the rest.
    pub featured: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// JSON object with a single key, e.g. `{"order":"asc"}`.
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub featured: Option<bool>,
    pub status: Option<String>,
    /// Case-sensitive substring of title or description.
    pub search: Option<String>,
    /// Keeps projects starting on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Keeps projects ending on or before this date.
    pub end_date: Option<NaiveDate>,
    pub order: ProjectOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSortColumn {
    #[default]
    Order,
    Title,
    CreatedAt,
    UpdatedAt,
    StartDate,
    EndDate,
    Featured,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectOrder {
    pub column: ProjectSortColumn,
    pub direction: SortDirection,
}

impl ProjectSortColumn {
    fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "order" => Self::Order,
            "title" => Self::Title,
            "createdAt" => Self::CreatedAt,
            "updatedAt" => Self::UpdatedAt,
            "startDate" => Self::StartDate,
            "endDate" => Self::EndDate,
            "featured" => Self::Featured,
            "status" => Self::Status,
            _ => return None,
        })
    }

    /// Column in the `projects` table. Only these fixed names ever reach SQL.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Order => "display_order",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Featured => "featured",
            Self::Status => "status",
        }
    }
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl ProjectOrder {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = || AppError::invalid(
            "orderBy",
            "orderBy must be a JSON object with one field, e.g. {\"order\":\"asc\"}",
        );

        let object: Map<String, Value> = serde_json::from_str(raw).map_err(|_| invalid())?;
        let mut entries = object.into_iter();
        let (Some((field, direction)), None) = (entries.next(), entries.next()) else {
            return Err(invalid());
        };

        let column = ProjectSortColumn::from_wire_name(&field)
            .ok_or_else(|| AppError::invalid("orderBy", format!("Cannot sort by `{}`", field)))?;

        let direction = match direction.as_str().map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => return Err(AppError::invalid("orderBy", "Sort direction must be \"asc\" or \"desc\"")),
        };

        Ok(ProjectOrder { column, direction })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_bound(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    non_empty(value)
        .map(|v| {
            parse_project_date(&v)
                .ok_or_else(|| AppError::invalid(field, "Date must be YYYY-MM-DD or an RFC 3339 timestamp"))
        })
        .transpose()
}

impl TryFrom<ProjectListQuery> for ProjectFilter {
    type Error = AppError;

    fn try_from(query: ProjectListQuery) -> Result<Self, Self::Error> {
        if query.skip.is_some_and(|s| s < 0) {
            return Err(AppError::invalid("skip", "skip must not be negative"));
        }
        if query.take.is_some_and(|t| t < 0) {
            return Err(AppError::invalid("take", "take must not be negative"));
        }

        let order = match non_empty(query.order_by) {
            Some(raw) => ProjectOrder::parse(&raw)?,
            None => ProjectOrder::default(),
        };

        Ok(ProjectFilter {
            skip: query.skip,
            take: query.take,
            featured: non_empty(query.featured).map(|v| v == "true"),
            status: non_empty(query.status),
            search: non_empty(query.search),
            start_date: parse_bound("startDate", query.start_date)?,
            end_date: parse_bound("endDate", query.end_date)?,
            order,
        })
    }
}
