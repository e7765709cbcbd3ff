use std::fmt::Display;

use async_trait::async_trait;
use sqlx::{self, query_builder::Separated, Encode, PgPool, Postgres, QueryBuilder, Type};
use uuid::Uuid;

use crate::{
    entities::{
        project::{ProjectChanges, ProjectInsert, ProjectRow},
        project_query::ProjectFilter,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Storage for `projects` rows. Works only with encoded rows; decoding is
/// the use-case layer's job.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert_project(&self, project: &ProjectInsert) -> Result<ProjectRow, AppError>;
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRow>, AppError>;
    async fn count_projects(&self, filter: &ProjectFilter) -> Result<i64, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<ProjectRow, AppError>;
    async fn project_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn update_project(&self, id: &Uuid, changes: &ProjectChanges) -> Result<ProjectRow, AppError>;
    async fn toggle_featured(&self, id: &Uuid) -> Result<ProjectRow, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
    /// Sets `display_order` to each id's index in one transaction.
    async fn reorder_projects(&self, ids: &[Uuid]) -> Result<(), AppError>;
    async fn bulk_delete_projects(&self, ids: &[Uuid]) -> Result<u64, AppError>;
    async fn bulk_update_status(&self, ids: &[Uuid], status: &str) -> Result<u64, AppError>;
    async fn delete_all_projects(&self) -> Result<u64, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

pub fn project_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Project with ID {} not found", id))
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn insert_project(&self, project: &ProjectInsert) -> Result<ProjectRow, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (
                title, subtitle, description, image_url, demo_url, github_url,
                tags, technologies, media, challenges, highlights, sections, metrics,
                featured, display_order, duration, status, role, team_size,
                start_date, end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.subtitle)
        .bind(&project.description)
        .bind(&project.image_url)
        .bind(&project.demo_url)
        .bind(&project.github_url)
        .bind(&project.tags)
        .bind(&project.technologies)
        .bind(&project.media)
        .bind(&project.challenges)
        .bind(&project.highlights)
        .bind(&project.sections)
        .bind(&project.metrics)
        .bind(project.featured)
        .bind(project.display_order)
        .bind(&project.duration)
        .bind(&project.status)
        .bind(&project.role)
        .bind(project.team_size)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectRow>, AppError> {
        let rows = build_list_query(filter)
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count_projects(&self, filter: &ProjectFilter) -> Result<i64, AppError> {
        let count: i64 = build_count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<ProjectRow, AppError> {
        sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| project_not_found(id))
    }

    async fn project_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn update_project(&self, id: &Uuid, changes: &ProjectChanges) -> Result<ProjectRow, AppError> {
        build_update_query(id, changes)
            .build_query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| project_not_found(id))
    }

    async fn toggle_featured(&self, id: &Uuid) -> Result<ProjectRow, AppError> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET featured = NOT featured, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(id));
        }

        Ok(())
    }

    async fn reorder_projects(&self, ids: &[Uuid]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for (index, id) in ids.iter().enumerate() {
            let position = i32::try_from(index)
                .map_err(|_| AppError::invalid("projectIds", "Too many projects to reorder"))?;

            let result = sqlx::query(
                "UPDATE projects SET display_order = $1, updated_at = NOW() WHERE id = $2"
            )
            .bind(position)
            .bind(id)
            .execute(&mut *tx)
            .await?;

            // Dropping `tx` without commit rolls every earlier update back.
            if result.rows_affected() == 0 {
                return Err(project_not_found(id));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn bulk_delete_projects(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM projects WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn bulk_update_status(&self, ids: &[Uuid], status: &str) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            "UPDATE projects SET status = $1, updated_at = NOW() WHERE id = ANY($2)"
        )
        .bind(status)
        .bind(ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_all_projects(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ───── Query builders ───────────────────────────────────────────────

/// WHERE clause shared by the page query and the count query so `total`
/// always matches the listed rows.
fn push_filters(builder: &mut QueryBuilder<'static, Postgres>, filter: &ProjectFilter) {
    builder.push(" WHERE TRUE");

    if let Some(featured) = filter.featured {
        builder.push(" AND featured = ").push_bind(featured);
    }
    if let Some(status) = &filter.status {
        builder.push(" AND status = ").push_bind(status.clone());
    }
    if let Some(search) = &filter.search {
        // strpos is case-sensitive and has no LIKE wildcards to escape
        builder.push(" AND (strpos(title, ").push_bind(search.clone());
        builder.push(") > 0 OR strpos(description, ").push_bind(search.clone());
        builder.push(") > 0)");
    }
    if let Some(start_date) = filter.start_date {
        builder.push(" AND start_date >= ").push_bind(start_date);
    }
    if let Some(end_date) = filter.end_date {
        builder.push(" AND end_date <= ").push_bind(end_date);
    }
}

fn build_list_query(filter: &ProjectFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT * FROM projects");
    push_filters(&mut builder, filter);

    builder.push(format_args!(
        " ORDER BY {} {}, id ASC",
        filter.order.column.column_name(),
        filter.order.direction.as_sql()
    ));

    if let Some(take) = filter.take {
        builder.push(" LIMIT ").push_bind(take);
    }
    if let Some(skip) = filter.skip {
        builder.push(" OFFSET ").push_bind(skip);
    }

    builder
}

fn build_count_query(filter: &ProjectFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM projects");
    push_filters(&mut builder, filter);
    builder
}

fn push_assignment<'args, T, Sep>(set: &mut Separated<'_, 'args, Postgres, Sep>, column: &str, value: T)
where
    T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    Sep: Display,
{
    set.push(column).push_unseparated(" = ").push_bind_unseparated(value);
}

fn build_update_query(id: &Uuid, changes: &ProjectChanges) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE projects SET ");

    {
        let mut set = builder.separated(", ");

        if let Some(title) = &changes.title {
            push_assignment(&mut set, "title", title.clone());
        }
        if let Some(subtitle) = changes.subtitle.clone().into_option() {
            push_assignment(&mut set, "subtitle", subtitle);
        }
        if let Some(description) = &changes.description {
            push_assignment(&mut set, "description", description.clone());
        }
        if let Some(image_url) = changes.image_url.clone().into_option() {
            push_assignment(&mut set, "image_url", image_url);
        }
        if let Some(demo_url) = changes.demo_url.clone().into_option() {
            push_assignment(&mut set, "demo_url", demo_url);
        }
        if let Some(github_url) = changes.github_url.clone().into_option() {
            push_assignment(&mut set, "github_url", github_url);
        }

        for (column, encoded) in [
            ("tags", &changes.tags),
            ("technologies", &changes.technologies),
            ("media", &changes.media),
            ("challenges", &changes.challenges),
            ("highlights", &changes.highlights),
            ("sections", &changes.sections),
        ] {
            if let Some(encoded) = encoded {
                push_assignment(&mut set, column, encoded.clone());
            }
        }

        if let Some(metrics) = changes.metrics.clone().into_option() {
            push_assignment(&mut set, "metrics", metrics);
        }
        if let Some(featured) = changes.featured {
            push_assignment(&mut set, "featured", featured);
        }
        if let Some(display_order) = changes.display_order {
            push_assignment(&mut set, "display_order", display_order);
        }
        if let Some(duration) = changes.duration.clone().into_option() {
            push_assignment(&mut set, "duration", duration);
        }
        if let Some(status) = changes.status.clone().into_option() {
            push_assignment(&mut set, "status", status);
        }
        if let Some(role) = changes.role.clone().into_option() {
            push_assignment(&mut set, "role", role);
        }
        if let Some(team_size) = changes.team_size.clone().into_option() {
            push_assignment(&mut set, "team_size", team_size);
        }
        if let Some(start_date) = changes.start_date.clone().into_option() {
            push_assignment(&mut set, "start_date", start_date);
        }
        if let Some(end_date) = changes.end_date.clone().into_option() {
            push_assignment(&mut set, "end_date", end_date);
        }

        set.push("updated_at = NOW()");
    }

    builder.push(" WHERE id = ").push_bind(*id);
    builder.push(" RETURNING *");
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::entities::{
        option_fields::OptionField,
        project_query::{ProjectOrder, ProjectSortColumn, SortDirection},
    };

    #[test]
    fn unfiltered_list_orders_by_display_order() {
        let sql = build_list_query(&ProjectFilter::default()).into_sql();
        assert_eq!(sql, "SELECT * FROM projects WHERE TRUE ORDER BY display_order ASC, id ASC");
    }

    #[test]
    fn list_and_count_share_filters() {
        let filter = ProjectFilter {
            skip: Some(10),
            take: Some(5),
            featured: Some(true),
            status: Some("Completed".into()),
            search: Some("Chat".into()),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            order: ProjectOrder { column: ProjectSortColumn::Title, direction: SortDirection::Desc },
        };

        let where_clause = " WHERE TRUE AND featured = $1 AND status = $2 \
            AND (strpos(title, $3) > 0 OR strpos(description, $4) > 0) \
            AND start_date >= $5 AND end_date <= $6";

        let list = build_list_query(&filter).into_sql();
        assert_eq!(
            list,
            format!("SELECT * FROM projects{where_clause} ORDER BY title DESC, id ASC LIMIT $7 OFFSET $8")
        );

        let count = build_count_query(&filter).into_sql();
        assert_eq!(count, format!("SELECT COUNT(*) FROM projects{where_clause}"));
    }

    #[test]
    fn update_sets_only_present_columns() {
        let changes = ProjectChanges {
            title: Some("New title".into()),
            subtitle: OptionField::SetToNull,
            tags: Some(r#"["Rust"]"#.into()),
            metrics: OptionField::SetToValue(r#"{"users":5}"#.into()),
            featured: Some(true),
            ..Default::default()
        };

        let sql = build_update_query(&Uuid::nil(), &changes).into_sql();
        assert_eq!(
            sql,
            "UPDATE projects SET title = $1, subtitle = $2, tags = $3, metrics = $4, \
             featured = $5, updated_at = NOW() WHERE id = $6 RETURNING *"
        );
    }

    #[test]
    fn empty_update_only_touches_timestamp() {
        let sql = build_update_query(&Uuid::nil(), &ProjectChanges::default()).into_sql();
        assert_eq!(sql, "UPDATE projects SET updated_at = NOW() WHERE id = $1 RETURNING *");
    }
}
