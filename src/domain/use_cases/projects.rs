use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        project::{
            known_project_ids, BulkProjectIdsRequest, BulkStatusRequest, NewProjectRequest,
            Project, ProjectChanges, ProjectInsert, ProjectListResponse, ProjectRow,
            ReorderProjectsRequest, UpdateProjectRequest,
        },
        project_query::{ProjectFilter, ProjectListQuery},
    },
    errors::AppError,
    repositories::project::{project_not_found, ProjectRepository},
    utils::valid_uuid::valid_uuid,
};

/// Project service. Requests come in with native lists and objects, rows go
/// out to the repository encoded, and every row read back is decoded before
/// it is returned.
pub struct ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub project_repo: Arc<R>,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub fn new(project_repo: Arc<R>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Creates a project, applying defaults for omitted fields
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        let row = self.project_repo.insert_project(&insert).await?;

        tracing::info!(project_id = %row.id, title = %row.title, "Project created");
        decode(row)
    }

    /// Lists one page of projects plus the total number of matches
    pub async fn list_projects(&self, query: ProjectListQuery) -> Result<ProjectListResponse, AppError> {
        let filter = ProjectFilter::try_from(query)?;

        let (rows, total) = futures::try_join!(
            self.project_repo.list_projects(&filter),
            self.project_repo.count_projects(&filter),
        )?;

        let data = rows
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProjectListResponse { data, total })
    }

    /// Retrieves a project by its ID
    pub async fn get_project(&self, id: &Uuid) -> Result<Project, AppError> {
        let row = self.project_repo.get_project_by_id(id).await?;
        decode(row)
    }

    /// Applies a partial update. Only fields present in the request change.
    pub async fn update_project(
        &self,
        id: &Uuid,
        request: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let changes = ProjectChanges::try_from(request)?;

        // Not atomic with the write; a delete in between surfaces as
        // NotFound from `update_project` below.
        if !self.project_repo.project_exists(id).await? {
            return Err(project_not_found(id));
        }

        if changes.is_empty() {
            return self.get_project(id).await;
        }

        let row = self.project_repo.update_project(id, &changes).await?;
        decode(row)
    }

    /// Permanently deletes a project
    pub async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        self.project_repo.delete_project(id).await?;
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    /// Rewrites `order` to match the given sequence, all or nothing
    pub async fn reorder_projects(&self, request: ReorderProjectsRequest) -> Result<usize, AppError> {
        request.validate()?;

        if request.project_ids.is_empty() {
            return Ok(0);
        }

        // An id that cannot be parsed matches no row, which fails the whole reorder.
        let ids = request.project_ids
            .iter()
            .map(|id| valid_uuid(id))
            .collect::<Result<Vec<_>, _>>()?;

        self.project_repo.reorder_projects(&ids).await?;
        tracing::info!(count = ids.len(), "Project order updated");

        Ok(ids.len())
    }

    /// Flips `featured` and returns the updated project
    pub async fn toggle_featured(&self, id: &Uuid) -> Result<Project, AppError> {
        let row = self.project_repo.toggle_featured(id).await?;
        decode(row)
    }

    /// Deletes every listed project; unknown ids are ignored
    pub async fn bulk_delete(&self, request: BulkProjectIdsRequest) -> Result<u64, AppError> {
        let ids = known_project_ids(&request.ids);
        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = self.project_repo.bulk_delete_projects(&ids).await?;
        tracing::info!(requested = request.ids.len(), deleted, "Bulk project delete");
        Ok(deleted)
    }

    /// Sets `status` on every listed project; unknown ids are ignored
    pub async fn bulk_update_status(&self, request: BulkStatusRequest) -> Result<u64, AppError> {
        request.validate()?;

        let ids = known_project_ids(&request.ids);
        if ids.is_empty() {
            return Ok(0);
        }

        let updated = self.project_repo
            .bulk_update_status(&ids, &request.status)
            .await?;
        tracing::info!(requested = request.ids.len(), updated, status = %request.status, "Bulk status update");
        Ok(updated)
    }
}

fn decode(row: ProjectRow) -> Result<Project, AppError> {
    Project::try_from(row)
}
