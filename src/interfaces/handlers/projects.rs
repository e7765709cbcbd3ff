use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        project::{
            BulkProjectIdsRequest, BulkStatusRequest, NewProjectRequest, ProjectOrderResponse,
            ReorderProjectsRequest, UpdateProjectRequest,
        },
        project_query::ProjectListQuery,
    },
    errors::AppError,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project_handler = &state.project_handler;

    let project = project_handler
        .create_project(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(state, query))]
pub async fn get_all_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler
        .list_projects(query.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(project_id, state))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&project_id)?;

    let project = state.project_handler.get_project(&id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(project_id, state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&project_id)?;

    let project = state.project_handler
        .update_project(&id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(project_id, state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&project_id)?;

    state.project_handler.delete_project(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, data))]
pub async fn update_project_order(
    state: web::Data<AppState>,
    data: web::Json<ReorderProjectsRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.project_handler
        .reorder_projects(data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ProjectOrderResponse {
        message: "Project order updated successfully".to_string(),
        updated,
    }))
}

#[instrument(skip(project_id, state))]
pub async fn toggle_featured(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&project_id)?;

    let project = state.project_handler.toggle_featured(&id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state, data))]
pub async fn bulk_delete_projects(
    state: web::Data<AppState>,
    data: web::Json<BulkProjectIdsRequest>,
) -> Result<impl Responder, AppError> {
    state.project_handler.bulk_delete(data.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, data))]
pub async fn bulk_update_status(
    state: web::Data<AppState>,
    data: web::Json<BulkStatusRequest>,
) -> Result<impl Responder, AppError> {
    state.project_handler.bulk_update_status(data.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
