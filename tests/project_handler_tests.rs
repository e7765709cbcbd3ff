
use std::sync::Arc;

use mockall::predicate::eq;
use portfolio_projects_api::{
    entities::{
        option_fields::OptionField,
        project::{
            BulkProjectIdsRequest, BulkStatusRequest, NewProjectRequest, ReorderProjectsRequest,
            UpdateProjectRequest,
        },
        project_query::{ProjectListQuery, ProjectSortColumn, SortDirection},
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::projects::ProjectHandler,
};
use serde_json::json;
use test_utils::{row_from_insert, sample_row, MockProjectRepo};
use uuid::Uuid;

fn handler(repo: MockProjectRepo) -> ProjectHandler<dyn ProjectRepository> {
    ProjectHandler::new(Arc::new(repo))
}

fn new_project(body: serde_json::Value) -> NewProjectRequest {
    serde_json::from_value(body).unwrap()
}

fn update(body: serde_json::Value) -> UpdateProjectRequest {
    serde_json::from_value(body).unwrap()
}

fn validation_fields(err: AppError) -> Vec<String> {
    match err {
        AppError::ValidationError(fields) => fields.into_iter().map(|f| f.field).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ───── create ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_encodes_collections_and_returns_decoded_project() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_insert_project()
        .withf(|insert| {
            insert.tags == r#"["Rust","Web"]"#
                && insert.technologies == "[]"
                && insert.metrics.as_deref() == Some(r#"{"users":5}"#)
                && insert.display_order == 0
                && !insert.featured
        })
        .times(1)
        .returning(move |insert| Ok(row_from_insert(id, insert)));

    let project = handler(repo)
        .create_project(new_project(json!({
            "title": "Portfolio Website",
            "description": "Personal site",
            "tags": ["Rust", "Web"],
            "metrics": { "users": 5 },
            "startDate": "2023-01-01"
        })))
        .await
        .unwrap();

    assert_eq!(project.id, id);
    assert_eq!(project.tags, vec!["Rust", "Web"]);
    assert!(project.technologies.is_empty());
    assert_eq!(project.metrics.unwrap()["users"], 5);
    assert_eq!(project.start_date.unwrap().to_string(), "2023-01-01");
    assert_eq!(project.end_date, None);
}

#[tokio::test]
async fn create_rejects_invalid_input_without_touching_storage() {
    let mut repo = MockProjectRepo::new();
    repo.expect_insert_project().times(0);

    let err = handler(repo)
        .create_project(new_project(json!({
            "title": "   ",
            "description": "x",
            "demoUrl": "ftp://example.com",
            "teamSize": 0
        })))
        .await
        .unwrap_err();

    let fields = validation_fields(err);
    assert!(fields.contains(&"title".to_string()));
    assert!(fields.contains(&"demoUrl".to_string()));
    assert!(fields.contains(&"teamSize".to_string()));
}

// ───── list ─────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_page_and_total() {
    let mut repo = MockProjectRepo::new();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

    repo.expect_list_projects()
        .withf(|filter| {
            filter.take == Some(2)
                && filter.featured == Some(true)
                && filter.order.column == ProjectSortColumn::Title
                && filter.order.direction == SortDirection::Desc
        })
        .returning(move |_| Ok(vec![sample_row(a), sample_row(b)]));
    repo.expect_count_projects()
        .withf(|filter| filter.take == Some(2))
        .returning(|_| Ok(7));

    let response = handler(repo)
        .list_projects(ProjectListQuery {
            take: Some(2),
            featured: Some("true".into()),
            order_by: Some(r#"{"title":"desc"}"#.into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.total, 7);
    let ids: Vec<_> = response.data.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(response.data[0].tags, vec!["Featured", "Security"]);
}

#[tokio::test]
async fn list_rejects_unknown_sort_field() {
    let mut repo = MockProjectRepo::new();
    repo.expect_list_projects().times(0);
    repo.expect_count_projects().times(0);

    let err = handler(repo)
        .list_projects(ProjectListQuery {
            order_by: Some(r#"{"secret":"asc"}"#.into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(validation_fields(err), vec!["orderBy"]);
}

#[tokio::test]
async fn list_fails_when_a_row_is_corrupted() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_list_projects().returning(move |_| {
        let mut row = sample_row(id);
        row.highlights = "not json".into();
        Ok(vec![row])
    });
    repo.expect_count_projects().returning(|_| Ok(1));

    let err = handler(repo)
        .list_projects(ProjectListQuery::default())
        .await
        .unwrap_err();

    match err {
        AppError::InternalError(msg) => assert!(msg.contains("highlights"), "{msg}"),
        other => panic!("expected internal error, got {other:?}"),
    }
}

// ───── get ──────────────────────────────────────────────────────────

#[tokio::test]
async fn get_decodes_every_encoded_field() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_get_project_by_id()
        .with(eq(id))
        .returning(move |_| Ok(sample_row(id)));

    let project = handler(repo).get_project(&id).await.unwrap();

    assert_eq!(project.technologies, vec!["React", "WebRTC"]);
    assert_eq!(project.challenges, vec!["Implementing end-to-end encryption"]);
    assert!(project.media.is_empty());
    assert_eq!(project.sections[0]["title"], "Security Features");
    assert_eq!(project.order, 3);
}

#[tokio::test]
async fn get_missing_project_is_not_found() {
    let mut repo = MockProjectRepo::new();
    repo.expect_get_project_by_id()
        .returning(|_| Err(AppError::NotFound("Project not found".into())));

    let err = handler(repo).get_project(&Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ───── update ───────────────────────────────────────────────────────

#[tokio::test]
async fn update_touches_only_supplied_fields() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_project_exists().with(eq(id)).returning(|_| Ok(true));
    repo.expect_update_project()
        .withf(move |target, changes| {
            *target == id
                && changes.title.is_none()
                && changes.tags.as_deref() == Some(r#"["A"]"#)
                && changes.metrics == OptionField::SetToNull
                && changes.subtitle == OptionField::Unchanged
        })
        .times(1)
        .returning(move |_, _| {
            let mut row = sample_row(id);
            row.tags = r#"["A"]"#.into();
            row.metrics = None;
            Ok(row)
        });

    let project = handler(repo)
        .update_project(&id, update(json!({ "tags": ["A"], "metrics": null })))
        .await
        .unwrap();

    assert_eq!(project.tags, vec!["A"]);
    assert_eq!(project.metrics, None);
    assert_eq!(project.title, "Noctis Echo");
}

#[tokio::test]
async fn update_of_missing_project_is_not_found() {
    let mut repo = MockProjectRepo::new();
    repo.expect_project_exists().returning(|_| Ok(false));
    repo.expect_update_project().times(0);

    let err = handler(repo)
        .update_project(&Uuid::new_v4(), update(json!({ "title": "New" })))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn empty_update_returns_current_project_without_writing() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_project_exists().returning(|_| Ok(true));
    repo.expect_update_project().times(0);
    repo.expect_get_project_by_id()
        .times(1)
        .returning(move |_| Ok(sample_row(id)));

    let project = handler(repo)
        .update_project(&id, update(json!({})))
        .await
        .unwrap();

    assert_eq!(project.id, id);
}

#[tokio::test]
async fn update_rejects_null_on_required_fields() {
    let mut repo = MockProjectRepo::new();
    repo.expect_project_exists().times(0);
    repo.expect_update_project().times(0);

    let err = handler(repo)
        .update_project(&Uuid::new_v4(), update(json!({ "tags": null })))
        .await
        .unwrap_err();

    assert_eq!(validation_fields(err), vec!["tags"]);
}

// ───── delete / toggle ──────────────────────────────────────────────

#[tokio::test]
async fn delete_propagates_not_found() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_delete_project()
        .with(eq(id))
        .returning(|id| Err(AppError::NotFound(format!("Project with ID {id} not found"))));

    let err = handler(repo).delete_project(&id).await.unwrap_err();
    assert!(err.to_string().contains(&id.to_string()));
}

#[tokio::test]
async fn toggle_featured_returns_flipped_project() {
    let mut repo = MockProjectRepo::new();
    let id = Uuid::new_v4();

    repo.expect_toggle_featured().with(eq(id)).returning(move |_| {
        let mut row = sample_row(id);
        row.featured = false;
        Ok(row)
    });

    let project = handler(repo).toggle_featured(&id).await.unwrap();
    assert!(!project.featured);
}

// ───── reorder ──────────────────────────────────────────────────────

#[tokio::test]
async fn reorder_passes_ids_in_request_order() {
    let mut repo = MockProjectRepo::new();
    let ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let expected = ids.clone();

    repo.expect_reorder_projects()
        .withf(move |given: &[Uuid]| given == expected.as_slice())
        .times(1)
        .returning(|_| Ok(()));

    let updated = handler(repo)
        .reorder_projects(ReorderProjectsRequest {
            project_ids: ids.iter().map(Uuid::to_string).collect(),
        })
        .await
        .unwrap();

    assert_eq!(updated, 3);
}

#[tokio::test]
async fn reorder_with_no_ids_is_a_no_op() {
    let mut repo = MockProjectRepo::new();
    repo.expect_reorder_projects().times(0);

    let updated = handler(repo)
        .reorder_projects(ReorderProjectsRequest { project_ids: vec![] })
        .await
        .unwrap();

    assert_eq!(updated, 0);
}

#[tokio::test]
async fn reorder_rejects_duplicate_ids() {
    let mut repo = MockProjectRepo::new();
    repo.expect_reorder_projects().times(0);
    let id = Uuid::new_v4().to_string();

    let err = handler(repo)
        .reorder_projects(ReorderProjectsRequest { project_ids: vec![id.clone(), id] })
        .await
        .unwrap_err();

    assert_eq!(validation_fields(err), vec!["projectIds"]);
}

#[tokio::test]
async fn reorder_with_unknown_id_surfaces_not_found() {
    let mut repo = MockProjectRepo::new();
    repo.expect_reorder_projects()
        .returning(|_| Err(AppError::NotFound("Project not found".into())));

    let err = handler(repo)
        .reorder_projects(ReorderProjectsRequest { project_ids: vec![Uuid::new_v4().to_string()] })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn reorder_with_unparseable_id_is_not_found_and_writes_nothing() {
    let mut repo = MockProjectRepo::new();
    repo.expect_reorder_projects().times(0);

    let err = handler(repo)
        .reorder_projects(ReorderProjectsRequest {
            project_ids: vec![Uuid::new_v4().to_string(), "nonexistent-id".into()],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("nonexistent-id")));
}

// ───── bulk ─────────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_delete_reports_rows_removed() {
    let mut repo = MockProjectRepo::new();
    repo.expect_bulk_delete_projects()
        .withf(|ids: &[Uuid]| ids.len() == 3)
        .returning(|_| Ok(2));

    let deleted = handler(repo)
        .bulk_delete(BulkProjectIdsRequest {
            ids: (0..3).map(|_| Uuid::new_v4().to_string()).collect(),
        })
        .await
        .unwrap();

    assert_eq!(deleted, 2);
}

#[tokio::test]
async fn bulk_delete_skips_ids_that_name_no_project() {
    let mut repo = MockProjectRepo::new();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

    repo.expect_bulk_delete_projects()
        .withf(move |ids: &[Uuid]| ids == [a, b])
        .times(1)
        .returning(|ids| Ok(ids.len() as u64));

    let deleted = handler(repo)
        .bulk_delete(BulkProjectIdsRequest {
            ids: vec![a.to_string(), b.to_string(), "nonexistent-id".into()],
        })
        .await
        .unwrap();

    assert_eq!(deleted, 2);
}

#[tokio::test]
async fn bulk_ops_with_no_usable_ids_skip_the_database() {
    let mut repo = MockProjectRepo::new();
    repo.expect_bulk_delete_projects().times(0);
    repo.expect_bulk_update_status().times(0);
    let service = handler(repo);

    let deleted = service
        .bulk_delete(BulkProjectIdsRequest { ids: vec!["nonexistent-id".into()] })
        .await
        .unwrap();
    assert_eq!(deleted, 0);

    let updated = service
        .bulk_update_status(BulkStatusRequest { ids: vec![], status: "Archived".into() })
        .await
        .unwrap();
    assert_eq!(updated, 0);
}

#[tokio::test]
async fn bulk_status_sets_given_status() {
    let mut repo = MockProjectRepo::new();
    repo.expect_bulk_update_status()
        .withf(|ids: &[Uuid], status: &str| ids.len() == 1 && status == "Archived")
        .returning(|_, _| Ok(1));

    let updated = handler(repo)
        .bulk_update_status(BulkStatusRequest {
            ids: vec![Uuid::new_v4().to_string()],
            status: "Archived".into(),
        })
        .await
        .unwrap();

    assert_eq!(updated, 1);
}

#[tokio::test]
async fn bulk_status_rejects_blank_status() {
    let mut repo = MockProjectRepo::new();
    repo.expect_bulk_update_status().times(0);

    let err = handler(repo)
        .bulk_update_status(BulkStatusRequest {
            ids: vec![Uuid::new_v4().to_string()],
            status: "  ".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(validation_fields(err), vec!["status"]);
}
