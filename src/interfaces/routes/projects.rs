use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::post().to(projects::create_project))
                    .route(web::get().to(projects::get_all_projects))
            )
            .service(
                web::resource("/order/update")
                    .route(web::put().to(projects::update_project_order))
            )
            .service(
                web::resource("/bulk/delete")
                    .route(web::post().to(projects::bulk_delete_projects))
            )
            .service(
                web::resource("/bulk/status")
                    .route(web::put().to(projects::bulk_update_status))
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(projects::get_project_by_id))
                    .route(web::put().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
            )
            .service(
                web::resource("/{project_id}/toggle-featured")
                    .route(web::put().to(projects::toggle_featured))
            )
    );
}
