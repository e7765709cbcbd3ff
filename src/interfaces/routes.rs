use actix_web::web;

use crate::{constants::API_PREFIX, handlers::home::home};

mod projects;
mod system;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(system::config_routes)
            .configure(projects::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
