pub mod admin_handler;
pub mod health_handler;
pub mod user_handler;

use std::sync::Arc;

use actix_web::web;

use crate::{app_state::AppState, errors::AppError};

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Registers shared state and every route under the API mount points.
pub fn register(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.clone()))
        .app_data(web::Data::from(Arc::clone(&state.jwt_service)))
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
        )
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(
            web::scope("/api/v1/admin")
                .service(admin_handler::signup)
                .service(admin_handler::signin)
                .service(admin_handler::create_course)
                .service(admin_handler::update_course)
                .service(admin_handler::list_courses),
        )
        .service(
            web::scope("/api/v1/user")
                .service(user_handler::signup)
                .service(user_handler::signin)
                .service(user_handler::preview)
                .service(user_handler::purchase)
                .service(user_handler::purchases),
        );
}
