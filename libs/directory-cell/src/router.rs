use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::DirectoryService;

pub fn directory_routes(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/doctors", get(handlers::list_doctors))
        .route("/specialties", get(handlers::list_specialties))
        .route("/suggestions", get(handlers::get_suggestions))
        .route("/filters", get(handlers::get_filter_panel))
        .route("/criteria", post(handlers::apply_criteria_event))
        .route("/status", get(handlers::get_load_status))
        .route("/reload", post(handlers::reload_doctors))
        .with_state(service)
}
