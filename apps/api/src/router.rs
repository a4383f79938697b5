use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use directory_cell::{directory_routes, DirectoryService};

pub fn create_router(directory: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctor Directory API is running!" }))
        .nest("/directory", directory_routes(directory))
}
