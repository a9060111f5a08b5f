pub mod index;
pub mod progress;

use axum::{http::Uri, routing::get, Router};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/progress", get(progress::progress_handler))
        .fallback(not_found)
        .with_state(state)
}
