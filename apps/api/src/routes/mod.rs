pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::cv::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/parse", post(handlers::handle_parse))
        .route("/api/v1/cv/validate", post(handlers::handle_validate))
        .fallback(not_found)
        .with_state(state)
}
