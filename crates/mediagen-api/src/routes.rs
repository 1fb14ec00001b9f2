//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::health::{health, root};
use crate::handlers::images::{edit_image, generate_image};
use crate::handlers::videos::{
    create_video, create_video_with_reference, download_video, get_video_status, remix_video,
};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let image_routes = Router::new()
        .route("/images/generate", post(generate_image))
        .route("/images/edit", post(edit_image));

    let video_routes = Router::new()
        .route("/videos/generate", post(create_video))
        .route(
            "/videos/generate-with-reference",
            post(create_video_with_reference),
        )
        .route("/videos/jobs/:job_id/status", get(get_video_status))
        .route("/videos/jobs/:job_id/download", get(download_video))
        .route("/videos/remix", post(remix_video));

    let api_routes = Router::new().merge(image_routes).merge(video_routes);

    let health_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
