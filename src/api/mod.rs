use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Environment;
use crate::dalle::DalleClient;
use crate::db::PostRepo;

pub mod handlers;
pub mod models;

/// CORS origin served to production frontends.
pub const PRODUCTION_ORIGIN: &str = "your-frontend-domain.com";
/// CORS origin for local frontend development (Vite default port).
pub const DEVELOPMENT_ORIGIN: &str = "http://localhost:5173";

/// JSON bodies above this size are rejected with 413 before reaching any
/// handler. Generated images travel as base64 strings, hence the large cap.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared handler state, built once in the composition root.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostRepo>,
    pub dalle: Arc<DalleClient>,
}

fn cors_layer(environment: Environment) -> CorsLayer {
    let origin = match environment {
        Environment::Production => PRODUCTION_ORIGIN,
        Environment::Development => DEVELOPMENT_ORIGIN,
    };

    CorsLayer::new()
        .allow_origin(HeaderValue::from_static(origin))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_posts).post(handlers::create_post))
        .route(
            "/:id",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
}

fn dalle_routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::generate_image))
}

pub fn create_router(state: AppState, environment: Environment) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1/post", post_routes())
        .nest("/api/v1/dalle", dalle_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(environment))
}
