use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;
use service::singleton::SingletonStore;
use service::user_service::UserService;

pub mod content;
pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn content_router(store: SingletonStore) -> Router {
    Router::new()
        .route("/", get(content::fetch_content).put(content::update_content))
        .with_state(store)
}

fn users_router(users: UserService) -> Router {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/buscar", get(users::search))
        .route("/:id", put(users::update).delete(users::delete))
        .with_state(users)
}

/// Build the full application router: health, both content singletons, and
/// the user CRUD surface the admin panel consumes.
pub fn build_router(
    users: UserService,
    about: SingletonStore,
    settings: SingletonStore,
    cors: CorsLayer,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/nosotros", content_router(about))
        .nest("/api/configuracion", content_router(settings))
        .nest("/api/admin/crud/usuarios", users_router(users))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
