use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use models::content::{ABOUT_COLLECTION, SETTINGS_COLLECTION};
use service::singleton::SingletonStore;
use service::user_service::UserService;

use crate::routes;

fn init_logging() {
    init_logging_default();
}

// The admin panel is served from a different origin.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(5000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // One process-wide connection, injected into every service handle.
    let db = models::db::connect().await?;
    let users = UserService::new(&db);
    let about = SingletonStore::new(&db, ABOUT_COLLECTION);
    let settings = SingletonStore::new(&db, SETTINGS_COLLECTION);

    let cors = build_cors();
    let app: Router = routes::build_router(users, about, settings, cors);

    let addr = load_bind_addr()?;
    info!(%addr, "starting patitas admin api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
