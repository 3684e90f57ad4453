use mongodb::{Client, Database};
use once_cell::sync::Lazy;
use std::env;
use tracing::warn;

pub static MONGODB_URI: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
});

pub static MONGODB_DB: Lazy<String> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    env::var("MONGODB_DB").unwrap_or_else(|_| "patitas".to_string())
});

/// Resolve the database settings: config.toml first, env vars as fallback.
pub fn resolve_config() -> configs::DatabaseConfig {
    if let Ok(mut cfg) = configs::load_default() {
        cfg.database.normalize_from_env();
        match cfg.database.validate() {
            Ok(()) => return cfg.database,
            Err(e) => {
                warn!(error = %e, "config.toml database section invalid, falling back to env")
            }
        }
    }
    configs::DatabaseConfig { uri: MONGODB_URI.clone(), name: MONGODB_DB.clone() }
}

/// Connect once at startup; the returned handle is cheap to clone per request.
pub async fn connect() -> anyhow::Result<Database> {
    let cfg = resolve_config();
    let client = Client::with_uri_str(&cfg.uri).await?;
    Ok(client.database(&cfg.name))
}
