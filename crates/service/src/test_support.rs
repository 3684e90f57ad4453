#![cfg(test)]
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// Connect to the test database with a short selection timeout and ping it,
/// so tests can skip quickly when no MongoDB is reachable.
pub async fn get_db() -> Result<Database, anyhow::Error> {
    let uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mut opts = ClientOptions::parse(&uri).await?;
    opts.server_selection_timeout = Some(Duration::from_secs(2));
    let client = Client::with_options(opts)?;
    let db = client.database("patitas_test");
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}
