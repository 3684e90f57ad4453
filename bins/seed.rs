//! Out-of-band seeding of the singleton content collections. The API never
//! creates these documents; run this once against a fresh database.

use dotenvy::dotenv;
use mongodb::bson;
use tracing::info;

use models::content::{self, ABOUT_COLLECTION, SETTINGS_COLLECTION};
use service::singleton::SingletonStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let db = models::db::connect().await?;

    let about = SingletonStore::new(&db, ABOUT_COLLECTION);
    let about_doc = bson::to_document(&content::AboutPage::seed())?;
    let inserted = about.seed_if_empty(about_doc).await?;
    info!(collection = ABOUT_COLLECTION, inserted, "about-page seed");

    let settings = SingletonStore::new(&db, SETTINGS_COLLECTION);
    let inserted = settings.seed_if_empty(content::settings_seed()).await?;
    info!(collection = SETTINGS_COLLECTION, inserted, "site-settings seed");

    Ok(())
}
