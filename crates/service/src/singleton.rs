use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::info;

use crate::errors::ServiceError;

/// Store over a collection that holds at most one document, addressed
/// without a caller-supplied id. Backs the `Nosotros` and `Configuracion`
/// content collections.
#[derive(Clone)]
pub struct SingletonStore {
    coll: Collection<Document>,
    kind: String,
}

impl SingletonStore {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self { coll: db.collection(collection), kind: collection.to_string() }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.coll
    }

    /// Fetch the sole document. An empty collection is `NotFound`;
    /// existence is maintained by seeding, never by this store.
    pub async fn fetch(&self) -> Result<Document, ServiceError> {
        self.coll
            .find_one(doc! {})
            .await?
            .ok_or_else(|| ServiceError::not_found(&self.kind))
    }

    /// Field-level merge onto whichever document exists. Top-level fields
    /// present in `fields` replace the stored ones; everything else is left
    /// untouched. Never inserts and never deletes.
    pub async fn merge_update(&self, fields: Document) -> Result<Document, ServiceError> {
        let fields = strip_id(fields);
        if fields.is_empty() {
            // MongoDB rejects an empty $set; an empty merge is just a read.
            return self.fetch().await;
        }
        let updated = self
            .coll
            .find_one_and_update(doc! {}, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?;
        updated.ok_or_else(|| ServiceError::not_found(&self.kind))
    }

    /// Out-of-band creation path: insert `default_doc` only when the
    /// collection is empty. Returns whether a document was inserted.
    pub async fn seed_if_empty(&self, default_doc: Document) -> Result<bool, ServiceError> {
        if self.coll.count_documents(doc! {}).await? > 0 {
            return Ok(false);
        }
        self.coll.insert_one(strip_id(default_doc)).await?;
        info!(collection = %self.kind, "seeded singleton document");
        Ok(true)
    }
}

/// The admin panel round-trips the whole document, id included; the merge
/// must never target or rewrite `_id`.
pub fn strip_id(mut fields: Document) -> Document {
    fields.remove("_id");
    fields
}
