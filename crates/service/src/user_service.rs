use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::info;

use models::user::{NewUser, UpdateUser, User, COLLECTION};

use crate::errors::ServiceError;

/// CRUD over the `usuarios` collection, plus search by email.
#[derive(Clone)]
pub struct UserService {
    coll: Collection<User>,
}

impl UserService {
    pub fn new(db: &Database) -> Self {
        Self { coll: db.collection(COLLECTION) }
    }

    /// Bind to a specific collection. Tests use this to isolate runs.
    pub fn with_collection(coll: Collection<User>) -> Self {
        Self { coll }
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.coll
    }

    /// All accounts, storage order.
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.coll.find(doc! {}).await?.try_collect().await?;
        Ok(users)
    }

    /// Case-insensitive substring match on email. An empty pattern lists
    /// everything, matching the panel's cleared search box.
    pub async fn search_by_email(&self, pattern: &str) -> Result<Vec<User>, ServiceError> {
        if pattern.is_empty() {
            return self.list().await;
        }
        let filter = doc! { "email": { "$regex": escape_regex(pattern), "$options": "i" } };
        let users = self.coll.find(filter).await?.try_collect().await?;
        Ok(users)
    }

    pub async fn get(&self, id: &str) -> Result<Option<User>, ServiceError> {
        let oid = parse_id(id)?;
        let found = self.coll.find_one(doc! { "_id": oid }).await?;
        Ok(found)
    }

    pub async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        input.validate()?;
        let mut user = input.into_user();
        let inserted = self.coll.insert_one(&user).await?;
        user.id = inserted.inserted_id.as_object_id();
        info!(email = %user.email, "created user");
        Ok(user)
    }

    /// Apply the provided fields to one account. The `$set` payload comes
    /// from [`UpdateUser::set_document`], which drops an absent or empty
    /// password, so an edit form that leaves it blank never clears it.
    pub async fn update(&self, id: &str, input: UpdateUser) -> Result<User, ServiceError> {
        let oid = parse_id(id)?;
        let set = input.set_document();
        if set.is_empty() {
            return self
                .coll
                .find_one(doc! { "_id": oid })
                .await?
                .ok_or_else(|| ServiceError::not_found("usuario"));
        }
        self.coll
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ServiceError::not_found("usuario"))
    }

    /// Permanent removal; there is no soft delete.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let oid = parse_id(id)?;
        let result = self.coll.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(ServiceError::not_found("usuario"));
        }
        info!(%id, "deleted user");
        Ok(())
    }
}

/// Malformed ids classify as storage failures, mirroring the original
/// backend's driver cast errors, not as a missing record.
fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id).map_err(|e| ServiceError::Storage(format!("invalid id {}: {}", id, e)))
}

/// Escape regex metacharacters so the search pattern matches literally.
fn escape_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if r"\.^$|?*+()[]{}".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
