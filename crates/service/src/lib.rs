//! Service layer: the singleton content store and user CRUD over the
//! MongoDB collections defined in `models`.
//! - Every driver error is reclassified into [`errors::ServiceError`]
//!   before it crosses the crate boundary.
//! - Services hold a collection handle each and keep no other state.

pub mod errors;
pub mod singleton;
pub mod user_service;

#[cfg(test)]
pub mod test_support;
