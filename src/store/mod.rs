//! Credential storage for the authentication service.
//!
//! This module defines the store abstraction the auth service runs against,
//! plus the Postgres-backed implementation and an in-memory implementation
//! used by tests and local runs.

use async_trait::async_trait;

use crate::error::StoreError;

pub mod memory;
pub mod models;
pub mod postgres;

pub use memory::MemoryCredentialStore;
pub use models::User;
pub use postgres::PgCredentialStore;

/// Durable mapping from username to stored credential record.
///
/// Uniqueness is enforced here: `insert` is conditional and reports
/// `StoreError::Duplicate` when the username is already taken, so callers
/// never need a check-then-insert sequence to be race-free.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Whether a record exists for `username`. Absence is `Ok(false)`,
    /// never an error.
    async fn exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Fetch the record for `username`, or `StoreError::NotFound`.
    async fn get(&self, username: &str) -> Result<User, StoreError>;

    /// Insert a new record. `StoreError::Duplicate` if the username is
    /// already taken.
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
}
