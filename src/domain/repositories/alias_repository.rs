//! Repository trait for alias storage.

use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store mapping alias → target.
///
/// Backends are interchangeable; the allocator only ever sees this trait.
/// Every operation may fail with [`AppError::Internal`] when the backend is
/// unavailable. Such failures are propagated as-is and never retried here.
///
/// # Reverse lookups
///
/// Several aliases may point at the same target. [`Self::get_key`] returns
/// the lowest matching key in byte order, in every backend.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryAliasRepository`] - in-process map, no age gate
/// - [`crate::infrastructure::persistence::PgAliasRepository`] - PostgreSQL table, age-gated removal
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_alias.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Inserts the record for `key`, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn add(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removes the record for `key`.
    ///
    /// Returns `Ok(false)` if no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RemovalLocked`] if the backend is age-gated and the
    /// record is older than its lock age.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn remove(&self, key: &str) -> Result<bool, AppError>;

    /// Checks whether a record exists for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn contains_key(&self, key: &str) -> Result<bool, AppError>;

    /// Checks whether any record points at `value`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn contains_value(&self, value: &str) -> Result<bool, AppError>;

    /// Returns the lowest key whose record points at `value`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has that value.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_key(&self, value: &str) -> Result<String, AppError>;

    /// Returns the target stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `key`.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_value(&self, key: &str) -> Result<String, AppError>;
}
