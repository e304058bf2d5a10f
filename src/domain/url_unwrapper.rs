//! Trait for turning caller input into the canonical target to store.

use crate::error::AppError;

/// Resolves an input string to the target an alias should point at.
///
/// Called exactly once per allocation request. Implementations that do not
/// resolve anything return the input unchanged.
///
/// # Implementations
///
/// - [`crate::utils::url_unwrapper::IdentityUnwrapper`] - no resolution
/// - [`crate::utils::url_unwrapper::NormalizingUnwrapper`] - offline URL canonicalization
#[cfg_attr(test, mockall::automock)]
pub trait UrlUnwrapper: Send + Sync {
    /// Returns the canonical target for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input cannot be turned into a target.
    fn resolve(&self, input: &str) -> Result<String, AppError>;
}
