//! Trait for deriving alias candidates from targets.

/// Derives short alias candidates from a target string.
///
/// Implementations must be pure: the same `(target, attempt)` pair always
/// yields the same candidate, and different attempts for the same target
/// yield different candidates with overwhelming probability.
///
/// # Implementations
///
/// - [`crate::utils::sha_base64_scheme::Sha256Base64Scheme`] - SHA-256 digest, URL-safe base64
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait HashScheme: Send + Sync {
    /// Derives the candidate for `attempt`, a zero-based permutation index
    /// used after a collision.
    fn derive_key_at(&self, target: &str, attempt: u32) -> String;

    /// Derives the first candidate for `target`.
    fn derive_key(&self, target: &str) -> String {
        self.derive_key_at(target, 0)
    }
}
