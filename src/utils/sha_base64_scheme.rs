//! SHA-256 + URL-safe base64 hash scheme.

use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::domain::hash_scheme::HashScheme;

/// Length used when no preference is configured.
pub const DEFAULT_PREFERRED_LENGTH: usize = 4;

/// Length of an unpadded base64 encoding of a SHA-256 digest.
pub const MAX_PREFERRED_LENGTH: usize = 43;

/// Derives aliases from the SHA-256 digest of the target.
///
/// The digest is encoded as URL-safe base64 without padding, so every
/// character is in the RFC 3986 unreserved set, then truncated to the
/// preferred length. Attempt `0` hashes the target alone; later attempts also
/// hash the attempt number, which gives an independent candidate per attempt.
#[derive(Debug, Clone)]
pub struct Sha256Base64Scheme {
    preferred_length: usize,
}

impl Sha256Base64Scheme {
    /// Creates a scheme producing aliases of `preferred_length` characters.
    ///
    /// The length is clamped to `1..=43`.
    pub fn new(preferred_length: usize) -> Self {
        Self {
            preferred_length: preferred_length.clamp(1, MAX_PREFERRED_LENGTH),
        }
    }

    pub fn preferred_length(&self) -> usize {
        self.preferred_length
    }
}

impl Default for Sha256Base64Scheme {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERRED_LENGTH)
    }
}

impl HashScheme for Sha256Base64Scheme {
    fn derive_key_at(&self, target: &str, attempt: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(target.as_bytes());
        if attempt > 0 {
            hasher.update(attempt.to_le_bytes());
        }
        let digest = hasher.finalize();

        let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        encoded.truncate(self.preferred_length);
        encoded
    }
}
