//! Utility functions for alias hashing, validation and URL processing.
//!
//! - [`alias_validator`] - Custom alias format rules
//! - [`sha_base64_scheme`] - Default [`crate::domain::hash_scheme::HashScheme`]
//! - [`url_normalizer`] - Offline URL canonicalization
//! - [`url_unwrapper`] - [`crate::domain::url_unwrapper::UrlUnwrapper`] implementations

pub mod alias_validator;
pub mod sha_base64_scheme;
pub mod url_normalizer;
pub mod url_unwrapper;
