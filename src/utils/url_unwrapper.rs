//! [`UrlUnwrapper`] implementations.

use serde_json::json;
use std::sync::Arc;

use crate::domain::url_unwrapper::UrlUnwrapper;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;

/// Stores targets exactly as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityUnwrapper;

impl UrlUnwrapper for IdentityUnwrapper {
    fn resolve(&self, input: &str) -> Result<String, AppError> {
        Ok(input.to_string())
    }
}

/// Canonicalizes targets with [`normalize_url`] before they are stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizingUnwrapper;

impl UrlUnwrapper for NormalizingUnwrapper {
    fn resolve(&self, input: &str) -> Result<String, AppError> {
        normalize_url(input).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })
    }
}

/// Picks the unwrapper matching the `RESOLVE_URLS` setting.
pub fn unwrapper_for(resolve_urls: bool) -> Arc<dyn UrlUnwrapper> {
    if resolve_urls {
        Arc::new(NormalizingUnwrapper)
    } else {
        Arc::new(IdentityUnwrapper)
    }
}
