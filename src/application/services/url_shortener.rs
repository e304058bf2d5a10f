//! Alias allocation service.

use std::sync::Arc;

use serde_json::json;

use crate::application::protected_paths::ProtectedPaths;
use crate::domain::hash_scheme::HashScheme;
use crate::domain::repositories::AliasRepository;
use crate::domain::url_unwrapper::UrlUnwrapper;
use crate::error::AppError;
use crate::utils::alias_validator::{AliasValidationError, leading_segment, validate_alias_format};

/// Number of hash attempts made before allocation gives up.
pub const MAXIMUM_HASH_ATTEMPTS: u32 = 500;

/// Allocates aliases for targets and reserves custom aliases.
///
/// Repository calls are made one after another within a request. Nothing
/// here makes the check-then-insert sequences atomic across concurrent
/// requests: two racing requests for the same key both pass the existence
/// check and the later `add` wins.
pub struct UrlShortener {
    repository: Arc<dyn AliasRepository>,
    hash_scheme: Arc<dyn HashScheme>,
    unwrapper: Arc<dyn UrlUnwrapper>,
    protected_paths: Arc<dyn ProtectedPaths>,
}

impl UrlShortener {
    /// Creates a shortener with no protected paths.
    pub fn new(
        repository: Arc<dyn AliasRepository>,
        hash_scheme: Arc<dyn HashScheme>,
        unwrapper: Arc<dyn UrlUnwrapper>,
    ) -> Self {
        Self {
            repository,
            hash_scheme,
            unwrapper,
            protected_paths: Arc::new(Vec::<String>::new()),
        }
    }

    /// Sets the source of reserved top-level paths.
    pub fn with_protected_paths(mut self, protected_paths: Arc<dyn ProtectedPaths>) -> Self {
        self.protected_paths = protected_paths;
        self
    }

    /// Returns an alias for `target`, reusing an existing one when possible.
    ///
    /// # Flow
    ///
    /// 1. Resolve `target` through the unwrapper
    /// 2. If an alias already points at the resolved target, return it
    /// 3. Otherwise derive candidates for attempts `0, 1, 2, ...` until one is free
    /// 4. Store the free candidate and return it
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CollisionExhausted`] if all [`MAXIMUM_HASH_ATTEMPTS`]
    /// candidates are taken; nothing is written in that case.
    /// Returns [`AppError::Validation`] if the unwrapper rejects the target.
    /// Repository errors are propagated unchanged.
    pub async fn shorten(&self, target: &str) -> Result<String, AppError> {
        let direct = self.unwrapper.resolve(target)?;

        if self.repository.contains_value(&direct).await? {
            let existing = self.repository.get_key(&direct).await?;
            tracing::debug!(alias = %existing, url = %direct, "Reusing existing alias");
            return Ok(existing);
        }

        for attempt in 0..MAXIMUM_HASH_ATTEMPTS {
            let candidate = self.hash_scheme.derive_key_at(&direct, attempt);

            if !self.repository.contains_key(&candidate).await? {
                self.repository.add(&candidate, &direct).await?;
                tracing::info!(alias = %candidate, url = %direct, attempt, "Alias allocated");
                return Ok(candidate);
            }

            tracing::debug!(alias = %candidate, attempt, "Alias candidate collided");
        }

        tracing::warn!(
            url = %direct,
            attempts = MAXIMUM_HASH_ATTEMPTS,
            "Alias space exhausted"
        );
        Err(AppError::collision_exhausted(
            format!(
                "Failed to find a unique hash for url <{}> after {} attempts",
                direct, MAXIMUM_HASH_ATTEMPTS
            ),
            json!({ "target": direct, "attempts": MAXIMUM_HASH_ATTEMPTS }),
        ))
    }

    /// Reserves `custom_alias` for `target`.
    ///
    /// An alias previously derived for the same target stays in place, since
    /// links using it may already be shared.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidAlias`] with the first failed rule:
    /// empty, longer than 100 characters, a character outside the unreserved
    /// set, a trailing dot, a reserved leading segment, or already in use.
    pub async fn shorten_with_custom(
        &self,
        target: &str,
        custom_alias: &str,
    ) -> Result<String, AppError> {
        validate_alias_format(custom_alias)?;
        self.check_not_reserved(custom_alias)?;

        if self.repository.contains_key(custom_alias).await? {
            return Err(AliasValidationError::AlreadyInUse {
                alias: custom_alias.to_string(),
            }
            .into());
        }

        let direct = self.unwrapper.resolve(target)?;
        self.repository.add(custom_alias, &direct).await?;
        tracing::info!(alias = %custom_alias, url = %direct, "Custom alias reserved");

        Ok(custom_alias.to_string())
    }

    /// Returns the target stored for `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias does not exist.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        if !self.repository.contains_key(alias).await? {
            return Err(AppError::not_found(
                format!("Short URL '{}' does not exist", alias),
                json!({ "alias": alias }),
            ));
        }

        self.repository.get_value(alias).await
    }

    /// Removes `alias`, returning `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RemovalLocked`] if the backend refuses to remove an
    /// alias past its lock age.
    pub async fn remove(&self, alias: &str) -> Result<bool, AppError> {
        let removed = self.repository.remove(alias).await?;
        if removed {
            tracing::info!(alias, "Alias removed");
        }
        Ok(removed)
    }

    fn check_not_reserved(&self, alias: &str) -> Result<(), AliasValidationError> {
        let segment = alias.split('/').next().unwrap_or(alias);

        let reserved = self
            .protected_paths
            .protected_paths()
            .iter()
            .any(|path| leading_segment(path) == Some(segment));

        if reserved {
            return Err(AliasValidationError::Reserved {
                segment: segment.to_string(),
            });
        }

        Ok(())
    }
}
