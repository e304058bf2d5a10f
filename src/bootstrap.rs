//! Wiring of the allocator from configuration.
//!
//! Opens the configured backend and assembles a [`UrlShortener`] around it.

use crate::application::protected_paths::EnvProtectedPaths;
use crate::application::services::UrlShortener;
use crate::config::Config;
use crate::domain::repositories::AliasRepository;
use crate::infrastructure::persistence::{MemoryAliasRepository, PgAliasRepository};
use crate::utils::sha_base64_scheme::Sha256Base64Scheme;
use crate::utils::url_unwrapper::unwrapper_for;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Opens the alias repository selected by the configuration.
///
/// Uses PostgreSQL when a database is configured and falls back to an
/// in-memory repository otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - The alias table cannot be created
pub async fn open_repository(config: &Config) -> Result<Arc<dyn AliasRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured; aliases are kept in memory and lost on exit");
        return Ok(Arc::new(MemoryAliasRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let repository = PgAliasRepository::connect(Arc::new(pool), &config.table_prefix)
        .await
        .context("Failed to prepare alias table")?
        .with_lock_age(config.lock_age());

    Ok(Arc::new(repository))
}

/// Builds a [`UrlShortener`] with the configured backend, hash length,
/// unwrapper and protected paths.
///
/// # Errors
///
/// See [`open_repository`].
pub async fn build_shortener(config: &Config) -> Result<UrlShortener> {
    let repository = open_repository(config).await?;
    Ok(shortener_with_repository(config, repository))
}

/// Assembles a [`UrlShortener`] around an already opened repository.
///
/// Protected paths are read from the environment on every custom alias
/// request rather than taken from the loaded configuration.
pub fn shortener_with_repository(
    config: &Config,
    repository: Arc<dyn AliasRepository>,
) -> UrlShortener {
    UrlShortener::new(
        repository,
        Arc::new(Sha256Base64Scheme::new(config.preferred_hash_length)),
        unwrapper_for(config.resolve_urls),
    )
    .with_protected_paths(Arc::new(EnvProtectedPaths))
}
