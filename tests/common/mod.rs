#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use url_alias::application::services::UrlShortener;
use url_alias::domain::repositories::AliasRepository;
use url_alias::infrastructure::persistence::{MemoryAliasRepository, PgAliasRepository};
use url_alias::utils::sha_base64_scheme::Sha256Base64Scheme;
use url_alias::utils::url_unwrapper::IdentityUnwrapper;

pub const TEST_TABLE: &str = "url_shortening_test";

pub async fn create_pg_repository(pool: PgPool) -> PgAliasRepository {
    PgAliasRepository::connect(Arc::new(pool), TEST_TABLE)
        .await
        .unwrap()
}

pub async fn table_exists(pool: &PgPool, table: &str) -> bool {
    sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(table)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn backdate(pool: &PgPool, key: &str, hours: i32) {
    let sql = format!(
        "UPDATE {} SET created_at = now() - make_interval(hours => $1) WHERE row_key = $2",
        TEST_TABLE
    );
    sqlx::query(&sql)
        .bind(hours)
        .bind(key)
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_memory_shortener(
    protected_paths: &[&str],
) -> (UrlShortener, Arc<MemoryAliasRepository>) {
    let repository = Arc::new(MemoryAliasRepository::new());
    let shortener = create_shortener(repository.clone(), protected_paths);
    (shortener, repository)
}

pub fn create_shortener(
    repository: Arc<dyn AliasRepository>,
    protected_paths: &[&str],
) -> UrlShortener {
    let protected: Vec<String> = protected_paths.iter().map(|p| p.to_string()).collect();
    UrlShortener::new(
        repository,
        Arc::new(Sha256Base64Scheme::default()),
        Arc::new(IdentityUnwrapper),
    )
    .with_protected_paths(Arc::new(protected))
}
