//! PostgreSQL repository tests.
//!
//! These need a live database: set `DATABASE_URL` and run with
//! `cargo test -- --ignored`. `#[sqlx::test]` gives each test its own
//! scratch database.

mod common;

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;
use url_alias::domain::repositories::AliasRepository;
use url_alias::error::AppError;
use url_alias::infrastructure::persistence::PgAliasRepository;

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_connect_creates_table(pool: PgPool) {
    assert!(!common::table_exists(&pool, common::TEST_TABLE).await);

    let repo = common::create_pg_repository(pool.clone()).await;

    assert_eq!(repo.table_name(), common::TEST_TABLE);
    assert!(common::table_exists(&pool, common::TEST_TABLE).await);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_connect_is_idempotent(pool: PgPool) {
    let repo = common::create_pg_repository(pool.clone()).await;
    repo.add("TheTestKey0", "TheTestValue0").await.unwrap();

    let reopened = common::create_pg_repository(pool).await;

    assert_eq!(
        reopened.get_value("TheTestKey0").await.unwrap(),
        "TheTestValue0"
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_connect_rejects_invalid_table_prefix(pool: PgPool) {
    let result = PgAliasRepository::connect(Arc::new(pool), "bad-name; --").await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_add_key_value(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;

    repo.add("TheTestKey0", "TheTestValue0").await.unwrap();

    let record = repo.find_record("TheTestKey0").await.unwrap().unwrap();
    assert_eq!(record.key, "TheTestKey0");
    assert_eq!(record.value, "TheTestValue0");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_add_replaces_existing_key(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;

    repo.add("TheTestKey0", "first").await.unwrap();
    repo.add("TheTestKey0", "second").await.unwrap();

    assert_eq!(repo.get_value("TheTestKey0").await.unwrap(), "second");
    assert!(!repo.contains_value("first").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_contains_key_after_adding(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;
    assert!(!repo.contains_key("TheTestKey1").await.unwrap());

    repo.add("TheTestKey1", "TheTestValue1").await.unwrap();

    assert!(repo.contains_key("TheTestKey1").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_contains_value_after_adding(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;
    assert!(!repo.contains_value("TheTestValue2").await.unwrap());

    repo.add("TheTestKey2", "TheTestValue2").await.unwrap();

    assert!(repo.contains_value("TheTestValue2").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_get_key_after_adding(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;

    repo.add("TheTestKey4", "TheTestValue4").await.unwrap();

    assert_eq!(repo.get_key("TheTestValue4").await.unwrap(), "TheTestKey4");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_get_key_returns_lowest_key(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;

    repo.add("b", "shared").await.unwrap();
    repo.add("C", "shared").await.unwrap();
    repo.add("a", "shared").await.unwrap();

    // Byte order: uppercase sorts before lowercase.
    assert_eq!(repo.get_key("shared").await.unwrap(), "C");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_lookups_not_found(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;

    assert!(matches!(
        repo.get_value("missing").await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        repo.get_key("missing").await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_remove_by_key(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;
    repo.add("TheTestKey5", "TheTestValue5").await.unwrap();

    let removed = repo.remove("TheTestKey5").await.unwrap();

    assert!(removed);
    assert!(!repo.contains_key("TheTestKey5").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_remove_absent_key_returns_false(pool: PgPool) {
    let repo = common::create_pg_repository(pool).await;

    assert!(!repo.remove("TheTestKey6").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_remove_refused_after_lock_age(pool: PgPool) {
    let repo = common::create_pg_repository(pool)
        .await
        .with_lock_age(Duration::seconds(2));
    repo.add("TheTestKey7", "value").await.unwrap();
    repo.add("TheTestKey8", "value8").await.unwrap();

    assert!(repo.remove("TheTestKey8").await.unwrap());

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;

    let result = repo.remove("TheTestKey7").await;
    assert!(matches!(result, Err(AppError::RemovalLocked { .. })));
    assert!(repo.contains_key("TheTestKey7").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_default_lock_age_applies_to_backdated_records(pool: PgPool) {
    let repo = common::create_pg_repository(pool.clone()).await;
    repo.add("young", "https://example.com/young").await.unwrap();
    repo.add("old", "https://example.com/old").await.unwrap();
    common::backdate(&pool, "old", 13).await;

    assert!(matches!(
        repo.remove("old").await,
        Err(AppError::RemovalLocked { .. })
    ));
    assert!(repo.remove("young").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_refreshes_write_time(pool: PgPool) {
    let repo = common::create_pg_repository(pool.clone()).await;
    repo.add("key", "https://example.com/1").await.unwrap();
    common::backdate(&pool, "key", 13).await;

    repo.add("key", "https://example.com/2").await.unwrap();

    assert!(repo.remove("key").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_shortener_on_postgres(pool: PgPool) {
    let repo = Arc::new(common::create_pg_repository(pool).await);
    let shortener = common::create_shortener(repo.clone(), &["admin"]);
    let url = "https://example.com/durable";

    let derived = shortener.shorten(url).await.unwrap();
    let again = shortener.shorten(url).await.unwrap();
    let custom = shortener.shorten_with_custom(url, "durable").await.unwrap();

    assert_eq!(derived, again);
    assert_eq!(custom, "durable");
    assert_eq!(repo.get_value(&derived).await.unwrap(), url);
    assert_eq!(shortener.resolve("durable").await.unwrap(), url);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_locked_removal_reports_record_age(pool: PgPool) {
    let repo = common::create_pg_repository(pool.clone()).await;
    repo.add("aged", "https://example.com/aged").await.unwrap();
    common::backdate(&pool, "aged", 13).await;

    let err = repo.remove("aged").await.unwrap_err();

    let details = err.details();
    assert_eq!(err.code(), "removal_locked");
    assert!(details["age_seconds"].as_i64().unwrap() >= 13 * 3600);
    assert_eq!(details["lock_age_seconds"], 12 * 3600);
    assert!(repo.find_record("aged").await.unwrap().is_some());
}
