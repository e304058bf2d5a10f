//! Alias repository implementations.
//!
//! # Repositories
//!
//! - [`MemoryAliasRepository`] - In-process map for tests and database-less runs
//! - [`PgAliasRepository`] - PostgreSQL table with age-gated removal

pub mod memory_alias_repository;
pub mod pg_alias_repository;

pub use memory_alias_repository::MemoryAliasRepository;
pub use pg_alias_repository::PgAliasRepository;
