//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository interface defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory and PostgreSQL alias repositories

pub mod persistence;
