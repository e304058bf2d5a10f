//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`AliasRecord`] - A stored alias → target mapping with its write time

pub mod alias;

pub use alias::AliasRecord;
