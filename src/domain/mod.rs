//! Domain layer containing business entities and capability traits.
//!
//! This module defines the data model and the interfaces the allocator is
//! built from, independent of any storage or transport concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Alias storage trait definitions
//! - [`hash_scheme`] - Candidate alias derivation
//! - [`url_unwrapper`] - Target canonicalization
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Traits define contracts implemented by the infrastructure and utils layers
//! - Allocation logic lives in [`crate::application::services`]

pub mod entities;
pub mod hash_scheme;
pub mod repositories;
pub mod url_unwrapper;
