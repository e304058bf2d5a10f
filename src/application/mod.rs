//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! hashing, unwrapping and alias policy. Services consume the domain traits and
//! provide a clean API for front ends.
//!
//! # Available Services
//!
//! - [`services::url_shortener::UrlShortener`] - Alias allocation, custom aliases, lookups
//! - [`protected_paths`] - Sources of reserved top-level paths

pub mod protected_paths;
pub mod services;
