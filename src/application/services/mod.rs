//! Business logic services for the application layer.

pub mod url_shortener;

pub use url_shortener::{MAXIMUM_HASH_ATTEMPTS, UrlShortener};
