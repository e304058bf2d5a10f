//! Sources of reserved top-level paths.
//!
//! The allocator asks its source for the list on every custom alias request,
//! so a source that re-reads its backing store picks up changes without a
//! restart.

use std::env;

/// Environment variable holding comma-separated protected paths.
pub const PROTECTED_PATHS_VAR: &str = "PROTECTED_PATHS";

/// Paths reserved for the service's own routes when nothing is configured.
pub const DEFAULT_PROTECTED_PATHS: &[&str] = &["admin", "auth/validate", "auth/cred"];

/// Supplies the current list of protected paths.
///
/// Each entry may contain `/`; only its leading segment is reserved.
pub trait ProtectedPaths: Send + Sync {
    fn protected_paths(&self) -> Vec<String>;
}

impl ProtectedPaths for Vec<String> {
    fn protected_paths(&self) -> Vec<String> {
        self.clone()
    }
}

/// Reads [`PROTECTED_PATHS_VAR`] on every call.
///
/// Falls back to [`DEFAULT_PROTECTED_PATHS`] when the variable is unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProtectedPaths;

impl ProtectedPaths for EnvProtectedPaths {
    fn protected_paths(&self) -> Vec<String> {
        match env::var(PROTECTED_PATHS_VAR) {
            Ok(raw) => parse_protected_paths(&raw),
            Err(_) => default_protected_paths(),
        }
    }
}

/// Splits a comma-separated list, dropping blank entries.
pub fn parse_protected_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn default_protected_paths() -> Vec<String> {
    DEFAULT_PROTECTED_PATHS.iter().map(|p| p.to_string()).collect()
}
