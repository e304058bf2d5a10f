//! Alias entity: the unit of persistence.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A stored mapping from a short alias to its target.
///
/// `created_at` is assigned by the repository at write time and refreshed
/// when the record is replaced. Only age-gated backends look at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasRecord {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

impl AliasRecord {
    pub fn new(key: String, value: String, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            created_at,
        }
    }

    /// Time elapsed between the write and `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Returns true once the record is older than `lock_age` and can no
    /// longer be removed.
    pub fn is_locked(&self, now: DateTime<Utc>, lock_age: Duration) -> bool {
        self.age(now) > lock_age
    }
}
