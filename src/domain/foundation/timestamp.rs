//! UTC timestamp for stamping persisted snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, always UTC, serialized as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Borrows the inner `DateTime`, mainly for formatting.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

/// Payloads missing a stamp read as "saved just now".
impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
