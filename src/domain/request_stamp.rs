use std::fmt;

use chrono::Utc;

/// Per-request identifier derived from the wall clock, embedded in every
/// artifact filename so sequential requests never overwrite each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestStamp(i64);

impl RequestStamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
