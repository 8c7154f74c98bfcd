//! UTC instants for record bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a record was created or last saved. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(month: u32, day: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, month, day, 9, 30, 0).unwrap())
    }

    #[test]
    fn orders_chronologically() {
        assert!(at(1, 1) < at(6, 1));
        let mut saved = vec![at(3, 14), at(1, 1), at(6, 1)];
        saved.sort_by(|a, b| b.cmp(a));
        assert_eq!(saved[0], at(6, 1));
    }

    #[test]
    fn serializes_as_rfc3339() {
        let json = serde_json::to_string(&at(3, 14)).unwrap();
        assert_eq!(json, "\"2025-03-14T09:30:00Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, at(3, 14));
    }
}
