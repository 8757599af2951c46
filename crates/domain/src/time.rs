//! Time and timestamp helpers.
//!
//! The store records observation times as nanoseconds since the Unix epoch.
//! Rendered timestamps use the fixed `YYYY-MM-DD HH:MM:SS` layout, which is
//! part of the JSON and HTML output contract.

use chrono::{DateTime, Local, Utc};
use serde::Deserialize;

/// Layout of every rendered timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// UTC timestamp decoded from the store.
pub type Timestamp = DateTime<Utc>;

/// Time zone used when rendering timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    /// The host's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl DisplayZone {
    /// Render a UTC timestamp in this zone.
    #[must_use]
    pub fn format(self, timestamp: Timestamp) -> String {
        match self {
            Self::Local => timestamp
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            Self::Utc => timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Render an epoch-nanosecond value, truncated to whole seconds.
    #[must_use]
    pub fn format_epoch_nanos(self, nanos: i64) -> String {
        self.format(from_epoch_nanos(nanos))
    }
}

/// Decode an epoch-nanosecond value into a whole-second UTC timestamp.
///
/// Sub-second digits are truncated toward zero. Every `i64` is in range.
#[must_use]
pub fn from_epoch_nanos(nanos: i64) -> Timestamp {
    DateTime::from_timestamp_nanos(nanos - nanos % NANOS_PER_SECOND)
}
