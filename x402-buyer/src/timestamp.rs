//! Unix timestamp utilities for x402 payment authorization windows.
//!
//! This module provides the [`UnixTimestamp`] type used to express when an
//! ERC-3009 `transferWithAuthorization` becomes valid and when it expires.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::time::{Duration, SystemTime};

/// A Unix timestamp representing seconds since the Unix epoch (1970-01-01T00:00:00Z).
///
/// - **`validAfter`**: The authorization cannot be executed at or before this time
/// - **`validBefore`**: The authorization cannot be executed after this time
///
/// # Serialization
///
/// Serialized as a stringified integer to avoid loss of precision in JSON, since
/// `JavaScript`'s `Number` type cannot safely represent all 64-bit integers.
///
/// ```json
/// "1699999999"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct UnixTimestamp(u64);

impl Serialize for UnixTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let ts = s
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom("timestamp must be a non-negative integer"))?;
        Ok(Self(ts))
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SystemTime> for UnixTimestamp {
    /// Times before the epoch clamp to zero.
    fn from(time: SystemTime) -> Self {
        let secs = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self(secs)
    }
}

impl UnixTimestamp {
    /// Creates a new [`UnixTimestamp`] from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    #[must_use]
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    /// Returns the timestamp as raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Moves the timestamp forward, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, by: Duration) -> Option<Self> {
        self.0.checked_add(by.as_secs()).map(Self)
    }

    /// Moves the timestamp backward, stopping at the epoch.
    #[must_use]
    pub fn saturating_sub(self, by: Duration) -> Self {
        Self(self.0.saturating_sub(by.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_serializes_as_string() {
        let ts = UnixTimestamp::from_secs(981_173_106);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"981173106\"");
        let back: UnixTimestamp = serde_json::from_str("\"981173106\"").unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_timestamp_rejects_negative() {
        assert!(serde_json::from_str::<UnixTimestamp>("\"-1\"").is_err());
    }

    #[test]
    fn test_timestamp_arithmetic() {
        let ts = UnixTimestamp::from_secs(100);
        assert_eq!(
            ts.saturating_sub(Duration::from_secs(600)),
            UnixTimestamp::from_secs(0)
        );
        assert_eq!(
            ts.checked_add(Duration::from_secs(300)),
            Some(UnixTimestamp::from_secs(400))
        );
        assert_eq!(
            UnixTimestamp::from_secs(u64::MAX).checked_add(Duration::from_secs(1)),
            None
        );
    }

    #[test]
    fn test_timestamp_from_system_time() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(981_173_106);
        assert_eq!(UnixTimestamp::from(time).as_secs(), 981_173_106);
    }
}
