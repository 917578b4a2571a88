//! Announcement timestamps.
//!
//! The feed carries ISO-8601 timestamps with an explicit UTC offset
//! (`2024-03-15T08:00:00.000+01:00`). This module wraps them in a type
//! that orders by instant and knows the minute arithmetic the planner
//! needs.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// An offset-aware point in time from the announcement feed.
///
/// Comparison is by instant, so `08:00+01:00` equals `07:00Z`. Display
/// uses the original offset, which is what a rider on the platform sees.
///
/// # Examples
///
/// ```
/// use pendelkoll::domain::AnnouncementTime;
///
/// let t = AnnouncementTime::parse("2024-03-15T08:30:00.000+01:00").unwrap();
/// assert_eq!(t.to_string(), "08:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementTime(DateTime<FixedOffset>);

impl AnnouncementTime {
    /// Parse an ISO-8601 / RFC 3339 timestamp.
    ///
    /// Fractional seconds are accepted. A timestamp without an offset is
    /// rejected rather than guessed at.
    ///
    /// # Examples
    ///
    /// ```
    /// use pendelkoll::domain::AnnouncementTime;
    ///
    /// assert!(AnnouncementTime::parse("2024-03-15T08:30:00+01:00").is_ok());
    /// assert!(AnnouncementTime::parse("2024-03-15T07:30:00Z").is_ok());
    /// assert!(AnnouncementTime::parse("2024-03-15T08:30:00").is_err());
    /// assert!(AnnouncementTime::parse("08:30").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new("empty timestamp"));
        }
        DateTime::parse_from_rfc3339(s)
            .map(Self)
            .map_err(|_| TimeError::new("expected RFC 3339 timestamp with offset"))
    }

    /// Current wall-clock time, expressed in UTC.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Convert a UTC timestamp.
    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at.fixed_offset())
    }

    /// Calendar date in the timestamp's own offset.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Returns the hour (0-23) in the timestamp's own offset.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the duration between two times.
    ///
    /// Negative if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Whole minutes from `other` to `self`, rounded towards negative
    /// infinity.
    ///
    /// `08:41` since `08:35:30` is 5; `08:35` since `08:41` is -6.
    pub fn whole_minutes_since(&self, other: Self) -> i64 {
        self.signed_duration_since(other)
            .num_seconds()
            .div_euclid(60)
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    /// Subtract a duration, returning `None` on overflow.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        self.0.checked_sub_signed(duration).map(Self)
    }

    /// RFC 3339 rendering, as used in API responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl fmt::Debug for AnnouncementTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnouncementTime({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for AnnouncementTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> AnnouncementTime {
        AnnouncementTime::parse(s).unwrap()
    }

    #[test]
    fn parse_feed_format() {
        let t = at("2024-03-15T08:30:00.000+01:00");
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(AnnouncementTime::parse("").is_err());
        assert!(AnnouncementTime::parse("   ").is_err());
        assert!(AnnouncementTime::parse("tomorrow").is_err());
        assert!(AnnouncementTime::parse("2024-03-15 08:30").is_err());
    }

    #[test]
    fn ordering_is_by_instant() {
        let a = at("2024-03-15T08:00:00+01:00");
        let b = at("2024-03-15T07:30:00Z");
        assert!(a < b);
        assert_eq!(at("2024-03-15T08:00:00+01:00"), at("2024-03-15T07:00:00Z"));
    }

    #[test]
    fn whole_minutes_floor() {
        let base = at("2024-03-15T08:35:30+01:00");
        assert_eq!(at("2024-03-15T08:41:00+01:00").whole_minutes_since(base), 5);
        assert_eq!(at("2024-03-15T08:35:29+01:00").whole_minutes_since(base), -1);

        let a = at("2024-03-15T08:35:00+01:00");
        let b = at("2024-03-15T08:41:00+01:00");
        assert_eq!(a.whole_minutes_since(b), -6);
        assert_eq!(b.whole_minutes_since(a), 6);
    }

    #[test]
    fn add_and_sub() {
        let t = at("2024-03-15T23:30:00+01:00");
        let later = t.checked_add(Duration::hours(1)).unwrap();
        assert_eq!(later.to_string(), "00:30");
        assert_eq!(later.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        assert_eq!(later.checked_sub(Duration::hours(1)), Some(t));
    }

    #[test]
    fn serde_roundtrip() {
        let t = at("2024-03-15T08:30:00+01:00");
        let json = serde_json::to_string(&t).unwrap();
        let back: AnnouncementTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn display_and_debug() {
        let t = at("2024-03-15T08:05:00+01:00");
        assert_eq!(t.to_string(), "08:05");
        assert_eq!(format!("{:?}", t), "AnnouncementTime(2024-03-15T08:05:00+01:00)");
    }
}
