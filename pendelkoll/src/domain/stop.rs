//! Stop types for train timelines.
//!
//! A `Stop` is the canonical record for one train at one station after
//! the raw arrival/departure announcements have been folded together.

use serde::Serialize;

use super::{ActivityType, AnnouncementTime, RawAnnouncement, StationCode};

/// Traffic-light classification of a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayStatus {
    /// No delay
    OnTime,
    /// Late, but within the threshold
    Delayed,
    /// Late beyond the threshold, cancelled, or a connection at risk
    Critical,
}

impl DelayStatus {
    /// Classify a delay: `Critical` when strictly above `critical_after`
    /// minutes, `Delayed` when above zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pendelkoll::domain::DelayStatus;
    ///
    /// assert_eq!(DelayStatus::classify(0, 5), DelayStatus::OnTime);
    /// assert_eq!(DelayStatus::classify(5, 5), DelayStatus::Delayed);
    /// assert_eq!(DelayStatus::classify(6, 5), DelayStatus::Critical);
    /// ```
    pub fn classify(delay_minutes: u32, critical_after: u32) -> Self {
        if delay_minutes > critical_after {
            DelayStatus::Critical
        } else if delay_minutes > 0 {
            DelayStatus::Delayed
        } else {
            DelayStatus::OnTime
        }
    }
}

/// One train's stop at one station.
///
/// `realtime` holds the observed time if the event has happened, else the
/// estimate, else nothing. `expected()` falls back to the scheduled time
/// so callers always have a time to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Station signature
    pub station: StationCode,
    /// Station display name
    pub station_name: String,
    /// Advertised time
    pub scheduled: AnnouncementTime,
    /// Observed or estimated time, if any
    pub realtime: Option<AnnouncementTime>,
    /// Delay in whole minutes, never negative
    pub delay_minutes: u32,
    /// Whether the train has been observed here
    pub passed: bool,
    /// Whether this stop is cancelled
    pub canceled: bool,
    /// Deviation notes joined with ", "
    pub reason: String,
    /// Which announcement this stop was derived from
    pub activity: ActivityType,
    /// Product or line name
    pub product: Option<String>,
}

impl Stop {
    /// Derive a stop from an announcement.
    ///
    /// The station is passed separately because the caller has already
    /// checked the announcement carries one.
    pub fn from_announcement(
        record: &RawAnnouncement,
        station: StationCode,
        station_name: String,
    ) -> Self {
        let realtime = record.actual_or_estimated();
        let delay_minutes = realtime
            .map(|rt| delay_minutes(record.scheduled, rt))
            .unwrap_or(0);

        Self {
            station,
            station_name,
            scheduled: record.scheduled,
            realtime,
            delay_minutes,
            passed: record.is_observed(),
            canceled: record.canceled,
            reason: record.deviations.join(", "),
            activity: record.activity,
            product: record.product.clone(),
        }
    }

    /// Returns the best available time (realtime if known, else scheduled).
    pub fn expected(&self) -> AnnouncementTime {
        self.realtime.unwrap_or(self.scheduled)
    }

    /// Traffic-light status of this stop.
    pub fn status(&self, critical_after: u32) -> DelayStatus {
        DelayStatus::classify(self.delay_minutes, critical_after)
    }
}

/// `max(0, floor((realtime - scheduled) / 1 min))`.
fn delay_minutes(scheduled: AnnouncementTime, realtime: AnnouncementTime) -> u32 {
    let mins = realtime.whole_minutes_since(scheduled).max(0);
    u32::try_from(mins).unwrap_or(u32::MAX)
}
