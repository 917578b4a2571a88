//! Raw per-station announcement records.
//!
//! A `RawAnnouncement` is one observation of one train at one station,
//! exactly as the feed reported it. Several announcements may exist for
//! the same train and station (one for the arrival event, one for the
//! departure event, sometimes duplicates across refreshes).

use serde::{Deserialize, Serialize};

use super::{AnnouncementTime, StationCode, TrainId};

/// Which event an announcement describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// The train arrives at the station ("Ankomst").
    Arrival,
    /// The train departs from the station ("Avgang").
    Departure,
    /// The feed did not say.
    #[default]
    Unspecified,
}

impl ActivityType {
    /// Parse the feed's Swedish activity tag.
    ///
    /// Anything unrecognised maps to `Unspecified`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pendelkoll::domain::ActivityType;
    ///
    /// assert_eq!(ActivityType::from_feed_tag("Avgang"), ActivityType::Departure);
    /// assert_eq!(ActivityType::from_feed_tag("Ankomst"), ActivityType::Arrival);
    /// assert_eq!(ActivityType::from_feed_tag("Passage"), ActivityType::Unspecified);
    /// ```
    pub fn from_feed_tag(tag: &str) -> Self {
        match tag.trim() {
            "Avgang" | "Avgång" => ActivityType::Departure,
            "Ankomst" => ActivityType::Arrival,
            _ => ActivityType::Unspecified,
        }
    }

    /// Returns true for departure events.
    pub fn is_departure(self) -> bool {
        self == ActivityType::Departure
    }
}

/// One announcement from the feed.
///
/// Train and station are optional because the feed mixes record shapes;
/// records missing either cannot be attributed and are dropped during
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnnouncement {
    /// Advertised train identifier
    pub train_id: Option<TrainId>,
    /// Station signature
    pub station: Option<StationCode>,
    /// Advertised (timetabled) time of the event
    pub scheduled: AnnouncementTime,
    /// Observed time, once the event has happened
    pub actual: Option<AnnouncementTime>,
    /// Estimated time, while the event is still ahead
    pub estimated: Option<AnnouncementTime>,
    /// Whether the event is cancelled
    pub canceled: bool,
    /// Arrival, departure or unspecified
    pub activity: ActivityType,
    /// Free-text deviation notes, in feed order
    pub deviations: Vec<String>,
    /// Product or line name, e.g. "Krösatågen"
    pub product: Option<String>,
}

impl RawAnnouncement {
    /// Creates an announcement with only the scheduled time known.
    pub fn new(train_id: TrainId, station: StationCode, scheduled: AnnouncementTime) -> Self {
        Self {
            train_id: Some(train_id),
            station: Some(station),
            scheduled,
            actual: None,
            estimated: None,
            canceled: false,
            activity: ActivityType::Unspecified,
            deviations: Vec::new(),
            product: None,
        }
    }

    /// Observed time if present, otherwise the estimate.
    pub fn actual_or_estimated(&self) -> Option<AnnouncementTime> {
        self.actual.or(self.estimated)
    }

    /// Returns true once the event has been observed.
    pub fn is_observed(&self) -> bool {
        self.actual.is_some()
    }

    /// Train and station, if both are present.
    pub fn key(&self) -> Option<(&TrainId, &StationCode)> {
        Some((self.train_id.as_ref()?, self.station.as_ref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> AnnouncementTime {
        AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap()
    }

    fn record() -> RawAnnouncement {
        RawAnnouncement::new(
            TrainId::new("1043").unwrap(),
            StationCode::parse("Lo").unwrap(),
            at("08:00"),
        )
    }

    #[test]
    fn actual_preferred_over_estimate() {
        let mut rec = record();
        assert_eq!(rec.actual_or_estimated(), None);

        rec.estimated = Some(at("08:03"));
        assert_eq!(rec.actual_or_estimated(), Some(at("08:03")));

        rec.actual = Some(at("08:02"));
        assert_eq!(rec.actual_or_estimated(), Some(at("08:02")));
    }

    #[test]
    fn observed_only_with_actual() {
        let mut rec = record();
        rec.estimated = Some(at("08:03"));
        assert!(!rec.is_observed());

        rec.actual = Some(at("08:04"));
        assert!(rec.is_observed());
    }

    #[test]
    fn key_requires_train_and_station() {
        let mut rec = record();
        assert!(rec.key().is_some());

        rec.station = None;
        assert!(rec.key().is_none());

        let mut rec = record();
        rec.train_id = None;
        assert!(rec.key().is_none());
    }

    #[test]
    fn activity_tags() {
        assert_eq!(ActivityType::from_feed_tag(" Avgang "), ActivityType::Departure);
        assert_eq!(ActivityType::from_feed_tag(""), ActivityType::Unspecified);
        assert!(ActivityType::Departure.is_departure());
        assert!(!ActivityType::Arrival.is_departure());
    }
}
