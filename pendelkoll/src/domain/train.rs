//! Train timeline type.
//!
//! A `Train` is one advertised train with its stops in timetable order.

use std::collections::HashSet;

use super::{DomainError, StationCode, Stop, TrainId};

/// A train and its stops, sorted by scheduled time.
///
/// # Invariants
///
/// - Stops are non-decreasing in scheduled time
/// - No station appears twice
/// - `current_position` is the station of the last passed stop, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    id: TrainId,
    stops: Vec<Stop>,
    current_position: Option<StationCode>,
}

impl Train {
    /// Build a timeline from stops in insertion order.
    ///
    /// Stops are stably sorted by scheduled time, so stops with identical
    /// times keep the order they were given in. The current position is
    /// then the last stop in that order whose `passed` flag is set.
    ///
    /// # Errors
    ///
    /// Returns `Err` if two stops share a station.
    ///
    /// # Examples
    ///
    /// ```
    /// use pendelkoll::domain::{AnnouncementTime, RawAnnouncement, StationCode, Stop, Train, TrainId};
    ///
    /// let at = |s: &str| AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap();
    /// let stop = |code: &str, time: &str, passed: bool| {
    ///     let station = StationCode::parse(code).unwrap();
    ///     let mut rec = RawAnnouncement::new(TrainId::new("1043").unwrap(), station.clone(), at(time));
    ///     if passed {
    ///         rec.actual = Some(at(time));
    ///     }
    ///     Stop::from_announcement(&rec, station, code.to_string())
    /// };
    ///
    /// let train = Train::new(
    ///     TrainId::new("1043").unwrap(),
    ///     vec![stop("Em", "08:30", false), stop("Lo", "08:00", true)],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(train.stops()[0].station.as_str(), "Lo");
    /// assert_eq!(train.current_position().unwrap().as_str(), "Lo");
    /// ```
    pub fn new(id: TrainId, mut stops: Vec<Stop>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(stops.len());
        for stop in &stops {
            if !seen.insert(&stop.station) {
                return Err(DomainError::DuplicateStop {
                    train: id.clone(),
                    station: stop.station.clone(),
                });
            }
        }

        // Vec::sort_by_key is stable
        stops.sort_by_key(|s| s.scheduled);

        let current_position = stops
            .iter()
            .rev()
            .find(|s| s.passed)
            .map(|s| s.station.clone());

        Ok(Self {
            id,
            stops,
            current_position,
        })
    }

    /// Returns the train identifier.
    pub fn id(&self) -> &TrainId {
        &self.id
    }

    /// Returns the stops in timetable order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Station of the most recently passed stop.
    pub fn current_position(&self) -> Option<&StationCode> {
        self.current_position.as_ref()
    }

    /// Find the stop at a station.
    pub fn stop_at(&self, station: &StationCode) -> Option<&Stop> {
        self.stops.iter().find(|s| &s.station == station)
    }

    /// Does this train stop at the given station?
    pub fn calls_at(&self, station: &StationCode) -> bool {
        self.stop_at(station).is_some()
    }

    /// Stops at `from` and `to`, provided the train is scheduled at
    /// `from` strictly before `to`.
    ///
    /// Returns `None` if either station is missing or the train runs the
    /// other way.
    pub fn stops_in_order(&self, from: &StationCode, to: &StationCode) -> Option<(&Stop, &Stop)> {
        let first = self.stop_at(from)?;
        let second = self.stop_at(to)?;
        (first.scheduled < second.scheduled).then_some((first, second))
    }

    /// A copy of this train keeping only the given stations.
    ///
    /// An empty filter keeps every stop. The current position is carried
    /// over from the full timeline, so it may name a station that was
    /// filtered out.
    pub fn restricted_to(&self, stations: &[StationCode]) -> Self {
        if stations.is_empty() {
            return self.clone();
        }

        Self {
            id: self.id.clone(),
            stops: self
                .stops
                .iter()
                .filter(|s| stations.contains(&s.station))
                .cloned()
                .collect(),
            current_position: self.current_position.clone(),
        }
    }

    /// Product name from the first stop that carries one.
    pub fn product(&self) -> Option<&str> {
        self.stops.iter().find_map(|s| s.product.as_deref())
    }

    /// Returns true if any stop is cancelled.
    pub fn is_cancelled_anywhere(&self) -> bool {
        self.stops.iter().any(|s| s.canceled)
    }

    /// Distinct non-empty reason texts, in timetable order.
    pub fn reasons(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for stop in &self.stops {
            if !stop.reason.is_empty() && !out.contains(&stop.reason.as_str()) {
                out.push(&stop.reason);
            }
        }
        out
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
