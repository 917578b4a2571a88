//! Critical-journey alerts.
//!
//! Deciding whether a journey is critical is a pure function of the
//! journey. Remembering which journeys have already been reported is the
//! job of [`AlertLedger`], owned by the host.

use std::collections::HashSet;

use tracing::info;

use crate::domain::{DelayStatus, Journey};
use crate::planner::MatchPolicy;

/// Returns true if the journey is cancelled, its change is at risk, or
/// leg 1 is later than the policy's critical delay.
pub fn is_critical(journey: &Journey, policy: &MatchPolicy) -> bool {
    journey.status(policy.critical_delay_mins) == DelayStatus::Critical
}

/// Journey ids that have already triggered an alert.
///
/// Starts empty and only grows. Ids are never removed, so a journey is
/// reported at most once for the lifetime of the ledger.
#[derive(Debug, Clone, Default)]
pub struct AlertLedger {
    notified: HashSet<String>,
}

impl AlertLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Critical journeys not reported before, in input order.
    ///
    /// Every returned journey is recorded, so the next call will not
    /// return it again.
    pub fn record_new<'j>(
        &mut self,
        journeys: impl IntoIterator<Item = &'j Journey>,
        policy: &MatchPolicy,
    ) -> Vec<&'j Journey> {
        let mut fresh = Vec::new();
        for journey in journeys {
            if is_critical(journey, policy) && self.notified.insert(journey.id().to_string()) {
                info!(journey = journey.id(), "new critical journey");
                fresh.push(journey);
            }
        }
        fresh
    }

    /// Whether a journey id has already been reported.
    pub fn contains(&self, id: &str) -> bool {
        self.notified.contains(id)
    }

    /// Number of reported journeys.
    pub fn len(&self) -> usize {
        self.notified.len()
    }

    /// Returns true if nothing has been reported yet.
    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnnouncementTime, LegSpan, RawAnnouncement, StationCode, Stop, Train, TrainId};

    fn at(s: &str) -> AnnouncementTime {
        AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap()
    }

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    /// A Lo → Em journey arriving `delay` minutes late.
    fn journey(id: &str, delay: i64, canceled: bool) -> Journey {
        let stops = [("Lo", "08:00"), ("Em", "08:30")]
            .iter()
            .map(|(station, time)| {
                let mut rec = RawAnnouncement::new(TrainId::new(id).unwrap(), code(station), at(time));
                if *station == "Em" {
                    rec.actual = at(time).checked_add(chrono::Duration::minutes(delay));
                    rec.canceled = canceled;
                }
                Stop::from_announcement(&rec, code(station), station.to_string())
            })
            .collect();
        let train = Train::new(TrainId::new(id).unwrap(), stops).unwrap();
        let (lo, em) = (code("Lo"), code("Em"));
        Journey::direct(LegSpan {
            train: &train,
            from: &lo,
            to: &em,
            relevant: &[],
        })
        .unwrap()
    }

    #[test]
    fn critical_classification() {
        let policy = MatchPolicy::default();
        assert!(!is_critical(&journey("1", 0, false), &policy));
        assert!(!is_critical(&journey("1", 10, false), &policy));
        assert!(is_critical(&journey("1", 11, false), &policy));
        assert!(is_critical(&journey("1", 0, true), &policy));

        let strict = MatchPolicy {
            critical_delay_mins: 5,
            ..MatchPolicy::default()
        };
        assert!(is_critical(&journey("1", 6, false), &strict));
    }

    #[test]
    fn each_journey_is_reported_once() {
        let policy = MatchPolicy::default();
        let journeys = vec![journey("1", 15, false), journey("2", 0, false), journey("3", 0, true)];
        let mut ledger = AlertLedger::new();
        assert!(ledger.is_empty());

        let first: Vec<_> = ledger
            .record_new(&journeys, &policy)
            .into_iter()
            .map(Journey::id)
            .collect();
        assert_eq!(first, vec!["1", "3"]);
        assert!(ledger.contains("1"));
        assert!(!ledger.contains("2"));

        assert!(ledger.record_new(&journeys, &policy).is_empty());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn recovered_journey_is_not_reported_again() {
        let policy = MatchPolicy::default();
        let mut ledger = AlertLedger::new();

        ledger.record_new(&[journey("1", 15, false)], &policy);
        ledger.record_new(&[journey("1", 0, false)], &policy);
        assert!(ledger.record_new(&[journey("1", 20, false)], &policy).is_empty());
        assert!(ledger.contains("1"));
    }
}
