//! Turning aggregated stops into ordered train timelines.

use tracing::warn;

use crate::domain::Train;

use super::aggregate::AggregatedStops;

/// Build one [`Train`] per aggregated train, in train id order.
///
/// A train whose stops cannot form a timeline is logged and left out.
pub fn build_timelines(stops: AggregatedStops) -> Vec<Train> {
    stops
        .into_iter()
        .filter_map(|(id, stops)| match Train::new(id, stops) {
            Ok(train) => Some(train),
            Err(e) => {
                warn!(error = %e, "dropping train");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityType, AnnouncementTime, RawAnnouncement, StationCode, TrainId};
    use crate::planner::aggregate;
    use crate::stations::StationDirectory;

    fn at(s: &str) -> AnnouncementTime {
        AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap()
    }

    fn rec(train: &str, station: &str, time: &str, actual: Option<&str>) -> RawAnnouncement {
        let mut r = RawAnnouncement::new(
            TrainId::new(train).unwrap(),
            StationCode::parse(station).unwrap(),
            at(time),
        );
        r.actual = actual.map(at);
        r.activity = ActivityType::Departure;
        r
    }

    #[test]
    fn timelines_are_sorted_with_position() {
        let records = vec![
            rec("1043", "Em", "08:30", None),
            rec("1043", "Av", "07:20", Some("07:22")),
            rec("1043", "Lo", "08:00", Some("08:03")),
            rec("205", "Ck", "09:30", None),
        ];
        let trains = build_timelines(aggregate(&records, &StationDirectory::smaland()));

        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0].id().as_str(), "205");
        let t = &trains[1];
        let stations: Vec<_> = t.stops().iter().map(|s| s.station.as_str()).collect();
        assert_eq!(stations, vec!["Av", "Lo", "Em"]);
        assert_eq!(t.current_position().map(StationCode::as_str), Some("Lo"));
        assert_eq!(t.stops()[1].delay_minutes, 3);
    }

    #[test]
    fn empty_input() {
        assert!(build_timelines(AggregatedStops::new()).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{AnnouncementTime, RawAnnouncement, StationCode, TrainId};
    use crate::planner::aggregate;
    use crate::stations::StationDirectory;
    use chrono::Duration;
    use proptest::prelude::*;

    const STATIONS: &[&str] = &["Mc", "Lu", "Hm", "Av", "Vö", "Lo", "Em", "Rnb", "Ck"];

    proptest! {
        /// Every timeline is non-decreasing in scheduled time, and its
        /// current position is the last passed stop.
        #[test]
        fn timelines_are_sorted(
            visits in prop::collection::vec((0..STATIONS.len(), 0i64..300, any::<bool>()), 0..30),
        ) {
            let base = AnnouncementTime::parse("2024-03-15T06:00:00+01:00").unwrap();
            let records: Vec<_> = visits
                .iter()
                .map(|&(station, offset, passed)| {
                    let scheduled = base.checked_add(Duration::minutes(offset)).unwrap();
                    let mut r = RawAnnouncement::new(
                        TrainId::new("1043").unwrap(),
                        StationCode::parse(STATIONS[station]).unwrap(),
                        scheduled,
                    );
                    if passed {
                        r.actual = Some(scheduled);
                    }
                    r
                })
                .collect();

            let trains = build_timelines(aggregate(&records, &StationDirectory::smaland()));
            for train in &trains {
                for pair in train.stops().windows(2) {
                    prop_assert!(pair[0].scheduled <= pair[1].scheduled);
                }
                let last_passed = train.stops().iter().rev().find(|s| s.passed).map(|s| &s.station);
                prop_assert_eq!(train.current_position(), last_passed);
            }
        }
    }
}
