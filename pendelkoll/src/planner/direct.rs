//! Single-train journeys.

use tracing::trace;

use crate::domain::{Journey, LegSpan, StationCode, Train};

/// One journey per train that calls at `origin` and later at `destination`.
///
/// Trains that miss either station, or call at them in the other order,
/// are ignored. Results are sorted by scheduled departure, then train id.
pub fn build_direct(
    trains: &[Train],
    origin: &StationCode,
    destination: &StationCode,
    relevant: &[StationCode],
) -> Vec<Journey> {
    let mut journeys: Vec<(Journey, &Train)> = trains
        .iter()
        .filter(|t| t.stops_in_order(origin, destination).is_some())
        .filter_map(|train| {
            let span = LegSpan {
                train,
                from: origin,
                to: destination,
                relevant,
            };
            match Journey::direct(span) {
                Ok(journey) => Some((journey, train)),
                Err(e) => {
                    trace!(train = %train.id(), error = %e, "not a direct journey");
                    None
                }
            }
        })
        .collect();

    journeys.sort_by(|(a, ta), (b, tb)| {
        a.scheduled_departure()
            .cmp(&b.scheduled_departure())
            .then_with(|| ta.id().cmp(tb.id()))
    });
    journeys.into_iter().map(|(j, _)| j).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnnouncementTime, RawAnnouncement, Stop, TrainId};

    fn at(s: &str) -> AnnouncementTime {
        AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap()
    }

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn train(id: &str, stops: &[(&str, &str)]) -> Train {
        let stops = stops
            .iter()
            .map(|(station, time)| {
                let rec = RawAnnouncement::new(TrainId::new(id).unwrap(), code(station), at(time));
                Stop::from_announcement(&rec, code(station), station.to_string())
            })
            .collect();
        Train::new(TrainId::new(id).unwrap(), stops).unwrap()
    }

    fn ids(journeys: &[Journey]) -> Vec<&str> {
        journeys.iter().map(Journey::id).collect()
    }

    #[test]
    fn train_missing_both_stations_never_appears() {
        let trains = vec![
            train("300", &[("Av", "07:00"), ("Hm", "07:40")]),
            train("1043", &[("Lo", "08:00"), ("Em", "08:30"), ("Ck", "09:20")]),
        ];
        let journeys = build_direct(&trains, &code("Lo"), &code("Ck"), &[]);
        assert_eq!(ids(&journeys), vec!["1043"]);
        assert!(journeys[0].is_direct());
        assert!(!journeys[0].connection_risk());
    }

    #[test]
    fn wrong_direction_is_ignored() {
        let trains = vec![train("1044", &[("Ck", "16:00"), ("Em", "16:50"), ("Lo", "17:15")])];
        assert!(build_direct(&trains, &code("Lo"), &code("Ck"), &[]).is_empty());
        assert_eq!(build_direct(&trains, &code("Ck"), &code("Lo"), &[]).len(), 1);
    }

    #[test]
    fn sorted_by_departure_then_id() {
        let trains = vec![
            train("1047", &[("Lo", "10:00"), ("Ck", "11:20")]),
            train("1045", &[("Lo", "08:00"), ("Ck", "09:20")]),
            train("99", &[("Lo", "08:00"), ("Ck", "09:25")]),
        ];
        let journeys = build_direct(&trains, &code("Lo"), &code("Ck"), &[]);
        assert_eq!(ids(&journeys), vec!["99", "1045", "1047"]);
    }

    #[test]
    fn legs_are_restricted_to_relevant_stations() {
        let trains = vec![train("1043", &[("Lo", "08:00"), ("Em", "08:30"), ("Nyb", "08:45"), ("Ck", "09:20")])];
        let relevant = [code("Lo"), code("Em"), code("Ck")];
        let journeys = build_direct(&trains, &code("Lo"), &code("Ck"), &relevant);
        assert_eq!(journeys[0].leg1().len(), 3);
    }
}
