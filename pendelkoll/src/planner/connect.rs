//! Two-train journeys with a change at a transfer station.

use tracing::{debug, trace};

use crate::domain::{AnnouncementTime, Journey, LegSpan, StationCode, Stop, Train, TransferRisk};

use super::config::MatchPolicy;

/// Pairs each first-leg train with the onward train a rider would take.
///
/// For every train running `origin` → `transfer`, the onward candidates are
/// trains running `transfer` → `destination` whose *scheduled* departure
/// from `transfer` falls inside the policy window after the first train's
/// expected arrival. The earliest such departure wins, ties going to the
/// lower train id. The margin between expected arrival and expected onward
/// departure decides whether the change is at risk.
#[derive(Debug, Clone)]
pub struct ConnectionMatcher<'a> {
    policy: &'a MatchPolicy,
    leg1_relevant: &'a [StationCode],
    leg2_relevant: &'a [StationCode],
}

impl<'a> ConnectionMatcher<'a> {
    /// A matcher showing every stop of both legs.
    pub fn new(policy: &'a MatchPolicy) -> Self {
        Self {
            policy,
            leg1_relevant: &[],
            leg2_relevant: &[],
        }
    }

    /// Restrict the stops kept on each leg.
    pub fn with_relevant(mut self, leg1: &'a [StationCode], leg2: &'a [StationCode]) -> Self {
        self.leg1_relevant = leg1;
        self.leg2_relevant = leg2;
        self
    }

    /// Build one journey per first-leg train that has an onward connection.
    ///
    /// Sorted by scheduled departure, then first-leg train id.
    pub fn build_connecting(
        &self,
        trains: &[Train],
        origin: &StationCode,
        transfer: &StationCode,
        destination: &StationCode,
    ) -> Vec<Journey> {
        let onward: Vec<(&Train, &Stop)> = trains
            .iter()
            .filter(|t| t.stops_in_order(transfer, destination).is_some())
            .filter_map(|t| Some((t, t.stop_at(transfer)?)))
            .collect();

        let mut journeys: Vec<(Journey, &Train)> = Vec::new();

        for first in trains {
            let Some((_, arrival)) = first.stops_in_order(origin, transfer) else {
                continue;
            };
            let arrived = arrival.expected();

            let Some((second, departure)) = self.pick(first, arrived, &onward) else {
                trace!(train = %first.id(), at = %transfer, "no onward connection");
                continue;
            };

            let margin_minutes = departure.expected().whole_minutes_since(arrived);
            let risk = TransferRisk {
                margin_minutes,
                at_risk: self.policy.is_risky(margin_minutes),
            };

            let journey = Journey::connecting(
                LegSpan {
                    train: first,
                    from: origin,
                    to: transfer,
                    relevant: self.leg1_relevant,
                },
                LegSpan {
                    train: second,
                    from: transfer,
                    to: destination,
                    relevant: self.leg2_relevant,
                },
                risk,
            );

            match journey {
                Ok(journey) => journeys.push((journey, first)),
                Err(e) => trace!(train = %first.id(), error = %e, "skipping connection"),
            }
        }

        journeys.sort_by(|(a, ta), (b, tb)| {
            a.scheduled_departure()
                .cmp(&b.scheduled_departure())
                .then_with(|| ta.id().cmp(tb.id()))
        });

        debug!(
            from = %origin,
            via = %transfer,
            to = %destination,
            count = journeys.len(),
            "built connecting journeys"
        );
        journeys.into_iter().map(|(j, _)| j).collect()
    }

    /// Earliest scheduled onward departure inside the window.
    fn pick<'t>(
        &self,
        first: &Train,
        arrived: AnnouncementTime,
        onward: &[(&'t Train, &'t Stop)],
    ) -> Option<(&'t Train, &'t Stop)> {
        onward
            .iter()
            .filter(|(t, _)| t.id() != first.id())
            .filter(|(_, dep)| {
                self.policy
                    .within_window(dep.scheduled.signed_duration_since(arrived))
            })
            .min_by(|(ta, a), (tb, b)| {
                a.scheduled
                    .cmp(&b.scheduled)
                    .then_with(|| ta.id().cmp(tb.id()))
            })
            .copied()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{RawAnnouncement, TrainId};
    use chrono::Duration;
    use proptest::prelude::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn stop(id: &TrainId, station: &str, time: AnnouncementTime, actual: Option<AnnouncementTime>) -> Stop {
        let mut rec = RawAnnouncement::new(id.clone(), code(station), time);
        rec.actual = actual;
        Stop::from_announcement(&rec, code(station), station.to_string())
    }

    proptest! {
        /// Chosen connections always depart inside the window and run
        /// towards the destination, a connection is found whenever one
        /// exists, and risk matches the margin threshold.
        #[test]
        fn window_bound_and_risk(
            arrival_delay in 0i64..40,
            reverse_first in any::<bool>(),
            onward in prop::collection::vec((0i64..150, -5i64..20, any::<bool>()), 0..8),
        ) {
            let policy = MatchPolicy::default();
            let base = AnnouncementTime::parse("2024-03-15T08:00:00+01:00").unwrap();
            let mins = |m: i64| base.checked_add(Duration::minutes(m)).unwrap();

            let first_id = TrainId::new("101").unwrap();
            let arrived = mins(30 + arrival_delay);
            let first = Train::new(
                first_id.clone(),
                vec![stop(&first_id, "Lo", base, None), stop(&first_id, "Em", mins(30), Some(arrived))],
            )
            .unwrap();

            let mut trains = vec![first];
            if reverse_first {
                let id = TrainId::new("100").unwrap();
                trains.push(
                    Train::new(id.clone(), vec![stop(&id, "Em", mins(10), None), stop(&id, "Lo", mins(40), None)])
                        .unwrap(),
                );
            }
            for (i, &(dep, delay, forward)) in onward.iter().enumerate() {
                let id = TrainId::new(format!("{}", 200 + i)).unwrap();
                let scheduled = mins(dep);
                let at_em = stop(&id, "Em", scheduled, scheduled.checked_add(Duration::minutes(delay)));
                let at_ck = if forward {
                    stop(&id, "Ck", mins(dep + 60), None)
                } else {
                    stop(&id, "Ck", mins(dep - 60), None)
                };
                trains.push(Train::new(id, vec![at_em, at_ck]).unwrap());
            }

            let journeys = ConnectionMatcher::new(&policy)
                .build_connecting(&trains, &code("Lo"), &code("Em"), &code("Ck"));

            let any_in_window = onward.iter().any(|&(dep, _, forward)| {
                forward && policy.within_window(mins(dep).signed_duration_since(arrived))
            });
            prop_assert_eq!(journeys.len(), usize::from(any_in_window));

            for j in &journeys {
                prop_assert!(j.id().starts_with("101-"));
                let leg2 = j.leg2().unwrap();
                prop_assert!(leg2.stops_in_order(&code("Em"), &code("Ck")).is_some());
                let dep = leg2.stop_at(&code("Em")).unwrap();
                let gap = dep.scheduled.signed_duration_since(arrived);
                prop_assert!(gap >= Duration::minutes(2) && gap <= Duration::minutes(60));

                let margin = dep.expected().whole_minutes_since(arrived);
                prop_assert_eq!(j.transfer().unwrap().margin_minutes(), margin);
                prop_assert_eq!(j.connection_risk(), margin < 5);
            }
        }
    }
}
