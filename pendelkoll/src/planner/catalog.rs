//! The rider-facing journey views.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::domain::{AnnouncementTime, Journey, RawAnnouncement, Train};
use crate::stations::StationDirectory;

use super::aggregate::aggregate;
use super::config::{CatalogConfig, RouteDefinition};
use super::connect::ConnectionMatcher;
use super::direct::build_direct;
use super::timeline::build_timelines;

/// Which list of journeys to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogView {
    /// Outbound routes, recent and upcoming
    Outbound,
    /// Inbound routes, recent and upcoming
    Inbound,
    /// Every journey of the day, newest first
    History,
}

impl CatalogView {
    /// All views in display order.
    pub const ALL: [CatalogView; 3] = [CatalogView::Outbound, CatalogView::Inbound, CatalogView::History];

    /// Name used in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogView::Outbound => "outbound",
            CatalogView::Inbound => "inbound",
            CatalogView::History => "history",
        }
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown view name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0:?}")]
pub struct UnknownView(pub String);

impl FromStr for CatalogView {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogView::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// One snapshot of every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// When the snapshot was built
    pub generated_at: AnnouncementTime,
    /// Outbound journeys, ascending by departure
    pub outbound: Vec<Journey>,
    /// Inbound journeys, ascending by departure
    pub inbound: Vec<Journey>,
    /// All journeys including past ones, descending by departure
    pub history: Vec<Journey>,
}

impl Catalog {
    /// Journeys for one view.
    pub fn view(&self, view: CatalogView) -> &[Journey] {
        match view {
            CatalogView::Outbound => &self.outbound,
            CatalogView::Inbound => &self.inbound,
            CatalogView::History => &self.history,
        }
    }

    /// Journeys in the live views, outbound first.
    pub fn live(&self) -> impl Iterator<Item = &Journey> {
        self.outbound.iter().chain(&self.inbound)
    }
}

/// Builds a [`Catalog`] from scratch for each batch of announcements.
#[derive(Debug, Clone)]
pub struct JourneyCatalog<'a> {
    config: &'a CatalogConfig,
    directory: &'a StationDirectory,
}

impl<'a> JourneyCatalog<'a> {
    /// Create a catalog builder.
    pub fn new(config: &'a CatalogConfig, directory: &'a StationDirectory) -> Self {
        Self { config, directory }
    }

    /// Build every view as of `now`.
    pub fn build(&self, records: &[RawAnnouncement], now: AnnouncementTime) -> Catalog {
        let trains = build_timelines(aggregate(records, self.directory));

        let outbound_all = self.journeys_for(&trains, &self.config.outbound);
        let inbound_all = self.journeys_for(&trains, &self.config.inbound);

        let mut history: Vec<Journey> = outbound_all.iter().chain(&inbound_all).cloned().collect();
        history.sort_by(|a, b| by_departure(b, a));

        let outbound = self.live(outbound_all, now);
        let inbound = self.live(inbound_all, now);

        debug!(
            records = records.len(),
            trains = trains.len(),
            outbound = outbound.len(),
            inbound = inbound.len(),
            history = history.len(),
            "built catalog"
        );

        Catalog {
            generated_at: now,
            outbound,
            inbound,
            history,
        }
    }

    fn journeys_for(&self, trains: &[Train], routes: &[RouteDefinition]) -> Vec<Journey> {
        let mut journeys = Vec::new();
        for route in routes {
            if let Err(e) = route.validate() {
                warn!(error = %e, "skipping route");
                continue;
            }
            let found = match &route.transfer {
                Some(transfer) => ConnectionMatcher::new(&self.config.policy)
                    .with_relevant(&route.leg1_stations, &route.leg2_stations)
                    .build_connecting(trains, &route.origin, transfer, &route.destination),
                None => build_direct(trains, &route.origin, &route.destination, &route.leg1_stations),
            };
            debug!(route = %route.name, journeys = found.len(), "route evaluated");
            journeys.extend(found);
        }
        journeys
    }

    /// Drop journeys that arrived before the relevance horizon and sort
    /// what is left.
    fn live(&self, mut journeys: Vec<Journey>, now: AnnouncementTime) -> Vec<Journey> {
        if let Some(cutoff) = now.checked_sub(self.config.policy.relevance_horizon()) {
            journeys.retain(|j| j.scheduled_arrival() >= cutoff);
        }
        journeys.sort_by(by_departure);
        journeys
    }
}

fn by_departure(a: &Journey, b: &Journey) -> Ordering {
    a.scheduled_departure()
        .cmp(&b.scheduled_departure())
        .then_with(|| a.leg1().id().cmp(b.leg1().id()))
        .then_with(|| a.id().cmp(b.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityType, StationCode, TrainId};

    fn at(s: &str) -> AnnouncementTime {
        AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap()
    }

    fn rec(train: &str, station: &str, time: &str) -> RawAnnouncement {
        let mut r = RawAnnouncement::new(
            TrainId::new(train).unwrap(),
            StationCode::parse(station).unwrap(),
            at(time),
        );
        r.activity = ActivityType::Departure;
        r
    }

    fn day() -> Vec<RawAnnouncement> {
        vec![
            // Outbound morning: 1041 and 1043 Lo → Em, Krösatåg 8121/8123 Em → Ck
            rec("1041", "Lo", "06:00"),
            rec("1041", "Em", "06:30"),
            rec("8121", "Em", "06:40"),
            rec("8121", "Ck", "07:30"),
            rec("1043", "Lo", "08:00"),
            rec("1043", "Em", "08:30"),
            rec("8123", "Em", "08:40"),
            rec("8123", "Ck", "09:30"),
            // Inbound afternoon: 8150 Ck → Em, 1050 Em → Lo, 1052 direct Ck → Lo
            rec("8150", "Ck", "16:00"),
            rec("8150", "Em", "16:50"),
            rec("1050", "Em", "16:55"),
            rec("1050", "Lo", "17:20"),
            rec("1052", "Ck", "17:00"),
            rec("1052", "Em", "17:50"),
            rec("1052", "Lo", "18:15"),
        ]
    }

    fn ids(journeys: &[Journey]) -> Vec<&str> {
        journeys.iter().map(Journey::id).collect()
    }

    #[test]
    fn builds_all_views() {
        let config = CatalogConfig::commute_default();
        let directory = StationDirectory::smaland();
        let catalog = JourneyCatalog::new(&config, &directory).build(&day(), at("05:00"));

        assert_eq!(ids(&catalog.outbound), vec!["1041-8121", "1043-8123"]);
        assert_eq!(ids(&catalog.inbound), vec!["8150-1050", "1052"]);
        assert_eq!(
            ids(&catalog.history),
            vec!["1052", "8150-1050", "1043-8123", "1041-8121"]
        );
        assert_eq!(catalog.generated_at, at("05:00"));
        assert_eq!(catalog.outbound[0].origin_name(), "Lessebo");
        assert_eq!(catalog.outbound[0].changeover_name(), "Emmaboda");
        assert_eq!(catalog.inbound[1].changeover_name(), "-");
    }

    #[test]
    fn live_views_drop_old_journeys() {
        let config = CatalogConfig::commute_default();
        let directory = StationDirectory::smaland();
        let catalog = JourneyCatalog::new(&config, &directory);

        // 1041-8121 arrives 07:30, more than an hour before 08:31
        let later = catalog.build(&day(), at("08:31"));
        assert_eq!(ids(&later.outbound), vec!["1043-8123"]);
        assert_eq!(later.history.len(), 4);

        // exactly at the horizon is kept
        let edge = catalog.build(&day(), at("08:30"));
        assert_eq!(edge.outbound.len(), 2);
    }

    #[test]
    fn each_build_starts_fresh() {
        let config = CatalogConfig::commute_default();
        let directory = StationDirectory::smaland();
        let catalog = JourneyCatalog::new(&config, &directory);

        let full = catalog.build(&day(), at("05:00"));
        let empty = catalog.build(&[], at("05:00"));
        let again = catalog.build(&day(), at("05:00"));

        assert!(empty.history.is_empty());
        assert_eq!(full, again);
    }

    #[test]
    fn invalid_routes_are_skipped() {
        let mut config = CatalogConfig::commute_default();
        let lo = StationCode::parse("Lo").unwrap();
        config
            .outbound
            .push(RouteDefinition::direct("broken", lo.clone(), lo));
        let directory = StationDirectory::smaland();
        let catalog = JourneyCatalog::new(&config, &directory).build(&day(), at("05:00"));
        assert_eq!(catalog.outbound.len(), 2);
    }

    #[test]
    fn view_lookup() {
        let config = CatalogConfig::commute_default();
        let directory = StationDirectory::smaland();
        let catalog = JourneyCatalog::new(&config, &directory).build(&day(), at("05:00"));

        assert_eq!(catalog.view(CatalogView::Outbound).len(), 2);
        assert_eq!(catalog.view(CatalogView::History).len(), 4);
        assert_eq!(catalog.live().count(), 4);

        assert_eq!("outbound".parse::<CatalogView>(), Ok(CatalogView::Outbound));
        assert_eq!("History".parse::<CatalogView>(), Ok(CatalogView::History));
        assert!("sideways".parse::<CatalogView>().is_err());
        assert_eq!(CatalogView::Inbound.to_string(), "inbound");
    }
}
