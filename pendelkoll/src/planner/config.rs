//! Matching policy and route configuration for the journey catalog.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, StationCode};

/// Thresholds used when building and classifying journeys.
///
/// Every field can be overridden from configuration; missing fields keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Earliest onward departure after arriving at the transfer station (minutes).
    pub min_connection_mins: i64,

    /// Latest onward departure after arriving at the transfer station (minutes).
    /// Trains leaving later than this are not offered as a connection.
    pub max_connection_mins: i64,

    /// A transfer margin below this is flagged as at risk (minutes).
    pub risk_margin_mins: i64,

    /// Leg 1 delay above this makes the whole journey critical (minutes).
    pub critical_delay_mins: u32,

    /// Stop delay above this is shown as a major delay (minutes).
    pub major_stop_delay_mins: u32,

    /// Live views keep journeys that arrived at most this long ago (minutes).
    pub relevance_horizon_mins: i64,

    /// Arrival delay above this marks a history row as critical (minutes).
    pub history_critical_delay_mins: u32,
}

impl MatchPolicy {
    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins)
    }

    /// Returns the maximum connection time as a Duration.
    pub fn max_connection(&self) -> Duration {
        Duration::minutes(self.max_connection_mins)
    }

    /// Returns the relevance horizon as a Duration.
    pub fn relevance_horizon(&self) -> Duration {
        Duration::minutes(self.relevance_horizon_mins)
    }

    /// Whether a gap between arrival and onward departure is inside the
    /// connection window (both ends inclusive).
    pub fn within_window(&self, gap: Duration) -> bool {
        gap >= self.min_connection() && gap <= self.max_connection()
    }

    /// Whether a whole-minute transfer margin is too tight.
    pub fn is_risky(&self, margin_minutes: i64) -> bool {
        margin_minutes < self.risk_margin_mins
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_connection_mins: 2,
            max_connection_mins: 60,
            risk_margin_mins: 5,
            critical_delay_mins: 10,
            major_stop_delay_mins: 5,
            relevance_horizon_mins: 60,
            history_critical_delay_mins: 15,
        }
    }
}

/// One origin to destination route, optionally via a transfer station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Label used in logs
    pub name: String,

    /// Boarding station
    pub origin: StationCode,

    /// Changeover station; `None` for a direct route
    #[serde(default)]
    pub transfer: Option<StationCode>,

    /// Alighting station
    pub destination: StationCode,

    /// Stations shown for leg 1 (empty shows every stop)
    #[serde(default)]
    pub leg1_stations: Vec<StationCode>,

    /// Stations shown for leg 2 (empty shows every stop)
    #[serde(default)]
    pub leg2_stations: Vec<StationCode>,
}

impl RouteDefinition {
    /// A route served by a single train.
    pub fn direct(name: impl Into<String>, origin: StationCode, destination: StationCode) -> Self {
        Self {
            name: name.into(),
            origin,
            transfer: None,
            destination,
            leg1_stations: Vec::new(),
            leg2_stations: Vec::new(),
        }
    }

    /// A route with a change of trains at `transfer`.
    pub fn via(
        name: impl Into<String>,
        origin: StationCode,
        transfer: StationCode,
        destination: StationCode,
    ) -> Self {
        Self {
            transfer: Some(transfer),
            ..Self::direct(name, origin, destination)
        }
    }

    /// Set the stations shown for each leg.
    pub fn with_relevant(mut self, leg1: Vec<StationCode>, leg2: Vec<StationCode>) -> Self {
        self.leg1_stations = leg1;
        self.leg2_stations = leg2;
        self
    }

    /// Check that the route visits distinct stations.
    ///
    /// # Errors
    ///
    /// Returns `Err` if origin, transfer and destination are not all different.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin == self.destination {
            return Err(DomainError::InvalidRoute {
                route: self.name.clone(),
                reason: "origin and destination are the same station",
            });
        }
        let transfer_clash = self
            .transfer
            .as_ref()
            .is_some_and(|t| t == &self.origin || t == &self.destination);
        if transfer_clash {
            return Err(DomainError::InvalidRoute {
                route: self.name.clone(),
                reason: "transfer must differ from origin and destination",
            });
        }
        Ok(())
    }
}

/// Everything the catalog needs besides the announcements themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Thresholds
    #[serde(default)]
    pub policy: MatchPolicy,

    /// Routes shown in the outbound view
    pub outbound: Vec<RouteDefinition>,

    /// Routes shown in the inbound view
    pub inbound: Vec<RouteDefinition>,
}

/// Stations shown for the Öresundståg leg.
const OUTBOUND_LEG1: &[&str] = &["Mc", "Lu", "Hm", "Av", "Vö", "Lo", "Em"];

/// Stations shown for the Krösatåg leg.
const OUTBOUND_LEG2: &[&str] = &["Em", "Rnb", "Bkb", "Khn", "Ck"];

impl CatalogConfig {
    /// Lessebo to Karlskrona via Emmaboda, and back, with the direct
    /// Karlskrona to Lessebo trains as an inbound alternative.
    pub fn commute_default() -> Self {
        let (Ok(lo), Ok(em), Ok(ck)) = (
            StationCode::parse("Lo"),
            StationCode::parse("Em"),
            StationCode::parse("Ck"),
        ) else {
            return Self {
                policy: MatchPolicy::default(),
                outbound: Vec::new(),
                inbound: Vec::new(),
            };
        };
        let leg1 = stations(OUTBOUND_LEG1);
        let leg2 = stations(OUTBOUND_LEG2);

        let mut direct_home = leg2.clone();
        direct_home.extend(leg1.iter().filter(|s| !leg2.contains(s)).cloned());

        Self {
            policy: MatchPolicy::default(),
            outbound: vec![
                RouteDefinition::via("to-work", lo.clone(), em.clone(), ck.clone())
                    .with_relevant(leg1.clone(), leg2.clone()),
            ],
            inbound: vec![
                RouteDefinition::via("home", ck.clone(), em, lo.clone()).with_relevant(leg2, leg1),
                RouteDefinition::direct("home-direct", ck, lo).with_relevant(direct_home, Vec::new()),
            ],
        }
    }

    /// Validate every route.
    ///
    /// # Errors
    ///
    /// Returns the first invalid route.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.outbound
            .iter()
            .chain(&self.inbound)
            .try_for_each(RouteDefinition::validate)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::commute_default()
    }
}

fn stations(codes: &[&str]) -> Vec<StationCode> {
    codes
        .iter()
        .filter_map(|c| StationCode::parse(c).ok())
        .collect()
}
