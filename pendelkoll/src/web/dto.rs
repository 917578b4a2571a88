//! Data transfer objects for web responses.

use serde::Serialize;

use crate::domain::{AnnouncementTime, DelayStatus, Journey, Stop, Train};
use crate::planner::{Catalog, CatalogView, MatchPolicy};

/// A time as both a machine-readable instant and a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeResult {
    /// RFC 3339 timestamp
    pub iso: String,

    /// Local clock time, "HH:MM"
    pub display: String,
}

impl From<AnnouncementTime> for TimeResult {
    fn from(t: AnnouncementTime) -> Self {
        Self {
            iso: t.to_rfc3339(),
            display: t.to_string(),
        }
    }
}

/// A stop on a leg.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Station signature
    pub station: String,

    /// Station name
    pub station_name: String,

    /// Advertised time
    pub scheduled: TimeResult,

    /// Observed or estimated time
    pub realtime: Option<TimeResult>,

    /// Delay in whole minutes
    pub delay_minutes: u32,

    /// Traffic-light status of this stop
    pub status: DelayStatus,

    /// Whether the train has been observed here
    pub passed: bool,

    /// Whether this stop is cancelled
    pub canceled: bool,

    /// Deviation notes
    pub reason: String,
}

impl StopResult {
    fn from_stop(stop: &Stop, policy: &MatchPolicy) -> Self {
        Self {
            station: stop.station.to_string(),
            station_name: stop.station_name.clone(),
            scheduled: stop.scheduled.into(),
            realtime: stop.realtime.map(TimeResult::from),
            delay_minutes: stop.delay_minutes,
            status: stop.status(policy.major_stop_delay_mins),
            passed: stop.passed,
            canceled: stop.canceled,
            reason: stop.reason.clone(),
        }
    }
}

/// One train's part of a journey.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Advertised train id
    pub train_id: String,

    /// Most recently passed station
    pub current_position: Option<String>,

    /// Stops in timetable order
    pub stops: Vec<StopResult>,
}

impl LegResult {
    fn from_train(train: &Train, policy: &MatchPolicy) -> Self {
        Self {
            train_id: train.id().to_string(),
            current_position: train.current_position().map(ToString::to_string),
            stops: train
                .stops()
                .iter()
                .map(|s| StopResult::from_stop(s, policy))
                .collect(),
        }
    }
}

/// A journey in a view.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    pub id: String,
    pub date: String,
    pub origin: String,
    pub origin_name: String,
    pub destination: String,
    pub destination_name: String,
    pub scheduled_departure: TimeResult,
    pub expected_departure: TimeResult,
    pub scheduled_arrival: TimeResult,
    pub expected_arrival: TimeResult,

    /// Product or line name of the first train
    pub line: Option<String>,

    /// Changeover station name, or "-" for direct journeys
    pub changeover: String,

    pub connection_risk: bool,
    pub connection_warning: Option<String>,

    /// Transfer margin in minutes, for journeys with a change
    pub margin_minutes: Option<i64>,

    pub status: DelayStatus,
    pub arrival_delay_minutes: i64,

    /// Severity of the arrival delay, for history rows
    pub arrival_status: DelayStatus,

    pub cancelled: bool,

    /// Deviation text, or a delay summary
    pub reason: String,

    pub leg1: LegResult,
    pub leg2: Option<LegResult>,
}

impl JourneyResult {
    /// Flatten a journey for display.
    pub fn from_journey(journey: &Journey, policy: &MatchPolicy) -> Self {
        Self {
            id: journey.id().to_string(),
            date: journey.date().to_string(),
            origin: journey.origin().to_string(),
            origin_name: journey.origin_name().to_string(),
            destination: journey.destination().to_string(),
            destination_name: journey.destination_name().to_string(),
            scheduled_departure: journey.scheduled_departure().into(),
            expected_departure: journey.expected_departure().into(),
            scheduled_arrival: journey.scheduled_arrival().into(),
            expected_arrival: journey.expected_arrival().into(),
            line: journey.line().map(str::to_string),
            changeover: journey.changeover_name().to_string(),
            connection_risk: journey.connection_risk(),
            connection_warning: journey.connection_warning(),
            margin_minutes: journey.transfer().map(|t| t.margin_minutes()),
            status: journey.status(policy.critical_delay_mins),
            arrival_delay_minutes: journey.arrival_delay_minutes(),
            arrival_status: journey.arrival_status(policy.history_critical_delay_mins),
            cancelled: journey.is_cancelled(),
            reason: journey.reason_or_delay_summary(),
            leg1: LegResult::from_train(journey.leg1(), policy),
            leg2: journey.leg2().map(|t| LegResult::from_train(t, policy)),
        }
    }
}

fn journeys(journeys: &[Journey], policy: &MatchPolicy) -> Vec<JourneyResult> {
    journeys
        .iter()
        .map(|j| JourneyResult::from_journey(j, policy))
        .collect()
}

/// Every view.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub generated_at: TimeResult,
    pub outbound: Vec<JourneyResult>,
    pub inbound: Vec<JourneyResult>,
    pub history: Vec<JourneyResult>,
}

impl CatalogResponse {
    pub fn new(catalog: &Catalog, policy: &MatchPolicy) -> Self {
        Self {
            generated_at: catalog.generated_at.into(),
            outbound: journeys(&catalog.outbound, policy),
            inbound: journeys(&catalog.inbound, policy),
            history: journeys(&catalog.history, policy),
        }
    }
}

/// A single view.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub view: String,
    pub generated_at: TimeResult,
    pub journeys: Vec<JourneyResult>,
}

impl ViewResponse {
    pub fn new(catalog: &Catalog, view: CatalogView, policy: &MatchPolicy) -> Self {
        Self {
            view: view.to_string(),
            generated_at: catalog.generated_at.into(),
            journeys: journeys(catalog.view(view), policy),
        }
    }
}

/// A newly critical journey.
#[derive(Debug, Serialize)]
pub struct AlertResult {
    /// Short text suitable for a notification
    pub message: String,

    pub journey: JourneyResult,
}

impl AlertResult {
    pub fn new(journey: &Journey, policy: &MatchPolicy) -> Self {
        let message = journey.connection_warning().unwrap_or_else(|| {
            format!(
                "Train {} {} → {}: {}",
                journey.leg1().id(),
                journey.scheduled_departure(),
                journey.destination_name(),
                journey.reason_or_delay_summary()
            )
        });
        Self {
            message,
            journey: JourneyResult::from_journey(journey, policy),
        }
    }
}

/// Alerts raised by one poll.
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
