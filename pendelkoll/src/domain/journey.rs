//! Journey types.
//!
//! A `Journey` is what a rider sees: one train from origin to destination,
//! or two trains with a change at a transfer station.

use chrono::NaiveDate;

use super::{AnnouncementTime, DelayStatus, DomainError, StationCode, Stop, Train};

/// Sentinel shown instead of a changeover station for direct journeys.
pub const NO_TRANSFER: &str = "-";

/// Shown when a journey has neither a deviation note nor an arrival delay.
pub const NO_REASON: &str = "-";

/// The part of a train a rider travels on, with the stations that matter
/// for display.
#[derive(Debug, Clone, Copy)]
pub struct LegSpan<'a> {
    /// The full train timeline
    pub train: &'a Train,
    /// Boarding station
    pub from: &'a StationCode,
    /// Alighting station
    pub to: &'a StationCode,
    /// Stations kept in the journey's copy of the leg (empty keeps all)
    pub relevant: &'a [StationCode],
}

impl<'a> LegSpan<'a> {
    /// Boarding and alighting stops, validated for direction.
    fn endpoints(&self) -> Result<(&'a Stop, &'a Stop), DomainError> {
        let train = self.train;
        for station in [self.from, self.to] {
            if !train.calls_at(station) {
                return Err(DomainError::MissingStop {
                    train: train.id().clone(),
                    station: station.clone(),
                });
            }
        }
        train
            .stops_in_order(self.from, self.to)
            .ok_or(DomainError::InvalidLeg("alighting must be scheduled after boarding"))
    }
}

/// Margin assessment for a change between trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRisk {
    /// Whole minutes between arriving and the onward departure (may be negative)
    pub margin_minutes: i64,
    /// Whether the margin is below the safety threshold
    pub at_risk: bool,
}

/// The change to a second train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    leg: Train,
    station: StationCode,
    station_name: String,
    risk: TransferRisk,
}

impl Transfer {
    /// The second leg, restricted to its relevant stations.
    pub fn leg(&self) -> &Train {
        &self.leg
    }

    /// Changeover station.
    pub fn station(&self) -> &StationCode {
        &self.station
    }

    /// Changeover station display name.
    pub fn station_name(&self) -> &str {
        &self.station_name
    }

    /// Whole-minute margin between the two trains.
    pub fn margin_minutes(&self) -> i64 {
        self.risk.margin_minutes
    }

    /// Whether the connection may be missed.
    pub fn at_risk(&self) -> bool {
        self.risk.at_risk
    }

    /// Human-readable warning, only when the connection is at risk.
    ///
    /// The margin is reported as computed: zero or negative means the
    /// onward train is due to leave before the rider arrives.
    pub fn warning(&self) -> Option<String> {
        self.risk.at_risk.then(|| {
            format!(
                "Risk of missed connection at {}: only {} min margin.",
                self.station_name, self.risk.margin_minutes
            )
        })
    }
}

/// Whether a journey involves a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// One train all the way
    Direct,
    /// Change to a second train
    Transfer(Transfer),
}

/// A rider-facing trip.
///
/// # Invariants
///
/// - Leg 1 is scheduled at its boarding station before its alighting station
/// - For transfers, the same holds for leg 2, and leg 2 boards where leg 1 alights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    id: String,
    date: NaiveDate,
    origin: StationCode,
    origin_name: String,
    destination: StationCode,
    destination_name: String,
    scheduled_departure: AnnouncementTime,
    scheduled_arrival: AnnouncementTime,
    expected_departure: AnnouncementTime,
    expected_arrival: AnnouncementTime,
    leg1: Train,
    leg1_arrival_delay: u32,
    connection: Connection,
    line: Option<String>,
    reason: String,
}

impl Journey {
    /// A journey on a single train.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the train misses either station or runs the
    /// other way.
    pub fn direct(span: LegSpan<'_>) -> Result<Self, DomainError> {
        let (board, alight) = span.endpoints()?;
        let leg1 = span.train.restricted_to(span.relevant);
        let reason = join_reasons(&leg1, None);

        Ok(Self {
            id: span.train.id().to_string(),
            date: board.scheduled.date(),
            origin: board.station.clone(),
            origin_name: board.station_name.clone(),
            destination: alight.station.clone(),
            destination_name: alight.station_name.clone(),
            scheduled_departure: board.scheduled,
            scheduled_arrival: alight.scheduled,
            expected_departure: board.expected(),
            expected_arrival: alight.expected(),
            leg1,
            leg1_arrival_delay: alight.delay_minutes,
            connection: Connection::Direct,
            line: span.train.product().map(str::to_string),
            reason,
        })
    }

    /// A journey with a change between two trains.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either leg is invalid or the second leg does not
    /// board where the first alights.
    pub fn connecting(
        first: LegSpan<'_>,
        second: LegSpan<'_>,
        risk: TransferRisk,
    ) -> Result<Self, DomainError> {
        if first.to != second.from {
            return Err(DomainError::InvalidLeg(
                "second leg must board where the first alights",
            ));
        }

        let (board, change_arrival) = first.endpoints()?;
        let (_, alight) = second.endpoints()?;

        let leg1 = first.train.restricted_to(first.relevant);
        let leg2 = second.train.restricted_to(second.relevant);
        let reason = join_reasons(&leg1, Some(&leg2));

        Ok(Self {
            id: format!("{}-{}", first.train.id(), second.train.id()),
            date: board.scheduled.date(),
            origin: board.station.clone(),
            origin_name: board.station_name.clone(),
            destination: alight.station.clone(),
            destination_name: alight.station_name.clone(),
            scheduled_departure: board.scheduled,
            scheduled_arrival: alight.scheduled,
            expected_departure: board.expected(),
            expected_arrival: alight.expected(),
            leg1,
            leg1_arrival_delay: change_arrival.delay_minutes,
            connection: Connection::Transfer(Transfer {
                leg: leg2,
                station: change_arrival.station.clone(),
                station_name: change_arrival.station_name.clone(),
                risk,
            }),
            line: first.train.product().map(str::to_string),
            reason,
        })
    }

    /// Identifier: leg 1's train id, or `"<leg1>-<leg2>"` for transfers.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Service date (scheduled departure date).
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Origin station.
    pub fn origin(&self) -> &StationCode {
        &self.origin
    }

    /// Origin display name.
    pub fn origin_name(&self) -> &str {
        &self.origin_name
    }

    /// Destination station.
    pub fn destination(&self) -> &StationCode {
        &self.destination
    }

    /// Destination display name.
    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    /// Scheduled departure from the origin.
    pub fn scheduled_departure(&self) -> AnnouncementTime {
        self.scheduled_departure
    }

    /// Scheduled arrival at the destination.
    pub fn scheduled_arrival(&self) -> AnnouncementTime {
        self.scheduled_arrival
    }

    /// Actual-or-estimated departure from the origin.
    pub fn expected_departure(&self) -> AnnouncementTime {
        self.expected_departure
    }

    /// Actual-or-estimated arrival at the destination.
    pub fn expected_arrival(&self) -> AnnouncementTime {
        self.expected_arrival
    }

    /// First leg.
    pub fn leg1(&self) -> &Train {
        &self.leg1
    }

    /// Second leg, for transfer journeys.
    pub fn leg2(&self) -> Option<&Train> {
        self.transfer().map(Transfer::leg)
    }

    /// The transfer, if any.
    pub fn transfer(&self) -> Option<&Transfer> {
        match &self.connection {
            Connection::Direct => None,
            Connection::Transfer(t) => Some(t),
        }
    }

    /// Returns true for single-train journeys.
    pub fn is_direct(&self) -> bool {
        matches!(self.connection, Connection::Direct)
    }

    /// Whether the change may be missed. Always false for direct journeys.
    pub fn connection_risk(&self) -> bool {
        self.transfer().is_some_and(Transfer::at_risk)
    }

    /// Warning text for an at-risk change.
    pub fn connection_warning(&self) -> Option<String> {
        self.transfer().and_then(Transfer::warning)
    }

    /// Changeover station name, or [`NO_TRANSFER`].
    pub fn changeover_name(&self) -> &str {
        self.transfer()
            .map(Transfer::station_name)
            .unwrap_or(NO_TRANSFER)
    }

    /// Product or line name of the first train.
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// Combined deviation text from both legs.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Minutes between scheduled and expected arrival at the destination.
    ///
    /// Negative when running early.
    pub fn arrival_delay_minutes(&self) -> i64 {
        self.expected_arrival
            .whole_minutes_since(self.scheduled_arrival)
    }

    /// Returns true if any stop on either leg is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.leg1.is_cancelled_anywhere()
            || self.leg2().is_some_and(Train::is_cancelled_anywhere)
    }

    /// Overall traffic-light status.
    ///
    /// Critical when cancelled, when the change is at risk, or when leg 1
    /// is more than `critical_after` minutes late where the rider leaves it.
    pub fn status(&self, critical_after: u32) -> DelayStatus {
        if self.is_cancelled() || self.connection_risk() {
            return DelayStatus::Critical;
        }
        DelayStatus::classify(self.leg1_arrival_delay, critical_after)
    }

    /// Severity of the arrival delay at the destination.
    ///
    /// Critical when more than `critical_after` minutes late, delayed when
    /// late at all. Early arrivals count as on time.
    pub fn arrival_status(&self, critical_after: u32) -> DelayStatus {
        let late = u32::try_from(self.arrival_delay_minutes().max(0)).unwrap_or(u32::MAX);
        DelayStatus::classify(late, critical_after)
    }

    /// The deviation text, or a delay summary when the feed gave no reason.
    pub fn reason_or_delay_summary(&self) -> String {
        if !self.reason.is_empty() {
            return self.reason.clone();
        }
        match self.arrival_delay_minutes() {
            d if d > 0 => format!("Delayed {d} min"),
            _ => NO_REASON.to_string(),
        }
    }
}

fn join_reasons(leg1: &Train, leg2: Option<&Train>) -> String {
    let mut reasons = leg1.reasons();
    if let Some(leg2) = leg2 {
        for r in leg2.reasons() {
            if !reasons.contains(&r) {
                reasons.push(r);
            }
        }
    }
    reasons.join("; ")
}
