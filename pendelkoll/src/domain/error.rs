//! Domain error types.
//!
//! These errors represent data inconsistencies in the domain layer.
//! They are distinct from feed and web errors.

use super::{StationCode, TrainId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A train lists the same station twice
    #[error("train {train} stops at {station} more than once")]
    DuplicateStop { train: TrainId, station: StationCode },

    /// A leg's train does not call at a required station
    #[error("train {train} does not call at {station}")]
    MissingStop { train: TrainId, station: StationCode },

    /// A leg runs against the requested direction
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A configured route is unusable
    #[error("route {route}: {reason}")]
    InvalidRoute { route: String, reason: &'static str },
}
