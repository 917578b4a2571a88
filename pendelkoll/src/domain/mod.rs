//! Domain types for the commuter journey tracker.
//!
//! This module contains the core domain model types that represent
//! validated announcement data. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod announcement;
mod error;
mod journey;
mod station;
mod stop;
mod time;
mod train;
mod train_id;

pub use announcement::{ActivityType, RawAnnouncement};
pub use error::DomainError;
pub use journey::{Connection, Journey, LegSpan, NO_REASON, NO_TRANSFER, Transfer, TransferRisk};
pub use station::{InvalidStationCode, StationCode};
pub use stop::{DelayStatus, Stop};
pub use time::{AnnouncementTime, TimeError};
pub use train::Train;
pub use train_id::{InvalidTrainId, TrainId};
