//! Trafikverket train announcement feed adapter.
//!
//! Decodes `TrainAnnouncement` payloads into [`RawAnnouncement`] records.
//! Fetching is left to an external process; this module only reads what
//! has already been downloaded.
//!
//! [`RawAnnouncement`]: crate::domain::RawAnnouncement

mod convert;
mod error;
mod snapshot;
mod types;

pub use convert::{convert_announcement, convert_announcements, convert_response, parse_response};
pub use error::{ConversionError, FeedError};
pub use snapshot::SnapshotFeed;
pub use types::{
    ApiErrorDto, NoteDto, FeedPayload, FeedResponse, ResponseBody, ResultSet,
    TrainAnnouncementDto,
};
