//! Announcement feed response DTOs.
//!
//! These types map directly to the Trafikverket `TrainAnnouncement` JSON
//! payload. Almost every field is optional because the feed omits fields
//! rather than sending null, and which fields appear depends on the query.

use serde::Deserialize;

/// Top-level response envelope: `{"RESPONSE": {"RESULT": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(rename = "RESPONSE")]
    pub response: ResponseBody,
}

/// The `RESPONSE` object.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody {
    /// One result set per query in the request.
    #[serde(rename = "RESULT", default)]
    pub result: Vec<ResultSet>,
}

/// One query's results.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    /// Announcements matching the query.
    #[serde(rename = "TrainAnnouncement", default)]
    pub train_announcement: Vec<TrainAnnouncementDto>,

    /// Present instead of results when the query was rejected.
    #[serde(rename = "ERROR")]
    pub error: Option<ApiErrorDto>,
}

/// Error reported inside a result set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ApiErrorDto {
    /// Which part of the request failed.
    pub source: Option<String>,

    /// Human-readable message.
    pub message: Option<String>,
}

/// A single announcement: one train, one station, one event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainAnnouncementDto {
    /// Advertised train number, e.g. "1043".
    pub advertised_train_ident: Option<String>,

    /// Station signature, e.g. "Em".
    pub location_signature: Option<String>,

    /// Timetabled time (ISO 8601).
    pub advertised_time_at_location: Option<String>,

    /// Observed time, once the event has happened.
    pub time_at_location: Option<String>,

    /// Estimated time, while the event is still ahead.
    pub estimated_time_at_location: Option<String>,

    /// Whether the event is cancelled.
    pub canceled: Option<bool>,

    /// "Ankomst" or "Avgang".
    pub activity_type: Option<String>,

    /// Deviation notes.
    pub deviation: Option<Vec<NoteDto>>,

    /// Product and line names, e.g. "Krösatågen".
    pub product_information: Option<Vec<NoteDto>>,
}

/// A coded text note, as sent in `Deviation` and `ProductInformation`.
///
/// Older schema versions send plain strings; newer ones send objects with
/// a code and a description.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NoteDto {
    /// Plain text note
    Text(String),
    /// Coded note
    Coded {
        #[serde(rename = "Code")]
        code: Option<String>,
        #[serde(rename = "Description")]
        description: Option<String>,
    },
}

impl NoteDto {
    /// The note text: the description if present, else the code.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            NoteDto::Text(s) => Some(s.as_str()),
            NoteDto::Coded { code, description } => {
                description.as_deref().or(code.as_deref())
            }
        };
        text.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// A payload as dumped by the host: either the full response envelope or
/// a bare array of announcements.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedPayload {
    /// `[{...}, {...}]`
    ///
    /// Listed first: a one-element array would otherwise also satisfy the
    /// envelope's sequence form.
    Bare(Vec<TrainAnnouncementDto>),
    /// `{"RESPONSE": ...}`
    Envelope(FeedResponse),
}
