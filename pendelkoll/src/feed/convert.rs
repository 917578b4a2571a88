//! Conversion from feed DTOs to domain types.
//!
//! Individual bad records are skipped with a warning so one malformed
//! announcement never costs the whole batch. Records missing a train or
//! station are passed through with `None`; the aggregator drops them.

use tracing::{debug, warn};

use crate::domain::{ActivityType, AnnouncementTime, RawAnnouncement, StationCode, TrainId};

use super::error::{ConversionError, FeedError};
use super::types::{FeedPayload, FeedResponse, TrainAnnouncementDto};

/// Decode a payload (envelope or bare array) into announcements.
pub fn parse_response(json: &str) -> Result<Vec<RawAnnouncement>, FeedError> {
    let payload: FeedPayload = serde_json::from_str(json)?;
    match payload {
        FeedPayload::Envelope(response) => convert_response(&response),
        FeedPayload::Bare(announcements) => Ok(convert_announcements(&announcements)),
    }
}

/// Convert every result set in a response.
///
/// Returns `Err` if the feed reported an error for any result set.
pub fn convert_response(response: &FeedResponse) -> Result<Vec<RawAnnouncement>, FeedError> {
    let mut records = Vec::new();

    for set in &response.response.result {
        if let Some(err) = &set.error {
            return Err(FeedError::Api {
                origin: err.source.clone().unwrap_or_default(),
                message: err.message.clone().unwrap_or_default(),
            });
        }
        records.extend(convert_announcements(&set.train_announcement));
    }

    Ok(records)
}

/// Convert announcements, skipping any that fail conversion.
pub fn convert_announcements(items: &[TrainAnnouncementDto]) -> Vec<RawAnnouncement> {
    let mut records = Vec::with_capacity(items.len());

    for item in items {
        match convert_announcement(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    train = item.advertised_train_ident.as_deref().unwrap_or("?"),
                    station = item.location_signature.as_deref().unwrap_or("?"),
                    error = %e,
                    "skipping announcement"
                );
            }
        }
    }

    records
}

/// Convert a single announcement.
///
/// The advertised time is required. Observed and estimated times that
/// fail to parse are treated as absent.
pub fn convert_announcement(item: &TrainAnnouncementDto) -> Result<RawAnnouncement, ConversionError> {
    let scheduled = item
        .advertised_time_at_location
        .as_deref()
        .ok_or(ConversionError::MissingField("AdvertisedTimeAtLocation"))?;
    let scheduled = AnnouncementTime::parse(scheduled).map_err(|_| ConversionError::InvalidTime {
        field: "AdvertisedTimeAtLocation",
        value: scheduled.to_string(),
    })?;

    let train_id = item
        .advertised_train_ident
        .as_deref()
        .and_then(|s| TrainId::new(s.trim()).ok());
    let station = item
        .location_signature
        .as_deref()
        .and_then(|s| StationCode::parse_trimmed(s).ok());

    let deviations = item
        .deviation
        .iter()
        .flatten()
        .filter_map(|d| d.text())
        .map(str::to_string)
        .collect();
    let product = item
        .product_information
        .iter()
        .flatten()
        .find_map(|p| p.text())
        .map(str::to_string);

    Ok(RawAnnouncement {
        train_id,
        station,
        scheduled,
        actual: optional_time("TimeAtLocation", item.time_at_location.as_deref()),
        estimated: optional_time(
            "EstimatedTimeAtLocation",
            item.estimated_time_at_location.as_deref(),
        ),
        canceled: item.canceled.unwrap_or(false),
        activity: item
            .activity_type
            .as_deref()
            .map(ActivityType::from_feed_tag)
            .unwrap_or_default(),
        deviations,
        product,
    })
}

fn optional_time(field: &'static str, value: Option<&str>) -> Option<AnnouncementTime> {
    let value = value?;
    match AnnouncementTime::parse(value) {
        Ok(t) => Some(t),
        Err(_) => {
            debug!(field, value, "ignoring unparseable optional time");
            None
        }
    }
}
