//! Doohly request payloads and the response body wrapper.
//!
//! Client-side field names are snake_case; each wire name is spelled out per
//! field. Unset optional fields are left out of the JSON body, while set
//! falsy values such as `false` or `0` are sent.

use crate::Result;
use doohly_core::query::QueryParams;
use doohly_core::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for creating a booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBookingRequest {
    /// Booking name.
    #[serde(rename = "name")]
    pub name: String,
    /// External reference ID.
    #[serde(rename = "externalId", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Number of plays per loop.
    #[serde(rename = "playsPerLoop", default, skip_serializing_if = "Option::is_none")]
    pub plays_per_loop: Option<u32>,
    /// Number of loops per play.
    #[serde(rename = "loopsPerPlay", default, skip_serializing_if = "Option::is_none")]
    pub loops_per_play: Option<u32>,
    /// Whether plays run back to back.
    #[serde(
        rename = "playConsecutively",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub play_consecutively: Option<bool>,
    /// Purchase type, e.g. `Sold` or `Bonus`.
    #[serde(rename = "purchaseType", default, skip_serializing_if = "Option::is_none")]
    pub purchase_type: Option<String>,
    /// Campaign details.
    #[serde(rename = "campaign", default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<Value>,
    /// Schedule configuration.
    #[serde(rename = "schedule", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Value>,
    /// Creative assignments.
    #[serde(
        rename = "assignedCreatives",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_creatives: Option<Vec<Value>>,
    /// Frame assignments.
    #[serde(rename = "assignedFrames", default, skip_serializing_if = "Option::is_none")]
    pub assigned_frames: Option<Vec<Value>>,
    /// Booking tags.
    #[serde(rename = "tags", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// SeeDooh configuration.
    #[serde(rename = "seedooh", default, skip_serializing_if = "Option::is_none")]
    pub seedooh: Option<Value>,
    /// Booking status, e.g. `draft` or `booked`.
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreateBookingRequest {
    /// Create a request with only the required name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_id: None,
            plays_per_loop: None,
            loops_per_play: None,
            play_consecutively: None,
            purchase_type: None,
            campaign: None,
            schedule: None,
            assigned_creatives: None,
            assigned_frames: None,
            tags: None,
            seedooh: None,
            status: None,
        }
    }

    /// Set the external reference ID.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Set plays per loop.
    #[must_use]
    pub fn with_plays_per_loop(mut self, plays: u32) -> Self {
        self.plays_per_loop = Some(plays);
        self
    }

    /// Set loops per play.
    #[must_use]
    pub fn with_loops_per_play(mut self, loops: u32) -> Self {
        self.loops_per_play = Some(loops);
        self
    }

    /// Set whether plays run back to back.
    #[must_use]
    pub fn with_play_consecutively(mut self, consecutive: bool) -> Self {
        self.play_consecutively = Some(consecutive);
        self
    }

    /// Set the purchase type.
    #[must_use]
    pub fn with_purchase_type(mut self, purchase_type: impl Into<String>) -> Self {
        self.purchase_type = Some(purchase_type.into());
        self
    }

    /// Set campaign details.
    #[must_use]
    pub fn with_campaign(mut self, campaign: Value) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Set the schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Value) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Set creative assignments.
    #[must_use]
    pub fn with_assigned_creatives(mut self, creatives: Vec<Value>) -> Self {
        self.assigned_creatives = Some(creatives);
        self
    }

    /// Set frame assignments.
    #[must_use]
    pub fn with_assigned_frames(mut self, frames: Vec<Value>) -> Self {
        self.assigned_frames = Some(frames);
        self
    }

    /// Set tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Set SeeDooh configuration.
    #[must_use]
    pub fn with_seedooh(mut self, seedooh: Value) -> Self {
        self.seedooh = Some(seedooh);
        self
    }

    /// Set the booking status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for a partial booking update.
///
/// Only fields that are set are sent; an empty update sends `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateBookingRequest {
    /// Booking name.
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// External reference ID.
    #[serde(rename = "externalId", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Number of plays per loop.
    #[serde(rename = "playsPerLoop", default, skip_serializing_if = "Option::is_none")]
    pub plays_per_loop: Option<u32>,
    /// Number of loops per play.
    #[serde(rename = "loopsPerPlay", default, skip_serializing_if = "Option::is_none")]
    pub loops_per_play: Option<u32>,
    /// Whether plays run back to back.
    #[serde(
        rename = "playConsecutively",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub play_consecutively: Option<bool>,
    /// Purchase type.
    #[serde(rename = "purchaseType", default, skip_serializing_if = "Option::is_none")]
    pub purchase_type: Option<String>,
    /// Campaign details.
    #[serde(rename = "campaign", default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<Value>,
    /// Schedule configuration.
    #[serde(rename = "schedule", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Value>,
    /// Creative assignments.
    #[serde(
        rename = "assignedCreatives",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_creatives: Option<Vec<Value>>,
    /// Frame assignments.
    #[serde(rename = "assignedFrames", default, skip_serializing_if = "Option::is_none")]
    pub assigned_frames: Option<Vec<Value>>,
    /// Booking tags.
    #[serde(rename = "tags", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// SeeDooh configuration.
    #[serde(rename = "seedooh", default, skip_serializing_if = "Option::is_none")]
    pub seedooh: Option<Value>,
    /// Booking status.
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateBookingRequest {
    /// Create an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the booking name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the external reference ID.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Set plays per loop.
    #[must_use]
    pub fn with_plays_per_loop(mut self, plays: u32) -> Self {
        self.plays_per_loop = Some(plays);
        self
    }

    /// Set loops per play.
    #[must_use]
    pub fn with_loops_per_play(mut self, loops: u32) -> Self {
        self.loops_per_play = Some(loops);
        self
    }

    /// Set whether plays run back to back.
    #[must_use]
    pub fn with_play_consecutively(mut self, consecutive: bool) -> Self {
        self.play_consecutively = Some(consecutive);
        self
    }

    /// Set the purchase type.
    #[must_use]
    pub fn with_purchase_type(mut self, purchase_type: impl Into<String>) -> Self {
        self.purchase_type = Some(purchase_type.into());
        self
    }

    /// Set campaign details.
    #[must_use]
    pub fn with_campaign(mut self, campaign: Value) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Set the schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Value) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Set creative assignments.
    #[must_use]
    pub fn with_assigned_creatives(mut self, creatives: Vec<Value>) -> Self {
        self.assigned_creatives = Some(creatives);
        self
    }

    /// Set frame assignments.
    #[must_use]
    pub fn with_assigned_frames(mut self, frames: Vec<Value>) -> Self {
        self.assigned_frames = Some(frames);
        self
    }

    /// Set tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Set SeeDooh configuration.
    #[must_use]
    pub fn with_seedooh(mut self, seedooh: Value) -> Self {
        self.seedooh = Some(seedooh);
        self
    }

    /// Set the booking status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Query parameters for listing bookings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookingListParams {
    /// Filter by status, e.g. `booked`, `paused` or `completed`.
    pub status: Option<String>,
}

impl BookingListParams {
    /// Filter by status.
    #[must_use]
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }

    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("status", self.status.as_deref());
        params.into_pairs()
    }
}

/// Request payload for a signed creative upload URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignedUploadRequest {
    /// Creative name.
    #[serde(rename = "name")]
    pub name: String,
    /// MIME type, e.g. `image/png` or `video/mp4`.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// File size in bytes.
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    /// Playback scaling mode, e.g. `contain` or `cover`.
    #[serde(
        rename = "playbackScaling",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub playback_scaling: Option<String>,
    /// Library folder path.
    #[serde(rename = "path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

impl SignedUploadRequest {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, file_size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            file_size,
            playback_scaling: None,
            path: None,
        }
    }

    /// Set the playback scaling mode.
    #[must_use]
    pub fn with_playback_scaling(mut self, scaling: impl Into<String>) -> Self {
        self.playback_scaling = Some(scaling.into());
        self
    }

    /// Set the library folder path.
    #[must_use]
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }
}

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON, returned when the content type ends in `json`.
    Json(Value),
    /// Raw body for any other content type.
    Text(String),
    /// No body.
    Empty,
}

impl ResponseBody {
    /// Borrow the JSON value, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Take the JSON value, if any.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the raw text, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if the response had no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Deserialize the JSON body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the body is not JSON or does not match `T`.
    pub fn deserialize<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(Error::from),
            Self::Text(_) => Err(Error::ParseError(
                "response body is not JSON".to_string(),
            )),
            Self::Empty => Err(Error::ParseError("response body is empty".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_booking_uses_wire_names_and_omits_unset() {
        let request = CreateBookingRequest::new("Test Booking")
            .with_status("draft")
            .with_external_id("ext-123");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Test Booking",
                "status": "draft",
                "externalId": "ext-123"
            })
        );
    }

    #[test]
    fn create_booking_sends_falsy_values() {
        let request = CreateBookingRequest::new("Loop")
            .with_play_consecutively(false)
            .with_plays_per_loop(0)
            .with_loops_per_play(0);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["playConsecutively"], json!(false));
        assert_eq!(body["playsPerLoop"], json!(0));
        assert_eq!(body["loopsPerPlay"], json!(0));
    }

    #[test]
    fn create_booking_maps_every_field() {
        let request = CreateBookingRequest::new("Full")
            .with_external_id("e")
            .with_plays_per_loop(2)
            .with_loops_per_play(3)
            .with_play_consecutively(true)
            .with_purchase_type("Sold")
            .with_campaign(json!({"name": "Spring"}))
            .with_schedule(json!({"startDate": "2026-01-01"}))
            .with_assigned_creatives(vec![json!({"id": "c1"})])
            .with_assigned_frames(vec![json!({"id": "f1"})])
            .with_tags(["a", "b"])
            .with_seedooh(json!({"enabled": true}))
            .with_status("booked");

        let body = serde_json::to_value(&request).unwrap();
        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "assignedCreatives",
                "assignedFrames",
                "campaign",
                "externalId",
                "loopsPerPlay",
                "name",
                "playConsecutively",
                "playsPerLoop",
                "purchaseType",
                "schedule",
                "seedooh",
                "status",
                "tags",
            ]
        );
    }

    #[test]
    fn update_booking_is_partial() {
        let request = UpdateBookingRequest::new().with_name("Updated Booking");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Updated Booking"})
        );

        let empty = UpdateBookingRequest::new();
        assert!(empty.is_empty());
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    #[test]
    fn update_booking_sends_explicit_false() {
        let request = UpdateBookingRequest::new().with_play_consecutively(false);
        assert!(!request.is_empty());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"playConsecutively": false})
        );
    }

    #[test]
    fn booking_list_params_to_pairs() {
        assert!(BookingListParams::default().to_pairs().is_empty());
        assert_eq!(
            BookingListParams::with_status("booked").to_pairs(),
            vec![("status", "booked".to_string())]
        );
    }

    #[test]
    fn signed_upload_request_body() {
        let request = SignedUploadRequest::new("creative.png", "image/png", 100_000)
            .with_playback_scaling("contain")
            .with_path(["campaigns", "spring"]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "creative.png",
                "mimeType": "image/png",
                "fileSize": 100_000,
                "playbackScaling": "contain",
                "path": ["campaigns", "spring"]
            })
        );

        let minimal = SignedUploadRequest::new("clip.mp4", "video/mp4", 42);
        assert_eq!(
            serde_json::to_value(&minimal).unwrap(),
            json!({"name": "clip.mp4", "mimeType": "video/mp4", "fileSize": 42})
        );
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Device {
        id: String,
        name: String,
    }

    #[test]
    fn response_body_deserialize() {
        let body = ResponseBody::Json(json!({"id": "device-1", "name": "Lobby"}));
        let device: Device = body.deserialize().unwrap();
        assert_eq!(
            device,
            Device {
                id: "device-1".to_string(),
                name: "Lobby".to_string()
            }
        );

        let err = ResponseBody::Text("ok".to_string())
            .deserialize::<Device>()
            .unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn response_body_accessors() {
        let json = ResponseBody::Json(json!([1, 2]));
        assert_eq!(json.as_json(), Some(&json!([1, 2])));
        assert!(json.as_text().is_none());

        let text = ResponseBody::Text("plain".to_string());
        assert_eq!(text.as_text(), Some("plain"));
        assert!(text.clone().into_json().is_none());

        assert!(ResponseBody::Empty.is_empty());
    }
}
