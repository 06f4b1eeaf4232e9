//! Request descriptors for Doohly endpoints.
//!
//! An [`ApiRequest`] is built per call and consumed by
//! [`DoohlyClient::execute`](crate::DoohlyClient::execute). Building is kept
//! separate from sending so the method, URL and body of every endpoint can be
//! checked without a server.

use crate::models::{
    BookingListParams, CreateBookingRequest, SignedUploadRequest, UpdateBookingRequest,
};
use crate::Result;
use doohly_core::Error;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Method, path, query and JSON body of a single API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    id: Option<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    /// Create a request for a path relative to the API base URL.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            id: None,
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PATCH` request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a resource ID as the final path segment.
    ///
    /// The ID is percent-encoded, so `/` and `..` in it never change the route.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set query parameters. An empty list sends no query string.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if `body` cannot be represented as JSON.
    pub fn with_json<B>(mut self, body: &B) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL, without the resource ID.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Method, Option<Value>) {
        (self.method, self.body)
    }

    /// Resolve the full request URL against `base`.
    ///
    /// `base` must end in `/` for its path to be kept; see
    /// [`DoohlyConfig::parse_base_url`](doohly_core::DoohlyConfig::parse_base_url).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the path cannot be joined onto `base`.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.join(&self.path).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid Doohly path `{}`: {err}", self.path))
        })?;

        if let Some(id) = &self.id {
            url.path_segments_mut()
                .map_err(|()| {
                    Error::InvalidEndpoint(format!("Base URL `{base}` cannot carry a path"))
                })?
                .push(id);
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.query
                    .iter()
                    .map(|(key, value)| (*key, value.as_str())),
            );
        }

        Ok(url)
    }

    /// `GET v1/devices`
    #[must_use]
    pub fn devices() -> Self {
        Self::get("v1/devices")
    }

    /// `GET v2/devices/:id`
    #[must_use]
    pub fn device(id: &str) -> Self {
        Self::get("v2/devices").with_id(id)
    }

    /// `GET v2/bookings[?status=]`
    #[must_use]
    pub fn bookings(params: &BookingListParams) -> Self {
        Self::get("v2/bookings").with_query(params.to_pairs())
    }

    /// `GET v2/bookings/:id`
    #[must_use]
    pub fn booking(id: &str) -> Self {
        Self::get("v2/bookings").with_id(id)
    }

    /// `POST v2/bookings`
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized.
    pub fn create_booking(request: &CreateBookingRequest) -> Result<Self> {
        Self::post("v2/bookings").with_json(request)
    }

    /// `PATCH v2/bookings/:id`
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized.
    pub fn update_booking(id: &str, request: &UpdateBookingRequest) -> Result<Self> {
        Self::patch("v2/bookings").with_id(id).with_json(request)
    }

    /// `DELETE v2/bookings/:id`
    #[must_use]
    pub fn delete_booking(id: &str) -> Self {
        Self::delete("v2/bookings").with_id(id)
    }

    /// `POST v1/library/creatives/upload`
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized.
    pub fn signed_upload_url(request: &SignedUploadRequest) -> Result<Self> {
        Self::post("v1/library/creatives/upload").with_json(request)
    }

    /// `GET v1/library/creatives/upload/:id`
    #[must_use]
    pub fn creative_upload_status(id: &str) -> Self {
        Self::get("v1/library/creatives/upload").with_id(id)
    }
}
