//! Error types for Doohly operations.
//!
//! Configuration failures are kept apart from API failures: the former mean the
//! caller misused the client, the latter carry the HTTP status, the raw body,
//! and a snapshot of the response that produced them.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Main error type for Doohly operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Client configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The API answered with a non-success status
    #[error("{0}")]
    Api(ApiError),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Could not connect to the API
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Response body could not be parsed
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Doohly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 400
    BadRequest,
    /// 401
    Authentication,
    /// 404
    NotFound,
    /// 429
    RateLimit,
    /// 500-599
    Server,
    /// Any other non-success status
    Other,
}

impl ApiErrorKind {
    /// Classify a status code.
    ///
    /// Returns `None` for 2xx statuses, which are never errors.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        let kind = match status {
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::UNAUTHORIZED => Self::Authentication,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit,
            status if status.is_server_error() => Self::Server,
            _ => Self::Other,
        };

        Some(kind)
    }

    /// Returns the error code for this kind.
    #[must_use]
    pub const fn error_code(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Authentication => "AUTHENTICATION_FAILED",
            Self::NotFound => "NOT_FOUND",
            Self::RateLimit => "RATE_LIMITED",
            Self::Server => "SERVER_ERROR",
            Self::Other => "API_ERROR",
        }
    }
}

/// Snapshot of the HTTP response behind an [`ApiError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseInfo {
    /// Response status
    pub status: StatusCode,
    /// Final request URL
    pub url: Url,
    /// Response headers
    pub headers: HeaderMap,
}

/// A non-success response from the Doohly API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: StatusCode,
    body: String,
    response: Option<ResponseInfo>,
}

impl ApiError {
    /// Create an error for the given status, classifying it by status code.
    ///
    /// A success status is classified as [`ApiErrorKind::Other`].
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status).unwrap_or(ApiErrorKind::Other),
            status,
            body: body.into(),
            response: None,
        }
    }

    /// Attach the response snapshot.
    #[must_use]
    pub fn with_response(mut self, response: ResponseInfo) -> Self {
        self.response = Some(response);
        self
    }

    /// Error classification.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// HTTP status returned by the API.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The response this error was built from, when available.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseInfo> {
        self.response.as_ref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = &self.body;
        match self.kind {
            ApiErrorKind::BadRequest => write!(f, "Bad Request: {body}"),
            ApiErrorKind::Authentication => write!(f, "Authentication failed: {body}"),
            ApiErrorKind::NotFound => write!(f, "Resource not found: {body}"),
            ApiErrorKind::RateLimit => write!(f, "Rate limit exceeded: {body}"),
            ApiErrorKind::Server => write!(f, "Server error: {body}"),
            ApiErrorKind::Other => write!(f, "API Error: {} - {body}", self.status.as_u16()),
        }
    }
}

impl std::error::Error for ApiError {}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::Api(err) => err.kind().error_code(),
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// The API error classification, if this is an API error.
    #[must_use]
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// HTTP status, if this is an API error.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(err) => Some(err.status()),
            _ => None,
        }
    }

    /// Raw response body, if this is an API error.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api(err) => Some(err.body()),
            _ => None,
        }
    }

    /// Response snapshot, if this is an API error that carries one.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseInfo> {
        match self {
            Self::Api(err) => err.response(),
            _ => None,
        }
    }

    /// Returns true for errors caused by caller misuse rather than the network or server.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub fn should_log(&self) -> bool {
        match self {
            Self::Api(err) => matches!(err.kind(), ApiErrorKind::Server | ApiErrorKind::Other),
            Self::ConfigError(_) | Self::ParseError(_) | Self::ServiceUnavailable(_) => true,
            Self::HttpError(_) | Self::Timeout(_) | Self::InvalidEndpoint(_) => false,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(format!("Invalid configuration: {err}"))
    }
}
