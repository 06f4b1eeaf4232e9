//! Asynchronous Doohly client implementation.

use crate::models::{
    BookingListParams, CreateBookingRequest, ResponseBody, SignedUploadRequest,
    UpdateBookingRequest,
};
use crate::request::ApiRequest;
use crate::Result;
use doohly_core::client::ClientConfig;
use doohly_core::global;
use doohly_core::{ApiError, DoohlyConfig, Error, ResponseInfo};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("doohly-rust/", env!("CARGO_PKG_VERSION"));

/// Builder for [`DoohlyClient`].
///
/// Explicit values set on the builder win over the configuration it was
/// created from.
#[derive(Debug, Clone)]
pub struct DoohlyClientBuilder {
    config: DoohlyConfig,
    api_token: Option<String>,
    api_base_url: Option<String>,
    http_config: Option<ClientConfig>,
}

impl DoohlyClientBuilder {
    /// Create a builder from a snapshot of the global default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(global::configuration())
    }

    /// Create a builder from an explicit configuration.
    #[must_use]
    pub fn from_config(config: DoohlyConfig) -> Self {
        Self {
            config,
            api_token: None,
            api_base_url: None,
            http_config: None,
        }
    }

    /// Override the API token.
    #[must_use]
    pub fn with_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(api_base_url.into());
        self
    }

    /// Override the HTTP transport configuration.
    ///
    /// When set, its timeouts and logging flag replace those of the
    /// [`DoohlyConfig`].
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = Some(http_config);
        self
    }

    /// Finalise the builder and create the [`DoohlyClient`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the resolved token is missing or
    /// empty, if the configuration is out of range, or if the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<DoohlyClient> {
        let mut config = self.config;
        if let Some(api_token) = self.api_token {
            config.api_token = Some(api_token);
        }
        if let Some(api_base_url) = self.api_base_url {
            config.api_base_url = api_base_url;
        }

        config.validate_config()?;
        let base_url = config.parse_base_url()?;

        let http_config = self
            .http_config
            .unwrap_or_else(|| ClientConfig::new().with_doohly_config(&config));

        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(http_config.timeout)
            .connect_timeout(http_config.connect_timeout)
            .pool_idle_timeout(http_config.pool_idle_timeout)
            .pool_max_idle_per_host(http_config.pool_max_idle_per_host)
            .redirect(Policy::none())
            .build()
            .map_err(|err| {
                Error::ConfigError(format!("Failed to build Doohly HTTP client: {err}"))
            })?;

        // validate_config guarantees the token is present
        let api_token = config.api_token.unwrap_or_default();

        debug!(base_url = %base_url, "Built Doohly client");

        Ok(DoohlyClient {
            http,
            base_url,
            api_token,
            log_requests: http_config.enable_logging,
        })
    }
}

impl Default for DoohlyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Asynchronous client for the Doohly public API.
///
/// Every call is a single request/response round trip. Failures are returned
/// as typed errors and never retried.
#[derive(Clone)]
pub struct DoohlyClient {
    http: Client,
    base_url: Url,
    api_token: String,
    log_requests: bool,
}

impl std::fmt::Debug for DoohlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoohlyClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .field("log_requests", &self.log_requests)
            .finish_non_exhaustive()
    }
}

impl DoohlyClient {
    /// Construct a client with an explicit token; everything else comes from
    /// the global default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        DoohlyClientBuilder::new().with_token(api_token).build()
    }

    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration has no token or is invalid.
    pub fn from_config(config: &DoohlyConfig) -> Result<Self> {
        DoohlyClientBuilder::from_config(config.clone()).build()
    }

    /// Start a builder from the global default configuration.
    #[must_use]
    pub fn builder() -> DoohlyClientBuilder {
        DoohlyClientBuilder::new()
    }

    /// The token sent as the bearer credential.
    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// The API base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.base_url
    }

    /// List devices.
    pub async fn devices(&self) -> Result<ResponseBody> {
        self.execute(ApiRequest::devices()).await
    }

    /// Fetch a device by ID.
    pub async fn device(&self, id: &str) -> Result<ResponseBody> {
        self.execute(ApiRequest::device(id)).await
    }

    /// List bookings, optionally filtered by status.
    pub async fn bookings(&self, params: &BookingListParams) -> Result<ResponseBody> {
        self.execute(ApiRequest::bookings(params)).await
    }

    /// Fetch a booking by ID.
    pub async fn booking(&self, id: &str) -> Result<ResponseBody> {
        self.execute(ApiRequest::booking(id)).await
    }

    /// Create a booking.
    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<ResponseBody> {
        self.execute(ApiRequest::create_booking(request)?).await
    }

    /// Partially update a booking; unset fields are left untouched.
    pub async fn update_booking(
        &self,
        id: &str,
        request: &UpdateBookingRequest,
    ) -> Result<ResponseBody> {
        self.execute(ApiRequest::update_booking(id, request)?).await
    }

    /// Delete a booking.
    pub async fn delete_booking(&self, id: &str) -> Result<ResponseBody> {
        self.execute(ApiRequest::delete_booking(id)).await
    }

    /// Request a signed URL for uploading a creative.
    pub async fn signed_upload_url(&self, request: &SignedUploadRequest) -> Result<ResponseBody> {
        self.execute(ApiRequest::signed_upload_url(request)?).await
    }

    /// Fetch the status of a creative upload.
    pub async fn creative_upload_status(&self, id: &str) -> Result<ResponseBody> {
        self.execute(ApiRequest::creative_upload_status(id)).await
    }

    /// Send a request and map its response.
    ///
    /// Useful for endpoints without a dedicated method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for any non-2xx status, a transport error if no
    /// response was received, or [`Error::ParseError`] if a JSON body is malformed.
    pub async fn execute(&self, request: ApiRequest) -> Result<ResponseBody> {
        let url = request.url(&self.base_url)?;
        let path = url.path().to_string();
        let (method, body) = request.into_parts();

        if self.log_requests {
            info!(%method, %url, "Sending Doohly request");
        } else {
            debug!(%method, path = %path, "Sending Doohly request");
        }

        let mut builder = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json");

        if let Some(payload) = &body {
            builder = builder.json(payload);
        }

        let result = match builder.send().await {
            Ok(response) => self.handle_response(response).await,
            Err(err) => Err(Error::from(err)),
        };

        if let Err(err) = &result {
            if err.should_log() {
                warn!(%method, path = %path, code = err.error_code(), "Doohly request failed: {err}");
            } else {
                debug!(%method, path = %path, code = err.error_code(), "Doohly request failed: {err}");
            }
        }

        result
    }

    async fn handle_response(&self, response: Response) -> Result<ResponseBody> {
        let info = ResponseInfo {
            status: response.status(),
            url: response.url().clone(),
            headers: response.headers().clone(),
        };
        let text = response.text().await?;

        if self.log_requests {
            info!(status = info.status.as_u16(), url = %info.url, "Received Doohly response");
        }

        if info.status.is_success() {
            return parse_success_body(&info.headers, text);
        }

        Err(map_status_to_error(info.status, text, info))
    }
}

fn map_status_to_error(status: StatusCode, text: String, info: ResponseInfo) -> Error {
    Error::Api(ApiError::new(status, text).with_response(info))
}

fn parse_success_body(headers: &HeaderMap, text: String) -> Result<ResponseBody> {
    if text.trim().is_empty() {
        return Ok(ResponseBody::Empty);
    }

    if is_json_content_type(headers) {
        return serde_json::from_str(&text)
            .map(ResponseBody::Json)
            .map_err(|err| Error::ParseError(format!("Invalid JSON in Doohly response: {err}")));
    }

    Ok(ResponseBody::Text(text))
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().to_ascii_lowercase().ends_with("json"))
}
