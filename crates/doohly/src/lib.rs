//! Doohly API client.
//!
//! Typed, asynchronous access to the Doohly digital-out-of-home advertising
//! platform: devices, bookings and creative uploads. Non-success responses are
//! mapped to [`doohly_core::Error::Api`] with an [`ApiErrorKind`] derived from
//! the HTTP status.
//!
//! ```no_run
//! # async fn run() -> doohly::Result<()> {
//! use doohly::{BookingListParams, DoohlyClient};
//!
//! let client = DoohlyClient::new("my-token")?;
//! let booked = client.bookings(&BookingListParams::with_status("booked")).await?;
//! println!("{:?}", booked.as_json());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod request;

pub use client::{DoohlyClient, DoohlyClientBuilder};
pub use doohly_core::global::{configuration, configure, reset_configuration, set_configuration};
pub use doohly_core::{ApiError, ApiErrorKind, DoohlyConfig, Error, ResponseInfo};
pub use models::{
    BookingListParams, CreateBookingRequest, ResponseBody, SignedUploadRequest,
    UpdateBookingRequest,
};
pub use request::ApiRequest;

/// Convenient result alias that reuses the shared Doohly error type.
pub type Result<T> = doohly_core::Result<T>;

/// Build a client from the global default configuration.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if no token has been configured.
pub fn client() -> Result<DoohlyClient> {
    DoohlyClientBuilder::new().build()
}
