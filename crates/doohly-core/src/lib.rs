//! # doohly-core
//!
//! Core types and utilities for working with the Doohly digital-out-of-home
//! advertising API.
//!
//! This crate provides the error taxonomy, configuration, and HTTP transport
//! settings shared by the [`doohly`](https://docs.rs/doohly) client crate.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Client configuration and validation
//! - [`global`] - Process-wide default configuration holder
//! - [`client`] - HTTP transport defaults and tuning
//! - [`query`] - Query parameter builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod global;
pub mod query;

// Re-export commonly used types
pub use config::DoohlyConfig;
pub use error::{ApiError, ApiErrorKind, Error, ResponseInfo, Result};
