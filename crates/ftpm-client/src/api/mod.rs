//! API client module for communicating with the FTP Manager backend.
//!
//! Plain JSON over HTTP; the log tail endpoint is the only text response.

mod client;
mod error;
mod types;

pub use client::{ApiClient, RequestOptions, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use types::*;
