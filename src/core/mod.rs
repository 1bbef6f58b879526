//! Core infrastructure: error handling and endpoint configuration.

mod error;

pub use error::{PassgateError, Result};

/// Production Passgate API base URL.
pub const PASSGATE_API_BASE: &str = "https://api.passgate.io";

/// Resolve the default API base URL.
///
/// Honors the `PASSGATE_API_URL` environment variable so staging deployments
/// can be targeted without code changes; falls back to [`PASSGATE_API_BASE`].
#[must_use]
pub fn passgate_api_url() -> String {
    std::env::var("PASSGATE_API_URL").unwrap_or_else(|_| PASSGATE_API_BASE.to_string())
}
