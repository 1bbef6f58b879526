//! API clients: the authenticated transport and the resource wrappers
//! built on top of it.

mod access_passes;
mod console;
mod http;

pub use access_passes::AccessPasses;
pub use console::Console;
pub use http::HttpClient;

use serde::Serialize;
use serde_json::Value;

use crate::core::{PassgateError, Result};

/// Serialize request parameters into the JSON payload that gets signed and
/// sent.
pub(crate) fn serialize_params<T: Serialize>(params: &T) -> Result<Value> {
    serde_json::to_value(params)
        .map_err(|e| PassgateError::encoding_with_source("Failed to serialize parameters", e))
}
