//! Authenticated HTTP transport for the Passgate API.
//!
//! Every request goes through one of four verb methods ([`HttpClient::get`],
//! [`HttpClient::post`], [`HttpClient::patch`], [`HttpClient::delete`]) which
//! share the same lifecycle: sign the payload, attach the auth headers,
//! dispatch once, then normalize the response.
//!
//! The transport holds no per-request state and is safe for concurrent use;
//! it performs no retries, backoff, or request ordering.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::auth::{create_auth_headers, create_get_auth_headers};
use crate::core::{PassgateError, Result};
use crate::types::PassgateConfig;

/// HTTP client for making authenticated requests to the Passgate API.
pub struct HttpClient {
    client: Client,
    account_id: String,
    shared_secret: String,
    base_url: String,
}

impl HttpClient {
    /// Create a new transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(config: &PassgateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| PassgateError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            account_id: config.account_id.clone(),
            shared_secret: config.shared_secret.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Make a GET request.
    ///
    /// The signing payload is embedded as the `sig_payload` query parameter;
    /// GET requests carry no body.
    #[instrument(skip(self, sig_payload))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        sig_payload: Option<&Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let (headers, encoded_payload) =
            create_get_auth_headers(&self.account_id, &self.shared_secret, sig_payload)?;

        debug!(%path, "GET request");

        let mut request = self
            .client
            .get(&url)
            .query(&[("sig_payload", encoded_payload.as_str())]);
        for (key, value) in &headers {
            request = request.header(*key, value);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    /// Make a POST request.
    ///
    /// The payload is the request body; with no payload the body is empty and
    /// the marker payload is signed instead.
    #[instrument(skip(self, payload))]
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let headers = create_auth_headers(&self.account_id, &self.shared_secret, payload)?;

        debug!(%path, has_body = payload.is_some(), "POST request");

        let mut request = self.client.post(&url);
        for (key, value) in &headers {
            request = request.header(*key, value);
        }
        if let Some(body) = payload {
            request = request.json(body);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    /// Make a PATCH request. Identical to POST but always carries a body.
    #[instrument(skip(self, payload))]
    pub async fn patch<T: DeserializeOwned>(&self, path: &str, payload: &Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let headers =
            create_auth_headers(&self.account_id, &self.shared_secret, Some(payload))?;

        debug!(%path, "PATCH request");

        let mut request = self.client.patch(&url).json(payload);
        for (key, value) in &headers {
            request = request.header(*key, value);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    /// Make a DELETE request.
    ///
    /// DELETE never carries a caller-supplied payload; the marker payload is
    /// always signed and no body is sent.
    #[instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let headers = create_auth_headers(&self.account_id, &self.shared_secret, None)?;

        debug!(%path, "DELETE request");

        let mut request = self.client.delete(&url);
        for (key, value) in &headers {
            request = request.header(*key, value);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Normalize an HTTP response into decoded data or a classified error.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        warn!(status = status.as_u16(), %message, "API request rejected");
        return Err(PassgateError::api(status.as_u16(), message));
    }

    let body = response.text().await?;
    let value: Value = serde_json::from_str(&body).map_err(|e| {
        PassgateError::decoding_with_source("Response body is not valid JSON", e)
    })?;

    serde_json::from_value(unwrap_envelope(value)).map_err(|e| {
        PassgateError::decoding_with_source("Response body does not match the expected shape", e)
    })
}

/// Unwrap the `{"data": ...}` envelope some responses use around the result.
///
/// The service is inconsistent about wrapping, so both shapes are accepted:
/// a top-level `data` field is unwrapped, anything else decodes as-is.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Extract a human-readable message from an error response body.
///
/// Falls back through `error` field, `message` field, raw body text, and
/// finally `"Unknown error"`, so callers never see a raw byte blob.
fn extract_error_message(body: &str) -> String {
    if body.is_empty() {
        return "Unknown error".to_string();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| value.get("message").and_then(Value::as_str))
            .map_or_else(|| "Unknown error".to_string(), str::to_string),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_extracts_data_field() {
        let unwrapped = unwrap_envelope(json!({ "data": { "id": "x" }, "success": true }));
        assert_eq!(unwrapped, json!({ "id": "x" }));
    }

    #[test]
    fn test_unwrap_envelope_passes_bare_body_through() {
        let bare = unwrap_envelope(json!({ "id": "x" }));
        assert_eq!(bare, json!({ "id": "x" }));

        let array = unwrap_envelope(json!([{ "id": "x" }]));
        assert_eq!(array, json!([{ "id": "x" }]));
    }

    #[test]
    fn test_unwrap_envelope_handles_null_data() {
        let unwrapped = unwrap_envelope(json!({ "data": null }));
        assert_eq!(unwrapped, Value::Null);
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            extract_error_message(r#"{"error": "not found"}"#),
            "not found"
        );
        assert_eq!(
            extract_error_message(r#"{"error": "not found", "message": "ignored"}"#),
            "not found"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_message_field() {
        assert_eq!(extract_error_message(r#"{"message": "oops"}"#), "oops");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(extract_error_message("plain text"), "plain text");
    }

    #[test]
    fn test_error_message_falls_back_to_unknown() {
        assert_eq!(extract_error_message(""), "Unknown error");
        assert_eq!(extract_error_message(r#"{"status": 404}"#), "Unknown error");
    }

    #[test]
    fn test_client_creation() {
        let config = PassgateConfig::new("test_account", "test_secret");
        assert!(HttpClient::new(&config).is_ok());
    }
}
