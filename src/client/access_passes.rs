//! Access pass resource client.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{info, instrument};

use crate::client::http::HttpClient;
use crate::client::serialize_params;
use crate::core::Result;
use crate::types::{
    AccessPass, ApiResponse, IssueAccessPassParams, ListAccessPassesParams,
    UpdateAccessPassParams,
};

/// Resource client for managing access passes.
///
/// Obtained from [`Passgate::access_passes`](crate::Passgate).
pub struct AccessPasses {
    http: Arc<HttpClient>,
}

impl AccessPasses {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Issue a new access pass.
    ///
    /// Returns the created pass, including the installation URL handed to
    /// the pass holder.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let pass = client.access_passes.issue(IssueAccessPassParams {
    ///     card_template_id: "template_123".to_string(),
    ///     card_number: "12345".to_string(),
    ///     full_name: "John Doe".to_string(),
    ///     start_date: "2025-11-01T00:00:00Z".to_string(),
    ///     expiration_date: "2026-11-01T00:00:00Z".to_string(),
    ///     email: Some("john@example.com".to_string()),
    ///     ..Default::default()
    /// }).await?;
    /// println!("Install URL: {:?}", pass.url);
    /// ```
    #[instrument(skip(self, params))]
    pub async fn issue(&self, params: IssueAccessPassParams) -> Result<AccessPass> {
        let payload = serialize_params(&params)?;
        let pass: AccessPass = self.http.post("/v1/access-passes", Some(&payload)).await?;

        info!(access_pass_id = %pass.id, "Access pass issued");

        Ok(pass)
    }

    /// List access passes, optionally filtered by template and state.
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: Option<ListAccessPassesParams>) -> Result<Vec<AccessPass>> {
        let sig_payload = params.map(list_sig_payload);
        self.http
            .get("/v1/access-passes", sig_payload.as_ref())
            .await
    }

    /// Update an access pass.
    #[instrument(skip(self, params), fields(access_pass_id = %params.access_pass_id))]
    pub async fn update(&self, params: UpdateAccessPassParams) -> Result<AccessPass> {
        let path = format!("/v1/access-passes/{}", params.access_pass_id);
        let payload = serialize_params(&params)?;
        self.http.patch(&path, &payload).await
    }

    /// Suspend an access pass. The pass stays installed but stops granting
    /// access until resumed.
    #[instrument(skip(self))]
    pub async fn suspend(&self, access_pass_id: &str) -> Result<ApiResponse> {
        let path = format!("/v1/access-passes/{access_pass_id}/suspend");
        let response: ApiResponse = self.http.post(&path, None).await?;

        info!(%access_pass_id, "Access pass suspended");

        Ok(response)
    }

    /// Resume a suspended access pass.
    #[instrument(skip(self))]
    pub async fn resume(&self, access_pass_id: &str) -> Result<ApiResponse> {
        let path = format!("/v1/access-passes/{access_pass_id}/resume");
        let response: ApiResponse = self.http.post(&path, None).await?;

        info!(%access_pass_id, "Access pass resumed");

        Ok(response)
    }

    /// Unlink an access pass from the holder's device.
    #[instrument(skip(self))]
    pub async fn unlink(&self, access_pass_id: &str) -> Result<ApiResponse> {
        let path = format!("/v1/access-passes/{access_pass_id}/unlink");
        let response: ApiResponse = self.http.post(&path, None).await?;

        info!(%access_pass_id, "Access pass unlinked");

        Ok(response)
    }

    /// Permanently delete an access pass.
    #[instrument(skip(self))]
    pub async fn delete(&self, access_pass_id: &str) -> Result<ApiResponse> {
        let path = format!("/v1/access-passes/{access_pass_id}");
        let response: ApiResponse = self.http.delete(&path).await?;

        info!(%access_pass_id, "Access pass deleted");

        Ok(response)
    }
}

fn list_sig_payload(params: ListAccessPassesParams) -> Value {
    let mut map = Map::new();
    if let Some(template_id) = params.template_id {
        map.insert("template_id".to_string(), Value::String(template_id));
    }
    if let Some(state) = params.state {
        map.insert("state".to_string(), json!(state));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccessPassState;

    #[test]
    fn test_list_sig_payload_keys() {
        let payload = list_sig_payload(ListAccessPassesParams {
            template_id: Some("template_123".to_string()),
            state: Some(AccessPassState::Active),
        });

        assert_eq!(payload["template_id"], "template_123");
        assert_eq!(payload["state"], "active");
    }

    #[test]
    fn test_list_sig_payload_empty_filters() {
        let payload = list_sig_payload(ListAccessPassesParams::default());
        assert_eq!(payload, json!({}));
    }

    #[test]
    fn test_serialize_params_produces_wire_format() {
        let params = IssueAccessPassParams {
            card_template_id: "template_123".to_string(),
            card_number: "12345".to_string(),
            full_name: "John Doe".to_string(),
            start_date: "2025-11-01T00:00:00Z".to_string(),
            expiration_date: "2026-11-01T00:00:00Z".to_string(),
            ..Default::default()
        };

        let value = serialize_params(&params).unwrap();
        assert_eq!(value["cardTemplateId"], "template_123");
        assert!(value.get("metadata").is_none());
    }
}
