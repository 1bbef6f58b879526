//! Console resource client for card template management.
//!
//! Console operations require an ENTERPRISE tier account.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{info, instrument};

use crate::client::http::HttpClient;
use crate::client::serialize_params;
use crate::core::Result;
use crate::types::{
    ApiResponse, CardTemplate, CreateCardTemplateParams, EventLogEntry, EventLogFilters,
    UpdateCardTemplateParams,
};

/// Resource client for console operations (card templates and event logs).
///
/// Obtained from [`Passgate::console`](crate::Passgate).
pub struct Console {
    http: Arc<HttpClient>,
}

impl Console {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Create a new card template.
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_template(&self, params: CreateCardTemplateParams) -> Result<CardTemplate> {
        let payload = serialize_params(&params)?;
        let template: CardTemplate = self
            .http
            .post("/v1/console/card-templates", Some(&payload))
            .await?;

        info!(card_template_id = %template.id, "Card template created");

        Ok(template)
    }

    /// Read a card template by id.
    #[instrument(skip(self))]
    pub async fn read_template(&self, card_template_id: &str) -> Result<CardTemplate> {
        let path = format!("/v1/console/card-templates/{card_template_id}");
        let sig_payload = json!({ "id": card_template_id });
        self.http.get(&path, Some(&sig_payload)).await
    }

    /// Update a card template.
    #[instrument(skip(self, params), fields(card_template_id = %params.card_template_id))]
    pub async fn update_template(&self, params: UpdateCardTemplateParams) -> Result<CardTemplate> {
        let path = format!("/v1/console/card-templates/{}", params.card_template_id);
        let payload = serialize_params(&params)?;
        self.http.patch(&path, &payload).await
    }

    /// Publish a card template, making it available for issuing passes.
    #[instrument(skip(self))]
    pub async fn publish_template(&self, card_template_id: &str) -> Result<ApiResponse> {
        let path = format!("/v1/console/card-templates/{card_template_id}/publish");
        let response: ApiResponse = self.http.post(&path, None).await?;

        info!(%card_template_id, "Card template published");

        Ok(response)
    }

    /// Read the event log for a card template, optionally filtered by
    /// device, date range, and event type.
    #[instrument(skip(self, filters))]
    pub async fn event_log(
        &self,
        card_template_id: &str,
        filters: Option<EventLogFilters>,
    ) -> Result<Vec<EventLogEntry>> {
        let path = format!("/v1/console/card-templates/{card_template_id}/logs");
        let sig_payload = event_log_sig_payload(card_template_id, filters);
        self.http.get(&path, Some(&sig_payload)).await
    }
}

fn event_log_sig_payload(card_template_id: &str, filters: Option<EventLogFilters>) -> Value {
    let mut map = Map::new();
    map.insert(
        "id".to_string(),
        Value::String(card_template_id.to_string()),
    );

    if let Some(filters) = filters {
        if let Some(device) = filters.device {
            map.insert("device".to_string(), json!(device));
        }
        if let Some(start_date) = filters.start_date {
            map.insert("start_date".to_string(), Value::String(start_date));
        }
        if let Some(end_date) = filters.end_date {
            map.insert("end_date".to_string(), Value::String(end_date));
        }
        if let Some(event_type) = filters.event_type {
            map.insert("event_type".to_string(), json!(event_type));
        }
    }

    Value::Object(map)
}
