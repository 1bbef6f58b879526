//! Common types for the Passgate API.
//!
//! All wire formats use camelCase field names; optional fields are omitted
//! from request bodies when unset. Enum string values mirror the remote
//! service exactly.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::passgate_api_url;

/// Configuration for the Passgate client.
#[derive(Clone)]
pub struct PassgateConfig {
    /// Account identifier sent as `X-ACCT-ID`
    pub account_id: String,
    /// Shared secret used to sign request payloads
    pub shared_secret: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout, applied uniformly to connect/read/write
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl PassgateConfig {
    /// Create a configuration with default base URL and timeout.
    #[must_use]
    pub fn new(account_id: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            shared_secret: shared_secret.into(),
            base_url: passgate_api_url(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("passgate-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// The shared secret must never appear in logs.
impl fmt::Debug for PassgateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassgateConfig")
            .field("account_id", &self.account_id)
            .field("shared_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// State of an access pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessPassState {
    Active,
    Suspended,
    Unlinked,
    Deleted,
    Expired,
}

/// Digital wallet platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Apple,
    Google,
}

/// Access control protocol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Desfire,
    Seos,
    SmartTap,
}

/// Card template use case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    EmployeeBadge,
    Hotel,
}

/// Employee classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    FullTime,
    Contractor,
    PartTime,
    Temporary,
}

/// Account tier level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountTier {
    Basic,
    Professional,
    Enterprise,
}

/// Device filter for event log queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventLogDevice {
    Mobile,
    Watch,
}

/// Event type filter for event log queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventLogType {
    Issue,
    Install,
    Update,
    Suspend,
    Resume,
    Unlink,
}

/// Arbitrary caller-defined metadata attached to a resource.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A digital access pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPass {
    pub id: String,
    pub card_template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    pub start_date: String,
    pub expiration_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub state: AccessPassState,
    /// Installation URL handed to the pass holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for issuing a new access pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueAccessPassParams {
    pub card_template_id: String,
    pub card_number: String,
    pub full_name: String,
    pub start_date: String,
    pub expiration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Parameters for updating an access pass.
///
/// The pass id selects the resource; it is not part of the request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessPassParams {
    #[serde(skip_serializing)]
    pub access_pass_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Filters for listing access passes.
#[derive(Debug, Clone, Default)]
pub struct ListAccessPassesParams {
    /// Restrict to passes issued from this card template
    pub template_id: Option<String>,
    /// Restrict to passes in this state
    pub state: Option<AccessPassState>,
}

/// Design configuration for a card template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplateDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,
}

/// Holder-facing support information for a card template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions_url: Option<String>,
}

/// A card template for digital wallet passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub use_case: UseCase,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_on_multiple_devices: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iphone_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<CardTemplateDesign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_info: Option<SupportInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a card template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardTemplateParams {
    pub name: String,
    pub platform: Platform,
    pub use_case: UseCase,
    pub protocol: Protocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_on_multiple_devices: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iphone_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<CardTemplateDesign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_info: Option<SupportInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Parameters for updating a card template.
///
/// The template id selects the resource; it is not part of the request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardTemplateParams {
    #[serde(skip_serializing)]
    pub card_template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_on_multiple_devices: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iphone_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_info: Option<SupportInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// An entry in a card template's event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Filters for reading a card template's event log.
#[derive(Debug, Clone, Default)]
pub struct EventLogFilters {
    pub device: Option<EventLogDevice>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event_type: Option<EventLogType>,
}

/// Acknowledgement returned by state transitions (suspend, resume, unlink,
/// delete, publish).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
