//! # Passgate SDK
//!
//! A Rust SDK for the [Passgate](https://passgate.io) digital access control
//! platform.
//!
//! ## Features
//!
//! - **Access Passes** - Issue, list, update, and transition digital access
//!   passes for Apple Wallet and Google Wallet
//! - **Console** - Manage card templates and read event logs (Enterprise tier)
//! - **Authentication** - Deterministic payload signing on every request
//! - Full async/await support with type-safe responses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use passgate_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Passgate::new("acct_123", "shared-secret")?;
//!
//!     let pass = client.access_passes.issue(IssueAccessPassParams {
//!         card_template_id: "template_123".to_string(),
//!         card_number: "12345".to_string(),
//!         full_name: "John Doe".to_string(),
//!         start_date: "2025-11-01T00:00:00Z".to_string(),
//!         expiration_date: "2026-11-01T00:00:00Z".to_string(),
//!         email: Some("john@example.com".to_string()),
//!         ..Default::default()
//!     }).await?;
//!
//!     println!("Issued pass {} ({:?})", pass.id, pass.url);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`core`] - Error handling and endpoint configuration
//! - [`auth`] - Payload encoding, signing, and auth header assembly
//! - [`types`] - Common types (AccessPass, CardTemplate, enums, params)
//! - [`client`] - Authenticated transport and resource clients

// Core infrastructure
pub mod core;

// Request signing
pub mod auth;

// Type definitions
pub mod types;

// API clients
pub mod client;

// Prelude for convenient imports
pub mod prelude;

use std::sync::Arc;

use crate::client::{AccessPasses, Console, HttpClient};
use crate::core::{PassgateError, Result};
pub use crate::types::PassgateConfig;

// ============================================================================
// Core Re-exports
// ============================================================================

pub use crate::core::{passgate_api_url, PASSGATE_API_BASE};

// ============================================================================
// Type Re-exports
// ============================================================================

pub use crate::types::{
    AccessPass, AccessPassState, AccountTier, ApiResponse, CardTemplate, CardTemplateDesign,
    Classification, CreateCardTemplateParams, EventLogDevice, EventLogEntry, EventLogFilters,
    EventLogType, IssueAccessPassParams, ListAccessPassesParams, Metadata, Platform, Protocol,
    SupportInfo, UpdateAccessPassParams, UpdateCardTemplateParams, UseCase,
};

// ============================================================================
// Auth Re-exports
// ============================================================================

pub use crate::auth::{
    create_auth_headers, create_get_auth_headers, create_signature, encode_payload,
    verify_signature, AuthHeaders, ACCOUNT_ID_HEADER, CONTENT_TYPE_HEADER, SIGNATURE_HEADER,
};

/// Main client for the Passgate API.
///
/// Resources are exposed as fields:
///
/// - [`access_passes`](Self::access_passes) - Manage digital access passes
/// - [`console`](Self::console) - Manage card templates and event logs
///   (Enterprise tier)
///
/// The client holds no mutable state and can be shared freely across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use passgate_sdk::Passgate;
///
/// let client = Passgate::new("acct_123", "shared-secret")?;
/// let health = client.health().await?;
/// println!("API status: {health}");
/// ```
pub struct Passgate {
    http: Arc<HttpClient>,
    /// Resource for managing access passes
    pub access_passes: AccessPasses,
    /// Resource for console operations (Enterprise tier)
    pub console: Console,
}

impl Passgate {
    /// Create a client with the default base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns a config error if the account id or shared secret is empty,
    /// or if the HTTP client cannot be initialized.
    pub fn new(
        account_id: impl Into<String>,
        shared_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(PassgateConfig::new(account_id, shared_secret))
    }

    /// Create a client with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the account id or shared secret is empty,
    /// the base URL does not parse, or the HTTP client cannot be initialized.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    /// use passgate_sdk::{Passgate, PassgateConfig};
    ///
    /// let config = PassgateConfig::new("acct_123", "shared-secret")
    ///     .with_base_url("https://api.staging.passgate.io")
    ///     .with_timeout(Duration::from_secs(60));
    ///
    /// let client = Passgate::with_config(config)?;
    /// ```
    pub fn with_config(config: PassgateConfig) -> Result<Self> {
        if config.account_id.is_empty() {
            return Err(PassgateError::config("Account ID is required"));
        }
        if config.shared_secret.is_empty() {
            return Err(PassgateError::config("Shared secret is required"));
        }
        url::Url::parse(&config.base_url)?;

        let http = Arc::new(HttpClient::new(&config)?);

        Ok(Self {
            access_passes: AccessPasses::new(Arc::clone(&http)),
            console: Console::new(Arc::clone(&http)),
            http,
        })
    }

    /// Check the health status of the Passgate API.
    pub async fn health(&self) -> Result<serde_json::Value> {
        self.http.get("/health", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Passgate::new("test_account", "test_secret");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_empty_account_id() {
        let result = Passgate::new("", "test_secret");
        match result {
            Err(PassgateError::Config { message }) => assert!(message.contains("Account ID")),
            _ => panic!("expected config error"),
        }
    }

    #[test]
    fn test_client_rejects_empty_shared_secret() {
        let result = Passgate::new("test_account", "");
        match result {
            Err(PassgateError::Config { message }) => {
                assert!(message.contains("Shared secret"));
            }
            _ => panic!("expected config error"),
        }
    }

    #[test]
    fn test_client_rejects_unparseable_base_url() {
        let config = PassgateConfig::new("account", "secret").with_base_url("not a url");
        let result = Passgate::with_config(config);
        match result {
            Err(PassgateError::Config { message }) => assert!(message.contains("Invalid URL")),
            _ => panic!("expected config error"),
        }
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = PassgateConfig::new("account", "secret")
            .with_base_url("https://api.staging.passgate.io")
            .with_timeout(std::time::Duration::from_secs(45));

        assert!(Passgate::with_config(config).is_ok());
    }
}
