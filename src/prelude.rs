//! Commonly used types for quick imports.
//!
//! # Example
//!
//! ```rust,ignore
//! use passgate_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Passgate::new("acct_123", "shared-secret")?;
//!     let passes = client.access_passes.list(None).await?;
//!     println!("Found {} passes", passes.len());
//!     Ok(())
//! }
//! ```

// Core
pub use crate::core::{PassgateError, Result};

// Client
pub use crate::{Passgate, PassgateConfig};
pub use crate::client::{AccessPasses, Console, HttpClient};

// Common types
pub use crate::types::{
    AccessPass, AccessPassState, AccountTier, ApiResponse, CardTemplate, CardTemplateDesign,
    Classification, CreateCardTemplateParams, EventLogDevice, EventLogEntry, EventLogFilters,
    EventLogType, IssueAccessPassParams, ListAccessPassesParams, Platform, Protocol, SupportInfo,
    UpdateAccessPassParams, UpdateCardTemplateParams, UseCase,
};

// Auth
pub use crate::auth::{
    create_auth_headers, create_get_auth_headers, create_signature, encode_payload,
    verify_signature, AuthHeaders,
};
