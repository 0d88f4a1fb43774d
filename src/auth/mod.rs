//! Firebase Auth administration: tenants and identity provider configs.

pub mod provider_config;
pub mod tenant_mgt;

pub use provider_config::{ProviderConfig, ProviderConfigClient, SamlProviderConfig};
pub use tenant_mgt::{Tenant, TenantClient, TenantManager};

use thiserror::Error;


/// Value sent in the `X-Client-Version` header on every API request.
pub(crate) const CLIENT_VERSION: &str = concat!("Rust/Admin/", env!("CARGO_PKG_VERSION"));

/// Errors returned by tenant and provider config operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A caller-supplied identifier was empty or malformed. Raised before
    /// any network access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The client is missing configuration required to build a request,
    /// such as the project ID.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The backend rejected the request with a structured error envelope.
    #[error("platform error [{status}]: {message}")]
    Platform { status: String, message: String },
    /// The response body could not be decoded as JSON.
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),
    /// HTTP request failed below the API layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The middleware stack failed, e.g. token acquisition.
    #[error("middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
}

/// Returns the trailing segment of a slash-delimited resource name, e.g.
/// `projects/p/tenants/t` -> `t`. A name with no slashes is returned as is.
pub(crate) fn extract_resource_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
