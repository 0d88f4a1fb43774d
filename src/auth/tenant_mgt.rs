//! Tenant management for multi-tenant projects.

use crate::auth::{extract_resource_id, AuthError, CLIENT_VERSION};
use crate::core::middleware::AuthMiddleware;
use crate::core::parse_platform_error;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

const ID_TOOLKIT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v2beta1";

/// A tenant in a multi-tenant project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    /// The tenant ID, the trailing segment of the tenant resource name.
    pub id: String,
    pub display_name: String,
    /// Whether email/password user authentication is allowed.
    pub allow_password_signup: bool,
    /// Whether email link user authentication is enabled.
    pub enable_email_link_signin: bool,
}

/// A handle scoped to a single tenant, for tenant-scoped downstream
/// operations. Holds no connection state of its own.
#[derive(Debug, Clone)]
pub struct TenantClient {
    tenant_id: String,
}

impl TenantClient {
    /// Returns the ID of the tenant this client is scoped to.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

// Wire shape of a tenants resource.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TenantResponse {
    name: String,
    display_name: String,
    allow_password_signup: bool,
    enable_email_link_signin: bool,
}

/// Manages tenants in a multi-tenant project.
#[derive(Clone)]
pub struct TenantManager {
    client: ClientWithMiddleware,
    base_url: String,
    project_id: String,
    version: String,
}

impl TenantManager {
    pub(crate) fn new(middleware: AuthMiddleware) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(middleware.clone())
            .build();

        let project_id = middleware.key.project_id.clone().unwrap_or_default();

        Self {
            client,
            base_url: ID_TOOLKIT_ENDPOINT.to_string(),
            project_id,
            version: CLIENT_VERSION.to_string(),
        }
    }

    /// Creates a manager with a custom HTTP stack and base URL.
    /// Internal use only, primarily for testing.
    #[allow(dead_code)]
    pub(crate) fn new_with_client(
        client: ClientWithMiddleware,
        base_url: String,
        project_id: String,
    ) -> Self {
        Self {
            client,
            base_url,
            project_id,
            version: CLIENT_VERSION.to_string(),
        }
    }

    /// Returns a `TenantClient` scoped to the given tenant. Pure
    /// construction, no network call.
    pub fn auth_for_tenant(&self, tenant_id: &str) -> Result<TenantClient, AuthError> {
        if tenant_id.is_empty() {
            return Err(AuthError::InvalidArgument(
                "tenant id must not be empty".to_string(),
            ));
        }

        Ok(TenantClient {
            tenant_id: tenant_id.to_string(),
        })
    }

    /// Retrieves the tenant identified by the given tenant ID.
    pub async fn tenant(&self, tenant_id: &str) -> Result<Tenant, AuthError> {
        if tenant_id.is_empty() {
            return Err(AuthError::InvalidArgument(
                "tenant id must not be empty".to_string(),
            ));
        }

        let body = self.get(&format!("/tenants/{}", tenant_id)).await?;
        let result: TenantResponse = serde_json::from_str(&body)?;

        Ok(Tenant {
            id: extract_resource_id(&result.name).to_string(),
            display_name: result.display_name,
            allow_password_signup: result.allow_password_signup,
            enable_email_link_signin: result.enable_email_link_signin,
        })
    }

    async fn get(&self, path: &str) -> Result<String, AuthError> {
        if self.project_id.is_empty() {
            return Err(AuthError::Configuration(
                "project id not available".to_string(),
            ));
        }

        let url = format!("{}/projects/{}{}", self.base_url, self.project_id, path);
        let response = self
            .client
            .get(&url)
            .header("X-Client-Version", &self.version)
            .send()
            .await?;

        if !response.status().is_success() {
            // Best effort: a body that is not the expected envelope just
            // yields empty status/message.
            let body = response.text().await.unwrap_or_default();
            let details = parse_platform_error(&body);
            return Err(AuthError::Platform {
                status: details.status,
                message: details.message,
            });
        }

        Ok(response.text().await?)
    }
}
