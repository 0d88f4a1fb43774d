//! Identity provider configuration lookup (SAML).

use crate::auth::{extract_resource_id, AuthError, CLIENT_VERSION};
use crate::core::middleware::AuthMiddleware;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

const PROVIDER_CONFIG_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v2beta1";

const SAML_CONFIG_ID_PREFIX: &str = "saml.";

/// A SAML identity provider configuration.
///
/// See <http://docs.oasis-open.org/security/saml/Post2.0/sstc-saml-tech-overview-2.0.html>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamlProviderConfig {
    /// The config ID, always prefixed with `saml.`.
    pub id: String,
    pub display_name: String,
    pub enabled: bool,
    pub idp_entity_id: String,
    pub sso_url: String,
    /// IdP signing certificates in the order returned by the server.
    pub x509_certificates: Vec<String>,
    pub rp_entity_id: String,
    pub callback_url: String,
}

/// An identity provider configuration of any supported kind.
///
/// Additional provider kinds (e.g. OIDC) add a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderConfig {
    Saml(SamlProviderConfig),
}

impl ProviderConfig {
    pub fn id(&self) -> &str {
        match self {
            ProviderConfig::Saml(config) => &config.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ProviderConfig::Saml(config) => &config.display_name,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            ProviderConfig::Saml(config) => config.enabled,
        }
    }
}

impl From<SamlProviderConfig> for ProviderConfig {
    fn from(config: SamlProviderConfig) -> Self {
        ProviderConfig::Saml(config)
    }
}

// Wire shape of an inboundSamlConfigs resource. Decode only; the public
// types above are mapped from this so camelCase and nesting quirks stay
// out of the API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SamlConfigResponse {
    name: String,
    idp_config: SamlIdpConfig,
    sp_config: SamlSpConfig,
    display_name: String,
    enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SamlIdpConfig {
    idp_entity_id: String,
    sso_url: String,
    idp_certificates: Vec<SamlCertificate>,
    #[allow(dead_code)]
    sign_request: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SamlSpConfig {
    sp_entity_id: String,
    callback_uri: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SamlCertificate {
    x509_certificate: String,
}

/// Looks up identity provider configurations for a project.
#[derive(Clone)]
pub struct ProviderConfigClient {
    client: ClientWithMiddleware,
    endpoint: String,
    project_id: String,
    version: String,
}

impl ProviderConfigClient {
    pub(crate) fn new(middleware: AuthMiddleware) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(middleware.clone())
            .build();

        let project_id = middleware.key.project_id.clone().unwrap_or_default();

        Self {
            client,
            endpoint: PROVIDER_CONFIG_ENDPOINT.to_string(),
            project_id,
            version: CLIENT_VERSION.to_string(),
        }
    }

    /// Creates a client with a custom HTTP stack and endpoint.
    /// Internal use only, primarily for testing.
    #[allow(dead_code)]
    pub(crate) fn new_with_client(
        client: ClientWithMiddleware,
        endpoint: String,
        project_id: String,
    ) -> Self {
        Self {
            client,
            endpoint,
            project_id,
            version: CLIENT_VERSION.to_string(),
        }
    }

    /// Retrieves the SAML provider configuration with the given ID.
    pub async fn get_saml_provider_config(
        &self,
        id: &str,
    ) -> Result<SamlProviderConfig, AuthError> {
        if !id.starts_with(SAML_CONFIG_ID_PREFIX) {
            return Err(AuthError::InvalidArgument(format!(
                "invalid SAML provider config id: {:?}",
                id
            )));
        }

        let url = self.make_provider_config_url(&format!("/inboundSamlConfigs/{}", id))?;

        let response = self
            .client
            .get(&url)
            .header("X-Client-Version", &self.version)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let result: SamlConfigResponse = serde_json::from_str(&body)?;

        let certs = result
            .idp_config
            .idp_certificates
            .into_iter()
            .map(|cert| cert.x509_certificate)
            .collect();
        Ok(SamlProviderConfig {
            id: extract_resource_id(&result.name).to_string(),
            display_name: result.display_name,
            enabled: result.enabled,
            idp_entity_id: result.idp_config.idp_entity_id,
            sso_url: result.idp_config.sso_url,
            x509_certificates: certs,
            rp_entity_id: result.sp_config.sp_entity_id,
            callback_url: result.sp_config.callback_uri,
        })
    }

    fn make_provider_config_url(&self, path: &str) -> Result<String, AuthError> {
        if self.project_id.is_empty() {
            return Err(AuthError::Configuration(
                "project id not available".to_string(),
            ));
        }

        Ok(format!(
            "{}/projects/{}{}",
            self.endpoint, self.project_id, path
        ))
    }
}
