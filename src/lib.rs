pub mod auth;
pub mod core;

use crate::auth::{ProviderConfigClient, TenantManager};
use crate::core::middleware::AuthMiddleware;
use yup_oauth2::ServiceAccountKey;

pub struct FirebaseApp {
    key: ServiceAccountKey,
}

impl FirebaseApp {
    pub fn new(service_account_key: ServiceAccountKey) -> Self {
        Self {
            key: service_account_key,
        }
    }

    pub fn tenant_manager(&self) -> TenantManager {
        TenantManager::new(AuthMiddleware::new(self.key.clone()))
    }

    pub fn provider_configs(&self) -> ProviderConfigClient {
        ProviderConfigClient::new(AuthMiddleware::new(self.key.clone()))
    }
}
