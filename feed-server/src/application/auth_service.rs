use tracing::instrument;

use crate::domain::error::DomainError;
use crate::infrastructure::vk_oauth::{VkOAuthClient, VkSession};

#[derive(Clone)]
pub struct AuthService {
    vk: VkOAuthClient,
}

impl AuthService {
    pub fn new(vk: VkOAuthClient) -> Self {
        Self { vk }
    }

    pub fn vk_auth_url(&self) -> Result<String, DomainError> {
        self.vk.authorize_url()
    }

    #[instrument(skip(self, code))]
    pub async fn vk_auth(&self, code: &str) -> Result<VkSession, DomainError> {
        self.vk.exchange_code(code).await
    }
}
