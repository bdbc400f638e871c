use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::error::DomainError;
use crate::infrastructure::config::VkConfig;

/// Body returned by the VK token endpoint. VK answers with either the token
/// fields or the `error` pair, always as JSON.
#[derive(Debug, Default, Deserialize)]
struct VkTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    user_id: i64,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VkSession {
    pub token: String,
    pub user_id: String,
}

#[derive(Clone)]
pub struct VkOAuthClient {
    http: Client,
    config: VkConfig,
}

impl VkOAuthClient {
    pub fn new(config: VkConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn authorize_url(&self) -> Result<String, DomainError> {
        let url = Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "email"),
            ],
        )
        .map_err(|e| DomainError::Internal(format!("invalid authorize url: {}", e)))?;
        Ok(url.into())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<VkSession, DomainError> {
        let url = Url::parse_with_params(
            &self.config.token_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code", code),
            ],
        )
        .map_err(|e| DomainError::Internal(format!("invalid token url: {}", e)))?;

        let body = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| {
                error!("vk token request failed: {}", e);
                DomainError::Internal(format!("failed to request access token: {}", e))
            })?
            .bytes()
            .await
            .map_err(|e| DomainError::Internal(format!("failed to read response body: {}", e)))?;

        let response: VkTokenResponse = serde_json::from_slice(&body).map_err(|e| {
            DomainError::Internal(format!("failed to decode token response: {}", e))
        })?;

        let error = response.error.unwrap_or_default();
        if !error.is_empty() {
            let mut message = error;
            if let Some(description) = response.error_description.filter(|d| !d.is_empty()) {
                message.push_str(": ");
                message.push_str(&description);
            }
            return Err(DomainError::InvalidArgument {
                argument: "code",
                message,
            });
        }

        let token = response.access_token.unwrap_or_default();
        if token.is_empty() {
            return Err(DomainError::InvalidArgument {
                argument: "code",
                message: "invalid or expired authorization code".into(),
            });
        }

        info!(
            user_id = response.user_id,
            expires_in = response.expires_in,
            "vk token exchanged"
        );
        Ok(VkSession {
            token,
            user_id: response.user_id.to_string(),
        })
    }
}
