use serde::Deserialize;

pub const VK_AUTHORIZE_URL: &str = "https://oauth.vk.com/authorize";
pub const VK_TOKEN_URL: &str = "https://oauth.vk.com/access_token";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Reject post creation when the caller sends no `X-User` header.
    pub require_user: bool,
    pub default_author_id: String,
    pub vk: VkConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct VkConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let require_user = match std::env::var("REQUIRE_USER") {
            Ok(value) => parse_bool(&value)
                .ok_or_else(|| anyhow::anyhow!("invalid REQUIRE_USER: {}", value))?,
            Err(_) => false,
        };
        let default_author_id =
            std::env::var("DEFAULT_AUTHOR_ID").unwrap_or_else(|_| "1".into());

        Ok(Self {
            host,
            port,
            cors_origins,
            require_user,
            default_author_id,
            vk: VkConfig::from_env(),
        })
    }
}

impl VkConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("VK_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("VK_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: std::env::var("VK_REDIRECT_URI").unwrap_or_default(),
            authorize_url: std::env::var("VK_AUTHORIZE_URL")
                .unwrap_or_else(|_| VK_AUTHORIZE_URL.into()),
            token_url: std::env::var("VK_TOKEN_URL").unwrap_or_else(|_| VK_TOKEN_URL.into()),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
