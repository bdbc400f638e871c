//! Client for the feed server's Twirp JSON routes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod error;
mod http_client;

pub use error::FeedClientError;
pub use http_client::FeedClientHttp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted: bool,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} by {} at {}",
            self.id,
            self.text,
            self.author_id,
            self.created_at.to_rfc3339()
        )?;
        if self.deleted {
            write!(f, " (deleted)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VkSession {
    pub token: String,
    pub user_id: String,
}

#[async_trait]
pub trait FeedClient {
    async fn add_post(&self, text: String) -> Result<Post, FeedClientError>;
    async fn delete_post(&self, id: i64) -> Result<Post, FeedClientError>;
    async fn get_feed(&self) -> Result<Vec<Post>, FeedClientError>;
    async fn vk_auth_url(&self) -> Result<String, FeedClientError>;
    async fn vk_auth(&self, code: String) -> Result<VkSession, FeedClientError>;
}
