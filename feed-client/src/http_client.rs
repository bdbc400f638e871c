use crate::error::FeedClientError;
use crate::{FeedClient, Post, VkSession};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

const USER_HEADER: &str = "X-User";

#[derive(Clone)]
pub struct FeedClientHttp {
    client: Client,
    base_url: String,
    user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    post: Post,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct AuthUrlResponse {
    url: String,
}

impl FeedClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, FeedClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            user: None,
        })
    }

    /// Identity sent as `X-User` with every call.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    async fn call<B, T>(&self, service: &str, method: &str, body: &B) -> Result<T, FeedClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/twirp/{}/{}", self.base_url, service, method);
        debug!(%url, "twirp call");

        let mut req = self.client.post(url).json(body);
        if let Some(user) = &self.user {
            req = req.header(USER_HEADER, user);
        }

        let resp = req.send().await?;
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(FeedClientError::from_http_response(resp).await)
        }
    }
}

#[async_trait]
impl FeedClient for FeedClientHttp {
    async fn add_post(&self, text: String) -> Result<Post, FeedClientError> {
        let resp: PostResponse = self
            .call("PostService", "AddPost", &json!({ "text": text }))
            .await?;
        Ok(resp.post)
    }

    async fn delete_post(&self, id: i64) -> Result<Post, FeedClientError> {
        let resp: PostResponse = self
            .call("PostService", "DeletePost", &json!({ "id": id }))
            .await?;
        Ok(resp.post)
    }

    async fn get_feed(&self) -> Result<Vec<Post>, FeedClientError> {
        let resp: FeedResponse = self.call("PostService", "GetFeed", &json!({})).await?;
        Ok(resp.posts)
    }

    async fn vk_auth_url(&self) -> Result<String, FeedClientError> {
        let resp: AuthUrlResponse = self
            .call("AuthService", "GetVKAuthURL", &json!({}))
            .await?;
        Ok(resp.url)
    }

    async fn vk_auth(&self, code: String) -> Result<VkSession, FeedClientError> {
        self.call("AuthService", "VKAuth", &json!({ "code": code }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post_json(id: i64, text: &str, deleted: bool) -> Value {
        json!({
            "id": id,
            "author_id": "alice",
            "text": text,
            "created_at": "2025-01-02T03:04:05.123456789Z",
            "deleted": deleted
        })
    }

    #[tokio::test]
    async fn add_post_sends_user_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/PostService/AddPost"))
            .and(header("X-User", "alice"))
            .and(body_json(json!({ "text": "hello" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "post": post_json(1, "hello", false) })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = FeedClientHttp::connect(&format!("{}/", server.uri()))
            .unwrap()
            .with_user("alice");
        let post = client.add_post("hello".into()).await.unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.author_id, "alice");
        assert!(!post.deleted);
        assert_eq!(client.user(), Some("alice"));
    }

    #[tokio::test]
    async fn get_feed_returns_posts_in_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/PostService/GetFeed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "posts": [post_json(2, "second", false), post_json(1, "first", true)]
            })))
            .mount(&server)
            .await;

        let client = FeedClientHttp::connect(&server.uri()).unwrap();
        let feed = client.get_feed().await.unwrap();

        let ids: Vec<i64> = feed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(feed[1].deleted);
    }

    #[tokio::test]
    async fn twirp_errors_are_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/PostService/DeletePost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "not_found",
                "msg": "post not found"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/twirp/PostService/AddPost"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "unauthenticated",
                "msg": "missing user"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/twirp/AuthService/VKAuth"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = FeedClientHttp::connect(&server.uri()).unwrap();

        match client.delete_post(999).await {
            Err(FeedClientError::NotFound(msg)) => assert_eq!(msg, "post not found"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            client.add_post("x".into()).await,
            Err(FeedClientError::Unauthenticated(_))
        ));
        match client.vk_auth("code".into()).await {
            Err(FeedClientError::Server { code, msg }) => {
                assert_eq!(code, "502");
                assert_eq!(msg, "bad gateway");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn vk_calls_decode_responses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/twirp/AuthService/GetVKAuthURL"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "url": "https://oauth.vk.com/authorize?x=1" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/twirp/AuthService/VKAuth"))
            .and(body_json(json!({ "code": "abc" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "token": "tok", "user_id": "12345" })),
            )
            .mount(&server)
            .await;

        let client = FeedClientHttp::connect(&server.uri()).unwrap();
        assert_eq!(
            client.vk_auth_url().await.unwrap(),
            "https://oauth.vk.com/authorize?x=1"
        );
        assert_eq!(
            client.vk_auth("abc".into()).await.unwrap(),
            VkSession {
                token: "tok".into(),
                user_id: "12345".into()
            }
        );
    }
}
