//! Protobuf messages of the `posts` package, declared with `prost` derives.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

use crate::domain::post::Post as DomainPost;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Post {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub author_id: String,
    #[prost(string, tag = "3")]
    pub text: String,
    #[prost(message, optional, tag = "4")]
    pub created_at: Option<Timestamp>,
    #[prost(bool, tag = "5")]
    pub deleted: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddPostRequest {
    #[prost(string, tag = "1")]
    pub text: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddPostResponse {
    #[prost(message, optional, tag = "1")]
    pub post: Option<Post>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeletePostRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeletePostResponse {
    #[prost(message, optional, tag = "1")]
    pub post: Option<Post>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetFeedRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetFeedResponse {
    #[prost(message, repeated, tag = "1")]
    pub posts: Vec<Post>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VkAuthRequest {
    #[prost(string, tag = "1")]
    pub code: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VkAuthResponse {
    #[prost(string, tag = "1")]
    pub token: String,
    #[prost(string, tag = "2")]
    pub user_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetVkAuthUrlRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetVkAuthUrlResponse {
    #[prost(string, tag = "1")]
    pub url: String,
}

fn timestamp_from_chrono(at: &DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

impl From<DomainPost> for Post {
    fn from(p: DomainPost) -> Self {
        Post {
            id: p.id,
            author_id: p.author_id,
            text: p.text,
            created_at: Some(timestamp_from_chrono(&p.created_at)),
            deleted: p.deleted,
        }
    }
}
