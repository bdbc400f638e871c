use crate::domain::post::Post;
use crate::infrastructure::vk_oauth::VkSession;
use crate::presentation::proto;
use crate::presentation::twirp::{FromProto, IntoProto};
use serde::{Deserialize, Deserializer, Serialize};

/// Missing and `null` fields both decode to the type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ======================= POSTS =======================

#[derive(Debug, Default, Deserialize)]
pub struct AddPostRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AddPostResponse {
    pub post: Post,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeletePostRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    pub post: Post,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetFeedRequest {}

#[derive(Debug, Serialize)]
pub struct GetFeedResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

// ======================= AUTH =======================

#[derive(Debug, Default, Deserialize)]
pub struct GetVkAuthUrlRequest {}

#[derive(Debug, Serialize)]
pub struct GetVkAuthUrlResponse {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VkAuthRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VkAuthResponse {
    pub token: String,
    pub user_id: String,
}

impl From<VkSession> for VkAuthResponse {
    fn from(session: VkSession) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
        }
    }
}

// ======================= Protobuf =======================

impl FromProto for AddPostRequest {
    type Proto = proto::AddPostRequest;

    fn from_proto(proto: Self::Proto) -> Self {
        Self { text: proto.text }
    }
}

impl FromProto for DeletePostRequest {
    type Proto = proto::DeletePostRequest;

    fn from_proto(proto: Self::Proto) -> Self {
        Self { id: proto.id }
    }
}

impl FromProto for GetFeedRequest {
    type Proto = proto::GetFeedRequest;

    fn from_proto(_: Self::Proto) -> Self {
        Self {}
    }
}

impl FromProto for GetVkAuthUrlRequest {
    type Proto = proto::GetVkAuthUrlRequest;

    fn from_proto(_: Self::Proto) -> Self {
        Self {}
    }
}

impl FromProto for VkAuthRequest {
    type Proto = proto::VkAuthRequest;

    fn from_proto(proto: Self::Proto) -> Self {
        Self { code: proto.code }
    }
}

impl IntoProto for AddPostResponse {
    type Proto = proto::AddPostResponse;

    fn into_proto(self) -> Self::Proto {
        proto::AddPostResponse {
            post: Some(self.post.into()),
        }
    }
}

impl IntoProto for DeletePostResponse {
    type Proto = proto::DeletePostResponse;

    fn into_proto(self) -> Self::Proto {
        proto::DeletePostResponse {
            post: Some(self.post.into()),
        }
    }
}

impl IntoProto for GetFeedResponse {
    type Proto = proto::GetFeedResponse;

    fn into_proto(self) -> Self::Proto {
        proto::GetFeedResponse {
            posts: self.posts.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoProto for GetVkAuthUrlResponse {
    type Proto = proto::GetVkAuthUrlResponse;

    fn into_proto(self) -> Self::Proto {
        proto::GetVkAuthUrlResponse { url: self.url }
    }
}

impl IntoProto for VkAuthResponse {
    type Proto = proto::VkAuthResponse;

    fn into_proto(self) -> Self::Proto {
        proto::VkAuthResponse {
            token: self.token,
            user_id: self.user_id,
        }
    }
}
