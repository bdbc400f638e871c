use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::presentation::dto::{
    AddPostRequest, AddPostResponse, DeletePostRequest, DeletePostResponse, GetFeedRequest,
    GetFeedResponse, GetVkAuthUrlRequest, GetVkAuthUrlResponse, VkAuthRequest, VkAuthResponse,
};
use crate::presentation::handlers::FeedService;
use crate::presentation::identity::{CallerIdentity, IdentityPolicy};
use crate::presentation::middleware::request_id;
use crate::presentation::twirp::{Codec, TwirpError};

const PACKAGE: &str = "posts";

/// Request bodies above this are answered with a `malformed` Twirp error.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

pub fn scope() -> Scope {
    web::scope("/twirp")
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/{service}/{method}", web::route().to(dispatch))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RpcMethod {
    AddPost,
    DeletePost,
    GetFeed,
    GetVkAuthUrl,
    VkAuth,
}

impl RpcMethod {
    /// Accepts both `PostService` and the package-qualified `posts.PostService`.
    fn resolve(service: &str, method: &str) -> Option<Self> {
        let service = service
            .strip_prefix(PACKAGE)
            .and_then(|s| s.strip_prefix('.'))
            .unwrap_or(service);
        match (service, method) {
            ("PostService", "AddPost") => Some(RpcMethod::AddPost),
            ("PostService", "DeletePost") => Some(RpcMethod::DeletePost),
            ("PostService", "GetFeed") => Some(RpcMethod::GetFeed),
            ("AuthService", "GetVKAuthURL") => Some(RpcMethod::GetVkAuthUrl),
            ("AuthService", "VKAuth") => Some(RpcMethod::VkAuth),
            _ => None,
        }
    }
}

async fn dispatch(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: Result<web::Bytes, actix_web::Error>,
    identity: CallerIdentity,
    posts: web::Data<FeedService>,
    auth: web::Data<AuthService>,
    policy: web::Data<IdentityPolicy>,
) -> Result<HttpResponse, TwirpError> {
    let (service, method) = path.into_inner();
    let rpc = RpcMethod::resolve(&service, &method).ok_or_else(|| {
        TwirpError::bad_route(format!("no handler for path /twirp/{service}/{method}"))
    })?;
    if req.method() != Method::POST {
        return Err(TwirpError::bad_route("POST required"));
    }
    let codec = Codec::from_request(&req)?;
    let body = body.map_err(|e| TwirpError::malformed(format!("cannot read body: {e}")))?;

    match rpc {
        RpcMethod::AddPost => {
            let input: AddPostRequest = codec.decode(&body)?;
            let author = policy.author_for(identity)?;
            let post = posts.add_post(author, input.text);
            info!(request_id = %request_id(&req), post_id = post.id, "rpc AddPost");
            Ok(codec.respond(AddPostResponse { post }))
        }
        RpcMethod::DeletePost => {
            let input: DeletePostRequest = codec.decode(&body)?;
            let post = posts.delete_post(input.id)?;
            info!(request_id = %request_id(&req), post_id = post.id, "rpc DeletePost");
            Ok(codec.respond(DeletePostResponse { post }))
        }
        RpcMethod::GetFeed => {
            let _: GetFeedRequest = codec.decode(&body)?;
            let feed = posts.get_feed();
            Ok(codec.respond(GetFeedResponse { posts: feed }))
        }
        RpcMethod::GetVkAuthUrl => {
            let _: GetVkAuthUrlRequest = codec.decode(&body)?;
            let url = auth.vk_auth_url()?;
            Ok(codec.respond(GetVkAuthUrlResponse { url }))
        }
        RpcMethod::VkAuth => {
            let input: VkAuthRequest = codec.decode(&body)?;
            let session = auth.vk_auth(&input.code).await?;
            info!(request_id = %request_id(&req), user_id = %session.user_id, "rpc VKAuth");
            Ok(codec.respond(VkAuthResponse::from(session)))
        }
    }
}
