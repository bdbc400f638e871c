use crate::domain::error::DomainError;
use crate::presentation::dto::{AddPostRequest, ListPostsResponse};
use crate::presentation::handlers::FeedService;
use crate::presentation::identity::{CallerIdentity, IdentityPolicy};
use crate::presentation::middleware::request_id;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use tracing::info;

/// JSON extractor config for the REST routes: body errors use the same
/// `{"error", "details"}` shape as every other REST failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        DomainError::InvalidArgument {
            argument: "body",
            message: err.to_string(),
        }
        .into()
    })
}

#[post("/posts")]
pub async fn create_post(
    req: HttpRequest,
    identity: CallerIdentity,
    policy: web::Data<IdentityPolicy>,
    posts: web::Data<FeedService>,
    payload: web::Json<AddPostRequest>,
) -> Result<HttpResponse, DomainError> {
    let author = policy.author_for(identity)?;
    let post = posts.add_post(author, payload.into_inner().text);

    info!(
        request_id = %request_id(&req),
        author_id = %post.author_id,
        post_id = post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(post))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    req: HttpRequest,
    posts: web::Data<FeedService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.delete_post(path.into_inner())?;

    info!(
        request_id = %request_id(&req),
        post_id = post.id,
        "post deleted"
    );

    Ok(HttpResponse::Ok().json(post))
}

#[get("/posts")]
pub async fn get_posts(posts: web::Data<FeedService>) -> HttpResponse {
    let feed = posts.get_feed();
    HttpResponse::Ok().json(ListPostsResponse {
        total: feed.len(),
        posts: feed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::handlers::health::health;
    use crate::presentation::handlers::test_support::{test_app_data, vk_config};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    macro_rules! app {
        ($require_user:expr) => {{
            let (posts, auth, policy) =
                test_app_data($require_user, vk_config("http://127.0.0.1:1".into()));
            test::init_service(
                App::new()
                    .app_data(posts)
                    .app_data(auth)
                    .app_data(policy)
                    .service(
                        web::scope("/api")
                            .app_data(json_config())
                            .service(health)
                            .service(get_posts)
                            .service(create_post)
                            .service(delete_post),
                    ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn create_list_and_delete() {
        let app = app!(false);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("X-User", "dave"))
            .set_json(json!({ "text": "rest post" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["author_id"], "dave");

        let req = test::TestRequest::delete().uri("/api/posts/1").to_request();
        let deleted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted["deleted"], true);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list["total"], 1);
        assert_eq!(list["posts"][0]["deleted"], true);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["status"], "ok");
        assert_eq!(status["posts"], 1);
    }

    #[actix_web::test]
    async fn delete_missing_post_is_404() {
        let app = app!(false);
        let req = test::TestRequest::delete().uri("/api/posts/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "post not found: 999");
        assert_eq!(body["details"]["resource"], 999);
    }

    #[actix_web::test]
    async fn undecodable_body_uses_error_shape() {
        let app = app!(false);
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("body: "));
        assert_eq!(body["details"]["argument"], "body");
    }

    #[actix_web::test]
    async fn create_without_user_is_401_when_required() {
        let app = app!(true);
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "text": "anon" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list["total"], 0);
    }
}
