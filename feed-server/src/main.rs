mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use application::auth_service::AuthService;
use application::post_service::PostService;
use data::post_repository::InMemoryPostRepository;
use infrastructure::config::AppConfig;
use infrastructure::logging::init_logging;
use infrastructure::vk_oauth::VkOAuthClient;
use presentation::handlers;
use presentation::identity::IdentityPolicy;
use presentation::middleware::RequestTracing;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    let post_repo = Arc::new(InMemoryPostRepository::new());
    let post_service = PostService::new(Arc::clone(&post_repo));
    let auth_service = AuthService::new(VkOAuthClient::new(config.vk.clone()));
    let policy = IdentityPolicy {
        require_user: config.require_user,
        default_author_id: config.default_author_id.clone(),
    };

    let post_data = web::Data::new(post_service);
    let auth_data = web::Data::new(auth_service);
    let policy_data = web::Data::new(policy);
    let config_data = config.clone();

    info!(
        host = %config.host,
        port = config.port,
        require_user = config.require_user,
        "feed server starting"
    );

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(RequestTracing)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(post_data.clone())
            .app_data(auth_data.clone())
            .app_data(policy_data.clone())
            .service(handlers::rpc::scope())
            .service(
                web::scope("/api")
                    .app_data(handlers::post::json_config())
                    .service(handlers::health::health)
                    .service(handlers::post::get_posts)
                    .service(handlers::post::create_post)
                    .service(handlers::post::delete_post),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("feed server stopped");
    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::HeaderName::from_static("x-user"),
            actix_web::http::header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in &config.cors_origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
