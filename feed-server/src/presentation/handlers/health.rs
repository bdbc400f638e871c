use actix_web::{HttpResponse, Responder, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::presentation::handlers::FeedService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub posts: usize,
    pub timestamp: DateTime<Utc>,
}

#[get("/health")]
pub async fn health(posts: web::Data<FeedService>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        posts: posts.post_count(),
        timestamp: Utc::now(),
    })
}
