pub mod health;
pub mod post;
pub mod rpc;

use crate::application::post_service::PostService;
use crate::data::post_repository::InMemoryPostRepository;

pub type FeedService = PostService<InMemoryPostRepository>;
