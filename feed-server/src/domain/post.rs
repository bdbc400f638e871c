use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

impl Post {
    pub fn new(id: i64, author_id: String, text: String) -> Self {
        Self {
            id,
            author_id,
            text,
            created_at: Utc::now(),
            deleted: false,
        }
    }
}
