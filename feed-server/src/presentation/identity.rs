use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::error::DomainError;

pub const USER_HEADER: &str = "x-user";

/// Caller identity as sent in the `X-User` header. Blank values count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub Option<String>);

impl FromRequest for CallerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        ready(Ok(CallerIdentity(user)))
    }
}

/// Decides who authors a new post.
#[derive(Debug, Clone)]
pub struct IdentityPolicy {
    pub require_user: bool,
    pub default_author_id: String,
}

impl IdentityPolicy {
    pub fn author_for(&self, identity: CallerIdentity) -> Result<String, DomainError> {
        match identity.0 {
            Some(user) => Ok(user),
            None if self.require_user => Err(DomainError::Unauthenticated),
            None => Ok(self.default_author_id.clone()),
        }
    }
}
