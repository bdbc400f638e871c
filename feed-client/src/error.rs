use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error ({code}): {msg}")]
    Server { code: String, msg: String },
}

#[derive(Debug, Deserialize)]
struct TwirpErrorBody {
    code: String,
    #[serde(default)]
    msg: String,
}

impl FeedClientError {
    /// Maps a non-2xx Twirp response to an error, falling back to the HTTP
    /// status when the body is not a Twirp error.
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => return FeedClientError::RequestError(e),
        };

        match serde_json::from_str::<TwirpErrorBody>(&text) {
            Ok(body) => Self::from_twirp(body.code, body.msg),
            Err(_) => FeedClientError::Server {
                code: status.as_u16().to_string(),
                msg: text,
            },
        }
    }

    fn from_twirp(code: String, msg: String) -> Self {
        match code.as_str() {
            "not_found" => FeedClientError::NotFound(msg),
            "unauthenticated" => FeedClientError::Unauthenticated(msg),
            "invalid_argument" | "malformed" => FeedClientError::InvalidRequest(msg),
            _ => FeedClientError::Server { code, msg },
        }
    }
}
