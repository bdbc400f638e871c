//! Twirp wire protocol: POST-only routes, JSON or protobuf bodies chosen by
//! `Content-Type`, and `{code, msg, meta}` error bodies.

use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use prost::Message;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_PROTOBUF: &str = "application/protobuf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwirpCode {
    BadRoute,
    Malformed,
    InvalidArgument,
    NotFound,
    Unauthenticated,
    Internal,
}

impl TwirpCode {
    pub fn status(self) -> StatusCode {
        match self {
            TwirpCode::BadRoute | TwirpCode::NotFound => StatusCode::NOT_FOUND,
            TwirpCode::Malformed | TwirpCode::InvalidArgument => StatusCode::BAD_REQUEST,
            TwirpCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            TwirpCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwirpError {
    pub code: TwirpCode,
    pub msg: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl TwirpError {
    pub fn new(code: TwirpCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            meta: BTreeMap::new(),
        }
    }

    pub fn bad_route(msg: impl Into<String>) -> Self {
        Self::new(TwirpCode::BadRoute, msg)
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(TwirpCode::Malformed, msg)
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<String>) -> Self {
        self.meta.insert(key.to_owned(), value.into());
        self
    }
}

impl fmt::Display for TwirpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "twirp error {:?}: {}", self.code, self.msg)
    }
}

impl std::error::Error for TwirpError {}

impl ResponseError for TwirpError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<DomainError> for TwirpError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PostNotFound(_) => TwirpError::new(TwirpCode::NotFound, "post not found"),
            DomainError::Unauthenticated => {
                TwirpError::new(TwirpCode::Unauthenticated, "missing user")
            }
            DomainError::InvalidArgument { argument, message } => {
                TwirpError::new(TwirpCode::InvalidArgument, format!("{argument} {message}"))
                    .with_meta("argument", argument)
            }
            DomainError::Internal(msg) => TwirpError::new(TwirpCode::Internal, msg),
        }
    }
}

/// Request type that can also arrive as a protobuf message.
pub trait FromProto: Sized {
    type Proto: Message + Default;

    fn from_proto(proto: Self::Proto) -> Self;
}

/// Response type that can also be sent as a protobuf message.
pub trait IntoProto {
    type Proto: Message;

    fn into_proto(self) -> Self::Proto;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Json,
    Protobuf,
}

impl Codec {
    /// Missing `Content-Type` is treated as JSON.
    pub fn from_request(req: &HttpRequest) -> Result<Self, TwirpError> {
        let Some(value) = req.headers().get(CONTENT_TYPE) else {
            return Ok(Codec::Json);
        };
        let value = value
            .to_str()
            .map_err(|_| TwirpError::bad_route("unreadable Content-Type"))?;
        let mime = value.split(';').next().unwrap_or_default().trim();
        match mime {
            CONTENT_TYPE_JSON | "" => Ok(Codec::Json),
            CONTENT_TYPE_PROTOBUF => Ok(Codec::Protobuf),
            other => Err(TwirpError::bad_route(format!(
                "unexpected Content-Type: {other}"
            ))),
        }
    }

    pub fn decode<T>(self, body: &[u8]) -> Result<T, TwirpError>
    where
        T: FromProto + DeserializeOwned,
    {
        match self {
            Codec::Json => {
                let body = if body.iter().all(u8::is_ascii_whitespace) {
                    b"{}".as_slice()
                } else {
                    body
                };
                serde_json::from_slice(body)
                    .map_err(|e| TwirpError::malformed(format!("cannot decode json: {e}")))
            }
            Codec::Protobuf => {
                let proto = T::Proto::decode(body)
                    .map_err(|e| TwirpError::malformed(format!("cannot decode protobuf: {e}")))?;
                Ok(T::from_proto(proto))
            }
        }
    }

    pub fn respond<T>(self, message: T) -> HttpResponse
    where
        T: IntoProto + Serialize,
    {
        match self {
            Codec::Json => HttpResponse::Ok()
                .content_type(CONTENT_TYPE_JSON)
                .json(message),
            Codec::Protobuf => HttpResponse::Ok()
                .content_type(CONTENT_TYPE_PROTOBUF)
                .body(message.into_proto().encode_to_vec()),
        }
    }
}
