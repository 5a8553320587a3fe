use std::io;

use axum::{http::StatusCode, response::IntoResponse};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not Found")]
    NotFound,

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("{0}")]
    FrontMatter(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
            Error::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Error::Reqwest(e) => {
                tracing::error!(%e, "upstream request error");
                (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
            }
            Error::Io(e) => {
                tracing::error!(%e, "file io error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            e @ (Error::Config(_)
            | Error::FrontMatter(_)
            | Error::Json(_)
            | Error::Yaml(_)
            | Error::Toml(_)) => {
                tracing::error!(%e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
