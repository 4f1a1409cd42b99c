use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use itembox_schema::{ErrorBody, MessageBody};
use thiserror::Error as ThisError;
use tracing::error;

pub(crate) const ITEM_NOT_FOUND: &str = "Item not found";

#[derive(Debug, ThisError)]
pub enum ItemboxError {
    /// A mutation targeted an id with no matching row.
    #[error("Item not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Request rejected: {message}")]
    RequestRejected { status: StatusCode, message: String },

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),
}

impl From<BytesRejection> for ItemboxError {
    fn from(rejection: BytesRejection) -> Self {
        ItemboxError::RequestRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ItemboxError {
    fn into_response(self) -> Response {
        match self {
            ItemboxError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(MessageBody::new(ITEM_NOT_FOUND)),
            )
                .into_response(),

            ItemboxError::RequestRejected { status, message } => {
                (status, Json(ErrorBody::new(message))).into_response()
            }

            // Storage failures surface the raw driver message.
            ItemboxError::DatabaseError(e) => {
                error!(error = %e, "database operation failed");
                internal_error(e.to_string())
            }
            ItemboxError::RactorError(e) => {
                error!(error = %e, "store actor unavailable");
                internal_error(e)
            }

            err @ (ItemboxError::ReqwestError(_)
            | ItemboxError::UrlError(_)
            | ItemboxError::UpstreamStatus(_)) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody::new(err.to_string())),
            )
                .into_response(),
        }
    }
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(message)),
    )
        .into_response()
}
