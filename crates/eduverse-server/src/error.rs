//! Server and API error types

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eduverse_core::{AttemptError, ContentError, IncompleteAnswers, QuestionId, SessionError};

/// Errors that can occur while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The content provider could not be constructed
    #[error("failed to create content provider: {0}")]
    Provider(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body of every API error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    /// Present only for `incomplete_answers`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unanswered: Option<Vec<QuestionId>>,
}

/// Failure of an API request, mapped onto a status code and [`ErrorResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Attempt(#[from] AttemptError),

    #[error("{}", IncompleteAnswers::MESSAGE)]
    Incomplete(IncompleteAnswers),

    /// The request body is not JSON of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidRequest(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Content(e) => match e {
                ContentError::NotFound { .. } => StatusCode::NOT_FOUND,
                ContentError::InvalidSubject(_) => StatusCode::BAD_REQUEST,
                ContentError::Malformed { .. } | ContentError::Io { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                ContentError::Server { .. }
                | ContentError::Timeout(_)
                | ContentError::Network(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Attempt(AttemptError::AlreadySubmitted) => StatusCode::CONFLICT,
            ApiError::Incomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Content(e) => e.code(),
            ApiError::Session(SessionError::MalformedQuestion { .. }) => "malformed_question",
            ApiError::Attempt(AttemptError::AlreadySubmitted) => "already_submitted",
            ApiError::Incomplete(_) => "incomplete_answers",
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(%status, code, "request failed: {}", self);
        } else {
            tracing::warn!(%status, code, "request rejected: {}", self);
        }

        let unanswered = match &self {
            ApiError::Incomplete(incomplete) => Some(incomplete.unanswered.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            unanswered,
        };

        (status, Json(body)).into_response()
    }
}
