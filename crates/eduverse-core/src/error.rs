//! Error types for sessions, attempts and content retrieval.
//!
//! `ContentError` is defined here rather than in `eduverse-providers` so the
//! server and CLI can classify provider failures (not found vs malformed vs
//! transport) without string matching.

use std::fmt;

use thiserror::Error;

use crate::model::QuestionId;

/// Errors raised while creating an assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A question's correct answer is not one of its options. The whole set
    /// is rejected.
    #[error("malformed question {question_id}: correct answer {correct_answer:?} is not one of its options")]
    MalformedQuestion {
        question_id: QuestionId,
        correct_answer: String,
    },
}

/// Errors raised by misusing an [`Attempt`](crate::attempt::Attempt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The attempt was already submitted; its answers are frozen.
    #[error("attempt already submitted")]
    AlreadySubmitted,
}

/// Which kind of subject content a request was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Subjects,
    Examples,
    Assessment,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Subjects => write!(f, "subjects"),
            ContentKind::Examples => write!(f, "examples"),
            ContentKind::Assessment => write!(f, "assessment"),
        }
    }
}

/// Errors that can occur when fetching subject content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// No content of this kind exists for the subject.
    #[error("{kind} not found for subject: {subject}")]
    NotFound { kind: ContentKind, subject: String },

    /// The subject name is not a valid identifier.
    #[error("invalid subject name: {0:?}")]
    InvalidSubject(String),

    /// The content exists but could not be decoded.
    #[error("failed to parse {kind} data for subject {subject}: {message}")]
    Malformed {
        kind: ContentKind,
        subject: String,
        message: String,
    },

    /// The content exists but could not be read.
    #[error("failed to read {kind} for subject {subject}: {message}")]
    Io {
        kind: ContentKind,
        subject: String,
        message: String,
    },

    /// The remote content server returned an error response.
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl ContentError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        match self {
            ContentError::NotFound { .. }
            | ContentError::InvalidSubject(_)
            | ContentError::Malformed { .. } => true,
            ContentError::Server { status, .. } => *status < 500,
            ContentError::Io { .. } | ContentError::Timeout(_) | ContentError::Network(_) => false,
        }
    }

    /// Returns `true` if the content is missing, as opposed to broken.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }

    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::NotFound { .. } => "not_found",
            ContentError::InvalidSubject(_) => "invalid_subject",
            ContentError::Malformed { .. } => MALFORMED_CONTENT_CODE,
            ContentError::Io { .. } => "read_failed",
            ContentError::Server { .. } | ContentError::Timeout(_) | ContentError::Network(_) => {
                "upstream_error"
            }
        }
    }
}

/// Error code sent when stored content exists but cannot be decoded.
pub const MALFORMED_CONTENT_CODE: &str = "malformed_content";
