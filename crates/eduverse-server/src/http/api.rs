//! REST API handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use eduverse_core::{Attempt, Example, Question, ScoreResult, SubmitOutcome};

use crate::error::ApiError;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Name of the backing content provider.
    pub provider: String,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        provider: state.provider.name().to_string(),
    })
}

/// GET /api/subjects
pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.provider.list_subjects().await?))
}

/// GET /api/examples/:subject
pub async fn examples(
    State(state): State<Arc<AppState>>,
    Path(subject): Path<String>,
) -> Result<Json<Vec<Example>>, ApiError> {
    Ok(Json(state.provider.examples(&subject).await?))
}

/// GET /api/assessment/:subject
pub async fn assessment(
    State(state): State<Arc<AppState>>,
    Path(subject): Path<String>,
) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(state.provider.assessment(&subject).await?))
}

/// Body of a score request: selected option per question id.
///
/// A `null` selection is the same as leaving the question out.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub answers: HashMap<String, Option<String>>,
}

/// A scored submission.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub subject: String,
    #[serde(flatten)]
    pub result: ScoreResult,
    /// Feedback shown to the learner.
    pub message: String,
}

/// POST /api/assessment/:subject/score
///
/// Runs a whole attempt server-side: loads the questions, records every
/// submitted answer and submits once.
pub async fn score(
    State(state): State<Arc<AppState>>,
    Path(subject): Path<String>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(request) = payload?;
    let questions = state.provider.assessment(&subject).await?;
    let mut attempt = Attempt::start(subject.as_str(), questions)?;

    for (question_id, selected) in request.answers {
        if let Some(selected) = selected {
            attempt.record_answer(question_id, selected)?;
        }
    }

    match attempt.submit()? {
        SubmitOutcome::Scored(result) => Ok(Json(ScoreResponse {
            subject,
            message: result.feedback_tier.message().to_string(),
            result,
        })),
        SubmitOutcome::Incomplete(incomplete) => Err(ApiError::Incomplete(incomplete)),
    }
}
