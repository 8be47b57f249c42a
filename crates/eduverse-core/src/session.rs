//! Assessment sessions.
//!
//! A session holds one subject's questions for the lifetime of one attempt,
//! along with the order in which each question's options are shown.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::Question;

/// One subject's question set plus its randomized presentation order.
///
/// `presentation_order[i]` is always a permutation of `questions[i].options`.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSession {
    id: Uuid,
    subject: String,
    started_at: DateTime<Utc>,
    questions: Vec<Question>,
    presentation_order: Vec<Vec<String>>,
}

impl AssessmentSession {
    /// Random identifier, fresh for every session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The questions in their canonical order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The shuffled options for every question, aligned with `questions()`.
    pub fn presentation_order(&self) -> &[Vec<String>] {
        &self.presentation_order
    }

    /// Questions paired with the order their options should be displayed in.
    pub fn presented(&self) -> impl Iterator<Item = (&Question, &[String])> {
        self.questions
            .iter()
            .zip(self.presentation_order.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// A new session over the same questions with a fresh id and shuffle.
    pub fn reshuffled(&self) -> AssessmentSession {
        build_session(
            self.subject.clone(),
            self.questions.clone(),
            &mut rand::rng(),
        )
    }
}

/// Create a session, shuffling options with the thread-local RNG.
pub fn create_session(
    subject: impl Into<String>,
    questions: Vec<Question>,
) -> Result<AssessmentSession, SessionError> {
    create_session_with_rng(subject, questions, &mut rand::rng())
}

/// Create a session, shuffling each question's options independently with
/// `rng`.
///
/// Fails without building anything if any question's correct answer is
/// missing from its options.
pub fn create_session_with_rng<R: Rng + ?Sized>(
    subject: impl Into<String>,
    questions: Vec<Question>,
    rng: &mut R,
) -> Result<AssessmentSession, SessionError> {
    if let Some(bad) = questions.iter().find(|q| !q.is_well_formed()) {
        return Err(SessionError::MalformedQuestion {
            question_id: bad.id.clone(),
            correct_answer: bad.correct_answer.clone(),
        });
    }

    Ok(build_session(subject.into(), questions, rng))
}

fn build_session<R: Rng + ?Sized>(
    subject: String,
    questions: Vec<Question>,
    rng: &mut R,
) -> AssessmentSession {
    let presentation_order = questions
        .iter()
        .map(|q| {
            let mut options = q.options.clone();
            options.shuffle(rng);
            options
        })
        .collect();

    let session = AssessmentSession {
        id: Uuid::new_v4(),
        subject,
        started_at: Utc::now(),
        questions,
        presentation_order,
    };

    tracing::debug!(
        session = %session.id,
        subject = %session.subject,
        questions = session.questions.len(),
        "assessment session created"
    );

    session
}
