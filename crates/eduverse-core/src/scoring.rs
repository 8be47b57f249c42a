//! Scoring against the answer key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::session::AssessmentSession;

/// Lower bound (inclusive) of the `Excellent` tier, in percent.
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
/// Lower bound (inclusive) of the `Good` tier, in percent.
pub const GOOD_THRESHOLD: f64 = 60.0;

/// Coarse qualitative bucket derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    NeedsPractice,
}

impl FeedbackTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            FeedbackTier::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            FeedbackTier::Good
        } else {
            FeedbackTier::NeedsPractice
        }
    }

    /// Learner-facing feedback text.
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => "Excellent work!",
            FeedbackTier::Good => "Good job! Review the examples for missed concepts.",
            FeedbackTier::NeedsPractice => {
                "Keep practicing! Go through the examples again to solidify your understanding."
            }
        }
    }
}

impl fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackTier::Excellent => write!(f, "excellent"),
            FeedbackTier::Good => write!(f, "good"),
            FeedbackTier::NeedsPractice => write!(f, "needs-practice"),
        }
    }
}

/// Outcome of scoring one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total: usize,
    /// `100 * correct_count / total`, or 0 for an empty set.
    pub percentage: f64,
    pub feedback_tier: FeedbackTier,
}

impl ScoreResult {
    fn new(correct_count: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            100.0 * correct_count as f64 / total as f64
        };
        Self {
            correct_count,
            total,
            percentage,
            feedback_tier: FeedbackTier::from_percentage(percentage),
        }
    }
}

/// Score `answers` against the session's answer key.
///
/// Answers are compared verbatim with the correct answer. Unanswered
/// questions and answers for ids outside the session never count.
pub fn score(session: &AssessmentSession, answers: &AnswerSet) -> ScoreResult {
    let correct_count = session
        .questions()
        .iter()
        .filter(|q| answers.get(q.id.as_str()) == Some(q.correct_answer.as_str()))
        .count();

    ScoreResult::new(correct_count, session.len())
}
