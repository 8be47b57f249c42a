//! The lifecycle of one assessment attempt.
//!
//! `Attempt` owns a session and its answers and moves from active to
//! submitted exactly once. Starting over means building a new attempt.

use serde::{Deserialize, Serialize};

use crate::answers::{self, AnswerSet};
use crate::error::{AttemptError, SessionError};
use crate::model::{Question, QuestionId};
use crate::scoring::{self, ScoreResult};
use crate::session::{self, AssessmentSession};

/// Submission was refused because some questions have no answer.
///
/// This is an expected, recoverable condition: the attempt stays active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteAnswers {
    /// Unanswered question ids, in question order.
    pub unanswered: Vec<QuestionId>,
}

impl IncompleteAnswers {
    pub const MESSAGE: &'static str = "Please answer all questions before submitting.";
}

/// Result of trying to submit an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Scored(ScoreResult),
    Incomplete(IncompleteAnswers),
}

#[derive(Debug, Clone)]
enum AttemptState {
    Active,
    Submitted(ScoreResult),
}

/// One learner's attempt at a subject's assessment.
#[derive(Debug, Clone)]
pub struct Attempt {
    session: AssessmentSession,
    answers: AnswerSet,
    state: AttemptState,
}

impl Attempt {
    /// Start an attempt over `questions` with a freshly shuffled session.
    pub fn start(
        subject: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, SessionError> {
        Ok(Self::from_session(session::create_session(subject, questions)?))
    }

    /// Wrap an existing session in a new, unanswered attempt.
    pub fn from_session(session: AssessmentSession) -> Self {
        Self {
            session,
            answers: AnswerSet::new(),
            state: AttemptState::Active,
        }
    }

    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, AttemptState::Submitted(_))
    }

    /// The score, once submitted.
    pub fn result(&self) -> Option<&ScoreResult> {
        match &self.state {
            AttemptState::Submitted(result) => Some(result),
            AttemptState::Active => None,
        }
    }

    /// Record or change an answer while the attempt is active.
    pub fn record_answer(
        &mut self,
        question_id: impl Into<QuestionId>,
        selected: impl Into<String>,
    ) -> Result<(), AttemptError> {
        if self.is_submitted() {
            return Err(AttemptError::AlreadySubmitted);
        }
        answers::record_answer(&self.session, &mut self.answers, question_id, selected);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        answers::is_complete(&self.session, &self.answers)
    }

    pub fn unanswered(&self) -> Vec<QuestionId> {
        answers::unanswered(&self.session, &self.answers)
    }

    /// Submit for scoring.
    ///
    /// Incomplete answers leave the attempt active and produce no score.
    pub fn submit(&mut self) -> Result<SubmitOutcome, AttemptError> {
        if self.is_submitted() {
            return Err(AttemptError::AlreadySubmitted);
        }

        let unanswered = self.unanswered();
        if !unanswered.is_empty() {
            tracing::debug!(
                session = %self.session.id(),
                unanswered = unanswered.len(),
                "submission refused, answers incomplete"
            );
            return Ok(SubmitOutcome::Incomplete(IncompleteAnswers { unanswered }));
        }

        let result = scoring::score(&self.session, &self.answers);
        tracing::info!(
            session = %self.session.id(),
            subject = %self.session.subject(),
            correct = result.correct_count,
            total = result.total,
            tier = %result.feedback_tier,
            "attempt submitted"
        );
        self.state = AttemptState::Submitted(result.clone());
        Ok(SubmitOutcome::Scored(result))
    }

    /// Discard this attempt and start a new one over the same questions.
    pub fn retake(self) -> Self {
        Self::from_session(self.session.reshuffled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::FeedbackTier;
    use crate::session::tests::{five_questions, question};

    #[test]
    fn complete_attempt_is_scored() {
        let mut attempt = Attempt::start("math", five_questions()).unwrap();
        for i in 1..=5 {
            attempt.record_answer(format!("q{i}"), "a").unwrap();
        }
        let outcome = attempt.submit().unwrap();
        let SubmitOutcome::Scored(result) = outcome else {
            panic!("expected a score, got {outcome:?}");
        };
        assert_eq!(result.correct_count, 5);
        assert_eq!(result.feedback_tier, FeedbackTier::Excellent);
        assert!(attempt.is_submitted());
        assert_eq!(attempt.result(), Some(&result));
    }

    #[test]
    fn incomplete_submission_is_refused() {
        let mut attempt = Attempt::start("math", five_questions()).unwrap();
        for i in 1..=4 {
            attempt.record_answer(format!("q{i}"), "a").unwrap();
        }
        let outcome = attempt.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Incomplete(IncompleteAnswers {
                unanswered: vec!["q5".into()],
            })
        );
        assert!(!attempt.is_submitted());
        assert!(attempt.result().is_none());

        // Still active: the learner can finish and submit.
        attempt.record_answer("q5", "b").unwrap();
        let SubmitOutcome::Scored(result) = attempt.submit().unwrap() else {
            panic!("expected a score");
        };
        assert_eq!(result.correct_count, 4);
    }

    #[test]
    fn submitted_attempt_is_frozen() {
        let mut attempt = Attempt::start("math", vec![question("1", &["a", "b"], "a")]).unwrap();
        attempt.record_answer("1", "a").unwrap();
        attempt.submit().unwrap();
        assert_eq!(
            attempt.record_answer("1", "b"),
            Err(AttemptError::AlreadySubmitted)
        );
        assert_eq!(attempt.answers().get("1"), Some("a"));
        assert_eq!(attempt.submit(), Err(AttemptError::AlreadySubmitted));
    }

    #[test]
    fn empty_attempt_submits_immediately() {
        let mut attempt = Attempt::start("math", vec![]).unwrap();
        assert!(attempt.is_complete());
        let SubmitOutcome::Scored(result) = attempt.submit().unwrap() else {
            panic!("expected a score");
        };
        assert_eq!(result.total, 0);
        assert_eq!(result.feedback_tier, FeedbackTier::NeedsPractice);
    }

    #[test]
    fn malformed_set_never_starts() {
        let err = Attempt::start("math", vec![question("1", &["a", "b"], "c")]).unwrap_err();
        assert!(matches!(err, SessionError::MalformedQuestion { .. }));
    }

    #[test]
    fn retake_discards_answers() {
        let mut attempt = Attempt::start("math", five_questions()).unwrap();
        let first_session = attempt.session().id();
        for i in 1..=5 {
            attempt.record_answer(format!("q{i}"), "b").unwrap();
        }
        attempt.submit().unwrap();

        let retake = attempt.retake();
        assert_ne!(retake.session().id(), first_session);
        assert!(retake.answers().is_empty());
        assert!(!retake.is_submitted());
        assert_eq!(retake.session().len(), 5);
    }
}
