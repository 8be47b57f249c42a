//! Answer collection and the completeness gate.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;
use crate::session::AssessmentSession;

/// The learner's selections, keyed by question id.
///
/// A question is unanswered only when it has no entry; an empty string is a
/// recorded (and almost certainly wrong) answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    selections: HashMap<QuestionId, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection, replacing any earlier one for the same question.
    pub fn record(&mut self, question_id: impl Into<QuestionId>, selected: impl Into<String>) {
        self.selections.insert(question_id.into(), selected.into());
    }

    /// The selection recorded for `question_id`, if any.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.selections.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.selections.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl<K: Into<QuestionId>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = AnswerSet::new();
        for (id, selected) in iter {
            answers.record(id, selected);
        }
        answers
    }
}

/// Record `selected` as the answer to `question_id` (last write wins).
///
/// Any string is accepted; options that are not part of the question are
/// simply scored as incorrect.
pub fn record_answer(
    session: &AssessmentSession,
    answers: &mut AnswerSet,
    question_id: impl Into<QuestionId>,
    selected: impl Into<String>,
) {
    let question_id = question_id.into();
    if !session.questions().iter().any(|q| q.id == question_id) {
        tracing::debug!(
            session = %session.id(),
            question = %question_id,
            "answer recorded for a question outside the session"
        );
    }
    answers.record(question_id, selected);
}

/// Every question id in the session.
pub fn all_question_ids(session: &AssessmentSession) -> BTreeSet<&QuestionId> {
    session.questions().iter().map(|q| &q.id).collect()
}

/// Returns `true` iff every question in the session has a recorded answer.
pub fn is_complete(session: &AssessmentSession, answers: &AnswerSet) -> bool {
    all_question_ids(session)
        .into_iter()
        .all(|id| answers.contains(id.as_str()))
}

/// Questions without an answer, in presentation order.
pub fn unanswered(session: &AssessmentSession, answers: &AnswerSet) -> Vec<QuestionId> {
    session
        .questions()
        .iter()
        .filter(|q| !answers.contains(q.id.as_str()))
        .map(|q| q.id.clone())
        .collect()
}
