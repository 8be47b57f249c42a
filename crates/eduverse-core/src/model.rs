//! Core data model types for eduverse.
//!
//! These are the content records supplied by a content provider: worked
//! examples and multiple-choice questions, grouped per subject.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of a question, unique within a subject's set.
///
/// Content files may use either strings or integers as ids; both
/// deserialize into the same string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => QuestionId(s),
            RawId::Signed(n) => QuestionId(n.to_string()),
            RawId::Unsigned(n) => QuestionId(n.to_string()),
        })
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier within the subject's set.
    pub id: QuestionId,
    /// The question prompt shown to the learner.
    pub question_text: String,
    /// Distinct display strings the learner chooses from.
    pub options: Vec<String>,
    /// The option that counts as correct. Must be one of `options`.
    pub correct_answer: String,
}

impl Question {
    /// Returns `true` if the correct answer is one of the options.
    pub fn is_well_formed(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_answer)
    }
}

/// A worked example illustrating a concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub concept: String,
    pub real_world_example: String,
    pub explanation: String,
}

/// The questions loaded for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub subject: String,
    pub questions: Vec<Question>,
}

/// Returns `true` if `subject` is usable as a content key: non-empty and
/// made only of ASCII letters, digits, `_` and `-`.
pub fn is_valid_subject(subject: &str) -> bool {
    !subject.is_empty()
        && subject
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Human-readable subject title ("math" -> "Math").
pub fn display_subject(subject: &str) -> String {
    let mut chars = subject.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
