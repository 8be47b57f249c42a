//! eduverse-core: Assessment lifecycle engine and content model.
//!
//! This crate defines the question/example data model, the assessment
//! session with randomized option order, answer collection, scoring, and the
//! `ContentProvider` trait that the rest of eduverse builds on.

pub mod answers;
pub mod attempt;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod traits;

pub use answers::{all_question_ids, is_complete, record_answer, unanswered, AnswerSet};
pub use attempt::{Attempt, IncompleteAnswers, SubmitOutcome};
pub use error::{AttemptError, ContentError, ContentKind, SessionError};
pub use model::{Example, Question, QuestionId, QuestionSet};
pub use scoring::{score, FeedbackTier, ScoreResult};
pub use session::{create_session, create_session_with_rng, AssessmentSession};
