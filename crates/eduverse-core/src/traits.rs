//! Content provider trait.
//!
//! Implemented by the `eduverse-providers` crate for the filesystem, the
//! HTTP API and an in-memory mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::model::{Example, Question};

/// Trait for sources of per-subject learning content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Human-readable provider name (e.g. "fs").
    fn name(&self) -> &str;

    /// All subjects that have content, sorted.
    async fn list_subjects(&self) -> Result<Vec<String>, ContentError>;

    /// Worked examples for a subject.
    async fn examples(&self, subject: &str) -> Result<Vec<Example>, ContentError>;

    /// Assessment questions for a subject, in canonical order.
    async fn assessment(&self, subject: &str) -> Result<Vec<Question>, ContentError>;
}

/// Everything a learner sees for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectContent {
    pub subject: String,
    pub examples: Vec<Example>,
    pub questions: Vec<Question>,
}

/// Fetch a subject's examples and assessment concurrently.
pub async fn load_subject_content(
    provider: &dyn ContentProvider,
    subject: &str,
) -> Result<SubjectContent, ContentError> {
    let (examples, questions) =
        futures::try_join!(provider.examples(subject), provider.assessment(subject))?;

    tracing::info!(
        provider = provider.name(),
        subject,
        examples = examples.len(),
        questions = questions.len(),
        "subject content loaded"
    );

    Ok(SubjectContent {
        subject: subject.to_string(),
        examples,
        questions,
    })
}
