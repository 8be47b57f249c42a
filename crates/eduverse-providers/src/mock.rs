//! Mock provider for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use eduverse_core::error::{ContentError, ContentKind};
use eduverse_core::model::{Example, Question};
use eduverse_core::traits::ContentProvider;

/// An in-memory content provider for exercising presentation adapters
/// without touching the filesystem or network.
#[derive(Default)]
pub struct MockContentProvider {
    examples: BTreeMap<String, Vec<Example>>,
    assessments: BTreeMap<String, Vec<Question>>,
    /// Number of calls made.
    call_count: AtomicU32,
}

impl MockContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a subject's examples.
    pub fn with_examples(mut self, subject: &str, examples: Vec<Example>) -> Self {
        self.examples.insert(subject.to_string(), examples);
        self
    }

    /// Add (or replace) a subject's assessment.
    pub fn with_assessment(mut self, subject: &str, questions: Vec<Question>) -> Self {
        self.assessments.insert(subject.to_string(), questions);
        self
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn lookup<T: Clone>(
        &self,
        map: &BTreeMap<String, Vec<T>>,
        kind: ContentKind,
        subject: &str,
    ) -> Result<Vec<T>, ContentError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        map.get(subject).cloned().ok_or_else(|| ContentError::NotFound {
            kind,
            subject: subject.to_string(),
        })
    }
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_subjects(&self) -> Result<Vec<String>, ContentError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let mut subjects: Vec<String> = self
            .examples
            .keys()
            .chain(self.assessments.keys())
            .cloned()
            .collect();
        subjects.sort();
        subjects.dedup();
        Ok(subjects)
    }

    async fn examples(&self, subject: &str) -> Result<Vec<Example>, ContentError> {
        self.lookup(&self.examples, ContentKind::Examples, subject)
    }

    async fn assessment(&self, subject: &str) -> Result<Vec<Question>, ContentError> {
        self.lookup(&self.assessments, ContentKind::Assessment, subject)
    }
}
