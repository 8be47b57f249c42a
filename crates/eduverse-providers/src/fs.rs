//! Filesystem content provider.
//!
//! Reads `<subject>_examples.json` and `<subject>_assessment.json` from a
//! data directory.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::instrument;

use eduverse_core::error::{ContentError, ContentKind};
use eduverse_core::model::{is_valid_subject, Example, Question};
use eduverse_core::parser::{content_file_name, subject_from_file_name};
use eduverse_core::traits::ContentProvider;

/// Content provider backed by a local data directory.
#[derive(Debug, Clone)]
pub struct FsContentProvider {
    data_dir: PathBuf,
}

impl FsContentProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_content<T: DeserializeOwned>(
        &self,
        subject: &str,
        kind: ContentKind,
    ) -> Result<T, ContentError> {
        if !is_valid_subject(subject) {
            return Err(ContentError::InvalidSubject(subject.to_string()));
        }

        let path = self.data_dir.join(content_file_name(subject, kind));
        let data = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ContentError::NotFound {
                    kind,
                    subject: subject.to_string(),
                }
            } else {
                tracing::error!("error reading {kind} file for {subject}: {e}");
                ContentError::Io {
                    kind,
                    subject: subject.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        serde_json::from_str(&data).map_err(|e| {
            tracing::error!("error parsing JSON for {subject} {kind}: {e}");
            ContentError::Malformed {
                kind,
                subject: subject.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ContentProvider for FsContentProvider {
    fn name(&self) -> &str {
        "fs"
    }

    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    async fn list_subjects(&self) -> Result<Vec<String>, ContentError> {
        let mut entries = match tokio::fs::read_dir(&self.data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("data directory {} does not exist", self.data_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ContentError::Io {
                    kind: ContentKind::Subjects,
                    subject: String::new(),
                    message: e.to_string(),
                })
            }
        };

        let mut subjects = BTreeSet::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| ContentError::Io {
                kind: ContentKind::Subjects,
                subject: String::new(),
                message: e.to_string(),
            })?;
            let Some(entry) = entry else { break };

            let file_name = entry.file_name();
            if let Some((subject, _)) = file_name.to_str().and_then(subject_from_file_name) {
                if is_valid_subject(&subject) {
                    subjects.insert(subject);
                }
            }
        }

        Ok(subjects.into_iter().collect())
    }

    #[instrument(skip(self))]
    async fn examples(&self, subject: &str) -> Result<Vec<Example>, ContentError> {
        self.read_content(subject, ContentKind::Examples).await
    }

    #[instrument(skip(self))]
    async fn assessment(&self, subject: &str) -> Result<Vec<Question>, ContentError> {
        self.read_content(subject, ContentKind::Assessment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSESSMENT: &str = r#"[
        {"id": 1, "questionText": "2 + 2?", "options": ["3", "4"], "correctAnswer": "4"}
    ]"#;

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("math_assessment.json"), ASSESSMENT).unwrap();
        std::fs::write(dir.path().join("math_examples.json"), "[]").unwrap();
        std::fs::write(dir.path().join("art_examples.json"), "[]").unwrap();
        std::fs::write(dir.path().join("science_assessment.json"), "{ nope").unwrap();
        std::fs::write(dir.path().join("README.md"), "ignored").unwrap();
        dir
    }

    #[tokio::test]
    async fn lists_subjects_from_file_names() {
        let dir = data_dir();
        let provider = FsContentProvider::new(dir.path());
        let subjects = provider.list_subjects().await.unwrap();
        assert_eq!(subjects, vec!["art", "math", "science"]);
    }

    #[tokio::test]
    async fn missing_directory_has_no_subjects() {
        let provider = FsContentProvider::new("/definitely/not/here");
        assert!(provider.list_subjects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_assessment() {
        let dir = data_dir();
        let provider = FsContentProvider::new(dir.path());
        let questions = provider.assessment("math").await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "4");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = data_dir();
        let provider = FsContentProvider::new(dir.path());
        let err = provider.assessment("art").await.unwrap_err();
        assert!(matches!(
            err,
            ContentError::NotFound {
                kind: ContentKind::Assessment,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn bad_json_is_malformed() {
        let dir = data_dir();
        let provider = FsContentProvider::new(dir.path());
        let err = provider.assessment("science").await.unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let dir = data_dir();
        let provider = FsContentProvider::new(dir.path());
        let err = provider.examples("../math").await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidSubject(_)));
    }
}
