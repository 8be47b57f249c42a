//! JSON content parser.
//!
//! Loads examples and question sets from the data directory layout
//! (`<subject>_examples.json`, `<subject>_assessment.json`) and validates
//! question sets.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ContentKind;
use crate::model::{Example, Question, QuestionSet};

pub const EXAMPLES_SUFFIX: &str = "_examples.json";
pub const ASSESSMENT_SUFFIX: &str = "_assessment.json";

/// File name holding `kind` content for `subject`.
pub fn content_file_name(subject: &str, kind: ContentKind) -> String {
    match kind {
        ContentKind::Examples => format!("{subject}{EXAMPLES_SUFFIX}"),
        ContentKind::Assessment | ContentKind::Subjects => format!("{subject}{ASSESSMENT_SUFFIX}"),
    }
}

/// Split a content file name into its subject and kind.
///
/// Returns `None` for files that do not follow the naming scheme.
pub fn subject_from_file_name(file_name: &str) -> Option<(String, ContentKind)> {
    let (subject, kind) = if let Some(s) = file_name.strip_suffix(EXAMPLES_SUFFIX) {
        (s, ContentKind::Examples)
    } else if let Some(s) = file_name.strip_suffix(ASSESSMENT_SUFFIX) {
        (s, ContentKind::Assessment)
    } else {
        return None;
    };

    if subject.is_empty() {
        return None;
    }
    Some((subject.to_string(), kind))
}

/// Parse a JSON array of questions.
pub fn parse_assessment_str(content: &str, source_path: &Path) -> Result<Vec<Question>> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse assessment JSON: {}", source_path.display()))
}

/// Parse a JSON array of worked examples.
pub fn parse_examples_str(content: &str, source_path: &Path) -> Result<Vec<Example>> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse examples JSON: {}", source_path.display()))
}

/// Read and parse an assessment file into a `QuestionSet`.
///
/// The subject is taken from the file name when it follows the
/// `<subject>_assessment.json` scheme, otherwise from the file stem.
pub fn parse_assessment(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assessment file: {}", path.display()))?;

    let questions = parse_assessment_str(&content, path)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let subject = match subject_from_file_name(file_name) {
        Some((subject, _)) => subject,
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
    };

    Ok(QuestionSet { subject, questions })
}

/// Read and parse an examples file.
pub fn parse_examples(path: &Path) -> Result<Vec<Example>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read examples file: {}", path.display()))?;

    parse_examples_str(&content, path)
}

/// Load every `*_assessment.json` file in a directory, sorted by subject.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_data_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut sets = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        let is_assessment = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(subject_from_file_name)
            .is_some_and(|(_, kind)| kind == ContentKind::Assessment);
        if !is_assessment {
            continue;
        }

        match parse_assessment(&path) {
            Ok(set) => sets.push(set),
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", path.display());
            }
        }
    }

    sets.sort_by(|a, b| a.subject.cmp(&b.subject));
    Ok(sets)
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The set is usable but probably not what the author meant.
    Warning,
    /// No session can be created from the set.
    Error,
}

/// A finding from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    pub severity: Severity,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn warning(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question.id.to_string()),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Validate a question set for common authoring issues.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for question in &set.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::warning(
                question,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in &set.questions {
        if question.question_text.trim().is_empty() {
            warnings.push(ValidationWarning::warning(question, "question text is empty"));
        }

        if question.options.len() < 2 {
            warnings.push(ValidationWarning::warning(
                question,
                format!("only {} option(s), expected at least 2", question.options.len()),
            ));
        }

        let mut seen_options = HashSet::new();
        for option in &question.options {
            if !seen_options.insert(option) {
                warnings.push(ValidationWarning::warning(
                    question,
                    format!("duplicate option: {option:?}"),
                ));
            }
        }

        if !question.is_well_formed() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.to_string()),
                severity: Severity::Error,
                message: format!(
                    "correct answer {:?} is not one of the options",
                    question.correct_answer
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"[
  {
    "id": 1,
    "questionText": "What is 7 x 8?",
    "options": ["54", "56", "58", "64"],
    "correctAnswer": "56"
  },
  {
    "id": 2,
    "questionText": "What is the square root of 81?",
    "options": ["7", "8", "9"],
    "correctAnswer": "9"
  }
]"#;

    #[test]
    fn parse_valid_assessment() {
        let questions = parse_assessment_str(VALID_JSON, &PathBuf::from("math_assessment.json"))
            .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id.as_str(), "1");
        assert_eq!(questions[1].correct_answer, "9");
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_assessment_str("[{ not json", &PathBuf::from("bad.json"));
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn parse_missing_field() {
        let json = r#"[{"id": 1, "questionText": "?", "options": ["a", "b"]}]"#;
        assert!(parse_assessment_str(json, &PathBuf::from("x.json")).is_err());
    }

    #[test]
    fn file_name_scheme() {
        assert_eq!(
            subject_from_file_name("math_examples.json"),
            Some(("math".to_string(), ContentKind::Examples))
        );
        assert_eq!(
            subject_from_file_name("world_history_assessment.json"),
            Some(("world_history".to_string(), ContentKind::Assessment))
        );
        assert_eq!(subject_from_file_name("_assessment.json"), None);
        assert_eq!(subject_from_file_name("notes.json"), None);
        assert_eq!(
            content_file_name("math", ContentKind::Examples),
            "math_examples.json"
        );
    }

    #[test]
    fn validate_clean_set() {
        let set = QuestionSet {
            subject: "math".into(),
            questions: parse_assessment_str(VALID_JSON, &PathBuf::from("x.json")).unwrap(),
        };
        assert!(validate_question_set(&set).is_empty());
    }

    #[test]
    fn validate_reports_authoring_issues() {
        let json = r#"[
  {"id": "a", "questionText": " ", "options": ["x"], "correctAnswer": "x"},
  {"id": "a", "questionText": "Pick", "options": ["y", "y", "z"], "correctAnswer": "y"},
  {"id": "c", "questionText": "Pick", "options": ["1", "2"], "correctAnswer": "3"}
]"#;
        let set = QuestionSet {
            subject: "broken".into(),
            questions: parse_assessment_str(json, &PathBuf::from("x.json")).unwrap(),
        };
        let warnings = validate_question_set(&set);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate question ID")));
        assert!(messages.iter().any(|m| m.contains("question text is empty")));
        assert!(messages.iter().any(|m| m.contains("at least 2")));
        assert!(messages.iter().any(|m| m.contains("duplicate option")));

        let errors: Vec<_> = warnings
            .iter()
            .filter(|w| w.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].question_id.as_deref(), Some("c"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("math_assessment.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("math_examples.json"), "[]").unwrap();
        std::fs::write(dir.path().join("art_assessment.json"), "[]").unwrap();
        std::fs::write(dir.path().join("broken_assessment.json"), "{").unwrap();

        let sets = load_data_directory(dir.path()).unwrap();
        let subjects: Vec<&str> = sets.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(subjects, vec!["art", "math"]);
        assert_eq!(sets[1].questions.len(), 2);
    }

    #[test]
    fn load_missing_directory() {
        assert!(load_data_directory(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn parse_examples_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("science_examples.json");
        std::fs::write(
            &path,
            r#"[{"concept":"Photosynthesis","realWorldExample":"Leaves in sunlight","explanation":"Plants make sugar from light"}]"#,
        )
        .unwrap();
        let examples = parse_examples(&path).unwrap();
        assert_eq!(examples[0].concept, "Photosynthesis");
    }
}
