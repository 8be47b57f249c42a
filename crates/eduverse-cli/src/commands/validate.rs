//! The `eduverse validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use eduverse_core::error::ContentKind;
use eduverse_core::parser::{self, Severity};

pub fn execute(data_dir: Option<PathBuf>, file: Option<PathBuf>) -> Result<()> {
    let (sets, expected) = match (data_dir, file) {
        (_, Some(file)) => (vec![parser::parse_assessment(&file)?], 1),
        (Some(dir), None) => {
            let sets = parser::load_data_directory(&dir)?;
            (sets, count_assessment_files(&dir)?)
        }
        (None, None) => anyhow::bail!("either --data-dir or --file is required"),
    };

    let mut total_warnings = 0;
    let mut total_errors = 0;

    for set in &sets {
        println!("Subject: {} ({} questions)", set.subject, set.questions.len());

        for w in parser::validate_question_set(set) {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            match w.severity {
                Severity::Warning => {
                    total_warnings += 1;
                    println!("{prefix} WARNING: {}", w.message);
                }
                Severity::Error => {
                    total_errors += 1;
                    println!("{prefix} ERROR: {}", w.message);
                }
            }
        }
    }

    let unparsable = expected.saturating_sub(sets.len());
    if unparsable > 0 {
        println!("\n{unparsable} assessment file(s) could not be parsed.");
    }

    if total_warnings == 0 && total_errors == 0 && unparsable == 0 {
        println!("All assessments valid.");
    } else if total_warnings > 0 {
        println!("\n{total_warnings} warning(s) found.");
    }

    anyhow::ensure!(
        total_errors == 0 && unparsable == 0,
        "validation failed: {total_errors} error(s), {unparsable} unparsable file(s)"
    );

    Ok(())
}

fn count_assessment_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let is_assessment = entry
            .file_name()
            .to_str()
            .and_then(parser::subject_from_file_name)
            .is_some_and(|(_, kind)| kind == ContentKind::Assessment);
        if is_assessment {
            count += 1;
        }
    }
    Ok(count)
}
