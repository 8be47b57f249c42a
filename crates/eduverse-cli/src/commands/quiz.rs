//! The `eduverse quiz` command.
//!
//! Terminal presentation of one attempt: examples first, then every question
//! with its shuffled options numbered. Submission is refused while any
//! question is unanswered, and only the unanswered ones are asked again.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use eduverse_core::model::{display_subject, Question};
use eduverse_core::traits::load_subject_content;
use eduverse_core::{Attempt, IncompleteAnswers, ScoreResult, SubmitOutcome};

use super::examples::print_examples;
use super::SourceArgs;

pub async fn execute(
    subject: String,
    answers_path: Option<PathBuf>,
    skip_examples: bool,
    source: SourceArgs,
) -> Result<()> {
    let provider = source.provider()?;

    let questions = if skip_examples {
        provider
            .assessment(&subject)
            .await
            .with_context(|| format!("failed to load assessment for {subject}"))?
    } else {
        let content = load_subject_content(provider.as_ref(), &subject)
            .await
            .with_context(|| format!("failed to load content for {subject}"))?;
        print_examples(&subject, &content.examples);
        content.questions
    };

    println!("{} Assessment", display_subject(&subject));
    println!();

    if questions.is_empty() {
        println!("No assessment questions available for this subject.");
        return Ok(());
    }

    let mut attempt = Attempt::start(subject.as_str(), questions)?;

    let result = match answers_path {
        Some(path) => submit_batch(&mut attempt, &path)?,
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(&mut attempt, stdin.lock(), stdout.lock())?
        }
    };

    print_result(&result);
    Ok(())
}

/// Record every answer from a JSON file and submit once.
fn submit_batch(attempt: &mut Attempt, path: &Path) -> Result<ScoreResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    let answers: HashMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers file: {}", path.display()))?;

    for (question_id, selected) in answers {
        attempt.record_answer(question_id, selected)?;
    }

    match attempt.submit()? {
        SubmitOutcome::Scored(result) => Ok(result),
        SubmitOutcome::Incomplete(incomplete) => {
            let ids: Vec<String> = incomplete
                .unanswered
                .iter()
                .map(|id| id.to_string())
                .collect();
            anyhow::bail!(
                "{} Unanswered: {}",
                IncompleteAnswers::MESSAGE,
                ids.join(", ")
            )
        }
    }
}

/// Ask each question on `output`, read choices from `input`, and submit once
/// every question has an answer.
fn run_interactive<R: BufRead, W: Write>(
    attempt: &mut Attempt,
    mut input: R,
    mut output: W,
) -> Result<ScoreResult> {
    let total = attempt.session().len();

    loop {
        let pending: Vec<(usize, Question, Vec<String>)> = attempt
            .session()
            .presented()
            .enumerate()
            .filter(|(_, (question, _))| !attempt.answers().contains(question.id.as_str()))
            .map(|(index, (question, options))| (index, question.clone(), options.to_vec()))
            .collect();

        for (index, question, options) in &pending {
            writeln!(output, "{}/{}. {}", index + 1, total, question.question_text)?;
            for (i, option) in options.iter().enumerate() {
                writeln!(output, "  {}) {}", i + 1, option)?;
            }

            if let Some(selected) = read_choice(&mut input, &mut output, options)? {
                attempt.record_answer(question.id.clone(), selected)?;
            }
            writeln!(output)?;
        }

        match attempt.submit()? {
            SubmitOutcome::Scored(result) => return Ok(result),
            SubmitOutcome::Incomplete(incomplete) => {
                writeln!(
                    output,
                    "{} ({} unanswered)",
                    IncompleteAnswers::MESSAGE,
                    incomplete.unanswered.len()
                )?;
                writeln!(output)?;
            }
        }
    }
}

/// Read one choice. `None` means the question was skipped.
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    options: &[String],
) -> Result<Option<String>> {
    loop {
        write!(output, "Your answer (1-{}, blank to skip): ", options.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before all questions were answered");
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        match line.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1].clone())),
            _ => writeln!(output, "Please enter a number between 1 and {}.", options.len())?,
        }
    }
}

fn print_result(result: &ScoreResult) {
    println!("Your Score: {} out of {}", result.correct_count, result.total);
    println!("Percentage: {:.1}%", result.percentage);
    println!("{}", result.feedback_tier.message());
}
