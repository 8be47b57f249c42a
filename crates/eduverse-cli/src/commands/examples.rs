//! The `eduverse examples` command.

use anyhow::{Context, Result};

use eduverse_core::model::{display_subject, Example};

use super::SourceArgs;

pub async fn execute(subject: String, source: SourceArgs) -> Result<()> {
    let provider = source.provider()?;
    let examples = provider
        .examples(&subject)
        .await
        .with_context(|| format!("failed to load examples for {subject}"))?;

    print_examples(&subject, &examples);
    Ok(())
}

/// Print a subject's worked examples as cards.
pub fn print_examples(subject: &str, examples: &[Example]) {
    println!("{} Examples", display_subject(subject));
    println!();

    if examples.is_empty() {
        println!("No examples found for this subject.");
        return;
    }

    for example in examples {
        println!("## {}", example.concept);
        println!("Real World Example: {}", example.real_world_example);
        println!("Explanation: {}", example.explanation);
        println!();
    }
}
