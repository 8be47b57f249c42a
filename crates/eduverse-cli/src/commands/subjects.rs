//! The `eduverse subjects` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use eduverse_core::model::display_subject;

use super::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let provider = source.provider()?;
    let subjects = provider
        .list_subjects()
        .await
        .context("failed to list subjects")?;

    if subjects.is_empty() {
        println!("No subjects found. Run `eduverse init` to create a sample subject.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Title"]);
    for subject in &subjects {
        table.add_row(vec![Cell::new(subject), Cell::new(display_subject(subject))]);
    }

    println!("{table}");
    Ok(())
}
