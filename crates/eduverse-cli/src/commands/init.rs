//! The `eduverse init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("eduverse.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data").context("failed to create data directory")?;
    write_if_missing(Path::new("data/math_examples.json"), SAMPLE_EXAMPLES)?;
    write_if_missing(Path::new("data/math_assessment.json"), SAMPLE_ASSESSMENT)?;

    println!("\nNext steps:");
    println!("  1. Run: eduverse validate --data-dir data");
    println!("  2. Run: eduverse quiz --subject math");
    println!("  3. Run: eduverse serve");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# eduverse configuration

max_retries = 3
retry_delay_ms = 500

[source]
type = "fs"
data_dir = "./data"

# To read content from a running server instead:
# type = "http"
# base_url = "http://localhost:3000/api"
# timeout_secs = 30

[server]
bind = "127.0.0.1:3000"
# static_dir = "./frontend"
"#;

const SAMPLE_EXAMPLES: &str = r#"[
  {
    "concept": "Fractions",
    "realWorldExample": "Cutting a pizza into 8 slices and eating 3 of them.",
    "explanation": "You ate 3/8 of the pizza: 3 parts out of 8 equal parts."
  },
  {
    "concept": "Percentages",
    "realWorldExample": "A shirt priced at 40 is on sale for 25% off.",
    "explanation": "25% of 40 is 10, so the sale price is 30."
  }
]
"#;

const SAMPLE_ASSESSMENT: &str = r#"[
  {
    "id": 1,
    "questionText": "What fraction of a pizza is left if you eat 3 of 8 slices?",
    "options": ["3/8", "5/8", "1/2", "3/5"],
    "correctAnswer": "5/8"
  },
  {
    "id": 2,
    "questionText": "What is 25% of 40?",
    "options": ["4", "10", "25", "15"],
    "correctAnswer": "10"
  }
]
"#;
