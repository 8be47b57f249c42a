//! eduverse CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::SourceArgs;

#[derive(Parser)]
#[command(name = "eduverse", version, about = "Worked examples and assessments by subject")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (and optional static frontend)
    Serve {
        /// Address to listen on (default: 127.0.0.1:3000)
        #[arg(long)]
        bind: Option<String>,

        /// Directory of static frontend files
        #[arg(long)]
        static_dir: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List available subjects
    Subjects {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the worked examples for a subject
    Examples {
        /// Subject name (e.g. "math")
        #[arg(long)]
        subject: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Take a subject's assessment
    Quiz {
        /// Subject name (e.g. "math")
        #[arg(long)]
        subject: String,

        /// Submit answers from a JSON file ({"<id>": "<option>"}) instead of prompting
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Do not show the worked examples first
        #[arg(long)]
        skip_examples: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Validate assessment files
    Validate {
        /// Data directory containing <subject>_assessment.json files
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        data_dir: Option<PathBuf>,

        /// A single assessment file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Create starter config and a sample subject
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eduverse=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            bind,
            static_dir,
            source,
        } => commands::serve::execute(bind, static_dir, source).await,
        Commands::Subjects { source } => commands::subjects::execute(source).await,
        Commands::Examples { subject, source } => {
            commands::examples::execute(subject, source).await
        }
        Commands::Quiz {
            subject,
            answers,
            skip_examples,
            source,
        } => commands::quiz::execute(subject, answers, skip_examples, source).await,
        Commands::Validate { data_dir, file } => commands::validate::execute(data_dir, file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
