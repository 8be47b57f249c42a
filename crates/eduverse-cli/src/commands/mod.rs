//! Subcommand implementations.

pub mod examples;
pub mod init;
pub mod quiz;
pub mod serve;
pub mod subjects;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use eduverse_core::traits::ContentProvider;
use eduverse_providers::config::load_config_from;
use eduverse_providers::{create_provider, ContentSource, EduverseConfig};

/// Flags selecting where content comes from. They override the config file.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Read content from this data directory
    #[arg(long, conflicts_with = "api_url")]
    pub data_dir: Option<PathBuf>,

    /// Read content from a running eduverse server (e.g. http://localhost:3000/api)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the config file and apply command-line overrides.
    pub fn resolve(&self) -> Result<EduverseConfig> {
        let mut config = load_config_from(self.config.as_deref())?;

        if let Some(dir) = &self.data_dir {
            config.source = ContentSource::Fs {
                data_dir: dir.clone(),
            };
        } else if let Some(url) = &self.api_url {
            let timeout_secs = match &config.source {
                ContentSource::Http { timeout_secs, .. } => *timeout_secs,
                ContentSource::Fs { .. } => None,
            };
            config.source = ContentSource::Http {
                base_url: url.clone(),
                timeout_secs,
            };
        }

        tracing::debug!(source = ?config.source, "resolved content source");
        Ok(config)
    }

    pub fn provider(&self) -> Result<Box<dyn ContentProvider>> {
        create_provider(&self.resolve()?)
    }
}
