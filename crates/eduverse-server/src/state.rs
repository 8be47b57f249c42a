//! Shared application state

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use eduverse_core::traits::ContentProvider;

/// State shared by every request handler.
pub struct AppState {
    /// Where subject content is read from.
    pub provider: Arc<dyn ContentProvider>,
    /// Static frontend served for non-API paths.
    pub static_dir: Option<PathBuf>,
    started_at: Instant,
}

impl AppState {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            static_dir: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
