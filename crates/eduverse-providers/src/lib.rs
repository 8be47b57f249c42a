//! eduverse-providers: Content provider integrations.
//!
//! Implements the `ContentProvider` trait for a local data directory, the
//! eduverse HTTP API and an in-memory mock, plus the configuration file that
//! selects between them.

pub mod config;
pub mod fs;
pub mod http;
pub mod mock;

pub use config::{create_provider, load_config, ContentSource, EduverseConfig, ServerConfig};
pub use eduverse_core::error::ContentError;
pub use fs::FsContentProvider;
pub use http::HttpContentProvider;
pub use mock::MockContentProvider;
