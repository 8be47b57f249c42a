//! Configuration and provider factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use eduverse_core::traits::ContentProvider;

use crate::fs::FsContentProvider;
use crate::http::HttpContentProvider;

/// Where subject content comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentSource {
    /// A local data directory of JSON files.
    Fs {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
    /// A running eduverse server.
    Http {
        base_url: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl Default for ContentSource {
    fn default() -> Self {
        ContentSource::Fs {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Settings for `eduverse serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory of static frontend files served at `/`.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
        }
    }
}

/// Top-level eduverse configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EduverseConfig {
    /// Content source used by the CLI and the server.
    #[serde(default)]
    pub source: ContentSource,
    #[serde(default)]
    pub server: ServerConfig,
    /// Max retries on transient HTTP errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    500
}

impl Default for EduverseConfig {
    fn default() -> Self {
        Self {
            source: ContentSource::default(),
            server: ServerConfig::default(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Resolve env vars in a content source.
fn resolve_source(source: &ContentSource) -> ContentSource {
    match source {
        ContentSource::Fs { data_dir } => ContentSource::Fs {
            data_dir: resolve_path(data_dir),
        },
        ContentSource::Http {
            base_url,
            timeout_secs,
        } => ContentSource::Http {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `eduverse.toml` in the current directory
/// 2. `~/.config/eduverse/config.toml`
///
/// Environment variable overrides: `EDUVERSE_DATA_DIR`, `EDUVERSE_API_URL`.
pub fn load_config() -> Result<EduverseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EduverseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("eduverse.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<EduverseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => EduverseConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("EDUVERSE_DATA_DIR") {
        config.source = ContentSource::Fs {
            data_dir: PathBuf::from(dir),
        };
    }

    if let Ok(url) = std::env::var("EDUVERSE_API_URL") {
        let timeout_secs = match &config.source {
            ContentSource::Http { timeout_secs, .. } => *timeout_secs,
            ContentSource::Fs { .. } => None,
        };
        config.source = ContentSource::Http {
            base_url: url,
            timeout_secs,
        };
    }

    config.source = resolve_source(&config.source);
    config.server.bind = resolve_env_vars(&config.server.bind);
    config.server.static_dir = config.server.static_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("eduverse"))
}

/// Create a content provider for the configured source.
pub fn create_provider(config: &EduverseConfig) -> Result<Box<dyn ContentProvider>> {
    match &config.source {
        ContentSource::Fs { data_dir } => Ok(Box::new(FsContentProvider::new(data_dir.clone()))),
        ContentSource::Http {
            base_url,
            timeout_secs,
        } => {
            let provider = HttpContentProvider::new(base_url, *timeout_secs)?.with_retries(
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            );
            Ok(Box::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EDUVERSE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_EDUVERSE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_EDUVERSE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars here"), "no vars here");
        std::env::remove_var("_EDUVERSE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = EduverseConfig::default();
        assert_eq!(
            config.source,
            ContentSource::Fs {
                data_dir: PathBuf::from("./data")
            }
        );
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn parse_fs_config() {
        let toml_str = r#"
max_retries = 5

[source]
type = "fs"
data_dir = "/srv/content"

[server]
bind = "0.0.0.0:8080"
static_dir = "./frontend"
"#;
        let config: EduverseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.source,
            ContentSource::Fs {
                data_dir: PathBuf::from("/srv/content")
            }
        );
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.static_dir, Some(PathBuf::from("./frontend")));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay_ms, 500);
    }

    #[test]
    fn parse_http_config() {
        let toml_str = r#"
[source]
type = "http"
base_url = "http://content.internal:3000/api"
timeout_secs = 10
"#;
        let config: EduverseConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.source,
            ContentSource::Http {
                timeout_secs: Some(10),
                ..
            }
        ));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/eduverse.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eduverse.toml");
        std::fs::write(
            &path,
            "[source]\ntype = \"fs\"\ndata_dir = \"${_EDUVERSE_TEST_ROOT}/data\"\n",
        )
        .unwrap();
        std::env::set_var("_EDUVERSE_TEST_ROOT", "/opt/edu");
        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_EDUVERSE_TEST_ROOT");

        // Env overrides may be set in the surrounding environment.
        if std::env::var("EDUVERSE_DATA_DIR").is_err() && std::env::var("EDUVERSE_API_URL").is_err()
        {
            assert_eq!(
                config.source,
                ContentSource::Fs {
                    data_dir: PathBuf::from("/opt/edu/data")
                }
            );
        }
    }

    #[test]
    fn factory_builds_matching_provider() {
        let config = EduverseConfig::default();
        assert_eq!(create_provider(&config).unwrap().name(), "fs");

        let config = EduverseConfig {
            source: ContentSource::Http {
                base_url: "http://localhost:3000/api".into(),
                timeout_secs: None,
            },
            ..EduverseConfig::default()
        };
        assert_eq!(create_provider(&config).unwrap().name(), "http");
    }
}
