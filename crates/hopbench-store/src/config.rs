//! hopbench configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hopbench_core::traits::ResultStore;

use crate::http::HttpStore;
use crate::jsonl::JsonlStore;
use crate::memory::MemoryStore;

/// Where finished session results go.
///
/// Note: Custom Debug impl masks the HTTP token to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Jsonl {
        #[serde(default = "default_results_path")]
        path: PathBuf,
    },
    Http {
        endpoint: String,
        #[serde(default)]
        token: Option<String>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Memory,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreConfig::Jsonl { path } => f.debug_struct("Jsonl").field("path", path).finish(),
            StoreConfig::Http {
                endpoint,
                token,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("endpoint", endpoint)
                .field("token", &token.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
            StoreConfig::Memory => f.write_str("Memory"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Jsonl {
            path: default_results_path(),
        }
    }
}

fn default_results_path() -> PathBuf {
    PathBuf::from("./hopbench-results/sessions.jsonl")
}

fn default_timeout_secs() -> u64 {
    30
}

/// Top-level hopbench configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HopbenchConfig {
    /// The question source file.
    #[serde(default = "default_questions_path")]
    pub questions_path: PathBuf,
    /// Display name of the model the participant is compared against.
    #[serde(default = "default_model_label")]
    pub model_label: String,
    /// Directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Result store.
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("questions.json")
}
fn default_model_label() -> String {
    "Qwen-2.5-32B".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./hopbench-results")
}

impl Default for HopbenchConfig {
    fn default() -> Self {
        Self {
            questions_path: default_questions_path(),
            model_label: default_model_label(),
            output_dir: default_output_dir(),
            store: StoreConfig::default(),
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

/// Resolve env vars in a store config.
fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Jsonl { path } => StoreConfig::Jsonl {
            path: resolve_path(path),
        },
        StoreConfig::Http {
            endpoint,
            token,
            timeout_secs,
        } => StoreConfig::Http {
            endpoint: resolve_env_vars(endpoint),
            token: token.as_ref().map(|t| resolve_env_vars(t)),
            timeout_secs: *timeout_secs,
        },
        StoreConfig::Memory => StoreConfig::Memory,
    }
}

/// Load configuration.
///
/// Search order:
/// 1. `path`, when given (it must exist)
/// 2. `hopbench.toml` in the current directory
/// 3. `~/.config/hopbench/config.toml`
/// 4. built-in defaults
///
/// Environment variable overrides: `HOPBENCH_QUESTIONS`, `HOPBENCH_STORE_TOKEN`.
pub fn load_config_from(path: Option<&Path>) -> Result<HopbenchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("hopbench.toml");
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
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => HopbenchConfig::default(),
    };

    // Apply env var overrides
    if let Ok(questions) = std::env::var("HOPBENCH_QUESTIONS") {
        config.questions_path = PathBuf::from(questions);
    }

    if let Ok(key) = std::env::var("HOPBENCH_STORE_TOKEN") {
        if let StoreConfig::Http { token, .. } = &mut config.store {
            *token = Some(key);
        }
    }

    config.questions_path = resolve_path(&config.questions_path);
    config.output_dir = resolve_path(&config.output_dir);
    config.store = resolve_store_config(&config.store);

    Ok(config)
}

/// Parse a TOML config string (useful for testing).
pub fn parse_config_str(content: &str) -> Result<HopbenchConfig> {
    Ok(toml::from_str::<HopbenchConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("hopbench"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn ResultStore>> {
    match config {
        StoreConfig::Jsonl { path } => Ok(Arc::new(JsonlStore::new(path))),
        StoreConfig::Http {
            endpoint,
            token,
            timeout_secs,
        } => Ok(Arc::new(HttpStore::with_timeout(
            endpoint,
            token.clone(),
            *timeout_secs,
        )?)),
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
