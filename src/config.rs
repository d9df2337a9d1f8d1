//! Configuration for skoolify.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SKOOLIFY_HOME, SKOOLIFY_STORE, GEMINI_API_KEY)
//! 2. Config file (.skoolify/config.yaml)
//! 3. Defaults (~/.skoolify)
//!
//! Config file discovery:
//! - Searches current directory and parents for .skoolify/config.yaml
//! - Paths in config file are relative to the .skoolify/ directory

pub mod paths;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::DEFAULT_LEVEL;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub quiz: Option<QuizConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Home directory (relative to .skoolify/)
    pub home: Option<String>,
    /// Store directory (relative to .skoolify/)
    pub store: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub search_model: Option<String>,
    pub reasoning_model: Option<String>,
    pub quiz_model: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    pub default_level: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to skoolify home
    pub home: PathBuf,
    /// Absolute path to the key-value store directory
    pub store: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Gemini endpoint settings
    pub gemini: GeminiSettings,
    /// Difficulty used when a quiz form leaves the level empty
    pub default_quiz_level: String,
}

/// Gemini endpoint, models and timeout
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Model used with the search tool (research, video discovery)
    pub search_model: String,
    /// Model used for notes, study plans and video extraction
    pub reasoning_model: String,
    /// Model used for structured quiz output
    pub quiz_model: String,
    pub request_timeout_seconds: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            search_model: DEFAULT_MODEL.to_string(),
            reasoning_model: DEFAULT_MODEL.to_string(),
            quiz_model: DEFAULT_MODEL.to_string(),
            request_timeout_seconds: 120,
        }
    }
}

impl GeminiSettings {
    /// Overlay values from the config file
    fn merge(mut self, file: &GeminiConfig) -> Self {
        if let Some(ref key) = file.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(ref url) = file.base_url {
            self.base_url = url.clone();
        }
        if let Some(ref model) = file.search_model {
            self.search_model = model.clone();
        }
        if let Some(ref model) = file.reasoning_model {
            self.reasoning_model = model.clone();
        }
        if let Some(ref model) = file.quiz_model {
            self.quiz_model = model.clone();
        }
        if let Some(timeout) = file.request_timeout_seconds {
            self.request_timeout_seconds = timeout;
        }
        self
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".skoolify");

    let config_file = find_config_file();
    let parsed = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    // Relative paths resolve against the .skoolify/ directory holding the file
    let config_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));

    let home = if let Some(env_home) = env_var("SKOOLIFY_HOME") {
        PathBuf::from(env_home)
    } else if let Some(home_path) = parsed.as_ref().and_then(|c| c.paths.home.as_deref()) {
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    let store = if let Some(env_store) = env_var("SKOOLIFY_STORE") {
        PathBuf::from(env_store)
    } else if let Some(store_path) = parsed.as_ref().and_then(|c| c.paths.store.as_deref()) {
        resolve_path(config_dir, store_path)
    } else {
        home.join("store")
    };

    let mut gemini = match parsed.as_ref().and_then(|c| c.gemini.as_ref()) {
        Some(file) => GeminiSettings::default().merge(file),
        None => GeminiSettings::default(),
    };
    if let Some(key) = env_var("GEMINI_API_KEY") {
        gemini.api_key = Some(key);
    }

    let default_quiz_level = parsed
        .as_ref()
        .and_then(|c| c.quiz.as_ref())
        .and_then(|q| q.default_level.clone())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    Ok(ResolvedConfig {
        home,
        store,
        config_file,
        gemini,
        default_quiz_level,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the key-value store directory.
pub fn store_dir() -> Result<PathBuf> {
    Ok(config()?.store.clone())
}
