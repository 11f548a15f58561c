use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::Result;
use regex::Regex;

pub const BACKEND_URL_ENV: &str = "TRANSLATOR_BACKEND_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    #[serde(default = "default_target_lang")]
    pub default_target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_copy_feedback_ms() -> u64 {
    2000
}

fn default_toast_ms() -> u64 {
    3000
}

fn default_target_lang() -> String {
    "EN-US".to_string()
}

fn default_preferences_path() -> String {
    "preferences.json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_upload_bytes: default_max_upload_bytes(),
            copy_feedback_ms: default_copy_feedback_ms(),
            toast_ms: default_toast_ms(),
            default_target_lang: default_target_lang(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preferences_path: default_preferences_path(),
        }
    }
}

impl ControllerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load a YAML or JSON config file, chosen by extension.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&fs::read_to_string(path)?);

        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try each candidate in order, falling back to defaults when none loads.
    /// Returns the path that was used, if any.
    pub fn discover(candidates: &[String]) -> (Self, Option<String>) {
        for path in candidates {
            match Config::load(path) {
                Ok(cfg) => return (cfg, Some(path.clone())),
                Err(e) => {
                    tracing::debug!("Failed to load config from {}: {}", path, e);
                }
            }
        }

        let mut config = Config::default();
        config.apply_env_overrides();
        (config, None)
    }

    /// Candidate paths, most specific first.
    pub fn default_candidates() -> Vec<String> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
            exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend.base_url = url;
            }
        }
    }
}

/// Replace `${VAR_NAME}` with the variable's value. Unset variables are kept
/// verbatim.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(p) => p,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
