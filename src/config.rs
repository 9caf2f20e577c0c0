//! Environment lookups and the optional model configuration file.
//!
//! All tunables come from the environment (loaded via `dotenv` in `main`),
//! with a JSON "modelfile" providing the sampling parameters forwarded to the
//! inference endpoint.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Default inference endpoint when `OLLAMA_URL` is not set.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";

/// Default directory scanned for context documents.
pub const DEFAULT_DOCUMENTS_DIR: &str = "./documents";

/// Default location of the model configuration file.
pub const DEFAULT_MODELFILE_PATH: &str = "./modelfile.json";

/// Directory holding the context documents (`DOCUMENTS_DIR`).
pub fn documents_dir() -> PathBuf {
    env::var("DOCUMENTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOCUMENTS_DIR))
}

/// Full URL of the generate endpoint (`OLLAMA_URL`).
pub fn ollama_url() -> String {
    env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string())
}

/// Location of the model configuration file (`MODELFILE_PATH`).
pub fn modelfile_path() -> PathBuf {
    env::var("MODELFILE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODELFILE_PATH))
}

/// Interaction log file (`INTERACTION_LOG`). Logging is disabled when the
/// variable is not set.
pub fn interaction_log_path() -> Option<PathBuf> {
    env::var("INTERACTION_LOG").ok().map(PathBuf::from)
}

/// Model name and sampling parameters read from the modelfile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    /// Model identifier passed to the inference endpoint.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling parameters forwarded with every request.
    #[serde(default)]
    pub parameters: ModelParameters,
}

/// Sampling parameters understood by the generate endpoint. `max_tokens` is
/// translated to Ollama's `num_predict` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelParameters {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,
    #[serde(default = "default_presence_penalty")]
    pub presence_penalty: f32,
}

fn default_model() -> String {
    "tinyllama".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    80
}

fn default_top_p() -> f32 {
    0.9
}

fn default_frequency_penalty() -> f32 {
    0.5
}

fn default_presence_penalty() -> f32 {
    0.5
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            frequency_penalty: default_frequency_penalty(),
            presence_penalty: default_presence_penalty(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            parameters: ModelParameters::default(),
        }
    }
}

impl ModelConfig {
    /// Loads the configuration from `path`. A missing or unreadable file is
    /// not fatal: the bot runs with the defaults and a warning.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded model configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!(
                        "Invalid model configuration in {}: {}. Using defaults",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Could not read model configuration {}: {}. Using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_modelfile_is_parsed() {
        let json = r#"{
            "model": "llama3",
            "parameters": {
                "temperature": 0.2,
                "max_tokens": 256,
                "top_p": 0.95,
                "frequency_penalty": 0.1,
                "presence_penalty": 0.3
            }
        }"#;

        let config: ModelConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.model, "llama3");
        assert_eq!(config.parameters.temperature, 0.2);
        assert_eq!(config.parameters.max_tokens, 256);
        assert_eq!(config.parameters.top_p, 0.95);
        assert_eq!(config.parameters.frequency_penalty, 0.1);
        assert_eq!(config.parameters.presence_penalty, 0.3);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ModelConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, ModelConfig::default());
        assert_eq!(config.model, "tinyllama");
        assert_eq!(config.parameters.max_tokens, 80);
    }

    #[test]
    fn partial_parameters_keep_remaining_defaults() {
        let json = r#"{ "parameters": { "temperature": 0.1 } }"#;

        let config: ModelConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.parameters.temperature, 0.1);
        assert_eq!(config.parameters.top_p, 0.9);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        assert_eq!(ModelConfig::load(&path), ModelConfig::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelfile.json");
        fs::write(&path, "not json at all").unwrap();

        assert_eq!(ModelConfig::load(&path), ModelConfig::default());
    }
}
