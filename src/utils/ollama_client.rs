//! Client for an Ollama-style generate endpoint.
//!
//! Builds the assistant prompt around the cached document context, posts it
//! to the configured URL, and extracts the generated text from the JSON
//! reply. The public entry point never fails: any transport or parse error
//! is logged and replaced by a fixed fallback message.

use std::sync::{Arc, LazyLock};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{self, ModelConfig, ModelParameters};

/// Reply sent to the user when the inference endpoint cannot be reached or
/// returns something unusable.
pub const FALLBACK_RESPONSE: &str =
    "Sorry, I am experiencing technical difficulties. Please try again later.";

/// Shared client, configured from the environment and the modelfile on first
/// access.
pub static OLLAMA_CLIENT: LazyLock<Arc<OllamaClient>> = LazyLock::new(|| {
    debug!("Initializing OllamaClient");
    let model_config = ModelConfig::load(&config::modelfile_path());
    Arc::new(OllamaClient::new(config::ollama_url(), model_config))
});

/// Errors that can occur while querying the generate endpoint.
#[derive(Error, Debug)]
pub enum OllamaError {
    /// Error during HTTP request communication, including non-2xx statuses.
    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),

    /// Error parsing the JSON response from the endpoint.
    #[error("Unable to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Request body for the generate endpoint.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: &'a GenerateOptions,
}

/// Sampling options as the generate endpoint expects them.
#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

impl From<&ModelParameters> for GenerateOptions {
    fn from(parameters: &ModelParameters) -> Self {
        Self {
            temperature: parameters.temperature,
            num_predict: parameters.max_tokens,
            top_p: parameters.top_p,
            frequency_penalty: parameters.frequency_penalty,
            presence_penalty: parameters.presence_penalty,
        }
    }
}

/// Response body of the generate endpoint. Only the generated text matters.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
    options: GenerateOptions,
}

impl OllamaClient {
    pub fn new(url: String, model_config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            url,
            model: model_config.model,
            options: GenerateOptions::from(&model_config.parameters),
        }
    }

    /// Answers `question` grounded in `context`. Infallible: on any error the
    /// fixed fallback message is returned instead.
    pub async fn respond(&self, question: &str, context: &str) -> String {
        info!("Sending generate request to {}", self.url);
        match self.generate(question, context).await {
            Ok(answer) => {
                debug!("Received {} byte answer", answer.len());
                answer
            }
            Err(e) => {
                error!("Error obtaining response from {}: {}", self.url, e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    async fn generate(&self, question: &str, context: &str) -> Result<String, OllamaError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(question, context),
            stream: false,
            options: &self.options,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await.map_err(OllamaError::Api)?;
        let result: GenerateResponse = serde_json::from_str(&text)?;

        Ok(result.response.trim().to_string())
    }
}

/// The prompt template embedding the document context and the question.
fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a professional company assistant. Use the following context \
         to answer the user's question. If the question cannot be answered \
         from the available context, say that you do not have that \
         information.\n\n\
         Context:\n{context}\n\n\
         User question:\n{question}\n\n\
         Provide a professional and concise answer."
    )
}
