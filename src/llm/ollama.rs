//! Ollama `/api/generate` client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::TextGenerator;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "tinyllama";

/// Server address used when none is configured.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

const READY_TIMEOUT: Duration = Duration::from_secs(5);
const GENERATE_TIMEOUT: Duration = Duration::from_secs(90);

/// Blocking client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    model: String,
    host: String,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    /// Create a client for the default model and host.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            temperature: 0.1,
            top_p: 0.9,
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the server address, e.g. `http://localhost:11434`.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Server address.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.host)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGenerator for OllamaClient {
    fn is_ready(&self) -> bool {
        match self
            .client
            .get(format!("{}/", self.host))
            .timeout(READY_TIMEOUT)
            .send()
        {
            Ok(resp) => resp.status() == StatusCode::OK,
            Err(e) => {
                log::debug!("Readiness probe failed: {}", e);
                false
            }
        }
    }

    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature: self.temperature,
                top_p: self.top_p,
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .timeout(GENERATE_TIMEOUT)
            .json(&request)
            .send()?
            .error_for_status()?;

        let body: GenerateResponse = response
            .json()
            .map_err(|e| Error::Model(format!("invalid generate response: {}", e)))?;

        Ok(body.response.trim().to_string())
    }
}
