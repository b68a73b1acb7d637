//! HTTP client for the generative text service

use crate::api::{endpoints, types::*};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::narrative::{GenerationRequest, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for the `generateContent` endpoint
pub struct GenerativeClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GenerativeClient {
    /// Create a new client
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        })
    }

    /// Create from CLI configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            config.model(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Generate text for a single prompt
    pub async fn generate_content(&self, request: &GenerationRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CliError::config("No API key configured. Set VOLO_API_KEY (or API_KEY)")
        })?;

        let url = endpoints::generate_content_url(&self.base_url, &self.model, api_key);
        let body = GenerateContentRequest::from_prompt(
            request.prompt.clone(),
            GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        );

        debug!(model = %self.model, "Requesting generated text");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: GenerateContentResponse = response.json().await?;

        payload.text().ok_or_else(|| {
            let reason = payload
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            CliError::api(format!("response contained no text ({})", reason))
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GenerativeClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.generate_content(request).await
    }
}
