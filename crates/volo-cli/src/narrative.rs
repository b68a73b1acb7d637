//! Narrative fetch adapter
//!
//! Asks a text generator for short blurbs about an asset. Every call resolves
//! to displayable text: failures of any kind are logged and replaced by a
//! fixed fallback line.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown when a provenance record cannot be generated
pub const NARRATIVE_FALLBACK: &str = "A digital silhouette of physical existence.";

/// Shown when a remix suggestion cannot be generated
pub const REMIX_FALLBACK: &str =
    "Neural patterns suggest an iridescent glass finish with high-frequency emission pulses.";

const NARRATIVE_TEMPERATURE: f32 = 0.8;
const REMIX_TEMPERATURE: f32 = 0.9;
const MAX_OUTPUT_TOKENS: u32 = 100;

/// A single prompt plus sampling controls
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Backend able to turn a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[async_trait]
impl<G: TextGenerator + ?Sized> TextGenerator for Arc<G> {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        (**self).generate(request).await
    }
}

/// Fallback-absorbing front for a [`TextGenerator`]
#[derive(Debug, Clone)]
pub struct NarrativeAdapter<G> {
    generator: G,
}

impl<G: TextGenerator> NarrativeAdapter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Short provenance record for an asset
    pub async fn fetch_narrative(&self, title: &str, description: &str) -> String {
        let request = GenerationRequest {
            prompt: provenance_prompt(title, description),
            temperature: NARRATIVE_TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        self.generate_or(&request, NARRATIVE_FALLBACK, title).await
    }

    /// Visual remix idea for an asset, steered by the user's wish
    pub async fn suggest_remix(&self, title: &str, user_prompt: &str) -> String {
        let request = GenerationRequest {
            prompt: remix_prompt(title, user_prompt),
            temperature: REMIX_TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        self.generate_or(&request, REMIX_FALLBACK, title).await
    }

    async fn generate_or(&self, request: &GenerationRequest, fallback: &str, title: &str) -> String {
        match self.generator.generate(request).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(title, "Generated text received");
                text.trim().to_string()
            },
            Ok(_) => {
                warn!(title, "Generator returned empty text, using fallback");
                fallback.to_string()
            },
            Err(e) => {
                warn!(title, error = %e, "Text generation failed, using fallback");
                fallback.to_string()
            },
        }
    }
}

fn provenance_prompt(title: &str, description: &str) -> String {
    format!(
        "You are a philosopher-curator for a futuristic museum of human memories. \
         Write a short, evocative (max 25 words) \"provenance record\" for a 3D scan of \"{}\". \
         Focus on the weight of preserving physical reality. Description context: {}.",
        title, description
    )
}

fn remix_prompt(title: &str, user_prompt: &str) -> String {
    format!(
        "Suggest a futuristic 3D visual remix for an object titled \"{}\". \
         The user wants: \"{}\". Describe the new material properties \
         (e.g., iridescent glass, liquid chrome, obsidian) and environmental lighting \
         in 2 sentences. Be highly technical and creative.",
        title, user_prompt
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replays canned answers and records what it was asked
    struct ScriptedGenerator {
        answer: std::result::Result<String, String>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGenerator {
        fn ok(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: Err("quota exhausted".to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            self.answer.clone().map_err(CliError::api)
        }
    }

    /// Echoes the prompt back after a per-title delay
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            let delay = if request.prompt.contains("Slow") { 50 } else { 1 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(request.prompt.clone())
        }
    }

    #[tokio::test]
    async fn test_narrative_success() {
        let adapter = NarrativeAdapter::new(ScriptedGenerator::ok("  Held against forgetting.\n"));
        let text = adapter.fetch_narrative("Astronaut", "A suit").await;
        assert_eq!(text, "Held against forgetting.");

        let seen = adapter.generator().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("\"Astronaut\""));
        assert!(seen[0].prompt.contains("max 25 words"));
        assert!(seen[0].prompt.contains("A suit"));
        assert_eq!(seen[0].max_output_tokens, 100);
        assert!((seen[0].temperature - 0.8).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_narrative_failure_yields_fallback() {
        let adapter = NarrativeAdapter::new(ScriptedGenerator::failing());
        let text = adapter.fetch_narrative("Astronaut", "").await;
        assert_eq!(text, NARRATIVE_FALLBACK);
        assert_eq!(adapter.generator().seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_answer_yields_fallback() {
        let adapter = NarrativeAdapter::new(ScriptedGenerator::ok("   "));
        assert_eq!(adapter.fetch_narrative("Horse", "").await, NARRATIVE_FALLBACK);
    }

    #[tokio::test]
    async fn test_remix_success_and_fallback() {
        let adapter = NarrativeAdapter::new(ScriptedGenerator::ok("Liquid chrome under sodium light."));
        let text = adapter.suggest_remix("Horse", "make it molten").await;
        assert_eq!(text, "Liquid chrome under sodium light.");
        {
            let seen = adapter.generator().seen.lock().unwrap();
            assert!(seen[0].prompt.contains("make it molten"));
            assert!((seen[0].temperature - 0.9).abs() < f32::EPSILON);
        }

        let failing = NarrativeAdapter::new(ScriptedGenerator::failing());
        assert_eq!(failing.suggest_remix("Horse", "x").await, REMIX_FALLBACK);
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let adapter = NarrativeAdapter::new(EchoGenerator);
        let (slow, fast) = tokio::join!(
            adapter.fetch_narrative("Slow Helmet", "a"),
            adapter.fetch_narrative("Fast Shoe", "b"),
        );
        assert!(slow.contains("Slow Helmet"));
        assert!(fast.contains("Fast Shoe"));
        assert!(!slow.contains("Fast Shoe"));
    }

    #[tokio::test]
    async fn test_shared_generator() {
        let generator = Arc::new(ScriptedGenerator::ok("Shared."));
        let adapter = NarrativeAdapter::new(Arc::clone(&generator));
        assert_eq!(adapter.fetch_narrative("A", "").await, "Shared.");
        assert_eq!(generator.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_client_failure_yields_fallback() {
        let client = crate::api::GenerativeClient::new(
            "http://127.0.0.1:9",
            "m",
            Some("k".to_string()),
            Duration::from_millis(200),
        )
        .unwrap();
        let adapter = NarrativeAdapter::new(client);
        assert_eq!(adapter.fetch_narrative("Astronaut", "").await, NARRATIVE_FALLBACK);
    }
}
