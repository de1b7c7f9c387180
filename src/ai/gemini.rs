//! Gemini API client

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{self, PromptStyle};
use crate::ai::response::{self, CommitPlan};
use crate::core::config::{CommitStyle, Config};
use crate::core::diff::FileChange;
use crate::error::{AiError, Result};

/// Whole-request timeout for a single generateContent call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Sampling temperature for every request
const TEMPERATURE: f32 = 0.3;

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
    max_tokens: u32,
    style: CommitStyle,
    language: String,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AiError::Transport)?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            style: config.commit_style,
            language: config.language.clone(),
        })
    }

    /// Get the current model name
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the first candidate's text verbatim
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint,
            self.model,
            self.api_key.expose_secret()
        );

        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: self.max_tokens,
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            max_tokens = self.max_tokens,
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::Transport(e.without_url()))?;
        tracing::debug!(%status, body_len = body.len(), "received Gemini reply");

        Ok(extract_text(&body)?)
    }

    /// Generate commit messages for all staged files in a single request
    pub async fn generate_commit_messages(
        &self,
        changes: &[FileChange],
        granular: bool,
        recent_commits: &[String],
    ) -> Result<CommitPlan> {
        let prompt = prompts::commit_message_prompt(
            changes,
            granular,
            recent_commits,
            PromptStyle {
                style: self.style,
                language: &self.language,
            },
        );

        let raw = self.generate(&prompt).await?;
        Ok(response::parse_commit_response(&raw, changes, granular))
    }

    /// Generate markdown release notes for a new tag
    pub async fn generate_release_notes(
        &self,
        commits: &[String],
        current_tag: Option<&str>,
        new_tag: &str,
    ) -> Result<String> {
        let prompt = prompts::release_notes_prompt(commits, current_tag, new_tag);
        self.generate(&prompt).await
    }

    /// Ask for the next semantic version (returned without `v` prefix)
    pub async fn suggest_next_version(
        &self,
        commits: &[String],
        current_tag: Option<&str>,
    ) -> Result<String> {
        let prompt = prompts::next_version_prompt(commits, current_tag);
        let raw = self.generate(&prompt).await?;
        Ok(response::extract_version(&raw))
    }
}

/// Decode a reply envelope into its first text part
fn extract_text(body: &str) -> std::result::Result<String, AiError> {
    let envelope: GeminiResponse =
        serde_json::from_str(body).map_err(|source| AiError::Protocol {
            source,
            body: body.to_string(),
        })?;

    if let Some(error) = envelope.error {
        return Err(AiError::Backend {
            message: error.message,
        });
    }

    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or(AiError::EmptyResponse)
}

// ─────────────────────────────────────────────────────────────────────────────
// Gemini API Request/Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: 512,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 512);
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_success_is_verbatim() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  feat: x\n"},{"text":"ignored"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "  feat: x\n");
    }

    #[test]
    fn test_extract_text_backend_error() {
        let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        match extract_text(body) {
            Err(AiError::Backend { message }) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(AiError::EmptyResponse)
        ));
        assert!(matches!(extract_text("{}"), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn test_extract_text_candidate_without_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model"},"finishReason":"MAX_TOKENS"}]}"#;
        assert!(matches!(extract_text(body), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn test_extract_text_protocol_error_keeps_body() {
        match extract_text("<html>bad gateway</html>") {
            Err(AiError::Protocol { body, .. }) => assert_eq!(body, "<html>bad gateway</html>"),
            other => panic!("expected protocol error, got {:?}", other),
        }
    }
}
