//! Generative model integration for plan generation
//!
//! Connects to an OpenAI-compatible chat completion server, asks it for a
//! city plan in JSON, and assembles the validated `UrbanPlan`. Transient
//! overload responses are retried with exponential backoff, optionally
//! falling back to a lighter model on the last attempt.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::modules::Enhancement;
use crate::plan::{ControlSettings, UrbanPlan};
use crate::prompt::{build_plan_prompt, SYSTEM_PROMPT};

/// Configuration for the plan-generation server
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// Base URL of the LLM server (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Model name to use (optional, server may have default)
    pub model: Option<String>,
    /// Lighter model to fall back to on the final retry
    pub fallback_model: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts before giving up on transient overload
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: None,
            fallback_model: None,
            max_tokens: 4096,
            temperature: 0.7,
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

/// OpenAI-compatible chat message
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-compatible chat completion request
#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// OpenAI-compatible chat completion response
#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessageResponse,
}

/// Response message - handles both standard and reasoning models
#[derive(Deserialize, Debug)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

impl ChatMessageResponse {
    /// Get the actual response content, checking multiple fields
    fn get_content(&self) -> Option<String> {
        self.content
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.reasoning_content.clone())
            .or_else(|| self.reasoning.clone())
    }
}

/// Client for the plan-generation server
pub struct LlmClient {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl LlmClient {
    /// Create a new client with the given configuration
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Request a completion, retrying transient overload failures.
    ///
    /// Backoff doubles per attempt; the final attempt switches to the
    /// configured fallback model, if any.
    pub fn generate(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let mut last_error = LlmError::EmptyResponse;

        for attempt in 1..=self.config.max_retries.max(1) {
            let final_attempt = attempt == self.config.max_retries.max(1);
            let model = if final_attempt && self.config.fallback_model.is_some() {
                self.config.fallback_model.clone()
            } else {
                self.config.model.clone()
            };

            match self.chat_completion(model, messages.clone()) {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if !err.is_transient() || final_attempt {
                        return Err(err);
                    }
                    let delay = Duration::from_millis(1000 * 2u64.pow(attempt));
                    eprintln!(
                        "Attempt {} failed: {}. Model busy, retrying in {}s...",
                        attempt,
                        err,
                        delay.as_secs()
                    );
                    std::thread::sleep(delay);
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }

    /// Make a single chat completion request
    fn chat_completion(
        &self,
        model: Option<String>,
        messages: Vec<ChatMessage>,
    ) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::ApiError(format!("Status {}: {}", status, body)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        completion
            .choices
            .first()
            .and_then(|c| c.message.get_content())
            .ok_or(LlmError::EmptyResponse)
    }

    /// Check if the LLM server is available
    pub fn health_check(&self) -> bool {
        let url = format!("{}/v1/models", self.config.base_url);
        self.client
            .get(&url)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

/// Errors that can occur while talking to the model server
#[derive(Debug)]
pub enum LlmError {
    NetworkError(String),
    ApiError(String),
    ParseError(String),
    EmptyResponse,
}

impl LlmError {
    /// Overload-shaped failures are worth retrying; everything else is not.
    fn is_transient(&self) -> bool {
        match self {
            LlmError::ApiError(msg) => {
                msg.contains("503") || msg.contains("429") || msg.contains("overloaded")
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::NetworkError(e) => write!(f, "Network error: {}", e),
            LlmError::ApiError(e) => write!(f, "API error: {}", e),
            LlmError::ParseError(e) => write!(f, "Parse error: {}", e),
            LlmError::EmptyResponse => write!(f, "Empty response from LLM"),
        }
    }
}

impl std::error::Error for LlmError {}

/// Errors from one full plan generation
#[derive(Debug)]
pub enum GenerateError {
    Llm(LlmError),
    /// The model's reply was not valid JSON. The body is kept for display.
    InvalidJson(String),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Llm(e) => write!(f, "{}", e),
            GenerateError::InvalidJson(e) => {
                write!(f, "The model returned a response that was not valid JSON: {}", e)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<LlmError> for GenerateError {
    fn from(err: LlmError) -> Self {
        GenerateError::Llm(err)
    }
}

/// Generate one urban plan from the given settings and enhancements.
///
/// A reply that is not JSON at all is surfaced as an error; a reply with
/// the wrong *shape* is not — shape defects are corrected by normalization.
pub fn generate_urban_plan(
    client: &LlmClient,
    settings: &ControlSettings,
    enhancements: &[Enhancement],
    grid_size: usize,
) -> Result<UrbanPlan, GenerateError> {
    let messages = vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: build_plan_prompt(settings, enhancements, grid_size),
        },
    ];

    let reply = client.generate(messages)?;
    let body = strip_code_fences(&reply);
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GenerateError::InvalidJson(e.to_string()))?;

    Ok(UrbanPlan::from_response(&value, settings, grid_size))
}

/// Drop a surrounding Markdown code fence, if the model added one.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json" etc.) on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_transient_detection() {
        assert!(LlmError::ApiError("Status 503 Service Unavailable: busy".into()).is_transient());
        assert!(LlmError::ApiError("Status 429: slow down".into()).is_transient());
        assert!(LlmError::ApiError("model is overloaded".into()).is_transient());
        assert!(!LlmError::ApiError("Status 400: bad request".into()).is_transient());
        assert!(!LlmError::NetworkError("connection refused".into()).is_transient());
        assert!(!LlmError::EmptyResponse.is_transient());
    }

    #[test]
    fn test_reasoning_content_fallback() {
        let msg = ChatMessageResponse {
            content: Some(String::new()),
            reasoning: Some("thinking".to_string()),
            reasoning_content: None,
        };
        assert_eq!(msg.get_content().as_deref(), Some("thinking"));
    }
}
