//! Optional AI-backed extraction through the OpenRouter chat API.
//!
//! The oracle is silent by contract: whatever goes wrong (no key, transport
//! failure, rate limiting past the retry budget, a reply that is not JSON)
//! it answers `None`, and the import pipeline drops to the heuristic text
//! extractor. Callers never see an oracle error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 4000;
const BACKOFF_BASE_MS: u64 = 500;

/// Best-effort structured extraction from raw resume text.
#[async_trait]
pub trait ResumeOracle: Send + Sync {
    /// A parsed JSON tree ready for normalization, or `None` on any failure.
    async fn extract(&self, text: &str) -> Option<Value>;
}

/// Stand-in used when no API key is configured.
pub struct DisabledOracle;

#[async_trait]
impl ResumeOracle for DisabledOracle {
    async fn extract(&self, _text: &str) -> Option<Value> {
        debug!("no extraction oracle configured, using heuristics only");
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenRouter client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct OpenRouterOracle {
    client: reqwest::Client,
    api_key: String,
    model: String,
    referer: Option<String>,
    max_retries: u32,
}

impl OpenRouterOracle {
    /// Builds a client from configuration; `None` when no API key is set.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.openrouter_api_key.clone()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");
        Some(OpenRouterOracle {
            client,
            api_key,
            model: config.oracle_model.clone(),
            referer: config.oracle_referer.clone(),
            max_retries: config.oracle_max_retries,
        })
    }

    /// One chat completion with bounded retries on transport errors, 429,
    /// and server errors. Other rejections are final.
    async fn complete(&self, prompt: &str) -> Option<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(BACKOFF_BASE_MS * attempt as u64);
                warn!(attempt, ?backoff, "retrying oracle request");
                tokio::time::sleep(backoff).await;
            }

            let mut builder = self
                .client
                .post(OPENROUTER_URL)
                .bearer_auth(&self.api_key)
                .json(&request);
            if let Some(referer) = &self.referer {
                builder = builder.header("HTTP-Referer", referer);
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(error) => {
                    warn!(%error, "oracle transport error");
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                warn!(%status, "oracle returned retryable status");
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(%status, %body, "oracle request rejected");
                return None;
            }

            return match response.json::<ChatResponse>().await {
                Ok(parsed) => parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content),
                Err(error) => {
                    warn!(%error, "oracle response body unreadable");
                    None
                }
            };
        }
        warn!("oracle retry budget exhausted");
        None
    }
}

#[async_trait]
impl ResumeOracle for OpenRouterOracle {
    async fn extract(&self, text: &str) -> Option<Value> {
        let prompt = extraction_prompt(text);
        let reply = self.complete(&prompt).await?;
        let payload = strip_json_fences(&reply);
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => {
                debug!("oracle produced structured resume data");
                Some(value)
            }
            Err(error) => {
                warn!(%error, "oracle reply was not valid JSON");
                None
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt
// ────────────────────────────────────────────────────────────────────────────

const TARGET_SHAPE: &str = r#"{
  "personal": {"fullName": "", "email": "", "phone": "", "location": "", "linkedin": "", "portfolio": "", "summary": ""},
  "experience": [{"title": "", "company": "", "location": "", "startDate": "", "endDate": "", "responsibilities": [""]}],
  "education": [{"degree": "", "institution": "", "location": "", "gpa": "", "startDate": "", "endDate": ""}],
  "skills": {"technical": [""], "soft": [""]},
  "certifications": [{"name": "", "issuer": "", "date": ""}],
  "projects": [{"name": "", "technologies": "", "description": "", "link": ""}]
}"#;

fn extraction_prompt(text: &str) -> String {
    format!(
        "Extract structured resume data from the text below.\n\
         Return ONLY valid JSON matching exactly this structure, with no markdown and no commentary:\n\
         {TARGET_SHAPE}\n\
         Use empty strings for anything the text does not state. Keep dates as they appear.\n\
         Use \"Present\" as endDate for current positions.\n\n\
         Resume text:\n{text}"
    )
}

/// Strips a leading ```json / ``` fence and a trailing ``` fence, if any.
fn strip_json_fences(s: &str) -> &str {
    let trimmed = s.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_plain_passthrough() {
        assert_eq!(strip_json_fences(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_strip_json_fences_json_fence() {
        assert_eq!(
            strip_json_fences("```json\n{\"a\": 1}\n```"),
            r#"{"a": 1}"#
        );
    }

    #[test]
    fn test_strip_json_fences_bare_fence() {
        assert_eq!(strip_json_fences("```\n{\"a\": 1}\n```"), r#"{"a": 1}"#);
    }

    #[test]
    fn test_prompt_embeds_text_and_shape() {
        let prompt = extraction_prompt("JANE DOE resume body");
        assert!(prompt.contains("JANE DOE resume body"));
        assert!(prompt.contains("\"fullName\""));
        assert!(prompt.contains("ONLY valid JSON"));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        assert!(OpenRouterOracle::from_config(&Config::offline()).is_none());

        let config = Config {
            openrouter_api_key: Some("sk-test".to_string()),
            ..Config::offline()
        };
        let oracle = OpenRouterOracle::from_config(&config).unwrap();
        assert_eq!(oracle.model, Config::offline().oracle_model);
    }

    #[tokio::test]
    async fn test_disabled_oracle_always_declines() {
        assert!(DisabledOracle.extract("any text").await.is_none());
    }
}
