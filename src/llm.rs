use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("travel-planner/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// LLM provider — determines API format and endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Anthropic,
    OpenRouter,
    /// Any OpenAI-compatible API (together.ai, local ollama, etc.)
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::OpenAi => "http://localhost:11434/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::Anthropic => "claude-3-5-haiku-latest",
            Self::OpenRouter => "google/gemini-flash-1.5",
            Self::OpenAi => "llama3.1",
        }
    }

    /// Lenient name lookup for CLI overrides; unknown names fall back to the default.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "anthropic" => Self::Anthropic,
            "openrouter" => Self::OpenRouter,
            "openai" => Self::OpenAi,
            _ => Self::Gemini,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenRouter => write!(f, "openrouter"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

pub struct LlmClient {
    provider: Provider,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
    http: HttpClient,
}

impl fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// -- Gemini format --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

// -- Anthropic format --

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Msg<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    text: Option<String>,
}

// -- OpenAI-compatible format --

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Msg<'a>>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: String,
}

// -- Shared --

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

impl LlmClient {
    pub fn new(
        provider: Provider,
        api_key: String,
        model: String,
        max_tokens: u32,
        base_url: Option<String>,
    ) -> Result<Self> {
        let http = HttpClient::new(USER_AGENT, DEFAULT_TIMEOUT)?;
        let base_url = base_url
            .unwrap_or_else(|| provider.default_base_url().into())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            provider,
            api_key,
            model,
            max_tokens,
            base_url,
            http,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = HttpClient::new(USER_AGENT, timeout)?;
        Ok(self)
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single user prompt and return the model's text verbatim.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(provider = %self.provider, model = %self.model, "sending LLM request");

        match self.provider {
            Provider::Gemini => self.complete_gemini(prompt).await,
            Provider::Anthropic => self.complete_anthropic(prompt).await,
            Provider::OpenRouter | Provider::OpenAi => self.complete_openai(prompt).await,
        }
    }

    async fn complete_gemini(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.max_tokens,
            },
        };

        let body = serde_json::to_string(&request)
            .map_err(|e| Error::parse(format!("serialize request: {e}")))?;

        // Accept both "gemini-1.5-flash" and the fully qualified "models/gemini-1.5-flash".
        let model = self.model.trim_start_matches("models/");
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let response_text = self
            .http
            .post_json_raw(&url, &body, &[("x-goog-api-key", &self.api_key)])
            .await
            .map_err(|e| {
                warn!("Gemini API error: {e}");
                e
            })?;

        let resp: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| Error::parse(format!("parse Gemini response: {e}")))?;

        let text = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| Error::parse("empty response from Gemini"))?;
        Ok(text)
    }

    async fn complete_anthropic(&self, prompt: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let body = serde_json::to_string(&request)
            .map_err(|e| Error::parse(format!("serialize request: {e}")))?;

        let url = format!("{}/messages", self.base_url);
        let response_text = self
            .http
            .post_json_raw(
                &url,
                &body,
                &[
                    ("x-api-key", &self.api_key),
                    ("anthropic-version", "2023-06-01"),
                ],
            )
            .await
            .map_err(|e| {
                warn!("Anthropic API error: {e}");
                e
            })?;

        let resp: AnthropicResponse = serde_json::from_str(&response_text)
            .map_err(|e| Error::parse(format!("parse Anthropic response: {e}")))?;

        Ok(resp
            .content
            .into_iter()
            .filter_map(|b| b.text)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn complete_openai(&self, prompt: &str) -> Result<String> {
        let request = OpenAiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let body = serde_json::to_string(&request)
            .map_err(|e| Error::parse(format!("serialize request: {e}")))?;

        let url = format!("{}/chat/completions", self.base_url);
        let response_text = self
            .http
            .post_json_raw(
                &url,
                &body,
                &[("Authorization", &format!("Bearer {}", self.api_key))],
            )
            .await
            .map_err(|e| {
                warn!("LLM API error: {e}");
                e
            })?;

        let resp: OpenAiResponse = serde_json::from_str(&response_text)
            .map_err(|e| Error::parse(format!("parse LLM response: {e}")))?;

        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::parse("empty response from LLM"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_are_lenient() {
        assert_eq!(Provider::from_name("Anthropic"), Provider::Anthropic);
        assert_eq!(Provider::from_name("openai"), Provider::OpenAi);
        assert_eq!(Provider::from_name("openrouter"), Provider::OpenRouter);
        assert_eq!(Provider::from_name("whatever"), Provider::Gemini);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = LlmClient::new(
            Provider::Gemini,
            "k".into(),
            "gemini-1.5-flash".into(),
            64,
            Some("http://localhost:1/v1beta/".into()),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:1/v1beta");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = LlmClient::new(
            Provider::Anthropic,
            "sk-secret".into(),
            "m".into(),
            64,
            None,
        )
        .unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
