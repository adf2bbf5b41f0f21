//! Completion backends: the seam between orchestration and providers.
//!
//! The generator only ever sees [`CompletionBackend`]: it sends a
//! [`CompletionRequest`] and gets back raw response text or a
//! [`GenerationFailure`]. Two implementations ship with the crate:
//!
//! * [`GeminiBackend`]: direct REST call to the Gemini `generateContent`
//!   endpoint with `responseMimeType: application/json` and a
//!   `responseSchema`, so the service itself constrains the output shape.
//!   Used whenever a Gemini credential is configured.
//! * [`ProviderBackend`]: any `edgequake_llm` provider (OpenAI, Anthropic,
//!   Ollama, ...). The JSON shape is requested through the prompt only.
//!
//! Tests and embedders can supply their own implementation through
//! [`GeneratorConfigBuilder::backend`](crate::config::GeneratorConfigBuilder::backend).

use crate::config::{GeneratorConfig, DEFAULT_GEMINI_MODEL};
use crate::error::{GenerationFailure, SeoError};
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// One prompt, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// A text-generation service able to answer a [`CompletionRequest`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Send the request and return the raw response text.
    ///
    /// # Errors
    /// Any failure to obtain non-empty text; timeouts are applied by the
    /// caller, not here.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationFailure>;
}

// ── Gemini REST adapter ──────────────────────────────────────────────────

/// Schema-constrained client for the Gemini `generateContent` endpoint.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    /// Create an adapter for `model` at `base_url`.
    ///
    /// # Errors
    /// [`SeoError::Internal`] if the HTTP client cannot be initialised.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SeoError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SeoError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// The output schema declared to Gemini.
///
/// Mirrors [`crate::output::SeoMetaOutput`]: title and description are
/// required, keywords optional.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "seoTitle": { "type": "STRING" },
            "metaDescription": { "type": "STRING" },
            "keywords": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["seoTitle", "metaDescription"]
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationFailure> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": request.system }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.user }] }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationFailure::Transport {
                backend: self.name().to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationFailure::Status {
                backend: self.name().to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationFailure::InvalidSchema {
                    detail: format!("unreadable Gemini envelope: {e}"),
                })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationFailure::EmptyResponse {
                backend: self.name().to_string(),
            });
        }
        debug!("gemini/{}: {} bytes of response text", self.model, text.len());
        Ok(text)
    }
}

/// Keep error bodies short enough for a single log line.
fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 300;
    if body.chars().count() > LIMIT {
        let head: String = body.chars().take(LIMIT).collect();
        format!("{head}\u{2026}")
    } else {
        body.to_string()
    }
}

// ── edgequake-llm adapter ────────────────────────────────────────────────

/// Any `edgequake_llm` chat provider.
pub struct ProviderBackend {
    name: String,
    provider: Arc<dyn LLMProvider>,
}

impl ProviderBackend {
    pub fn new(name: impl Into<String>, provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }
}

#[async_trait]
impl CompletionBackend for ProviderBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationFailure> {
        let messages = vec![
            ChatMessage::system(request.system.as_str()),
            ChatMessage::user(request.user.as_str()),
        ];
        let options = CompletionOptions {
            temperature: Some(request.temperature),
            max_tokens: Some(request.max_tokens),
            ..Default::default()
        };

        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| GenerationFailure::Provider {
                detail: format!("{}: {e}", self.name),
            })?;

        debug!(
            "{}: {} input tokens, {} output tokens",
            self.name, response.prompt_tokens, response.completion_tokens
        );

        if response.content.trim().is_empty() {
            return Err(GenerationFailure::EmptyResponse {
                backend: self.name.clone(),
            });
        }
        Ok(response.content)
    }
}

// ── Resolution ───────────────────────────────────────────────────────────

/// Resolve the backend described by `config`, from most to least specific.
///
/// 1. **Pre-built backend** (`config.backend`): used as-is.
/// 2. **Named provider** (`config.provider_name`): created through
///    [`ProviderFactory::create_llm_provider`], which reads that provider's
///    own API key variable (`OPENAI_API_KEY`, ...).
/// 3. **Gemini credential** (`config.api_key`): the REST adapter.
///
/// # Errors
/// [`SeoError::CredentialMissing`] when nothing is configured or `offline`
/// is set; [`SeoError::ProviderNotConfigured`] when a named provider fails
/// to initialise.
pub fn resolve_backend(config: &GeneratorConfig) -> Result<Arc<dyn CompletionBackend>, SeoError> {
    if config.offline {
        return Err(SeoError::CredentialMissing);
    }

    if let Some(ref backend) = config.backend {
        return Ok(Arc::clone(backend));
    }

    if let Some(ref name) = config.provider_name {
        let model = config
            .model
            .as_deref()
            .unwrap_or_else(|| default_model_for(name));
        let provider = ProviderFactory::create_llm_provider(name, model).map_err(|e| {
            SeoError::ProviderNotConfigured {
                provider: name.clone(),
                hint: format!("{e}"),
            }
        })?;
        return Ok(Arc::new(ProviderBackend::new(name.clone(), provider)));
    }

    match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Ok(Arc::new(GeminiBackend::new(
            key,
            config.gemini_model(),
            config.gemini_base_url.clone(),
        )?)),
        _ => Err(SeoError::CredentialMissing),
    }
}

/// Cheap, fast default model per provider name.
fn default_model_for(provider: &str) -> &'static str {
    match provider {
        "anthropic" => "claude-haiku-4-20250514",
        "gemini" => DEFAULT_GEMINI_MODEL,
        "ollama" => "llama3.2",
        _ => "gpt-4.1-nano",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned;

    #[async_trait]
    impl CompletionBackend for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GenerationFailure> {
            Ok("{}".into())
        }
    }

    #[test]
    fn schema_requires_title_and_description() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["seoTitle", "metaDescription"]);
        assert_eq!(schema["properties"]["keywords"]["type"], "ARRAY");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let b = GeminiBackend::new("k", "gemini-2.0-flash", "http://localhost:8080/").unwrap();
        assert_eq!(
            b.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn no_credential_resolves_to_credential_missing() {
        let config = GeneratorConfig::default();
        assert!(matches!(
            resolve_backend(&config),
            Err(SeoError::CredentialMissing)
        ));
    }

    #[test]
    fn api_key_resolves_to_gemini() {
        let config = GeneratorConfig::builder().api_key("k").build().unwrap();
        let backend = resolve_backend(&config).unwrap();
        assert_eq!(backend.name(), "gemini");
    }

    #[test]
    fn injected_backend_wins_over_api_key() {
        let config = GeneratorConfig::builder()
            .api_key("k")
            .backend(Arc::new(Canned))
            .build()
            .unwrap();
        assert_eq!(resolve_backend(&config).unwrap().name(), "canned");
    }

    #[test]
    fn offline_wins_over_everything() {
        let config = GeneratorConfig::builder()
            .api_key("k")
            .backend(Arc::new(Canned))
            .offline(true)
            .build()
            .unwrap();
        assert!(resolve_backend(&config).is_err());
    }

    #[test]
    fn provider_defaults_are_cheap_models() {
        assert_eq!(default_model_for("openai"), "gpt-4.1-nano");
        assert_eq!(default_model_for("gemini"), "gemini-2.0-flash");
        assert_eq!(default_model_for("something-else"), "gpt-4.1-nano");
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let short = truncate_body(&body);
        assert!(short.chars().count() <= 301);
        assert!(short.ends_with('\u{2026}'));
    }
}
