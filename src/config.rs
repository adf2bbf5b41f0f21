//! Configuration for the metadata generator.
//!
//! All generator behaviour is controlled through [`GeneratorConfig`], built
//! via its [`GeneratorConfigBuilder`] or read once from the process
//! environment with [`GeneratorConfig::from_env`]. The generator never looks
//! at the environment itself: whether it runs against the external service
//! or in fallback-only mode is decided from this value at construction.

use crate::error::SeoError;
use crate::pipeline::backend::CompletionBackend;
use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Environment variables consulted by [`GeneratorConfig::from_env`].
pub const ENV_API_KEY: &str = "GOOGLE_GENAI_API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_PROVIDER: &str = "GIRIDIH_SEO_PROVIDER";
pub const ENV_MODEL: &str = "GIRIDIH_SEO_MODEL";
pub const ENV_GEMINI_URL: &str = "GIRIDIH_SEO_GEMINI_URL";

pub const DEFAULT_ANCHOR_TERM: &str = "Giridih";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Inclusive character-count range used as guidance in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTarget {
    pub min: usize,
    pub max: usize,
}

impl LengthTarget {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for LengthTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Configuration for [`crate::generator::SeoMetaGenerator`].
///
/// # Example
/// ```rust
/// use giridih_seo::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .anchor_term("Giridih")
///     .api_timeout_secs(10)
///     .build()
///     .unwrap();
/// assert!(config.api_key.is_none());
/// ```
#[derive(Clone)]
pub struct GeneratorConfig {
    /// Place name every title, description and keyword list must feature. Default: "Giridih".
    pub anchor_term: String,

    /// Characters of the title kept by the fallback formatter. Default: 50.
    pub fallback_title_chars: usize,

    /// Characters of the summary kept by the fallback formatter. Default: 130.
    pub fallback_description_chars: usize,

    /// Title length asked of the model. Default: 50–60.
    pub title_target: LengthTarget,

    /// Description length asked of the model. Default: 150–160.
    pub description_target: LengthTarget,

    /// Number of keywords asked of the model. Default: 3–5.
    pub keyword_target: LengthTarget,

    /// Credential for the Gemini REST adapter.
    pub api_key: Option<String>,

    /// Base URL of the Gemini REST API. Overridable for proxies and tests.
    pub gemini_base_url: String,

    /// Model identifier. If None, `gemini-2.0-flash` for the Gemini adapter
    /// and the provider default otherwise.
    pub model: Option<String>,

    /// edgequake-llm provider name ("openai", "anthropic", "ollama", ...).
    /// Takes precedence over `api_key`.
    pub provider_name: Option<String>,

    /// Pre-constructed backend. Takes precedence over everything else.
    pub backend: Option<Arc<dyn CompletionBackend>>,

    /// Force fallback-only mode regardless of credentials.
    pub offline: bool,

    /// Sampling temperature. Default: 0.4.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 512.
    pub max_tokens: usize,

    /// Per-attempt timeout in seconds. Default: 10.
    pub api_timeout_secs: u64,

    /// Extra attempts after a failed one. Default: 0 (single attempt).
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled per attempt. Default: 500.
    pub retry_backoff_ms: u64,

    /// Concurrent requests during batch generation. Default: 4.
    pub concurrency: usize,

    /// Custom system prompt. If None, built from the anchor term and targets.
    pub system_prompt: Option<String>,

    /// Receives per-page events during batch generation.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            anchor_term: DEFAULT_ANCHOR_TERM.to_string(),
            fallback_title_chars: 50,
            fallback_description_chars: 130,
            title_target: LengthTarget::new(50, 60),
            description_target: LengthTarget::new(150, 160),
            keyword_target: LengthTarget::new(3, 5),
            api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: None,
            provider_name: None,
            backend: None,
            offline: false,
            temperature: 0.4,
            max_tokens: 512,
            api_timeout_secs: 10,
            max_retries: 0,
            retry_backoff_ms: 500,
            concurrency: 4,
            system_prompt: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("anchor_term", &self.anchor_term)
            .field("fallback_title_chars", &self.fallback_title_chars)
            .field("fallback_description_chars", &self.fallback_description_chars)
            .field("title_target", &self.title_target)
            .field("description_target", &self.description_target)
            .field("keyword_target", &self.keyword_target)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_base_url", &self.gemini_base_url)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .field("offline", &self.offline)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl GeneratorConfig {
    /// Create a new builder for `GeneratorConfig`.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder {
            config: Self::default(),
        }
    }

    /// Defaults overlaid with whatever the environment provides.
    ///
    /// Reads the credential from `GOOGLE_GENAI_API_KEY`, falling back to
    /// `GEMINI_API_KEY`; the provider and model from `GIRIDIH_SEO_PROVIDER`
    /// and `GIRIDIH_SEO_MODEL`; the Gemini endpoint from
    /// `GIRIDIH_SEO_GEMINI_URL`. Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but with an explicit lookup, so
    /// callers and tests never have to mutate the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        config.api_key = get(ENV_API_KEY).or_else(|| get(ENV_GEMINI_API_KEY));
        config.provider_name = get(ENV_PROVIDER);
        config.model = get(ENV_MODEL);
        if let Some(url) = get(ENV_GEMINI_URL) {
            config.gemini_base_url = url;
        }
        config
    }

    /// Model used by the Gemini adapter.
    pub fn gemini_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Start from an existing configuration, e.g. one read with `from_env`.
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn anchor_term(mut self, term: impl Into<String>) -> Self {
        self.config.anchor_term = term.into();
        self
    }

    pub fn fallback_title_chars(mut self, n: usize) -> Self {
        self.config.fallback_title_chars = n;
        self
    }

    pub fn fallback_description_chars(mut self, n: usize) -> Self {
        self.config.fallback_description_chars = n;
        self
    }

    pub fn title_target(mut self, min: usize, max: usize) -> Self {
        self.config.title_target = LengthTarget::new(min, max);
        self
    }

    pub fn description_target(mut self, min: usize, max: usize) -> Self {
        self.config.description_target = LengthTarget::new(min, max);
        self
    }

    pub fn keyword_target(mut self, min: usize, max: usize) -> Self {
        self.config.keyword_target = LengthTarget::new(min, max);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.gemini_base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.config.backend = Some(backend);
        self
    }

    pub fn offline(mut self, v: bool) -> Self {
        self.config.offline = v;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GeneratorConfig, SeoError> {
        let c = &self.config;
        if c.anchor_term.trim().is_empty() {
            return Err(SeoError::InvalidConfig(
                "anchor term must not be empty".into(),
            ));
        }
        for (name, target) in [
            ("title", c.title_target),
            ("description", c.description_target),
            ("keyword", c.keyword_target),
        ] {
            if target.min == 0 || target.min > target.max {
                return Err(SeoError::InvalidConfig(format!(
                    "{name} target must satisfy 1 <= min <= max, got {target}"
                )));
            }
        }
        if c.api_timeout_secs == 0 {
            return Err(SeoError::InvalidConfig(
                "API timeout must be at least 1 second".into(),
            ));
        }
        if c.concurrency == 0 {
            return Err(SeoError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
