//! The SEO metadata generator: external generation with a guaranteed fallback.
//!
//! ## Modes
//!
//! The mode is decided once, when the generator is constructed, from the
//! injected [`GeneratorConfig`]:
//!
//! * [`GeneratorMode::ExternalEnabled`]: a backend was resolved; every call
//!   tries it first and falls back on any failure.
//! * [`GeneratorMode::FallbackOnly`]: no credential (or `offline`); every
//!   call goes straight to the deterministic formatter. A single warning is
//!   logged at construction, none per call.
//!
//! There is no transition between modes for the generator's lifetime.
//!
//! ## Failure policy
//!
//! [`SeoMetaGenerator::generate`] cannot fail. Whatever goes wrong on the
//! external path is logged at `error` level with the page title and turned
//! into the fallback record, so metadata generation never blocks rendering.

use crate::config::GeneratorConfig;
use crate::error::SeoError;
use crate::output::{GeneratedMeta, MetaSource, SeoMetaInput, SeoMetaOutput};
use crate::pipeline::backend::{resolve_backend, CompletionBackend};
use crate::pipeline::{fallback, llm};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Operating mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMode {
    ExternalEnabled,
    FallbackOnly,
}

/// Produces [`SeoMetaOutput`] records for pages.
///
/// Cheap to clone and safe to share across tasks: the configuration and the
/// resolved backend are read-only after construction.
#[derive(Clone)]
pub struct SeoMetaGenerator {
    config: GeneratorConfig,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl std::fmt::Debug for SeoMetaGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeoMetaGenerator")
            .field("mode", &self.mode())
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}

impl SeoMetaGenerator {
    /// Resolve a backend from `config`, degrading to fallback-only mode when
    /// none is available.
    pub fn new(config: GeneratorConfig) -> Self {
        if config.offline {
            info!("Offline mode: SEO metadata will use fallback records");
            return Self::fallback_only(config);
        }
        match resolve_backend(&config) {
            Ok(backend) => {
                info!("SEO metadata generation enabled via {}", backend.name());
                Self {
                    config,
                    backend: Some(backend),
                }
            }
            Err(e) => {
                warn!("{e}\nAI-generated SEO metadata is disabled; returning fallback records.");
                Self::fallback_only(config)
            }
        }
    }

    /// Like [`new`](Self::new) but refuses to run without a backend.
    ///
    /// # Errors
    /// [`SeoError::CredentialMissing`] or [`SeoError::ProviderNotConfigured`].
    pub fn try_new(config: GeneratorConfig) -> Result<Self, SeoError> {
        let backend = resolve_backend(&config)?;
        info!("SEO metadata generation enabled via {}", backend.name());
        Ok(Self {
            config,
            backend: Some(backend),
        })
    }

    /// A generator that never calls out.
    pub fn fallback_only(config: GeneratorConfig) -> Self {
        Self {
            config,
            backend: None,
        }
    }

    /// Shorthand for `SeoMetaGenerator::new(GeneratorConfig::from_env())`.
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    pub fn mode(&self) -> GeneratorMode {
        if self.backend.is_some() {
            GeneratorMode::ExternalEnabled
        } else {
            GeneratorMode::FallbackOnly
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Metadata for `input`. Never fails.
    pub async fn generate(&self, input: &SeoMetaInput) -> SeoMetaOutput {
        self.generate_detailed(input).await.into_output()
    }

    /// Metadata for `input` together with the path that produced it.
    pub async fn generate_detailed(&self, input: &SeoMetaInput) -> GeneratedMeta {
        let start = Instant::now();

        let Some(ref backend) = self.backend else {
            return GeneratedMeta {
                meta: fallback::fallback_meta(input, &self.config),
                source: MetaSource::Fallback,
                failure: None,
                attempts: 0,
                duration_ms: start.elapsed().as_millis() as u64,
            };
        };

        let outcome = llm::request_metadata(backend.as_ref(), input, &self.config).await;
        match outcome.result {
            Ok(meta) => GeneratedMeta {
                meta: self.default_keywords(meta),
                source: MetaSource::External,
                failure: None,
                attempts: outcome.attempts,
                duration_ms: start.elapsed().as_millis() as u64,
            },
            Err(failure) => {
                error!(
                    "SEO metadata generation failed for '{}': {}. Using fallback record.",
                    input.title, failure
                );
                GeneratedMeta {
                    meta: fallback::fallback_meta(input, &self.config),
                    source: MetaSource::Fallback,
                    failure: Some(failure),
                    attempts: outcome.attempts,
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
        }
    }

    /// Generate metadata for every input, at most `config.concurrency` at a
    /// time. Results come back in input order.
    pub async fn generate_all(&self, inputs: &[SeoMetaInput]) -> Vec<GeneratedMeta> {
        let total = inputs.len();
        let cb = self.config.progress_callback.clone();
        if let Some(ref cb) = cb {
            cb.on_batch_start(total);
        }

        let mut indexed: Vec<(usize, GeneratedMeta)> = stream::iter(inputs.iter().enumerate())
            .map(|(i, input)| {
                let cb = cb.clone();
                async move {
                    let index = i + 1;
                    if let Some(ref cb) = cb {
                        cb.on_page_start(index, total, &input.title);
                    }
                    let generated = self.generate_detailed(input).await;
                    if let Some(ref cb) = cb {
                        match (&generated.source, &generated.failure) {
                            (MetaSource::External, _) => {
                                cb.on_page_complete(index, total, &input.title)
                            }
                            (MetaSource::Fallback, Some(f)) => {
                                cb.on_page_fallback(index, total, &input.title, &f.to_string())
                            }
                            (MetaSource::Fallback, None) => cb.on_page_fallback(
                                index,
                                total,
                                &input.title,
                                "fallback-only mode",
                            ),
                        }
                    }
                    (i, generated)
                }
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        indexed.sort_by_key(|(i, _)| *i);
        let results: Vec<GeneratedMeta> = indexed.into_iter().map(|(_, g)| g).collect();

        if let Some(ref cb) = cb {
            let external = results.iter().filter(|g| !g.is_fallback()).count();
            cb.on_batch_complete(total, external);
        }
        results
    }

    /// Synchronous wrapper around [`generate`](Self::generate).
    ///
    /// Creates a temporary tokio runtime internally; must not be called from
    /// inside an async context.
    ///
    /// # Errors
    /// [`SeoError::Internal`] if the runtime cannot be created.
    pub fn generate_blocking(&self, input: &SeoMetaInput) -> Result<SeoMetaOutput, SeoError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SeoError::Internal(format!("Failed to create tokio runtime: {e}")))?;
        Ok(runtime.block_on(self.generate(input)))
    }

    /// An external record with absent or empty keywords gets `[anchor]`.
    fn default_keywords(&self, mut meta: SeoMetaOutput) -> SeoMetaOutput {
        if meta.keywords().is_empty() {
            meta.keywords = Some(vec![self.config.anchor_term.clone()]);
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_without_credential_is_fallback_only() {
        let gen = SeoMetaGenerator::new(GeneratorConfig::default());
        assert_eq!(gen.mode(), GeneratorMode::FallbackOnly);
    }

    #[test]
    fn credential_enables_external_mode() {
        let config = GeneratorConfig::builder().api_key("k").build().unwrap();
        assert_eq!(
            SeoMetaGenerator::new(config).mode(),
            GeneratorMode::ExternalEnabled
        );
    }

    #[test]
    fn offline_overrides_credential() {
        let config = GeneratorConfig::builder()
            .api_key("k")
            .offline(true)
            .build()
            .unwrap();
        assert_eq!(
            SeoMetaGenerator::new(config).mode(),
            GeneratorMode::FallbackOnly
        );
    }

    #[test]
    fn try_new_without_credential_errors() {
        assert!(matches!(
            SeoMetaGenerator::try_new(GeneratorConfig::default()),
            Err(SeoError::CredentialMissing)
        ));
    }

    #[test]
    fn keyword_defaulting_fills_empty_list() {
        let gen = SeoMetaGenerator::fallback_only(GeneratorConfig::default());
        let meta = gen.default_keywords(SeoMetaOutput {
            seo_title: "t".into(),
            meta_description: "d".into(),
            keywords: Some(vec![]),
        });
        assert_eq!(meta.keywords, Some(vec!["Giridih".to_string()]));
    }

    #[test]
    fn keyword_defaulting_keeps_provided_list() {
        let gen = SeoMetaGenerator::fallback_only(GeneratorConfig::default());
        let meta = gen.default_keywords(SeoMetaOutput {
            seo_title: "t".into(),
            meta_description: "d".into(),
            keywords: Some(vec!["Usri Falls".into()]),
        });
        assert_eq!(meta.keywords, Some(vec!["Usri Falls".to_string()]));
    }

    #[test]
    fn blocking_wrapper_returns_fallback() {
        let gen = SeoMetaGenerator::fallback_only(GeneratorConfig::default());
        let out = gen
            .generate_blocking(&SeoMetaInput::new("Gallery", "Photos"))
            .unwrap();
        assert_eq!(out.seo_title, "Gallery - Giridih");
    }
}
