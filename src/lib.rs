//! # giridih-seo
//!
//! SEO metadata for the Giridih Explorer travel guide.
//!
//! Every page hands a title, a summary and an optional content type to
//! [`SeoMetaGenerator`], which asks an LLM for an optimised title, meta
//! description and keywords. When no credential is configured, or the call
//! fails for any reason, a deterministic fallback record is returned
//! instead, so page rendering is never blocked.
//!
//! ## Pipeline Overview
//!
//! ```text
//! SeoMetaInput
//!  │
//!  ├─ 1. Mode     decided once at construction (external / fallback-only)
//!  ├─ 2. Prompt   system + user prompt from the input
//!  ├─ 3. Backend  Gemini REST (JSON schema) or any edgequake-llm provider
//!  ├─ 4. Parse    fence stripping + schema validation
//!  ├─ 5. Fallback on any failure in 2–4
//!  └─ 6. Site     <head> tags, JSON-LD, sitemap.xml, robots.txt
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use giridih_seo::{SeoMetaGenerator, SeoMetaInput};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Credential read from GOOGLE_GENAI_API_KEY; without it every call
//!     // returns the fallback record.
//!     let generator = SeoMetaGenerator::from_env();
//!     let input = SeoMetaInput::new(
//!         "A Trekker's Tale: Conquering Parasnath Hill",
//!         "Reliving the spiritual and physical journey to the summit of Shikharji.",
//!     )
//!     .with_content_type("blog post");
//!     let meta = generator.generate(&input).await;
//!     println!("{}\n{}", meta.seo_title, meta.meta_description);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `giridih-seo` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! giridih-seo = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod build;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod site;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use build::{build_site, PageRecord};
pub use config::{GeneratorConfig, GeneratorConfigBuilder, LengthTarget};
pub use error::{GenerationFailure, SeoError};
pub use generator::{GeneratorMode, SeoMetaGenerator};
pub use output::{BuildStats, GeneratedMeta, MetaSource, SeoMetaInput, SeoMetaOutput};
pub use pipeline::backend::{CompletionBackend, CompletionRequest, GeminiBackend, ProviderBackend};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
pub use site::head::PageHead;
pub use site::SiteConfig;
