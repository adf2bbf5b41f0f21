//! Input and output records of the metadata generator.
//!
//! Field names serialise in camelCase so JSON written by the CLI matches the
//! shape the site's page templates already consume (`seoTitle`,
//! `metaDescription`, `keywords`).

use crate::error::GenerationFailure;
use serde::{Deserialize, Serialize};

/// What a page hands to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetaInput {
    /// Original page or post title.
    pub title: String,
    /// Summary or excerpt used as generation context.
    pub content_summary: String,
    /// Optional tag such as "blog post" or "destination page" that steers tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl SeoMetaInput {
    pub fn new(title: impl Into<String>, content_summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content_summary: content_summary.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The content type, treating blank values as absent.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Metadata record returned to the page.
///
/// Length targets (50–60 characters for the title, 150–160 for the
/// description) are guidance given to the model, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetaOutput {
    pub seo_title: String,
    pub meta_description: String,
    /// Always populated once the generator returns; only the wire form from
    /// the external service may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl SeoMetaOutput {
    /// Keywords as a slice; empty when absent.
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or(&[])
    }
}

/// Which path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaSource {
    /// Produced by the text-generation service.
    External,
    /// Produced by the deterministic formatter.
    Fallback,
}

/// A generated record together with how it was produced.
///
/// [`crate::generator::SeoMetaGenerator::generate`] collapses this to the
/// plain [`SeoMetaOutput`]; the detailed form feeds build reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMeta {
    pub meta: SeoMetaOutput,
    pub source: MetaSource,
    /// Why the external path was abandoned, when it was attempted and failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<GenerationFailure>,
    /// Attempts made against the external service (0 in fallback-only mode).
    pub attempts: u32,
    pub duration_ms: u64,
}

impl GeneratedMeta {
    pub fn is_fallback(&self) -> bool {
        self.source == MetaSource::Fallback
    }

    pub fn into_output(self) -> SeoMetaOutput {
        self.meta
    }
}

/// Summary of a site build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Pages and posts processed.
    pub total_pages: usize,
    /// Records produced by the external service.
    pub external_pages: usize,
    /// Records produced by the fallback formatter.
    pub fallback_pages: usize,
    /// Files written to the output directory.
    pub files_written: usize,
    pub generation_duration_ms: u64,
    pub total_duration_ms: u64,
}
