//! Error types for the giridih-seo library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SeoError`] (**fatal**): an operation around generation cannot proceed
//!   (no backend could be resolved when one was explicitly required, an
//!   unknown page was requested, the build output could not be written).
//!   Returned as `Err(SeoError)` from the build and resolution functions.
//!
//! * [`GenerationFailure`] (**non-fatal**): a single metadata request failed
//!   (network error, non-success status, timeout, malformed response). It is
//!   never returned from [`crate::generator::SeoMetaGenerator::generate`];
//!   the generator logs it and answers with the fallback record instead.
//!   [`crate::output::GeneratedMeta`] carries it so callers that want to
//!   report degraded pages can do so.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the giridih-seo library.
///
/// Per-request failures use [`GenerationFailure`] and are absorbed by the
/// generator rather than propagated here.
#[derive(Debug, Error)]
pub enum SeoError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// No credential for the generation service is configured.
    #[error(
        "No credential for the text-generation service is configured.\n\
Set GOOGLE_GENAI_API_KEY (or GEMINI_API_KEY), or name a provider with --provider."
    )]
    CredentialMissing,

    /// A named provider could not be initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Site errors ───────────────────────────────────────────────────────
    /// The requested route or blog slug is not part of the site.
    #[error("Unknown page '{0}'\nRun `giridih-seo page --list` to see known routes and slugs.")]
    UnknownPage(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write a build output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A build artefact could not be serialised.
    #[error("Failed to serialise {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure of one generation request.
///
/// Every variant resolves to the deterministic fallback record; the variants
/// exist so the logged diagnostic says what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum GenerationFailure {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("request to {backend} failed: {detail}")]
    Transport { backend: String, detail: String },

    /// The service answered with a non-success status.
    #[error("{backend} returned HTTP {status}: {body}")]
    Status {
        backend: String,
        status: u16,
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The service answered but produced no text.
    #[error("{backend} returned an empty response")]
    EmptyResponse { backend: String },

    /// The response text did not match the output schema.
    #[error("response failed schema validation: {detail}")]
    InvalidSchema { detail: String },

    /// The provider library reported an error.
    #[error("provider error: {detail}")]
    Provider { detail: String },
}

impl GenerationFailure {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Schema violations are retried too: a model that wrapped its answer in
    /// prose once usually does not do it twice.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationFailure::Status { status, .. } => {
                *status == 429 || *status >= 500
            }
            GenerationFailure::Transport { .. }
            | GenerationFailure::Timeout { .. }
            | GenerationFailure::EmptyResponse { .. }
            | GenerationFailure::InvalidSchema { .. }
            | GenerationFailure::Provider { .. } => true,
        }
    }
}
