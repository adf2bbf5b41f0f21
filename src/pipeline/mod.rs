//! Pipeline stages for metadata generation.
//!
//! Each submodule implements exactly one step, so each is testable alone
//! and a provider can be swapped without touching prompt or parsing code.
//!
//! ## Data Flow
//!
//! ```text
//!             ┌──▶ llm ──▶ backend ──▶ parse ──┐
//! input ──────┤   (prompt)  (HTTP)   (schema)  ├──▶ SeoMetaOutput
//!             └──▶ fallback ───────────────────┘
//!                  (pure)
//! ```
//!
//! 1. [`backend`]: the [`backend::CompletionBackend`] seam plus the Gemini
//!    REST and edgequake-llm implementations; the only stage with network I/O
//! 2. [`llm`]: request assembly, per-attempt timeout, retry/backoff
//! 3. [`parse`]: fence stripping and schema validation of the response
//! 4. [`fallback`]: the deterministic record used whenever 1–3 fail

pub mod backend;
pub mod fallback;
pub mod llm;
pub mod parse;
