//! Progress-callback trait for batch generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::GeneratorConfigBuilder::progress_callback`] to receive
//! events as [`crate::generator::SeoMetaGenerator::generate_all`] works
//! through a batch of pages. The CLI uses it to drive its progress bar.
//!
//! # Example
//!
//! ```rust
//! use giridih_seo::{GenerationProgressCallback, GeneratorConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     fallbacks: AtomicUsize,
//! }
//!
//! impl GenerationProgressCallback for CountingCallback {
//!     fn on_page_fallback(&self, _index: usize, _total: usize, title: &str, reason: &str) {
//!         self.fallbacks.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{title}: {reason}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { fallbacks: AtomicUsize::new(0) });
//!
//! let config = GeneratorConfig::builder()
//!     .progress_callback(counter as Arc<dyn GenerationProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by batch generation as it processes each page.
///
/// Implementations must be `Send + Sync`: pages are generated concurrently.
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once before the first page.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called just before a page's metadata is requested.
    ///
    /// `index` is 1-based.
    fn on_page_start(&self, index: usize, total: usize, title: &str) {
        let _ = (index, total, title);
    }

    /// Called when the external service produced the page's metadata.
    fn on_page_complete(&self, index: usize, total: usize, title: &str) {
        let _ = (index, total, title);
    }

    /// Called when the page was served by the fallback formatter.
    ///
    /// `reason` is the failure description, or a note that the generator
    /// runs in fallback-only mode.
    fn on_page_fallback(&self, index: usize, total: usize, title: &str, reason: &str) {
        let _ = (index, total, title, reason);
    }

    /// Called once after every page has a record.
    fn on_batch_complete(&self, total: usize, external_count: usize) {
        let _ = (total, external_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::GeneratorConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;
