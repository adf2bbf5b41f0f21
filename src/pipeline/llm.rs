//! External path: prompt the backend and validate what comes back.
//!
//! This module is intentionally thin. Prompt wording lives in
//! [`crate::prompts`], response validation in [`super::parse`]; here we only
//! assemble the request, bound each attempt with a timeout, and retry.
//!
//! ## Retry Strategy
//!
//! With the default `max_retries = 0` there is exactly one attempt. When
//! retries are enabled the wait doubles per attempt
//! (`retry_backoff_ms * 2^(attempt-1)`, capped at [`MAX_BACKOFF_MS`]);
//! non-retryable failures such as a 403 stop the loop immediately.

use super::backend::{CompletionBackend, CompletionRequest};
use super::parse::parse_output;
use crate::config::GeneratorConfig;
use crate::error::GenerationFailure;
use crate::output::{SeoMetaInput, SeoMetaOutput};
use crate::prompts::{system_prompt, user_prompt};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, warn};

/// Upper bound on a single retry wait.
pub const MAX_BACKOFF_MS: u64 = 30_000;

/// Wait before retry number `attempt` (1-based). Saturates instead of
/// overflowing for large attempt counts.
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    base_ms.saturating_mul(factor).min(MAX_BACKOFF_MS)
}

/// Result of the external path: the validated record or the last failure,
/// plus how many attempts were made.
#[derive(Debug)]
pub struct ExternalOutcome {
    pub result: Result<SeoMetaOutput, GenerationFailure>,
    pub attempts: u32,
}

/// Build the completion request for `input`.
pub fn build_request(input: &SeoMetaInput, config: &GeneratorConfig) -> CompletionRequest {
    CompletionRequest {
        system: system_prompt(config),
        user: user_prompt(input),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

/// Ask the backend for metadata, retrying per `config`.
///
/// Every failure cause (transport, status, timeout, empty or invalid
/// response) comes back as the same `Err(GenerationFailure)`.
pub async fn request_metadata(
    backend: &dyn CompletionBackend,
    input: &SeoMetaInput,
    config: &GeneratorConfig,
) -> ExternalOutcome {
    let request = build_request(input, config);
    let per_attempt = Duration::from_secs(config.api_timeout_secs);

    let mut attempts = 0;
    let mut last_err = GenerationFailure::EmptyResponse {
        backend: backend.name().to_string(),
    };

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = backoff_delay_ms(config.retry_backoff_ms, attempt);
            warn!(
                "'{}': retry {}/{} after {}ms",
                input.title, attempt, config.max_retries, backoff
            );
            sleep(Duration::from_millis(backoff)).await;
        }
        attempts += 1;

        let result = match timeout(per_attempt, backend.complete(&request)).await {
            Ok(Ok(text)) => parse_output(&text),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(GenerationFailure::Timeout {
                secs: config.api_timeout_secs,
            }),
        };

        match result {
            Ok(meta) => {
                debug!(
                    "'{}': {} produced metadata on attempt {}",
                    input.title,
                    backend.name(),
                    attempts
                );
                return ExternalOutcome {
                    result: Ok(meta),
                    attempts,
                };
            }
            Err(e) => {
                let retryable = e.is_retryable();
                last_err = e;
                if !retryable {
                    break;
                }
            }
        }
    }

    ExternalOutcome {
        result: Err(last_err),
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Replays a fixed script of responses, one per call.
    struct Scripted {
        calls: AtomicU32,
        script: Mutex<Vec<Result<String, GenerationFailure>>>,
    }

    impl Scripted {
        fn new(mut script: Vec<Result<String, GenerationFailure>>) -> Self {
            script.reverse();
            Self {
                calls: AtomicU32::new(0),
                script: Mutex::new(script),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GenerationFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(GenerationFailure::Provider { detail: "script exhausted".into() }))
        }
    }

    const OK: &str = r#"{"seoTitle":"t","metaDescription":"d"}"#;

    fn input() -> SeoMetaInput {
        SeoMetaInput::new("Usri Falls", "A waterfall")
    }

    #[test]
    fn request_carries_prompts_and_sampling() {
        let config = GeneratorConfig::default();
        let req = build_request(&input().with_content_type("destination page"), &config);
        assert!(req.system.contains("Giridih"));
        assert!(req.user.contains("Content Type: destination page"));
        assert_eq!(req.max_tokens, 512);
    }

    #[tokio::test]
    async fn single_attempt_by_default() {
        let backend = Scripted::new(vec![
            Err(GenerationFailure::Transport { backend: "scripted".into(), detail: "reset".into() }),
            Ok(OK.into()),
        ]);
        let out = request_metadata(&backend, &input(), &GeneratorConfig::default()).await;
        assert!(out.result.is_err());
        assert_eq!(out.attempts, 1);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_recover_from_transient_failure() {
        let config = GeneratorConfig::builder()
            .max_retries(2)
            .retry_backoff_ms(1)
            .build()
            .unwrap();
        let backend = Scripted::new(vec![
            Err(GenerationFailure::Status { backend: "scripted".into(), status: 503, body: String::new() }),
            Ok(OK.into()),
        ]);
        let out = request_metadata(&backend, &input(), &config).await;
        assert_eq!(out.result.unwrap().seo_title, "t");
        assert_eq!(out.attempts, 2);
    }

    #[tokio::test]
    async fn non_retryable_failure_stops_early() {
        let config = GeneratorConfig::builder()
            .max_retries(3)
            .retry_backoff_ms(1)
            .build()
            .unwrap();
        let backend = Scripted::new(vec![Err(GenerationFailure::Status {
            backend: "scripted".into(),
            status: 401,
            body: "bad key".into(),
        })]);
        let out = request_metadata(&backend, &input(), &config).await;
        assert!(matches!(out.result, Err(GenerationFailure::Status { status: 401, .. })));
        assert_eq!(out.attempts, 1);
    }

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff_delay_ms(500, 1), 500);
        assert_eq!(backoff_delay_ms(500, 3), 2_000);
        assert_eq!(backoff_delay_ms(500, 64), MAX_BACKOFF_MS);
        assert_eq!(backoff_delay_ms(u64::MAX, 2), MAX_BACKOFF_MS);
        assert_eq!(backoff_delay_ms(0, 70), 0);
    }

    #[tokio::test]
    async fn many_retries_exhaust_without_overflow() {
        let config = GeneratorConfig::builder()
            .max_retries(70)
            .retry_backoff_ms(0)
            .build()
            .unwrap();
        let backend = Scripted::new(Vec::new());
        let out = request_metadata(&backend, &input(), &config).await;
        assert!(matches!(out.result, Err(GenerationFailure::Provider { .. })));
        assert_eq!(out.attempts, 71);
    }

    #[tokio::test]
    async fn invalid_body_is_a_schema_failure() {
        let backend = Scripted::new(vec![Ok("not json at all".into())]);
        let out = request_metadata(&backend, &input(), &GeneratorConfig::default()).await;
        assert!(matches!(out.result, Err(GenerationFailure::InvalidSchema { .. })));
    }
}
