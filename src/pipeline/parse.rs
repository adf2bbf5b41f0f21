//! Response parsing: turn raw model text into a validated [`SeoMetaOutput`].
//!
//! Even with a JSON response schema, and always without one, models
//! occasionally wrap the object in a ```` ```json ```` fence or add a line
//! of prose around it. Three deterministic steps run in order:
//!
//! 1. Strip an outer code fence
//! 2. Narrow to the outermost `{ ... }` span
//! 3. Parse and validate against the output schema
//!
//! Validation is strict where the page needs it: `seoTitle` and
//! `metaDescription` must be non-blank strings. `keywords` may be absent or
//! `null`; when present it must be an array of strings. Blank keyword
//! entries are dropped rather than rejected.

use crate::error::GenerationFailure;
use crate::output::SeoMetaOutput;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json|JSON)?\s*\n(.*?)\n?```\s*$").unwrap());

/// Parse and validate raw response text.
///
/// # Errors
/// [`GenerationFailure::InvalidSchema`] describing the first violation.
pub fn parse_output(raw: &str) -> Result<SeoMetaOutput, GenerationFailure> {
    let unfenced = strip_code_fences(raw);
    let candidate = narrow_to_object(&unfenced).ok_or_else(|| invalid("no JSON object in response"))?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| invalid(format!("malformed JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| invalid("top-level value is not an object"))?;

    Ok(SeoMetaOutput {
        seo_title: required_string(object, "seoTitle")?,
        meta_description: required_string(object, "metaDescription")?,
        keywords: optional_keywords(object)?,
    })
}

// ── Step 1: Strip outer code fences ──────────────────────────────────────────

fn strip_code_fences(input: &str) -> String {
    let trimmed = input.trim();
    if let Some(caps) = RE_OUTER_FENCES.captures(trimmed) {
        caps[1].to_string()
    } else {
        trimmed.to_string()
    }
}

// ── Step 2: Narrow to the outermost object ───────────────────────────────────

fn narrow_to_object(input: &str) -> Option<&str> {
    let start = input.find('{')?;
    let end = input.rfind('}')?;
    (start < end).then(|| &input[start..=end])
}

// ── Step 3: Field validation ─────────────────────────────────────────────────

fn required_string(object: &Map<String, Value>, field: &str) -> Result<String, GenerationFailure> {
    match object.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(invalid(format!("`{field}` is blank"))),
        Some(other) => Err(invalid(format!(
            "`{field}` must be a string, got {}",
            type_name(other)
        ))),
        None => Err(invalid(format!("missing required field `{field}`"))),
    }
}

fn optional_keywords(object: &Map<String, Value>) -> Result<Option<Vec<String>>, GenerationFailure> {
    match object.get("keywords") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let mut keywords = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => keywords.push(s.clone()),
                    Value::String(_) => {}
                    other => {
                        return Err(invalid(format!(
                            "`keywords` entries must be strings, got {}",
                            type_name(other)
                        )))
                    }
                }
            }
            Ok(Some(keywords))
        }
        Some(other) => Err(invalid(format!(
            "`keywords` must be an array, got {}",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid(detail: impl Into<String>) -> GenerationFailure {
    GenerationFailure::InvalidSchema {
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"seoTitle":"Parasnath Hill Trek Guide | Giridih","metaDescription":"Plan your Shikharji pilgrimage.","keywords":["Giridih","Parasnath Hill","Shikharji"]}"#;

    #[test]
    fn parses_plain_json() {
        let out = parse_output(VALID).unwrap();
        assert_eq!(out.seo_title, "Parasnath Hill Trek Guide | Giridih");
        assert_eq!(out.keywords().len(), 3);
    }

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(parse_output(&fenced).unwrap(), parse_output(VALID).unwrap());
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let chatty = format!("Here are your tags:\n{VALID}\nHope this helps!");
        assert!(parse_output(&chatty).is_ok());
    }

    #[test]
    fn missing_keywords_is_none() {
        let out = parse_output(r#"{"seoTitle":"t","metaDescription":"d"}"#).unwrap();
        assert_eq!(out.keywords, None);
    }

    #[test]
    fn null_keywords_is_none() {
        let out = parse_output(r#"{"seoTitle":"t","metaDescription":"d","keywords":null}"#).unwrap();
        assert_eq!(out.keywords, None);
    }

    #[test]
    fn blank_keyword_entries_are_dropped() {
        let out =
            parse_output(r#"{"seoTitle":"t","metaDescription":"d","keywords":["Giridih"," ",""]}"#)
                .unwrap();
        assert_eq!(out.keywords, Some(vec!["Giridih".to_string()]));
    }

    #[test]
    fn valid_strings_are_kept_as_received() {
        let out = parse_output(
            r#"{"seoTitle":"  Usri Falls  ","metaDescription":"d ","keywords":[" Usri "]}"#,
        )
        .unwrap();
        assert_eq!(out.seo_title, "  Usri Falls  ");
        assert_eq!(out.meta_description, "d ");
        assert_eq!(out.keywords, Some(vec![" Usri ".to_string()]));
    }

    #[test]
    fn rejects_missing_title() {
        let err = parse_output(r#"{"metaDescription":"d"}"#).unwrap_err();
        assert!(err.to_string().contains("seoTitle"), "got: {err}");
    }

    #[test]
    fn rejects_blank_description() {
        let err = parse_output(r#"{"seoTitle":"t","metaDescription":"   "}"#).unwrap_err();
        assert!(err.to_string().contains("blank"), "got: {err}");
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(parse_output(r#"{"seoTitle":42,"metaDescription":"d"}"#).is_err());
        assert!(parse_output(r#"{"seoTitle":"t","metaDescription":"d","keywords":"Giridih"}"#).is_err());
        assert!(parse_output(r#"{"seoTitle":"t","metaDescription":"d","keywords":[1,2]}"#).is_err());
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_output("I cannot help with that."),
            Err(GenerationFailure::InvalidSchema { .. })
        ));
        assert!(parse_output("").is_err());
        assert!(parse_output("{ not json }").is_err());
    }
}
