//! Deterministic fallback formatter.
//!
//! Used when no credential is configured, when the external call fails, or
//! when its response does not validate. Pure and total: no I/O, and any
//! input (including empty strings) yields a fully populated record.
//!
//! Truncation counts `char`s, so a multi-byte character is never split.

use crate::config::GeneratorConfig;
use crate::output::{SeoMetaInput, SeoMetaOutput};

/// Keyword used in place of a missing content type.
pub const DEFAULT_CONTENT_KEYWORD: &str = "information";

/// Build the fallback record for `input`.
///
/// * title: first `fallback_title_chars` characters + `" - <anchor>"`
/// * description: first `fallback_description_chars` characters +
///   `"... Explore more about <anchor>."`
/// * keywords: `[anchor, content type or "information"]`, blanks removed
pub fn fallback_meta(input: &SeoMetaInput, config: &GeneratorConfig) -> SeoMetaOutput {
    let anchor = config.anchor_term.as_str();

    let seo_title = format!(
        "{} - {anchor}",
        truncate_chars(&input.title, config.fallback_title_chars)
    );
    let meta_description = format!(
        "{}... Explore more about {anchor}.",
        truncate_chars(&input.content_summary, config.fallback_description_chars)
    );

    let keywords = [anchor, input.content_type().unwrap_or(DEFAULT_CONTENT_KEYWORD)]
        .into_iter()
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .collect();

    SeoMetaOutput {
        seo_title,
        meta_description,
        keywords: Some(keywords),
    }
}

/// The first `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[test]
    fn short_title_is_kept_whole() {
        let input = SeoMetaInput::new(
            "A Trekker's Tale: Conquering Parasnath Hill",
            "Reliving the spiritual and physical journey to the summit...",
        )
        .with_content_type("blog post");
        let out = fallback_meta(&input, &config());
        assert_eq!(
            out.seo_title,
            "A Trekker's Tale: Conquering Parasnath Hill - Giridih"
        );
        assert_eq!(
            out.keywords,
            Some(vec!["Giridih".to_string(), "blog post".to_string()])
        );
    }

    #[test]
    fn title_of_exactly_fifty_chars_is_untouched() {
        let title = "x".repeat(50);
        let out = fallback_meta(&SeoMetaInput::new(title.clone(), "s"), &config());
        assert_eq!(out.seo_title, format!("{title} - Giridih"));
    }

    #[test]
    fn title_of_fifty_one_chars_loses_last_char() {
        let title = format!("{}Z", "x".repeat(50));
        let out = fallback_meta(&SeoMetaInput::new(title, "s"), &config());
        assert_eq!(out.seo_title, format!("{} - Giridih", "x".repeat(50)));
    }

    #[test]
    fn description_is_truncated_to_130_chars() {
        let summary = "s".repeat(500);
        let out = fallback_meta(&SeoMetaInput::new("t", summary), &config());
        assert_eq!(
            out.meta_description,
            format!("{}... Explore more about Giridih.", "s".repeat(130))
        );
    }

    #[test]
    fn missing_content_type_uses_information() {
        let out = fallback_meta(&SeoMetaInput::new("t", "s"), &config());
        assert_eq!(
            out.keywords,
            Some(vec!["Giridih".to_string(), "information".to_string()])
        );
    }

    #[test]
    fn empty_content_type_uses_information() {
        let input = SeoMetaInput::new("t", "s").with_content_type("");
        assert_eq!(fallback_meta(&input, &config()).keywords().len(), 2);
        assert_eq!(fallback_meta(&input, &config()).keywords()[1], "information");
    }

    #[test]
    fn empty_strings_still_produce_a_record() {
        let out = fallback_meta(&SeoMetaInput::new("", ""), &config());
        assert_eq!(out.seo_title, " - Giridih");
        assert_eq!(out.meta_description, "... Explore more about Giridih.");
        assert!(!out.keywords().is_empty());
    }

    #[test]
    fn multibyte_titles_are_cut_on_char_boundaries() {
        let title = "गिरिडीह".repeat(20);
        let out = fallback_meta(&SeoMetaInput::new(title, "s"), &config());
        let kept = out.seo_title.trim_end_matches(" - Giridih");
        assert_eq!(kept.chars().count(), 50);
    }

    #[test]
    fn custom_anchor_and_lengths() {
        let config = GeneratorConfig::builder()
            .anchor_term("Deoghar")
            .fallback_title_chars(5)
            .fallback_description_chars(3)
            .build()
            .unwrap();
        let out = fallback_meta(&SeoMetaInput::new("Baidyanath Dham", "Temple town"), &config);
        assert_eq!(out.seo_title, "Baidy - Deoghar");
        assert_eq!(out.meta_description, "Tem... Explore more about Deoghar.");
        assert_eq!(out.keywords()[0], "Deoghar");
    }

    #[test]
    fn truncate_chars_edges() {
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }
}
