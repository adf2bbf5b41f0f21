//! Prompts for SEO metadata generation.
//!
//! Every prompt lives here so wording changes touch one file and unit tests
//! can inspect the rendered text without a live model.
//!
//! The system prompt is a template: the anchor term and the length targets
//! come from [`GeneratorConfig`], so the same wording serves any locale.
//! Callers can replace it wholesale via
//! [`GeneratorConfig::system_prompt`](crate::config::GeneratorConfig::system_prompt).

use crate::config::GeneratorConfig;
use crate::output::SeoMetaInput;

/// System prompt template. Placeholders: `{anchor}`, `{title_target}`,
/// `{description_target}`, `{keyword_target}`.
pub const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are an SEO expert tasked with generating optimized meta tags for web content.
Your primary focus is {anchor}. Ensure all generated tags clearly reflect this geographical focus and are optimized for users searching for information about {anchor}.

Generate the following SEO elements:
1. seoTitle: An SEO-optimized title. It should be concise ({title_target} characters), engaging, and incorporate primary keywords naturally. It must prominently feature "{anchor}".
2. metaDescription: An SEO-optimized meta description ({description_target} characters). It should summarize the content accurately, highlight its relevance to {anchor}, and include a call-to-action or key benefits to encourage clicks from search results.
3. keywords: (Optional) A list of {keyword_target} relevant keywords or keyphrases. Choose terms that accurately reflect the content and that users might search for, with a strong emphasis on "{anchor}" and related terms.

Prioritize clarity, relevance, and click-through rate for the seoTitle and metaDescription.
If the content type is "blog post", make the title sound like an engaging article about {anchor}.
If the content type is "destination page", focus on what makes the destination in {anchor} unique and attractive.

Respond with a single JSON object and nothing else:
{"seoTitle": "...", "metaDescription": "...", "keywords": ["...", "..."]}"#;

/// Render the system prompt for `config`, honouring an override.
pub fn system_prompt(config: &GeneratorConfig) -> String {
    if let Some(ref custom) = config.system_prompt {
        return custom.clone();
    }
    SYSTEM_PROMPT_TEMPLATE
        .replace("{anchor}", &config.anchor_term)
        .replace("{title_target}", &config.title_target.to_string())
        .replace("{description_target}", &config.description_target.to_string())
        .replace("{keyword_target}", &config.keyword_target.to_string())
}

/// Render the user turn describing the content.
///
/// The `Content Type` line is present only when the input has one.
pub fn user_prompt(input: &SeoMetaInput) -> String {
    let mut prompt = format!(
        "Given the following information about a piece of content:\n\
         Original Title: {}\n\
         Content Summary: {}",
        input.title, input.content_summary
    );
    if let Some(content_type) = input.content_type() {
        prompt.push_str("\nContent Type: ");
        prompt.push_str(content_type);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_fills_every_placeholder() {
        let prompt = system_prompt(&GeneratorConfig::default());
        assert!(!prompt.contains("{anchor}"));
        assert!(!prompt.contains("_target}"));
        assert!(prompt.contains("\"Giridih\""));
        assert!(prompt.contains("50-60 characters"));
        assert!(prompt.contains("150-160 characters"));
        assert!(prompt.contains("3-5 relevant keywords"));
    }

    #[test]
    fn system_prompt_uses_configured_anchor() {
        let config = GeneratorConfig::builder()
            .anchor_term("Deoghar")
            .build()
            .unwrap();
        let prompt = system_prompt(&config);
        assert!(prompt.contains("\"Deoghar\""));
        assert!(!prompt.contains("Giridih"));
    }

    #[test]
    fn system_prompt_override_wins() {
        let config = GeneratorConfig::builder()
            .system_prompt("Only JSON.")
            .build()
            .unwrap();
        assert_eq!(system_prompt(&config), "Only JSON.");
    }

    #[test]
    fn user_prompt_includes_content_type_when_present() {
        let input = SeoMetaInput::new("Usri Falls", "A waterfall on the Usri river")
            .with_content_type("destination page");
        let prompt = user_prompt(&input);
        assert!(prompt.contains("Original Title: Usri Falls"));
        assert!(prompt.contains("Content Summary: A waterfall on the Usri river"));
        assert!(prompt.ends_with("Content Type: destination page"));
    }

    #[test]
    fn user_prompt_omits_content_type_when_absent() {
        let input = SeoMetaInput::new("Gallery", "Photos of Giridih");
        assert!(!user_prompt(&input).contains("Content Type"));
    }
}
