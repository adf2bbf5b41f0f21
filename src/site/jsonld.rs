//! schema.org structured data.
//!
//! The home page is a `WebSite`, destination pages a `TouristAttraction`,
//! blog posts a `BlogPosting`, everything else a `WebPage`.

use super::pages::SitePage;
use super::SiteConfig;
use crate::output::SeoMetaOutput;
use serde_json::{json, Value};

/// Content type that marks a page as a tourist attraction.
pub const DESTINATION_CONTENT_TYPE: &str = "destination page";

/// The JSON-LD object for `page`.
pub fn build_jsonld(site: &SiteConfig, page: SitePage<'_>, meta: &SeoMetaOutput) -> Value {
    let url = site.url(&page.path());
    let publisher = json!({
        "@type": "Organization",
        "name": site.site_name,
        "logo": { "@type": "ImageObject", "url": site.url(&site.og_image_path) },
    });

    let mut ld = match page {
        SitePage::Static(entry) if entry.is_home() => json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "name": site.site_name,
            "url": url,
            "description": meta.meta_description,
        }),
        SitePage::Static(entry) if entry.content_type == Some(DESTINATION_CONTENT_TYPE) => json!({
            "@context": "https://schema.org",
            "@type": "TouristAttraction",
            "name": meta.seo_title,
            "description": meta.meta_description,
            "url": url,
            "touristType": ["Pilgrims", "Trekkers", "Nature Lovers"],
            "address": {
                "@type": "PostalAddress",
                "addressRegion": "Jharkhand",
                "addressCountry": "IN",
            },
        }),
        SitePage::Static(_) => json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": meta.seo_title,
            "description": meta.meta_description,
            "url": url,
            "publisher": publisher,
        }),
        SitePage::Post(post) => json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": meta.seo_title,
            "description": meta.meta_description,
            "url": url,
            "mainEntityOfPage": { "@type": "WebPage", "@id": url },
            "author": { "@type": "Person", "name": post.author },
            "datePublished": post.date,
            "publisher": publisher,
        }),
    };

    if let Some(obj) = ld.as_object_mut() {
        if let Some(image) = page.image() {
            obj.insert("image".to_string(), Value::String(site.url(image)));
        }
        if !meta.keywords().is_empty() {
            obj.insert("keywords".to_string(), Value::String(meta.keywords().join(", ")));
        }
    }
    ld
}

/// Wrap a JSON-LD value in a script element.
///
/// `</` is written as `<\/` so the payload can never close the element.
pub fn render_script(ld: &Value) -> String {
    let body = serde_json::to_string_pretty(ld)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">\n{body}\n</script>\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::pages;

    fn meta() -> SeoMetaOutput {
        SeoMetaOutput {
            seo_title: "T".into(),
            meta_description: "D".into(),
            keywords: Some(vec!["Giridih".into()]),
        }
    }

    fn kind(key: &str) -> String {
        let ld = build_jsonld(&SiteConfig::default(), pages::resolve(key).unwrap(), &meta());
        ld["@type"].as_str().unwrap().to_string()
    }

    #[test]
    fn type_follows_page_kind() {
        assert_eq!(kind("/"), "WebSite");
        assert_eq!(kind("/parasnath-hill"), "TouristAttraction");
        assert_eq!(kind("/gallery"), "WebPage");
        assert_eq!(kind("parasnath-trek"), "BlogPosting");
    }

    #[test]
    fn blog_posting_carries_author_and_date() {
        let page = pages::resolve("usri-river-life").unwrap();
        let ld = build_jsonld(&SiteConfig::default(), page, &meta());
        assert_eq!(ld["author"]["name"], "Nature Lover");
        assert_eq!(ld["datePublished"], "2024-08-01");
        assert_eq!(ld["image"], "https://picsum.photos/seed/blog-usri-river/600/400");
    }

    #[test]
    fn script_cannot_be_closed_early() {
        let ld = json!({ "name": "</script><script>alert(1)</script>" });
        let html = render_script(&ld);
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.starts_with("<script type=\"application/ld+json\">"));
    }
}
