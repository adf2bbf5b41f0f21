//! `<head>` tags for a page, built from a generated record.

use super::pages::SitePage;
use super::{html_escape, SiteConfig};
use crate::output::SeoMetaOutput;
use serde::Serialize;

/// Robots directives applied to every page.
pub const ROBOTS_DIRECTIVES: &str =
    "index, follow, max-image-preview:large, max-snippet:-1, max-video-preview:-1";

pub const TWITTER_CARD: &str = "summary_large_image";

/// Everything rendered into a page's `<head>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHead {
    /// Full document title with the site template applied.
    pub title: String,
    /// Title used on social cards, without the site suffix.
    pub social_title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub og_type: &'static str,
    pub og_image: String,
    pub twitter_image: String,
    pub site_name: String,
    pub locale: String,
    pub robots: &'static str,
}

impl PageHead {
    pub fn from_meta(site: &SiteConfig, page: SitePage<'_>, meta: &SeoMetaOutput) -> Self {
        Self::for_path(site, &page.path(), page.image(), meta)
    }

    /// Head for an arbitrary site path, e.g. content outside the registry.
    pub fn for_path(
        site: &SiteConfig,
        path: &str,
        image: Option<&str>,
        meta: &SeoMetaOutput,
    ) -> Self {
        let (og_type, og_image, twitter_image) = match image {
            Some(image) => ("article", site.url(image), site.url(image)),
            None => (
                "website",
                site.url(&site.og_image_path),
                site.url(&site.twitter_image_path),
            ),
        };

        Self {
            title: site.page_title(&meta.seo_title),
            social_title: meta.seo_title.clone(),
            description: meta.meta_description.clone(),
            keywords: meta.keywords().to_vec(),
            canonical: site.url(path),
            og_type,
            og_image,
            twitter_image,
            site_name: site.site_name.clone(),
            locale: site.locale.clone(),
            robots: ROBOTS_DIRECTIVES,
        }
    }

    /// Site-wide defaults used by pages that supply no metadata.
    pub fn site_default(site: &SiteConfig) -> Self {
        Self {
            title: site.default_title.clone(),
            social_title: site.default_title.clone(),
            description: site.default_description.clone(),
            keywords: site.default_keywords.clone(),
            canonical: site.url("/"),
            og_type: "website",
            og_image: site.url(&site.og_image_path),
            twitter_image: site.url(&site.twitter_image_path),
            site_name: site.site_name.clone(),
            locale: site.locale.clone(),
            robots: ROBOTS_DIRECTIVES,
        }
    }

    /// Render as an HTML fragment, one tag per line.
    pub fn render_html(&self) -> String {
        let title = html_escape(&self.title);
        let social_title = html_escape(&self.social_title);
        let description = html_escape(&self.description);
        let canonical = html_escape(&self.canonical);

        let mut out = format!("<title>{title}</title>\n");
        out.push_str(&meta_name("description", &description));
        if !self.keywords.is_empty() {
            out.push_str(&meta_name("keywords", &html_escape(&self.keywords.join(", "))));
        }
        out.push_str(&format!("<link rel=\"canonical\" href=\"{canonical}\">\n"));
        out.push_str(&meta_name("robots", self.robots));

        // Open Graph
        out.push_str(&meta_property("og:title", &social_title));
        out.push_str(&meta_property("og:description", &description));
        out.push_str(&meta_property("og:url", &canonical));
        out.push_str(&meta_property("og:type", self.og_type));
        out.push_str(&meta_property("og:site_name", &html_escape(&self.site_name)));
        out.push_str(&meta_property("og:locale", &html_escape(&self.locale)));
        out.push_str(&meta_property("og:image", &html_escape(&self.og_image)));

        // Twitter
        out.push_str(&meta_name("twitter:card", TWITTER_CARD));
        out.push_str(&meta_name("twitter:title", &social_title));
        out.push_str(&meta_name("twitter:description", &description));
        out.push_str(&meta_name("twitter:image", &html_escape(&self.twitter_image)));
        out
    }
}

fn meta_name(name: &str, content: &str) -> String {
    format!("<meta name=\"{name}\" content=\"{content}\">\n")
}

fn meta_property(property: &str, content: &str) -> String {
    format!("<meta property=\"{property}\" content=\"{content}\">\n")
}
