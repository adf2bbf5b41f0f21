//! Site-level consumers of generated metadata.
//!
//! * [`pages`]: the fixed registry of site routes and blog posts
//! * [`head`]: maps a record into `<head>` tags (title, description,
//!   canonical, Open Graph, Twitter card, robots)
//! * [`jsonld`]: schema.org structured data blocks
//! * [`sitemap`]: `sitemap.xml` and `robots.txt`

pub mod head;
pub mod jsonld;
pub mod pages;
pub mod sitemap;

use std::fmt;

pub const ENV_SITE_URL: &str = "GIRIDIH_SITE_URL";
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Site-wide settings shared by every page.
#[derive(Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Absolute origin without trailing slash, e.g. `https://giridih.example`.
    pub base_url: String,
    pub site_name: String,
    /// Page title template; `%s` is replaced by the page title.
    pub title_template: String,
    /// Title used when a page supplies none.
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: Vec<String>,
    /// Description used on the site-wide social cards.
    pub social_description: String,
    /// Site-relative path of the default Open Graph image.
    pub og_image_path: String,
    /// Site-relative path of the default Twitter image.
    pub twitter_image_path: String,
    pub locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_URL.to_string(),
            site_name: "Giridih Explorer".to_string(),
            title_template: "%s | Giridih Explorer".to_string(),
            default_title: "Giridih Explorer - Your Guide to Giridih District".to_string(),
            default_description: "Discover Giridih: Explore Parasnath Hill, forests, wildlife, culture, history, local crafts, and plan your trip with our comprehensive tourism guide for Giridih District, Jharkhand, India.".to_string(),
            default_keywords: [
                "Giridih",
                "Jharkhand",
                "tourism",
                "Parasnath Hill",
                "Shikharji",
                "travel guide",
                "India tourism",
                "Giridih attractions",
                "Giridih tourism",
                "Jharkhand tourism",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            social_description: "Discover the best of Giridih District. Explore attractions, culture, nature, and plan your perfect trip.".to_string(),
            og_image_path: "/og-image.png".to_string(),
            twitter_image_path: "/og-image-twitter.png".to_string(),
            locale: "en_US".to_string(),
        }
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("base_url", &self.base_url)
            .field("site_name", &self.site_name)
            .field("title_template", &self.title_template)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl SiteConfig {
    /// Defaults with the origin taken from `GIRIDIH_SITE_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var(ENV_SITE_URL) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for a site path (`/` maps to the origin with a trailing slash).
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() || path == "/" {
            return format!("{}/", self.base_url);
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Apply the title template.
    pub fn page_title(&self, title: &str) -> String {
        self.title_template.replace("%s", title)
    }
}

/// Escape text for use inside an HTML attribute or element.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_paths() {
        let site = SiteConfig::default().with_base_url("https://giridih.example/");
        assert_eq!(site.url("/"), "https://giridih.example/");
        assert_eq!(site.url("/gallery"), "https://giridih.example/gallery");
        assert_eq!(site.url("blogs/usri-river-life"), "https://giridih.example/blogs/usri-river-life");
        assert_eq!(site.url("https://cdn.example/x.jpg"), "https://cdn.example/x.jpg");
    }

    #[test]
    fn page_title_applies_template() {
        let site = SiteConfig::default();
        assert_eq!(site.page_title("Gallery"), "Gallery | Giridih Explorer");
    }

    #[test]
    fn html_escape_covers_attribute_breakers() {
        assert_eq!(
            html_escape(r#"Tom & "Jerry's" <b>"#),
            "Tom &amp; &quot;Jerry&#39;s&quot; &lt;b&gt;"
        );
    }
}
