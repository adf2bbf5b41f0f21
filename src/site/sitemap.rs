//! `sitemap.xml` and `robots.txt`.

use super::pages::{blog_posts, pages};
use super::{html_escape, SiteConfig};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use tracing::warn;

/// Sitemap covering every static route and blog post.
///
/// Static routes carry `now` as `lastmod`; posts carry their publication
/// date at midnight UTC.
pub fn generate_sitemap(site: &SiteConfig, now: DateTime<Utc>) -> String {
    let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    for page in pages() {
        let (freq, priority) = if page.is_home() {
            ("daily", "1.0")
        } else {
            ("weekly", "0.8")
        };
        push_url(&mut xml, &site.url(page.path), &now, freq, priority);
    }

    for post in blog_posts() {
        let lastmod = match post_date(post.date) {
            Some(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => {
                warn!("Blog post '{}' has unparseable date '{}'", post.slug, post.date);
                now.clone()
            }
        };
        push_url(&mut xml, &site.url(&post.path()), &lastmod, "monthly", "0.7");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// `robots.txt` allowing everything and pointing at the sitemap.
pub fn generate_robots(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.url("/sitemap.xml")
    )
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, freq: &str, priority: &str) {
    xml.push_str(&format!(
        "  <url><loc>{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{}</priority></url>\n",
        html_escape(loc),
        lastmod,
        freq,
        priority
    ));
}

fn post_date(date: &str) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}
