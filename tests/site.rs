//! Site outputs: head rendering, sitemap, robots and the full build.

use chrono::{TimeZone, Utc};
use giridih_seo::site::pages::{self, blog_posts};
use giridih_seo::site::sitemap::{generate_robots, generate_sitemap};
use giridih_seo::{build_site, GeneratorConfig, PageHead, SeoMetaGenerator, SiteConfig};

fn site() -> SiteConfig {
    SiteConfig::default().with_base_url("https://giridih.example/")
}

#[tokio::test]
async fn fallback_head_for_blog_post() {
    let generator = SeoMetaGenerator::new(GeneratorConfig::default());
    let page = pages::resolve("parasnath-trek").unwrap();
    let meta = generator.generate(&page.to_input()).await;
    let html = PageHead::from_meta(&site(), page, &meta).render_html();

    assert!(html.contains(
        "<title>A Trekker&#39;s Tale: Conquering Parasnath Hill - Giridih | Giridih Explorer</title>"
    ));
    assert!(html.contains(
        "<link rel=\"canonical\" href=\"https://giridih.example/blogs/parasnath-trek\">"
    ));
    assert!(html.contains("<meta property=\"og:type\" content=\"article\">"));
    assert!(html.contains("<meta name=\"keywords\" content=\"Giridih, blog post\">"));
}

#[test]
fn sitemap_lists_every_route_and_post() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let xml = generate_sitemap(&site(), now);

    for page in pages::pages() {
        let loc = format!("<loc>https://giridih.example{}</loc>", page.path);
        assert!(xml.contains(&loc), "missing {loc}");
    }
    for post in blog_posts() {
        assert!(xml.contains(&format!(
            "<loc>https://giridih.example/blogs/{}</loc><lastmod>{}T00:00:00.000Z</lastmod>",
            post.slug, post.date
        )));
    }
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.trim_end().ends_with("</urlset>"));
}

#[test]
fn robots_allows_all_and_links_sitemap() {
    assert_eq!(
        generate_robots(&site()),
        "User-agent: *\nAllow: /\n\nSitemap: https://giridih.example/sitemap.xml\n"
    );
}

#[tokio::test]
async fn build_writes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let generator = SeoMetaGenerator::new(GeneratorConfig::builder().offline(true).build().unwrap());

    let stats = build_site(&generator, &site(), dir.path()).await.unwrap();

    assert_eq!(stats.total_pages, 18);
    assert_eq!(stats.fallback_pages, 18);
    assert_eq!(stats.external_pages, 0);
    assert_eq!(stats.files_written, 18 + 3);

    for name in ["meta.json", "sitemap.xml", "robots.txt"] {
        assert!(dir.path().join(name).is_file(), "{name} not written");
    }
    for page in pages::all() {
        let file = dir.path().join("head").join(format!("{}.html", page.output_name()));
        let html = std::fs::read_to_string(&file).unwrap();
        assert!(html.contains("<title>"), "{} has no title", file.display());
        assert!(html.contains("application/ld+json"));
    }

    let index = std::fs::read_to_string(dir.path().join("head/index.html")).unwrap();
    assert!(index.contains("\"@type\": \"WebSite\""));

    let records: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("meta.json")).unwrap())
            .unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 18);
    assert_eq!(records[0]["path"], "/");
    assert_eq!(records[0]["source"], "fallback");
    assert!(records[0]["seoTitle"].as_str().unwrap().ends_with(" - Giridih"));

    let leftovers: Vec<_> = walk(dir.path())
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[tokio::test]
async fn build_into_unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let generator = SeoMetaGenerator::fallback_only(GeneratorConfig::default());
    let err = build_site(&generator, &site(), &blocker).await.unwrap_err();
    assert!(matches!(err, giridih_seo::SeoError::OutputWriteFailed { .. }));
}

fn walk(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walk(&path));
        } else {
            out.push(path);
        }
    }
    out
}
