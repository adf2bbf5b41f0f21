//! Static build: metadata for every page, rendered into an output directory.
//!
//! ```text
//! {out_dir}/
//!   head/<name>.html   head tags + JSON-LD per page
//!   meta.json          every record with its source tag
//!   sitemap.xml
//!   robots.txt
//! ```
//!
//! Generation failures have already been absorbed by the generator; only
//! filesystem errors abort a build.

use crate::error::{GenerationFailure, SeoError};
use crate::generator::SeoMetaGenerator;
use crate::output::{BuildStats, MetaSource, SeoMetaOutput};
use crate::site::head::PageHead;
use crate::site::jsonld::{build_jsonld, render_script};
use crate::site::sitemap::{generate_robots, generate_sitemap};
use crate::site::{pages, SiteConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// One entry of `meta.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub path: String,
    pub name: String,
    pub source: MetaSource,
    #[serde(flatten)]
    pub meta: SeoMetaOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<GenerationFailure>,
}

/// Generate, render and write the whole site into `out_dir`.
///
/// # Errors
/// [`SeoError::OutputWriteFailed`] when a directory or file cannot be
/// written; [`SeoError::Serialize`] if `meta.json` cannot be encoded.
pub async fn build_site(
    generator: &SeoMetaGenerator,
    site: &SiteConfig,
    out_dir: impl AsRef<Path>,
) -> Result<BuildStats, SeoError> {
    let total_start = Instant::now();
    let out_dir = out_dir.as_ref();
    info!("Building site metadata into {}", out_dir.display());

    let entries = pages::all();
    let inputs: Vec<_> = entries.iter().map(|p| p.to_input()).collect();

    let gen_start = Instant::now();
    let generated = generator.generate_all(&inputs).await;
    let generation_duration_ms = gen_start.elapsed().as_millis() as u64;

    let head_dir = out_dir.join("head");
    create_dir(&head_dir).await?;

    let mut stats = BuildStats {
        total_pages: entries.len(),
        generation_duration_ms,
        ..Default::default()
    };
    let mut records = Vec::with_capacity(entries.len());

    for (page, result) in entries.iter().zip(generated) {
        match result.source {
            MetaSource::External => stats.external_pages += 1,
            MetaSource::Fallback => stats.fallback_pages += 1,
        }

        let head = PageHead::from_meta(site, *page, &result.meta);
        let ld = build_jsonld(site, *page, &result.meta);
        let mut html = head.render_html();
        html.push_str(&render_script(&ld));

        let name = page.output_name();
        write_atomic(&head_dir.join(format!("{name}.html")), html.as_bytes()).await?;
        stats.files_written += 1;
        debug!("Wrote head for {}", page.path());

        records.push(PageRecord {
            path: page.path(),
            name,
            source: result.source,
            meta: result.meta,
            failure: result.failure,
        });
    }

    let json = serde_json::to_vec_pretty(&records).map_err(|e| SeoError::Serialize {
        what: "meta.json",
        source: e,
    })?;
    write_atomic(&out_dir.join("meta.json"), &json).await?;
    write_atomic(
        &out_dir.join("sitemap.xml"),
        generate_sitemap(site, chrono::Utc::now()).as_bytes(),
    )
    .await?;
    write_atomic(&out_dir.join("robots.txt"), generate_robots(site).as_bytes()).await?;
    stats.files_written += 3;

    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Build complete: {} pages ({} external, {} fallback), {} files in {}ms",
        stats.total_pages,
        stats.external_pages,
        stats.fallback_pages,
        stats.files_written,
        stats.total_duration_ms
    );
    Ok(stats)
}

async fn create_dir(dir: &Path) -> Result<(), SeoError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| SeoError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source: e,
        })
}

/// Write to `<path>.tmp`, then rename over `path`.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SeoError> {
    if let Some(parent) = path.parent() {
        create_dir(parent).await?;
    }

    let tmp_path = tmp_path_for(path);
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| SeoError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| SeoError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
