//! CLI binary for giridih-seo.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `GeneratorConfig` / `SiteConfig` and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use giridih_seo::config::GeneratorConfigBuilder;
use giridih_seo::site::{jsonld, pages, sitemap};
use giridih_seo::{
    build_site, GeneratedMeta, GenerationProgressCallback, GeneratorConfig, GeneratorMode,
    PageHead, ProgressCallback, SeoMetaGenerator, SeoMetaInput, SiteConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar for `build`. Pages finish out of order when generated
/// concurrently, so every line carries its own index.
struct CliProgressCallback {
    bar: ProgressBar,
    fallbacks: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            fallbacks: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Generating");
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total: usize) {
        self.activate_bar(total);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Generating metadata for {total} pages…"))
        ));
    }

    fn on_page_start(&self, _index: usize, _total: usize, title: &str) {
        self.bar.set_message(title.to_string());
    }

    fn on_page_complete(&self, index: usize, total: usize, title: &str) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            title
        ));
        self.bar.inc(1);
    }

    fn on_page_fallback(&self, index: usize, total: usize, title: &str, reason: &str) {
        self.fallbacks.fetch_add(1, Ordering::SeqCst);
        let reason: String = if reason.chars().count() > 80 {
            let cut: String = reason.chars().take(79).collect();
            format!("{cut}\u{2026}")
        } else {
            reason.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            yellow("↺"),
            index,
            total,
            title,
            dim(&reason)
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total: usize, external_count: usize) {
        self.bar.finish_and_clear();
        let fallbacks = self.fallbacks.load(Ordering::SeqCst);
        if fallbacks == 0 {
            eprintln!(
                "{} {} pages generated externally",
                green("✔"),
                bold(&external_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages generated externally  ({} fallback)",
                yellow("⚠"),
                bold(&external_count.to_string()),
                total,
                yellow(&fallbacks.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Metadata for an ad-hoc piece of content
  giridih-seo generate --title "Usri Falls" --summary "A three-tier waterfall..." \
      --content-type "destination page"

  # Head tags for a registered page or blog post
  giridih-seo page /parasnath-hill
  giridih-seo page usri-river-life --json
  giridih-seo page --list

  # Build head fragments, meta.json, sitemap.xml and robots.txt
  giridih-seo build --out dist/

  # Deterministic output, no network
  giridih-seo --offline build --out dist/

  # Use another provider through edgequake-llm
  giridih-seo --provider openai --model gpt-4.1-nano page /explore

ENVIRONMENT VARIABLES:
  GOOGLE_GENAI_API_KEY    Gemini API key (GEMINI_API_KEY also accepted)
  GIRIDIH_SEO_PROVIDER    Provider for edgequake-llm (openai, anthropic, ollama, ...)
  GIRIDIH_SEO_MODEL       Override model ID
  GIRIDIH_SEO_GEMINI_URL  Override the Gemini API base URL
  GIRIDIH_SITE_URL        Public site origin (default http://localhost:3000)
  RUST_LOG                Log filter (overrides -v / -q)

Without a credential every page gets the deterministic fallback record:
  title       first 50 chars of the title + " - Giridih"
  description first 130 chars of the summary + "... Explore more about Giridih."
"#;

/// SEO metadata, structured data and sitemaps for Giridih Explorer.
#[derive(Parser, Debug)]
#[command(
    name = "giridih-seo",
    version,
    about = "Generate SEO metadata, head tags and sitemaps for Giridih Explorer",
    long_about = "Generate SEO titles, meta descriptions and keywords for Giridih Explorer pages \
using Google Gemini or any edgequake-llm provider, with a deterministic fallback when no \
credential is configured or the service fails.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// LLM provider for edgequake-llm: openai, anthropic, gemini, ollama.
    #[arg(long, global = true, env = "GIRIDIH_SEO_PROVIDER")]
    provider: Option<String>,

    /// LLM model ID (e.g. gemini-2.0-flash, gpt-4.1-nano).
    #[arg(long, global = true, env = "GIRIDIH_SEO_MODEL")]
    model: Option<String>,

    /// Per-call timeout in seconds.
    #[arg(long, global = true, env = "GIRIDIH_SEO_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// Retries per page on transient failures.
    #[arg(long, global = true, env = "GIRIDIH_SEO_MAX_RETRIES", default_value_t = 0)]
    max_retries: u32,

    /// Anchor term woven into every record.
    #[arg(long, global = true, env = "GIRIDIH_SEO_ANCHOR", default_value = "Giridih")]
    anchor: String,

    /// Concurrent generation calls during `build`.
    #[arg(long, global = true, env = "GIRIDIH_SEO_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Public site origin used for canonical URLs and the sitemap.
    #[arg(long, global = true, env = "GIRIDIH_SITE_URL")]
    site_url: Option<String>,

    /// Never call out; always use the fallback formatter.
    #[arg(long, global = true, env = "GIRIDIH_SEO_OFFLINE")]
    offline: bool,

    /// Disable the progress bar.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "GIRIDIH_SEO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "GIRIDIH_SEO_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate metadata for an ad-hoc title and summary.
    Generate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        summary: String,
        /// e.g. "blog post", "destination page".
        #[arg(long)]
        content_type: Option<String>,
        /// Print the full record (source, attempts, failure) as JSON.
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Print rendered head tags instead of plain text.
        #[arg(long)]
        html: bool,
    },
    /// Generate and render head tags for a registered page or blog post.
    Page {
        /// Route path (`/explore`), blog path or blog slug.
        #[arg(required_unless_present = "list")]
        key: Option<String>,
        /// List every registered page and post.
        #[arg(long)]
        list: bool,
        #[arg(long)]
        json: bool,
    },
    /// Write head fragments, meta.json, sitemap.xml and robots.txt.
    Build {
        #[arg(short, long, env = "GIRIDIH_SEO_OUT")]
        out: PathBuf,
    },
    /// Print sitemap.xml to stdout.
    Sitemap,
    /// Print robots.txt to stdout.
    Robots,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs during a build.
    let show_progress =
        matches!(cli.command, Command::Build { .. }) && !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let site = match cli.site_url {
        Some(ref url) => SiteConfig::default().with_base_url(url),
        None => SiteConfig::from_env(),
    };

    match cli.command {
        Command::Sitemap => {
            print!("{}", sitemap::generate_sitemap(&site, chrono::Utc::now()));
        }
        Command::Robots => {
            print!("{}", sitemap::generate_robots(&site));
        }
        Command::Generate {
            ref title,
            ref summary,
            ref content_type,
            json,
            html,
        } => {
            let generator = SeoMetaGenerator::new(build_config(&cli, None)?);
            let mut input = SeoMetaInput::new(title.as_str(), summary.as_str());
            if let Some(ct) = content_type {
                input = input.with_content_type(ct.as_str());
            }
            let generated = generator.generate_detailed(&input).await;

            if json {
                let out = serde_json::to_string_pretty(&generated)
                    .context("Failed to serialise output")?;
                println!("{out}");
            } else if html {
                let head = PageHead::for_path(&site, "/", None, &generated.meta);
                print!("{}", head.render_html());
            } else {
                print_plain(&generated);
            }
            report_source(&cli, &generator, &generated);
        }
        Command::Page { list: true, .. } => {
            for page in pages::all() {
                println!("{:<40} {}", page.path(), dim(&page.to_input().title));
            }
        }
        Command::Page { ref key, json, .. } => {
            let key = key
                .as_deref()
                .context("No page given; run `giridih-seo page --list`")?;
            let page = pages::resolve(key)?;

            let generator = SeoMetaGenerator::new(build_config(&cli, None)?);
            let generated = generator.generate_detailed(&page.to_input()).await;
            let head = PageHead::from_meta(&site, page, &generated.meta);
            let ld = jsonld::build_jsonld(&site, page, &generated.meta);

            if json {
                let out = serde_json::to_string_pretty(&serde_json::json!({
                    "path": page.path(),
                    "generated": generated,
                    "head": head,
                    "jsonLd": ld,
                }))
                .context("Failed to serialise output")?;
                println!("{out}");
            } else {
                print!("{}", head.render_html());
                print!("{}", jsonld::render_script(&ld));
            }
            report_source(&cli, &generator, &generated);
        }
        Command::Build { ref out } => {
            let progress_cb: Option<ProgressCallback> = if show_progress {
                Some(CliProgressCallback::new() as Arc<dyn GenerationProgressCallback>)
            } else {
                None
            };
            let generator = SeoMetaGenerator::new(build_config(&cli, progress_cb)?);
            if generator.mode() == GeneratorMode::FallbackOnly && !cli.quiet {
                eprintln!(
                    "{} No credential configured: every page uses the fallback record",
                    yellow("⚠")
                );
            }

            let stats = build_site(&generator, &site, out)
                .await
                .context("Build failed")?;

            if !cli.quiet {
                eprintln!(
                    "{}  {} pages  ({} external, {} fallback)  {} files  {}ms  →  {}",
                    if stats.fallback_pages == 0 {
                        green("✔")
                    } else {
                        yellow("⚠")
                    },
                    stats.total_pages,
                    stats.external_pages,
                    stats.fallback_pages,
                    stats.files_written,
                    stats.total_duration_ms,
                    bold(&out.display().to_string()),
                );
            }
        }
    }

    Ok(())
}

/// Map CLI args onto the environment-derived `GeneratorConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<GeneratorConfig> {
    let mut builder = GeneratorConfigBuilder::from_config(GeneratorConfig::from_env())
        .anchor_term(cli.anchor.as_str())
        .api_timeout_secs(cli.timeout)
        .max_retries(cli.max_retries)
        .concurrency(cli.concurrency)
        .offline(cli.offline);

    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.as_str());
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.as_str());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_plain(generated: &GeneratedMeta) {
    println!("Title:        {}", generated.meta.seo_title);
    println!("Description:  {}", generated.meta.meta_description);
    println!("Keywords:     {}", generated.meta.keywords().join(", "));
}

/// Why a generator has no backend.
fn fallback_reason(generator: &SeoMetaGenerator) -> &'static str {
    if generator.config().offline {
        "fallback (offline)"
    } else {
        "fallback (no credential)"
    }
}

fn report_source(cli: &Cli, generator: &SeoMetaGenerator, generated: &GeneratedMeta) {
    if cli.quiet {
        return;
    }
    let source = match (generator.mode(), &generated.failure) {
        (GeneratorMode::FallbackOnly, _) => dim(fallback_reason(generator)),
        (_, Some(failure)) => yellow(&format!("fallback ({failure})")),
        (_, None) => green(&format!(
            "external ({} attempt{})",
            generated.attempts,
            if generated.attempts == 1 { "" } else { "s" }
        )),
    };
    eprintln!("{} {}  {}", dim("source:"), source, dim(&format!("{}ms", generated.duration_ms)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_reason_distinguishes_offline() {
        let offline = GeneratorConfig::builder()
            .api_key("set-but-unused")
            .offline(true)
            .build()
            .unwrap();
        assert_eq!(
            fallback_reason(&SeoMetaGenerator::new(offline)),
            "fallback (offline)"
        );
        assert_eq!(
            fallback_reason(&SeoMetaGenerator::new(GeneratorConfig::default())),
            "fallback (no credential)"
        );
    }
}
