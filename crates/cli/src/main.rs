//! pagesift entry point.
//!
//! Processes one URL or a newline-separated batch. Results go to stdout;
//! logging goes to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use pagesift_client::{Pipeline, ensure_unicode_font};
use pagesift_core::AppConfig;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(about = "Fetch web pages, summarize them, and save DOCX/PDF/TXT output", long_about = None)]
struct Cli {
    /// Page URL to process.
    #[arg(required_unless_present = "batch", conflicts_with = "batch")]
    url: Option<String>,
    /// File with one URL per line, or `-` to read stdin.
    #[arg(long, value_name = "FILE")]
    batch: Option<PathBuf>,
    /// Root folder for run output.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Show the fallback browser window.
    #[arg(long)]
    headed: bool,
    /// Seconds to let client-side scripts render (2-12).
    #[arg(long, value_name = "SECS")]
    js_wait: Option<u64>,
    /// Maximum summary sentences (1-200).
    #[arg(long, value_name = "N")]
    sentences: Option<usize>,
    /// Keep the summary exactly as extracted.
    #[arg(long)]
    no_paraphrase: bool,
    /// Skip TLS certificate verification.
    #[arg(long)]
    ignore_ssl: bool,
    /// Maximum images saved per page (1-500).
    #[arg(long, value_name = "N")]
    max_images: Option<usize>,
    /// Disable the browser-mimicking HTTP tier.
    #[arg(long)]
    no_stealth: bool,
    /// Disable the headless browser tier.
    #[arg(long)]
    no_render: bool,
    /// Print results as JSON.
    #[arg(long)]
    json: bool,
    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output_root = output.clone();
        }
        if self.headed {
            config.headless = false;
        }
        if let Some(secs) = self.js_wait {
            config.js_wait_secs = secs;
        }
        if let Some(n) = self.sentences {
            config.summary_sentences = n;
        }
        if self.no_paraphrase {
            config.paraphrase = false;
        }
        if self.ignore_ssl {
            config.ignore_ssl = true;
        }
        if let Some(n) = self.max_images {
            config.max_images = n;
        }
        if self.no_stealth {
            config.stealth_enabled = false;
        }
        if self.no_render {
            config.render_enabled = false;
        }
    }
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_batch(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input).context("failed to read URLs from stdin")?;
        Ok(input)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read batch file {}", path.display()))
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = AppConfig::load().context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;

    if config.fetch_font {
        ensure_unicode_font(&config.pdf_font_path, &config.font_url).await;
    }

    let pipeline = Pipeline::new(config);

    let all_ok = match (&cli.batch, &cli.url) {
        (Some(path), _) => {
            let input = read_batch(path)?;
            let batch = pipeline.run_batch(&input).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&batch.reports)?);
            } else {
                report::print_batch(&batch);
            }
            batch.summary.failed == 0
        }
        (None, Some(url)) => {
            let run = pipeline.process(url).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                report::print_report(&run);
            }
            run.status.is_ok()
        }
        (None, None) => anyhow::bail!("either a URL or --batch is required"),
    };

    Ok(if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_url() {
        let cli = Cli::try_parse_from(["pagesift", "https://example.com"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://example.com"));
        assert!(cli.batch.is_none());
    }

    #[test]
    fn test_url_and_batch_conflict() {
        assert!(Cli::try_parse_from(["pagesift", "https://example.com", "--batch", "urls.txt"]).is_err());
        assert!(Cli::try_parse_from(["pagesift"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "pagesift",
            "--batch",
            "-",
            "--headed",
            "--js-wait",
            "8",
            "--sentences",
            "10",
            "--no-paraphrase",
            "--max-images",
            "3",
            "--no-render",
            "--output",
            "out",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert!(!config.headless);
        assert_eq!(config.js_wait_secs, 8);
        assert_eq!(config.summary_sentences, 10);
        assert!(!config.paraphrase);
        assert_eq!(config.max_images, 3);
        assert!(!config.render_enabled);
        assert!(config.stealth_enabled);
        assert!(!config.ignore_ssl);
        assert_eq!(config.output_root, PathBuf::from("out"));
    }

    #[test]
    fn test_apply_keeps_defaults() {
        let cli = Cli::try_parse_from(["pagesift", "example.com"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.summary_sentences, AppConfig::default().summary_sentences);
        assert!(config.headless);
    }
}
