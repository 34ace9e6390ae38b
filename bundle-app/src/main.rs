use anyhow::{Context, Result};
use bundle_common::observability::{LogFormat, init_logging};
use bundle_config::{BundleConfig, BundleConfigLoader};
use bundle_http::HttpClient;
use bundle_scrape::RunOutcome;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "bundle.yaml";

/// List the items of a bundle storefront page.
#[derive(Debug, Parser)]
#[command(name = "bundle-items", version)]
struct Cli {
    /// Configuration file (YAML/TOML/JSON). `bundle.yaml` is used when present.
    #[arg(long, env = "BUNDLE_CONFIG")]
    config: Option<PathBuf>,

    /// Bundle page to fetch.
    #[arg(long)]
    url: Option<String>,

    /// Charity name to exclude; repeat to give several. Replaces the configured list.
    #[arg(long = "charity", value_name = "NAME")]
    charities: Vec<String>,

    /// Directory for the report and payload dump.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log encoding: text or json.
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Mirror log events to stderr.
    #[arg(long)]
    log_stderr: bool,
}

impl Cli {
    fn load_config(&self) -> Result<BundleConfig> {
        let loader = match &self.config {
            Some(path) => BundleConfigLoader::new().with_file(path),
            None => BundleConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
        };
        let mut cfg = loader.load().context("failed to load configuration")?;

        if let Some(url) = &self.url {
            cfg.url = url.clone();
        }
        if !self.charities.is_empty() {
            cfg.charity_names = self.charities.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = Some(dir.clone());
        }
        if let Some(format) = self.log_format {
            cfg.logging.format = format;
        }
        if self.log_stderr {
            cfg.logging.emit_stderr = true;
        }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.load_config()?;

    init_logging("bundle-items", &cfg.logging)?;

    let client = HttpClient::new()?.with_timeout(Duration::from_secs(cfg.http.timeout_secs));
    let mut stdout = std::io::stdout().lock();

    match bundle_scrape::run(&client, &cfg, &mut stdout)
        .await
        .with_context(|| format!("bundle run failed for {}", cfg.url))?
    {
        RunOutcome::Report { path, count } => {
            tracing::info!(path = %path.display(), count, "run.report_written");
        }
        RunOutcome::Dumped { path } => {
            tracing::warn!(path = %path.display(), "run.payload_dumped");
        }
    }
    Ok(())
}
