//! One sequential extraction run: fetch, resolve title, locate payload,
//! extract, then either write the report or dump the payload.

use std::io::Write;
use std::path::PathBuf;

use bundle_common::{BundleError, Result};
use bundle_config::BundleConfig;
use bundle_http::HttpClient;
use scraper::Html;

use crate::charity::CharityFilter;
use crate::extract::{Extraction, Strategy, extract_items};
use crate::filename::generate_filename;
use crate::payload::{PAYLOAD_ELEMENT_ID, locate_payload};
use crate::report::{dump_payload, write_report};
use crate::title::resolve_title;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Items were found and the report was written.
    Report { path: PathBuf, count: usize },
    /// No items were found; the raw payload was saved for inspection.
    Dumped { path: PathBuf },
}

/// Fetch the configured page and process it.
///
/// The request timeout is the client's; see [`HttpClient::with_timeout`].
pub async fn run<W: Write>(
    client: &HttpClient,
    config: &BundleConfig,
    console: &mut W,
) -> Result<RunOutcome> {
    tracing::info!(url = %config.url, "pipeline.fetch");
    let html = client
        .get_text(&config.url)
        .await
        .map_err(|e| BundleError::Fetch(e.to_string()))?;

    process_page(&html, config, console)
}

/// Everything after the fetch; no network involved.
pub fn process_page<W: Write>(
    html: &str,
    config: &BundleConfig,
    console: &mut W,
) -> Result<RunOutcome> {
    let document = Html::parse_document(html);

    let bundle_title = resolve_title(&document, &config.url);
    say(console, &format!("Bundle Title: {bundle_title}"))?;

    let filename = generate_filename(&bundle_title);
    say(console, &format!("Filename: {filename}"))?;

    let Some(payload) = locate_payload(&document)? else {
        say(
            console,
            &format!("Could not find the {PAYLOAD_ELEMENT_ID} script tag."),
        )?;
        return Err(BundleError::PayloadMissing {
            element_id: PAYLOAD_ELEMENT_ID.to_string(),
        });
    };

    let filter = CharityFilter::new(&config.charity_names);
    let extraction = extract_items(&payload, &filter);

    report_skips(console, &extraction, Strategy::TierItemData)?;
    if extraction.strategy == Strategy::RecursiveSearch {
        say(
            console,
            "tier_item_data not found or empty. Trying alternative method...",
        )?;
        report_skips(console, &extraction, Strategy::RecursiveSearch)?;
    }

    if extraction.is_empty() {
        say(console, "Could not find items in the data structure.")?;
        let path = config.output_path(&config.dump_file);
        dump_payload(&payload, &path)?;
        say(
            console,
            &format!(
                "Saved data structure to '{}' for inspection.",
                path.display()
            ),
        )?;
        tracing::warn!(path = %path.display(), "pipeline.no_items");
        return Ok(RunOutcome::Dumped { path });
    }

    let path = config.output_path(&filename);
    write_report(&extraction.items, &path, &bundle_title, console)?;
    Ok(RunOutcome::Report {
        path,
        count: extraction.items.len(),
    })
}

fn report_skips<W: Write>(
    console: &mut W,
    extraction: &Extraction,
    strategy: Strategy,
) -> Result<()> {
    for skip in extraction.skipped.iter().filter(|s| s.strategy == strategy) {
        say(console, &format!("Skipping charity: {}", skip.title))?;
    }
    Ok(())
}

fn say<W: Write>(console: &mut W, line: &str) -> Result<()> {
    writeln!(console, "{line}").map_err(|e| BundleError::io("<console>", e))
}
