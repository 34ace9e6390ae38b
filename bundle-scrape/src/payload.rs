//! Embedded payload lookup.

use bundle_common::Result;
use scraper::{Html, Selector};
use serde_json::Value;

/// Id of the script element carrying the bundle catalog as JSON.
pub const PAYLOAD_ELEMENT_ID: &str = "webpack-bundle-page-data";

/// Find and parse the payload script.
///
/// `Ok(None)` when the element is absent; invalid JSON is an error.
pub fn locate_payload(document: &Html) -> Result<Option<Value>> {
    let selector = format!("script#{PAYLOAD_ELEMENT_ID}");
    let Ok(sel) = Selector::parse(&selector) else {
        return Ok(None);
    };
    let Some(script) = document.select(&sel).next() else {
        tracing::debug!(element_id = PAYLOAD_ELEMENT_ID, "payload.missing");
        return Ok(None);
    };

    let raw = script.text().collect::<String>();
    tracing::debug!(bytes = raw.len(), "payload.found");
    let value = serde_json::from_str(&raw)?;
    Ok(Some(value))
}
