//! Report file naming.

use regex::Regex;
use std::sync::OnceLock;

static SPECIAL_CHARS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUNS: OnceLock<Regex> = OnceLock::new();

/// Derive the report file name from a bundle title.
///
/// ```
/// assert_eq!(
///     bundle_scrape::generate_filename("My Bundle! 2024"),
///     "my_bundle_2024_items.txt"
/// );
/// ```
pub fn generate_filename(title: &str) -> String {
    let special = SPECIAL_CHARS.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static pattern"));
    let spaces = WHITESPACE_RUNS.get_or_init(|| Regex::new(r"\s+").expect("static pattern"));

    let clean = special.replace_all(title, "");
    let clean = spaces.replace_all(&clean, "_").to_lowercase();
    format!("{clean}_items.txt")
}
