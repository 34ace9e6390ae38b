//! Item extraction from the embedded bundle payload.
//!
//! The payload has no fixed schema. Two strategies are tried in order:
//!
//! 1. [`Strategy::TierItemData`]: walk the `tier_item_data` mapping (item id ->
//!    item info) in stored order.
//! 2. [`Strategy::RecursiveSearch`]: depth-first search of the whole document
//!    for any mapping carrying both `human_name` and `developers`.
//!
//! The second strategy only runs when the first produced no items. Both apply
//! the same charity filtering: a charity title drops the whole item (and, in
//! the recursive search, everything nested below it), a charity developer name
//! drops just that name.

use serde_json::{Map, Value};

use crate::charity::CharityFilter;
use crate::record::ItemRecord;

pub const TIER_ITEM_DATA: &str = "tier_item_data";
pub const UNKNOWN_TITLE: &str = "Unknown Title";

const HUMAN_NAME: &str = "human_name";
const DEVELOPERS: &str = "developers";
const DEVELOPER_NAME: &str = "developer-name";
const PUBLISHERS: &str = "publishers";
const PUBLISHER_URL: &str = "publisher-url";

/// Which strategy produced an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    TierItemData,
    RecursiveSearch,
}

/// A charity entry dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub strategy: Strategy,
    pub title: String,
}

/// Result of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub strategy: Strategy,
    pub items: Vec<ItemRecord>,
    /// Charity entries that were dropped, in encounter order.
    pub skipped: Vec<Skipped>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Extract every item from `payload`, falling back to a recursive search
/// when the structured lookup finds nothing.
pub fn extract_items(payload: &Value, filter: &CharityFilter) -> Extraction {
    let mut structured = Collector::new(filter, Strategy::TierItemData, Vec::new());
    if let Some(entries) = payload.get(TIER_ITEM_DATA) {
        collect_tier_items(entries, &mut structured);
    }
    if !structured.items.is_empty() {
        tracing::debug!(
            items = structured.items.len(),
            skipped = structured.skipped.len(),
            "extract.tier_item_data"
        );
        return structured.finish();
    }

    tracing::info!(
        has_key = payload.get(TIER_ITEM_DATA).is_some(),
        "extract.fallback.recursive_search"
    );
    let mut recursive = Collector::new(filter, Strategy::RecursiveSearch, structured.skipped);
    search(payload, &mut recursive);
    tracing::debug!(
        items = recursive.items.len(),
        skipped = recursive.skipped.len(),
        "extract.recursive_search"
    );
    recursive.finish()
}

fn collect_tier_items(entries: &Value, out: &mut Collector<'_>) {
    let Some(entries) = entries.as_object() else {
        tracing::debug!("extract.tier_item_data.not_a_mapping");
        return;
    };
    for (item_id, info) in entries {
        match info.as_object() {
            Some(info) => {
                out.take(info);
            }
            None => tracing::debug!(%item_id, "extract.tier_item_data.entry_not_a_mapping"),
        }
    }
}

// Depth-first: a mapping is checked before its children. Children of an
// item are searched too; a charity node's subtree is not.
fn search(node: &Value, out: &mut Collector<'_>) {
    match node {
        Value::Object(map) => {
            if map.contains_key(HUMAN_NAME)
                && map.contains_key(DEVELOPERS)
                && out.take(map) == Taken::Charity
            {
                return;
            }
            for child in map.values() {
                search(child, out);
            }
        }
        Value::Array(children) => {
            for child in children {
                search(child, out);
            }
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Taken {
    Item,
    Charity,
}

struct Collector<'a> {
    filter: &'a CharityFilter,
    strategy: Strategy,
    items: Vec<ItemRecord>,
    skipped: Vec<Skipped>,
    // Skips already reported by an earlier strategy.
    reported: usize,
}

impl<'a> Collector<'a> {
    fn new(filter: &'a CharityFilter, strategy: Strategy, skipped: Vec<Skipped>) -> Self {
        let reported = skipped.len();
        Self {
            filter,
            strategy,
            items: Vec::new(),
            skipped,
            reported,
        }
    }

    fn take(&mut self, info: &Map<String, Value>) -> Taken {
        let title = title_of(info);
        if self.filter.matches(title) {
            tracing::info!(%title, strategy = ?self.strategy, "extract.skip_charity");
            if !self.skipped[..self.reported].iter().any(|s| s.title == title) {
                self.skipped.push(Skipped {
                    strategy: self.strategy,
                    title: title.to_string(),
                });
            }
            return Taken::Charity;
        }
        self.items.push(ItemRecord {
            title: title.to_string(),
            authors: authors_of(info, self.filter),
            link: link_of(info),
        });
        Taken::Item
    }

    fn finish(self) -> Extraction {
        Extraction {
            strategy: self.strategy,
            items: self.items,
            skipped: self.skipped,
        }
    }
}

fn title_of(info: &Map<String, Value>) -> &str {
    info.get(HUMAN_NAME)
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNKNOWN_TITLE)
}

fn authors_of(info: &Map<String, Value>, filter: &CharityFilter) -> Vec<String> {
    info.get(DEVELOPERS)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|dev| dev.get(DEVELOPER_NAME).and_then(Value::as_str))
        .filter(|name| !filter.matches(name))
        .map(String::from)
        .collect()
}

// The first publisher entry carrying a url field decides the link.
fn link_of(info: &Map<String, Value>) -> Option<String> {
    info.get(PUBLISHERS)
        .and_then(Value::as_array)?
        .iter()
        .find_map(|publisher| publisher.get(PUBLISHER_URL))
        .and_then(Value::as_str)
        .map(String::from)
}
