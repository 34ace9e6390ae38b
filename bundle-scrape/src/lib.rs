//! Item extraction for digital-bundle storefront pages.
//!
//! - Title resolution from page metadata (`title`)
//! - Embedded JSON payload lookup (`payload`)
//! - Item extraction with charity filtering (`extract`, `charity`, `record`)
//! - Report rendering and output file naming (`report`, `filename`)
//! - One sequential run tying it together (`pipeline`)

pub mod charity;
pub mod extract;
pub mod filename;
pub mod payload;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod title;

pub use charity::CharityFilter;
pub use extract::{Extraction, Skipped, Strategy, extract_items};
pub use filename::generate_filename;
pub use payload::{PAYLOAD_ELEMENT_ID, locate_payload};
pub use pipeline::{RunOutcome, process_page, run};
pub use record::ItemRecord;
pub use report::{dump_payload, write_report};
pub use title::resolve_title;
