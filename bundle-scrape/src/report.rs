//! Report rendering and output files.
//!
//! The file and console renderings carry the same information with a
//! slightly different layout: the file puts authors on the title line
//! (`1. Title by A, B`), the console gives them their own indented line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bundle_common::{BundleError, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::record::ItemRecord;

/// Text written to the report file.
pub fn render_file(items: &[ItemRecord], bundle_title: &str) -> String {
    let mut out = String::new();
    out.push_str(bundle_title);
    out.push('\n');
    out.push_str(&"=".repeat(bundle_title.chars().count()));
    out.push_str("\n\n");

    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}", i + 1, item.title));
        if let Some(authors) = item.authors_joined() {
            out.push_str(&format!(" by {authors}"));
        }
        out.push('\n');
        if let Some(link) = &item.link {
            out.push_str(&format!("   Link: {link}\n"));
        }
        out.push('\n');
    }
    out
}

/// Text mirrored to the console once the report file is written.
pub fn render_console(items: &[ItemRecord], bundle_title: &str, saved_to: &Path) -> String {
    let heading = format!("items in the {bundle_title}");
    let mut out = String::new();
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"-".repeat(heading.chars().count()));
    out.push('\n');

    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item.title));
        if let Some(authors) = item.authors_joined() {
            out.push_str(&format!("   Author(s): {authors}\n"));
        }
        if let Some(link) = &item.link {
            out.push_str(&format!("   Link: {link}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("Total items found: {}\n", items.len()));
    out.push_str(&format!("item list saved to '{}'\n", saved_to.display()));
    out
}

/// Write the report file, then print the console rendering to `console`.
pub fn write_report<W: Write>(
    items: &[ItemRecord],
    destination: &Path,
    bundle_title: &str,
    console: &mut W,
) -> Result<()> {
    let file = File::create(destination).map_err(|e| BundleError::io(destination, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_file(items, bundle_title).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| BundleError::io(destination, e))?;

    console
        .write_all(render_console(items, bundle_title, destination).as_bytes())
        .map_err(|e| BundleError::io("<console>", e))?;

    tracing::info!(
        path = %destination.display(),
        count = items.len(),
        "report.saved"
    );
    Ok(())
}

/// Persist the raw payload, pretty-printed with four-space indentation.
pub fn dump_payload(payload: &Value, destination: &Path) -> Result<()> {
    let file = File::create(destination).map_err(|e| BundleError::io(destination, e))?;
    let mut writer = BufWriter::new(file);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    payload.serialize(&mut ser)?;
    writer.flush().map_err(|e| BundleError::io(destination, e))?;

    tracing::info!(path = %destination.display(), "report.payload_dumped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<ItemRecord> {
        vec![
            ItemRecord {
                title: "Widget".into(),
                authors: vec!["Acme".into(), "Initech".into()],
                link: Some("http://x".into()),
            },
            ItemRecord {
                title: "Gadget".into(),
                authors: vec![],
                link: None,
            },
        ]
    }

    #[test]
    fn file_layout() {
        let expected = "\
Data Bundle
===========

1. Widget by Acme, Initech
   Link: http://x

2. Gadget

";
        assert_eq!(render_file(&items(), "Data Bundle"), expected);
    }

    #[test]
    fn console_layout() {
        let expected = "\
items in the Data Bundle
------------------------
1. Widget
   Author(s): Acme, Initech
   Link: http://x

2. Gadget

Total items found: 2
item list saved to 'data_bundle_items.txt'
";
        assert_eq!(
            render_console(&items(), "Data Bundle", Path::new("data_bundle_items.txt")),
            expected
        );
    }

    #[test]
    fn underline_counts_characters_not_bytes() {
        let text = render_file(&[], "Café");
        assert_eq!(text, "Café\n====\n\n");
    }

    #[test]
    fn writes_file_and_console() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dest = tmp.path().join("data_bundle_items.txt");
        let mut console = Vec::new();

        write_report(&items(), &dest, "Data Bundle", &mut console).unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, render_file(&items(), "Data Bundle"));
        let printed = String::from_utf8(console).unwrap();
        assert!(printed.starts_with("items in the Data Bundle\n"));
        assert!(printed.contains("Total items found: 2\n"));
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dest = tmp.path().join("missing-dir").join("out.txt");
        let err = write_report(&items(), &dest, "X", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, BundleError::Io { .. }));
    }

    #[test]
    fn dump_uses_four_space_indent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dest = tmp.path().join("data_structure.json");
        dump_payload(&json!({"b": [1], "a": null}), &dest).unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, "{\n    \"b\": [\n        1\n    ],\n    \"a\": null\n}");
    }
}
