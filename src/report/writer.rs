//! Report rendering and writing.
//!
//! # Text layout
//!
//! ```text
//! --- Page 0 ---
//! ImageWidth: 100
//! StripOffsets: [10, 20, 30]
//!
//! --- Page 1 ---
//! ImageWidth: 200
//!
//! ```
//!
//! Tags are sorted by name. A sequence under a name containing `Offset` is
//! printed as a bracketed list of plain elements; every other value is
//! printed in its literal form ([`TagValue::repr`]).

use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::value::TagValue;

use super::page::PageTags;

/// Substring that selects the bracketed list layout for sequence values.
const OFFSET_MARKER: &str = "Offset";

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Page blocks of sorted `name: value` lines
    #[default]
    Text,
    /// Array of `{"page": n, "tags": {...}}` objects
    Json,
}

// =============================================================================
// Text
// =============================================================================

/// Header line of a page block.
pub fn page_header(index: usize) -> String {
    format!("--- Page {} ---", index)
}

/// Render one tag line (without the trailing newline).
pub fn format_tag_line(name: &str, value: &TagValue) -> String {
    match value {
        TagValue::Sequence(items) if name.contains(OFFSET_MARKER) => {
            let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
            format!("{}: [{}]", name, joined.join(", "))
        }
        _ => format!("{}: {}", name, value.repr()),
    }
}

/// Render the text report.
pub fn render_text(pages: &[PageTags]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(&page_header(page.index));
        out.push('\n');
        for (name, value) in page.sorted() {
            out.push_str(&format_tag_line(name, value));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct JsonPage<'a> {
    page: usize,
    tags: BTreeMap<&'a str, &'a TagValue>,
}

/// Render the JSON report.
pub fn render_json(pages: &[PageTags]) -> Result<String, serde_json::Error> {
    let json: Vec<JsonPage<'_>> = pages
        .iter()
        .map(|page| JsonPage {
            page: page.index,
            tags: page.iter().collect(),
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&json)?;
    out.push('\n');
    Ok(out)
}

/// Render the report in the requested format.
pub fn render_report(pages: &[PageTags], format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(pages)),
        ReportFormat::Json => render_json(pages),
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Render the report and write it to `path`, creating or truncating it.
///
/// The report is rendered fully before the file is touched. The file is
/// flushed and synced before returning, and closed on every path. A file
/// left behind by a failed write is removed.
pub async fn write_report(
    pages: &[PageTags],
    path: impl AsRef<Path>,
    format: ReportFormat,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let write_error = |message: String| ReportError::Write {
        path: path.to_path_buf(),
        message,
    };

    let contents = render_report(pages, format).map_err(|e| write_error(e.to_string()))?;

    let mut file = File::create(path)
        .await
        .map_err(|e| write_error(e.to_string()))?;

    let result = async {
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await
    }
    .await;
    drop(file);

    if let Err(e) = result {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %remove_err, "failed to remove partial report");
        }
        return Err(write_error(e.to_string()));
    }

    debug!(path = %path.display(), bytes = contents.len(), "wrote report");
    Ok(())
}
