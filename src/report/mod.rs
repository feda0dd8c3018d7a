//! Tag extraction and report writing.
//!
//! [`extract_tags`] reads every page of a file into [`PageTags`];
//! [`write_report`] renders them and writes the report. [`dump_tags`] runs
//! both in order.

mod extract;
mod page;
mod writer;

use std::path::Path;

pub use extract::{extract_tags, read_pages, ExtractOptions};
pub use page::PageTags;
pub use writer::{
    format_tag_line, page_header, render_json, render_report, render_text, write_report,
    ReportFormat,
};

use crate::error::ReportError;

/// Extract the tags of `input` and write the report to `output`.
///
/// Extraction finishes (and the input is closed) before `output` is created,
/// so a failed extraction never leaves an output file behind. Returns the
/// number of pages written.
pub async fn dump_tags(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    format: ReportFormat,
    options: &ExtractOptions,
) -> Result<usize, ReportError> {
    let pages = extract_tags(input, options).await?;
    write_report(&pages, output, format).await?;
    Ok(pages.len())
}
