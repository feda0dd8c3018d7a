//! # tiff-tag-dump
//!
//! Dumps the metadata tags of every page of a TIFF-family file (classic
//! TIFF, BigTIFF, Aperio SVS) to a sorted, human-readable report.
//!
//! ## Architecture
//!
//! - [`io`] - Range reads over a local file
//! - [`mod@format`] - TIFF header, IFD chain and tag value parsing
//! - [`value`] - Decoded tag values and their literal forms
//! - [`report`] - Tag extraction and report writing
//! - [`launcher`] - Optional editor launch for the written report
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiff_tag_dump::{dump_tags, ExtractOptions, ReportFormat};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let pages = dump_tags("slide.svs", "slide.txt", ReportFormat::Text, &ExtractOptions::default())
//!         .await
//!         .expect("dump failed");
//!     println!("Wrote {} pages of tags", pages);
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod launcher;
pub mod report;
pub mod value;

// Re-export commonly used types
pub use config::Config;
pub use error::{IoError, LauncherError, ReportError, TiffError};
pub use format::tiff::{
    decode_value, tag_name, ByteOrder, FieldType, Ifd, IfdEntry, TiffDocument, TiffHeader, TiffTag,
    ValueReader, DEFAULT_MAX_PAGES,
};
pub use format::{detect_flavor, DocumentFlavor};
pub use io::{FileRangeReader, RangeReader};
pub use launcher::{open_report, EditorCommand, EditorLauncher, Launcher};
pub use report::{
    dump_tags, extract_tags, format_tag_line, read_pages, render_report, render_text, write_report,
    ExtractOptions, PageTags, ReportFormat,
};
pub use value::{Scalar, TagValue};
