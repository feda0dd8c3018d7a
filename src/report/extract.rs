//! Tag extraction: file path in, ordered per-page tags out.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ReportError, TiffError};
use crate::format::detect_flavor;
use crate::format::tiff::{TiffDocument, DEFAULT_MAX_PAGES};
use crate::io::{FileRangeReader, RangeReader};

use super::page::PageTags;

/// Options for [`extract_tags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Upper bound on the number of pages read before the file is rejected
    pub max_pages: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Open `path` and read the tags of every page.
///
/// The file handle lives only for the duration of this call. Any open or
/// parse failure is returned as [`ReportError::UnreadableFile`]; there is no
/// partial result.
pub async fn extract_tags(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<Vec<PageTags>, ReportError> {
    let path = path.as_ref();
    let unreadable = |source: TiffError| ReportError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    };

    let reader = FileRangeReader::open(path)
        .await
        .map_err(|e| unreadable(e.into()))?;

    read_pages(&reader, options).await.map_err(unreadable)
}

/// Read the tags of every page through an already opened reader.
pub async fn read_pages<R: RangeReader>(
    reader: &R,
    options: &ExtractOptions,
) -> Result<Vec<PageTags>, TiffError> {
    let document = TiffDocument::parse(reader, options.max_pages).await?;
    let mut pages = Vec::with_capacity(document.page_count());

    for index in 0..document.page_count() {
        let tags = document.read_page_tags(reader, index).await?;

        if index == 0 {
            let flavor = detect_flavor(&document.header, &tags);
            info!(file = reader.identifier(), flavor = flavor.name(), "detected format");
        }

        let page = PageTags::new(index, tags);
        debug!(page = index, tags = page.len(), "read page tags");
        pages.push(page);
    }

    info!(
        file = reader.identifier(),
        pages = pages.len(),
        "extracted tags"
    );

    Ok(pages)
}
