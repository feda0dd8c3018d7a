//! Whole-document parsing: the header plus every IFD in the main chain.
//!
//! Each IFD in the chain is one page. SubIFDs (reduced-resolution images
//! hung off a page through the SubIFDs tag) are not followed; their offsets
//! are reported as the value of that tag.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::TiffError;
use crate::io::RangeReader;
use crate::value::TagValue;

use super::parser::{Ifd, TiffHeader, BIGTIFF_HEADER_SIZE};
use super::tags::tag_name;
use super::values::ValueReader;

/// Default upper bound on the number of IFDs read from one file.
pub const DEFAULT_MAX_PAGES: usize = 4096;

/// A parsed TIFF document.
#[derive(Debug, Clone)]
pub struct TiffDocument {
    /// The TIFF header
    pub header: TiffHeader,

    /// IFDs in chain order; index = page number
    pub pages: Vec<Ifd>,
}

impl TiffDocument {
    /// Parse the header and walk the IFD chain.
    ///
    /// Fails if the chain loops, runs outside the file, or is longer than
    /// `max_pages`.
    pub async fn parse<R: RangeReader>(reader: &R, max_pages: usize) -> Result<Self, TiffError> {
        let header_bytes = reader.read_at_most(0, BIGTIFF_HEADER_SIZE).await?;
        let header = TiffHeader::parse(&header_bytes, reader.size())?;

        debug!(
            file = reader.identifier(),
            byte_order = header.byte_order.label(),
            bigtiff = header.is_bigtiff,
            first_ifd = header.first_ifd_offset,
            "parsed TIFF header"
        );

        let pages = Self::parse_all_ifds(reader, &header, max_pages).await?;

        Ok(TiffDocument { header, pages })
    }

    /// Parse all IFDs in the file following the next-IFD chain.
    async fn parse_all_ifds<R: RangeReader>(
        reader: &R,
        header: &TiffHeader,
        max_pages: usize,
    ) -> Result<Vec<Ifd>, TiffError> {
        let mut ifds = Vec::new();
        let mut visited = HashSet::new();
        let mut offset = header.first_ifd_offset;

        while offset != 0 {
            if !visited.insert(offset) {
                return Err(TiffError::CircularIfdChain(offset));
            }
            if ifds.len() >= max_pages {
                return Err(TiffError::TooManyPages { limit: max_pages });
            }
            if offset >= reader.size() {
                return Err(TiffError::InvalidIfdOffset(offset));
            }

            // Read just the entry count first, then the whole IFD
            let count_bytes = reader
                .read_exact_at(offset, header.ifd_count_size())
                .await?;
            let entry_count = header.read_count(&count_bytes);

            let ifd_size = Ifd::calculate_size(entry_count, header)
                .filter(|&size| size as u64 <= reader.size())
                .ok_or(TiffError::InvalidIfdOffset(offset))?;
            let ifd_bytes = reader.read_exact_at(offset, ifd_size).await?;
            let ifd = Ifd::parse(&ifd_bytes, header)?;

            debug!(
                page = ifds.len(),
                offset,
                entries = ifd.entries.len(),
                "parsed IFD"
            );

            offset = ifd.next_ifd_offset;
            ifds.push(ifd);
        }

        Ok(ifds)
    }

    /// Number of pages (IFDs) in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Read every decodable tag of one page, in IFD order.
    ///
    /// Entries with an unknown field type are skipped with a warning.
    pub async fn read_page_tags<R: RangeReader>(
        &self,
        reader: &R,
        page: usize,
    ) -> Result<Vec<(String, TagValue)>, TiffError> {
        let Some(ifd) = self.pages.get(page) else {
            return Ok(Vec::new());
        };

        let values = ValueReader::new(reader, &self.header);
        let mut tags = Vec::with_capacity(ifd.entries.len());

        for entry in &ifd.entries {
            match values.read_value(entry).await? {
                Some(value) => tags.push((tag_name(entry.tag_id).into_owned(), value)),
                None => warn!(
                    page,
                    tag = entry.tag_id,
                    field_type = entry.field_type_raw,
                    "skipping tag with unknown field type"
                ),
            }
        }

        Ok(tags)
    }
}
