use async_trait::async_trait;
use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from a file-like resource.
///
/// The TIFF parser only ever asks for small, absolute ranges (headers, IFDs,
/// out-of-line tag values), so it never needs the whole file in memory.
#[async_trait]
pub trait RangeReader: Send + Sync {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds or if the read fails.
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the resource in bytes.
    fn size(&self) -> u64;

    /// Get an identifier for this resource, used in log lines.
    fn identifier(&self) -> &str;

    /// Read up to `len` bytes from `offset`, stopping at the end of the resource.
    ///
    /// Used for headers, where a tiny classic TIFF can be shorter than the
    /// BigTIFF header size.
    async fn read_at_most(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let available = self.size().saturating_sub(offset);
        let len = len.min(usize::try_from(available).unwrap_or(usize::MAX));
        if len == 0 {
            return Ok(Bytes::new());
        }
        self.read_exact_at(offset, len).await
    }
}
