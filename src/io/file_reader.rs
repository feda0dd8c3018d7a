use std::io::{ErrorKind, SeekFrom};
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Mutex;
use tracing::debug;

use super::RangeReader;
use crate::error::IoError;

/// Local file implementation of RangeReader.
///
/// The file size is read once on open. Reads seek and fill under a mutex so
/// a single handle can serve every range request. The handle is closed when
/// the reader is dropped.
pub struct FileRangeReader {
    file: Mutex<File>,
    size: u64,
    identifier: String,
}

impl FileRangeReader {
    /// Open `path` for range reads.
    ///
    /// Returns `IoError::NotFound` if the file does not exist, and
    /// `IoError::Read` for any other failure (permissions, directories, ...).
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let identifier = path.display().to_string();

        let file = File::open(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                IoError::NotFound(identifier.clone())
            } else {
                IoError::Read {
                    identifier: identifier.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let metadata = file.metadata().await.map_err(|e| IoError::Read {
            identifier: identifier.clone(),
            message: e.to_string(),
        })?;

        if metadata.is_dir() {
            return Err(IoError::Read {
                identifier,
                message: "is a directory".to_string(),
            });
        }

        debug!(file = %identifier, size = metadata.len(), "opened input file");

        Ok(Self {
            file: Mutex::new(file),
            size: metadata.len(),
            identifier,
        })
    }

    fn read_error(&self, e: std::io::Error) -> IoError {
        IoError::Read {
            identifier: self.identifier.clone(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl RangeReader for FileRangeReader {
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        // Validate before allocating: corrupt counts can ask for huge buffers
        let end = offset.checked_add(len as u64);
        if end.map_or(true, |end| end > self.size) {
            return Err(IoError::RangeOutOfBounds {
                offset,
                requested: len as u64,
                size: self.size,
            });
        }

        let mut buf = vec![0u8; len];
        let mut file = self.file.lock().await;
        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(|e| self.read_error(e))?;
        file.read_exact(&mut buf)
            .await
            .map_err(|e| self.read_error(e))?;

        Ok(Bytes::from(buf))
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
