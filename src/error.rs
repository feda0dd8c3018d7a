use std::path::PathBuf;

use thiserror::Error;

/// I/O errors that can occur when reading from the input file
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// File does not exist or cannot be opened
    #[error("File not found: {0}")]
    NotFound(String),

    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Any other read failure reported by the operating system
    #[error("Read error on {identifier}: {message}")]
    Read { identifier: String, message: String },
}

/// Errors that can occur when parsing TIFF files
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42 (TIFF) or 43 (BigTIFF), got {0}")]
    InvalidVersion(u16),

    /// Invalid BigTIFF offset byte size (must be 8)
    #[error("Invalid BigTIFF offset byte size: expected 8, got {0}")]
    InvalidBigTiffOffsetSize(u16),

    /// File is too small to contain a valid TIFF header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Invalid IFD offset (points outside file or to invalid location)
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// The next-IFD chain points back to an IFD that was already read
    #[error("Circular IFD chain: offset {0} was already visited")]
    CircularIfdChain(u64),

    /// The IFD chain is longer than the configured page limit
    #[error("Too many pages: file has more than {limit} IFDs")]
    TooManyPages { limit: usize },

    /// Tag value size does not fit in the address space or the file
    #[error("Value of tag {tag} is too large: {count} values of {type_size} bytes")]
    ValueTooLarge { tag: u16, count: u64, type_size: usize },
}

/// Errors surfaced by the extract and write steps.
///
/// Both are fatal: the report is either produced completely or not at all.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input could not be opened or parsed as a TIFF-family file
    #[error("Cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: TiffError,
    },

    /// Output could not be created, serialized or written
    #[error("Cannot write report to {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Errors from the optional editor launch.
///
/// These are logged and never change the outcome of a run.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// No editor command could be resolved
    #[error("No editor configured")]
    NoEditor,

    /// The editor process could not be spawned
    #[error("Failed to launch {program}: {message}")]
    Spawn { program: String, message: String },

    /// A waited-on editor exited unsuccessfully
    #[error("{program} exited with {status}")]
    Exited { program: String, status: String },
}
