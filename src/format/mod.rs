//! Format parsers for TIFF-family files.
//!
//! [`tiff`] reads the header, walks the IFD chain and decodes tag values.
//! [`detect`] classifies the document (Aperio SVS, BigTIFF, TIFF) for logging.

pub mod detect;
pub mod tiff;

pub use detect::{detect_flavor, DocumentFlavor};
