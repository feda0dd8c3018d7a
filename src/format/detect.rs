//! Flavor detection for TIFF-family files.
//!
//! The flavor only affects log output; every flavor is dumped the same way.
//!
//! - **Aperio SVS**: "Aperio" in the first page's ImageDescription
//! - **BigTIFF**: version 43 header
//! - **TIFF**: everything else

use crate::value::{Scalar, TagValue};

use super::tiff::{TiffHeader, TiffTag};

/// Marker string for Aperio SVS format.
const APERIO_MARKER: &str = "Aperio";

/// Detected document flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFlavor {
    /// Aperio SVS (classic TIFF or BigTIFF container)
    AperioSvs,

    /// BigTIFF without a known vendor marker
    BigTiff,

    /// Classic TIFF without a known vendor marker
    Tiff,
}

impl DocumentFlavor {
    /// Get a human-readable name for the flavor.
    pub const fn name(&self) -> &'static str {
        match self {
            DocumentFlavor::AperioSvs => "Aperio SVS",
            DocumentFlavor::BigTiff => "BigTIFF",
            DocumentFlavor::Tiff => "TIFF",
        }
    }
}

/// Detect the flavor from the header and the decoded tags of the first page.
pub fn detect_flavor(header: &TiffHeader, first_page: &[(String, TagValue)]) -> DocumentFlavor {
    let description_name = TiffTag::ImageDescription.name();
    let is_aperio = first_page.iter().any(|(name, value)| {
        *name == description_name
            && matches!(value, TagValue::Scalar(Scalar::Text(text)) if contains_aperio_marker(text))
    });

    if is_aperio {
        DocumentFlavor::AperioSvs
    } else if header.is_bigtiff {
        DocumentFlavor::BigTiff
    } else {
        DocumentFlavor::Tiff
    }
}

/// Check if a description contains the Aperio marker (case-sensitive).
fn contains_aperio_marker(description: &str) -> bool {
    description.contains(APERIO_MARKER)
}
