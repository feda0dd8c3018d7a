//! TIFF tag value reading.
//!
//! Values are stored either inline in the IFD entry (when they fit in the
//! 4/8-byte value field) or at an offset in the file. Each value is fetched
//! with a single range read and then decoded into a [`TagValue`].
//!
//! # Decoding rules
//!
//! - ASCII becomes text, cut at the first NUL
//! - UNDEFINED stays opaque bytes
//! - RATIONAL / SRATIONAL become flattened (numerator, denominator) pairs
//! - every other type becomes a scalar when count is 1, a sequence otherwise

use bytes::Bytes;

use crate::error::TiffError;
use crate::io::RangeReader;
use crate::value::{Scalar, TagValue};

use super::parser::{ByteOrder, IfdEntry, TiffHeader};
use super::tags::FieldType;

// =============================================================================
// ValueReader
// =============================================================================

/// Reads tag values from a TIFF file.
///
/// Combines a RangeReader with the header so values are read with the file's
/// byte order and entry layout.
pub struct ValueReader<'a, R: RangeReader> {
    reader: &'a R,
    header: &'a TiffHeader,
}

impl<'a, R: RangeReader> ValueReader<'a, R> {
    /// Create a new ValueReader.
    pub fn new(reader: &'a R, header: &'a TiffHeader) -> Self {
        Self { reader, header }
    }

    /// Read raw bytes for an IFD entry's value, interpreted as `field_type`.
    ///
    /// For inline values, returns the bytes from the entry.
    /// For offset values, fetches the bytes from the file.
    pub async fn read_bytes(
        &self,
        entry: &IfdEntry,
        field_type: FieldType,
    ) -> Result<Bytes, TiffError> {
        let too_large = || TiffError::ValueTooLarge {
            tag: entry.tag_id,
            count: entry.count,
            type_size: field_type.size_in_bytes(),
        };

        let size = entry.value_byte_size().ok_or_else(too_large)?;
        if size > self.reader.size() {
            return Err(too_large());
        }
        let size = usize::try_from(size).map_err(|_| too_large())?;

        if entry.is_inline {
            Ok(Bytes::copy_from_slice(&entry.value_offset_bytes[..size]))
        } else {
            let offset = entry.value_offset(self.header.byte_order);
            Ok(self.reader.read_exact_at(offset, size).await?)
        }
    }

    /// Read and decode an entry's value.
    ///
    /// Returns `Ok(None)` when the entry's field type is unknown, since its
    /// element size (and so its value) cannot be determined.
    pub async fn read_value(&self, entry: &IfdEntry) -> Result<Option<TagValue>, TiffError> {
        let Some(field_type) = entry.field_type else {
            return Ok(None);
        };

        let bytes = self.read_bytes(entry, field_type).await?;
        Ok(Some(decode_value(&bytes, field_type, self.header.byte_order)))
    }
}

// =============================================================================
// Decoding from bytes
// =============================================================================

/// Decode the raw bytes of a value.
///
/// The element count is derived from the byte length, so `bytes` must be
/// exactly the value's bytes (inline padding already removed).
pub fn decode_value(bytes: &[u8], field_type: FieldType, byte_order: ByteOrder) -> TagValue {
    match field_type {
        FieldType::Ascii => TagValue::Scalar(Scalar::Text(decode_ascii(bytes))),
        FieldType::Undefined => TagValue::Scalar(Scalar::Bytes(Bytes::copy_from_slice(bytes))),
        FieldType::Rational | FieldType::SRational => {
            // Two 4-byte halves per element; never collapsed to a scalar
            TagValue::Sequence(decode_elements(bytes, field_type, byte_order, 4))
        }
        _ => {
            let mut elements =
                decode_elements(bytes, field_type, byte_order, field_type.size_in_bytes());
            if elements.len() == 1 {
                TagValue::Scalar(elements.remove(0))
            } else {
                TagValue::Sequence(elements)
            }
        }
    }
}

fn decode_elements(
    bytes: &[u8],
    field_type: FieldType,
    byte_order: ByteOrder,
    element_size: usize,
) -> Vec<Scalar> {
    bytes
        .chunks_exact(element_size)
        .map(|chunk| decode_scalar(chunk, field_type, byte_order))
        .collect()
}

fn decode_scalar(chunk: &[u8], field_type: FieldType, byte_order: ByteOrder) -> Scalar {
    match field_type {
        FieldType::Byte => Scalar::Unsigned(chunk[0] as u64),
        FieldType::SByte => Scalar::Signed(chunk[0] as i8 as i64),
        FieldType::Short => Scalar::Unsigned(byte_order.read_u16(chunk) as u64),
        FieldType::SShort => Scalar::Signed(byte_order.read_i16(chunk) as i64),
        FieldType::Long | FieldType::Ifd | FieldType::Rational => {
            Scalar::Unsigned(byte_order.read_u32(chunk) as u64)
        }
        FieldType::SLong | FieldType::SRational => {
            Scalar::Signed(byte_order.read_i32(chunk) as i64)
        }
        FieldType::Long8 | FieldType::Ifd8 => Scalar::Unsigned(byte_order.read_u64(chunk)),
        FieldType::SLong8 => Scalar::Signed(byte_order.read_i64(chunk)),
        FieldType::Float => Scalar::Float(byte_order.read_f32(chunk) as f64),
        FieldType::Double => Scalar::Float(byte_order.read_f64(chunk)),
        FieldType::Ascii => Scalar::Text(decode_ascii(chunk)),
        FieldType::Undefined => Scalar::Bytes(Bytes::copy_from_slice(chunk)),
    }
}

/// Text up to the first NUL, with invalid UTF-8 replaced.
fn decode_ascii(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

// =============================================================================
// Tests
// =============================================================================
