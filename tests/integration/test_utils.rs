//! Test utilities for integration tests.
//!
//! This module provides a builder for synthesizing TIFF files with arbitrary
//! tags in either byte order, as classic TIFF or BigTIFF.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

// =============================================================================
// Entry Values
// =============================================================================

/// A typed tag value, encoded by the builder in the file's byte order.
#[derive(Debug, Clone)]
pub enum EntryValue {
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SShort(Vec<i16>),
    Undefined(Vec<u8>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Long8(Vec<u64>),
    /// Arbitrary field type code with pre-encoded bytes
    Raw {
        field_type: u16,
        count: u64,
        bytes: Vec<u8>,
    },
}

impl EntryValue {
    /// Field type code, element count and encoded bytes.
    fn encode(&self, order: ByteOrderType) -> (u16, u64, Vec<u8>) {
        let mut out = Vec::new();
        match self {
            EntryValue::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u64, bytes)
            }
            EntryValue::Short(v) => {
                for x in v {
                    write_value(&mut out, order, *x as u64, 2);
                }
                (3, v.len() as u64, out)
            }
            EntryValue::Long(v) => {
                for x in v {
                    write_value(&mut out, order, *x as u64, 4);
                }
                (4, v.len() as u64, out)
            }
            EntryValue::Rational(v) => {
                for (num, den) in v {
                    write_value(&mut out, order, *num as u64, 4);
                    write_value(&mut out, order, *den as u64, 4);
                }
                (5, v.len() as u64, out)
            }
            EntryValue::SShort(v) => {
                for x in v {
                    write_value(&mut out, order, *x as u16 as u64, 2);
                }
                (8, v.len() as u64, out)
            }
            EntryValue::Undefined(v) => (7, v.len() as u64, v.clone()),
            EntryValue::Float(v) => {
                for x in v {
                    write_value(&mut out, order, x.to_bits() as u64, 4);
                }
                (11, v.len() as u64, out)
            }
            EntryValue::Double(v) => {
                for x in v {
                    write_value(&mut out, order, x.to_bits(), 8);
                }
                (12, v.len() as u64, out)
            }
            EntryValue::Long8(v) => {
                for x in v {
                    write_value(&mut out, order, *x, 8);
                }
                (16, v.len() as u64, out)
            }
            EntryValue::Raw {
                field_type,
                count,
                bytes,
            } => (*field_type, *count, bytes.clone()),
        }
    }
}

// =============================================================================
// TIFF File Builders
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// Builder for creating test TIFF files.
///
/// Each IFD is written directly after the previous one's out-of-line values,
/// which follow the IFD itself.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    is_bigtiff: bool,
    ifds: Vec<IfdBuilder>,
    loop_to_first: bool,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            is_bigtiff: false,
            ifds: Vec::new(),
            loop_to_first: false,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn with_bigtiff(mut self, is_bigtiff: bool) -> Self {
        self.is_bigtiff = is_bigtiff;
        self
    }

    pub fn add_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.ifds.push(ifd);
        self
    }

    /// Make the last IFD's next pointer point back at the first IFD.
    pub fn with_loop_to_first(mut self) -> Self {
        self.loop_to_first = true;
        self
    }

    fn header_size(&self) -> u64 {
        if self.is_bigtiff {
            16
        } else {
            8
        }
    }

    /// Build the TIFF file data.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;
        let mut data = Vec::new();

        match order {
            ByteOrderType::LittleEndian => data.extend_from_slice(b"II"),
            ByteOrderType::BigEndian => data.extend_from_slice(b"MM"),
        }

        let first_ifd = if self.ifds.is_empty() {
            0
        } else {
            self.header_size()
        };

        if self.is_bigtiff {
            write_value(&mut data, order, 43, 2); // BigTIFF version
            write_value(&mut data, order, 8, 2); // Offset size
            write_value(&mut data, order, 0, 2); // Reserved
            write_value(&mut data, order, first_ifd, 8);
        } else {
            write_value(&mut data, order, 42, 2); // Classic TIFF version
            write_value(&mut data, order, first_ifd, 4);
        }

        for (idx, ifd) in self.ifds.iter().enumerate() {
            let start = data.len() as u64;
            let next = if idx + 1 < self.ifds.len() {
                start + ifd.total_size(order, self.is_bigtiff)
            } else if self.loop_to_first {
                first_ifd
            } else {
                0
            };
            ifd.write_to(&mut data, order, self.is_bigtiff, next);
        }

        data
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the entries of one IFD.
///
/// Entries are written in insertion order.
#[derive(Debug, Clone, Default)]
pub struct IfdBuilder {
    entries: Vec<(u16, EntryValue)>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag entry.
    pub fn add_entry(&mut self, tag: u16, value: EntryValue) -> &mut Self {
        self.entries.push((tag, value));
        self
    }

    fn entry_layout(is_bigtiff: bool) -> (u64, u64, usize) {
        // (count field size, entry size, inline value size)
        if is_bigtiff {
            (8, 20, 8)
        } else {
            (2, 12, 4)
        }
    }

    fn table_size(&self, is_bigtiff: bool) -> u64 {
        let (count_size, entry_size, inline_size) = Self::entry_layout(is_bigtiff);
        count_size + self.entries.len() as u64 * entry_size + inline_size as u64
    }

    /// Size of the IFD table plus its out-of-line values.
    fn total_size(&self, order: ByteOrderType, is_bigtiff: bool) -> u64 {
        let (_, _, inline_size) = Self::entry_layout(is_bigtiff);
        let external: u64 = self
            .entries
            .iter()
            .map(|(_, value)| value.encode(order).2.len())
            .filter(|&len| len > inline_size)
            .map(|len| len as u64)
            .sum();
        self.table_size(is_bigtiff) + external
    }

    fn write_to(&self, data: &mut Vec<u8>, order: ByteOrderType, is_bigtiff: bool, next: u64) {
        let (count_size, _, inline_size) = Self::entry_layout(is_bigtiff);
        let start = data.len() as u64;
        let mut external_offset = start + self.table_size(is_bigtiff);
        let mut external = Vec::new();

        write_value(data, order, self.entries.len() as u64, count_size as usize);

        for (tag, value) in &self.entries {
            let (field_type, count, bytes) = value.encode(order);
            write_value(data, order, *tag as u64, 2);
            write_value(data, order, field_type as u64, 2);
            write_value(data, order, count, inline_size);

            if bytes.len() <= inline_size {
                // Inline values are left-justified in the value field
                data.extend_from_slice(&bytes);
                data.extend(std::iter::repeat(0).take(inline_size - bytes.len()));
            } else {
                write_value(data, order, external_offset, inline_size);
                external_offset += bytes.len() as u64;
                external.extend_from_slice(&bytes);
            }
        }

        write_value(data, order, next, inline_size);
        data.extend(external);
    }
}

fn write_value(data: &mut Vec<u8>, byte_order: ByteOrderType, value: u64, size: usize) {
    match byte_order {
        ByteOrderType::LittleEndian => match size {
            1 => data.push(value as u8),
            2 => data.extend(&(value as u16).to_le_bytes()),
            4 => data.extend(&(value as u32).to_le_bytes()),
            8 => data.extend(&value.to_le_bytes()),
            _ => {}
        },
        ByteOrderType::BigEndian => match size {
            1 => data.push(value as u8),
            2 => data.extend(&(value as u16).to_be_bytes()),
            4 => data.extend(&(value as u32).to_be_bytes()),
            8 => data.extend(&value.to_be_bytes()),
            _ => {}
        },
    }
}

// =============================================================================
// Ready-made Files
// =============================================================================

/// The two-page file: page 0 has ImageWidth=100 and three StripOffsets,
/// page 1 has ImageWidth=200.
pub fn two_page_tiff(order: ByteOrderType, is_bigtiff: bool) -> Vec<u8> {
    let mut page0 = IfdBuilder::new();
    page0
        .add_entry(256, EntryValue::Short(vec![100]))
        .add_entry(273, EntryValue::Long(vec![10, 20, 30]));

    let mut page1 = IfdBuilder::new();
    page1.add_entry(256, EntryValue::Short(vec![200]));

    TiffBuilder::new()
        .with_byte_order(order)
        .with_bigtiff(is_bigtiff)
        .add_ifd(page0)
        .add_ifd(page1)
        .build()
}

/// A single-page file carrying one entry of every common field type.
pub fn rich_tiff(order: ByteOrderType, is_bigtiff: bool) -> Vec<u8> {
    let mut page = IfdBuilder::new();
    page.add_entry(256, EntryValue::Long(vec![46000]))
        .add_entry(257, EntryValue::Long(vec![32914]))
        .add_entry(258, EntryValue::Short(vec![8, 8, 8]))
        .add_entry(259, EntryValue::Short(vec![7]))
        .add_entry(270, EntryValue::Ascii("Aperio Image Library v11.2.1".to_string()))
        .add_entry(282, EntryValue::Rational(vec![(72, 1)]))
        .add_entry(305, EntryValue::Ascii("it's tifffile".to_string()))
        .add_entry(322, EntryValue::Short(vec![256]))
        .add_entry(324, EntryValue::Long8(vec![1000, 2000]))
        .add_entry(347, EntryValue::Undefined(vec![0xFF, 0xD8, b'A', 0xFF, 0xD9]))
        .add_entry(33550, EntryValue::Double(vec![0.25, 0.25, 0.0]))
        .add_entry(65000, EntryValue::SShort(vec![-3]))
        .add_entry(65001, EntryValue::Float(vec![1.5]));

    TiffBuilder::new()
        .with_byte_order(order)
        .with_bigtiff(is_bigtiff)
        .add_ifd(page)
        .build()
}

// =============================================================================
// Files on Disk
// =============================================================================

/// A temporary directory holding one input file.
pub struct TestDir {
    pub dir: TempDir,
    pub input: PathBuf,
}

impl TestDir {
    /// Write `data` as `name` into a fresh temporary directory.
    pub fn with_file(name: &str, data: &[u8]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = dir.path().join(name);
        let mut file = std::fs::File::create(&input).expect("create input file");
        file.write_all(data).expect("write input file");
        Self { dir, input }
    }

    /// Path for a file inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
