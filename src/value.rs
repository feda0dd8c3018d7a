//! Tag value model.
//!
//! A tag value is decided once, when the entry is decoded: either a single
//! scalar or a flat sequence of scalars. Formatting never re-inspects the
//! raw TIFF field type.

use std::fmt;

use bytes::Bytes;
use serde::ser::{Serialize, SerializeSeq, Serializer};

// =============================================================================
// Scalar
// =============================================================================

/// A single decoded tag element.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// BYTE, SHORT, LONG, LONG8 and IFD offsets
    Unsigned(u64),

    /// SBYTE, SSHORT, SLONG, SLONG8
    Signed(i64),

    /// FLOAT (widened) and DOUBLE
    Float(f64),

    /// ASCII text
    Text(String),

    /// UNDEFINED data, kept opaque
    Bytes(Bytes),
}

impl Scalar {
    /// Unambiguous literal form: text is quoted, bytes are `b'..'`, numbers are bare.
    pub fn repr(&self) -> String {
        match self {
            Scalar::Text(s) => quote_text(s),
            other => other.to_string(),
        }
    }
}

/// Plain form, as used when joining offset lists: text is not quoted.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Unsigned(v) => write!(f, "{}", v),
            Scalar::Signed(v) => write!(f, "{}", v),
            Scalar::Float(v) => f.write_str(&format_float(*v)),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bytes(b) => f.write_str(&quote_bytes(b)),
        }
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Unsigned(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Signed(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Unsigned(v) => serializer.serialize_u64(*v),
            Scalar::Signed(v) => serializer.serialize_i64(*v),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Bytes(b) => serializer.serialize_bytes(b),
        }
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// The value of one tag on one page.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl TagValue {
    /// Whether this value is a sequence rather than a single scalar.
    pub fn is_sequence(&self) -> bool {
        matches!(self, TagValue::Sequence(_))
    }

    /// Unambiguous literal form.
    ///
    /// Sequences are parenthesized with `", "` separators; a one-element
    /// sequence keeps a trailing comma so it cannot be read as a scalar.
    pub fn repr(&self) -> String {
        match self {
            TagValue::Scalar(scalar) => scalar.repr(),
            TagValue::Sequence(items) if items.len() == 1 => format!("({},)", items[0].repr()),
            TagValue::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(Scalar::repr).collect();
                format!("({})", parts.join(", "))
            }
        }
    }
}

impl From<Scalar> for TagValue {
    fn from(value: Scalar) -> Self {
        TagValue::Scalar(value)
    }
}

macro_rules! tag_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TagValue {
                fn from(value: $ty) -> Self {
                    TagValue::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

tag_value_from!(u64, i64, f64, &str);

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Scalar(scalar) => scalar.serialize(serializer),
            TagValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

// =============================================================================
// Literal helpers
// =============================================================================

fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        // Debug keeps the decimal point and is shortest round-trip
        format!("{:?}", value)
    }
}

/// Quote text with single quotes, switching to double quotes when that
/// avoids escaping.
fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn quote_bytes(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7E => out.push(b as char),
            b => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push(quote as char);
    out
}

// =============================================================================
// Tests
// =============================================================================
