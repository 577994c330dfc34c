//! Typed directory fields
//!
//! A directory record names a tag, a field type and a value count. The value
//! either sits in the record's slot or, when it is too large for the slot,
//! somewhere else in the file. Parsing resolves both cases up front and keeps
//! the decoded values in a [`FieldValue`], so the accessors below are a single
//! match on the variant.

use std::fmt;

use log::{debug, trace};

use crate::io::byte_order::ByteOrder;
use crate::io::source::RandomAccessSource;
use crate::tiff::constants::field_types;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::header::FileHeader;
use crate::utils::{string_utils, tag_utils};

/// TIFF field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Long8,
    SLong8,
    Ifd8,
}

impl FieldType {
    /// Maps a numeric type code to a field type
    pub fn from_code(code: u16) -> Option<Self> {
        let field_type = match code {
            field_types::BYTE => FieldType::Byte,
            field_types::ASCII => FieldType::Ascii,
            field_types::SHORT => FieldType::Short,
            field_types::LONG => FieldType::Long,
            field_types::RATIONAL => FieldType::Rational,
            field_types::SBYTE => FieldType::SByte,
            field_types::UNDEFINED => FieldType::Undefined,
            field_types::SSHORT => FieldType::SShort,
            field_types::SLONG => FieldType::SLong,
            field_types::SRATIONAL => FieldType::SRational,
            field_types::FLOAT => FieldType::Float,
            field_types::DOUBLE => FieldType::Double,
            field_types::LONG8 => FieldType::Long8,
            field_types::SLONG8 => FieldType::SLong8,
            field_types::IFD8 => FieldType::Ifd8,
            _ => return None,
        };
        Some(field_type)
    }

    pub fn code(&self) -> u16 {
        match self {
            FieldType::Byte => field_types::BYTE,
            FieldType::Ascii => field_types::ASCII,
            FieldType::Short => field_types::SHORT,
            FieldType::Long => field_types::LONG,
            FieldType::Rational => field_types::RATIONAL,
            FieldType::SByte => field_types::SBYTE,
            FieldType::Undefined => field_types::UNDEFINED,
            FieldType::SShort => field_types::SSHORT,
            FieldType::SLong => field_types::SLONG,
            FieldType::SRational => field_types::SRATIONAL,
            FieldType::Float => field_types::FLOAT,
            FieldType::Double => field_types::DOUBLE,
            FieldType::Long8 => field_types::LONG8,
            FieldType::SLong8 => field_types::SLONG8,
            FieldType::Ifd8 => field_types::IFD8,
        }
    }

    /// Bytes occupied by one value of this type
    ///
    /// UNDEFINED is counted as 8 bytes per value.
    pub fn width(&self) -> usize {
        match self {
            FieldType::Byte | FieldType::SByte | FieldType::Ascii => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double | FieldType::Undefined => 8,
            FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        tag_utils::get_field_type_name(self.code())
    }
}

/// Decoded values of a field, one variant per field type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Byte(Vec<u8>),
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Long8(Vec<u64>),
    SLong8(Vec<i64>),
    Ifd8(Vec<u64>),
}

/// Splits `bytes` into `width`-sized chunks and decodes each one
fn decode_each<T>(bytes: &[u8], width: usize, decode: impl Fn(&[u8]) -> T) -> Vec<T> {
    bytes.chunks_exact(width).map(decode).collect()
}

impl FieldValue {
    /// Decodes the raw value bytes of a field
    ///
    /// # Arguments
    /// * `field_type` - Type of every value
    /// * `bytes` - Exactly `count * field_type.width()` bytes
    /// * `byte_order` - Byte order of the file
    pub fn decode(field_type: FieldType, bytes: &[u8], byte_order: ByteOrder) -> Self {
        let h = byte_order.handler();
        let w = field_type.width();

        match field_type {
            FieldType::Byte => FieldValue::Byte(bytes.to_vec()),
            FieldType::Undefined => FieldValue::Undefined(bytes.to_vec()),
            FieldType::SByte => FieldValue::SByte(bytes.iter().map(|&b| b as i8).collect()),
            FieldType::Ascii => {
                let mut text = bytes.to_vec();
                string_utils::trim_trailing_nulls(&mut text);
                FieldValue::Ascii(String::from_utf8_lossy(&text).into_owned())
            }
            FieldType::Short => FieldValue::Short(decode_each(bytes, w, |b| h.read_u16(b))),
            FieldType::SShort => FieldValue::SShort(decode_each(bytes, w, |b| h.read_i16(b))),
            FieldType::Long => FieldValue::Long(decode_each(bytes, w, |b| h.read_u32(b))),
            FieldType::SLong => FieldValue::SLong(decode_each(bytes, w, |b| h.read_i32(b))),
            FieldType::Rational => FieldValue::Rational(decode_each(bytes, w, |b| h.read_rational(b))),
            FieldType::SRational => FieldValue::SRational(decode_each(bytes, w, |b| h.read_srational(b))),
            FieldType::Float => FieldValue::Float(decode_each(bytes, w, |b| h.read_f32(b))),
            FieldType::Double => FieldValue::Double(decode_each(bytes, w, |b| h.read_f64(b))),
            FieldType::Long8 => FieldValue::Long8(decode_each(bytes, w, |b| h.read_u64(b))),
            FieldType::SLong8 => FieldValue::SLong8(decode_each(bytes, w, |b| h.read_i64(b))),
            FieldType::Ifd8 => FieldValue::Ifd8(decode_each(bytes, w, |b| h.read_u64(b))),
        }
    }

    /// Name of the field type held by this value
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Byte(_) => "BYTE",
            FieldValue::Ascii(_) => "ASCII",
            FieldValue::Short(_) => "SHORT",
            FieldValue::Long(_) => "LONG",
            FieldValue::Rational(_) => "RATIONAL",
            FieldValue::SByte(_) => "SBYTE",
            FieldValue::Undefined(_) => "UNDEFINED",
            FieldValue::SShort(_) => "SSHORT",
            FieldValue::SLong(_) => "SLONG",
            FieldValue::SRational(_) => "SRATIONAL",
            FieldValue::Float(_) => "FLOAT",
            FieldValue::Double(_) => "DOUBLE",
            FieldValue::Long8(_) => "LONG8",
            FieldValue::SLong8(_) => "SLONG8",
            FieldValue::Ifd8(_) => "IFD8",
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    const SHOWN: usize = 8;
    if values.len() == 1 {
        return write!(f, "{}", values[0]);
    }

    write!(f, "[")?;
    for (i, v) in values.iter().take(SHOWN).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    if values.len() > SHOWN {
        write!(f, ", ... ({} total)", values.len())?;
    }
    write!(f, "]")
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Ascii(s) => write!(f, "\"{}\"", s),
            FieldValue::Byte(v) | FieldValue::Undefined(v) => write_list(f, v),
            FieldValue::SByte(v) => write_list(f, v),
            FieldValue::Short(v) => write_list(f, v),
            FieldValue::SShort(v) => write_list(f, v),
            FieldValue::Long(v) => write_list(f, v),
            FieldValue::SLong(v) => write_list(f, v),
            FieldValue::Float(v) => write_list(f, v),
            FieldValue::Double(v) => write_list(f, v),
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => write_list(f, v),
            FieldValue::SLong8(v) => write_list(f, v),
            FieldValue::Rational(v) => {
                let shown: Vec<String> = v.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
                write_list(f, &shown)
            }
            FieldValue::SRational(v) => {
                let shown: Vec<String> = v.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
                write_list(f, &shown)
            }
        }
    }
}

/// Where a field's value bytes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStorage {
    /// Packed into the record's value slot
    Inline,
    /// Read from this file offset
    OutOfLine(u64),
}

/// One parsed directory record
#[derive(Debug, Clone, PartialEq)]
pub struct TypedField {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: FieldType,
    /// Number of values
    pub count: u64,
    /// Raw value slot read as an unsigned integer
    pub value_offset: u64,
    /// Inline or out-of-line
    pub storage: ValueStorage,
    /// Decoded values
    pub value: FieldValue,
}

impl TypedField {
    /// Parses one directory record and resolves its value
    ///
    /// # Arguments
    /// * `record` - The 12 or 20 record bytes
    /// * `header` - File header, for byte order and slot widths
    /// * `source` - The file, for out-of-line values
    ///
    /// # Returns
    /// The field, or `InvalidFieldSize` for an unknown type or a zero-sized value
    pub fn parse(record: &[u8], header: &FileHeader, source: &dyn RandomAccessSource) -> TiffResult<Self> {
        let byte_order = header.byte_order;
        let variant = header.variant();
        let slot_width = variant.offset_size();

        let tag = byte_order.read_u16(&record[0..2]);
        let type_code = byte_order.read_u16(&record[2..4]);
        let count = byte_order.read_uint(&record[4..4 + slot_width], slot_width)?;
        let slot = &record[4 + slot_width..4 + 2 * slot_width];
        let value_offset = byte_order.read_uint(slot, slot_width)?;

        let invalid_size = || TiffError::InvalidFieldSize { tag, field_type: type_code, count };

        let field_type = FieldType::from_code(type_code).ok_or_else(invalid_size)?;
        let size = count
            .checked_mul(field_type.width() as u64)
            .filter(|&size| size > 0)
            .ok_or_else(invalid_size)?;

        let (storage, bytes) = if size <= variant.inline_capacity() as u64 {
            (ValueStorage::Inline, slot[..size as usize].to_vec())
        } else {
            trace!("Tag {} value of {} bytes stored at offset {}", tag, size, value_offset);
            (ValueStorage::OutOfLine(value_offset), source.read_bytes(value_offset, size)?)
        };

        let value = FieldValue::decode(field_type, &bytes, byte_order);

        debug!("Parsed field: tag={} ({}), type={}, count={}, value={}",
               tag, tag_utils::get_tag_name(tag), field_type.name(), count, value);

        Ok(TypedField {
            tag,
            field_type,
            count,
            value_offset,
            storage,
            value,
        })
    }

    pub fn is_inline(&self) -> bool {
        self.storage == ValueStorage::Inline
    }

    fn mismatch(&self, expected: &'static str) -> TiffError {
        TiffError::TypeMismatch {
            tag: self.tag,
            expected,
            actual: self.value.type_name(),
        }
    }

    fn ensure_scalar(&self) -> TiffResult<()> {
        if self.count != 1 {
            return Err(TiffError::NotAScalar { tag: self.tag, count: self.count });
        }
        Ok(())
    }

    /// Single SHORT value
    pub fn as_short(&self) -> TiffResult<u16> {
        self.ensure_scalar()?;
        Ok(self.as_shorts()?[0])
    }

    /// All SHORT values
    pub fn as_shorts(&self) -> TiffResult<&[u16]> {
        match &self.value {
            FieldValue::Short(v) => Ok(v),
            _ => Err(self.mismatch("SHORT")),
        }
    }

    /// Single unsigned integer from a SHORT, LONG, LONG8 or IFD8 field
    pub fn as_long(&self) -> TiffResult<u64> {
        self.ensure_scalar()?;
        Ok(self.as_longs()?[0])
    }

    /// All values of a SHORT, LONG, LONG8 or IFD8 field widened to u64
    pub fn as_longs(&self) -> TiffResult<Vec<u64>> {
        match &self.value {
            FieldValue::Short(v) => Ok(v.iter().map(|&x| x as u64).collect()),
            FieldValue::Long(v) => Ok(v.iter().map(|&x| x as u64).collect()),
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => Ok(v.clone()),
            _ => Err(self.mismatch("LONG")),
        }
    }

    /// Text of an ASCII field without trailing NULs
    pub fn as_ascii(&self) -> TiffResult<&str> {
        match &self.value {
            FieldValue::Ascii(s) => Ok(s),
            _ => Err(self.mismatch("ASCII")),
        }
    }

    /// Single RATIONAL or SRATIONAL value as numerator / denominator
    pub fn as_rational(&self) -> TiffResult<f64> {
        self.ensure_scalar()?;
        Ok(self.as_rationals()?[0])
    }

    pub fn as_rationals(&self) -> TiffResult<Vec<f64>> {
        match &self.value {
            FieldValue::Rational(v) => Ok(v.iter().map(|&(n, d)| n as f64 / d as f64).collect()),
            FieldValue::SRational(v) => Ok(v.iter().map(|&(n, d)| n as f64 / d as f64).collect()),
            _ => Err(self.mismatch("RATIONAL")),
        }
    }

    /// Single FLOAT value
    pub fn as_float(&self) -> TiffResult<f32> {
        self.ensure_scalar()?;
        Ok(self.as_floats()?[0])
    }

    pub fn as_floats(&self) -> TiffResult<&[f32]> {
        match &self.value {
            FieldValue::Float(v) => Ok(v),
            _ => Err(self.mismatch("FLOAT")),
        }
    }

    /// Single numeric value coerced to f64
    ///
    /// Accepts SHORT, SSHORT, LONG, SLONG, FLOAT and DOUBLE fields.
    pub fn as_double(&self) -> TiffResult<f64> {
        self.ensure_scalar()?;
        match &self.value {
            FieldValue::Short(v) => Ok(v[0] as f64),
            FieldValue::SShort(v) => Ok(v[0] as f64),
            FieldValue::Long(v) => Ok(v[0] as f64),
            FieldValue::SLong(v) => Ok(v[0] as f64),
            FieldValue::Float(v) => Ok(v[0] as f64),
            FieldValue::Double(v) => Ok(v[0]),
            _ => Err(self.mismatch("DOUBLE")),
        }
    }

    pub fn as_doubles(&self) -> TiffResult<&[f64]> {
        match &self.value {
            FieldValue::Double(v) => Ok(v),
            _ => Err(self.mismatch("DOUBLE")),
        }
    }

    /// Raw bytes of a BYTE or UNDEFINED field
    pub fn as_bytes(&self) -> TiffResult<&[u8]> {
        match &self.value {
            FieldValue::Byte(v) | FieldValue::Undefined(v) => Ok(v),
            _ => Err(self.mismatch("BYTE")),
        }
    }

    /// Returns a human-readable description of this field
    pub fn description(&self) -> String {
        format!("Tag: {} ({}), Type: {}, Count: {}, Value: {}",
                self.tag, tag_utils::get_tag_name(self.tag),
                self.field_type.name(), self.count, tag_utils::describe_value(self))
    }
}
