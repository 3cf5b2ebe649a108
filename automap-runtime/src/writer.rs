//! Sequential binary writer.

use std::collections::BTreeMap;

use crate::{Dynamic, Parcel, Size, SizeF, Value, WireEnum};

/// Length prefix marking a null reference.
pub(crate) const NULL_LENGTH: i32 = -1;

/// Tags for [`Value`] variants in the dynamic encoding.
pub(crate) mod tag {
    pub const NULL: i32 = 0;
    pub const BOOL: i32 = 1;
    pub const INT: i32 = 2;
    pub const LONG: i32 = 3;
    pub const FLOAT: i32 = 4;
    pub const DOUBLE: i32 = 5;
    pub const CHAR: i32 = 6;
    pub const STRING: i32 = 7;
    pub const BYTES: i32 = 8;
    pub const LIST: i32 = 9;
    pub const MAP: i32 = 10;
}

/// Appends little-endian values to a byte buffer.
///
/// Every `write_*` method has a `read_*` counterpart on
/// [`WireReader`](crate::WireReader) consuming exactly what it produced.
/// Reference-typed writes take an `Option` and encode `None` as a `-1`
/// length or a zero presence flag.
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_int(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_long(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_float(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_double(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Booleans travel as an int, 1 for true and 0 for false.
    pub fn write_bool(&mut self, value: bool) {
        self.write_int(i32::from(value));
    }

    /// Chars travel as an int holding the code point.
    pub fn write_char(&mut self, value: char) {
        self.write_int(u32::from(value) as i32);
    }

    pub fn write_string(&mut self, value: Option<&str>) {
        match value {
            None => self.write_int(NULL_LENGTH),
            Some(s) => {
                self.write_len(s.len());
                self.buf.extend_from_slice(s.as_bytes());
            }
        }
    }

    /// Enums travel as their variant name.
    pub fn write_enum<E: WireEnum>(&mut self, value: Option<&E>) {
        self.write_string(value.map(|v| v.name()));
    }

    /// A length followed by each variant name.
    pub fn write_enum_list<E: WireEnum>(&mut self, value: Option<&[E]>) {
        match value {
            None => self.write_int(NULL_LENGTH),
            Some(items) => {
                self.write_len(items.len());
                for item in items {
                    self.write_enum(Some(item));
                }
            }
        }
    }

    pub fn write_list<T: Parcel>(&mut self, value: Option<&[T]>) {
        self.write_elements(value);
    }

    pub fn write_set<T: Parcel>(&mut self, value: Option<&[T]>) {
        self.write_elements(value);
    }

    pub fn write_map<K: Parcel, V: Parcel>(&mut self, value: Option<&BTreeMap<K, V>>) {
        match value {
            None => self.write_int(NULL_LENGTH),
            Some(map) => {
                self.write_len(map.len());
                for (key, value) in map {
                    key.encode(self);
                    value.encode(self);
                }
            }
        }
    }

    pub fn write_bool_array(&mut self, value: Option<&[bool]>) {
        self.write_elements(value);
    }

    /// Bytes are packed one per byte rather than widened.
    pub fn write_byte_array(&mut self, value: Option<&[u8]>) {
        self.write_bytes(value);
    }

    pub fn write_char_array(&mut self, value: Option<&[char]>) {
        self.write_elements(value);
    }

    pub fn write_int_array(&mut self, value: Option<&[i32]>) {
        self.write_elements(value);
    }

    pub fn write_long_array(&mut self, value: Option<&[i64]>) {
        self.write_elements(value);
    }

    pub fn write_string_array(&mut self, value: Option<&[String]>) {
        self.write_elements(value);
    }

    pub fn write_array<T: Parcel>(&mut self, value: Option<&[T]>) {
        self.write_elements(value);
    }

    /// A nested encodable value behind a presence flag.
    pub fn write_parcelable<T: Parcel>(&mut self, value: Option<&T>) {
        match value {
            None => self.write_int(0),
            Some(inner) => {
                self.write_int(1);
                inner.encode(self);
            }
        }
    }

    pub fn write_size(&mut self, value: Option<&Size>) {
        self.write_parcelable(value);
    }

    pub fn write_size_f(&mut self, value: Option<&SizeF>) {
        self.write_parcelable(value);
    }

    pub fn write_sparse_bool_array(&mut self, value: Option<&BTreeMap<i32, bool>>) {
        self.write_map(value);
    }

    pub fn write_bundle(&mut self, value: Option<&BTreeMap<String, Value>>) {
        self.write_map(value);
    }

    pub fn write_blob(&mut self, value: Option<&[u8]>) {
        self.write_bytes(value);
    }

    /// Opaque fallback: the value is written as a tagged [`Value`].
    pub fn write_value<T: Dynamic>(&mut self, value: &T) {
        self.write_tagged(&value.to_value());
    }

    pub(crate) fn write_tagged(&mut self, value: &Value) {
        match value {
            Value::Null => self.write_int(tag::NULL),
            Value::Bool(v) => {
                self.write_int(tag::BOOL);
                self.write_bool(*v);
            }
            Value::Int(v) => {
                self.write_int(tag::INT);
                self.write_int(*v);
            }
            Value::Long(v) => {
                self.write_int(tag::LONG);
                self.write_long(*v);
            }
            Value::Float(v) => {
                self.write_int(tag::FLOAT);
                self.write_float(*v);
            }
            Value::Double(v) => {
                self.write_int(tag::DOUBLE);
                self.write_double(*v);
            }
            Value::Char(v) => {
                self.write_int(tag::CHAR);
                self.write_char(*v);
            }
            Value::String(v) => {
                self.write_int(tag::STRING);
                self.write_string(Some(v.as_str()));
            }
            Value::Bytes(v) => {
                self.write_int(tag::BYTES);
                self.write_bytes(Some(v.as_slice()));
            }
            Value::List(items) => {
                self.write_int(tag::LIST);
                self.write_len(items.len());
                for item in items {
                    self.write_tagged(item);
                }
            }
            Value::Map(entries) => {
                self.write_int(tag::MAP);
                self.write_len(entries.len());
                for (key, item) in entries {
                    self.write_string(Some(key.as_str()));
                    self.write_tagged(item);
                }
            }
        }
    }

    fn write_elements<T: Parcel>(&mut self, value: Option<&[T]>) {
        match value {
            None => self.write_int(NULL_LENGTH),
            Some(items) => {
                self.write_len(items.len());
                for item in items {
                    item.encode(self);
                }
            }
        }
    }

    fn write_bytes(&mut self, value: Option<&[u8]>) {
        match value {
            None => self.write_int(NULL_LENGTH),
            Some(bytes) => {
                self.write_len(bytes.len());
                self.buf.extend_from_slice(bytes);
            }
        }
    }

    // Lengths above i32::MAX are not representable in the format.
    fn write_len(&mut self, len: usize) {
        self.write_int(len as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_is_little_endian() {
        let mut writer = WireWriter::new();
        writer.write_int(1);
        assert_eq!(writer.as_bytes(), &[1, 0, 0, 0]);
    }

    #[test]
    fn test_bool_is_widened_to_int() {
        let mut writer = WireWriter::new();
        writer.write_bool(true);
        writer.write_bool(false);
        assert_eq!(writer.as_bytes(), &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let mut writer = WireWriter::new();
        writer.write_string(Some("ab"));
        assert_eq!(writer.as_bytes(), &[2, 0, 0, 0, b'a', b'b']);
    }

    #[test]
    fn test_null_string_uses_negative_length() {
        let mut writer = WireWriter::new();
        writer.write_string(None);
        assert_eq!(writer.as_bytes(), &(-1i32).to_le_bytes());
    }

    #[test]
    fn test_absent_parcelable_is_zero_flag() {
        let mut writer = WireWriter::new();
        writer.write_parcelable::<i32>(None);
        assert_eq!(writer.as_bytes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_byte_array_is_packed() {
        let mut writer = WireWriter::new();
        writer.write_byte_array(Some(&[7u8, 8, 9][..]));
        assert_eq!(writer.as_bytes(), &[3, 0, 0, 0, 7, 8, 9]);
    }
}
