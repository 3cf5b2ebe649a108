//! Encoding traits implemented by generated and hand-written types.

use std::collections::BTreeMap;

use crate::{Size, SizeF, Value, WireError, WireReader, WireWriter};

/// A type with a positional binary encoding.
///
/// `decode` must read exactly what `encode` wrote, in the same order.
pub trait Parcel: Sized {
    fn encode(&self, writer: &mut WireWriter);

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.encode(&mut writer);
        writer.into_bytes()
    }

    /// Decode a complete buffer, rejecting trailing bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut reader = WireReader::new(bytes);
        let value = Self::decode(&mut reader)?;
        if !reader.is_exhausted() {
            return Err(WireError::TrailingBytes(reader.remaining()));
        }
        Ok(value)
    }
}

/// An enumeration encoded by variant name.
pub trait WireEnum: Sized {
    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

/// A custom codec for fields of type `T`, replacing the built-in table.
///
/// Generated code refers to adapters as constants, so implementors are
/// usually unit structs.
pub trait TypeAdapter<T> {
    fn encode(&self, value: &T, writer: &mut WireWriter);

    fn decode(&self, reader: &mut WireReader<'_>) -> Result<T, WireError>;
}

/// Unwrap a decoded reference that the field declares as non-nullable.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, WireError> {
    value.ok_or(WireError::UnexpectedNull { field })
}

/// Narrow a wire integer to the scalar type of a field.
pub fn narrow<T: TryFrom<i64>>(value: impl Into<i64>) -> Result<T, WireError> {
    let value = value.into();
    T::try_from(value).map_err(|_| WireError::OutOfRange {
        value,
        target: std::any::type_name::<T>(),
    })
}

macro_rules! int_parcel {
    ($($ty:ty),*) => {
        $(
            impl Parcel for $ty {
                fn encode(&self, writer: &mut WireWriter) {
                    writer.write_int(i32::from(*self));
                }

                fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
                    narrow(reader.read_int()?)
                }
            }
        )*
    };
}

int_parcel!(i8, i16, i32, u8, u16);

impl Parcel for i64 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_long(*self);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        reader.read_long()
    }
}

impl Parcel for u32 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_long(i64::from(*self));
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        narrow(reader.read_long()?)
    }
}

impl Parcel for u64 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_long(*self as i64);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        Ok(reader.read_long()? as u64)
    }
}

impl Parcel for f32 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_float(*self);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        reader.read_float()
    }
}

impl Parcel for f64 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_double(*self);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        reader.read_double()
    }
}

impl Parcel for bool {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_bool(*self);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        reader.read_bool()
    }
}

impl Parcel for char {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_char(*self);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        reader.read_char()
    }
}

impl Parcel for String {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_string(Some(self.as_str()));
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        required(reader.read_string()?, "element")
    }
}

impl<T: Parcel> Parcel for Vec<T> {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_list(Some(self.as_slice()));
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        required(reader.read_list()?, "element")
    }
}

impl<K: Parcel + Ord, V: Parcel> Parcel for BTreeMap<K, V> {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_map(Some(self));
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        required(reader.read_map()?, "element")
    }
}

impl Parcel for Value {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_tagged(self);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        reader.read_tagged()
    }
}

impl Parcel for Size {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_int(self.width);
        writer.write_int(self.height);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        let width = reader.read_int()?;
        let height = reader.read_int()?;
        Ok(Self { width, height })
    }
}

impl Parcel for SizeF {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_float(self.width);
        writer.write_float(self.height);
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        let width = reader.read_float()?;
        let height = reader.read_float()?;
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Cuisine {
        Thai,
        Italian,
    }

    impl WireEnum for Cuisine {
        fn name(&self) -> &'static str {
            match self {
                Cuisine::Thai => "THAI",
                Cuisine::Italian => "ITALIAN",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "THAI" => Some(Cuisine::Thai),
                "ITALIAN" => Some(Cuisine::Italian),
                _ => None,
            }
        }
    }

    #[test]
    fn test_scalar_round_trips() {
        assert_eq!(i8::from_bytes(&(-3i8).to_bytes()), Ok(-3));
        assert_eq!(u16::from_bytes(&u16::MAX.to_bytes()), Ok(u16::MAX));
        assert_eq!(u32::from_bytes(&u32::MAX.to_bytes()), Ok(u32::MAX));
        assert_eq!(u64::from_bytes(&u64::MAX.to_bytes()), Ok(u64::MAX));
        assert_eq!(f64::from_bytes(&1.5f64.to_bytes()), Ok(1.5));
        assert_eq!(char::from_bytes(&'ß'.to_bytes()), Ok('ß'));
    }

    #[test]
    fn test_out_of_range_wire_value_is_an_error() {
        assert_eq!(
            u8::from_bytes(&300i32.to_bytes()),
            Err(WireError::OutOfRange {
                value: 300,
                target: "u8",
            })
        );
        assert_eq!(
            u32::from_bytes(&(-1i64).to_bytes()),
            Err(WireError::OutOfRange {
                value: -1,
                target: "u32",
            })
        );
        assert_eq!(narrow::<i16>(-5i32), Ok(-5));
    }

    #[test]
    fn test_narrow_ints_take_four_bytes() {
        assert_eq!(7u8.to_bytes().len(), 4);
        assert_eq!(7i16.to_bytes().len(), 4);
    }

    #[test]
    fn test_enum_by_name() {
        let mut writer = WireWriter::new();
        writer.write_enum(Some(&Cuisine::Italian));
        writer.write_enum::<Cuisine>(None);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_enum(), Ok(Some(Cuisine::Italian)));
        assert_eq!(reader.read_enum::<Cuisine>(), Ok(None));
    }

    #[test]
    fn test_unknown_enum_name() {
        let mut writer = WireWriter::new();
        writer.write_string(Some("FRENCH"));
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        assert_eq!(
            reader.read_enum::<Cuisine>(),
            Err(WireError::UnknownVariant {
                name: "FRENCH".to_string()
            })
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = 1i32.to_bytes();
        bytes.push(0);
        assert_eq!(i32::from_bytes(&bytes), Err(WireError::TrailingBytes(1)));
    }

    #[test]
    fn test_required_reports_field() {
        assert_eq!(
            required::<String>(None, "name"),
            Err(WireError::UnexpectedNull { field: "name" })
        );
    }
}
