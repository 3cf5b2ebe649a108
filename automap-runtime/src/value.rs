use std::collections::BTreeMap;

/// Self-describing value used by the opaque fallback encoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Conversion to and from [`Value`] for types written through the
/// opaque fallback.
pub trait Dynamic: Sized {
    fn to_value(&self) -> Value;

    /// `None` when the value holds a different kind.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! int_dynamic {
    ($($ty:ty),*) => {
        $(
            impl Dynamic for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i32::from(*self))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_dynamic!(i8, i16, i32, u8, u16);

impl Dynamic for i64 {
    fn to_value(&self) -> Value {
        Value::Long(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for u32 {
    fn to_value(&self) -> Value {
        Value::Long(i64::from(*self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Long(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }
}

impl Dynamic for u64 {
    fn to_value(&self) -> Value {
        Value::Long(*self as i64)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Long(v) => Some(v as u64),
            _ => None,
        }
    }
}

impl Dynamic for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for f32 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for f64 {
    fn to_value(&self) -> Value {
        Value::Double(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for char {
    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Char(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

impl Dynamic for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl<T: Dynamic> Dynamic for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            None => Value::Null,
            Some(inner) => inner.to_value(),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WireError, WireReader, WireWriter};

    fn round_trip<T: Dynamic>(value: &T) -> Result<T, WireError> {
        let mut writer = WireWriter::new();
        writer.write_value(value);
        let bytes = writer.into_bytes();
        WireReader::new(&bytes).read_value()
    }

    #[test]
    fn test_nullable_boxed_round_trip() {
        assert_eq!(round_trip(&Some(42i32)), Ok(Some(42)));
        assert_eq!(round_trip(&None::<i64>), Ok(None));
    }

    #[test]
    fn test_nested_value_round_trip() {
        let mut entries = BTreeMap::new();
        entries.insert("count".to_string(), Value::Int(3));
        entries.insert(
            "tags".to_string(),
            Value::List(vec![Value::String("a".into()), Value::Null]),
        );
        let value = Value::Map(entries);
        assert_eq!(round_trip(&value), Ok(value));
    }

    #[test]
    fn test_kind_mismatch() {
        let mut writer = WireWriter::new();
        writer.write_value(&"text".to_string());
        let bytes = writer.into_bytes();
        let result = WireReader::new(&bytes).read_value::<i32>();
        assert!(matches!(result, Err(WireError::TypeMismatch { .. })));
    }

    #[test]
    fn test_narrow_int_out_of_range() {
        assert_eq!(u8::from_value(Value::Int(300)), None);
        assert_eq!(u8::from_value(Value::Int(200)), Some(200));
    }
}
