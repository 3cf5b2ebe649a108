//! Sequential binary reader.

use std::collections::BTreeMap;

use crate::{
    Dynamic, Parcel, Size, SizeF, Value, WireEnum, WireError, required,
    writer::{NULL_LENGTH, tag},
};

/// Reads values back in the order a [`WireWriter`](crate::WireWriter) wrote them.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_int(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_long(&mut self) -> Result<i64, WireError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_float(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_double(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_int()? == 1)
    }

    pub fn read_char(&mut self) -> Result<char, WireError> {
        let raw = self.read_int()?;
        char::from_u32(raw as u32).ok_or(WireError::InvalidChar(raw))
    }

    pub fn read_string(&mut self) -> Result<Option<String>, WireError> {
        match self.read_bytes()? {
            None => Ok(None),
            Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
        }
    }

    pub fn read_enum<E: WireEnum>(&mut self) -> Result<Option<E>, WireError> {
        match self.read_string()? {
            None => Ok(None),
            Some(name) => match E::from_name(&name) {
                Some(variant) => Ok(Some(variant)),
                None => Err(WireError::UnknownVariant { name }),
            },
        }
    }

    pub fn read_enum_list<E: WireEnum>(&mut self) -> Result<Option<Vec<E>>, WireError> {
        let Some(len) = self.read_len()? else {
            return Ok(None);
        };
        let mut items = Vec::with_capacity(self.capacity_hint(len));
        for _ in 0..len {
            items.push(required(self.read_enum()?, "element")?);
        }
        Ok(Some(items))
    }

    pub fn read_list<T: Parcel>(&mut self) -> Result<Option<Vec<T>>, WireError> {
        self.read_elements()
    }

    pub fn read_set<T: Parcel>(&mut self) -> Result<Option<Vec<T>>, WireError> {
        self.read_elements()
    }

    pub fn read_map<K: Parcel + Ord, V: Parcel>(
        &mut self,
    ) -> Result<Option<BTreeMap<K, V>>, WireError> {
        let Some(len) = self.read_len()? else {
            return Ok(None);
        };
        let mut map = BTreeMap::new();
        for _ in 0..len {
            let key = K::decode(self)?;
            let value = V::decode(self)?;
            map.insert(key, value);
        }
        Ok(Some(map))
    }

    pub fn read_bool_array(&mut self) -> Result<Option<Vec<bool>>, WireError> {
        self.read_elements()
    }

    pub fn read_byte_array(&mut self) -> Result<Option<Vec<u8>>, WireError> {
        self.read_bytes()
    }

    pub fn read_char_array(&mut self) -> Result<Option<Vec<char>>, WireError> {
        self.read_elements()
    }

    pub fn read_int_array(&mut self) -> Result<Option<Vec<i32>>, WireError> {
        self.read_elements()
    }

    pub fn read_long_array(&mut self) -> Result<Option<Vec<i64>>, WireError> {
        self.read_elements()
    }

    pub fn read_string_array(&mut self) -> Result<Option<Vec<String>>, WireError> {
        self.read_elements()
    }

    pub fn read_array<T: Parcel>(&mut self) -> Result<Option<Vec<T>>, WireError> {
        self.read_elements()
    }

    pub fn read_parcelable<T: Parcel>(&mut self) -> Result<Option<T>, WireError> {
        match self.read_int()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(self)?)),
            flag => Err(WireError::InvalidPresence(flag)),
        }
    }

    pub fn read_size(&mut self) -> Result<Option<Size>, WireError> {
        self.read_parcelable()
    }

    pub fn read_size_f(&mut self) -> Result<Option<SizeF>, WireError> {
        self.read_parcelable()
    }

    pub fn read_sparse_bool_array(&mut self) -> Result<Option<BTreeMap<i32, bool>>, WireError> {
        self.read_map()
    }

    pub fn read_bundle(&mut self) -> Result<Option<BTreeMap<String, Value>>, WireError> {
        self.read_map()
    }

    pub fn read_blob(&mut self) -> Result<Option<Vec<u8>>, WireError> {
        self.read_bytes()
    }

    /// Opaque fallback: reads a tagged [`Value`] and casts it to `T`.
    pub fn read_value<T: Dynamic>(&mut self) -> Result<T, WireError> {
        let value = self.read_tagged()?;
        T::from_value(value).ok_or(WireError::TypeMismatch {
            expected: std::any::type_name::<T>(),
        })
    }

    pub(crate) fn read_tagged(&mut self) -> Result<Value, WireError> {
        let value = match self.read_int()? {
            tag::NULL => Value::Null,
            tag::BOOL => Value::Bool(self.read_bool()?),
            tag::INT => Value::Int(self.read_int()?),
            tag::LONG => Value::Long(self.read_long()?),
            tag::FLOAT => Value::Float(self.read_float()?),
            tag::DOUBLE => Value::Double(self.read_double()?),
            tag::CHAR => Value::Char(self.read_char()?),
            tag::STRING => Value::String(self.read_non_null_string()?),
            tag::BYTES => Value::Bytes(self.read_bytes()?.unwrap_or_default()),
            tag::LIST => {
                let len = self.read_len()?.unwrap_or(0);
                let mut items = Vec::with_capacity(self.capacity_hint(len));
                for _ in 0..len {
                    items.push(self.read_tagged()?);
                }
                Value::List(items)
            }
            tag::MAP => {
                let len = self.read_len()?.unwrap_or(0);
                let mut entries = BTreeMap::new();
                for _ in 0..len {
                    let key = self.read_non_null_string()?;
                    entries.insert(key, self.read_tagged()?);
                }
                Value::Map(entries)
            }
            other => return Err(WireError::UnknownTag(other)),
        };
        Ok(value)
    }

    fn read_non_null_string(&mut self) -> Result<String, WireError> {
        Ok(self.read_string()?.unwrap_or_default())
    }

    fn read_elements<T: Parcel>(&mut self) -> Result<Option<Vec<T>>, WireError> {
        let Some(len) = self.read_len()? else {
            return Ok(None);
        };
        let mut items = Vec::with_capacity(self.capacity_hint(len));
        for _ in 0..len {
            items.push(T::decode(self)?);
        }
        Ok(Some(items))
    }

    fn read_bytes(&mut self) -> Result<Option<Vec<u8>>, WireError> {
        match self.read_len()? {
            None => Ok(None),
            Some(len) => Ok(Some(self.take(len)?.to_vec())),
        }
    }

    fn read_len(&mut self) -> Result<Option<usize>, WireError> {
        match self.read_int()? {
            NULL_LENGTH => Ok(None),
            len if len < 0 => Err(WireError::InvalidLength(len)),
            len => Ok(Some(len as usize)),
        }
    }

    // Never trust a length prefix further than the bytes actually present.
    fn capacity_hint(&self, len: usize) -> usize {
        len.min(self.remaining())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(WireError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
