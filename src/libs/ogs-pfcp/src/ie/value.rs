//! Decoded value tree
//!
//! A [`Structure`] holds the fields of one message body or grouped IE,
//! keyed by IE tag. Singular fields hold one [`Value`], repeated fields a
//! non-empty list of them.

use std::collections::BTreeMap;

use bytes::Bytes;

use super::schema::ValueKind;

/// A single IE value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bytes(Bytes),
    Str(String),
    Struct(Structure),
}

impl Value {
    /// Whether this value can be encoded as `kind`
    pub fn matches(&self, kind: &ValueKind) -> bool {
        matches!(
            (self, kind),
            (Self::I8(_), ValueKind::I8)
                | (Self::I16(_), ValueKind::I16)
                | (Self::I32(_), ValueKind::I32)
                | (Self::I64(_), ValueKind::I64)
                | (Self::U8(_), ValueKind::U8)
                | (Self::U16(_), ValueKind::U16)
                | (Self::U32(_), ValueKind::U32)
                | (Self::U64(_), ValueKind::U64)
                | (Self::Bytes(_), ValueKind::Bytes)
                | (Self::Str(_), ValueKind::Str)
                | (Self::Struct(_), ValueKind::Struct(_))
        )
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Structure> {
        match self {
            Self::Struct(v) => Some(v),
            _ => None,
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<Structure> for Value {
    fn from(v: Structure) -> Self {
        Self::Struct(v)
    }
}

/// Field content: one value or an ordered, non-empty list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(Value),
    Repeated(Vec<Value>),
}

impl FieldValue {
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Repeated(list) => list,
        }
    }
}

/// Fields of a message body or grouped IE, keyed by tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    fields: BTreeMap<u16, FieldValue>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a singular field, replacing any previous content
    pub fn set(&mut self, tag: u16, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(tag, FieldValue::Single(value.into()));
        self
    }

    /// Append to a repeated field
    pub fn push(&mut self, tag: u16, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.fields.get_mut(&tag) {
            Some(FieldValue::Repeated(list)) => list.push(value),
            _ => {
                self.fields.insert(tag, FieldValue::Repeated(vec![value]));
            }
        }
        self
    }

    /// Replace a repeated field; an empty list clears it
    pub fn set_all(&mut self, tag: u16, values: Vec<Value>) -> &mut Self {
        if values.is_empty() {
            self.fields.remove(&tag);
        } else {
            self.fields.insert(tag, FieldValue::Repeated(values));
        }
        self
    }

    /// Builder form of [`Structure::set`]
    pub fn with(mut self, tag: u16, value: impl Into<Value>) -> Self {
        self.set(tag, value);
        self
    }

    /// Builder form of [`Structure::push`]
    pub fn with_item(mut self, tag: u16, value: impl Into<Value>) -> Self {
        self.push(tag, value);
        self
    }

    pub fn field(&self, tag: u16) -> Option<&FieldValue> {
        self.fields.get(&tag)
    }

    /// Value of a singular field
    pub fn get(&self, tag: u16) -> Option<&Value> {
        match self.fields.get(&tag) {
            Some(FieldValue::Single(v)) => Some(v),
            _ => None,
        }
    }

    /// Values of a repeated field, empty when absent
    pub fn get_all(&self, tag: u16) -> &[Value] {
        match self.fields.get(&tag) {
            Some(FieldValue::Repeated(list)) => list,
            _ => &[],
        }
    }

    pub fn get_u8(&self, tag: u16) -> Option<u8> {
        self.get(tag).and_then(Value::as_u8)
    }

    pub fn get_u16(&self, tag: u16) -> Option<u16> {
        self.get(tag).and_then(Value::as_u16)
    }

    pub fn get_u32(&self, tag: u16) -> Option<u32> {
        self.get(tag).and_then(Value::as_u32)
    }

    pub fn get_bytes(&self, tag: u16) -> Option<&Bytes> {
        self.get(tag).and_then(Value::as_bytes)
    }

    pub fn get_str(&self, tag: u16) -> Option<&str> {
        self.get(tag).and_then(Value::as_str)
    }

    pub fn get_struct(&self, tag: u16) -> Option<&Structure> {
        self.get(tag).and_then(Value::as_struct)
    }

    pub fn remove(&mut self, tag: u16) -> Option<FieldValue> {
        self.fields.remove(&tag)
    }

    pub fn contains(&self, tag: u16) -> bool {
        self.fields.contains_key(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &FieldValue)> {
        self.fields.iter().map(|(tag, v)| (*tag, v))
    }

    pub(crate) fn insert_field(&mut self, tag: u16, value: FieldValue) {
        self.fields.insert(tag, value);
    }
}
