//! Body schema description
//!
//! A schema is an ordered list of field descriptors. Each descriptor names
//! the IE tag, how many times the IE may appear and the kind of value it
//! carries. Grouped IEs point at their own schema.

use std::fmt;

/// How many times a field may appear in its enclosing structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one (M in TS 29.244)
    Required,
    /// Zero or one (C / O in TS 29.244)
    Optional,
    /// Zero or more
    Repeated,
}

impl Cardinality {
    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::Repeated)
    }
}

/// Kind of value carried by an IE
#[derive(Clone, Copy)]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// Octet string, any length
    Bytes,
    /// UTF-8 text, any length
    Str,
    /// Grouped IE
    Struct(&'static Schema),
}

impl ValueKind {
    /// Encoded width of integer kinds
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            Self::I8 | Self::U8 => Some(1),
            Self::I16 | Self::U16 => Some(2),
            Self::I32 | Self::U32 => Some(4),
            Self::I64 | Self::U64 => Some(8),
            Self::Bytes | Self::Str | Self::Struct(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Bytes => "bytes",
            Self::Str => "str",
            Self::Struct(schema) => schema.name,
        }
    }
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct(schema) => write!(f, "Struct({})", schema.name),
            other => f.write_str(other.name()),
        }
    }
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Struct(a), Self::Struct(b)) => std::ptr::eq(*a, *b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl Eq for ValueKind {}

/// One field of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// IE type; `None` is a schema configuration error
    pub tag: Option<u16>,
    pub cardinality: Cardinality,
    pub kind: ValueKind,
}

impl FieldSpec {
    pub const fn required(name: &'static str, tag: u16, kind: ValueKind) -> Self {
        Self {
            name,
            tag: Some(tag),
            cardinality: Cardinality::Required,
            kind,
        }
    }

    pub const fn optional(name: &'static str, tag: u16, kind: ValueKind) -> Self {
        Self {
            name,
            tag: Some(tag),
            cardinality: Cardinality::Optional,
            kind,
        }
    }

    pub const fn repeated(name: &'static str, tag: u16, kind: ValueKind) -> Self {
        Self {
            name,
            tag: Some(tag),
            cardinality: Cardinality::Repeated,
            kind,
        }
    }
}

/// Ordered field list of a message body or grouped IE
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Field declared for `tag`, if any
    pub fn field(&self, tag: u16) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.tag == Some(tag))
    }
}
