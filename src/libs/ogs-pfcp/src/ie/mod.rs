//! PFCP Information Elements
//!
//! Tag/length/value framing as specified in 3GPP TS 29.244 Section 8.1.1,
//! and a generic encoder/decoder driven by a [`Schema`].
//!
//! Decoding is two-step. The buffer is first split into a [`FragmentSet`]
//! (tag to the list of raw values carrying that tag), then each schema field
//! picks its fragments out of the set. Encoding walks the schema in order
//! and writes one IE per singular field or per element of a repeated field.

mod codec;
mod schema;
mod value;

use std::collections::HashMap;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{PfcpError, PfcpResult};

pub use codec::{decode_body, encode_body};
pub use schema::{Cardinality, FieldSpec, Schema, ValueKind};
pub use value::{FieldValue, Structure, Value};

/// PFCP IE Header (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeHeader {
    pub ie_type: u16,
    pub length: u16,
}

impl IeHeader {
    pub const LEN: usize = 4;

    pub fn new(ie_type: u16, length: u16) -> Self {
        Self { ie_type, length }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.ie_type);
        buf.put_u16(self.length);
    }

    pub fn decode(buf: &mut Bytes) -> PfcpResult<Self> {
        if buf.remaining() < Self::LEN {
            return Err(PfcpError::TruncatedIe {
                needed: Self::LEN,
                available: buf.remaining(),
            });
        }
        Ok(Self {
            ie_type: buf.get_u16(),
            length: buf.get_u16(),
        })
    }
}

/// One IE with its value left undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIe {
    pub ie_type: u16,
    pub data: Bytes,
}

impl RawIe {
    pub fn new(ie_type: u16, data: Bytes) -> Self {
        Self { ie_type, data }
    }

    pub fn decode(buf: &mut Bytes) -> PfcpResult<Self> {
        let header = IeHeader::decode(buf)?;
        let length = header.length as usize;
        if buf.remaining() < length {
            return Err(PfcpError::TruncatedIe {
                needed: length,
                available: buf.remaining(),
            });
        }
        Ok(Self {
            ie_type: header.ie_type,
            data: buf.split_to(length),
        })
    }
}

/// Raw IE values grouped by tag
///
/// Values sharing a tag keep the order they had on the wire; the
/// interleaving between different tags is not kept.
#[derive(Debug, Default)]
pub struct FragmentSet {
    fragments: HashMap<u16, Vec<Bytes>>,
}

impl FragmentSet {
    /// Split `buf` into IEs until it is exhausted
    pub fn parse(mut buf: Bytes) -> PfcpResult<Self> {
        let mut set = Self::default();
        while buf.has_remaining() {
            let ie = RawIe::decode(&mut buf)?;
            set.fragments.entry(ie.ie_type).or_default().push(ie.data);
        }
        Ok(set)
    }

    /// Values carried under `tag`, in wire order
    pub fn get(&self, tag: u16) -> &[Bytes] {
        self.fragments.get(&tag).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
