//! PFCP Messages
//!
//! A PFCP message is a header plus a body decoded against the catalogue
//! schema for its message type (3GPP TS 29.244 Section 7).

use bytes::{BufMut, Bytes, BytesMut};

use crate::catalog::{self, ie_type};
use crate::error::{PfcpError, PfcpResult};
use crate::header::{header_len, PfcpHeader, PfcpMessageType, PFCP_HEADER_LEN_WITH_SEID};
use crate::ie::{decode_body, encode_body, Schema, Structure};
use crate::types::RecoveryTimeStamp;

/// Bytes in front of the part counted by Message Length
const LENGTH_PREFIX_LEN: usize = 4;

/// Request/response classification of a message type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
    /// Unknown types and Version Not Supported Response
    Neither,
}

impl MessageKind {
    /// Total over all type values
    pub fn of(message_type: u8) -> Self {
        match message_type {
            1 | 3 | 5 | 7 | 9 | 12 | 14 | 50 | 52 | 54 | 56 => Self::Request,
            2 | 4 | 6 | 8 | 10 | 13 | 15 | 51 | 53 | 55 | 57 => Self::Response,
            _ => Self::Neither,
        }
    }
}

/// PFCP message: header and decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfcpMessage {
    pub header: PfcpHeader,
    pub body: Structure,
}

impl PfcpMessage {
    /// Build a message; session related types get a zero SEID until
    /// [`PfcpMessage::with_seid`] sets one.
    pub fn new(message_type: PfcpMessageType, sequence_number: u32, body: Structure) -> Self {
        let header = if message_type.has_seid() {
            PfcpHeader::new_with_seid(message_type, 0, sequence_number)
        } else {
            PfcpHeader::new(message_type, sequence_number)
        };
        Self { header, body }
    }

    /// Set the SEID. Only session messages (type 50 and up) carry one;
    /// [`PfcpMessage::encode`] rejects a node message with a SEID.
    pub fn with_seid(mut self, seid: u64) -> Self {
        self.header.seid = Some(seid);
        self
    }

    /// Answer to `self` carrying the same sequence number
    pub fn reply(&self, message_type: PfcpMessageType, body: Structure) -> Self {
        let mut reply = Self::new(message_type, self.header.sequence_number, body);
        if message_type.has_seid() {
            reply.header.seid = self.header.seid;
        }
        reply
    }

    pub fn heartbeat_request(sequence_number: u32, recovery: RecoveryTimeStamp) -> Self {
        let body = Structure::new().with(ie_type::RECOVERY_TIME_STAMP, recovery);
        Self::new(PfcpMessageType::HeartbeatRequest, sequence_number, body)
    }

    pub fn heartbeat_response(sequence_number: u32, recovery: RecoveryTimeStamp) -> Self {
        let body = Structure::new().with(ie_type::RECOVERY_TIME_STAMP, recovery);
        Self::new(PfcpMessageType::HeartbeatResponse, sequence_number, body)
    }

    pub fn message_type(&self) -> u8 {
        self.header.message_type
    }

    pub fn sequence_number(&self) -> u32 {
        self.header.sequence_number
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::of(self.header.message_type)
    }

    pub fn is_request(&self) -> bool {
        self.kind() == MessageKind::Request
    }

    pub fn is_response(&self) -> bool {
        self.kind() == MessageKind::Response
    }

    /// Human readable type name for logs
    pub fn type_name(&self) -> &'static str {
        self.header.known_type().map_or("Unknown", |t| t.name())
    }

    fn schema(&self) -> PfcpResult<&'static Schema> {
        catalog::schema_for(self.header.message_type)
            .ok_or(PfcpError::UnsupportedMessageType(self.header.message_type))
    }

    /// Serialise header and body, updating the header's Message Length
    pub fn encode(&mut self) -> PfcpResult<Bytes> {
        check_seid_flag(&self.header)?;
        let schema = self.schema()?;

        let mut body = BytesMut::new();
        encode_body(&self.body, schema, &mut body)?;
        self.header.set_body_len(body.len())?;

        let mut buf = BytesMut::with_capacity(self.header.encoded_len() + body.len());
        self.header.encode(&mut buf)?;
        buf.put_slice(&body);
        Ok(buf.freeze())
    }

    /// Decode one datagram
    pub fn decode(data: Bytes) -> PfcpResult<Self> {
        let mut cursor = data.clone();
        let header = PfcpHeader::decode(&mut cursor)?;

        let actual = data.len() - LENGTH_PREFIX_LEN;
        if header.length as usize != actual {
            return Err(PfcpError::LengthMismatch {
                declared: header.length as usize,
                actual,
            });
        }

        check_seid_flag(&header)?;
        let offset = header_len(header.message_type);
        if data.len() < offset {
            return Err(PfcpError::TruncatedHeader {
                needed: offset,
                available: data.len(),
            });
        }

        let schema = catalog::schema_for(header.message_type)
            .ok_or(PfcpError::UnsupportedMessageType(header.message_type))?;
        let body = decode_body(data.slice(offset..), schema)?;

        Ok(Self { header, body })
    }
}

/// The S flag must agree with the header length the message type implies
fn check_seid_flag(header: &PfcpHeader) -> PfcpResult<()> {
    let session_type = header_len(header.message_type) == PFCP_HEADER_LEN_WITH_SEID;
    if header.s_flag() != session_type {
        return Err(PfcpError::SeidFlagMismatch {
            message_type: header.message_type,
            seid_present: header.s_flag(),
        });
    }
    Ok(())
}
