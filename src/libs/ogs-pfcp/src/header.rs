//! PFCP Header
//!
//! PFCP message header as specified in 3GPP TS 29.244 Section 7.2.2.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use crate::error::{PfcpError, PfcpResult};
use crate::types::PFCP_VERSION;

/// PFCP Header length without SEID (8 bytes)
pub const PFCP_HEADER_LEN: usize = 8;

/// PFCP Header length with SEID (16 bytes)
pub const PFCP_HEADER_LEN_WITH_SEID: usize = 16;

/// Largest sequence number that fits the 24-bit field
pub const PFCP_MAX_SEQUENCE_NUMBER: u32 = 0x00FF_FFFF;

/// Message types at or above this value are session related
pub const PFCP_FIRST_SESSION_MESSAGE_TYPE: u8 = 50;

/// Bytes counted by Message Length besides the SEID and body:
/// 3 (Sequence Number) + 1 (Message Priority and Spare)
const SEQUENCE_WORD_LEN: usize = 4;

/// Bytes preceding the part counted by Message Length
const LENGTH_PREFIX_LEN: usize = 4;

/// PFCP Message Types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PfcpMessageType {
    // Node related messages (no SEID)
    HeartbeatRequest = 1,
    HeartbeatResponse = 2,
    PfdManagementRequest = 3,
    PfdManagementResponse = 4,
    AssociationSetupRequest = 5,
    AssociationSetupResponse = 6,
    AssociationUpdateRequest = 7,
    AssociationUpdateResponse = 8,
    AssociationReleaseRequest = 9,
    AssociationReleaseResponse = 10,
    VersionNotSupportedResponse = 11,
    NodeReportRequest = 12,
    NodeReportResponse = 13,
    SessionSetDeletionRequest = 14,
    SessionSetDeletionResponse = 15,

    // Session related messages (with SEID)
    SessionEstablishmentRequest = 50,
    SessionEstablishmentResponse = 51,
    SessionModificationRequest = 52,
    SessionModificationResponse = 53,
    SessionDeletionRequest = 54,
    SessionDeletionResponse = 55,
    SessionReportRequest = 56,
    SessionReportResponse = 57,
}

impl TryFrom<u8> for PfcpMessageType {
    type Error = PfcpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::HeartbeatRequest),
            2 => Ok(Self::HeartbeatResponse),
            3 => Ok(Self::PfdManagementRequest),
            4 => Ok(Self::PfdManagementResponse),
            5 => Ok(Self::AssociationSetupRequest),
            6 => Ok(Self::AssociationSetupResponse),
            7 => Ok(Self::AssociationUpdateRequest),
            8 => Ok(Self::AssociationUpdateResponse),
            9 => Ok(Self::AssociationReleaseRequest),
            10 => Ok(Self::AssociationReleaseResponse),
            11 => Ok(Self::VersionNotSupportedResponse),
            12 => Ok(Self::NodeReportRequest),
            13 => Ok(Self::NodeReportResponse),
            14 => Ok(Self::SessionSetDeletionRequest),
            15 => Ok(Self::SessionSetDeletionResponse),
            50 => Ok(Self::SessionEstablishmentRequest),
            51 => Ok(Self::SessionEstablishmentResponse),
            52 => Ok(Self::SessionModificationRequest),
            53 => Ok(Self::SessionModificationResponse),
            54 => Ok(Self::SessionDeletionRequest),
            55 => Ok(Self::SessionDeletionResponse),
            56 => Ok(Self::SessionReportRequest),
            57 => Ok(Self::SessionReportResponse),
            _ => Err(PfcpError::UnsupportedMessageType(value)),
        }
    }
}

impl From<PfcpMessageType> for u8 {
    fn from(value: PfcpMessageType) -> Self {
        value as u8
    }
}

impl PfcpMessageType {
    /// Check if this message type is session related (carries a SEID)
    pub fn has_seid(&self) -> bool {
        (*self as u8) >= PFCP_FIRST_SESSION_MESSAGE_TYPE
    }

    /// Get the name of the message type
    pub fn name(&self) -> &'static str {
        match self {
            Self::HeartbeatRequest => "Heartbeat Request",
            Self::HeartbeatResponse => "Heartbeat Response",
            Self::PfdManagementRequest => "PFD Management Request",
            Self::PfdManagementResponse => "PFD Management Response",
            Self::AssociationSetupRequest => "Association Setup Request",
            Self::AssociationSetupResponse => "Association Setup Response",
            Self::AssociationUpdateRequest => "Association Update Request",
            Self::AssociationUpdateResponse => "Association Update Response",
            Self::AssociationReleaseRequest => "Association Release Request",
            Self::AssociationReleaseResponse => "Association Release Response",
            Self::VersionNotSupportedResponse => "Version Not Supported Response",
            Self::NodeReportRequest => "Node Report Request",
            Self::NodeReportResponse => "Node Report Response",
            Self::SessionSetDeletionRequest => "Session Set Deletion Request",
            Self::SessionSetDeletionResponse => "Session Set Deletion Response",
            Self::SessionEstablishmentRequest => "Session Establishment Request",
            Self::SessionEstablishmentResponse => "Session Establishment Response",
            Self::SessionModificationRequest => "Session Modification Request",
            Self::SessionModificationResponse => "Session Modification Response",
            Self::SessionDeletionRequest => "Session Deletion Request",
            Self::SessionDeletionResponse => "Session Deletion Response",
            Self::SessionReportRequest => "Session Report Request",
            Self::SessionReportResponse => "Session Report Response",
        }
    }
}

/// Header length for a message type: node related types use the short
/// header, session related types the long one.
pub fn header_len(message_type: u8) -> usize {
    if message_type < PFCP_FIRST_SESSION_MESSAGE_TYPE {
        PFCP_HEADER_LEN
    } else {
        PFCP_HEADER_LEN_WITH_SEID
    }
}

/// PFCP Header structure
///
/// Format (without SEID - 8 bytes):
/// ```text
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |    Version    | Spare | Spare | Spare |  MP   |   S   |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |                    Message Type                               |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |                    Message Length (2 bytes)                   |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |                    Sequence Number (3 bytes)                  |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |    Message Priority (if MP)   |          Spare                |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// ```
///
/// With the S flag set, an 8-byte SEID follows Message Length, giving a
/// 16-byte header.
///
/// The S and MP flags are not stored separately: S is set iff `seid` is
/// present and MP iff `priority` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfcpHeader {
    /// PFCP version (should be 1)
    pub version: u8,
    /// Raw message type; unknown values are kept as-is
    pub message_type: u8,
    /// Message length (bytes following the length field)
    pub length: u16,
    /// Session Endpoint Identifier (S flag)
    pub seid: Option<u64>,
    /// Sequence number (24 bits)
    pub sequence_number: u32,
    /// Message priority, 4 bits (MP flag)
    pub priority: Option<u8>,
}

impl PfcpHeader {
    /// Create a new PFCP header without SEID
    pub fn new(message_type: PfcpMessageType, sequence_number: u32) -> Self {
        Self {
            version: PFCP_VERSION,
            message_type: message_type.into(),
            length: 0,
            seid: None,
            sequence_number,
            priority: None,
        }
    }

    /// Create a new PFCP header with SEID
    pub fn new_with_seid(message_type: PfcpMessageType, seid: u64, sequence_number: u32) -> Self {
        Self {
            seid: Some(seid),
            ..Self::new(message_type, sequence_number)
        }
    }

    /// Set the message priority (MP flag)
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority & 0x0F);
        self
    }

    /// S flag
    pub fn s_flag(&self) -> bool {
        self.seid.is_some()
    }

    /// MP flag
    pub fn mp_flag(&self) -> bool {
        self.priority.is_some()
    }

    /// Known message type, if any
    pub fn known_type(&self) -> Option<PfcpMessageType> {
        PfcpMessageType::try_from(self.message_type).ok()
    }

    /// Header length as selected by the message type
    pub fn header_len(&self) -> usize {
        header_len(self.message_type)
    }

    /// Number of bytes `encode` writes (depends on the S flag)
    pub fn encoded_len(&self) -> usize {
        if self.s_flag() {
            PFCP_HEADER_LEN_WITH_SEID
        } else {
            PFCP_HEADER_LEN
        }
    }

    /// Set Message Length for a body of `body_len` bytes
    pub fn set_body_len(&mut self, body_len: usize) -> PfcpResult<()> {
        let length = self.encoded_len() - LENGTH_PREFIX_LEN + body_len;
        debug_assert_eq!(
            self.encoded_len() - LENGTH_PREFIX_LEN,
            SEQUENCE_WORD_LEN + if self.s_flag() { 8 } else { 0 }
        );
        self.length = u16::try_from(length).map_err(|_| PfcpError::MessageTooLong(length))?;
        Ok(())
    }

    /// Encode the header to bytes
    pub fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        if self.sequence_number > PFCP_MAX_SEQUENCE_NUMBER {
            return Err(PfcpError::SequenceNumberOutOfRange(self.sequence_number));
        }

        // First byte: version (3 bits) | spare (3 bits) | MP (1 bit) | S (1 bit)
        let first_byte = ((self.version & 0x07) << 5)
            | ((self.mp_flag() as u8) << 1)
            | (self.s_flag() as u8);
        buf.put_u8(first_byte);
        buf.put_u8(self.message_type);
        buf.put_u16(self.length);

        if let Some(seid) = self.seid {
            buf.put_u64(seid);
        }

        // Sequence number (high 24 bits) + priority/spare (low byte)
        let priority_and_spare = self.priority.map_or(0, |p| (p & 0x0F) << 4);
        buf.put_u32((self.sequence_number << 8) | priority_and_spare as u32);
        Ok(())
    }

    /// Decode header from bytes
    pub fn decode(buf: &mut Bytes) -> PfcpResult<Self> {
        if buf.remaining() < PFCP_HEADER_LEN {
            return Err(PfcpError::TruncatedHeader {
                needed: PFCP_HEADER_LEN,
                available: buf.remaining(),
            });
        }

        let first_byte = buf[0];
        let s_flag = first_byte & 0x01 != 0;
        let mp_flag = (first_byte >> 1) & 0x01 != 0;

        let needed = if s_flag {
            PFCP_HEADER_LEN_WITH_SEID
        } else {
            PFCP_HEADER_LEN
        };
        if buf.remaining() < needed {
            return Err(PfcpError::TruncatedHeader {
                needed,
                available: buf.remaining(),
            });
        }

        buf.advance(1);
        let version = (first_byte >> 5) & 0x07;
        let message_type = buf.get_u8();
        let length = buf.get_u16();
        let seid = if s_flag { Some(buf.get_u64()) } else { None };

        let word = buf.get_u32();
        let sequence_number = word >> 8;
        let priority = if mp_flag {
            Some(((word & 0xFF) as u8) >> 4)
        } else {
            None
        };

        Ok(Self {
            version,
            message_type,
            length,
            seid,
            sequence_number,
            priority,
        })
    }
}
