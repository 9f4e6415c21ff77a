//! PFCP Error Types
//!
//! Error types for PFCP codec and transaction operations.

use std::net::SocketAddr;

use thiserror::Error;

/// PFCP Error type
#[derive(Debug, Error)]
pub enum PfcpError {
    /// Header shorter than its fixed fields (or than the flagged SEID/priority)
    #[error("Truncated header: needed {needed} bytes, available {available}")]
    TruncatedHeader { needed: usize, available: usize },

    /// IE tag/length/value triple running past the end of its buffer
    #[error("Truncated IE: needed {needed} bytes, available {available}")]
    TruncatedIe { needed: usize, available: usize },

    /// Header Message Length does not match the datagram
    #[error("Message length mismatch: header says {declared}, got {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Integer IE whose value is not exactly its declared width
    #[error("Invalid length for IE {tag}: expected {expected} bytes, got {actual}")]
    InvalidIeLength { tag: u16, expected: usize, actual: usize },

    /// Text IE that is not valid UTF-8
    #[error("IE {tag} is not valid UTF-8")]
    InvalidText { tag: u16 },

    /// IE value that does not fit the IE's internal layout
    #[error("Invalid value for IE {tag}: {reason}")]
    InvalidIeValue { tag: u16, reason: &'static str },

    /// S flag set on a node message, or clear on a session message
    #[error("Message type {message_type}: SEID present = {seid_present} does not match the type")]
    SeidFlagMismatch { message_type: u8, seid_present: bool },

    /// No body schema is known for this message type
    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(u8),

    /// Schema field without a tag
    #[error("Field {field} in {schema} has no IE tag")]
    MissingTag {
        schema: &'static str,
        field: &'static str,
    },

    /// Value tree does not match the field's declared kind or cardinality
    #[error("Field {field} in {schema}: value does not match its declared kind")]
    ValueKindMismatch {
        schema: &'static str,
        field: &'static str,
    },

    /// Message too long for the 16-bit Message Length field
    #[error("Message too long: {0} bytes after the length field")]
    MessageTooLong(usize),

    /// IE value too long for the 16-bit IE length field
    #[error("IE {tag} value too long: {length} bytes")]
    IeTooLong { tag: u16, length: usize },

    /// Sequence number wider than 24 bits
    #[error("Sequence number {0} exceeds 24 bits")]
    SequenceNumberOutOfRange(u32),

    /// A transaction is already registered for (consumer, sequence number)
    #[error("Duplicate sequence number {sequence_number} for consumer {consumer}")]
    DuplicateSequenceNumber {
        consumer: String,
        sequence_number: u32,
    },

    /// Response with no matching outstanding request
    #[error("Unsolicited response: no transaction {sequence_number} for consumer {consumer}")]
    UnsolicitedResponse {
        consumer: String,
        sequence_number: u32,
    },

    /// Removal of a transaction that is not registered
    #[error("Transaction {sequence_number} for consumer {consumer} does not exist")]
    XactNotFound {
        consumer: String,
        sequence_number: u32,
    },

    /// Request retransmissions exhausted without a valid response
    #[error("Request transaction {sequence_number} to {peer}: retry-out after {attempts} attempts")]
    RetryExhausted {
        sequence_number: u32,
        peer: SocketAddr,
        attempts: u32,
    },

    /// Message handed to the request path is not a request
    #[error("Message type {0} is not a request")]
    NotARequest(u8),

    /// Message handed to the response path is not a response
    #[error("Message type {0} is not a response")]
    NotAResponse(u8),

    /// Request transaction cancelled by the caller
    #[error("Request transaction {0} cancelled")]
    Cancelled(u32),

    /// Transaction mailbox closed before an event arrived
    #[error("Transaction {0} mailbox closed")]
    MailboxClosed(u32),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Socket error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PfcpError {
    /// The peer sent bytes that are not a well-formed PFCP message
    pub fn is_wire_format(&self) -> bool {
        matches!(
            self,
            Self::TruncatedHeader { .. }
                | Self::TruncatedIe { .. }
                | Self::LengthMismatch { .. }
                | Self::InvalidIeLength { .. }
                | Self::InvalidText { .. }
                | Self::InvalidIeValue { .. }
                | Self::SeidFlagMismatch { .. }
                | Self::UnsupportedMessageType(_)
        )
    }

    /// Programmer error in a schema or value tree; never worth retrying
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::MissingTag { .. } | Self::ValueKindMismatch { .. })
    }

    /// Peer unreachable (as opposed to peer sending garbage)
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RetryExhausted { .. })
    }
}

/// PFCP Result type
pub type PfcpResult<T> = Result<T, PfcpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let truncated = PfcpError::TruncatedIe {
            needed: 4,
            available: 2,
        };
        assert!(truncated.is_wire_format());
        assert!(!truncated.is_timeout());

        let exhausted = PfcpError::RetryExhausted {
            sequence_number: 1,
            peer: "127.0.0.1:8805".parse().unwrap(),
            attempts: 3,
        };
        assert!(exhausted.is_timeout());
        assert!(!exhausted.is_wire_format());

        let schema = PfcpError::MissingTag {
            schema: "Heartbeat Request",
            field: "Recovery Time Stamp",
        };
        assert!(schema.is_schema_error());
    }
}
