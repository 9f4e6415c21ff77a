//! NextGCore PFCP Protocol Library
//!
//! PFCP (Packet Forwarding Control Protocol, 3GPP TS 29.244) carries the
//! control traffic between the Control Plane (SMF/SGW-C) and User Plane
//! (UPF/SGW-U) functions over UDP port 8805.
//!
//! # Features
//!
//! - PFCP header encoding/decoding
//! - Schema-driven TLV encoding/decoding of message bodies and grouped IEs
//! - Message catalogue for the Heartbeat, Association and Session procedures
//! - Request/response transactions with retransmission and duplicate
//!   request suppression
//!
//! # Example
//!
//! ```no_run
//! use ogs_pfcp::prelude::*;
//!
//! # async fn heartbeat() -> PfcpResult<()> {
//! let server = PfcpServer::bind(&PfcpConfig::default()).await?;
//! let peer = "127.0.0.7:8805".parse().unwrap();
//!
//! let request = PfcpMessage::heartbeat_request(
//!     server.next_sequence_number(),
//!     RecoveryTimeStamp::now(),
//! );
//! let response = server.send_request(request, peer).await?;
//! assert!(response.is_response());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod header;
pub mod ie;
pub mod message;
pub mod path;
pub mod registry;
pub mod transport;
pub mod types;
pub mod xact;

#[cfg(test)]
mod property_tests;

pub use config::{PfcpConfig, XactConfig};
pub use error::{PfcpError, PfcpResult};
pub use header::{PfcpHeader, PfcpMessageType, PFCP_HEADER_LEN, PFCP_HEADER_LEN_WITH_SEID};
pub use ie::{Structure, Value};
pub use message::{MessageKind, PfcpMessage};
pub use path::{Inbound, PfcpServer};
pub use registry::XactRegistry;
pub use types::PFCP_UDP_PORT;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::ie_type;
    pub use crate::config::{PfcpConfig, XactConfig};
    pub use crate::error::{PfcpError, PfcpResult};
    pub use crate::header::{PfcpHeader, PfcpMessageType};
    pub use crate::ie::{FieldSpec, Schema, Structure, Value, ValueKind};
    pub use crate::message::{MessageKind, PfcpMessage};
    pub use crate::path::{Inbound, PfcpServer};
    pub use crate::transport::DatagramSocket;
    pub use crate::types::{
        DestinationInterface, FSeid, NodeId, PfcpCause, RecoveryTimeStamp, SourceInterface,
    };
}
