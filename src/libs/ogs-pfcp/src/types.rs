//! PFCP Types
//!
//! Constants and typed views of common IEs as specified in 3GPP TS 29.244.
//! Each type converts into the [`Value`] the catalogue declares for its IE
//! and back.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::catalog::ie_type;
use crate::error::{PfcpError, PfcpResult};
use crate::ie::Value;

/// PFCP Version
pub const PFCP_VERSION: u8 = 1;

/// PFCP UDP port (8805)
pub const PFCP_UDP_PORT: u16 = 8805;

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970)
pub const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

fn invalid(tag: u16, reason: &'static str) -> PfcpError {
    PfcpError::InvalidIeValue { tag, reason }
}

fn expect_u8(tag: u16, value: &Value) -> PfcpResult<u8> {
    value.as_u8().ok_or_else(|| invalid(tag, "expected an 8-bit integer"))
}

fn expect_bytes(tag: u16, value: &Value) -> PfcpResult<&Bytes> {
    value.as_bytes().ok_or_else(|| invalid(tag, "expected an octet string"))
}

/// PFCP Cause Values (TS 29.244 Section 8.2.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PfcpCause {
    RequestAccepted = 1,
    RequestRejected = 64,
    SessionContextNotFound = 65,
    MandatoryIeMissing = 66,
    ConditionalIeMissing = 67,
    InvalidLength = 68,
    MandatoryIeIncorrect = 69,
    InvalidForwardingPolicy = 70,
    InvalidFTeidAllocationOption = 71,
    NoEstablishedPfcpAssociation = 72,
    RuleCreationModificationFailure = 73,
    PfcpEntityInCongestion = 74,
    NoResourcesAvailable = 75,
    ServiceNotSupported = 76,
    SystemFailure = 77,
}

impl TryFrom<u8> for PfcpCause {
    type Error = PfcpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::RequestAccepted),
            64 => Ok(Self::RequestRejected),
            65 => Ok(Self::SessionContextNotFound),
            66 => Ok(Self::MandatoryIeMissing),
            67 => Ok(Self::ConditionalIeMissing),
            68 => Ok(Self::InvalidLength),
            69 => Ok(Self::MandatoryIeIncorrect),
            70 => Ok(Self::InvalidForwardingPolicy),
            71 => Ok(Self::InvalidFTeidAllocationOption),
            72 => Ok(Self::NoEstablishedPfcpAssociation),
            73 => Ok(Self::RuleCreationModificationFailure),
            74 => Ok(Self::PfcpEntityInCongestion),
            75 => Ok(Self::NoResourcesAvailable),
            76 => Ok(Self::ServiceNotSupported),
            77 => Ok(Self::SystemFailure),
            _ => Err(invalid(ie_type::CAUSE, "unknown cause value")),
        }
    }
}

impl PfcpCause {
    /// Get the name of the cause
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestAccepted => "Request Accepted",
            Self::RequestRejected => "Request Rejected",
            Self::SessionContextNotFound => "Session Context Not Found",
            Self::MandatoryIeMissing => "Mandatory IE Missing",
            Self::ConditionalIeMissing => "Conditional IE Missing",
            Self::InvalidLength => "Invalid Length",
            Self::MandatoryIeIncorrect => "Mandatory IE Incorrect",
            Self::InvalidForwardingPolicy => "Invalid Forwarding Policy",
            Self::InvalidFTeidAllocationOption => "Invalid F-TEID Allocation Option",
            Self::NoEstablishedPfcpAssociation => "No Established PFCP Association",
            Self::RuleCreationModificationFailure => "Rule Creation/Modification Failure",
            Self::PfcpEntityInCongestion => "PFCP Entity In Congestion",
            Self::NoResourcesAvailable => "No Resources Available",
            Self::ServiceNotSupported => "Service Not Supported",
            Self::SystemFailure => "System Failure",
        }
    }

    /// Check if the cause indicates success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::RequestAccepted)
    }
}

impl From<PfcpCause> for Value {
    fn from(cause: PfcpCause) -> Self {
        Value::U8(cause as u8)
    }
}

impl TryFrom<&Value> for PfcpCause {
    type Error = PfcpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::try_from(expect_u8(ie_type::CAUSE, value)?)
    }
}

/// Source Interface values (TS 29.244 Section 8.2.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SourceInterface {
    #[default]
    Access = 0,
    Core = 1,
    SgiLanN6Lan = 2,
    CpFunction = 3,
}

impl TryFrom<u8> for SourceInterface {
    type Error = PfcpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Spare bits in the high nibble
        match value & 0x0F {
            0 => Ok(Self::Access),
            1 => Ok(Self::Core),
            2 => Ok(Self::SgiLanN6Lan),
            3 => Ok(Self::CpFunction),
            _ => Err(invalid(ie_type::SOURCE_INTERFACE, "unknown interface value")),
        }
    }
}

impl From<SourceInterface> for Value {
    fn from(interface: SourceInterface) -> Self {
        Value::U8(interface as u8)
    }
}

impl TryFrom<&Value> for SourceInterface {
    type Error = PfcpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::try_from(expect_u8(ie_type::SOURCE_INTERFACE, value)?)
    }
}

/// Destination Interface values (TS 29.244 Section 8.2.24)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DestinationInterface {
    #[default]
    Access = 0,
    Core = 1,
    SgiLanN6Lan = 2,
    CpFunction = 3,
    LiFunction = 4,
}

impl TryFrom<u8> for DestinationInterface {
    type Error = PfcpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value & 0x0F {
            0 => Ok(Self::Access),
            1 => Ok(Self::Core),
            2 => Ok(Self::SgiLanN6Lan),
            3 => Ok(Self::CpFunction),
            4 => Ok(Self::LiFunction),
            _ => Err(invalid(ie_type::DESTINATION_INTERFACE, "unknown interface value")),
        }
    }
}

impl From<DestinationInterface> for Value {
    fn from(interface: DestinationInterface) -> Self {
        Value::U8(interface as u8)
    }
}

impl TryFrom<&Value> for DestinationInterface {
    type Error = PfcpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::try_from(expect_u8(ie_type::DESTINATION_INTERFACE, value)?)
    }
}

/// Node ID (TS 29.244 Section 8.2.38)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeId {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Fqdn(String),
}

impl NodeId {
    const TYPE_IPV4: u8 = 0;
    const TYPE_IPV6: u8 = 1;
    const TYPE_FQDN: u8 = 2;

    /// Longest DNS label (RFC 1035)
    pub const MAX_LABEL_LEN: usize = 63;

    /// Encode the IE value; an FQDN label over 63 octets is rejected
    pub fn encode(&self) -> PfcpResult<Bytes> {
        let mut buf = BytesMut::new();
        match self {
            Self::Ipv4(addr) => {
                buf.put_u8(Self::TYPE_IPV4);
                buf.put_slice(&addr.octets());
            }
            Self::Ipv6(addr) => {
                buf.put_u8(Self::TYPE_IPV6);
                buf.put_slice(&addr.octets());
            }
            Self::Fqdn(fqdn) => {
                buf.put_u8(Self::TYPE_FQDN);
                // DNS-style labels, no terminating zero label
                for label in fqdn.split('.').filter(|l| !l.is_empty()) {
                    if label.len() > Self::MAX_LABEL_LEN {
                        return Err(invalid(ie_type::NODE_ID, "FQDN label longer than 63 octets"));
                    }
                    buf.put_u8(label.len() as u8);
                    buf.put_slice(label.as_bytes());
                }
            }
        }
        Ok(buf.freeze())
    }

    /// Decode the IE value
    pub fn decode(data: &[u8]) -> PfcpResult<Self> {
        let tag = ie_type::NODE_ID;
        let mut buf = data;
        if buf.is_empty() {
            return Err(invalid(tag, "empty value"));
        }

        match buf.get_u8() & 0x0F {
            Self::TYPE_IPV4 => {
                let octets: [u8; 4] = buf
                    .try_into()
                    .map_err(|_| invalid(tag, "IPv4 address must be 4 octets"))?;
                Ok(Self::Ipv4(Ipv4Addr::from(octets)))
            }
            Self::TYPE_IPV6 => {
                let octets: [u8; 16] = buf
                    .try_into()
                    .map_err(|_| invalid(tag, "IPv6 address must be 16 octets"))?;
                Ok(Self::Ipv6(Ipv6Addr::from(octets)))
            }
            Self::TYPE_FQDN => {
                let mut labels = Vec::new();
                while buf.has_remaining() {
                    let len = buf.get_u8() as usize;
                    if len == 0 {
                        break;
                    }
                    if buf.remaining() < len {
                        return Err(invalid(tag, "FQDN label runs past the end"));
                    }
                    let (label, rest) = buf.split_at(len);
                    let label = std::str::from_utf8(label)
                        .map_err(|_| invalid(tag, "FQDN label is not valid text"))?;
                    labels.push(label);
                    buf = rest;
                }
                Ok(Self::Fqdn(labels.join(".")))
            }
            _ => Err(invalid(tag, "unknown node ID type")),
        }
    }
}

impl TryFrom<&NodeId> for Value {
    type Error = PfcpError;

    fn try_from(node_id: &NodeId) -> Result<Self, Self::Error> {
        node_id.encode().map(Value::Bytes)
    }
}

impl TryFrom<&Value> for NodeId {
    type Error = PfcpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::decode(expect_bytes(ie_type::NODE_ID, value)?)
    }
}

/// F-SEID (TS 29.244 Section 8.2.37)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FSeid {
    pub seid: u64,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl FSeid {
    /// Create IPv4 F-SEID
    pub fn new_ipv4(seid: u64, addr: Ipv4Addr) -> Self {
        Self {
            seid,
            ipv4: Some(addr),
            ipv6: None,
        }
    }

    /// Create IPv6 F-SEID
    pub fn new_ipv6(seid: u64, addr: Ipv6Addr) -> Self {
        Self {
            seid,
            ipv4: None,
            ipv6: Some(addr),
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(29);
        let flags = ((self.ipv6.is_some() as u8) << 1) | (self.ipv4.is_some() as u8);
        buf.put_u8(flags);
        buf.put_u64(self.seid);
        if let Some(addr) = self.ipv4 {
            buf.put_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6 {
            buf.put_slice(&addr.octets());
        }
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> PfcpResult<Self> {
        let tag = ie_type::F_SEID;
        let mut buf = data;
        if buf.remaining() < 9 {
            return Err(invalid(tag, "shorter than flags and SEID"));
        }
        let flags = buf.get_u8();
        let seid = buf.get_u64();

        let ipv4 = if flags & 0x01 != 0 {
            if buf.remaining() < 4 {
                return Err(invalid(tag, "IPv4 address missing"));
            }
            let mut octets = [0u8; 4];
            buf.copy_to_slice(&mut octets);
            Some(Ipv4Addr::from(octets))
        } else {
            None
        };

        let ipv6 = if flags & 0x02 != 0 {
            if buf.remaining() < 16 {
                return Err(invalid(tag, "IPv6 address missing"));
            }
            let mut octets = [0u8; 16];
            buf.copy_to_slice(&mut octets);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        Ok(Self { seid, ipv4, ipv6 })
    }
}

impl From<&FSeid> for Value {
    fn from(fseid: &FSeid) -> Self {
        Value::Bytes(fseid.encode())
    }
}

impl TryFrom<&Value> for FSeid {
    type Error = PfcpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::decode(expect_bytes(ie_type::F_SEID, value)?)
    }
}

/// Recovery Time Stamp (TS 29.244 Section 8.2.65): seconds since the NTP
/// epoch, 1900-01-01T00:00:00Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecoveryTimeStamp(pub u32);

impl RecoveryTimeStamp {
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Truncates to whole seconds; wraps at the end of NTP era 0 (2036)
    pub fn from_system_time(time: SystemTime) -> Self {
        let unix = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self((unix + NTP_UNIX_OFFSET) as u32)
    }

    pub fn to_system_time(self) -> SystemTime {
        let secs = u64::from(self.0);
        if secs >= NTP_UNIX_OFFSET {
            UNIX_EPOCH + Duration::from_secs(secs - NTP_UNIX_OFFSET)
        } else {
            UNIX_EPOCH - Duration::from_secs(NTP_UNIX_OFFSET - secs)
        }
    }
}

impl From<RecoveryTimeStamp> for Value {
    fn from(ts: RecoveryTimeStamp) -> Self {
        Value::U32(ts.0)
    }
}

impl TryFrom<&Value> for RecoveryTimeStamp {
    type Error = PfcpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_u32()
            .map(Self)
            .ok_or_else(|| invalid(ie_type::RECOVERY_TIME_STAMP, "expected a 32-bit integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_roundtrip() {
        let value = Value::from(PfcpCause::MandatoryIeMissing);
        assert_eq!(value, Value::U8(66));
        assert_eq!(PfcpCause::try_from(&value).unwrap(), PfcpCause::MandatoryIeMissing);
        assert!(PfcpCause::RequestAccepted.is_success());
        assert!(!PfcpCause::SystemFailure.is_success());
        assert!(matches!(
            PfcpCause::try_from(2u8),
            Err(PfcpError::InvalidIeValue { tag: 19, .. })
        ));
    }

    #[test]
    fn test_interface_values() {
        assert_eq!(SourceInterface::try_from(&Value::U8(1)).unwrap(), SourceInterface::Core);
        assert_eq!(
            DestinationInterface::try_from(&Value::U8(0xF4)).unwrap(),
            DestinationInterface::LiFunction
        );
        assert!(SourceInterface::try_from(4u8).is_err());
        assert!(SourceInterface::try_from(&Value::U16(1)).is_err());
    }

    #[test]
    fn test_node_id_ipv4() {
        let node_id = NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1));
        let encoded = node_id.encode().unwrap();
        assert_eq!(encoded.as_ref(), &[0, 10, 0, 0, 1]);
        assert_eq!(NodeId::decode(&encoded).unwrap(), node_id);
    }

    #[test]
    fn test_node_id_fqdn() {
        let node_id = NodeId::Fqdn("upf.example.org".to_string());
        let encoded = node_id.encode().unwrap();
        assert_eq!(encoded[0], 2);
        assert_eq!(encoded[1], 3);
        assert_eq!(&encoded[2..5], b"upf");

        let value = Value::try_from(&node_id).unwrap();
        assert_eq!(NodeId::try_from(&value).unwrap(), node_id);
    }

    #[test]
    fn test_node_id_rejects_long_label() {
        let longest = NodeId::Fqdn(format!("{}.org", "a".repeat(63)));
        let encoded = longest.encode().unwrap();
        assert_eq!(encoded[1], 63);
        assert_eq!(NodeId::decode(&encoded).unwrap(), longest);

        let too_long = NodeId::Fqdn("a".repeat(300));
        assert!(matches!(
            too_long.encode(),
            Err(PfcpError::InvalidIeValue { tag: ie_type::NODE_ID, .. })
        ));
        assert!(Value::try_from(&too_long).is_err());
    }

    #[test]
    fn test_node_id_rejects_bad_length() {
        assert!(NodeId::decode(&[0, 10, 0, 0]).is_err());
        assert!(NodeId::decode(&[2, 5, b'a']).is_err());
        assert!(NodeId::decode(&[]).is_err());
        assert!(NodeId::decode(&[7]).is_err());
    }

    #[test]
    fn test_fseid_roundtrip() {
        let fseid = FSeid {
            seid: 0x0102_0304_0506_0708,
            ipv4: Some(Ipv4Addr::new(192, 168, 1, 1)),
            ipv6: Some(Ipv6Addr::LOCALHOST),
        };
        let encoded = fseid.encode();
        assert_eq!(encoded.len(), 29);
        assert_eq!(encoded[0], 0x03);
        assert_eq!(FSeid::decode(&encoded).unwrap(), fseid);

        let v4 = FSeid::new_ipv4(1, Ipv4Addr::new(127, 0, 0, 1));
        assert_eq!(FSeid::try_from(&Value::from(&v4)).unwrap(), v4);
        assert!(FSeid::decode(&[0x01, 0, 0, 0, 0, 0, 0, 0, 1]).is_err());
    }

    #[test]
    fn test_recovery_time_stamp() {
        let unix = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let ts = RecoveryTimeStamp::from_system_time(unix);
        assert_eq!(u64::from(ts.0), 1_700_000_000 + NTP_UNIX_OFFSET);
        assert_eq!(ts.to_system_time(), unix);
        assert_eq!(RecoveryTimeStamp::try_from(&Value::from(ts)).unwrap(), ts);
    }
}
