//! PFCP Message Catalogue
//!
//! IE type values (TS 29.244 Section 8.1.2) and the body schemas of the
//! messages this crate can encode and decode.
//!
//! IEs whose content is a single integer are declared with that integer's
//! width. IEs with a richer internal layout (F-TEID, Node ID, F-SEID, ...)
//! are carried as octet strings; see [`crate::types`] for typed views of the
//! common ones.

use crate::header::PfcpMessageType;
use crate::ie::{FieldSpec, Schema, ValueKind};

/// PFCP IE type values
pub mod ie_type {
    pub const CREATE_PDR: u16 = 1;
    pub const PDI: u16 = 2;
    pub const CREATE_FAR: u16 = 3;
    pub const FORWARDING_PARAMETERS: u16 = 4;
    pub const DUPLICATING_PARAMETERS: u16 = 5;
    pub const CREATE_QER: u16 = 7;
    pub const CREATED_PDR: u16 = 8;
    pub const UPDATE_PDR: u16 = 9;
    pub const UPDATE_FAR: u16 = 10;
    pub const UPDATE_FORWARDING_PARAMETERS: u16 = 11;
    pub const UPDATE_QER: u16 = 14;
    pub const REMOVE_PDR: u16 = 15;
    pub const REMOVE_FAR: u16 = 16;
    pub const CAUSE: u16 = 19;
    pub const SOURCE_INTERFACE: u16 = 20;
    pub const F_TEID: u16 = 21;
    pub const NETWORK_INSTANCE: u16 = 22;
    pub const SDF_FILTER: u16 = 23;
    pub const APPLICATION_ID: u16 = 24;
    pub const GATE_STATUS: u16 = 25;
    pub const MBR: u16 = 26;
    pub const GBR: u16 = 27;
    pub const QER_CORRELATION_ID: u16 = 28;
    pub const PRECEDENCE: u16 = 29;
    pub const TRANSPORT_LEVEL_MARKING: u16 = 30;
    pub const REDIRECT_INFORMATION: u16 = 38;
    pub const OFFENDING_IE: u16 = 40;
    pub const FORWARDING_POLICY: u16 = 41;
    pub const DESTINATION_INTERFACE: u16 = 42;
    pub const UP_FUNCTION_FEATURES: u16 = 43;
    pub const APPLY_ACTION: u16 = 44;
    pub const PFCP_SMREQ_FLAGS: u16 = 49;
    pub const LOAD_CONTROL_INFORMATION: u16 = 51;
    pub const SEQUENCE_NUMBER: u16 = 52;
    pub const PDR_ID: u16 = 56;
    pub const F_SEID: u16 = 57;
    pub const NODE_ID: u16 = 60;
    pub const URR_ID: u16 = 81;
    pub const OUTER_HEADER_CREATION: u16 = 84;
    pub const BAR_ID: u16 = 88;
    pub const CP_FUNCTION_FEATURES: u16 = 89;
    pub const UE_IP_ADDRESS: u16 = 93;
    pub const PACKET_RATE: u16 = 94;
    pub const OUTER_HEADER_REMOVAL: u16 = 95;
    pub const RECOVERY_TIME_STAMP: u16 = 96;
    pub const DL_FLOW_LEVEL_MARKING: u16 = 97;
    pub const HEADER_ENRICHMENT: u16 = 98;
    pub const UPDATE_DUPLICATING_PARAMETERS: u16 = 105;
    pub const ACTIVATE_PREDEFINED_RULES: u16 = 106;
    pub const DEACTIVATE_PREDEFINED_RULES: u16 = 107;
    pub const FAR_ID: u16 = 108;
    pub const QER_ID: u16 = 109;
    pub const PDN_TYPE: u16 = 113;
    pub const FAILED_RULE_ID: u16 = 114;
    pub const USER_PLANE_IP_RESOURCE_INFORMATION: u16 = 116;
    pub const USER_PLANE_INACTIVITY_TIMER: u16 = 117;
    pub const RQI: u16 = 123;
    pub const QFI: u16 = 124;
    pub const CREATE_TRAFFIC_ENDPOINT: u16 = 127;
    pub const CREATED_TRAFFIC_ENDPOINT: u16 = 128;
    pub const UPDATE_TRAFFIC_ENDPOINT: u16 = 129;
    pub const REMOVE_TRAFFIC_ENDPOINT: u16 = 130;
    pub const TRAFFIC_ENDPOINT_ID: u16 = 131;
    pub const ETHERNET_PACKET_FILTER: u16 = 132;
    pub const PROXYING: u16 = 137;
    pub const USER_ID: u16 = 141;
    pub const ETHERNET_PDU_SESSION_INFORMATION: u16 = 142;
    pub const TRACE_INFORMATION: u16 = 152;
    pub const FRAMED_ROUTE: u16 = 153;
    pub const FRAMED_ROUTING: u16 = 154;
    pub const FRAMED_IPV6_ROUTE: u16 = 155;
}

use ie_type::*;
use ValueKind::{Bytes, Struct, U16, U32, U8};

const fn req(name: &'static str, tag: u16, kind: ValueKind) -> FieldSpec {
    FieldSpec::required(name, tag, kind)
}

const fn opt(name: &'static str, tag: u16, kind: ValueKind) -> FieldSpec {
    FieldSpec::optional(name, tag, kind)
}

const fn rep(name: &'static str, tag: u16, kind: ValueKind) -> FieldSpec {
    FieldSpec::repeated(name, tag, kind)
}

// ----------------------------------------------------------------------------
// Grouped IEs
// ----------------------------------------------------------------------------

pub static PDI_SCHEMA: Schema = Schema {
    name: "PDI",
    fields: &[
        req("Source Interface", SOURCE_INTERFACE, U8),
        opt("Local F-TEID", F_TEID, Bytes),
        opt("Network Instance", NETWORK_INSTANCE, Bytes),
        opt("UE IP Address", UE_IP_ADDRESS, Bytes),
        opt("Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8),
        opt("SDF Filter", SDF_FILTER, Bytes),
        opt("Application ID", APPLICATION_ID, Bytes),
        opt("Ethernet PDU Session Information", ETHERNET_PDU_SESSION_INFORMATION, U8),
        opt("Ethernet Packet Filter", ETHERNET_PACKET_FILTER, Bytes),
        rep("QFI", QFI, U8),
        opt("Framed-Route", FRAMED_ROUTE, Bytes),
        opt("Framed-Routing", FRAMED_ROUTING, U32),
        opt("Framed-IPv6-Route", FRAMED_IPV6_ROUTE, Bytes),
    ],
};

pub static CREATE_PDR_SCHEMA: Schema = Schema {
    name: "Create PDR",
    fields: &[
        req("PDR ID", PDR_ID, U16),
        req("Precedence", PRECEDENCE, U32),
        req("PDI", PDI, Struct(&PDI_SCHEMA)),
        opt("Outer Header Removal", OUTER_HEADER_REMOVAL, U8),
        opt("FAR ID", FAR_ID, U32),
        rep("URR ID", URR_ID, U32),
        rep("QER ID", QER_ID, U32),
        opt("Activate Predefined Rules", ACTIVATE_PREDEFINED_RULES, Bytes),
    ],
};

pub static FORWARDING_PARAMETERS_SCHEMA: Schema = Schema {
    name: "Forwarding Parameters",
    fields: &[
        req("Destination Interface", DESTINATION_INTERFACE, U8),
        opt("Network Instance", NETWORK_INSTANCE, Bytes),
        opt("Redirect Information", REDIRECT_INFORMATION, Bytes),
        opt("Outer Header Creation", OUTER_HEADER_CREATION, Bytes),
        opt("Transport Level Marking", TRANSPORT_LEVEL_MARKING, U16),
        opt("Forwarding Policy", FORWARDING_POLICY, Bytes),
        opt("Header Enrichment", HEADER_ENRICHMENT, Bytes),
        opt("Linked Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8),
        opt("Proxying", PROXYING, U8),
    ],
};

pub static CREATE_FAR_SCHEMA: Schema = Schema {
    name: "Create FAR",
    fields: &[
        req("FAR ID", FAR_ID, U32),
        req("Apply Action", APPLY_ACTION, Bytes),
        opt("Forwarding Parameters", FORWARDING_PARAMETERS, Struct(&FORWARDING_PARAMETERS_SCHEMA)),
        opt("Duplicating Parameters", DUPLICATING_PARAMETERS, Bytes),
        opt("BAR ID", BAR_ID, U8),
    ],
};

pub static CREATE_QER_SCHEMA: Schema = Schema {
    name: "Create QER",
    fields: &[
        req("QER ID", QER_ID, U32),
        opt("QER Correlation ID", QER_CORRELATION_ID, U32),
        req("Gate Status", GATE_STATUS, U8),
        opt("Maximum Bitrate", MBR, Bytes),
        opt("Guaranteed Bitrate", GBR, Bytes),
        opt("Packet Rate", PACKET_RATE, Bytes),
        opt("DL Flow Level Marking", DL_FLOW_LEVEL_MARKING, Bytes),
        opt("QoS Flow Identifier", QFI, U8),
        opt("Reflective QoS", RQI, U8),
    ],
};

pub static UPDATE_PDR_SCHEMA: Schema = Schema {
    name: "Update PDR",
    fields: &[
        req("PDR ID", PDR_ID, U16),
        opt("Outer Header Removal", OUTER_HEADER_REMOVAL, U8),
        opt("Precedence", PRECEDENCE, U32),
        opt("PDI", PDI, Struct(&PDI_SCHEMA)),
        opt("FAR ID", FAR_ID, U32),
        rep("URR ID", URR_ID, U32),
        rep("QER ID", QER_ID, U32),
        opt("Activate Predefined Rules", ACTIVATE_PREDEFINED_RULES, Bytes),
        opt("Deactivate Predefined Rules", DEACTIVATE_PREDEFINED_RULES, Bytes),
    ],
};

pub static UPDATE_FORWARDING_PARAMETERS_SCHEMA: Schema = Schema {
    name: "Update Forwarding Parameters",
    fields: &[
        opt("Destination Interface", DESTINATION_INTERFACE, U8),
        opt("Network Instance", NETWORK_INSTANCE, Bytes),
        opt("Redirect Information", REDIRECT_INFORMATION, Bytes),
        opt("Outer Header Creation", OUTER_HEADER_CREATION, Bytes),
        opt("Transport Level Marking", TRANSPORT_LEVEL_MARKING, U16),
        opt("Forwarding Policy", FORWARDING_POLICY, Bytes),
        opt("Header Enrichment", HEADER_ENRICHMENT, Bytes),
        opt("PFCPSMReq-Flags", PFCP_SMREQ_FLAGS, U8),
        opt("Linked Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8),
    ],
};

pub static UPDATE_FAR_SCHEMA: Schema = Schema {
    name: "Update FAR",
    fields: &[
        req("FAR ID", FAR_ID, U32),
        opt("Apply Action", APPLY_ACTION, Bytes),
        opt(
            "Update Forwarding Parameters",
            UPDATE_FORWARDING_PARAMETERS,
            Struct(&UPDATE_FORWARDING_PARAMETERS_SCHEMA),
        ),
        opt("Update Duplicating Parameters", UPDATE_DUPLICATING_PARAMETERS, Bytes),
        opt("BAR ID", BAR_ID, U8),
    ],
};

pub static UPDATE_QER_SCHEMA: Schema = Schema {
    name: "Update QER",
    fields: &[
        req("QER ID", QER_ID, U32),
        opt("QER Correlation ID", QER_CORRELATION_ID, U32),
        opt("Gate Status", GATE_STATUS, U8),
        opt("Maximum Bitrate", MBR, Bytes),
        opt("Guaranteed Bitrate", GBR, Bytes),
        opt("Packet Rate", PACKET_RATE, Bytes),
        opt("DL Flow Level Marking", DL_FLOW_LEVEL_MARKING, Bytes),
        opt("QoS Flow Identifier", QFI, U8),
        opt("Reflective QoS", RQI, U8),
    ],
};

pub static REMOVE_PDR_SCHEMA: Schema = Schema {
    name: "Remove PDR",
    fields: &[req("PDR ID", PDR_ID, U16)],
};

pub static REMOVE_FAR_SCHEMA: Schema = Schema {
    name: "Remove FAR",
    fields: &[req("FAR ID", FAR_ID, U32)],
};

pub static CREATE_TRAFFIC_ENDPOINT_SCHEMA: Schema = Schema {
    name: "Create Traffic Endpoint",
    fields: &[
        req("Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8),
        opt("Local F-TEID", F_TEID, Bytes),
        opt("Network Instance", NETWORK_INSTANCE, Bytes),
        opt("UE IP Address", UE_IP_ADDRESS, Bytes),
        opt("Ethernet PDU Session Information", ETHERNET_PDU_SESSION_INFORMATION, U8),
        opt("Framed-Route", FRAMED_ROUTE, Bytes),
        opt("Framed-Routing", FRAMED_ROUTING, U32),
        opt("Framed-IPv6-Route", FRAMED_IPV6_ROUTE, Bytes),
    ],
};

pub static CREATED_TRAFFIC_ENDPOINT_SCHEMA: Schema = Schema {
    name: "Created Traffic Endpoint",
    fields: &[
        req("Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8),
        opt("Local F-TEID", F_TEID, Bytes),
    ],
};

pub static UPDATE_TRAFFIC_ENDPOINT_SCHEMA: Schema = Schema {
    name: "Update Traffic Endpoint",
    fields: &[
        req("Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8),
        opt("Local F-TEID", F_TEID, Bytes),
        opt("Network Instance", NETWORK_INSTANCE, Bytes),
        opt("UE IP Address", UE_IP_ADDRESS, Bytes),
        opt("Framed-Route", FRAMED_ROUTE, Bytes),
        opt("Framed-Routing", FRAMED_ROUTING, U32),
        opt("Framed-IPv6-Route", FRAMED_IPV6_ROUTE, Bytes),
    ],
};

pub static REMOVE_TRAFFIC_ENDPOINT_SCHEMA: Schema = Schema {
    name: "Remove Traffic Endpoint",
    fields: &[req("Traffic Endpoint ID", TRAFFIC_ENDPOINT_ID, U8)],
};

pub static CREATED_PDR_SCHEMA: Schema = Schema {
    name: "Created PDR",
    fields: &[
        req("PDR ID", PDR_ID, U16),
        opt("Local F-TEID", F_TEID, Bytes),
    ],
};

pub static LOAD_CONTROL_INFORMATION_SCHEMA: Schema = Schema {
    name: "Load Control Information",
    fields: &[req("Load Control Sequence Number", SEQUENCE_NUMBER, U32)],
};

// ----------------------------------------------------------------------------
// Message bodies
// ----------------------------------------------------------------------------

pub static HEARTBEAT_REQUEST: Schema = Schema {
    name: "Heartbeat Request",
    fields: &[req("Recovery Time Stamp", RECOVERY_TIME_STAMP, U32)],
};

pub static HEARTBEAT_RESPONSE: Schema = Schema {
    name: "Heartbeat Response",
    fields: &[req("Recovery Time Stamp", RECOVERY_TIME_STAMP, U32)],
};

pub static ASSOCIATION_SETUP_REQUEST: Schema = Schema {
    name: "Association Setup Request",
    fields: &[
        req("Node ID", NODE_ID, Bytes),
        req("Recovery Time Stamp", RECOVERY_TIME_STAMP, U32),
        opt("UP Function Features", UP_FUNCTION_FEATURES, Bytes),
        opt("CP Function Features", CP_FUNCTION_FEATURES, U8),
        opt(
            "User Plane IP Resource Information",
            USER_PLANE_IP_RESOURCE_INFORMATION,
            Bytes,
        ),
    ],
};

pub static ASSOCIATION_SETUP_RESPONSE: Schema = Schema {
    name: "Association Setup Response",
    fields: &[
        req("Node ID", NODE_ID, Bytes),
        req("Cause", CAUSE, U8),
        req("Recovery Time Stamp", RECOVERY_TIME_STAMP, U32),
        opt("UP Function Features", UP_FUNCTION_FEATURES, Bytes),
        opt("CP Function Features", CP_FUNCTION_FEATURES, U8),
        opt(
            "User Plane IP Resource Information",
            USER_PLANE_IP_RESOURCE_INFORMATION,
            Bytes,
        ),
    ],
};

pub static ASSOCIATION_RELEASE_REQUEST: Schema = Schema {
    name: "Association Release Request",
    fields: &[req("Node ID", NODE_ID, Bytes)],
};

pub static ASSOCIATION_RELEASE_RESPONSE: Schema = Schema {
    name: "Association Release Response",
    fields: &[req("Node ID", NODE_ID, Bytes), req("Cause", CAUSE, U8)],
};

pub static SESSION_ESTABLISHMENT_REQUEST: Schema = Schema {
    name: "Session Establishment Request",
    fields: &[
        req("Node ID", NODE_ID, Bytes),
        req("CP F-SEID", F_SEID, Bytes),
        rep("Create PDR", CREATE_PDR, Struct(&CREATE_PDR_SCHEMA)),
        rep("Create FAR", CREATE_FAR, Struct(&CREATE_FAR_SCHEMA)),
        rep("Create QER", CREATE_QER, Struct(&CREATE_QER_SCHEMA)),
        opt(
            "Create Traffic Endpoint",
            CREATE_TRAFFIC_ENDPOINT,
            Struct(&CREATE_TRAFFIC_ENDPOINT_SCHEMA),
        ),
        opt("PDN Type", PDN_TYPE, U8),
        opt("User Plane Inactivity Timer", USER_PLANE_INACTIVITY_TIMER, U32),
        opt("User ID", USER_ID, Bytes),
        opt("Trace Information", TRACE_INFORMATION, Bytes),
    ],
};

pub static SESSION_ESTABLISHMENT_RESPONSE: Schema = Schema {
    name: "Session Establishment Response",
    fields: &[
        req("Node ID", NODE_ID, Bytes),
        req("Cause", CAUSE, U8),
        opt("Offending IE", OFFENDING_IE, U16),
        opt("UP F-SEID", F_SEID, Bytes),
        opt("Created PDR", CREATED_PDR, Struct(&CREATED_PDR_SCHEMA)),
        opt(
            "Load Control Information",
            LOAD_CONTROL_INFORMATION,
            Struct(&LOAD_CONTROL_INFORMATION_SCHEMA),
        ),
        opt("Failed Rule ID", FAILED_RULE_ID, Bytes),
        opt(
            "Created Traffic Endpoint",
            CREATED_TRAFFIC_ENDPOINT,
            Struct(&CREATED_TRAFFIC_ENDPOINT_SCHEMA),
        ),
    ],
};

pub static SESSION_MODIFICATION_REQUEST: Schema = Schema {
    name: "Session Modification Request",
    fields: &[
        opt("CP F-SEID", F_SEID, Bytes),
        rep("Remove PDR", REMOVE_PDR, Struct(&REMOVE_PDR_SCHEMA)),
        rep("Remove FAR", REMOVE_FAR, Struct(&REMOVE_FAR_SCHEMA)),
        opt(
            "Remove Traffic Endpoint",
            REMOVE_TRAFFIC_ENDPOINT,
            Struct(&REMOVE_TRAFFIC_ENDPOINT_SCHEMA),
        ),
        rep("Create PDR", CREATE_PDR, Struct(&CREATE_PDR_SCHEMA)),
        rep("Create FAR", CREATE_FAR, Struct(&CREATE_FAR_SCHEMA)),
        rep("Create QER", CREATE_QER, Struct(&CREATE_QER_SCHEMA)),
        opt(
            "Create Traffic Endpoint",
            CREATE_TRAFFIC_ENDPOINT,
            Struct(&CREATE_TRAFFIC_ENDPOINT_SCHEMA),
        ),
        rep("Update PDR", UPDATE_PDR, Struct(&UPDATE_PDR_SCHEMA)),
        rep("Update FAR", UPDATE_FAR, Struct(&UPDATE_FAR_SCHEMA)),
        rep("Update QER", UPDATE_QER, Struct(&UPDATE_QER_SCHEMA)),
        opt(
            "Update Traffic Endpoint",
            UPDATE_TRAFFIC_ENDPOINT,
            Struct(&UPDATE_TRAFFIC_ENDPOINT_SCHEMA),
        ),
        opt("PFCPSMReq-Flags", PFCP_SMREQ_FLAGS, U8),
        opt("User Plane Inactivity Timer", USER_PLANE_INACTIVITY_TIMER, U32),
        opt("Trace Information", TRACE_INFORMATION, Bytes),
    ],
};

pub static SESSION_MODIFICATION_RESPONSE: Schema = Schema {
    name: "Session Modification Response",
    fields: &[
        req("Cause", CAUSE, U8),
        opt("Offending IE", OFFENDING_IE, U16),
        opt("Created PDR", CREATED_PDR, Struct(&CREATED_PDR_SCHEMA)),
        opt(
            "Load Control Information",
            LOAD_CONTROL_INFORMATION,
            Struct(&LOAD_CONTROL_INFORMATION_SCHEMA),
        ),
        opt("Failed Rule ID", FAILED_RULE_ID, Bytes),
        opt(
            "Created/Updated Traffic Endpoint",
            CREATED_TRAFFIC_ENDPOINT,
            Struct(&CREATED_TRAFFIC_ENDPOINT_SCHEMA),
        ),
    ],
};

pub static SESSION_DELETION_REQUEST: Schema = Schema {
    name: "Session Deletion Request",
    fields: &[],
};

pub static SESSION_DELETION_RESPONSE: Schema = Schema {
    name: "Session Deletion Response",
    fields: &[
        req("Cause", CAUSE, U8),
        opt("Offending IE", OFFENDING_IE, U16),
        opt(
            "Load Control Information",
            LOAD_CONTROL_INFORMATION,
            Struct(&LOAD_CONTROL_INFORMATION_SCHEMA),
        ),
    ],
};

/// Body schema for a message type, if this crate knows it
pub fn schema_for(message_type: u8) -> Option<&'static Schema> {
    let message_type = PfcpMessageType::try_from(message_type).ok()?;
    let schema = match message_type {
        PfcpMessageType::HeartbeatRequest => &HEARTBEAT_REQUEST,
        PfcpMessageType::HeartbeatResponse => &HEARTBEAT_RESPONSE,
        PfcpMessageType::AssociationSetupRequest => &ASSOCIATION_SETUP_REQUEST,
        PfcpMessageType::AssociationSetupResponse => &ASSOCIATION_SETUP_RESPONSE,
        PfcpMessageType::AssociationReleaseRequest => &ASSOCIATION_RELEASE_REQUEST,
        PfcpMessageType::AssociationReleaseResponse => &ASSOCIATION_RELEASE_RESPONSE,
        PfcpMessageType::SessionEstablishmentRequest => &SESSION_ESTABLISHMENT_REQUEST,
        PfcpMessageType::SessionEstablishmentResponse => &SESSION_ESTABLISHMENT_RESPONSE,
        PfcpMessageType::SessionModificationRequest => &SESSION_MODIFICATION_REQUEST,
        PfcpMessageType::SessionModificationResponse => &SESSION_MODIFICATION_RESPONSE,
        PfcpMessageType::SessionDeletionRequest => &SESSION_DELETION_REQUEST,
        PfcpMessageType::SessionDeletionResponse => &SESSION_DELETION_RESPONSE,
        _ => return None,
    };
    Some(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn check_unique_tags(schema: &'static Schema, seen: &mut HashSet<&'static str>) {
        if !seen.insert(schema.name) {
            return;
        }
        let mut tags = HashSet::new();
        for field in schema.fields {
            let tag = field.tag.expect("catalogue fields are tagged");
            assert!(tags.insert(tag), "{}: tag {} declared twice", schema.name, tag);
            if let ValueKind::Struct(inner) = field.kind {
                check_unique_tags(inner, seen);
            }
        }
    }

    #[test]
    fn test_tags_unique_within_each_schema() {
        let mut seen = HashSet::new();
        for t in (1..=15u8).chain(50..=57) {
            if let Some(schema) = schema_for(t) {
                check_unique_tags(schema, &mut seen);
            }
        }
        assert!(seen.contains("PDI"));
        assert!(seen.contains("Forwarding Parameters"));
    }

    #[test]
    fn test_schema_lookup() {
        assert_eq!(schema_for(1).map(|s| s.name), Some("Heartbeat Request"));
        assert_eq!(schema_for(51).map(|s| s.name), Some("Session Establishment Response"));
        assert!(schema_for(11).is_none()); // Version Not Supported Response
        assert!(schema_for(56).is_none()); // Session Report Request
        assert!(schema_for(200).is_none());
    }
}
