//! PFCP Configuration
//!
//! Bind address and transaction timer policy. Parsed from the `pfcp`
//! section of a YAML configuration file:
//! ```yaml
//! pfcp:
//!   address: 127.0.0.4
//!   port: 8805
//!   xact:
//!     request_retries: 3
//!     request_timeout_secs: 3
//!     response_timeout_secs: 15
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PfcpError, PfcpResult};
use crate::types::PFCP_UDP_PORT;

/// Default maximum datagram size accepted by the receive path
pub const DEFAULT_MAX_DATAGRAM_LEN: usize = 2048;

/// Transmissions of a request before giving up
pub const DEFAULT_REQUEST_RETRIES: u32 = 3;

/// Wait for a response after each request transmission (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 3;

/// Inactivity period after which a sent response is presumed delivered (seconds)
pub const DEFAULT_RESPONSE_TIMEOUT_SECS: u64 = 15;

/// Transaction timer policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XactConfig {
    pub request_retries: u32,
    pub request_timeout_secs: u64,
    pub response_timeout_secs: u64,
}

impl Default for XactConfig {
    fn default() -> Self {
        Self {
            request_retries: DEFAULT_REQUEST_RETRIES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            response_timeout_secs: DEFAULT_RESPONSE_TIMEOUT_SECS,
        }
    }
}

impl XactConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }

    pub fn validate(&self) -> PfcpResult<()> {
        if self.request_retries == 0 {
            return Err(PfcpError::InvalidConfig(
                "request_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// PFCP endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PfcpConfig {
    /// Local address; unspecified IPv4 when absent
    #[serde(alias = "address")]
    pub addr: Option<IpAddr>,
    pub port: u16,
    pub max_datagram_len: usize,
    pub xact: XactConfig,
}

impl Default for PfcpConfig {
    fn default() -> Self {
        Self {
            addr: None,
            port: PFCP_UDP_PORT,
            max_datagram_len: DEFAULT_MAX_DATAGRAM_LEN,
            xact: XactConfig::default(),
        }
    }
}

impl PfcpConfig {
    /// Parse the `pfcp` section of a YAML document, or the whole document
    /// when it has no such section
    pub fn from_yaml(yaml: &str) -> PfcpResult<Self> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| PfcpError::InvalidConfig(e.to_string()))?;
        let section = match root.get("pfcp") {
            Some(section) => section.clone(),
            None => root,
        };

        let config: Self = if section.is_null() {
            Self::default()
        } else {
            serde_yaml::from_value(section).map_err(|e| PfcpError::InvalidConfig(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PfcpResult<()> {
        if self.max_datagram_len == 0 {
            return Err(PfcpError::InvalidConfig(
                "max_datagram_len must be positive".to_string(),
            ));
        }
        self.xact.validate()
    }

    /// Address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self.addr.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PfcpConfig::default();
        assert_eq!(config.port, 8805);
        assert_eq!(config.max_datagram_len, 2048);
        assert_eq!(config.xact.request_retries, 3);
        assert_eq!(config.xact.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.xact.response_timeout(), Duration::from_secs(15));
        assert_eq!(config.socket_addr(), "0.0.0.0:8805".parse().unwrap());
    }

    #[test]
    fn test_from_yaml_section() {
        let yaml = r#"
logger:
  level: info
pfcp:
  address: 127.0.0.4
  xact:
    request_retries: 5
"#;
        let config = PfcpConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.addr, Some("127.0.0.4".parse().unwrap()));
        assert_eq!(config.port, 8805);
        assert_eq!(config.xact.request_retries, 5);
        assert_eq!(config.xact.request_timeout_secs, 3);
    }

    #[test]
    fn test_from_yaml_root() {
        let config = PfcpConfig::from_yaml("port: 18805\nmax_datagram_len: 4096\n").unwrap();
        assert_eq!(config.port, 18805);
        assert_eq!(config.max_datagram_len, 4096);
        assert!(config.addr.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            PfcpConfig::from_yaml("port: not-a-port"),
            Err(PfcpError::InvalidConfig(_))
        ));
        assert!(matches!(
            PfcpConfig::from_yaml("xact:\n  request_retries: 0\n"),
            Err(PfcpError::InvalidConfig(_))
        ));
    }
}
