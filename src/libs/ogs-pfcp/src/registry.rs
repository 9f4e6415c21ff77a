//! PFCP Transaction Registry
//!
//! Live transactions indexed by consumer, then by sequence number. At most
//! one transaction exists per (consumer, sequence number).

use std::net::SocketAddr;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{PfcpError, PfcpResult};
use crate::message::{MessageKind, PfcpMessage};
use crate::xact::PfcpXact;

/// Two-level concurrent transaction table
#[derive(Debug, Default)]
pub struct XactRegistry {
    consumers: DashMap<String, DashMap<u32, Arc<PfcpXact>>>,
}

impl XactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transaction unless its (consumer, sequence number) is taken
    pub fn put(&self, xact: Arc<PfcpXact>) -> PfcpResult<()> {
        let inner = self.consumers.entry(xact.consumer.clone()).or_default();
        let result = match inner.entry(xact.sequence_number) {
            Entry::Occupied(_) => Err(PfcpError::DuplicateSequenceNumber {
                consumer: xact.consumer.clone(),
                sequence_number: xact.sequence_number,
            }),
            Entry::Vacant(slot) => {
                slot.insert(xact);
                Ok(())
            }
        };
        result
    }

    /// Insert a transaction and return a guard that removes it on drop
    pub fn register(self: &Arc<Self>, xact: Arc<PfcpXact>) -> PfcpResult<Registration> {
        self.put(xact.clone())?;
        Ok(Registration {
            registry: Arc::clone(self),
            xact,
        })
    }

    pub fn get(&self, consumer: &str, sequence_number: u32) -> Option<Arc<PfcpXact>> {
        self.consumers
            .get(consumer)
            .and_then(|inner| inner.get(&sequence_number).map(|x| Arc::clone(x.value())))
    }

    /// Look up the transaction an inbound message belongs to.
    ///
    /// Responses are matched against requests this node sent, registered
    /// under `local`; a miss is an unsolicited response. Requests are
    /// matched against responses sent to `remote`; a miss means the request
    /// is new.
    pub fn find(
        &self,
        message: &PfcpMessage,
        local: SocketAddr,
        remote: SocketAddr,
    ) -> PfcpResult<Option<Arc<PfcpXact>>> {
        let sequence_number = message.sequence_number();
        match message.kind() {
            MessageKind::Response => {
                let consumer = local.to_string();
                match self.get(&consumer, sequence_number) {
                    Some(xact) => Ok(Some(xact)),
                    None => Err(PfcpError::UnsolicitedResponse {
                        consumer,
                        sequence_number,
                    }),
                }
            }
            MessageKind::Request => Ok(self.get(&remote.to_string(), sequence_number)),
            MessageKind::Neither => Ok(None),
        }
    }

    /// Remove the entry for (consumer, sequence number)
    pub fn remove(&self, consumer: &str, sequence_number: u32) -> PfcpResult<Arc<PfcpXact>> {
        let removed = self
            .consumers
            .get(consumer)
            .and_then(|inner| inner.remove(&sequence_number))
            .map(|(_, xact)| xact);

        let Some(xact) = removed else {
            return Err(PfcpError::XactNotFound {
                consumer: consumer.to_string(),
                sequence_number,
            });
        };

        // The outer read guard is released above; remove_if takes the write lock
        self.consumers.remove_if(consumer, |_, inner| inner.is_empty());
        Ok(xact)
    }

    pub fn contains(&self, consumer: &str, sequence_number: u32) -> bool {
        self.consumers
            .get(consumer)
            .is_some_and(|inner| inner.contains_key(&sequence_number))
    }

    /// Number of live transactions
    pub fn len(&self) -> usize {
        self.consumers.iter().map(|inner| inner.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registered transaction; unregisters it when dropped
#[derive(Debug)]
pub struct Registration {
    registry: Arc<XactRegistry>,
    xact: Arc<PfcpXact>,
}

impl Registration {
    pub fn xact(&self) -> &Arc<PfcpXact> {
        &self.xact
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Err(e) = self
            .registry
            .remove(&self.xact.consumer, self.xact.sequence_number)
        {
            log::warn!("Failed to unregister transaction: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::PfcpMessageType;
    use crate::ie::Structure;
    use crate::types::RecoveryTimeStamp;
    use crate::xact::XactDirection;
    use bytes::Bytes;

    fn local() -> SocketAddr {
        "10.0.0.1:8805".parse().unwrap()
    }

    fn remote() -> SocketAddr {
        "10.0.0.2:8805".parse().unwrap()
    }

    fn xact(direction: XactDirection, consumer: SocketAddr, seq: u32) -> Arc<PfcpXact> {
        let msg = PfcpMessage::heartbeat_request(seq, RecoveryTimeStamp(1));
        PfcpXact::new(direction, consumer.to_string(), &msg, remote(), Bytes::new()).0
    }

    #[test]
    fn test_put_rejects_duplicate() {
        let registry = XactRegistry::new();
        registry.put(xact(XactDirection::SendingRequest, local(), 1)).unwrap();
        registry.put(xact(XactDirection::SendingRequest, local(), 2)).unwrap();
        registry.put(xact(XactDirection::SendingResponse, remote(), 1)).unwrap();

        let err = registry
            .put(xact(XactDirection::SendingRequest, local(), 1))
            .unwrap_err();
        assert!(matches!(
            err,
            PfcpError::DuplicateSequenceNumber { sequence_number: 1, .. }
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_concurrent_put_single_winner() {
        let registry = Arc::new(XactRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.put(xact(XactDirection::SendingRequest, local(), 42)).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_find_response_uses_local_consumer() {
        let registry = XactRegistry::new();
        registry.put(xact(XactDirection::SendingRequest, local(), 42)).unwrap();

        let response = PfcpMessage::heartbeat_response(42, RecoveryTimeStamp(1));
        let found = registry.find(&response, local(), remote()).unwrap();
        assert_eq!(found.map(|x| x.sequence_number), Some(42));

        let stray = PfcpMessage::heartbeat_response(43, RecoveryTimeStamp(1));
        assert!(matches!(
            registry.find(&stray, local(), remote()),
            Err(PfcpError::UnsolicitedResponse { sequence_number: 43, .. })
        ));
    }

    #[test]
    fn test_find_request_uses_remote_consumer() {
        let registry = XactRegistry::new();
        registry.put(xact(XactDirection::SendingResponse, remote(), 7)).unwrap();

        let request = PfcpMessage::heartbeat_request(7, RecoveryTimeStamp(1));
        assert!(registry.find(&request, local(), remote()).unwrap().is_some());

        let new_request = PfcpMessage::heartbeat_request(8, RecoveryTimeStamp(1));
        assert!(registry.find(&new_request, local(), remote()).unwrap().is_none());

        let other = PfcpMessage::new(PfcpMessageType::VersionNotSupportedResponse, 7, Structure::new());
        assert!(registry.find(&other, local(), remote()).unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let registry = XactRegistry::new();
        registry.put(xact(XactDirection::SendingRequest, local(), 1)).unwrap();
        assert!(registry.contains(&local().to_string(), 1));

        let removed = registry.remove(&local().to_string(), 1).unwrap();
        assert_eq!(removed.sequence_number, 1);
        assert!(registry.is_empty());
        assert!(!registry.contains(&local().to_string(), 1));

        assert!(matches!(
            registry.remove(&local().to_string(), 1),
            Err(PfcpError::XactNotFound { sequence_number: 1, .. })
        ));
        assert!(matches!(
            registry.remove("nobody", 1),
            Err(PfcpError::XactNotFound { .. })
        ));
    }

    #[test]
    fn test_registration_unregisters_on_drop() {
        let registry = Arc::new(XactRegistry::new());
        let registration = registry
            .register(xact(XactDirection::SendingRequest, local(), 3))
            .unwrap();
        assert_eq!(registration.xact().sequence_number, 3);
        assert!(registry.contains(&local().to_string(), 3));

        // Same key cannot be registered twice while the guard lives
        assert!(registry
            .register(xact(XactDirection::SendingRequest, local(), 3))
            .is_err());

        drop(registration);
        assert!(registry.is_empty());
    }
}
