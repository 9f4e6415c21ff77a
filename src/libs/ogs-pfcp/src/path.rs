//! PFCP Path
//!
//! A [`PfcpServer`] owns one datagram socket and the transaction registry.
//! It decodes inbound datagrams and correlates them with live transactions,
//! and it provides the send-request / send-response entry points.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::PfcpConfig;
use crate::error::{PfcpError, PfcpResult};
use crate::header::PFCP_MAX_SEQUENCE_NUMBER;
use crate::message::{MessageKind, PfcpMessage};
use crate::registry::XactRegistry;
use crate::transport::DatagramSocket;
use crate::xact::{run_request, run_response, PfcpXact, ReceiveEvent, XactDirection};

/// Outcome of dispatching one inbound datagram
#[derive(Debug)]
pub enum Inbound {
    /// A request no transaction knows about; the caller should answer it
    NewRequest {
        message: PfcpMessage,
        remote: SocketAddr,
    },
    /// Retransmission of a request already answered; the stored response
    /// is resent by its transaction
    ResentRequest {
        sequence_number: u32,
        remote: SocketAddr,
    },
    /// Response handed to the waiting request transaction
    Response {
        sequence_number: u32,
        remote: SocketAddr,
    },
}

/// PFCP endpoint
pub struct PfcpServer<S: DatagramSocket = UdpSocket> {
    socket: Arc<S>,
    local_addr: SocketAddr,
    registry: Arc<XactRegistry>,
    config: PfcpConfig,
    next_sequence: AtomicU32,
}

impl PfcpServer<UdpSocket> {
    /// Bind a UDP socket on the configured address and port
    pub async fn bind(config: &PfcpConfig) -> PfcpResult<Self> {
        config.validate()?;
        let socket = UdpSocket::bind(config.socket_addr()).await?;
        let server = Self::with_socket(socket, config.clone())?;
        log::info!("PFCP server listening on {}", server.local_addr);
        Ok(server)
    }
}

impl<S: DatagramSocket> PfcpServer<S> {
    /// Wrap an already bound socket
    pub fn with_socket(socket: S, config: PfcpConfig) -> PfcpResult<Self> {
        config.validate()?;
        let local_addr = socket.local_addr()?;
        Ok(Self {
            socket: Arc::new(socket),
            local_addr,
            registry: Arc::new(XactRegistry::new()),
            config,
            next_sequence: AtomicU32::new(1),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn registry(&self) -> &XactRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PfcpConfig {
        &self.config
    }

    /// Allocate a sequence number; wraps from 0xFFFFFF back to 1
    pub fn next_sequence_number(&self) -> u32 {
        let prev = self
            .next_sequence
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |seq| {
                Some(if seq >= PFCP_MAX_SEQUENCE_NUMBER { 1 } else { seq + 1 })
            });
        // The closure always returns Some
        match prev {
            Ok(seq) | Err(seq) => seq,
        }
    }

    /// Send a request and wait for its response.
    ///
    /// The request is retransmitted per the transaction policy. Dropping
    /// the returned future abandons the transaction.
    pub async fn send_request(
        &self,
        mut message: PfcpMessage,
        dest: SocketAddr,
    ) -> PfcpResult<PfcpMessage> {
        if !message.is_request() {
            return Err(PfcpError::NotARequest(message.message_type()));
        }
        let payload = message.encode()?;

        let (xact, mut mailbox) = PfcpXact::new(
            XactDirection::SendingRequest,
            self.local_addr.to_string(),
            &message,
            dest,
            payload,
        );
        let _registration = self.registry.register(xact.clone())?;
        log::debug!(
            "[{}] {} {} to {}",
            xact.consumer,
            message.type_name(),
            xact.sequence_number,
            dest
        );

        run_request(&xact, &mut mailbox, &*self.socket, &self.config.xact).await
    }

    /// [`PfcpServer::send_request`] that gives up when `token` is cancelled
    pub async fn send_request_cancellable(
        &self,
        message: PfcpMessage,
        dest: SocketAddr,
        token: &CancellationToken,
    ) -> PfcpResult<PfcpMessage> {
        let sequence_number = message.sequence_number();
        tokio::select! {
            result = self.send_request(message, dest) => result,
            _ = token.cancelled() => {
                log::debug!("Request {sequence_number} to {dest} cancelled");
                Err(PfcpError::Cancelled(sequence_number))
            }
        }
    }

    /// Send a response once and keep it for retransmission if the peer
    /// repeats the request. Returns after the first send.
    pub async fn send_response(&self, mut message: PfcpMessage, dest: SocketAddr) -> PfcpResult<()> {
        if !message.is_response() {
            return Err(PfcpError::NotAResponse(message.message_type()));
        }
        let payload = message.encode()?;

        let (xact, mut mailbox) = PfcpXact::new(
            XactDirection::SendingResponse,
            dest.to_string(),
            &message,
            dest,
            payload,
        );
        let registration = self.registry.register(xact.clone())?;
        xact.transmit(&*self.socket).await?;
        log::debug!(
            "[{}] {} {} sent",
            xact.consumer,
            message.type_name(),
            xact.sequence_number
        );

        let socket = Arc::clone(&self.socket);
        let policy = self.config.xact.clone();
        tokio::spawn(async move {
            let result = run_response(&xact, &mut mailbox, &*socket, &policy).await;
            // Unregister while the mailbox is still open
            drop(registration);
            drop(mailbox);
            if let Err(e) = result {
                log::error!("[{}] response {} failed: {e}", xact.consumer, xact.sequence_number);
            }
        });
        Ok(())
    }

    /// Decode one datagram and correlate it with the live transactions
    pub fn dispatch(&self, data: Bytes, remote: SocketAddr) -> PfcpResult<Inbound> {
        let message = PfcpMessage::decode(data)?;
        let sequence_number = message.sequence_number();

        match message.kind() {
            MessageKind::Request => {
                let Some(xact) = self.registry.find(&message, self.local_addr, remote)? else {
                    return Ok(Inbound::NewRequest { message, remote });
                };
                let event = ReceiveEvent::ResendRequest {
                    remote,
                    message: message.clone(),
                };
                match xact.deliver(event) {
                    Ok(()) => Ok(Inbound::ResentRequest {
                        sequence_number,
                        remote,
                    }),
                    // Response transaction finished between lookup and delivery
                    Err(PfcpError::MailboxClosed(_)) => Ok(Inbound::NewRequest { message, remote }),
                    Err(e) => Err(e),
                }
            }
            MessageKind::Response => {
                // find() reports a miss as UnsolicitedResponse
                if let Some(xact) = self.registry.find(&message, self.local_addr, remote)? {
                    xact.deliver(ReceiveEvent::ValidResponse { remote, message })?;
                }
                Ok(Inbound::Response {
                    sequence_number,
                    remote,
                })
            }
            MessageKind::Neither => Err(PfcpError::UnsupportedMessageType(message.message_type())),
        }
    }

    /// Receive and dispatch the next datagram
    pub async fn recv_from(&self) -> PfcpResult<Inbound> {
        let mut buf = vec![0u8; self.config.max_datagram_len];
        let (n, remote) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(n);

        self.dispatch(Bytes::from(buf), remote).map_err(|e| {
            if !matches!(e, PfcpError::Io(_)) {
                log::warn!("Dropped datagram from {remote}: {e}");
            }
            e
        })
    }

    /// Receive loop: forwards every new request to `tx` until the receiving
    /// side is dropped. Per-datagram errors are logged and skipped.
    pub async fn run(&self, tx: mpsc::Sender<(PfcpMessage, SocketAddr)>) -> PfcpResult<()> {
        loop {
            let inbound = tokio::select! {
                _ = tx.closed() => break,
                inbound = self.recv_from() => inbound,
            };

            match inbound {
                Ok(Inbound::NewRequest { message, remote }) => {
                    if tx.send((message, remote)).await.is_err() {
                        break;
                    }
                }
                Ok(other) => log::trace!("{other:?}"),
                Err(PfcpError::Io(e)) => {
                    log::error!("PFCP socket receive failed: {e}");
                    return Err(PfcpError::Io(e));
                }
                Err(_) => {}
            }
        }
        Ok(())
    }
}
