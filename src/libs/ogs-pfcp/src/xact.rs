//! PFCP Transactions
//!
//! A transaction tracks one outstanding request awaiting its response, or
//! one sent response kept around in case the peer retransmits the request
//! (3GPP TS 29.244 Section 6.4).
//!
//! State machine:
//! ```text
//! Created --send--> Active --ValidResponse / quiet period--> Completed
//!                     |
//!                     +--retries used up--> Exhausted
//! ```
//!
//! The dispatch path delivers [`ReceiveEvent`]s through an unbounded
//! mailbox so that a slow transaction never stalls datagram reception.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

use crate::config::XactConfig;
use crate::error::{PfcpError, PfcpResult};
use crate::message::PfcpMessage;
use crate::transport::DatagramSocket;

/// Event delivered from the dispatch path to a waiting transaction
#[derive(Debug, Clone)]
pub enum ReceiveEvent {
    /// The peer sent the request again; the response should be resent
    ResendRequest {
        remote: SocketAddr,
        message: PfcpMessage,
    },
    /// Response correlated to an outstanding request
    ValidResponse {
        remote: SocketAddr,
        message: PfcpMessage,
    },
}

impl ReceiveEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResendRequest { .. } => "ResendRequest",
            Self::ValidResponse { .. } => "ValidResponse",
        }
    }
}

/// Whether the transaction carries a request or a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XactDirection {
    SendingRequest,
    SendingResponse,
}

/// PFCP transaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum XactState {
    Created = 0,
    Active = 1,
    Completed = 2,
    Exhausted = 3,
}

impl XactState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Active,
            2 => Self::Completed,
            _ => Self::Exhausted,
        }
    }
}

/// Receiving side of a transaction's event queue
pub type Mailbox = mpsc::UnboundedReceiver<ReceiveEvent>;

/// PFCP transaction
pub struct PfcpXact {
    /// Registry key: local address for requests, peer address for responses
    pub consumer: String,
    pub sequence_number: u32,
    pub message_type: u8,
    pub direction: XactDirection,
    /// Peer the serialized message is sent to
    pub dest: SocketAddr,
    /// Serialized message
    pub payload: Bytes,
    state: AtomicU8,
    events: mpsc::UnboundedSender<ReceiveEvent>,
}

impl fmt::Debug for PfcpXact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PfcpXact")
            .field("consumer", &self.consumer)
            .field("sequence_number", &self.sequence_number)
            .field("message_type", &self.message_type)
            .field("direction", &self.direction)
            .field("dest", &self.dest)
            .field("state", &self.state())
            .finish()
    }
}

impl PfcpXact {
    /// Create a transaction for an already serialized message
    pub fn new(
        direction: XactDirection,
        consumer: String,
        message: &PfcpMessage,
        dest: SocketAddr,
        payload: Bytes,
    ) -> (Arc<Self>, Mailbox) {
        let (events, mailbox) = mpsc::unbounded_channel();
        let xact = Arc::new(Self {
            consumer,
            sequence_number: message.sequence_number(),
            message_type: message.message_type(),
            direction,
            dest,
            payload,
            state: AtomicU8::new(XactState::Created as u8),
            events,
        });
        (xact, mailbox)
    }

    pub fn state(&self) -> XactState {
        XactState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: XactState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Queue an event for the transaction; never blocks
    pub fn deliver(&self, event: ReceiveEvent) -> PfcpResult<()> {
        self.events
            .send(event)
            .map_err(|_| PfcpError::MailboxClosed(self.sequence_number))
    }

    /// Send the serialized message to the peer
    pub async fn transmit<S: DatagramSocket + ?Sized>(&self, socket: &S) -> PfcpResult<()> {
        socket.send_to(&self.payload, self.dest).await?;
        if self.state() == XactState::Created {
            self.set_state(XactState::Active);
        }
        Ok(())
    }
}

/// Drive a request transaction: send up to `request_retries` times, waiting
/// `request_timeout` after each send for a `ValidResponse`.
pub async fn run_request<S: DatagramSocket + ?Sized>(
    xact: &PfcpXact,
    mailbox: &mut Mailbox,
    socket: &S,
    policy: &XactConfig,
) -> PfcpResult<PfcpMessage> {
    let attempts = policy.request_retries;

    for attempt in 1..=attempts {
        xact.transmit(socket).await?;
        log::trace!(
            "[{}] request {} sent to {} (attempt {}/{})",
            xact.consumer,
            xact.sequence_number,
            xact.dest,
            attempt,
            attempts
        );

        let deadline = Instant::now() + policy.request_timeout();
        loop {
            match timeout_at(deadline, mailbox.recv()).await {
                Ok(Some(ReceiveEvent::ValidResponse { remote, message })) => {
                    xact.set_state(XactState::Completed);
                    log::debug!(
                        "[{}] request {} answered by {} ({})",
                        xact.consumer,
                        xact.sequence_number,
                        remote,
                        message.type_name()
                    );
                    return Ok(message);
                }
                Ok(Some(event)) => {
                    log::warn!(
                        "[{}] request {}: unexpected {} event ignored",
                        xact.consumer,
                        xact.sequence_number,
                        event.name()
                    );
                }
                Ok(None) => return Err(PfcpError::MailboxClosed(xact.sequence_number)),
                Err(_) => break,
            }
        }
    }

    xact.set_state(XactState::Exhausted);
    log::debug!(
        "[{}] request {} to {}: no response after {} attempts",
        xact.consumer,
        xact.sequence_number,
        xact.dest,
        attempts
    );
    Err(PfcpError::RetryExhausted {
        sequence_number: xact.sequence_number,
        peer: xact.dest,
        attempts,
    })
}

/// Drive a response transaction whose response has already been sent once.
///
/// Each `ResendRequest` resends the response and restarts the
/// `response_timeout` quiet period; the transaction completes when a full
/// quiet period passes. The caller keeps the mailbox open until the
/// transaction is unregistered.
pub async fn run_response<S: DatagramSocket + ?Sized>(
    xact: &PfcpXact,
    mailbox: &mut Mailbox,
    socket: &S,
    policy: &XactConfig,
) -> PfcpResult<()> {
    let mut deadline = Instant::now() + policy.response_timeout();

    loop {
        match timeout_at(deadline, mailbox.recv()).await {
            Ok(Some(ReceiveEvent::ResendRequest { remote, .. })) => {
                log::debug!(
                    "[{}] request {} retransmitted by {}, resending response",
                    xact.consumer,
                    xact.sequence_number,
                    remote
                );
                xact.transmit(socket).await?;
                deadline = Instant::now() + policy.response_timeout();
            }
            Ok(Some(event)) => {
                log::warn!(
                    "[{}] response {}: unexpected {} event ignored",
                    xact.consumer,
                    xact.sequence_number,
                    event.name()
                );
            }
            Ok(None) => return Err(PfcpError::MailboxClosed(xact.sequence_number)),
            Err(_) => {
                xact.set_state(XactState::Completed);
                log::trace!(
                    "[{}] response {} presumed delivered",
                    xact.consumer,
                    xact.sequence_number
                );
                return Ok(());
            }
        }
    }
}
