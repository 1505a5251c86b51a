use bytes::Bytes;

use crate::status::TransportStatus;

/// Operation kinds encoded in the upper 8 bits of a [`Ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpKind {
    /// Begin the call on the transport.
    Start = 0,
    /// Receive exactly one inbound message.
    Read = 1,
    /// Transmit exactly one outbound message.
    Write = 2,
    /// Retrieve the terminal status after a transport-reported failure.
    ServerFinish = 3,
    /// Cancel the call and wait for the transport to acknowledge.
    ClientFinish = 4,
}

impl OpKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(OpKind::Start),
            1 => Some(OpKind::Read),
            2 => Some(OpKind::Write),
            3 => Some(OpKind::ServerFinish),
            4 => Some(OpKind::ClientFinish),
            _ => None,
        }
    }
}

/// Opaque completion tag handed to the transport at submission and
/// echoed back when the operation completes.
///
/// Layout (64-bit):
/// ```text
/// Bits 63..56: OpKind (8 bits)
/// Bits 31..0:  operation-table slot (32 bits)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

impl Ticket {
    const KIND_SHIFT: u64 = 56;
    const KIND_MASK: u64 = 0xFF << Self::KIND_SHIFT;
    const SLOT_MASK: u64 = 0xFFFF_FFFF;

    /// Encode an operation kind and table slot into a ticket.
    #[inline]
    pub fn encode(kind: OpKind, slot: u32) -> Self {
        Ticket(((kind as u64) << Self::KIND_SHIFT) | (slot as u64))
    }

    /// Decode the operation kind.
    #[inline]
    pub fn kind(self) -> Option<OpKind> {
        let raw = ((self.0 & Self::KIND_MASK) >> Self::KIND_SHIFT) as u8;
        OpKind::from_u8(raw)
    }

    /// Decode the operation-table slot.
    #[inline]
    pub fn slot(self) -> u32 {
        (self.0 & Self::SLOT_MASK) as u32
    }

    /// Get the raw u64 value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Data carried by a successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Start, write, and client-finish completions carry no data.
    None,
    /// A read completion carries the inbound message.
    Message(Bytes),
    /// A server-finish completion carries the terminal status.
    Status(TransportStatus),
}

/// How the completion queue reported the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation completed normally.
    Success(Payload),
    /// The queue reported the operation as broken (connection torn
    /// down, call aborted). Distinct from a normal completion.
    Failed,
}

/// One completion event, delivered by the completion-queue context to
/// the owner of the [`Call`](crate::Call).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

impl Completion {
    /// A successful completion with no payload.
    pub fn success(ticket: Ticket) -> Self {
        Completion {
            ticket,
            outcome: Outcome::Success(Payload::None),
        }
    }

    /// A successful read completion carrying `message`.
    pub fn message(ticket: Ticket, message: Bytes) -> Self {
        Completion {
            ticket,
            outcome: Outcome::Success(Payload::Message(message)),
        }
    }

    /// A successful finish completion carrying the terminal status.
    pub fn status(ticket: Ticket, status: TransportStatus) -> Self {
        Completion {
            ticket,
            outcome: Outcome::Success(Payload::Status(status)),
        }
    }

    /// A failed completion.
    pub fn failed(ticket: Ticket) -> Self {
        Completion {
            ticket,
            outcome: Outcome::Failed,
        }
    }
}
