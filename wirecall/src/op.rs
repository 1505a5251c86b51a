//! In-flight operation table.
//!
//! Every asynchronous primitive submitted against the transport is
//! tracked here from submission until its completion is observed. The
//! slab entry is the operation's liveness token: it is inserted
//! exactly once at submission, and [`OpTable::complete`] removes it
//! exactly once when the completion-queue context reports the ticket
//! back. A completion whose slot is vacant or whose kind does not
//! match the stored entry resolves to `None` and is dropped by the
//! caller, so a stale or forged ticket can never reach freed state.

use slab::Slab;

use crate::completion::{OpKind, Ticket};

#[derive(Default)]
pub(crate) struct OpTable {
    ops: Slab<OpKind>,
}

impl OpTable {
    pub(crate) fn new() -> Self {
        OpTable { ops: Slab::new() }
    }

    /// Register a new in-flight operation and mint its ticket.
    pub(crate) fn submit(&mut self, kind: OpKind) -> Ticket {
        let slot = self.ops.insert(kind);
        debug_assert!(slot <= u32::MAX as usize, "op slot exceeds 32 bits");
        Ticket::encode(kind, slot as u32)
    }

    /// Retire the operation identified by `ticket`.
    ///
    /// Returns the stored kind, or `None` if the slot is vacant or the
    /// ticket's encoded kind disagrees with the entry.
    pub(crate) fn complete(&mut self, ticket: Ticket) -> Option<OpKind> {
        let kind = ticket.kind()?;
        let slot = ticket.slot() as usize;
        if self.ops.get(slot) != Some(&kind) {
            return None;
        }
        Some(self.ops.remove(slot))
    }

    /// Number of operations currently in flight.
    pub(crate) fn in_flight(&self) -> usize {
        self.ops.len()
    }
}
