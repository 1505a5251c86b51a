//! Call lifecycle manager.
//!
//! [`Call`] is the state machine for one bidirectional streaming call
//! attempt: it owns the transport handle, the in-flight operation
//! table, and the buffered writer, and it dispatches every completion
//! the queue reports back. All mutation goes through `&mut self`, so
//! caller-invoked methods and completion dispatch share one
//! serialization domain by construction; the owner is expected to
//! drive both from the same worker.
//!
//! A call captures the observer's generation at construction. When
//! the owning stream abandons the attempt it bumps the generation;
//! completions already in flight still arrive and are retired from
//! the operation table, but their observer-visible effects are
//! suppressed. That is what makes cancel-and-restart race-free
//! without recalling operations from the queue.

use std::sync::{Arc, Weak};

use bytes::Bytes;

use crate::completion::{Completion, OpKind, Outcome, Payload, Ticket};
use crate::metrics::{
    COMPLETIONS_STALE, OPS_COMPLETED, OPS_FAILED, OPS_ORPHANED, OPS_SUBMITTED, WRITER_SUBMITTED,
};
use crate::op::OpTable;
use crate::status::{ErrorCode, Status};
use crate::transport::{CallTransport, StreamObserver};
use crate::writer::BufferedWriter;

pub struct Call<T: CallTransport, O: StreamObserver> {
    transport: T,
    observer: Weak<O>,
    /// Observer generation captured at construction.
    generation: u64,
    ops: OpTable,
    writer: BufferedWriter,
    started: bool,
    read_pending: bool,
    write_and_finish: bool,
}

impl<T: CallTransport, O: StreamObserver> Call<T, O> {
    /// Create a call attempt against `transport`, reporting to
    /// `observer`. Captures the observer's current generation.
    pub fn new(transport: T, observer: &Arc<O>) -> Self {
        Call {
            transport,
            generation: observer.generation(),
            observer: Arc::downgrade(observer),
            ops: OpTable::new(),
            writer: BufferedWriter::new(),
            started: false,
            read_pending: false,
            write_and_finish: false,
        }
    }

    // ── Caller-facing operations ────────────────────────────────

    /// Begin the call.
    ///
    /// # Panics
    ///
    /// Panics if the call was already started.
    pub fn start(&mut self) {
        assert!(!self.started, "call already started");
        self.started = true;
        let ticket = self.submit(OpKind::Start);
        self.transport.submit_start(ticket);
    }

    /// Request the next inbound message. The read-pending flag clears
    /// as soon as the read completes, whether or not the completion
    /// is acted upon.
    ///
    /// # Panics
    ///
    /// Panics if a read is already pending.
    pub fn read(&mut self) {
        assert!(
            !self.read_pending,
            "cannot schedule a read before the previous read completes"
        );
        self.read_pending = true;
        let ticket = self.submit(OpKind::Read);
        self.transport.submit_read(ticket);
    }

    /// Queue `message` for transmission. Never writes to the
    /// transport directly; the writer enforces one write in flight.
    pub fn write(&mut self, message: Bytes) {
        if let Some(message) = self.writer.enqueue(message) {
            self.submit_write(message);
        }
    }

    /// Send `message` as the final outbound message, discarding any
    /// queued-but-unsent traffic, then finish once its write
    /// completes. No `on_stream_write` is reported for it.
    pub fn write_and_finish(&mut self, message: Bytes) {
        self.write_and_finish = true;
        // Jump the queue: anything still buffered will never be sent.
        self.writer.clear();
        if let Some(message) = self.writer.enqueue(message) {
            self.submit_write(message);
        }
    }

    /// Stop outbound writes, cancel the call context, and submit a
    /// client-initiated finish. The resulting status is intentionally
    /// discarded; cancellation is not an error.
    pub fn finish(&mut self) {
        self.writer.stop();
        self.transport.try_cancel();
        let ticket = self.submit(OpKind::ClientFinish);
        self.transport.submit_finish(ticket);
    }

    // ── Completion dispatch ─────────────────────────────────────

    /// Dispatch one completion reported by the queue.
    ///
    /// Retires the operation from the in-flight table first; a ticket
    /// that matches no in-flight operation is counted and dropped, so
    /// a completion arriving after the call was torn down and rebuilt
    /// can never touch reused state.
    pub fn complete(&mut self, completion: Completion) {
        let Some(kind) = self.ops.complete(completion.ticket) else {
            OPS_ORPHANED.increment();
            return;
        };
        OPS_COMPLETED.increment();

        match completion.outcome {
            Outcome::Failed => self.on_operation_failed(),
            Outcome::Success(payload) => match kind {
                OpKind::Start => self.on_start_complete(),
                OpKind::Read => self.on_read_complete(payload),
                OpKind::Write => self.on_write_complete(),
                OpKind::ServerFinish => self.on_server_finish_complete(payload),
                // Client-initiated finish: the transport acknowledged
                // the cancellation; the status is discarded.
                OpKind::ClientFinish => {}
            },
        }
    }

    fn on_start_complete(&mut self) {
        let Some(observer) = self.current_observer() else {
            return;
        };
        if let Some(message) = self.writer.start() {
            self.submit_write(message);
        }
        observer.on_stream_start();
    }

    fn on_read_complete(&mut self, payload: Payload) {
        // Clears even when stale: pending-read tracking is per-call,
        // not per-generation, and must not wedge a restarted stream.
        self.read_pending = false;
        let Some(observer) = self.current_observer() else {
            return;
        };
        if let Payload::Message(message) = payload {
            observer.on_stream_read(message);
        }
    }

    fn on_write_complete(&mut self) {
        if self.write_and_finish && self.writer.is_empty() {
            // Final write succeeded. Runs even when the generation is
            // stale: an in-flight finish-on-write must still release
            // the transport.
            self.finish();
            return;
        }

        let Some(observer) = self.current_observer() else {
            return;
        };
        if let Some(message) = self.writer.on_successful_write() {
            self.submit_write(message);
        }
        observer.on_stream_write();
    }

    fn on_server_finish_complete(&mut self, payload: Payload) {
        let Some(observer) = self.current_observer() else {
            return;
        };
        let status = match payload {
            Payload::Status(ts) => Status::from(ts),
            // A finish completion must carry a status.
            _ => Status::new(ErrorCode::Internal, "finish completion carried no status"),
        };
        observer.on_stream_error(status);
    }

    /// The queue reported an operation as broken rather than
    /// completed. Writes stop unconditionally; if the call is still
    /// current, a server-initiated finish retrieves the authoritative
    /// terminal status.
    fn on_operation_failed(&mut self) {
        OPS_FAILED.increment();
        self.writer.stop();
        if self.current_observer().is_some() {
            let ticket = self.submit(OpKind::ServerFinish);
            self.transport.submit_finish(ticket);
        }
    }

    // ── Internal ────────────────────────────────────────────────

    /// The observer, if it is still alive and this call is still its
    /// current generation. Counts a stale completion otherwise.
    fn current_observer(&self) -> Option<Arc<O>> {
        let current = self
            .observer
            .upgrade()
            .filter(|observer| observer.generation() == self.generation);
        if current.is_none() {
            COMPLETIONS_STALE.increment();
        }
        current
    }

    fn submit(&mut self, kind: OpKind) -> Ticket {
        OPS_SUBMITTED.increment();
        self.ops.submit(kind)
    }

    fn submit_write(&mut self, message: Bytes) {
        WRITER_SUBMITTED.increment();
        let ticket = self.submit(OpKind::Write);
        self.transport.submit_write(ticket, message);
    }

    // ── Diagnostics ─────────────────────────────────────────────

    /// Whether `start()` has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a read is currently outstanding.
    pub fn read_pending(&self) -> bool {
        self.read_pending
    }

    /// Generation captured when this attempt was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Operations submitted but not yet completed.
    pub fn in_flight_ops(&self) -> usize {
        self.ops.in_flight()
    }
}
