//! Boundary traits: the transport below the call, the observer above.

use bytes::Bytes;

use crate::completion::Ticket;
use crate::status::Status;

/// Duplex streaming transport handle for one call attempt.
///
/// Each `submit_*` method issues one asynchronous primitive against
/// the completion queue, tagged with `ticket`. Submission enqueues
/// work and must not block; the queue later reports the ticket back
/// as a [`Completion`](crate::Completion), which the call's owner
/// feeds into [`Call::complete`](crate::Call::complete). A primitive
/// that breaks (connection torn down, call aborted) is reported as a
/// failed completion, not as a submission error.
pub trait CallTransport {
    /// Begin the call.
    fn submit_start(&mut self, ticket: Ticket);

    /// Receive one inbound message.
    fn submit_read(&mut self, ticket: Ticket);

    /// Transmit one outbound message. The transport owns `message`
    /// until the completion fires.
    fn submit_write(&mut self, ticket: Ticket, message: Bytes);

    /// Wait for the terminal status. The completion carries
    /// [`Payload::Status`](crate::Payload::Status).
    fn submit_finish(&mut self, ticket: Ticket);

    /// Synchronous best-effort cancellation of the call context.
    /// Operations already in flight still complete.
    fn try_cancel(&mut self);
}

/// Callback surface implemented by the stream that owns the call.
///
/// Notifications are delivered only for completions whose captured
/// generation matches [`StreamObserver::generation`] at dispatch
/// time; the one exception is the finish sequence triggered by a
/// write-and-finish completion, which runs even when stale so the
/// transport is always released cleanly.
///
/// The call holds the observer weakly. Dropping the observer has the
/// same effect as bumping the generation: every subsequent completion
/// is suppressed.
pub trait StreamObserver {
    /// The stream's current call-attempt generation. Incremented by
    /// the stream each time it replaces its call.
    fn generation(&self) -> u64;

    /// The call started successfully; writes are now draining.
    fn on_stream_start(&self);

    /// One inbound message arrived. The observer issues the next
    /// read itself; reads are not auto-resubmitted.
    fn on_stream_read(&self, message: Bytes);

    /// One outbound message was accepted by the transport.
    fn on_stream_write(&self);

    /// The call ended with a terminal status. Whether to retry is
    /// entirely the observer's decision.
    fn on_stream_error(&self, status: Status);
}
