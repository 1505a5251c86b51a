//! Single-write-in-flight outbound queue.
//!
//! The transport permits only one outstanding write per call, but
//! callers may enqueue eagerly. `BufferedWriter` decouples the two: it
//! queues messages FIFO and yields exactly one message to submit at a
//! time, the next only after [`BufferedWriter::on_successful_write`].
//!
//! The writer is a pure state machine: draining returns the message
//! to submit rather than calling into the transport, so the call
//! owns every actual submission.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::metrics::{WRITER_DROPPED, WRITER_ENQUEUED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    /// Created; the call's start completion has not been observed yet.
    /// Messages queue but nothing drains.
    Idle,
    /// Actively draining, one write in flight at a time.
    Started,
    /// Finishing; enqueued messages are discarded.
    Stopped,
}

pub(crate) struct BufferedWriter {
    queue: VecDeque<Bytes>,
    state: WriterState,
    write_in_flight: bool,
}

impl BufferedWriter {
    pub(crate) fn new() -> Self {
        BufferedWriter {
            queue: VecDeque::new(),
            state: WriterState::Idle,
            write_in_flight: false,
        }
    }

    /// Mark the writer active. Returns one queued message to submit,
    /// if any were enqueued before the call started.
    pub(crate) fn start(&mut self) -> Option<Bytes> {
        self.state = WriterState::Started;
        self.try_write()
    }

    /// Mark the writer inactive; subsequent enqueues are discarded.
    pub(crate) fn stop(&mut self) {
        self.state = WriterState::Stopped;
    }

    /// Discard all queued, not-yet-submitted messages.
    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    /// Queue `message` for transmission. Returns a message to submit
    /// if the drain rule allows one.
    pub(crate) fn enqueue(&mut self, message: Bytes) -> Option<Bytes> {
        if self.state == WriterState::Stopped {
            WRITER_DROPPED.increment();
            return None;
        }
        WRITER_ENQUEUED.increment();
        self.queue.push_back(message);
        self.try_write()
    }

    /// Acknowledge the in-flight write. Returns the next message to
    /// submit, if any.
    pub(crate) fn on_successful_write(&mut self) -> Option<Bytes> {
        self.write_in_flight = false;
        self.try_write()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drain rule: only while started, with a non-empty queue and no
    /// write in flight. Yields exactly the oldest queued message.
    fn try_write(&mut self) -> Option<Bytes> {
        if self.state != WriterState::Started || self.write_in_flight {
            return None;
        }
        let message = self.queue.pop_front()?;
        self.write_in_flight = true;
        Some(message)
    }
}
