//! wirecall — lifecycle core for one bidirectional streaming RPC.
//!
//! wirecall turns a raw asynchronous completion-queue RPC primitive
//! into a safe, observable, backpressure-aware stream abstraction. It
//! sequences the asynchronous operations of a single call attempt
//! (start, read, write, finish), keeps at most one write in flight
//! while accepting writes eagerly, and filters out completions that
//! belong to a call generation the owning stream has already
//! abandoned.
//!
//! # Architecture
//!
//! ```text
//!   owning stream (retry policy, codec)
//!        | start/read/write/finish        ^ on_stream_* (generation-checked)
//!   +----v--------------------------------+----+
//!   | Call          lifecycle state machine    |
//!   |   OpTable     in-flight ops, by ticket   |
//!   |   BufferedWriter  one write in flight    |
//!   +----+--------------------------------^----+
//!        | submit_*(ticket)               | complete(Completion)
//!   +----v--------------------------------+----+
//!   | CallTransport + completion queue context |
//!   +------------------------------------------+
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wirecall::{Call, Completion};
//!
//! let observer = Arc::new(MyStream::new());
//! let mut call = Call::new(transport, &observer);
//!
//! call.start();
//! call.write(request_bytes);   // queued until the start completes
//! call.read();
//!
//! // Driven by the owner, on the same worker as the calls above:
//! while let Some(completion) = queue.poll() {
//!     call.complete(completion);
//! }
//! ```
//!
//! wirecall is sans-IO: it never blocks and never spawns. The owner
//! feeds completions in via [`Call::complete`] and must drive the
//! call's methods and its completions from one worker; `&mut Call`
//! makes that single serialization domain explicit.
//!
//! Out of scope: payload encoding, channel and credential setup,
//! retry/backoff policy, and connection pooling all belong to the
//! layers above and below.

// ── Internal modules ────────────────────────────────────────────
pub(crate) mod call;
pub(crate) mod op;
pub(crate) mod writer;

// ── Public modules ──────────────────────────────────────────────
pub mod completion;
pub mod metrics;
pub mod status;
pub mod transport;

// ── Re-exports ──────────────────────────────────────────────────

/// Lifecycle manager for one call attempt.
pub use call::Call;
/// One completion event reported by the queue.
pub use completion::Completion;
/// Operation kind carried in a ticket.
pub use completion::OpKind;
/// Outcome of a completed operation.
pub use completion::Outcome;
/// Data carried by a successful completion.
pub use completion::Payload;
/// Opaque completion tag.
pub use completion::Ticket;
/// Domain error codes.
pub use status::ErrorCode;
/// Domain-level terminal status.
pub use status::Status;
/// Raw transport-level terminal status.
pub use status::TransportStatus;
/// Duplex streaming transport boundary.
pub use transport::CallTransport;
/// Callback surface implemented by the owning stream.
pub use transport::StreamObserver;
