//! wirecall runtime metrics.
//!
//! Counters for operation traffic, generation-suppressed completions,
//! and writer queue activity. Exposed through the `metriken` registry
//! like every other component in the stack.

use metriken::{Counter, metric};

// ── Operation traffic ────────────────────────────────────────────

#[metric(
    name = "wirecall/ops/submitted",
    description = "Operations submitted against the completion queue"
)]
pub static OPS_SUBMITTED: Counter = Counter::new();

#[metric(
    name = "wirecall/ops/completed",
    description = "Operations completed and retired from the in-flight table"
)]
pub static OPS_COMPLETED: Counter = Counter::new();

#[metric(
    name = "wirecall/ops/failed",
    description = "Operations the completion queue reported as broken"
)]
pub static OPS_FAILED: Counter = Counter::new();

#[metric(
    name = "wirecall/ops/orphaned",
    description = "Completions whose ticket matched no in-flight operation"
)]
pub static OPS_ORPHANED: Counter = Counter::new();

// ── Staleness filtering ──────────────────────────────────────────

#[metric(
    name = "wirecall/completions/stale",
    description = "Completions suppressed because the call generation was superseded"
)]
pub static COMPLETIONS_STALE: Counter = Counter::new();

// ── Writer queue ─────────────────────────────────────────────────

#[metric(
    name = "wirecall/writer/enqueued",
    description = "Messages accepted into the outbound write queue"
)]
pub static WRITER_ENQUEUED: Counter = Counter::new();

#[metric(
    name = "wirecall/writer/dropped",
    description = "Messages discarded because the writer was stopped"
)]
pub static WRITER_DROPPED: Counter = Counter::new();

#[metric(
    name = "wirecall/writer/submitted",
    description = "Messages handed to the transport for transmission"
)]
pub static WRITER_SUBMITTED: Counter = Counter::new();
