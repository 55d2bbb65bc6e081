//! Core error type shared by the priority queue and, by re-export, the rest
//! of the engine.
//!
//! Sub-crates define their own error enums for their own failure modes and
//! convert into/out of `PfError` via `From` impls where it helps; they are
//! not required to wrap it.

use thiserror::Error;

/// Errors produced by `pf-core`'s own types.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PfError {
    /// `peek`/`pop` called on an empty [`crate::heap::BinaryHeap`].
    #[error("priority queue is empty")]
    QueueEmpty,
}

/// Shorthand result type for `pf-core`.
pub type PfResult<T> = Result<T, PfError>;
