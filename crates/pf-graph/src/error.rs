//! `pf-graph`'s error type.

use thiserror::Error;

/// Errors produced by `pf-graph`.
///
/// Per the engine's error taxonomy, a rejected or missing edge is not an
/// error here — it's simply omitted from a successor list (§7 "InvalidCell").
/// This enum only covers failures in the pool/reservation bookkeeping itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("cell-info layer already returned to its pool")]
    AlreadyDisposed,
}

pub type GraphResult<T> = Result<T, GraphError>;
