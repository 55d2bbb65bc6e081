//! `pf-search`'s error type.
//!
//! Per §7's taxonomy, "unreachable" and "window empty" are not failures —
//! they're represented as empty `Vec`s, so this crate has almost nothing to
//! report here. The one real failure mode is calling the heap past what
//! `pf-core`'s `QueueEmpty` already covers, which callers guard against by
//! checking `BinaryHeap::empty()` before popping (§7: "searches guard with
//! `can_expand`").

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("RRA* heuristic queried after its search graph was disposed")]
    HeuristicDisposed,
}

pub type SearchResult<T> = Result<T, SearchError>;
