//! `pf-pathfinder`'s error type.
//!
//! As with `pf-graph` and `pf-search`, an unreachable target or an empty
//! window is a *value* (an empty or padded `Vec`), not an error (§7). This
//! enum covers only the facade's own bookkeeping failures.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathfinderError {
    /// `find_unit_path_to_range` was asked to path toward a world position
    /// with no tile within `range` the map will offer as a candidate.
    #[error("no candidate cell found within range of the target position")]
    NoCandidateInRange,
}

pub type PathfinderResult<T> = Result<T, PathfinderError>;
