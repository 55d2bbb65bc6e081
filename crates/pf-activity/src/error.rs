//! `pf-activity`'s error type.
//!
//! Per §9 Open Question 2, the "Path is empty" condition the original
//! source treats as a fatal internal-consistency exception is demoted here
//! to a clean [`crate::activity::MoveOutcome::Abandoned`] transition rather
//! than an error or panic — this enum is deliberately small.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActivityError {
    /// `tick` was called again after the activity already reported
    /// [`crate::activity::MoveOutcome::Arrived`] or `Abandoned`.
    #[error("move activity ticked after it already finished")]
    AlreadyFinished,
}

pub type ActivityResult<T> = Result<T, ActivityError>;
