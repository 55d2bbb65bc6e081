//! The algorithmic core of the engine: RRA* (C5), WHCA* (C6), and path
//! reconstruction (C7), built on `pf-core`'s heap and `pf-graph`'s grid.
//!
//! | module      | contents                                                |
//! |-------------|------------------------------------------------------------|
//! | [`open_set`] | `OpenEntry`, the shared `f`-ordered heap entry for both searches |
//! | [`rra`]     | `RraSearch`: goal-rooted, resumable backward A* (C5)        |
//! | [`whca`]    | `whca::search`: forward space-time A* guided by RRA* (C6)   |
//! | [`path`]    | `reconstruct_2d`/`reconstruct_3d`: parent-link walks (C7)   |
//! | [`unit_path`] | `find_unit_path`: one-shot non-cooperative A* (§6)        |
//!
//! Neither search is cooperative with the other's internals beyond what the
//! functional write-up calls for: RRA* never knows WHCA* exists, and WHCA*
//! only ever calls RRA* through the narrow [`whca::HeuristicSource`] seam,
//! so this crate has no dependency on how the caller (`pf-pathfinder`)
//! chooses to own an `RraSearch` across windows.

pub mod error;
pub mod open_set;
pub mod path;
pub mod rra;
pub mod unit_path;
pub mod whca;

pub use error::{SearchError, SearchResult};
pub use open_set::OpenEntry;
pub use path::{reconstruct_2d, reconstruct_3d};
pub use rra::{RraConfig, RraSearch};
pub use unit_path::find_unit_path;
pub use whca::{HeuristicSource, Kinetics, WhcaOutcome};
