//! Foundational types shared across the pathfinding workspace:
//!
//! | module   | contents                                                   |
//! |----------|-------------------------------------------------------------|
//! | [`ids`]  | `AgentId`, a strongly typed `u32` wrapper                   |
//! | [`pos`]  | `CPos`, `CVec`, `Facing` — grid coordinates and orientation  |
//! | [`time`] | `WorldTick`, the host simulation's clock                    |
//! | [`heap`] | `BinaryHeap<T>`, the priority queue both search algorithms use |
//! | [`error`]| `PfError` / `PfResult`, shared by [`heap`]                   |
//!
//! Nothing in this crate knows about grids, reservations, or agents moving
//! through space-time; those live in `pf-graph`, `pf-search`,
//! `pf-pathfinder`, and `pf-activity` respectively, each built on top of
//! these primitives.

pub mod error;
pub mod heap;
pub mod ids;
pub mod pos;
pub mod time;

pub use error::{PfError, PfResult};
pub use heap::BinaryHeap;
pub use ids::AgentId;
pub use pos::{CPos, CVec, Facing, CELL_COST, DIAGONAL_DENOMINATOR, DIAGONAL_NUMERATOR, INVALID_COST};
pub use time::{WindowStep, WorldTick};
