//! The grid/space-time graph and its supporting records:
//!
//! | module         | contents                                                |
//! |----------------|----------------------------------------------------------|
//! | [`cell_info`]   | `CellInfo`, `CellStatus`, pooled [`cell_info::Layer`]s    |
//! | [`locomotor`]   | The `Locomotor` and `Blockers` injected-capability traits |
//! | [`map`]         | The `Map` injected-capability trait, `CustomLayer`        |
//! | [`graph`]       | `GridGraph`: successors and edge costs (C3)               |
//! | [`reservation`] | `ReservationTable`: shared space-time occupancy (C4)      |
//!
//! `CellInfo` pooling (C2) lives alongside the graph rather than in its own
//! crate, since nothing outside the search algorithms in `pf-search` ever
//! touches a layer directly.

pub mod cell_info;
pub mod error;
pub mod graph;
pub mod locomotor;
pub mod map;
pub mod reservation;

pub use cell_info::{CellInfo, CellStatus, Layer, LayerPool, WorldId, WorldLayerPools};
pub use error::{GraphError, GraphResult};
pub use graph::{CostModifier, GraphConfig, GridGraph, NoCostModifier, Successor, TERRAIN_HEIGHT_CUTOFF};
pub use locomotor::{Blockers, Locomotor, NoBlockers};
pub use map::{CustomLayer, Map, WorldPos};
pub use reservation::{ReservationConfig, ReservationTable, DEFAULT_TIME_LENGTH};
