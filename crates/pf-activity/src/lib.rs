//! C9: the agent-facing move activity. Wires `pf-pathfinder`'s algorithms
//! into a tick-driven state machine an external simulation can drive one
//! agent at a time.
//!
//! | module       | contents                                                   |
//! |--------------|-------------------------------------------------------------|
//! | [`config`]   | `ActivityConfig`: window size, rewindow cadence, nudge radius |
//! | [`traits`]   | `AgentFacing`/`AgentMobility`/`World`: the host's injected capabilities |
//! | [`blockers`] | `ImmovableBlockers`/`AllBlockers`: `World` adapted to `pf_graph::Blockers` |
//! | [`kinetics`] | `KineticsAdapter`: `AgentMobility`/`AgentFacing` adapted to `pf_search::Kinetics` |
//! | [`activity`] | `MoveActivity`: the Startup/WindowInit/Step state machine (§4.6)    |
//! | [`error`]    | `ActivityError`                                             |

pub mod activity;
pub mod blockers;
pub mod config;
pub mod error;
pub mod kinetics;
pub mod traits;

pub use activity::{MoveActivity, MoveOutcome, TickCtx};
pub use blockers::{AllBlockers, ImmovableBlockers};
pub use config::ActivityConfig;
pub use error::{ActivityError, ActivityResult};
pub use kinetics::KineticsAdapter;
pub use traits::{AgentFacing, AgentMobility, World};

// Re-exported since every `MoveActivity` and `TickCtx` is addressed by and
// pools its search layers against one of these.
pub use pf_graph::cell_info::{WorldId, WorldLayerPools};
