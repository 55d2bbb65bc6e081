//! The injected-capability traits the move activity (C9) itself consumes,
//! as opposed to [`pf_graph::Locomotor`]/[`pf_graph::Map`], which the grid
//! graph consumes (see `pf-graph`'s own module docs for why those two live
//! one layer down).
//!
//! These are narrower than §6's full "Agent mobility trait" contract: `W`
//! and `reset_speed` are carried on [`crate::config::ActivityConfig`]
//! instead of the trait (a host-side config value, not a per-agent query),
//! and `locomotor`/`pathfinder`/`RRAsearch` are supplied as explicit
//! arguments to [`crate::activity::MoveActivity::tick`] rather than
//! threaded through the agent handle — a narrower, more idiomatic seam
//! that keeps this trait object-safe. Recorded as an Open Question
//! resolution in `DESIGN.md`.

use pf_core::{AgentId, CPos, Facing};

/// Per-agent facing/turning facts.
pub trait AgentFacing {
    /// Angle turned per tick, in [`Facing`] units.
    fn turn_speed(&self) -> u16;
}

/// Per-agent mobility facts: where it is, which way it's facing, how fast
/// it crosses a cell.
pub trait AgentMobility {
    fn from_cell(&self) -> CPos;
    fn to_cell(&self) -> CPos;
    fn from_subcell(&self) -> u8;
    fn to_subcell(&self) -> u8;
    fn facing(&self) -> Facing;
    fn movement_speed_for_cell(&self, cell: CPos) -> u32;
    /// `true` if every heading change must be an explicit stop-and-turn
    /// rather than a free curve absorbed into the move (§4.4/§4.6).
    fn always_turn_in_place(&self) -> bool;
}

/// The external simulation world: its clock and who's standing where.
///
/// Custom movement layers (tunnels, bridges) are not part of this trait —
/// the `GridGraph` a `MoveActivity` receives through `TickCtx` is already
/// built with whatever layer slice the host wants active, once, at graph
/// construction time, application-side.
pub trait World {
    fn world_tick(&self) -> pf_core::WorldTick;
    /// Every actor currently occupying `cell` (possibly more than one, if
    /// the host allows stacking).
    fn actors_at(&self, cell: CPos) -> Vec<AgentId>;
    /// `true` if `actor` cannot be nudged or displaced (stationary terrain
    /// fixtures, turrets, wreckage) as opposed to a friendly unit that
    /// could in principle move out of the way. Consulted by the
    /// nudge-or-repath decision (§4.6) and by `WindowInit`'s
    /// immovable-only first pass. Not in §6's interface contract verbatim;
    /// added because both of those behaviors need it and the write-up
    /// otherwise leaves "immovable" undefined (see `DESIGN.md`).
    fn is_immovable(&self, actor: AgentId) -> bool;
}
