//! The locomotor: the injected, per-agent-kind movement cost oracle.
//!
//! Implemented by the host application (a locomotor usually corresponds to
//! "infantry", "tank", "aircraft", etc.) and consumed by [`crate::graph`]
//! when computing edge costs. None of these methods are called by
//! `pf-graph` itself with any knowledge of *why* a cell is blocked — that
//! judgment belongs entirely to the implementation.

use pf_core::{AgentId, CPos, WorldTick};

use crate::reservation::ReservationTable;

/// A predicate over temporary occupants of a cell, supplied by the caller at
/// query time (actors currently standing on the grid, as opposed to
/// permanent terrain blockers the locomotor already knows about).
pub trait Blockers {
    /// `true` if `cell` is occupied by something other than `ignore`.
    fn is_blocked(&self, cell: CPos, ignore: Option<AgentId>) -> bool;
}

/// A `Blockers` that never blocks anything, for non-cooperative queries that
/// only care about static/immovable terrain.
pub struct NoBlockers;

impl Blockers for NoBlockers {
    fn is_blocked(&self, _cell: CPos, _ignore: Option<AgentId>) -> bool {
        false
    }
}

/// Per-agent-kind movement cost oracle.
pub trait Locomotor {
    /// Cost to enter `cell`, or `None` if entry is forbidden outright
    /// (impassable terrain, a non-ignored immovable blocker).
    fn movement_cost_to_enter(
        &self,
        agent: AgentId,
        cell: CPos,
        blockers: &dyn Blockers,
        ignore: Option<AgentId>,
    ) -> Option<u32>;

    /// `true` if `agent` could move into `cell` right now, ignoring dynamic
    /// reservations (used by the non-cooperative successor variant).
    fn can_move_freely_into(
        &self,
        agent: AgentId,
        cell: CPos,
        blockers: &dyn Blockers,
        ignore: Option<AgentId>,
    ) -> bool;

    /// As [`Locomotor::can_move_freely_into`], but additionally consults the
    /// reservation table for the projected tick of arrival; used by the
    /// cooperative successor variant that WHCA* drives.
    fn can_move_freely_into_cooperative(
        &self,
        agent: AgentId,
        cell: CPos,
        tick: WorldTick,
        blockers: &dyn Blockers,
        ignore: Option<AgentId>,
        reservations: &ReservationTable,
    ) -> bool;
}
