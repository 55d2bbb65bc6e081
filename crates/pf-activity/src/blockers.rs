//! Adapters from [`crate::traits::World`] to [`pf_graph::locomotor::Blockers`],
//! used by `WindowInit`'s two-pass relaxation (immovable-only, then none)
//! and by the step-execution blocker checks (§4.6).

use pf_core::{AgentId, CPos};

use pf_graph::locomotor::Blockers;

use crate::traits::World;

/// Blocks on any actor at the cell that the world reports as immovable.
/// This is `WindowInit`'s first, stricter pass and the step-execution
/// check for "is this blocker itself movable".
pub struct ImmovableBlockers<'a, W: World> {
    world: &'a W,
}

impl<'a, W: World> ImmovableBlockers<'a, W> {
    pub fn new(world: &'a W) -> Self {
        ImmovableBlockers { world }
    }
}

impl<'a, W: World> Blockers for ImmovableBlockers<'a, W> {
    fn is_blocked(&self, cell: CPos, ignore: Option<AgentId>) -> bool {
        self.world
            .actors_at(cell)
            .into_iter()
            .any(|a| Some(a) != ignore && self.world.is_immovable(a))
    }
}

/// Blocks on any actor at the cell, movable or not. Used by the
/// last-resort "repath against all blockers" step (§4.6).
pub struct AllBlockers<'a, W: World> {
    world: &'a W,
}

impl<'a, W: World> AllBlockers<'a, W> {
    pub fn new(world: &'a W) -> Self {
        AllBlockers { world }
    }
}

impl<'a, W: World> Blockers for AllBlockers<'a, W> {
    fn is_blocked(&self, cell: CPos, ignore: Option<AgentId>) -> bool {
        self.world.actors_at(cell).into_iter().any(|a| Some(a) != ignore)
    }
}
