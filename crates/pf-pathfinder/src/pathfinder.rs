//! `Pathfinder`: C8 in full. A thin struct pairing the stateless facade
//! functions in [`crate::facade`] with a [`PathCache`] so repeat queries
//! within the same tick are free.

use pf_core::{CPos, Facing, WorldTick};

use pf_graph::graph::CostModifier;
use pf_graph::locomotor::Blockers;
use pf_graph::map::Map;
use pf_graph::reservation::ReservationTable;
use pf_search::Kinetics;

use crate::cache::PathCache;
use crate::facade;
use crate::request::SearchRequest;

#[derive(Default)]
pub struct Pathfinder {
    cache: PathCache,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// As [`facade::find_unit_path_whca`], but checks (and populates) the
    /// per-agent cache first.
    #[allow(clippy::too_many_arguments)]
    pub fn find_unit_path_whca<M: Map, C: CostModifier, K: Kinetics>(
        &mut self,
        req: &SearchRequest<M, C>,
        blockers: &dyn Blockers,
        reservations: &ReservationTable,
        source: CPos,
        target: CPos,
        start_tick: WorldTick,
        window: u32,
        initial_facing: Facing,
        kinetics: &K,
    ) -> Vec<CPos> {
        if let Some(cached) = self.cache.get(req.agent, source, target, start_tick) {
            return cached.to_vec();
        }
        let path = facade::find_unit_path_whca(req, blockers, reservations, source, target, start_tick, window, initial_facing, kinetics);
        self.cache.store(req.agent, source, target, start_tick, path.clone());
        path
    }

    /// Drops the cached path for an agent whose Move activity finished or
    /// was cancelled, so a future query doesn't return a stale plan.
    pub fn invalidate(&mut self, agent: pf_core::AgentId) {
        self.cache.invalidate(agent);
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
