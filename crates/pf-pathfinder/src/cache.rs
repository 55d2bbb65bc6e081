//! The per-agent path cache (C8's other responsibility, per SPEC_FULL §11:
//! "caches the last *path*, not just the last window"). A caller that
//! re-issues an identical `(source, goal, tick)` query for the same agent
//! within the same tick gets the cached result instead of re-running WHCA*.

use std::collections::HashMap;

use pf_core::{AgentId, CPos, WorldTick};

#[derive(Clone, Debug)]
struct CachedPath {
    source: CPos,
    goal: CPos,
    tick: WorldTick,
    path: Vec<CPos>,
}

/// One cache slot per agent. Not a general memoization table: a new query
/// for the same agent with a different `(source, goal, tick)` simply
/// evicts the previous entry, matching "last path per agent" rather than
/// an LRU over the whole history.
#[derive(Default)]
pub struct PathCache {
    entries: HashMap<AgentId, CachedPath>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached path if `agent`'s last query matches exactly.
    pub fn get(&self, agent: AgentId, source: CPos, goal: CPos, tick: WorldTick) -> Option<&[CPos]> {
        self.entries.get(&agent).filter(|e| e.source == source && e.goal == goal && e.tick == tick).map(|e| e.path.as_slice())
    }

    pub fn store(&mut self, agent: AgentId, source: CPos, goal: CPos, tick: WorldTick, path: Vec<CPos>) {
        self.entries.insert(agent, CachedPath { source, goal, tick, path });
    }

    /// Drops `agent`'s cached path, e.g. when its Move activity finishes or
    /// is cancelled.
    pub fn invalidate(&mut self, agent: AgentId) {
        self.entries.remove(&agent);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_on_identical_query_shape() {
        let mut cache = PathCache::new();
        let agent = AgentId(1);
        let source = CPos::new(0, 0);
        let goal = CPos::new(5, 5);
        let tick = WorldTick::new(10);
        cache.store(agent, source, goal, tick, vec![goal, source]);
        assert_eq!(cache.get(agent, source, goal, tick), Some(&[goal, source][..]));
    }

    #[test]
    fn misses_on_a_different_tick() {
        let mut cache = PathCache::new();
        let agent = AgentId(1);
        let source = CPos::new(0, 0);
        let goal = CPos::new(5, 5);
        cache.store(agent, source, goal, WorldTick::new(10), vec![goal]);
        assert_eq!(cache.get(agent, source, goal, WorldTick::new(11)), None);
    }

    #[test]
    fn invalidate_clears_the_slot() {
        let mut cache = PathCache::new();
        let agent = AgentId(1);
        let source = CPos::new(0, 0);
        let goal = CPos::new(5, 5);
        let tick = WorldTick::ZERO;
        cache.store(agent, source, goal, tick, vec![goal]);
        cache.invalidate(agent);
        assert!(cache.get(agent, source, goal, tick).is_none());
    }
}
