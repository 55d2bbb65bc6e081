//! `SearchRequest`: the bundle of per-query collaborators every facade
//! operation needs — the grid graph, the locomotor, the map, and which
//! agent is asking.

use pf_core::AgentId;

use pf_graph::graph::{CostModifier, GridGraph, NoCostModifier};
use pf_graph::locomotor::Locomotor;
use pf_graph::map::Map;

/// One query's worth of collaborators, borrowed for the duration of a
/// single facade call. Built fresh by the caller per query; `pf-pathfinder`
/// never stores one past the call it's passed into.
pub struct SearchRequest<'a, M: Map, C: CostModifier = NoCostModifier> {
    pub graph: &'a GridGraph<'a, M, C>,
    pub locomotor: &'a dyn Locomotor,
    pub map: &'a M,
    pub agent: AgentId,
    pub ignore: Option<AgentId>,
}

impl<'a, M: Map, C: CostModifier> SearchRequest<'a, M, C> {
    pub fn new(graph: &'a GridGraph<'a, M, C>, locomotor: &'a dyn Locomotor, map: &'a M, agent: AgentId, ignore: Option<AgentId>) -> Self {
        SearchRequest { graph, locomotor, map, agent, ignore }
    }
}
