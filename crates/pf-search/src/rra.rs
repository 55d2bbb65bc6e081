//! Reverse Resumable A* (RRA*, C5): a goal-rooted A* that never runs to
//! completion on its own. The forward search (WHCA*) asks it for the
//! admissible, consistent heuristic cost of individual cells and it expands
//! just far enough to answer, remembering everything it has already closed
//! so a later query for the same cell is free.

use pf_core::{AgentId, CPos, BinaryHeap, INVALID_COST};

use pf_graph::cell_info::{CellInfo, CellStatus, Layer};
use pf_graph::graph::{CostModifier, GridGraph, NoCostModifier};
use pf_graph::locomotor::Locomotor;
use pf_graph::map::Map;

use crate::open_set::{OpenEntry, SeqCounter};

/// Heuristic weighting knob (§6/§9 Open Question 3). `100` keeps RRA*
/// admissible; values above `100` let it overestimate in exchange for
/// fewer expansions. Testable property 5 (admissibility) pins this at 100.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RraConfig {
    pub heuristic_weight_percent: u32,
}

impl Default for RraConfig {
    fn default() -> Self {
        RraConfig { heuristic_weight_percent: 100 }
    }
}

/// A single Move activity's resumable backward search, rooted at its goal
/// cell. Owns its cell-info layer and open set for the whole lifetime of
/// the move (possibly many WHCA* windows); disposed once when the move
/// activity finishes.
pub struct RraSearch<'a, M: Map, C: CostModifier = NoCostModifier> {
    graph: &'a GridGraph<'a, M, C>,
    locomotor: &'a dyn Locomotor,
    agent: AgentId,
    ignore: Option<AgentId>,
    goal: CPos,
    /// Anchor the internal octile heuristic points toward. Per §9 Open
    /// Question 4 this is the agent's *start* cell, not the ever-moving
    /// query origin — resolved in DESIGN.md as deliberate: it keeps the
    /// very first expansion focused without needing to be re-aimed as the
    /// agent advances.
    start_hint: CPos,
    config: RraConfig,
    layer: Layer<CPos>,
    open: BinaryHeap<OpenEntry<CPos>>,
    seq: SeqCounter,
    /// Set once the open set empties without closing every queried cell:
    /// the goal component is exhausted and further queries are answered
    /// with the blocked sentinel without touching the heap again.
    exhausted: bool,
}

impl<'a, M: Map, C: CostModifier> RraSearch<'a, M, C> {
    /// Initializes RRA* with the goal cell as its single root, per §4.3.
    /// `layer` is an already-acquired, empty cell-info layer (the caller
    /// owns pooling; see `pf-activity`).
    pub fn new(
        graph: &'a GridGraph<'a, M, C>,
        locomotor: &'a dyn Locomotor,
        agent: AgentId,
        ignore: Option<AgentId>,
        goal: CPos,
        start_hint: CPos,
        config: RraConfig,
        mut layer: Layer<CPos>,
    ) -> Self {
        let mut seq = SeqCounter::default();
        let h = weighted_octile(goal, start_hint, config.heuristic_weight_percent);
        layer.insert(goal, CellInfo::root(h));
        let mut open = BinaryHeap::new();
        open.add(OpenEntry::new(h, seq.next(), goal));
        RraSearch { graph, locomotor, agent, ignore, goal, start_hint, config, layer, open, seq, exhausted: false }
    }

    pub fn goal(&self) -> CPos {
        self.goal
    }

    /// Returns `cost_so_far` for `cell`, expanding RRA*'s open set until
    /// `cell` is closed (or the open set empties first, meaning `cell` is
    /// unreachable from the goal on the static graph).
    ///
    /// Resumability (§3 invariant, testable property 6): once a cell is
    /// closed, repeated queries for it are answered directly from the
    /// layer and never re-expand anything.
    pub fn resume_until_closed(&mut self, cell: CPos) -> u32 {
        if let Some(info) = self.layer.get(cell) {
            if info.status == CellStatus::Closed {
                return info.cost_so_far;
            }
        }
        if self.exhausted {
            return INVALID_COST;
        }
        while !self.open.empty() {
            let popped = match self.open.pop() {
                Ok(entry) => entry,
                Err(_) => break,
            };
            let current = popped.node;
            // Stale duplicate: a cheaper entry for this node already closed it.
            if self.layer.status(current) == CellStatus::Closed {
                continue;
            }
            let mut info = self.layer.get_or_default(current);
            info.status = CellStatus::Closed;
            self.layer.insert(current, info);

            if current == cell {
                return info.cost_so_far;
            }

            let predecessor = info.previous;
            let successors = self.graph.standard_successors(
                self.locomotor,
                self.agent,
                current,
                predecessor,
                self.ignore,
            );
            for succ in successors {
                if self.layer.status(succ.to) == CellStatus::Closed {
                    continue;
                }
                let tentative = info.cost_so_far.saturating_add(succ.cost);
                let existing = self.layer.get_or_default(succ.to);
                if existing.status != CellStatus::Unvisited && tentative >= existing.cost_so_far {
                    continue;
                }
                let h = weighted_octile(succ.to, self.start_hint, self.config.heuristic_weight_percent);
                let f = tentative.saturating_add(h);
                self.layer.insert(
                    succ.to,
                    CellInfo {
                        cost_so_far: tentative,
                        estimated_total: f,
                        previous: Some(current),
                        status: CellStatus::Open,
                        arrival_tick: None,
                    },
                );
                self.open.add(OpenEntry::new(f, self.seq.next(), succ.to));
            }
        }
        self.exhausted = true;
        INVALID_COST
    }

    /// `true` if `cell` has already been closed — the cheap predicate WHCA*
    /// uses for its "prefer RRA*-closed successors" optimization (§4.4 step
    /// 4). Never expands anything itself.
    pub fn is_closed(&self, cell: CPos) -> bool {
        self.layer.status(cell) == CellStatus::Closed
    }

    /// Releases the cell-info layer this search was holding. Idempotent at
    /// the call-site level: callers should call this at most once (the
    /// owning Move activity does, on finish), matching §7's "Disposed
    /// twice is idempotent" by simply not being called again.
    pub fn into_layer(self) -> Layer<CPos> {
        self.layer
    }
}

impl<'a, M: Map, C: CostModifier> crate::whca::HeuristicSource for RraSearch<'a, M, C> {
    fn cost(&mut self, cell: CPos) -> u32 {
        self.resume_until_closed(cell)
    }
    fn is_closed(&self, cell: CPos) -> bool {
        self.is_closed(cell)
    }
}

fn weighted_octile(from: CPos, to: CPos, weight_percent: u32) -> u32 {
    let raw = from.octile_distance(to);
    ((raw as u64) * (weight_percent as u64) / 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_graph::graph::GraphConfig;
    use pf_graph::locomotor::{Blockers, NoBlockers};
    use pf_graph::map::WorldPos;
    use pf_core::{Facing, WorldTick, CELL_COST};
    use pf_graph::reservation::ReservationTable;

    struct OpenMap {
        size: i32,
    }

    impl Map for OpenMap {
        fn contains(&self, cell: CPos) -> bool {
            cell.x >= 0 && cell.y >= 0 && cell.x < self.size && cell.y < self.size
        }
        fn center_of_cell(&self, cell: CPos) -> WorldPos {
            WorldPos { x: cell.x as f32, y: cell.y as f32 }
        }
        fn facing_between(&self, from: CPos, to: CPos, fallback: Facing) -> Facing {
            Facing::between(from, to, fallback)
        }
        fn height(&self, _cell: CPos) -> i32 {
            0
        }
        fn find_tiles_in_circle(&self, _center: WorldPos, _radius: f32) -> Vec<CPos> {
            Vec::new()
        }
        fn offset_of_subcell(&self, _subcell: u8) -> WorldPos {
            WorldPos { x: 0.0, y: 0.0 }
        }
        fn between_cells(&self, a: CPos, b: CPos) -> WorldPos {
            WorldPos { x: (a.x + b.x) as f32 / 2.0, y: (a.y + b.y) as f32 / 2.0 }
        }
    }

    struct FlatLocomotor;

    impl Locomotor for FlatLocomotor {
        fn movement_cost_to_enter(
            &self,
            _agent: AgentId,
            _cell: CPos,
            _blockers: &dyn Blockers,
            _ignore: Option<AgentId>,
        ) -> Option<u32> {
            Some(CELL_COST)
        }
        fn can_move_freely_into(
            &self,
            _agent: AgentId,
            _cell: CPos,
            _blockers: &dyn Blockers,
            _ignore: Option<AgentId>,
        ) -> bool {
            true
        }
        fn can_move_freely_into_cooperative(
            &self,
            _agent: AgentId,
            _cell: CPos,
            _tick: WorldTick,
            _blockers: &dyn Blockers,
            _ignore: Option<AgentId>,
            _reservations: &ReservationTable,
        ) -> bool {
            true
        }
    }

    #[test]
    fn resumability_returns_identical_cost_without_reexpansion() {
        let map = OpenMap { size: 10 };
        let graph = GridGraph::new(&map, &[], GraphConfig::default());
        let locomotor = FlatLocomotor;
        let goal = CPos::new(9, 9);
        let start = CPos::new(0, 0);
        let layer: Layer<CPos> = Layer::new();
        let mut rra = RraSearch::new(&graph, &locomotor, AgentId(0), None, goal, start, RraConfig::default(), layer);

        let first = rra.resume_until_closed(CPos::new(5, 5));
        let second = rra.resume_until_closed(CPos::new(5, 5));
        assert_eq!(first, second);
    }

    #[test]
    fn cost_from_goal_to_itself_is_zero() {
        let map = OpenMap { size: 10 };
        let graph = GridGraph::new(&map, &[], GraphConfig::default());
        let locomotor = FlatLocomotor;
        let goal = CPos::new(4, 4);
        let layer: Layer<CPos> = Layer::new();
        let mut rra =
            RraSearch::new(&graph, &locomotor, AgentId(0), None, goal, CPos::new(0, 0), RraConfig::default(), layer);
        assert_eq!(rra.resume_until_closed(goal), 0);
    }

    #[test]
    fn admissible_lower_bound_on_an_open_grid() {
        let map = OpenMap { size: 10 };
        // Lane bias perturbs the pure metric by design (§6); disable it so
        // the comparison below is against the unperturbed octile distance.
        let graph = GridGraph::new(&map, &[], GraphConfig { lane_bias: 0 });
        let locomotor = FlatLocomotor;
        let goal = CPos::new(9, 0);
        let layer: Layer<CPos> = Layer::new();
        let mut rra =
            RraSearch::new(&graph, &locomotor, AgentId(0), None, goal, CPos::new(0, 0), RraConfig::default(), layer);
        let query = CPos::new(0, 0);
        let h = rra.resume_until_closed(query);
        assert_eq!(h, query.octile_distance(goal));
    }
}
