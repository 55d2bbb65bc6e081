//! The grid graph (C3): given a cell, the outgoing edges and their costs
//! under the current mobility/blocker regime.

use pf_core::{AgentId, CPos, CVec, WorldTick, CELL_COST, DIAGONAL_DENOMINATOR, DIAGONAL_NUMERATOR, INVALID_COST};

use crate::locomotor::{Blockers, Locomotor, NoBlockers};
use crate::map::{CustomLayer, Map};
use crate::reservation::ReservationTable;

/// Steps whose ground-layer height difference exceeds this many units are
/// rejected outright. Fixed per §4.2 step 4; the write-up does not expose
/// this as a tunable.
pub const TERRAIN_HEIGHT_CUTOFF: i32 = 1;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Directional parity tie-break penalty added to encourage agents to
    /// pass each other on consistent sides. `0` disables lane bias.
    pub lane_bias: i32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig { lane_bias: 1 }
    }
}

/// A per-cell cost modifier hook (attract/repel overlays, danger zones, ...).
/// `None` forbids entry outright, same as a locomotor rejection.
pub trait CostModifier {
    fn custom_cost(&self, cell: CPos) -> Option<i32>;
}

/// The default modifier: no adjustment, never forbids.
pub struct NoCostModifier;

impl CostModifier for NoCostModifier {
    fn custom_cost(&self, _cell: CPos) -> Option<i32> {
        Some(0)
    }
}

/// One outgoing edge from a successor query.
#[derive(Copy, Clone, Debug)]
pub struct Successor {
    pub dir: CVec,
    pub to: CPos,
    pub cost: u32,
}

/// The grid/space-time graph abstraction: turns a cell (plus optional
/// predecessor, for direction-restricted pruning) into its outgoing edges.
pub struct GridGraph<'a, M: Map, C: CostModifier = NoCostModifier> {
    map: &'a M,
    layers: &'a [CustomLayer],
    cost_modifier: &'a C,
    config: GraphConfig,
}

impl<'a, M: Map> GridGraph<'a, M, NoCostModifier> {
    pub fn new(map: &'a M, layers: &'a [CustomLayer], config: GraphConfig) -> Self {
        GridGraph { map, layers, cost_modifier: &NoCostModifier, config }
    }
}

impl<'a, M: Map, C: CostModifier> GridGraph<'a, M, C> {
    pub fn with_cost_modifier(
        map: &'a M,
        layers: &'a [CustomLayer],
        cost_modifier: &'a C,
        config: GraphConfig,
    ) -> Self {
        GridGraph { map, layers, cost_modifier, config }
    }

    /// The direction-restricted neighborhood: at a search root (no
    /// predecessor) the full 8-neighborhood; otherwise every direction
    /// except straight back the way the agent came, which the octile
    /// metric never reaches more cheaply through the current node.
    fn candidate_directions(&self, predecessor: Option<CPos>, cell: CPos) -> Vec<CVec> {
        match predecessor {
            None => CVec::NEIGHBORHOOD.to_vec(),
            Some(prev) => {
                let came_from = prev.direction_to(cell);
                let excluded = came_from.reverse();
                CVec::NEIGHBORHOOD.iter().copied().filter(|&d| d != excluded).collect()
            }
        }
    }

    fn lane_bias_cost(&self, from: CPos, dir: CVec) -> i32 {
        if self.config.lane_bias == 0 || dir.is_zero() {
            return 0;
        }
        let reverse = (dir.dx < 0) || (dir.dy < 0 && dir.dx == 0);
        let px = (from.x + reverse as i32) & 1;
        let py = (from.y + reverse as i32) & 1;
        if px == py {
            self.config.lane_bias
        } else {
            0
        }
    }

    /// Base step cost for moving `from` one cell along `dir`, or `None` if
    /// the step is forbidden (impassable terrain, blocker, height gate, or
    /// custom-cost veto).
    fn step_cost(
        &self,
        locomotor: &dyn Locomotor,
        agent: AgentId,
        from: CPos,
        dir: CVec,
        to: CPos,
        blockers: &dyn Blockers,
        ignore: Option<AgentId>,
    ) -> Option<u32> {
        let base = locomotor.movement_cost_to_enter(agent, to, blockers, ignore)?;
        let mut cost = base;
        if dir.is_diagonal() {
            cost = cost.saturating_mul(DIAGONAL_NUMERATOR) / DIAGONAL_DENOMINATOR;
        }

        let custom = self.cost_modifier.custom_cost(to)?;
        cost = if custom >= 0 {
            cost.saturating_add(custom as u32)
        } else {
            cost.saturating_sub(custom.unsigned_abs())
        };

        if to.is_ground() && from.is_ground() {
            if (self.map.height(to) - self.map.height(from)).abs() > TERRAIN_HEIGHT_CUTOFF {
                return None;
            }
        }

        cost = cost.saturating_add(self.lane_bias_cost(from, dir).max(0) as u32);

        Some(cost)
    }

    fn layer_transitions(&self, cell: CPos) -> Vec<Successor> {
        let mut out = Vec::new();
        if cell.is_ground() {
            for layer in self.layers {
                let dest = cell.with_layer(layer.layer);
                if self.map.contains(dest) {
                    out.push(Successor { dir: CVec::ZERO, to: dest, cost: layer.entry_movement_cost });
                }
            }
        } else if let Some(layer) = self.layers.iter().find(|l| l.layer == cell.layer) {
            let dest = cell.with_layer(0);
            if self.map.contains(dest) {
                out.push(Successor { dir: CVec::ZERO, to: dest, cost: layer.exit_movement_cost });
            }
        }
        out
    }

    /// Non-cooperative successors: used by RRA* and `find_unit_path`. Static
    /// terrain and immovable blockers only; no reservation table, no
    /// self-loop (waiting is meaningless to a search with no time axis).
    pub fn standard_successors(
        &self,
        locomotor: &dyn Locomotor,
        agent: AgentId,
        cell: CPos,
        predecessor: Option<CPos>,
        ignore: Option<AgentId>,
    ) -> Vec<Successor> {
        let blockers = NoBlockers;
        let mut out = Vec::new();
        for dir in self.candidate_directions(predecessor, cell) {
            let to = cell.offset(dir);
            if !self.map.contains(to) {
                continue;
            }
            if !locomotor.can_move_freely_into(agent, to, &blockers, ignore) {
                continue;
            }
            if let Some(cost) = self.step_cost(locomotor, agent, cell, dir, to, &blockers, ignore) {
                out.push(Successor { dir, to, cost });
            }
        }
        out.extend(self.layer_transitions(cell));
        out
    }

    /// Cooperative successors: used by WHCA*. Consults the reservation
    /// table and temporary blockers for the successor's projected tick, and
    /// always includes the self-loop (waiting one tick in place).
    #[allow(clippy::too_many_arguments)]
    pub fn cooperative_successors(
        &self,
        locomotor: &dyn Locomotor,
        agent: AgentId,
        cell: CPos,
        arrival_tick: WorldTick,
        predecessor: Option<CPos>,
        ignore: Option<AgentId>,
        blockers: &dyn Blockers,
        reservations: &ReservationTable,
    ) -> Vec<Successor> {
        let next_tick = arrival_tick.succ();
        let mut out = Vec::new();
        for dir in self.candidate_directions(predecessor, cell) {
            let to = cell.offset(dir);
            if !self.map.contains(to) {
                continue;
            }
            if !locomotor.can_move_freely_into_cooperative(
                agent, to, next_tick, blockers, ignore, reservations,
            ) {
                continue;
            }
            if let Some(cost) = self.step_cost(locomotor, agent, cell, dir, to, blockers, ignore) {
                out.push(Successor { dir, to, cost });
            }
        }
        // The wait self-loop: legal exactly when staying put is legal, i.e.
        // nobody else reserves this cell at the next tick.
        if !reservations.is_blocked_for(cell, next_tick, ignore) {
            out.push(Successor { dir: CVec::ZERO, to: cell, cost: CELL_COST });
        }
        out.extend(self.layer_transitions(cell));
        out.retain(|s| s.cost != INVALID_COST);
        out
    }
}
