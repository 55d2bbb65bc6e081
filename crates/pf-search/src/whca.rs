//! Windowed Cooperative A* (WHCA*, C6): forward search on the 3D
//! `(x, y, t)` graph, guided by a resumable RRA* heuristic and constrained
//! by the shared reservation table.

use pf_core::{AgentId, BinaryHeap, CPos, Facing, WorldTick};

use pf_graph::cell_info::{CellInfo, CellStatus, Layer};
use pf_graph::graph::{CostModifier, GridGraph};
use pf_graph::locomotor::{Blockers, Locomotor};
use pf_graph::reservation::ReservationTable;
use pf_graph::map::Map;

use crate::open_set::{OpenEntry, SeqCounter};
use crate::path::reconstruct_3d;

/// The per-agent kinetic facts WHCA* needs to project `arrival_tick`
/// (§4.4 step 6): how fast the agent crosses a cell, how fast it turns, and
/// whether a facing change must be absorbed by a stop-and-turn rather than
/// a free curve through the step.
pub trait Kinetics {
    fn movement_speed_for_cell(&self, cell: CPos) -> u32;
    fn turn_speed(&self) -> u16;
    fn always_turn_in_place(&self) -> bool;
}

/// The admissible, resumable heuristic WHCA* queries while expanding: an
/// agent's RRA* search, in practice. Taken as a single `&mut dyn` object
/// rather than a pair of `FnMut` closures — `cost` and `is_closed` both
/// need to borrow the same underlying search, and two closures each
/// capturing it (one mutably, one shared) can't coexist for the call's
/// duration.
pub trait HeuristicSource {
    /// Admissible cost from `cell` to the goal, expanding the backward
    /// search as far as needed to answer.
    fn cost(&mut self, cell: CPos) -> u32;
    /// `true` if `cell` is already closed, with no further expansion.
    fn is_closed(&self, cell: CPos) -> bool;
}

/// One window's worth of planning result.
pub struct WhcaOutcome {
    /// Root-first: `path[0] == start`, `path.last() == ` wherever the
    /// search reached (`t == window` on success, otherwise the deepest node
    /// before the open set emptied). Empty when not even the start node
    /// could be expanded.
    pub path: Vec<CPos>,
    /// `true` if the search reached `t == window` (a complete window);
    /// `false` means the open set emptied first (§4.4: WHCA* failure).
    pub reached_window: bool,
    pub layer: Layer<(CPos, u32)>,
}

/// Space-time node distance, in window steps, per §4.4's per-cell traversal
/// time unit (`1024` matches the subcell/world-distance granularity the
/// locomotor's `movement_speed_for_cell` is scaled against).
const CELL_DISTANCE_UNITS: u32 = 1024;

#[allow(clippy::too_many_arguments)]
pub fn search<M: Map, C: CostModifier, K: Kinetics>(
    graph: &GridGraph<M, C>,
    locomotor: &dyn Locomotor,
    blockers: &dyn Blockers,
    reservations: &ReservationTable,
    agent: AgentId,
    ignore: Option<AgentId>,
    start: CPos,
    goal: CPos,
    start_tick: WorldTick,
    window: u32,
    initial_facing: Facing,
    kinetics: &K,
    heuristic: &mut dyn HeuristicSource,
    mut layer: Layer<(CPos, u32)>,
) -> WhcaOutcome {
    let mut seq = SeqCounter::default();
    let mut open: BinaryHeap<OpenEntry<(CPos, u32)>> = BinaryHeap::new();

    let root_key = (start, 0u32);
    let h0 = heuristic.cost(start);
    layer.insert(
        root_key,
        CellInfo {
            cost_so_far: 0,
            estimated_total: h0,
            previous: None,
            status: CellStatus::Open,
            arrival_tick: Some(start_tick),
        },
    );
    open.add(OpenEntry::new(h0, seq.next(), root_key));

    let mut deepest: Option<(CPos, u32)> = Some(root_key);

    while !open.empty() {
        let popped = match open.pop() {
            Ok(entry) => entry,
            Err(_) => break,
        };
        let (current, t) = popped.node;
        if layer.status((current, t)) == CellStatus::Closed {
            continue;
        }
        let mut info = layer.get_or_default((current, t));
        info.status = CellStatus::Closed;
        layer.insert((current, t), info);
        deepest = Some((current, t));

        if t == window {
            return WhcaOutcome { path: reconstruct_3d(&layer, current, t), reached_window: true, layer };
        }

        let predecessor = info.previous;
        let arrival_tick = info.arrival_tick.unwrap_or(start_tick);

        let mut successors =
            graph.cooperative_successors(locomotor, agent, current, start_tick.plus_steps(t), predecessor, ignore, blockers, reservations);

        if current == goal {
            // Sit-at-goal is an absorbing state: only the self-loop is legal.
            successors.retain(|s| s.to == current);
        } else {
            let waiting_now = predecessor == Some(current);
            if !waiting_now {
                let has_closed_alternative = successors.iter().any(|s| s.to != current && heuristic.is_closed(s.to));
                if has_closed_alternative {
                    successors.retain(|s| s.to == current || heuristic.is_closed(s.to));
                }
            }
        }

        let facing_into_current = match predecessor {
            Some(prev) => Facing::between(prev, current, initial_facing),
            None => initial_facing,
        };

        for succ in successors {
            let next_t = t + 1;
            let key = (succ.to, next_t);
            let is_goal_self_loop = current == goal && succ.to == current;
            let edge_cost = if is_goal_self_loop { 0 } else { succ.cost };
            let g2 = info.cost_so_far.saturating_add(edge_cost);

            let existing = layer.get_or_default(key);
            if existing.status != CellStatus::Unvisited && g2 >= existing.cost_so_far {
                continue;
            }

            let facing_into_succ = Facing::between(current, succ.to, facing_into_current);
            let turn_delta = facing_into_current.delta(facing_into_succ);
            let move_speed = kinetics.movement_speed_for_cell(current).max(1);
            let move_ticks = CELL_DISTANCE_UNITS.div_ceil(move_speed);
            let turn_ticks = if turn_delta > 0 && kinetics.always_turn_in_place() {
                (turn_delta as u32).div_ceil(kinetics.turn_speed().max(1) as u32)
            } else {
                0
            };
            let arrival2 = arrival_tick + (move_ticks + turn_ticks);

            let h = heuristic.cost(succ.to);
            let f = g2.saturating_add(h);

            layer.insert(
                key,
                CellInfo {
                    cost_so_far: g2,
                    estimated_total: f,
                    previous: Some(current),
                    status: CellStatus::Open,
                    arrival_tick: Some(arrival2),
                },
            );
            open.add(OpenEntry::new(f, seq.next(), key));
        }
    }

    // Open set emptied before reaching t == window: failure (§4.4, §7
    // "Window empty"). Reconstruct the deepest partial chain anyway so
    // callers that want a best-effort partial path can inspect it, but mark
    // `reached_window: false` so the facade treats this as a retry case.
    let path = match deepest {
        Some((c, t)) => reconstruct_3d(&layer, c, t),
        None => Vec::new(),
    };
    WhcaOutcome { path, reached_window: false, layer }
}
