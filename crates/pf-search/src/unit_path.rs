//! One-shot, non-cooperative 2D A* (used by `pf_pathfinder::find_unit_path`
//! for pre-spawn and utility queries, §6). Unlike RRA*, this search is not
//! resumable and is not goal-rooted: it runs forward from `source` to
//! `target` and returns the moment it closes the target, exactly like a
//! textbook A* over [`GridGraph::standard_successors`].

use pf_core::{AgentId, BinaryHeap, CPos};

use pf_graph::cell_info::{CellInfo, CellStatus, Layer};
use pf_graph::graph::{CostModifier, GridGraph};
use pf_graph::locomotor::Locomotor;
use pf_graph::map::Map;

use crate::open_set::{OpenEntry, SeqCounter};
use crate::path::reconstruct_2d;

/// Runs a forward A* from `source` to `target` using static/immovable
/// blockers only. Returns the empty path if `target` is unreachable (§7
/// "Unreachable" -> canonical empty list), never an error.
pub fn find_unit_path<M: Map, C: CostModifier>(
    graph: &GridGraph<M, C>,
    locomotor: &dyn Locomotor,
    agent: AgentId,
    ignore: Option<AgentId>,
    source: CPos,
    target: CPos,
) -> Vec<CPos> {
    if source == target {
        return vec![source];
    }

    let mut layer: Layer<CPos> = Layer::new();
    let mut open: BinaryHeap<OpenEntry<CPos>> = BinaryHeap::new();
    let mut seq = SeqCounter::default();

    let h0 = source.octile_distance(target);
    layer.insert(source, CellInfo::root(h0));
    open.add(OpenEntry::new(h0, seq.next(), source));

    while !open.empty() {
        let popped = match open.pop() {
            Ok(entry) => entry,
            Err(_) => break,
        };
        let current = popped.node;
        if layer.status(current) == CellStatus::Closed {
            continue;
        }
        let mut info = layer.get_or_default(current);
        info.status = CellStatus::Closed;
        layer.insert(current, info);

        if current == target {
            return reconstruct_2d(&layer, target);
        }

        let predecessor = info.previous;
        for succ in graph.standard_successors(locomotor, agent, current, predecessor, ignore) {
            if layer.status(succ.to) == CellStatus::Closed {
                continue;
            }
            let tentative = info.cost_so_far.saturating_add(succ.cost);
            let existing = layer.get_or_default(succ.to);
            if existing.status != CellStatus::Unvisited && tentative >= existing.cost_so_far {
                continue;
            }
            let h = succ.to.octile_distance(target);
            let f = tentative.saturating_add(h);
            layer.insert(
                succ.to,
                CellInfo { cost_so_far: tentative, estimated_total: f, previous: Some(current), status: CellStatus::Open, arrival_tick: None },
            );
            open.add(OpenEntry::new(f, seq.next(), succ.to));
        }
    }

    Vec::new()
}
