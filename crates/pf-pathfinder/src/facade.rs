//! C8: the pathfinder facade. Dispatches to `pf-search`'s algorithms and
//! shapes their raw output into the public contracts of §6 — in
//! particular, `find_unit_path_whca`'s "exactly `w` cells, padded with the
//! source when unreachable" guarantee (testable property 7, scenario S3).

use pf_core::{AgentId, CPos, Facing, WorldTick};

use pf_graph::cell_info::Layer;
use pf_graph::graph::CostModifier;
use pf_graph::locomotor::Blockers;
use pf_graph::map::{Map, WorldPos};
use pf_graph::reservation::ReservationTable;
use pf_search::{whca, Kinetics, RraConfig, RraSearch};

use crate::error::{PathfinderError, PathfinderResult};
use crate::request::SearchRequest;

/// `find_path(search)`: non-cooperative classic A*, used for pre-spawn and
/// utility queries that don't care about other agents' plans.
pub fn find_path<M: Map, C: CostModifier>(req: &SearchRequest<M, C>, source: CPos, target: CPos) -> Vec<CPos> {
    pf_search::find_unit_path(req.graph, req.locomotor, req.agent, req.ignore, source, target)
}

/// `find_unit_path(source, target, self, ignore, blockers)`: the friendly
/// name for [`find_path`] with `self`/`ignore` already bound in `req`.
pub fn find_unit_path<M: Map, C: CostModifier>(req: &SearchRequest<M, C>, source: CPos, target: CPos) -> Vec<CPos> {
    find_path(req, source, target)
}

/// `find_path_whca(search, goal, w)`: one cooperative window, via an
/// ephemeral RRA* built fresh for this single call (no per-agent RRA*
/// reuse across calls — that reuse is `pf-activity`'s job for an ongoing
/// Move activity, not this one-shot facade entry point).
#[allow(clippy::too_many_arguments)]
pub fn find_path_whca<M: Map, C: CostModifier, K: Kinetics>(
    req: &SearchRequest<M, C>,
    blockers: &dyn Blockers,
    reservations: &ReservationTable,
    source: CPos,
    goal: CPos,
    start_tick: WorldTick,
    window: u32,
    initial_facing: Facing,
    kinetics: &K,
) -> Vec<CPos> {
    let rra_layer: Layer<CPos> = Layer::new();
    let mut rra = RraSearch::new(req.graph, req.locomotor, req.agent, req.ignore, goal, source, RraConfig::default(), rra_layer);

    let whca_layer: Layer<(CPos, u32)> = Layer::new();
    let outcome = whca::search(
        req.graph,
        req.locomotor,
        blockers,
        reservations,
        req.agent,
        req.ignore,
        source,
        goal,
        start_tick,
        window,
        initial_facing,
        kinetics,
        &mut rra,
        whca_layer,
    );

    shape_window(outcome, source, window)
}

/// `find_unit_path_whca(source, target, self, ignore, blockers, w)`: the
/// public name for [`find_path_whca`].
#[allow(clippy::too_many_arguments)]
pub fn find_unit_path_whca<M: Map, C: CostModifier, K: Kinetics>(
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
    find_path_whca(req, blockers, reservations, source, target, start_tick, window, initial_facing, kinetics)
}

/// Turns a raw [`whca::WhcaOutcome`] (root-first, `start..=terminal`) into
/// the exposed contract: destination-first, exactly `window` cells (the
/// start cell itself is never included — callers already know where they
/// are), padded with repeated `source` cells when the window failed to
/// fill (§7 "Window empty", scenario S3).
fn shape_window(outcome: whca::WhcaOutcome, source: CPos, window: u32) -> Vec<CPos> {
    let want = window as usize;
    if !outcome.reached_window || outcome.path.len() != want + 1 {
        return vec![source; want];
    }
    let mut steps: Vec<CPos> = outcome.path[1..].to_vec();
    steps.reverse();
    steps
}

/// `find_unit_path_to_range(source, subcell, target_world_pos, range, self,
/// blockers, w)`: picks the nearest tile within `range` of a world-space
/// target and cooperatively paths to it. Used for "move into weapon range"
/// queries rather than "move onto an exact cell".
#[allow(clippy::too_many_arguments)]
pub fn find_unit_path_to_range<M: Map, C: CostModifier, K: Kinetics>(
    req: &SearchRequest<M, C>,
    subcell: u8,
    target_world_pos: WorldPos,
    range: f32,
    blockers: &dyn Blockers,
    reservations: &ReservationTable,
    source: CPos,
    start_tick: WorldTick,
    window: u32,
    initial_facing: Facing,
    kinetics: &K,
) -> PathfinderResult<Vec<CPos>> {
    let _ = req.map.offset_of_subcell(subcell);
    let candidates = req.map.find_tiles_in_circle(target_world_pos, range);
    let chosen = candidates
        .into_iter()
        .min_by_key(|&c| c.squared_distance(source))
        .ok_or(PathfinderError::NoCandidateInRange)?;

    Ok(find_path_whca(req, blockers, reservations, source, chosen, start_tick, window, initial_facing, kinetics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{AgentId, CELL_COST};
    use pf_graph::graph::{GraphConfig, GridGraph};
    use pf_graph::locomotor::{Locomotor, NoBlockers};
    use pf_graph::reservation::ReservationConfig;

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
        fn find_tiles_in_circle(&self, center: WorldPos, radius: f32) -> Vec<CPos> {
            let mut out = Vec::new();
            let r = radius.ceil() as i32;
            let cx = center.x.round() as i32;
            let cy = center.y.round() as i32;
            for dx in -r..=r {
                for dy in -r..=r {
                    let c = CPos::new(cx + dx, cy + dy);
                    if self.contains(c) && ((dx * dx + dy * dy) as f32) <= radius * radius {
                        out.push(c);
                    }
                }
            }
            out
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
        fn movement_cost_to_enter(&self, _agent: AgentId, _cell: CPos, blockers: &dyn Blockers, ignore: Option<AgentId>) -> Option<u32> {
            if blockers.is_blocked(_cell, ignore) {
                return None;
            }
            Some(CELL_COST)
        }
        fn can_move_freely_into(&self, agent: AgentId, cell: CPos, blockers: &dyn Blockers, ignore: Option<AgentId>) -> bool {
            self.movement_cost_to_enter(agent, cell, blockers, ignore).is_some()
        }
        fn can_move_freely_into_cooperative(
            &self,
            agent: AgentId,
            cell: CPos,
            tick: WorldTick,
            blockers: &dyn Blockers,
            ignore: Option<AgentId>,
            reservations: &ReservationTable,
        ) -> bool {
            self.can_move_freely_into(agent, cell, blockers, ignore) && !reservations.is_blocked_for(cell, tick, ignore)
        }
    }

    struct UnitKinetics;
    impl Kinetics for UnitKinetics {
        fn movement_speed_for_cell(&self, _cell: CPos) -> u32 {
            1024
        }
        fn turn_speed(&self) -> u16 {
            256
        }
        fn always_turn_in_place(&self) -> bool {
            false
        }
    }

    #[test]
    fn whca_window_is_exactly_w_cells_long() {
        let map = OpenMap { size: 20 };
        let locomotor = FlatLocomotor;
        let graph = GridGraph::new(&map, &[], GraphConfig::default());
        let req = SearchRequest::new(&graph, &locomotor, &map, AgentId(0), None);
        let reservations = ReservationTable::new(ReservationConfig::default());

        let path = find_unit_path_whca(
            &req,
            &NoBlockers,
            &reservations,
            CPos::new(0, 0),
            CPos::new(9, 0),
            WorldTick::ZERO,
            8,
            Facing::default(),
            &UnitKinetics,
        );
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn unreachable_target_pads_with_source() {
        let map = OpenMap { size: 20 };
        let goal = CPos::new(10, 10);
        struct Walled {
            ring: Vec<CPos>,
        }
        impl Locomotor for Walled {
            fn movement_cost_to_enter(&self, _agent: AgentId, cell: CPos, blockers: &dyn Blockers, ignore: Option<AgentId>) -> Option<u32> {
                if self.ring.contains(&cell) || blockers.is_blocked(cell, ignore) {
                    return None;
                }
                Some(CELL_COST)
            }
            fn can_move_freely_into(&self, agent: AgentId, cell: CPos, blockers: &dyn Blockers, ignore: Option<AgentId>) -> bool {
                self.movement_cost_to_enter(agent, cell, blockers, ignore).is_some()
            }
            fn can_move_freely_into_cooperative(
                &self,
                agent: AgentId,
                cell: CPos,
                tick: WorldTick,
                blockers: &dyn Blockers,
                ignore: Option<AgentId>,
                reservations: &ReservationTable,
            ) -> bool {
                self.can_move_freely_into(agent, cell, blockers, ignore) && !reservations.is_blocked_for(cell, tick, ignore)
            }
        }
        let ring: Vec<CPos> = pf_core::CVec::NEIGHBORHOOD.iter().map(|&d| goal.offset(d)).collect();
        let locomotor = Walled { ring };
        let graph = GridGraph::new(&map, &[], GraphConfig::default());
        let req = SearchRequest::new(&graph, &locomotor, &map, AgentId(0), None);
        let reservations = ReservationTable::new(ReservationConfig::default());
        let source = CPos::new(0, 0);

        let path = find_unit_path_whca(&req, &NoBlockers, &reservations, source, goal, WorldTick::ZERO, 5, Facing::default(), &UnitKinetics);
        assert_eq!(path, vec![source; 5]);
    }

    #[test]
    fn to_range_picks_nearest_candidate_within_radius() {
        let map = OpenMap { size: 20 };
        let locomotor = FlatLocomotor;
        let graph = GridGraph::new(&map, &[], GraphConfig::default());
        let req = SearchRequest::new(&graph, &locomotor, &map, AgentId(0), None);
        let reservations = ReservationTable::new(ReservationConfig::default());

        let path = find_unit_path_to_range(
            &req,
            0,
            WorldPos { x: 10.0, y: 10.0 },
            2.0,
            &NoBlockers,
            &reservations,
            CPos::new(0, 0),
            WorldTick::ZERO,
            8,
            Facing::default(),
            &UnitKinetics,
        )
        .unwrap();
        assert_eq!(path.len(), 8);
    }
}
