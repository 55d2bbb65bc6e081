//! C9: the per-agent move activity state machine.
//!
//! Drives one agent's window/step/turn/wait/repath cycle per §4.6. Owns
//! the agent's resumable RRA* (§9 "mutable shared RRA* per agent" design
//! note: modeled here as unique ownership behind a narrow query interface,
//! not shared state) and the current window path.
//!
//! Child activities (Turn, WaitFor, MoveFirstHalf, MoveSecondHalf) are
//! modeled per §9's design note as a single queued [`Child`] the activity
//! resumes one tick at a time, rather than a generic coroutine stack — this
//! state machine never queues more than one child at once, so a stack
//! would be unused generality.
//!
//! Rendering/visual interpolation is explicitly out of scope (§1), so the
//! "curve through a sharp turn via another `MoveFirstHalf`" micro-
//! optimization in §4.6's Rewindow-on-Move-Half-Completion bullet — purely
//! a visual-smoothness choice — is simplified to always finalizing through
//! `MoveSecondHalf`; turning itself is still fully enforced by the
//! `turn_queued` gate in [`MoveActivity::do_step`], so no path ever commits
//! a move the agent isn't already facing.

use std::mem;

use pf_core::{AgentId, CPos, Facing, WorldTick};

use pf_graph::cell_info::{Layer, WorldId, WorldLayerPools};
use pf_graph::graph::{CostModifier, GridGraph, NoCostModifier};
use pf_graph::locomotor::{Blockers, Locomotor, NoBlockers};
use pf_graph::map::Map;
use pf_graph::reservation::ReservationTable;
use pf_search::{whca, RraConfig, RraSearch};

use crate::blockers::{AllBlockers, ImmovableBlockers};
use crate::config::ActivityConfig;
use crate::error::{ActivityError, ActivityResult};
use crate::kinetics::KineticsAdapter;
use crate::traits::{AgentFacing, AgentMobility, World};

/// Per-cell "distance" the 1024-unit movement-speed formulas are scaled
/// against (§4.6: `WaitFor` counts down `1024 / movement_speed_for_cell`
/// ticks; the same unit governs half-step durations here).
const CELL_DISTANCE_UNITS: u32 = 1024;

/// Everything [`MoveActivity::tick`] needs this tick that isn't carried by
/// the activity itself. `graph` is borrowed for `'a`, the same lifetime as
/// the activity's own resumable RRA*, since both must reference the same
/// grid graph for as long as the move runs; the rest are borrowed only for
/// this one call.
pub struct TickCtx<'a, 't, M: Map, C: CostModifier = NoCostModifier> {
    pub graph: &'a GridGraph<'a, M, C>,
    pub locomotor: &'t dyn Locomotor,
    pub world: &'t dyn World,
    pub mobility: &'t dyn AgentMobility,
    pub facing_agent: &'t dyn AgentFacing,
    pub reservations: &'t mut ReservationTable,
    /// Per-world pool for RRA*'s 2D cell-info layers (§3 "Lifecycles":
    /// "drawn from a pool keyed by world; returned to the pool on
    /// dispose"). Borrowed mutably for the one tick call; the pool itself
    /// lives as long as the owning world, outside any single activity.
    pub cell_pool: &'t mut WorldLayerPools<CPos>,
    /// Per-world pool for WHCA*'s 3D `(cell, step)` cell-info layers —
    /// acquired fresh for every window attempt and released as soon as the
    /// search returns, since no window's layer is ever queried again.
    pub whca_pool: &'t mut WorldLayerPools<(CPos, u32)>,
}

/// Result of one `tick` call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Still working; call `tick` again next simulation tick.
    Continue,
    /// Reached the destination (or there was never one to begin with).
    Arrived,
    /// Gave up — a contested near-destination nudge failed, or no window
    /// could ever be produced (§9 Open Question 2: the demoted "Path is
    /// empty" case).
    Abandoned,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Phase {
    Startup,
    WindowInit,
    Step,
    Finished,
}

enum Child {
    Turn { remaining: u32, target_facing: Facing },
    WaitFor { remaining: u32 },
    MoveFirstHalf { to: CPos, remaining: u32, second_half: u32 },
    MoveSecondHalf { to: CPos, remaining: u32 },
}

pub struct MoveActivity<'a, M: Map, C: CostModifier = NoCostModifier> {
    agent: AgentId,
    ignore: Option<AgentId>,
    world_id: WorldId,
    config: ActivityConfig,
    phase: Phase,
    destination: Option<CPos>,
    current_cell: CPos,
    current_facing: Facing,
    /// Destination-first: `.pop()` yields the immediate next step, matching
    /// the "consumption order is back-to-front" data-model note (§3) and
    /// `pf_pathfinder`'s facade output shape.
    window_path: Vec<CPos>,
    /// `-1` means "needs a fresh window"; otherwise counts steps consumed
    /// from the current window.
    w: i32,
    turn_queued: bool,
    child: Option<Child>,
    pending_cancel: bool,
    rra: Option<RraSearch<'a, M, C>>,
    final_outcome: Option<MoveOutcome>,
}

impl<'a, M: Map, C: CostModifier> MoveActivity<'a, M, C> {
    pub fn new(
        agent: AgentId,
        ignore: Option<AgentId>,
        world_id: WorldId,
        config: ActivityConfig,
        destination: Option<CPos>,
    ) -> Self {
        MoveActivity {
            agent,
            ignore,
            world_id,
            config,
            phase: Phase::Startup,
            destination,
            current_cell: CPos::default(),
            current_facing: Facing::default(),
            window_path: Vec::new(),
            w: -1,
            turn_queued: false,
            child: None,
            pending_cancel: false,
            rra: None,
            final_outcome: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.final_outcome.is_some()
    }

    pub fn destination(&self) -> Option<CPos> {
        self.destination
    }

    pub fn window_path(&self) -> &[CPos] {
        &self.window_path
    }

    pub fn window_counter(&self) -> i32 {
        self.w
    }

    /// Clears the path at the next safe point. Per §5, the activity is
    /// "non-interruptible" once a half-step is queued (otherwise visual
    /// position becomes inconsistent) — if a move half-step is in flight,
    /// cancellation is deferred until it completes.
    pub fn cancel(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) {
        match self.child {
            Some(Child::MoveFirstHalf { .. }) | Some(Child::MoveSecondHalf { .. }) => {
                self.pending_cancel = true;
            }
            _ => {
                self.window_path.clear();
                ctx.reservations.free_all_for(self.agent);
                self.finish(ctx, MoveOutcome::Abandoned);
            }
        }
    }

    /// Drives one simulation tick. Errors with [`ActivityError::AlreadyFinished`]
    /// if called again after the activity already reported `Arrived` or
    /// `Abandoned` — callers are expected to stop ticking a finished
    /// activity, so this is a caller-usage error rather than a normal
    /// end-of-life Vec/empty-path signal (contrast §7's window-empty case,
    /// which stays a plain `Continue`/`Abandoned` outcome, not an `Err`).
    pub fn tick(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) -> ActivityResult<MoveOutcome> {
        if self.final_outcome.is_some() {
            return Err(ActivityError::AlreadyFinished);
        }

        if let Some(outcome) = self.resume_child(ctx) {
            return Ok(outcome);
        }

        if self.pending_cancel {
            self.pending_cancel = false;
            self.window_path.clear();
            ctx.reservations.free_all_for(self.agent);
            return Ok(self.finish(ctx, MoveOutcome::Abandoned));
        }

        let outcome = match self.phase {
            Phase::Startup => self.do_startup(ctx),
            Phase::WindowInit => self.do_window_init(ctx),
            Phase::Step => self.do_step(ctx),
            Phase::Finished => self.final_outcome.unwrap_or(MoveOutcome::Arrived),
        };
        Ok(outcome)
    }

    /// Transitions to `Finished`, releasing RRA*'s cell-info layer back to
    /// its per-world pool (§3 "Lifecycles": disposed when the move activity
    /// ends) rather than simply dropping it.
    fn finish(&mut self, ctx: &mut TickCtx<'a, '_, M, C>, outcome: MoveOutcome) -> MoveOutcome {
        if let Some(rra) = self.rra.take() {
            ctx.cell_pool.release(self.world_id, rra.into_layer());
        }
        self.phase = Phase::Finished;
        self.final_outcome = Some(outcome);
        outcome
    }

    // ── Startup ──────────────────────────────────────────────────────────

    fn do_startup(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) -> MoveOutcome {
        self.current_cell = ctx.mobility.from_cell();
        self.current_facing = ctx.mobility.facing();

        let Some(mut dest) = self.destination else {
            return self.finish(ctx, MoveOutcome::Arrived);
        };

        if !ctx.locomotor.can_move_freely_into(self.agent, dest, &NoBlockers, self.ignore) {
            match self.nearest_enterable(ctx, dest) {
                Some(alt) if self.config.evaluate_nearest_movable => {
                    dest = alt;
                    self.destination = Some(alt);
                }
                _ => return self.finish(ctx, MoveOutcome::Arrived),
            }
        }

        let layer: Layer<CPos> = ctx.cell_pool.acquire(self.world_id);
        self.rra = Some(RraSearch::new(ctx.graph, ctx.locomotor, self.agent, self.ignore, dest, self.current_cell, RraConfig::default(), layer));
        self.w = -1;
        self.phase = Phase::WindowInit;
        MoveOutcome::Continue
    }

    fn nearest_enterable(&self, ctx: &TickCtx<'a, '_, M, C>, dest: CPos) -> Option<CPos> {
        pf_core::CVec::NEIGHBORHOOD
            .iter()
            .map(|&d| dest.offset(d))
            .filter(|&c| ctx.locomotor.can_move_freely_into(self.agent, c, &NoBlockers, self.ignore))
            .min_by_key(|&c| c.squared_distance(dest))
    }

    // ── WindowInit ───────────────────────────────────────────────────────

    fn do_window_init(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) -> MoveOutcome {
        match self.destination {
            None => return self.finish(ctx, MoveOutcome::Arrived),
            // A contested-destination nudge with nowhere to go reassigns the
            // destination to wherever the agent already stands (§4.6); that
            // is arrival, not an infinite wait at a self-loop goal.
            Some(dest) if dest == self.current_cell => return self.finish(ctx, MoveOutcome::Arrived),
            Some(_) => {}
        }

        {
            let immovable = ImmovableBlockers::new(ctx.world);
            if let Some(path) = self.single_window_attempt(ctx, &immovable) {
                self.window_path = path;
                self.w = 0;
                self.phase = Phase::Step;
                return MoveOutcome::Continue;
            }
        }
        if let Some(path) = self.single_window_attempt(ctx, &NoBlockers) {
            self.window_path = path;
            self.w = 0;
            self.phase = Phase::Step;
            return MoveOutcome::Continue;
        }

        // §9 Open Question 2: the original's fatal "Path is empty" becomes
        // a clean terminal outcome here.
        self.finish(ctx, MoveOutcome::Abandoned)
    }

    fn single_window_attempt(&mut self, ctx: &mut TickCtx<'a, '_, M, C>, blockers: &dyn Blockers) -> Option<Vec<CPos>> {
        let dest = self.destination?;
        let rra = self.rra.as_mut()?;
        let kinetics = KineticsAdapter::new(ctx.mobility, ctx.facing_agent, self.config.always_turn_in_place);
        let start_tick = ctx.world.world_tick();
        let whca_layer: Layer<(CPos, u32)> = ctx.whca_pool.acquire(self.world_id);

        let mut outcome = whca::search(
            ctx.graph,
            ctx.locomotor,
            blockers,
            ctx.reservations,
            self.agent,
            self.ignore,
            self.current_cell,
            dest,
            start_tick,
            self.config.window,
            self.current_facing,
            &kinetics,
            rra,
            whca_layer,
        );

        // The window's own layer is never queried again once the search
        // returns (unlike RRA*'s, which lives across many windows); return
        // it to the pool immediately rather than holding it until `finish`.
        let layer = mem::replace(&mut outcome.layer, Layer::new());
        ctx.whca_pool.release(self.world_id, layer);

        if outcome.reached_window && !outcome.path.is_empty() {
            Some(shape_window(outcome, self.current_cell, self.config.window))
        } else {
            None
        }
    }

    fn rewindow_with(&mut self, ctx: &mut TickCtx<'a, '_, M, C>, blockers: &dyn Blockers) {
        match self.single_window_attempt(ctx, blockers) {
            Some(path) => {
                self.window_path = path;
                self.w = 0;
                self.phase = Phase::Step;
            }
            None => self.phase = Phase::WindowInit,
        }
    }

    // ── Step ─────────────────────────────────────────────────────────────

    fn needs_rewindow(&self, world_tick: WorldTick) -> bool {
        if self.w < 0 || self.w as u32 >= self.config.window / 2 {
            return true;
        }
        self.is_rewindow_boundary(world_tick)
    }

    fn is_rewindow_boundary(&self, world_tick: WorldTick) -> bool {
        let period = self.config.window as u64 * self.config.reset_speed as u64;
        period != 0 && world_tick.0 % period == 0
    }

    fn do_step(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) -> MoveOutcome {
        let world_tick = ctx.world.world_tick();
        if self.needs_rewindow(world_tick) {
            self.phase = Phase::WindowInit;
            return MoveOutcome::Continue;
        }

        let Some(dest) = self.destination else {
            return self.finish(ctx, MoveOutcome::Arrived);
        };

        let Some(next_cell) = self.window_path.pop() else {
            self.phase = Phase::WindowInit;
            return MoveOutcome::Continue;
        };

        if !is_adjacent_or_self(self.current_cell, next_cell) {
            self.rewindow_with_immovable(ctx);
            return MoveOutcome::Continue;
        }

        if next_cell != self.current_cell {
            let occupied = ctx.world.actors_at(next_cell).into_iter().any(|a| Some(a) != self.ignore);
            let enterable = ctx.locomotor.can_move_freely_into(self.agent, next_cell, &AllBlockers::new(ctx.world), self.ignore);
            if occupied || !enterable {
                return self.handle_blocked(ctx, dest, next_cell);
            }
        }

        if next_cell != self.current_cell {
            let target_facing = Facing::between(self.current_cell, next_cell, self.current_facing);
            if self.current_facing.is_sharp_turn(target_facing) && !self.turn_queued {
                self.window_path.push(next_cell);
                self.turn_queued = true;
                let delta = self.current_facing.delta(target_facing);
                let ticks = (delta as u32).div_ceil(ctx.facing_agent.turn_speed().max(1) as u32).max(1);
                self.child = Some(Child::Turn { remaining: ticks, target_facing });
                return MoveOutcome::Continue;
            }
        }
        self.turn_queued = false;

        if next_cell == self.current_cell {
            let ticks = CELL_DISTANCE_UNITS.div_ceil(ctx.mobility.movement_speed_for_cell(self.current_cell).max(1)).max(1);
            self.child = Some(Child::WaitFor { remaining: ticks });
            self.w += 1;
            return MoveOutcome::Continue;
        }

        // Commit the move: reserve the destination for the tick the agent
        // is projected to arrive, then queue the two-phase interpolation.
        ctx.reservations.reserve(next_cell, world_tick.succ(), self.agent);
        let total = CELL_DISTANCE_UNITS.div_ceil(ctx.mobility.movement_speed_for_cell(self.current_cell).max(1)).max(2);
        let first_half = (total / 2).max(1);
        let second_half = (total - first_half).max(1);
        self.child = Some(Child::MoveFirstHalf { to: next_cell, remaining: first_half, second_half });
        MoveOutcome::Continue
    }

    fn rewindow_with_immovable(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) {
        let immovable = ImmovableBlockers::new(ctx.world);
        self.rewindow_with(ctx, &immovable);
    }

    /// §4.6's blocked-next-cell decision tree.
    fn handle_blocked(&mut self, ctx: &mut TickCtx<'a, '_, M, C>, dest: CPos, next_cell: CPos) -> MoveOutcome {
        let radius_sq = (self.config.near_enough_radius * self.config.near_enough_radius) as i64;
        let near_enough = self.current_cell.squared_distance(dest) <= radius_sq;

        if near_enough {
            match self.find_nudge(ctx, next_cell, dest) {
                Some(nudge) => self.destination = Some(nudge),
                None => self.destination = Some(self.current_cell),
            }
            self.phase = Phase::WindowInit;
            return MoveOutcome::Continue;
        }

        let blocker_immovable = ctx.world.actors_at(next_cell).into_iter().any(|a| ctx.world.is_immovable(a));
        if blocker_immovable {
            self.rewindow_with_immovable(ctx);
        } else {
            let all = AllBlockers::new(ctx.world);
            self.rewindow_with(ctx, &all);
        }
        MoveOutcome::Continue
    }

    fn find_nudge(&self, ctx: &TickCtx<'a, '_, M, C>, blocked_cell: CPos, dest: CPos) -> Option<CPos> {
        let blocked_dist = blocked_cell.squared_distance(dest);
        pf_core::CVec::NEIGHBORHOOD
            .iter()
            .map(|&d| blocked_cell.offset(d))
            .filter(|&c| ctx.locomotor.can_move_freely_into(self.agent, c, &AllBlockers::new(ctx.world), self.ignore))
            .filter(|&c| c.squared_distance(dest) <= blocked_dist)
            .min_by_key(|&c| c.squared_distance(dest))
    }

    // ── Child resumption ─────────────────────────────────────────────────

    fn resume_child(&mut self, ctx: &mut TickCtx<'a, '_, M, C>) -> Option<MoveOutcome> {
        let mut child = self.child.take()?;
        let done = match &mut child {
            Child::Turn { remaining, .. } | Child::WaitFor { remaining } => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            Child::MoveFirstHalf { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            Child::MoveSecondHalf { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
        };

        if !done {
            self.child = Some(child);
            return Some(MoveOutcome::Continue);
        }

        match child {
            Child::Turn { target_facing, .. } => {
                self.current_facing = target_facing;
            }
            Child::WaitFor { .. } => {}
            Child::MoveFirstHalf { to, second_half, .. } => {
                // Visual interpolation is out of scope (§1); always finalize
                // through a MoveSecondHalf rather than curving into another
                // MoveFirstHalf (see module docs).
                self.w += 1;
                self.child = Some(Child::MoveSecondHalf { to, remaining: second_half });
                let _ = ctx;
                return Some(MoveOutcome::Continue);
            }
            Child::MoveSecondHalf { to, .. } => {
                self.current_cell = to;
            }
        }

        None
    }
}

fn is_adjacent_or_self(a: CPos, b: CPos) -> bool {
    if a == b {
        return true;
    }
    if a.layer != b.layer {
        return a.x == b.x && a.y == b.y;
    }
    (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1
}

/// Shapes a raw [`whca::WhcaOutcome`] into the activity's consumption
/// order: destination-first, the start cell dropped (the activity already
/// knows where it is). Callers only invoke this once `reached_window` is
/// confirmed; the source-padding fallback lives in the caller's decision
/// of whether to retry with relaxed blockers at all.
fn shape_window(outcome: whca::WhcaOutcome, source: CPos, window: u32) -> Vec<CPos> {
    let want = window as usize;
    if outcome.path.len() != want + 1 {
        return vec![source; want];
    }
    let mut steps: Vec<CPos> = outcome.path[1..].to_vec();
    steps.reverse();
    steps
}
