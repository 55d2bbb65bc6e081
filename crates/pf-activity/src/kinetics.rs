//! Adapts the host's [`AgentFacing`]/[`AgentMobility`] handle into the
//! narrow [`pf_search::Kinetics`] view WHCA*'s `arrival_tick` projection
//! needs (§4.4 step 6), without `pf-search` ever depending on
//! `pf-activity`'s richer traits.

use pf_core::CPos;

use crate::traits::{AgentFacing, AgentMobility};

pub struct KineticsAdapter<'a> {
    mobility: &'a dyn AgentMobility,
    facing: &'a dyn AgentFacing,
    /// `ActivityConfig::always_turn_in_place` — a host-wide override that
    /// forces stop-and-turn behavior even for an agent whose own
    /// `AgentMobility::always_turn_in_place` reports `false`.
    force_turn_in_place: bool,
}

impl<'a> KineticsAdapter<'a> {
    pub fn new(mobility: &'a dyn AgentMobility, facing: &'a dyn AgentFacing, force_turn_in_place: bool) -> Self {
        KineticsAdapter { mobility, facing, force_turn_in_place }
    }
}

impl<'a> pf_search::Kinetics for KineticsAdapter<'a> {
    fn movement_speed_for_cell(&self, cell: CPos) -> u32 {
        self.mobility.movement_speed_for_cell(cell)
    }
    fn turn_speed(&self) -> u16 {
        self.facing.turn_speed()
    }
    fn always_turn_in_place(&self) -> bool {
        self.force_turn_in_place || self.mobility.always_turn_in_place()
    }
}
