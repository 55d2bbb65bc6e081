//! Per-agent tunables for the move activity (§6 "Configuration constants").

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityConfig {
    /// Window size `W`: cells planned per cooperative search.
    pub window: u32,
    /// Multiplier for the forced-rewindow cadence
    /// (`world_tick mod (W * reset_speed) == 0`).
    pub reset_speed: u32,
    /// "Near enough" radius, in cells, for the contested-destination nudge
    /// decision (§4.6, scenario S4).
    pub near_enough_radius: f32,
    /// Whether the agent has no free "curve through a turn" motion and
    /// must instead queue an explicit stop-and-turn for every heading
    /// change (`AlwaysTurnInPlace`, §4.6/§4.4).
    pub always_turn_in_place: bool,
    /// Whether `Startup` should snap an unreachable-as-given destination to
    /// the nearest cell the locomotor can enter ("evaluate nearest
    /// movable").
    pub evaluate_nearest_movable: bool,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        ActivityConfig {
            window: 24,
            reset_speed: 2,
            near_enough_radius: 1.5,
            always_turn_in_place: false,
            evaluate_nearest_movable: true,
        }
    }
}
