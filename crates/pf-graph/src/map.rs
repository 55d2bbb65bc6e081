//! The map: cell containment, world-space geometry, and terrain height,
//! injected by the host application.

use pf_core::CPos;

/// A custom movement layer (tunnel, bridge) stacked on top of the ground
/// plane, with its own teleport costs in and out.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomLayer {
    pub layer: i32,
    pub entry_movement_cost: u32,
    pub exit_movement_cost: u32,
}

/// World-space position, opaque to this crate beyond being returned and
/// round-tripped; real coordinates (pixels, world units) are the host
/// application's concern.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

/// Cell containment, geometry, and terrain queries, injected by the host.
pub trait Map {
    fn contains(&self, cell: CPos) -> bool;
    fn center_of_cell(&self, cell: CPos) -> WorldPos;

    /// Facing from `from` towards `to`, or `fallback` when the two cells
    /// coincide. Hosts typically delegate to [`pf_core::Facing::between`].
    fn facing_between(&self, from: CPos, to: CPos, fallback: pf_core::Facing) -> pf_core::Facing;

    /// Ground height at `cell`, consulted by the terrain-height gate.
    fn height(&self, cell: CPos) -> i32;

    fn find_tiles_in_circle(&self, center: WorldPos, radius: f32) -> Vec<CPos>;
    fn offset_of_subcell(&self, subcell: u8) -> WorldPos;
    fn between_cells(&self, a: CPos, b: CPos) -> WorldPos;
}
