//! Space and orientation primitives: `CPos`, `CVec`, and `Facing`.
//!
//! # Cost units
//!
//! Movement costs are integers scaled so that an orthogonal step costs
//! `CELL_COST` (1,000) and a diagonal step costs
//! `CELL_COST * DIAGONAL_NUMERATOR / DIAGONAL_DENOMINATOR` (≈ `1,000 * √2`).
//! Integer arithmetic keeps search costs exact and comparable without
//! floating-point drift; `u32` is wide enough for any window or static path
//! this engine will ever compute (see [`crate::error`] for the overflow
//! policy used by `estimated_total`).

use std::fmt;

/// Orthogonal move cost, in the engine's internal fixed-point cost unit.
pub const CELL_COST: u32 = 1_000;

/// Diagonal step multiplier numerator (34/24 ≈ √2, per the movement model).
pub const DIAGONAL_NUMERATOR: u32 = 34;
/// Diagonal step multiplier denominator.
pub const DIAGONAL_DENOMINATOR: u32 = 24;

/// Sentinel cost meaning "this edge may not be taken".
pub const INVALID_COST: u32 = u32::MAX;

// ── CPos ──────────────────────────────────────────────────────────────────────

/// An integer cell position on a movement layer.
///
/// `layer == 0` is the ground plane; nonzero layers are custom movement
/// layers (tunnels, bridges) supplied by the host application's [`Map`]
/// implementation (see `pf-activity`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CPos {
    pub x: i32,
    pub y: i32,
    pub layer: i32,
}

impl CPos {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, layer: 0 }
    }

    #[inline]
    pub fn on_layer(x: i32, y: i32, layer: i32) -> Self {
        Self { x, y, layer }
    }

    #[inline]
    pub fn is_ground(self) -> bool {
        self.layer == 0
    }

    /// Cell on the ground plane directly below/above this one (same x, y).
    #[inline]
    pub fn with_layer(self, layer: i32) -> Self {
        Self { layer, ..self }
    }

    #[inline]
    pub fn offset(self, v: CVec) -> Self {
        Self { x: self.x + v.dx, y: self.y + v.dy, layer: self.layer }
    }

    /// Direction vector from `self` to `other`, clamped to `{-1, 0, 1}` per
    /// axis. Ignores layer (layer transitions are not directional steps).
    #[inline]
    pub fn direction_to(self, other: CPos) -> CVec {
        CVec { dx: (other.x - self.x).signum(), dy: (other.y - self.y).signum() }
    }

    /// Squared Euclidean distance in the (x, y) plane. Used for "no further
    /// from the destination" comparisons (§4.6 nudge decision) where the
    /// exact metric doesn't matter, only the ordering.
    #[inline]
    pub fn squared_distance(self, other: CPos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Octile lower-bound distance between two ground-plane cells, in the
    /// engine's fixed-point cost units. Admissible and consistent under the
    /// standard 8-neighborhood cost model: combines the cheaper diagonal
    /// moves with the remaining straight moves.
    ///
    /// The diagonal step cost is rounded down once *per step*, not once for
    /// the whole diagonal run, so this stays an exact sum of the per-edge
    /// costs `GridGraph::step_cost` accumulates along a straight diagonal
    /// path — rounding the combined distance in one shot would under-count
    /// against the search's own bookkeeping and break admissibility's
    /// "never exceeds the real cost" guarantee in the other direction.
    pub fn octile_distance(self, other: CPos) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let (low, high) = if dx < dy { (dx, dy) } else { (dy, dx) };
        let diagonal = low as u32;
        let straight = (high - low) as u32;
        let diagonal_step_cost = CELL_COST * DIAGONAL_NUMERATOR / DIAGONAL_DENOMINATOR;
        diagonal * diagonal_step_cost + straight * CELL_COST
    }
}

impl fmt::Display for CPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layer == 0 {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            write!(f, "({}, {}, L{})", self.x, self.y, self.layer)
        }
    }
}

// ── CVec ──────────────────────────────────────────────────────────────────────

/// A unit direction vector: each axis is one of `{-1, 0, 1}`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CVec {
    pub dx: i32,
    pub dy: i32,
}

impl CVec {
    pub const ZERO: CVec = CVec { dx: 0, dy: 0 };

    /// The full 8-connected neighborhood, in a fixed order (N, NE, E, SE, S,
    /// SW, W, NW). Order matters only for reproducible heap tie-breaking.
    pub const NEIGHBORHOOD: [CVec; 8] = [
        CVec { dx: 0, dy: -1 },
        CVec { dx: 1, dy: -1 },
        CVec { dx: 1, dy: 0 },
        CVec { dx: 1, dy: 1 },
        CVec { dx: 0, dy: 1 },
        CVec { dx: -1, dy: 1 },
        CVec { dx: -1, dy: 0 },
        CVec { dx: -1, dy: -1 },
    ];

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The opposite direction ("behind" the current direction of travel).
    #[inline]
    pub fn reverse(self) -> CVec {
        CVec { dx: -self.dx, dy: -self.dy }
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// A 10-bit facing angle: values `0..1024` map onto `0..360` degrees.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing(pub u16);

impl Facing {
    /// One full turn, in facing units.
    pub const FULL_TURN: u16 = 1024;
    /// A half turn (180 degrees), in facing units.
    pub const HALF_TURN: u16 = 512;

    #[inline]
    pub fn from_units(units: u16) -> Self {
        Facing(units % Self::FULL_TURN)
    }

    /// Facing that points from `from` towards `to`, or `fallback` if the two
    /// cells coincide. Diagonal and orthogonal directions map onto the eight
    /// cardinal/intercardinal facings spaced `FULL_TURN / 8` apart.
    pub fn between(from: CPos, to: CPos, fallback: Facing) -> Facing {
        let v = from.direction_to(to);
        if v.is_zero() {
            return fallback;
        }
        let idx = CVec::NEIGHBORHOOD.iter().position(|&n| n == v).unwrap_or(0);
        Facing::from_units((idx as u16) * (Self::FULL_TURN / 8))
    }

    /// Shortest angular distance to `other`, always in `0..=HALF_TURN`.
    pub fn delta(self, other: Facing) -> u16 {
        let raw = self.0.abs_diff(other.0);
        raw.min(Self::FULL_TURN - raw)
    }

    /// `true` when turning from `self` to `other` counts as a "sharp turn"
    /// that must queue a Turn activity before any half-step can commit
    /// (§4.6: `Δfacing ∈ [384, 640]` out of 1024, measured on the raw
    /// unsigned difference before folding to the shortest-path delta).
    pub fn is_sharp_turn(self, other: Facing) -> bool {
        let raw = self.0.abs_diff(other.0);
        (384..=640).contains(&raw)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{00b0}", (self.0 as u32) * 360 / Self::FULL_TURN as u32)
    }
}
