//! World tick: the monotonically increasing integer driven by the external
//! simulation loop (§3 Data Model). Distinct from a window-relative search
//! step, which is always `0`-based and local to a single WHCA* call.

use std::fmt;
use std::ops::{Add, Sub};

/// A tick of the host simulation's clock. Wraps on overflow only in the
/// reservation table's modular arithmetic (see `pf-graph::reservation`); as
/// a bare counter it simply increments.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldTick(pub u64);

impl WorldTick {
    pub const ZERO: WorldTick = WorldTick(0);

    #[inline]
    pub fn new(t: u64) -> Self {
        WorldTick(t)
    }

    #[inline]
    pub fn succ(self) -> Self {
        WorldTick(self.0 + 1)
    }

    /// This tick, `steps` search-steps ahead. Used to translate a window-local
    /// search step into the absolute world tick stored in a reservation.
    #[inline]
    pub fn plus_steps(self, steps: u32) -> Self {
        WorldTick(self.0 + steps as u64)
    }
}

impl Add<u32> for WorldTick {
    type Output = WorldTick;
    #[inline]
    fn add(self, rhs: u32) -> WorldTick {
        WorldTick(self.0 + rhs as u64)
    }
}

impl Sub for WorldTick {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: WorldTick) -> i64 {
        self.0 as i64 - rhs.0 as i64
    }
}

impl fmt::Display for WorldTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A step offset within a single search window: always starts at `0` at the
/// agent's current position, regardless of the absolute `WorldTick` the
/// window began on.
pub type WindowStep = u32;
