//! The shared space-time reservation table.
//!
//! Sparse mapping from `(x, y, t mod T)` to the owning agent. `T` (the
//! configured [`ReservationConfig::time_length`]) must exceed any window
//! size in use, so two reservations can never be mistaken for each other
//! purely through wraparound (§3 invariant).

use std::collections::HashMap;

use pf_core::{AgentId, CPos, WorldTick};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = HashMap<K, V>;

/// The reservation table's modulus. Default matches the functional
/// write-up's default of 4999.
pub const DEFAULT_TIME_LENGTH: u32 = 4999;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReservationConfig {
    pub time_length: u32,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        ReservationConfig { time_length: DEFAULT_TIME_LENGTH }
    }
}

type Key = (i32, i32, u32);

/// Space-time occupancy: who (if anyone) holds cell `(x, y)` at tick `t`,
/// addressed modulo `T`.
pub struct ReservationTable {
    time_length: u32,
    entries: Map<Key, AgentId>,
}

impl ReservationTable {
    pub fn new(config: ReservationConfig) -> Self {
        ReservationTable { time_length: config.time_length.max(1), entries: Map::default() }
    }

    pub fn time_length(&self) -> u32 {
        self.time_length
    }

    #[inline]
    fn key(&self, cell: CPos, tick: WorldTick) -> Key {
        (cell.x, cell.y, (tick.0 % self.time_length as u64) as u32)
    }

    /// Reserves `cell` at `tick` for `agent`. Overwrites whatever was
    /// reserved there before, including a different agent's stale
    /// reservation from `time_length` ticks ago (the documented modular
    /// wraparound behavior).
    pub fn reserve(&mut self, cell: CPos, tick: WorldTick, agent: AgentId) {
        self.entries.insert(self.key(cell, tick), agent);
    }

    /// Releases a reservation. A no-op if nothing is reserved there, or if
    /// a *different* agent now owns the slot (can happen after a wraparound
    /// collision) — freeing never takes another agent's reservation away.
    pub fn free(&mut self, cell: CPos, tick: WorldTick, agent: AgentId) {
        let key = self.key(cell, tick);
        if self.entries.get(&key) == Some(&agent) {
            self.entries.remove(&key);
        }
    }

    /// `true` if `cell` is reserved by anyone at `tick`.
    pub fn check(&self, cell: CPos, tick: WorldTick) -> bool {
        self.entries.contains_key(&self.key(cell, tick))
    }

    /// Which agent (if any) holds `cell` at `tick`.
    pub fn owner(&self, cell: CPos, tick: WorldTick) -> Option<AgentId> {
        self.entries.get(&self.key(cell, tick)).copied()
    }

    /// `true` if `cell` is reserved at `tick` by someone other than `ignore`.
    pub fn is_blocked_for(&self, cell: CPos, tick: WorldTick, ignore: Option<AgentId>) -> bool {
        match self.owner(cell, tick) {
            Some(owner) => Some(owner) != ignore,
            None => false,
        }
    }

    /// Releases every reservation held by `agent`. Called when a move
    /// activity cancels or finishes, so a departed agent's claim on future
    /// ticks does not linger.
    pub fn free_all_for(&mut self, agent: AgentId) {
        self.entries.retain(|_, owner| *owner != agent);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
