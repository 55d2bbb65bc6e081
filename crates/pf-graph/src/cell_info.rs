//! Cell-info records and the pooled layers that hold them.
//!
//! A cell-info record is the per-node bookkeeping a search accumulates as it
//! runs: the best known cost, the estimated total, a parent link for
//! reconstruction, and a status used to reconcile stale heap entries (the
//! heap has no decrease-key, so a cheaper path to an already-open node is
//! pushed as a fresh entry and the old one is marked `Duplicate`).
//!
//! The same [`CellInfo`] record shape serves both the 2D graph (keyed by
//! [`CPos`] alone, `arrival_tick` unused) and the 3D space-time graph (keyed
//! by `(CPos, timestep)`, `arrival_tick` populated). A [`Layer`] is a single
//! search's worth of records for one key type; a [`LayerPool`] recycles
//! layers within one "world" so repeated searches don't reallocate their
//! backing maps.

use std::collections::HashMap;
use std::hash::Hash;

use pf_core::{CPos, WorldTick};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = HashMap<K, V>;

/// Reconciliation status for a cell-info record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Unvisited,
    Open,
    /// A cheaper entry for this node was pushed later; this record is stale
    /// and must be discarded, not expanded, when the heap yields it.
    Duplicate,
    Closed,
    /// The node was reachable in principle but is not a legal destination
    /// (e.g. the terrain-height gate or an immovable blocker rejected it).
    Invalid,
}

/// Per-node search bookkeeping.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellInfo {
    pub cost_so_far: u32,
    pub estimated_total: u32,
    pub previous: Option<CPos>,
    pub status: CellStatus,
    /// Populated only in the 3D (space-time) graph: the simulation tick at
    /// which the agent would occupy this node.
    pub arrival_tick: Option<WorldTick>,
}

impl Default for CellInfo {
    fn default() -> Self {
        CellInfo {
            cost_so_far: 0,
            estimated_total: 0,
            previous: None,
            status: CellStatus::Unvisited,
            arrival_tick: None,
        }
    }
}

impl CellInfo {
    pub fn root(estimated_total: u32) -> Self {
        CellInfo { cost_so_far: 0, estimated_total, previous: None, status: CellStatus::Open, ..Default::default() }
    }
}

/// A single search's worth of cell-info records, keyed by `K` (`CPos` for
/// the 2D graph, `(CPos, u32)` for the 3D graph).
#[derive(Default)]
pub struct Layer<K: Eq + Hash> {
    records: Map<K, CellInfo>,
}

impl<K: Eq + Hash + Copy> Layer<K> {
    pub fn new() -> Self {
        Layer { records: Map::default() }
    }

    pub fn get(&self, key: K) -> Option<&CellInfo> {
        self.records.get(&key)
    }

    pub fn get_or_default(&self, key: K) -> CellInfo {
        self.records.get(&key).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, key: K, info: CellInfo) {
        self.records.insert(key, info);
    }

    pub fn status(&self, key: K) -> CellStatus {
        self.records.get(&key).map(|i| i.status).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all records without freeing the backing map's capacity, so a
    /// recycled layer from the pool starts the next search with no
    /// reallocation.
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

/// Recycles [`Layer`]s of one key type so repeated searches reuse the same
/// backing allocations. One pool instance is meant to be owned per "world"
/// (see [`WorldLayerPools`]) so unrelated worlds never share layers.
pub struct LayerPool<K: Eq + Hash> {
    free: Vec<Layer<K>>,
}

impl<K: Eq + Hash + Copy> Default for LayerPool<K> {
    fn default() -> Self {
        LayerPool { free: Vec::new() }
    }
}

impl<K: Eq + Hash + Copy> LayerPool<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a clean layer from the pool, or allocates a new one if the
    /// pool is empty.
    pub fn acquire(&mut self) -> Layer<K> {
        self.free.pop().unwrap_or_default()
    }

    /// Returns a layer to the pool, clearing its contents first. Safe to
    /// call even if the pool already holds other returned layers.
    pub fn release(&mut self, mut layer: Layer<K>) {
        layer.reset();
        self.free.push(layer);
    }

    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }
}

/// Opaque identity for the "world" a search pool belongs to. Applications
/// mint one per simulation/map instance; this engine never inspects the
/// value beyond equality and hashing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldId(pub u64);

/// Per-world layer pools for one key type.
///
/// The functional write-up describes the original as a weak map from world
/// to pool, reclaimed automatically on world teardown. This uses a strong
/// map instead and exposes [`WorldLayerPools::teardown_world`] so callers
/// reclaim a world's pools explicitly when the world itself goes away —
/// the alternative the design notes call equally acceptable.
pub struct WorldLayerPools<K: Eq + Hash> {
    per_world: HashMap<WorldId, LayerPool<K>>,
}

impl<K: Eq + Hash + Copy> Default for WorldLayerPools<K> {
    fn default() -> Self {
        WorldLayerPools { per_world: HashMap::new() }
    }
}

impl<K: Eq + Hash + Copy> WorldLayerPools<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, world: WorldId) -> Layer<K> {
        self.per_world.entry(world).or_default().acquire()
    }

    pub fn release(&mut self, world: WorldId, layer: Layer<K>) {
        self.per_world.entry(world).or_default().release(layer);
    }

    /// Drops every pooled layer for `world`. Idempotent: tearing down a
    /// world with no pool yet is a no-op.
    pub fn teardown_world(&mut self, world: WorldId) {
        self.per_world.remove(&world);
    }
}
