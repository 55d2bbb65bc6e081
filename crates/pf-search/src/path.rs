//! Path reconstruction (C7): walks `previous` links backward from a search's
//! terminal node to its root, for both the 2D and 3D graphs.

use pf_core::CPos;

use pf_graph::cell_info::Layer;

/// Follows `previous` links from `terminal` back to the search's root (the
/// first cell whose own `previous` is absent). Returns cells in traversal
/// order, i.e. root first, terminal last — callers that consume paths
/// tail-first (the move activity, §4.6) read this `Vec` back-to-front.
///
/// A missing cell-info record partway through the chain stops reconstruction
/// and returns the partial chain built so far, per §4.5 ("missing
/// predecessor -> stop and return the partial chain").
pub fn reconstruct_2d(layer: &Layer<CPos>, terminal: CPos) -> Vec<CPos> {
    let mut chain = Vec::new();
    let mut current = terminal;
    loop {
        chain.push(current);
        match layer.get(current) {
            Some(info) => match info.previous {
                Some(prev) if prev != current => current = prev,
                _ => break,
            },
            None => break,
        }
    }
    chain.reverse();
    chain
}

/// As [`reconstruct_2d`], but over the 3D space-time graph keyed by
/// `(CPos, timestep)`. Decrements `t` by one at each step; returns a
/// `terminal_t + 1`-element sequence (or fewer, on a missing link) from the
/// terminal timestep back to `t = 0`, in root-first traversal order.
pub fn reconstruct_3d(layer: &Layer<(CPos, u32)>, terminal: CPos, terminal_t: u32) -> Vec<CPos> {
    let mut chain = Vec::new();
    let mut current = terminal;
    let mut t = terminal_t;
    loop {
        chain.push(current);
        if t == 0 {
            break;
        }
        match layer.get((current, t)) {
            Some(info) => match info.previous {
                Some(prev) => {
                    current = prev;
                    t -= 1;
                }
                None => break,
            },
            None => break,
        }
    }
    chain.reverse();
    chain
}
