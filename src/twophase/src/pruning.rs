//! Distance-to-goal tables, flood-filled breadth first from the solved
//! coordinate under a phase's legal move set. Every entry is an admissible
//! lower bound on the phase distance, which is what IDA* needs.

use crate::tables::MoveTable;
use cube_core::Move;
use std::collections::VecDeque;

/// Distances are saturated here; no single coordinate needs more moves
/// under either phase's legal set.
pub const MAX_PRUNE_DEPTH: u8 = 20;

const UNKNOWN: u8 = u8::MAX;

/// One byte of phase-legal BFS distance per coordinate value.
pub struct PruneTable {
    entries: Vec<u8>,
}

impl PruneTable {
    /// Distance table for a single coordinate.
    ///
    /// # Panics
    ///
    /// If some value in the coordinate's domain is unreachable from 0,
    /// which would mean the move table is inconsistent.
    #[must_use]
    pub fn generate(moves: &MoveTable, legal: &[Move]) -> PruneTable {
        flood_fill(moves.size(), legal, |value, m| {
            usize::from(moves.apply(value as u16, m))
        })
    }

    /// Distance table for a coordinate pair, indexed `first * second_size +
    /// second`. Tighter than the pointwise maximum of the two single tables.
    ///
    /// # Panics
    ///
    /// As for [`PruneTable::generate`].
    #[must_use]
    pub fn generate_pair(first: &MoveTable, second: &MoveTable, legal: &[Move]) -> PruneTable {
        let stride = second.size();
        flood_fill(first.size() * stride, legal, |value, m| {
            let a = usize::from(first.apply((value / stride) as u16, m));
            let b = usize::from(second.apply((value % stride) as u16, m));
            a * stride + b
        })
    }

    /// Wrap raw bytes previously produced by [`PruneTable::as_bytes`].
    #[must_use]
    pub fn from_bytes(entries: Vec<u8>) -> PruneTable {
        PruneTable { entries }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn distance(&self, value: usize) -> u8 {
        self.entries[value]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flood_fill(
    size: usize,
    legal: &[Move],
    successor: impl Fn(usize, Move) -> usize,
) -> PruneTable {
    let mut entries = vec![UNKNOWN; size];
    entries[0] = 0;
    let mut queue = VecDeque::from([0usize]);
    while let Some(value) = queue.pop_front() {
        let next_distance = entries[value] + 1;
        for &m in legal {
            let succ = successor(value, m);
            if entries[succ] == UNKNOWN {
                entries[succ] = next_distance;
                queue.push_back(succ);
            }
        }
    }
    for (value, entry) in entries.iter_mut().enumerate() {
        assert!(
            *entry != UNKNOWN,
            "coordinate value {value} unreachable from the goal"
        );
        *entry = (*entry).min(MAX_PRUNE_DEPTH);
    }
    PruneTable { entries }
}
