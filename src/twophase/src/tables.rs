//! Coordinate move tables and the bundle of all precomputed tables.
//!
//! Tables are immutable after construction and safe to share across
//! threads; construction is explicit so start-up cost stays visible to the
//! host.

use crate::cache::{self, TableError};
use crate::coords::{
    CornerPerm, CornerTwist, Coordinate, ESlicePerm, ESliceSet, EdgeFlip, UdEdgePerm,
};
use crate::pruning::PruneTable;
use crate::{start, success, working};
use cube_core::Move;
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Phase-1 legal moves: all 18 face turns.
pub const PHASE1_MOVES: [Move; 18] = Move::ALL;

/// Phase-2 legal moves: the ten turns stabilizing the phase-2 subgroup.
pub const PHASE2_MOVES: [Move; 10] = [
    Move::U,
    Move::U2,
    Move::U3,
    Move::D,
    Move::D2,
    Move::D3,
    Move::R2,
    Move::L2,
    Move::F2,
    Move::B2,
];

/// Successor table for one coordinate: `(size, 18)` entries of the
/// coordinate value reached by each move.
pub struct MoveTable {
    size: usize,
    entries: Vec<u16>,
}

impl MoveTable {
    #[must_use]
    pub fn generate<C: Coordinate>() -> MoveTable {
        let mut entries = vec![0; C::SIZE * 18];
        for value in 0..C::SIZE {
            let cube = C::decode(value as u16);
            for m in Move::ALL {
                entries[value * 18 + m.index()] = C::encode(&cube.apply(m));
            }
        }
        MoveTable {
            size: C::SIZE,
            entries,
        }
    }

    #[inline]
    #[must_use]
    pub fn apply(&self, value: u16, m: Move) -> u16 {
        self.entries[value as usize * 18 + m.index()]
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Every table the two-phase search reads: six coordinate move tables, the
/// six per-coordinate pruning tables, and the two composite phase-2
/// pruning tables that sharpen the phase-2 heuristic.
pub struct Tables {
    pub flip_move: MoveTable,
    pub twist_move: MoveTable,
    pub slice_move: MoveTable,
    pub corner_perm_move: MoveTable,
    pub ud_edge_perm_move: MoveTable,
    pub slice_perm_move: MoveTable,

    pub flip_prune: PruneTable,
    pub twist_prune: PruneTable,
    pub slice_prune: PruneTable,
    pub corner_perm_prune: PruneTable,
    pub ud_edge_perm_prune: PruneTable,
    pub slice_perm_prune: PruneTable,

    pub corner_slice_prune: PruneTable,
    pub ud_edge_slice_prune: PruneTable,
}

struct MoveTables {
    flip: MoveTable,
    twist: MoveTable,
    slice: MoveTable,
    corner_perm: MoveTable,
    ud_edge_perm: MoveTable,
    slice_perm: MoveTable,
}

impl MoveTables {
    fn generate() -> MoveTables {
        info!(start!("Generating coordinate move tables"));
        let started = Instant::now();
        let tables = MoveTables {
            flip: MoveTable::generate::<EdgeFlip>(),
            twist: MoveTable::generate::<CornerTwist>(),
            slice: MoveTable::generate::<ESliceSet>(),
            corner_perm: MoveTable::generate::<CornerPerm>(),
            ud_edge_perm: MoveTable::generate::<UdEdgePerm>(),
            slice_perm: MoveTable::generate::<ESlicePerm>(),
        };
        debug!(
            working!("Move tables built in {:.3}s"),
            started.elapsed().as_secs_f64()
        );
        tables
    }
}

/// Cache filenames for the two composite tables; the six per-coordinate
/// tables are named by their coordinate.
const CORNER_SLICE_NAME: &str = "corner_slice";
const UD_EDGE_SLICE_NAME: &str = "ud_edge_slice";

impl Tables {
    /// Build every table from scratch. Takes a few seconds; prefer
    /// [`Tables::load_or_generate`] when a disk cache is acceptable.
    #[must_use]
    pub fn generate() -> Tables {
        let moves = MoveTables::generate();
        info!(start!("Generating pruning tables"));
        let started = Instant::now();
        let tables = Tables {
            flip_prune: PruneTable::generate(&moves.flip, &PHASE1_MOVES),
            twist_prune: PruneTable::generate(&moves.twist, &PHASE1_MOVES),
            slice_prune: PruneTable::generate(&moves.slice, &PHASE1_MOVES),
            corner_perm_prune: PruneTable::generate(&moves.corner_perm, &PHASE2_MOVES),
            ud_edge_perm_prune: PruneTable::generate(&moves.ud_edge_perm, &PHASE2_MOVES),
            slice_perm_prune: PruneTable::generate(&moves.slice_perm, &PHASE2_MOVES),
            corner_slice_prune: PruneTable::generate_pair(
                &moves.corner_perm,
                &moves.slice_perm,
                &PHASE2_MOVES,
            ),
            ud_edge_slice_prune: PruneTable::generate_pair(
                &moves.ud_edge_perm,
                &moves.slice_perm,
                &PHASE2_MOVES,
            ),
            flip_move: moves.flip,
            twist_move: moves.twist,
            slice_move: moves.slice,
            corner_perm_move: moves.corner_perm,
            ud_edge_perm_move: moves.ud_edge_perm,
            slice_perm_move: moves.slice_perm,
        };
        info!(
            success!("Pruning tables ready in {:.3}s"),
            started.elapsed().as_secs_f64()
        );
        tables
    }

    /// Load the pruning tables from `cache_dir` (or the platform cache
    /// directory), regenerating and re-caching any table that is missing or
    /// corrupt. Move tables are always regenerated; they build in
    /// milliseconds.
    #[must_use]
    pub fn load_or_generate(cache_dir: Option<&Path>) -> Tables {
        let Some(dir) = cache::resolve_dir(cache_dir) else {
            debug!("no cache directory available, generating tables in memory");
            return Tables::generate();
        };

        let moves = MoveTables::generate();
        info!(start!("Loading pruning tables"));
        let dir = dir.as_path();
        let tables = Tables {
            flip_prune: cached(dir, EdgeFlip::NAME, EdgeFlip::SIZE, || {
                PruneTable::generate(&moves.flip, &PHASE1_MOVES)
            }),
            twist_prune: cached(dir, CornerTwist::NAME, CornerTwist::SIZE, || {
                PruneTable::generate(&moves.twist, &PHASE1_MOVES)
            }),
            slice_prune: cached(dir, ESliceSet::NAME, ESliceSet::SIZE, || {
                PruneTable::generate(&moves.slice, &PHASE1_MOVES)
            }),
            corner_perm_prune: cached(dir, CornerPerm::NAME, CornerPerm::SIZE, || {
                PruneTable::generate(&moves.corner_perm, &PHASE2_MOVES)
            }),
            ud_edge_perm_prune: cached(dir, UdEdgePerm::NAME, UdEdgePerm::SIZE, || {
                PruneTable::generate(&moves.ud_edge_perm, &PHASE2_MOVES)
            }),
            slice_perm_prune: cached(dir, ESlicePerm::NAME, ESlicePerm::SIZE, || {
                PruneTable::generate(&moves.slice_perm, &PHASE2_MOVES)
            }),
            corner_slice_prune: cached(
                dir,
                CORNER_SLICE_NAME,
                CornerPerm::SIZE * ESlicePerm::SIZE,
                || PruneTable::generate_pair(&moves.corner_perm, &moves.slice_perm, &PHASE2_MOVES),
            ),
            ud_edge_slice_prune: cached(
                dir,
                UD_EDGE_SLICE_NAME,
                UdEdgePerm::SIZE * ESlicePerm::SIZE,
                || PruneTable::generate_pair(&moves.ud_edge_perm, &moves.slice_perm, &PHASE2_MOVES),
            ),
            flip_move: moves.flip,
            twist_move: moves.twist,
            slice_move: moves.slice,
            corner_perm_move: moves.corner_perm,
            ud_edge_perm_move: moves.ud_edge_perm,
            slice_perm_move: moves.slice_perm,
        };
        info!(success!("Pruning tables ready"));
        tables
    }

    /// Write every pruning table to `cache_dir` (or the platform cache
    /// directory).
    ///
    /// # Errors
    ///
    /// If no cache directory can be resolved or a table cannot be written.
    pub fn store(&self, cache_dir: Option<&Path>) -> Result<(), TableError> {
        let dir = cache::resolve_dir(cache_dir).ok_or(TableError::NoCacheDir)?;
        for (name, table) in self.named_prune_tables() {
            cache::store(&dir, name, table)?;
        }
        Ok(())
    }

    fn named_prune_tables(&self) -> [(&'static str, &PruneTable); 8] {
        [
            (EdgeFlip::NAME, &self.flip_prune),
            (CornerTwist::NAME, &self.twist_prune),
            (ESliceSet::NAME, &self.slice_prune),
            (CornerPerm::NAME, &self.corner_perm_prune),
            (UdEdgePerm::NAME, &self.ud_edge_perm_prune),
            (ESlicePerm::NAME, &self.slice_perm_prune),
            (CORNER_SLICE_NAME, &self.corner_slice_prune),
            (UD_EDGE_SLICE_NAME, &self.ud_edge_slice_prune),
        ]
    }
}

fn cached(
    dir: &Path,
    name: &str,
    size: usize,
    build: impl FnOnce() -> PruneTable,
) -> PruneTable {
    match cache::load(dir, name, size) {
        Ok(table) => {
            debug!(working!("Loaded `{}` from cache"), name);
            table
        }
        Err(err) => {
            debug!(working!("Rebuilding `{}`: {}"), name, err);
            let table = build();
            if let Err(err) = cache::store(dir, name, &table) {
                warn!("failed to cache table `{name}`: {err}");
            }
            table
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::random::{random_cube, Mulberry32};
    use cube_core::CubieCube;

    fn assert_equivariant<C: Coordinate>(table: &MoveTable, cube: &CubieCube, legal: &[Move]) {
        for &m in legal {
            assert_eq!(
                C::encode(&cube.apply(m)),
                table.apply(C::encode(cube), m),
                "{} under {m}",
                C::NAME
            );
        }
    }

    #[test]
    fn phase1_tables_commute_with_all_moves() {
        let flip = MoveTable::generate::<EdgeFlip>();
        let twist = MoveTable::generate::<CornerTwist>();
        let slice = MoveTable::generate::<ESliceSet>();
        let mut rng = Mulberry32::new(3);
        for _ in 0..50 {
            let cube = random_cube(&mut rng);
            assert_equivariant::<EdgeFlip>(&flip, &cube, &PHASE1_MOVES);
            assert_equivariant::<CornerTwist>(&twist, &cube, &PHASE1_MOVES);
            assert_equivariant::<ESliceSet>(&slice, &cube, &PHASE1_MOVES);
        }
    }

    #[test]
    fn corner_perm_table_commutes_with_all_moves() {
        let corner_perm = MoveTable::generate::<CornerPerm>();
        let mut rng = Mulberry32::new(5);
        for _ in 0..50 {
            let cube = random_cube(&mut rng);
            assert_equivariant::<CornerPerm>(&corner_perm, &cube, &PHASE1_MOVES);
        }
    }

    #[test]
    fn phase2_edge_tables_commute_within_the_subgroup() {
        let ud_edge_perm = MoveTable::generate::<UdEdgePerm>();
        let slice_perm = MoveTable::generate::<ESlicePerm>();
        let mut rng = Mulberry32::new(8);
        // States reached by phase-2 moves stay in the subgroup where these
        // two coordinates are defined.
        for _ in 0..50 {
            let mut cube = CubieCube::SOLVED;
            for _ in 0..20 {
                let m = PHASE2_MOVES[rng.next_below(10) as usize];
                cube = cube.apply(m);
            }
            assert_equivariant::<UdEdgePerm>(&ud_edge_perm, &cube, &PHASE2_MOVES);
            assert_equivariant::<ESlicePerm>(&slice_perm, &cube, &PHASE2_MOVES);
        }
    }

    #[test]
    fn move_table_entries_stay_in_domain() {
        let slice = MoveTable::generate::<ESliceSet>();
        for value in 0..ESliceSet::SIZE {
            for m in Move::ALL {
                assert!(usize::from(slice.apply(value as u16, m)) < ESliceSet::SIZE);
            }
        }
    }
}
