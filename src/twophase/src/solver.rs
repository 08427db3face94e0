//! Two-phase IDA* search: drive the cube into the subgroup where edges are
//! oriented and the E-slice edges sit in their slice, then finish it there
//! with the restricted move set.
//!
//! Phase-1 solutions are enumerated in increasing depth; every candidate
//! gets a phase-2 search bounded by the best total found so far, and the
//! search stops once a combined solution reaches the configured target
//! length. Move ordering is fixed, so results are deterministic.

use crate::coords::{
    CornerPerm, CornerTwist, Coordinate, ESlicePerm, ESliceSet, EdgeFlip, UdEdgePerm,
};
use crate::tables::{Tables, PHASE1_MOVES, PHASE2_MOVES};
use crate::{start, success, working};
use cube_core::{notation, CubieCube, Move};
use log::{debug, info};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("cube state violates the reachability invariants")]
    InvalidInput,
    #[error("no phase 1 solution within depth {0}")]
    Phase1Exhausted(u8),
    #[error("no phase 2 solution within depth {0}")]
    Phase2Exhausted(u8),
    #[error("phase 1 left the cube outside its target subgroup; a move or pruning table is inconsistent")]
    G1Breach,
    #[error("combined solution failed verification; a search or table is inconsistent")]
    VerificationFailure,
}

/// Search limits. The defaults match the worst cases of the coordinate
/// scheme: no phase needs more than 18 moves and no cube more than 30.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub max_phase1_depth: u8,
    pub max_phase2_depth: u8,
    /// Hard cap on the combined solution length.
    pub max_length: u8,
    /// Stop improving once a combined solution is this short. Raising it to
    /// `max_length` returns the first valid combined solution found.
    pub target_length: u8,
    /// Optional cut-off checked between phase-1 candidates; on expiry the
    /// best solution found so far is returned.
    pub deadline: Option<Instant>,
}

impl Default for SolveConfig {
    fn default() -> SolveConfig {
        SolveConfig {
            max_phase1_depth: 18,
            max_phase2_depth: 18,
            max_length: 30,
            target_length: 24,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SolveStats {
    pub phase1_nodes: u64,
    pub phase2_nodes: u64,
    /// Phase-1 solutions that received a phase-2 search.
    pub phase1_candidates: u32,
    pub elapsed: Duration,
}

/// A solved cube: the move sequence reaching the solved state, its
/// inverse (a scramble producing the input state), and the per-phase parts.
#[derive(Debug, Clone)]
pub struct Solution {
    pub solution: Vec<Move>,
    pub scramble: Vec<Move>,
    pub phase1: Vec<Move>,
    pub phase2: Vec<Move>,
    pub stats: SolveStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Phase1Coord {
    flip: u16,
    twist: u16,
    slice: u16,
}

impl Phase1Coord {
    fn from_cube(cube: &CubieCube) -> Phase1Coord {
        Phase1Coord {
            flip: EdgeFlip::encode(cube),
            twist: CornerTwist::encode(cube),
            slice: ESliceSet::encode(cube),
        }
    }

    fn is_goal(self) -> bool {
        self.flip == 0 && self.twist == 0 && self.slice == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Phase2Coord {
    corner_perm: u16,
    ud_edge_perm: u16,
    slice_perm: u16,
}

impl Phase2Coord {
    fn from_cube(cube: &CubieCube) -> Phase2Coord {
        Phase2Coord {
            corner_perm: CornerPerm::encode(cube),
            ud_edge_perm: UdEdgePerm::encode(cube),
            slice_perm: ESlicePerm::encode(cube),
        }
    }

    fn is_goal(self) -> bool {
        self.corner_perm == 0 && self.ud_edge_perm == 0 && self.slice_perm == 0
    }
}

fn in_phase2_subgroup(cube: &CubieCube) -> bool {
    cube.eo.iter().all(|&flip| flip == 0)
        && cube.co.iter().all(|&twist| twist == 0)
        && cube.ep[8..].iter().all(|&edge| edge >= 8)
}

struct SearchMutable<'a> {
    cube: &'a CubieCube,
    config: &'a SolveConfig,
    phase1_path: Vec<Move>,
    best: Option<(Vec<Move>, Vec<Move>)>,
    found_phase1: bool,
    internal_error: Option<SolveError>,
    stats: SolveStats,
}

impl SearchMutable<'_> {
    fn best_total(&self) -> Option<u8> {
        self.best
            .as_ref()
            .map(|(phase1, phase2)| (phase1.len() + phase2.len()) as u8)
    }
}

/// The solver. Borrows the tables, which it never mutates; solves on
/// different threads may share one `Tables`.
pub struct TwoPhaseSolver<'a> {
    tables: &'a Tables,
}

impl<'a> TwoPhaseSolver<'a> {
    #[must_use]
    pub fn new(tables: &'a Tables) -> TwoPhaseSolver<'a> {
        TwoPhaseSolver { tables }
    }

    /// Solve with the default limits.
    ///
    /// # Errors
    ///
    /// See [`TwoPhaseSolver::solve_with`].
    pub fn solve(&self, cube: &CubieCube) -> Result<Solution, SolveError> {
        self.solve_with(cube, &SolveConfig::default())
    }

    /// Find a move sequence bringing `cube` to the solved state.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the state is unreachable; `Phase1Exhausted` /
    /// `Phase2Exhausted` if no solution fits the configured limits;
    /// `G1Breach` / `VerificationFailure` only when the precomputed tables
    /// are inconsistent with the move set.
    pub fn solve_with(
        &self,
        cube: &CubieCube,
        config: &SolveConfig,
    ) -> Result<Solution, SolveError> {
        if !cube.is_valid() {
            return Err(SolveError::InvalidInput);
        }
        let started = Instant::now();
        if cube.is_solved() {
            return Ok(Solution {
                solution: vec![],
                scramble: vec![],
                phase1: vec![],
                phase2: vec![],
                stats: SolveStats {
                    elapsed: started.elapsed(),
                    ..SolveStats::default()
                },
            });
        }

        info!(start!("Searching for a two-phase solution"));
        let start_coord = Phase1Coord::from_cube(cube);
        let mut mutable = SearchMutable {
            cube,
            config,
            phase1_path: Vec::with_capacity(usize::from(config.max_phase1_depth)),
            best: None,
            found_phase1: false,
            internal_error: None,
            stats: SolveStats::default(),
        };

        let mut depth = self.phase1_distance(start_coord);
        while depth <= config.max_phase1_depth {
            if let Some(best_total) = mutable.best_total() {
                if best_total <= config.target_length || depth >= best_total {
                    break;
                }
            }
            if config.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
            debug!(working!("Searching phase 1 at depth {}"), depth);
            if self.phase1_search(&mut mutable, start_coord, depth, None) {
                break;
            }
            depth += 1;
        }

        if let Some(err) = mutable.internal_error {
            return Err(err);
        }
        let Some((phase1, phase2)) = mutable.best else {
            return Err(if mutable.found_phase1 {
                SolveError::Phase2Exhausted(config.max_phase2_depth)
            } else {
                SolveError::Phase1Exhausted(config.max_phase1_depth)
            });
        };

        let solution: Vec<Move> = phase1.iter().chain(&phase2).copied().collect();
        if !cube.apply_moves(&solution).is_solved() {
            return Err(SolveError::VerificationFailure);
        }
        mutable.stats.elapsed = started.elapsed();
        info!(
            success!("Solved in {} moves ({} phase 1, {} phase 2) after {:.3}s"),
            solution.len(),
            phase1.len(),
            phase2.len(),
            mutable.stats.elapsed.as_secs_f64()
        );
        Ok(Solution {
            scramble: notation::invert_sequence(&solution),
            solution,
            phase1,
            phase2,
            stats: mutable.stats,
        })
    }

    /// Depth-limited phase-1 DFS enumerating every solution of exactly the
    /// remaining length. Returns true when the whole search should stop.
    fn phase1_search(
        &self,
        mutable: &mut SearchMutable<'_>,
        coord: Phase1Coord,
        togo: u8,
        last: Option<Move>,
    ) -> bool {
        mutable.stats.phase1_nodes += 1;
        if togo == 0 {
            return coord.is_goal() && self.on_phase1_candidate(mutable);
        }
        if self.phase1_distance(coord) > togo {
            return false;
        }
        for m in PHASE1_MOVES {
            if last.is_some_and(|last| last.face() == m.face()) {
                continue;
            }
            let next = self.phase1_apply(coord, m);
            mutable.phase1_path.push(m);
            let stop = self.phase1_search(mutable, next, togo - 1, Some(m));
            mutable.phase1_path.pop();
            if stop {
                return true;
            }
        }
        false
    }

    /// Run phase 2 for one phase-1 solution, keeping the combined result
    /// when it beats the best so far.
    fn on_phase1_candidate(&self, mutable: &mut SearchMutable<'_>) -> bool {
        mutable.found_phase1 = true;
        mutable.stats.phase1_candidates += 1;

        let phase1_len = mutable.phase1_path.len() as u8;
        let mut phase2_cap = mutable
            .config
            .max_phase2_depth
            .min(mutable.config.max_length.saturating_sub(phase1_len));
        if let Some(best_total) = mutable.best_total() {
            if best_total <= phase1_len {
                return false;
            }
            phase2_cap = phase2_cap.min(best_total - phase1_len - 1);
        }

        let g1_cube = mutable.cube.apply_moves(&mutable.phase1_path);
        if !in_phase2_subgroup(&g1_cube) {
            mutable.internal_error = Some(SolveError::G1Breach);
            return true;
        }

        let coord = Phase2Coord::from_cube(&g1_cube);
        let last = mutable.phase1_path.last().copied();
        if let Some(phase2) = self.phase2_search(&mut mutable.stats, coord, phase2_cap, last) {
            let total = usize::from(phase1_len) + phase2.len();
            debug!(working!("Best solution now {} moves"), total);
            mutable.best = Some((mutable.phase1_path.clone(), phase2));
            if total as u8 <= mutable.config.target_length {
                return true;
            }
        }

        mutable
            .config
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Iterative-deepening phase-2 search; the first solution found is
    /// optimal for this phase.
    fn phase2_search(
        &self,
        stats: &mut SolveStats,
        coord: Phase2Coord,
        max_depth: u8,
        last: Option<Move>,
    ) -> Option<Vec<Move>> {
        if coord.is_goal() {
            return Some(vec![]);
        }
        let mut path = Vec::with_capacity(usize::from(max_depth));
        let mut bound = self.phase2_distance(coord).max(1);
        while bound <= max_depth {
            if self.phase2_search_depth(stats, &mut path, coord, bound, last) {
                return Some(path);
            }
            bound += 1;
        }
        None
    }

    fn phase2_search_depth(
        &self,
        stats: &mut SolveStats,
        path: &mut Vec<Move>,
        coord: Phase2Coord,
        togo: u8,
        last: Option<Move>,
    ) -> bool {
        stats.phase2_nodes += 1;
        if togo == 0 {
            return coord.is_goal();
        }
        if self.phase2_distance(coord) > togo {
            return false;
        }
        for m in PHASE2_MOVES {
            if last.is_some_and(|last| last.face() == m.face()) {
                continue;
            }
            let next = self.phase2_apply(coord, m);
            path.push(m);
            if self.phase2_search_depth(stats, path, next, togo - 1, Some(m)) {
                return true;
            }
            path.pop();
        }
        false
    }

    fn phase1_apply(&self, coord: Phase1Coord, m: Move) -> Phase1Coord {
        Phase1Coord {
            flip: self.tables.flip_move.apply(coord.flip, m),
            twist: self.tables.twist_move.apply(coord.twist, m),
            slice: self.tables.slice_move.apply(coord.slice, m),
        }
    }

    fn phase2_apply(&self, coord: Phase2Coord, m: Move) -> Phase2Coord {
        Phase2Coord {
            corner_perm: self.tables.corner_perm_move.apply(coord.corner_perm, m),
            ud_edge_perm: self.tables.ud_edge_perm_move.apply(coord.ud_edge_perm, m),
            slice_perm: self.tables.slice_perm_move.apply(coord.slice_perm, m),
        }
    }

    /// Admissible lower bound on the phase-1 distance.
    fn phase1_distance(&self, coord: Phase1Coord) -> u8 {
        self.tables
            .flip_prune
            .distance(usize::from(coord.flip))
            .max(self.tables.twist_prune.distance(usize::from(coord.twist)))
            .max(self.tables.slice_prune.distance(usize::from(coord.slice)))
    }

    /// Admissible lower bound on the phase-2 distance, from the composite
    /// tables.
    fn phase2_distance(&self, coord: Phase2Coord) -> u8 {
        let slice = usize::from(coord.slice_perm);
        self.tables
            .corner_slice_prune
            .distance(usize::from(coord.corner_perm) * ESlicePerm::SIZE + slice)
            .max(
                self.tables
                    .ud_edge_slice_prune
                    .distance(usize::from(coord.ud_edge_perm) * ESlicePerm::SIZE + slice),
            )
    }
}
