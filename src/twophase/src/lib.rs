//! Two-phase (Kociemba style) cube solver: coordinate encodings, precomputed
//! move and pruning tables, and iterative-deepening A* search over both
//! phases. Inverting a solution yields a scramble for the solved state.

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::cast_possible_truncation)]

pub mod cache;
pub mod coords;
pub mod pruning;
pub mod solver;
pub mod tables;

pub use solver::{SolveConfig, SolveError, SolveStats, Solution, TwoPhaseSolver};
pub use tables::Tables;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
