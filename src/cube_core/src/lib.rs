//! Cubie-level model of the 3x3x3 cube: permutation + orientation state,
//! the 18 face-turn operators, move notation and a seeded state sampler.

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]

pub mod moves;
pub mod notation;
pub mod random;

pub use moves::{Face, Move, MOVE_CUBES};

/// A cube state as four cubie arrays.
///
/// `cp[i]`/`ep[i]` hold the identity of the corner/edge currently in slot
/// `i`, `co[i]`/`eo[i]` its twist (mod 3) or flip (mod 2). Corner slots are
/// labeled URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB; edge slots UR, UF, UL,
/// UB, DR, DF, DL, DB, FR, FL, BL, BR. The same representation doubles as a
/// move operator acting by right multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubieCube {
    pub cp: [u8; 8],
    pub co: [u8; 8],
    pub ep: [u8; 12],
    pub eo: [u8; 12],
}

impl CubieCube {
    /// The identity permutation with all orientations zero.
    pub const SOLVED: CubieCube = CubieCube {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; 8],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; 12],
    };

    /// Compose two states: the result is `self` followed by `other`.
    #[must_use]
    pub const fn multiply(&self, other: &CubieCube) -> CubieCube {
        let mut out = CubieCube::SOLVED;
        let mut i = 0;
        while i < 8 {
            let from = other.cp[i] as usize;
            out.cp[i] = self.cp[from];
            out.co[i] = (self.co[from] + other.co[i]) % 3;
            i += 1;
        }
        let mut i = 0;
        while i < 12 {
            let from = other.ep[i] as usize;
            out.ep[i] = self.ep[from];
            out.eo[i] = self.eo[from] ^ other.eo[i];
            i += 1;
        }
        out
    }

    /// The state (or operator) undoing `self`.
    #[must_use]
    pub fn inverse(&self) -> CubieCube {
        let mut out = CubieCube::SOLVED;
        for i in 0..8 {
            out.cp[self.cp[i] as usize] = i as u8;
        }
        for i in 0..8 {
            out.co[i] = (3 - self.co[out.cp[i] as usize]) % 3;
        }
        for i in 0..12 {
            out.ep[self.ep[i] as usize] = i as u8;
        }
        for i in 0..12 {
            out.eo[i] = self.eo[out.ep[i] as usize];
        }
        out
    }

    /// Apply a single face turn.
    #[must_use]
    pub fn apply(&self, m: Move) -> CubieCube {
        self.multiply(&MOVE_CUBES[m.index()])
    }

    /// Apply a sequence of face turns, left to right.
    #[must_use]
    pub fn apply_moves(&self, moves: &[Move]) -> CubieCube {
        moves.iter().fold(*self, |cube, &m| cube.apply(m))
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == CubieCube::SOLVED
    }

    /// Whether the state is reachable from solved: both arrays are
    /// permutations, corner and edge parity agree, the twist sum is 0 mod 3
    /// and the flip sum is 0 mod 2.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_permutation(&self.cp)
            && is_permutation(&self.ep)
            && self.co.iter().all(|&o| o < 3)
            && self.eo.iter().all(|&o| o < 2)
            && permutation_parity(&self.cp) == permutation_parity(&self.ep)
            && self.co.iter().map(|&o| u32::from(o)).sum::<u32>() % 3 == 0
            && self.eo.iter().map(|&o| u32::from(o)).sum::<u32>() % 2 == 0
    }
}

fn is_permutation(perm: &[u8]) -> bool {
    let mut seen = [false; 12];
    perm.iter().all(|&v| {
        let slot = v as usize;
        if slot >= perm.len() || seen[slot] {
            return false;
        }
        seen[slot] = true;
        true
    })
}

/// Parity of a permutation via cycle decomposition: 0 = even, 1 = odd.
#[must_use]
pub fn permutation_parity(perm: &[u8]) -> u8 {
    let mut seen = [false; 12];
    let mut parity = 0;
    for start in 0..perm.len() {
        if seen[start] {
            continue;
        }
        let mut cycle_len = 0u8;
        let mut i = start;
        while !seen[i] {
            seen[i] = true;
            i = perm[i] as usize;
            cycle_len += 1;
        }
        parity ^= (cycle_len - 1) & 1;
    }
    parity
}
