//! The 18 face turns as precomputed cubie-level operators.

use crate::CubieCube;
use std::fmt;

/// One of the six faces of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    U = 0,
    R = 1,
    F = 2,
    D = 3,
    L = 4,
    B = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Face> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }
}

/// A face turn, indexed 0..18 in the order
/// `U U2 U' R R2 R' F F2 F' D D2 D' L L2 L' B B2 B'`.
///
/// The `3` suffix denotes the 270 degree (prime) turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Move {
    U = 0,
    U2 = 1,
    U3 = 2,
    R = 3,
    R2 = 4,
    R3 = 5,
    F = 6,
    F2 = 7,
    F3 = 8,
    D = 9,
    D2 = 10,
    D3 = 11,
    L = 12,
    L2 = 13,
    L3 = 14,
    B = 15,
    B2 = 16,
    B3 = 17,
}

impl Move {
    pub const ALL: [Move; 18] = [
        Move::U,
        Move::U2,
        Move::U3,
        Move::R,
        Move::R2,
        Move::R3,
        Move::F,
        Move::F2,
        Move::F3,
        Move::D,
        Move::D2,
        Move::D3,
        Move::L,
        Move::L2,
        Move::L3,
        Move::B,
        Move::B2,
        Move::B3,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Move {
        Move::ALL[index]
    }

    #[must_use]
    pub const fn face(self) -> Face {
        match self as u8 / 3 {
            0 => Face::U,
            1 => Face::R,
            2 => Face::F,
            3 => Face::D,
            4 => Face::L,
            _ => Face::B,
        }
    }

    /// Number of clockwise quarter turns, 1..=3.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self as u8 % 3 + 1
    }

    /// The move on `face` turning `quarter_turns` times clockwise, if any.
    #[must_use]
    pub fn from_face_turns(face: Face, quarter_turns: u8) -> Option<Move> {
        match quarter_turns % 4 {
            0 => None,
            turns => Some(Move::from_index(face as usize * 3 + turns as usize - 1)),
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Move {
        Move::ALL[(self as usize / 3) * 3 + (2 - self as usize % 3)]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face().letter())?;
        match self.quarter_turns() {
            1 => Ok(()),
            2 => write!(f, "2"),
            _ => write!(f, "'"),
        }
    }
}

// The six 90 degree generators. Rows follow the slot order documented on
// `CubieCube`; `cp[i]` is the slot supplying the cubie landing in slot `i`.
const U_CUBE: CubieCube = CubieCube {
    cp: [3, 0, 1, 2, 4, 5, 6, 7],
    co: [0; 8],
    ep: [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
    eo: [0; 12],
};

const R_CUBE: CubieCube = CubieCube {
    cp: [4, 1, 2, 0, 7, 5, 6, 3],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [8, 1, 2, 3, 11, 5, 6, 7, 4, 9, 10, 0],
    eo: [0; 12],
};

const F_CUBE: CubieCube = CubieCube {
    cp: [1, 5, 2, 3, 0, 4, 6, 7],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [0, 9, 2, 3, 4, 8, 6, 7, 1, 5, 10, 11],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

const D_CUBE: CubieCube = CubieCube {
    cp: [0, 1, 2, 3, 5, 6, 7, 4],
    co: [0; 8],
    ep: [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11],
    eo: [0; 12],
};

const L_CUBE: CubieCube = CubieCube {
    cp: [0, 2, 6, 3, 4, 1, 5, 7],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [0, 1, 10, 3, 4, 5, 9, 7, 8, 2, 6, 11],
    eo: [0; 12],
};

const B_CUBE: CubieCube = CubieCube {
    cp: [0, 1, 3, 7, 4, 5, 2, 6],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [0, 1, 2, 11, 4, 5, 6, 10, 8, 9, 3, 7],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// All 18 move operators, indexed by `Move::index`.
pub static MOVE_CUBES: [CubieCube; 18] = generate_move_cubes();

const fn generate_move_cubes() -> [CubieCube; 18] {
    let generators = [U_CUBE, R_CUBE, F_CUBE, D_CUBE, L_CUBE, B_CUBE];
    let mut out = [CubieCube::SOLVED; 18];
    let mut face = 0;
    while face < 6 {
        let quarter = generators[face];
        let half = quarter.multiply(&quarter);
        out[face * 3] = quarter;
        out[face * 3 + 1] = half;
        out[face * 3 + 2] = half.multiply(&quarter);
        face += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for (i, m) in Move::ALL.into_iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(Move::from_index(i), m);
        }
    }

    #[test]
    fn inverse_pairs() {
        for m in Move::ALL {
            assert_eq!(m.inverse().inverse(), m);
            assert_eq!(m.face(), m.inverse().face());
            assert_eq!((m.quarter_turns() + m.inverse().quarter_turns()) % 4, 0);
        }
    }

    #[test]
    fn generators_are_valid_operators() {
        for m in Move::ALL {
            assert!(MOVE_CUBES[m.index()].is_valid(), "{m}");
        }
    }

    #[test]
    fn derived_turns_match_repeated_generators() {
        for face in Face::ALL {
            let quarter = Move::from_face_turns(face, 1).unwrap();
            let half = Move::from_face_turns(face, 2).unwrap();
            let prime = Move::from_face_turns(face, 3).unwrap();
            let one = MOVE_CUBES[quarter.index()];
            assert_eq!(MOVE_CUBES[half.index()], one.multiply(&one));
            assert_eq!(MOVE_CUBES[prime.index()], one.multiply(&one).multiply(&one));
            assert_eq!(MOVE_CUBES[prime.index()], one.inverse());
        }
    }
}
