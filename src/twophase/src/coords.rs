//! Bijections between cube-state fragments and compact integer indices.
//!
//! Each coordinate projects the cube onto a small integer domain with the
//! solved state at 0. `decode` reconstructs a cube that agrees with the
//! solved cube outside the coordinate's fields, which is what lets move
//! tables be built one coordinate at a time.

use cube_core::CubieCube;

/// A projection of the cube state onto `0..SIZE`.
pub trait Coordinate {
    /// Number of distinct values.
    const SIZE: usize;
    /// Table name; doubles as the pruning-table cache filename.
    const NAME: &'static str;

    fn encode(cube: &CubieCube) -> u16;
    fn decode(value: u16) -> CubieCube;
}

/// Edge orientation, the eleven free flip bits: `0..2048`.
pub struct EdgeFlip;

/// Corner orientation, seven free base-3 twist digits: `0..2187`.
pub struct CornerTwist;

/// Which four edge slots hold the E-slice edges, as a combination index:
/// `0..C(12,4)`.
pub struct ESliceSet;

/// Lehmer rank of the corner permutation: `0..8!`.
pub struct CornerPerm;

/// Lehmer rank of the U/D edge permutation in slots 0..8 (meaningful once
/// the cube is in the phase-2 subgroup): `0..8!`.
pub struct UdEdgePerm;

/// Lehmer rank of the E-slice edge permutation in slots 8..12 (meaningful
/// once the cube is in the phase-2 subgroup): `0..4!`.
pub struct ESlicePerm;

const FIRST_ESLICE_EDGE: u8 = 8;

const FACTORIALS: [u32; 9] = {
    let mut arr = [1u32; 9];
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u32;
        i += 1;
    }
    arr
};

// Pascal's triangle up to C(12, 4), all the slice coordinate needs.
const CHOOSE: [[u16; 5]; 13] = {
    let mut table = [[0u16; 5]; 13];
    let mut n = 0;
    while n < 13 {
        table[n][0] = 1;
        let mut k = 1;
        while k < 5 {
            table[n][k] = if n == 0 {
                0
            } else {
                table[n - 1][k - 1] + table[n - 1][k]
            };
            k += 1;
        }
        n += 1;
    }
    table
};

/// Lehmer rank: the number of permutations of the same values ordering
/// lexicographically before `perm`.
pub(crate) fn perm_to_index(perm: &[u8]) -> u16 {
    let n = perm.len();
    let mut index = 0;
    for i in 0..n {
        let smaller_later = perm[i + 1..].iter().filter(|&&v| v < perm[i]).count() as u32;
        index += smaller_later * FACTORIALS[n - 1 - i];
    }
    index as u16
}

/// Inverse of [`perm_to_index`], writing the permutation of `0..out.len()`
/// with the given rank.
pub(crate) fn index_to_perm(mut index: u32, out: &mut [u8]) {
    let n = out.len();
    let mut available = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
    let mut remaining = n;
    for i in 0..n {
        let factorial = FACTORIALS[n - 1 - i];
        let digit = (index / factorial) as usize;
        index %= factorial;
        out[i] = available[digit];
        available.copy_within(digit + 1..remaining, digit);
        remaining -= 1;
    }
}

impl Coordinate for EdgeFlip {
    const SIZE: usize = 2048;
    const NAME: &'static str = "flip";

    fn encode(cube: &CubieCube) -> u16 {
        cube.eo[..11]
            .iter()
            .fold(0, |acc, &flip| acc * 2 + u16::from(flip))
    }

    fn decode(mut value: u16) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        let mut flip_sum = 0;
        for slot in (0..11).rev() {
            cube.eo[slot] = (value % 2) as u8;
            flip_sum += cube.eo[slot];
            value /= 2;
        }
        cube.eo[11] = flip_sum % 2;
        cube
    }
}

impl Coordinate for CornerTwist {
    const SIZE: usize = 2187;
    const NAME: &'static str = "twist";

    fn encode(cube: &CubieCube) -> u16 {
        cube.co[..7]
            .iter()
            .fold(0, |acc, &twist| acc * 3 + u16::from(twist))
    }

    fn decode(mut value: u16) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        let mut twist_sum = 0;
        for slot in (0..7).rev() {
            cube.co[slot] = (value % 3) as u8;
            twist_sum += cube.co[slot];
            value /= 3;
        }
        cube.co[7] = (3 - twist_sum % 3) % 3;
        cube
    }
}

impl Coordinate for ESliceSet {
    const SIZE: usize = 495;
    const NAME: &'static str = "slice";

    // Reverse-lexicographic rank of the occupied slot set, so that the
    // solved combination {8,9,10,11} maps to 0.
    fn encode(cube: &CubieCube) -> u16 {
        let mut value = 494;
        let mut remaining = 4;
        for slot in (0..12).rev() {
            if cube.ep[slot] >= FIRST_ESLICE_EDGE {
                value -= CHOOSE[slot][remaining];
                remaining -= 1;
            }
        }
        value
    }

    fn decode(value: u16) -> CubieCube {
        let mut occupied = [false; 12];
        let mut target = 494 - value;
        let mut remaining = 4;
        for slot in (0..12).rev() {
            if remaining > 0 && CHOOSE[slot][remaining] <= target {
                target -= CHOOSE[slot][remaining];
                occupied[slot] = true;
                remaining -= 1;
            }
        }

        let mut cube = CubieCube::SOLVED;
        let mut next_slice = FIRST_ESLICE_EDGE;
        let mut next_other = 0;
        for slot in 0..12 {
            if occupied[slot] {
                cube.ep[slot] = next_slice;
                next_slice += 1;
            } else {
                cube.ep[slot] = next_other;
                next_other += 1;
            }
        }
        cube
    }
}

impl Coordinate for CornerPerm {
    const SIZE: usize = 40320;
    const NAME: &'static str = "corner_perm";

    fn encode(cube: &CubieCube) -> u16 {
        perm_to_index(&cube.cp)
    }

    fn decode(value: u16) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        index_to_perm(u32::from(value), &mut cube.cp);
        cube
    }
}

impl Coordinate for UdEdgePerm {
    const SIZE: usize = 40320;
    const NAME: &'static str = "ud_edge_perm";

    fn encode(cube: &CubieCube) -> u16 {
        perm_to_index(&cube.ep[..8])
    }

    fn decode(value: u16) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        index_to_perm(u32::from(value), &mut cube.ep[..8]);
        cube
    }
}

impl Coordinate for ESlicePerm {
    const SIZE: usize = 24;
    const NAME: &'static str = "slice_perm";

    fn encode(cube: &CubieCube) -> u16 {
        perm_to_index(&cube.ep[8..])
    }

    fn decode(value: u16) -> CubieCube {
        let mut slice_perm = [0u8; 4];
        index_to_perm(u32::from(value), &mut slice_perm);
        let mut cube = CubieCube::SOLVED;
        for (slot, &edge) in slice_perm.iter().enumerate() {
            cube.ep[8 + slot] = FIRST_ESLICE_EDGE + edge;
        }
        cube
    }
}
