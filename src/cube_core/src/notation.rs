//! Parsing and formatting of face-turn notation.
//!
//! Tokens match `[UDLRFB]('|P|2)?`, case-insensitively; `'` and `P` both
//! denote the 270 degree turn. Sequences are whitespace separated. Output is
//! canonical: `'` for primes, no suffix for 90 degree turns.

use crate::moves::{Face, Move};
use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("unrecognized move token `{0}`")]
    BadToken(String),
}

/// Parse a single move token.
///
/// # Errors
///
/// If the token is not a face letter with an optional `'`/`P`/`2` suffix.
pub fn parse_move(token: &str) -> Result<Move, NotationError> {
    let bad = || NotationError::BadToken(token.to_owned());
    let mut chars = token.chars();
    let face = chars
        .next()
        .and_then(Face::from_letter)
        .ok_or_else(bad)?;
    let quarter_turns = match chars.next() {
        None => 1,
        Some('2') => 2,
        Some(c) if c == '\'' || c.eq_ignore_ascii_case(&'p') => 3,
        Some(_) => return Err(bad()),
    };
    if chars.next().is_some() {
        return Err(bad());
    }
    Ok(Move::from_face_turns(face, quarter_turns).expect("turn count is 1..=3"))
}

/// Parse a whitespace-separated move sequence.
///
/// # Errors
///
/// If any token is invalid.
pub fn parse_sequence(input: &str) -> Result<Vec<Move>, NotationError> {
    input.split_whitespace().map(parse_move).collect()
}

/// Format a move sequence with single spaces between tokens.
#[must_use]
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// The sequence undoing `moves`: reversed, with each move inverted.
#[must_use]
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

/// Collapse runs on the same face into a single turn mod 4, dropping runs
/// that cancel. Adjacent runs exposed by a cancellation are merged too.
#[must_use]
pub fn simplify(moves: &[Move]) -> Vec<Move> {
    let mut runs: Vec<(Face, u8)> = Vec::with_capacity(moves.len());
    for &m in moves {
        match runs.pop() {
            Some((face, turns)) if face == m.face() => {
                let turns = (turns + m.quarter_turns()) % 4;
                if turns != 0 {
                    runs.push((face, turns));
                }
            }
            Some(run) => {
                runs.push(run);
                runs.push((m.face(), m.quarter_turns()));
            }
            None => runs.push((m.face(), m.quarter_turns())),
        }
    }
    runs.into_iter()
        .map(|(face, turns)| Move::from_face_turns(face, turns).expect("runs with 0 turns are dropped"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_round_trip() {
        for m in Move::ALL {
            assert_eq!(parse_move(&m.to_string()), Ok(m));
        }
    }

    #[test]
    fn prime_spellings_and_case() {
        for token in ["U'", "UP", "up", "u'"] {
            assert_eq!(parse_move(token), Ok(Move::U3), "{token}");
        }
        assert_eq!(parse_move("r2"), Ok(Move::R2));
        assert_eq!(parse_move("b"), Ok(Move::B));
    }

    #[test]
    fn bad_tokens_are_rejected() {
        for token in ["", "M", "U3", "U''", "2U", "RP2"] {
            assert!(parse_move(token).is_err(), "{token}");
        }
    }

    #[test]
    fn sequence_round_trip() {
        let input = "R U R' U' R' F R2 U' R' U' R U R' F'";
        let parsed = parse_sequence(input).unwrap();
        assert_eq!(parsed.len(), 14);
        assert_eq!(format_sequence(&parsed), input);
    }

    #[test]
    fn inversion_reverses_and_inverts() {
        let moves = parse_sequence("R U2 F'").unwrap();
        assert_eq!(invert_sequence(&moves), parse_sequence("F U2 R'").unwrap());
    }

    #[test]
    fn simplification_collapses_runs() {
        let cases = [
            ("U U", "U2"),
            ("U U'", ""),
            ("R2 R2", ""),
            ("F F F", "F'"),
            ("R U U' R", "R2"),
            ("R U U' R2 R", ""),
            ("F R U2 U2 R'", "F"),
        ];
        for (input, expected) in cases {
            let simplified = simplify(&parse_sequence(input).unwrap());
            assert_eq!(format_sequence(&simplified), expected, "{input}");
        }
    }
}
