use cube_core::notation::{format_sequence, parse_sequence};
use cube_core::random::{random_cube, Mulberry32};
use cube_core::{CubieCube, Move};
use std::sync::LazyLock;
use std::time::Instant;
use twophase::{SolveConfig, SolveError, Tables, TwoPhaseSolver};

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::generate);

fn solver() -> TwoPhaseSolver<'static> {
    TwoPhaseSolver::new(&TABLES)
}

#[test_log::test]
fn solved_cube_needs_no_moves() {
    let result = solver().solve(&CubieCube::SOLVED).unwrap();
    assert!(result.solution.is_empty());
    assert!(result.scramble.is_empty());
    assert!(result.phase1.is_empty());
    assert!(result.phase2.is_empty());
}

#[test_log::test]
fn single_turn_is_undone() {
    let cube = CubieCube::SOLVED.apply(Move::U);
    let result = solver().solve(&cube).unwrap();
    assert_eq!(result.solution, vec![Move::U3]);
    assert_eq!(result.scramble, vec![Move::U]);
}

#[test_log::test]
fn two_turns_are_undone_in_reverse() {
    let cube = CubieCube::SOLVED.apply(Move::U).apply(Move::R);
    let result = solver().solve(&cube).unwrap();
    assert_eq!(result.solution, vec![Move::R3, Move::U3]);
}

#[test_log::test]
fn solves_a_t_perm() {
    let scramble = parse_sequence("R U R' U' R' F R2 U' R' U' R U R' F'").unwrap();
    let cube = CubieCube::SOLVED.apply_moves(&scramble);
    let result = solver().solve(&cube).unwrap();
    assert!(result.solution.len() <= 30);
    assert!(cube.apply_moves(&result.solution).is_solved());
}

#[test_log::test]
fn seeded_random_state_solves_deterministically() {
    let mut rng = Mulberry32::new(12345);
    let cube = random_cube(&mut rng);

    let result = solver().solve(&cube).unwrap();
    assert!(
        (16..=25).contains(&result.solution.len()),
        "unexpected length {}",
        result.solution.len()
    );
    assert!(cube.apply_moves(&result.solution).is_solved());

    let mut rng = Mulberry32::new(12345);
    let rerun = solver().solve(&random_cube(&mut rng)).unwrap();
    assert_eq!(result.solution, rerun.solution);
    assert_eq!(
        format_sequence(&result.scramble),
        format_sequence(&rerun.scramble)
    );
}

#[test_log::test]
fn flipped_edge_is_rejected() {
    let mut cube = CubieCube::SOLVED;
    cube.eo[0] = 1;
    assert_eq!(solver().solve(&cube).unwrap_err(), SolveError::InvalidInput);
}

#[test_log::test]
fn random_states_solve_within_the_combined_cap() {
    let mut rng = Mulberry32::new(2026);
    for _ in 0..20 {
        let cube = random_cube(&mut rng);
        let result = solver().solve(&cube).unwrap();
        assert!(result.solution.len() <= 30);
        assert!(cube.apply_moves(&result.solution).is_solved());
        assert!(cube.apply_moves(&result.phase1).apply_moves(&result.phase2).is_solved());

        // The same-face skip holds within phases and across the seam.
        for pair in result.solution.windows(2) {
            assert_ne!(pair[0].face(), pair[1].face(), "{}", format_sequence(&result.solution));
        }
    }
}

#[test_log::test]
fn scramble_reproduces_the_state() {
    let mut rng = Mulberry32::new(777);
    for _ in 0..5 {
        let cube = random_cube(&mut rng);
        let result = solver().solve(&cube).unwrap();
        let rescrambled = CubieCube::SOLVED.apply_moves(&result.scramble);
        assert_eq!(rescrambled, cube);
        let again = solver().solve(&rescrambled).unwrap();
        assert_eq!(again.solution, result.solution);
    }
}

#[test_log::test]
fn first_solution_mode_matches_the_relaxed_target() {
    let scramble = parse_sequence("D2 F2 U' L2 D' B2 R' F' L D' R2 B'").unwrap();
    let cube = CubieCube::SOLVED.apply_moves(&scramble);
    let config = SolveConfig {
        target_length: 30,
        ..SolveConfig::default()
    };
    let result = solver().solve_with(&cube, &config).unwrap();
    assert!(result.solution.len() <= 30);
    assert!(cube.apply_moves(&result.solution).is_solved());
}

#[test_log::test]
fn exhausted_depth_caps_are_reported() {
    let cube = CubieCube::SOLVED.apply(Move::R);
    let config = SolveConfig {
        max_phase1_depth: 0,
        ..SolveConfig::default()
    };
    assert_eq!(
        solver().solve_with(&cube, &config).unwrap_err(),
        SolveError::Phase1Exhausted(0)
    );

    let cube = CubieCube::SOLVED.apply(Move::U);
    let config = SolveConfig {
        max_phase1_depth: 0,
        max_phase2_depth: 0,
        ..SolveConfig::default()
    };
    assert_eq!(
        solver().solve_with(&cube, &config).unwrap_err(),
        SolveError::Phase2Exhausted(0)
    );
}

#[test_log::test]
fn expired_deadline_reports_exhaustion() {
    let mut rng = Mulberry32::new(31337);
    let cube = random_cube(&mut rng);
    let config = SolveConfig {
        deadline: Some(Instant::now()),
        ..SolveConfig::default()
    };
    assert!(solver().solve_with(&cube, &config).is_err());
}
