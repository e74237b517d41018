//! Integration tests for the tour engine.
//!
//! Properties are checked over every start square and over random partial
//! grids drawn from a seeded generator, so failures are reproducible.

use knights_tour::board::{Grid, TourKind, validate_tour};
use knights_tour::config::SolveConfig;
use knights_tour::constants::SQUARES;
use knights_tour::heuristic::{best_move, evaluate, rank_moves};
use knights_tour::movegen::{is_knight_move, knight_targets, valid_moves};
use knights_tour::position::{Position, parse_coord};
use knights_tour::search::{SolveOutcome, Solver, solve_tour};

// =============================================================================
// Helper functions
// =============================================================================

/// A grid with roughly `density` of its squares visited.
fn random_grid(rng: &mut fastrand::Rng, density: f64) -> Grid {
    let mut grid = Grid::new();
    let mut order = 0u8;
    for sq in Position::all() {
        if rng.f64() < density {
            order += 1;
            grid.visit(sq, order);
        }
    }
    grid
}

fn random_square(rng: &mut fastrand::Rng) -> Position {
    Position::new(rng.u8(0..8), rng.u8(0..8))
}

/// Assert the invariants every returned tour must satisfy.
fn assert_tour(path: &[Position], start: Position) {
    assert_eq!(path.len(), SQUARES, "tour from {start} is incomplete");
    assert_eq!(path[0], start);
    let mut seen = [false; SQUARES];
    for (i, sq) in path.iter().enumerate() {
        assert!(!seen[sq.index()], "{sq} repeated in tour from {start}");
        seen[sq.index()] = true;
        if i > 0 {
            assert!(
                is_knight_move(path[i - 1], *sq),
                "{} -> {sq} is not a knight move",
                path[i - 1]
            );
        }
    }
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_valid_moves_from_corner() {
    let moves = valid_moves(parse_coord("a8").unwrap(), &Grid::new());
    assert_eq!(moves, vec![Position::new(1, 2), Position::new(2, 1)]);
}

#[test]
fn test_valid_moves_random_grids() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..500 {
        let grid = random_grid(&mut rng, 0.5);
        let from = random_square(&mut rng);
        let moves = valid_moves(from, &grid);

        for &to in &moves {
            assert!(is_knight_move(from, to));
            assert!(grid.is_unvisited(to));
        }
        // Nothing legal is left out
        let expected = knight_targets(from).filter(|&t| grid.is_unvisited(t)).count();
        assert_eq!(moves.len(), expected);
    }
}

// =============================================================================
// Heuristic
// =============================================================================

#[test]
fn test_best_move_leaves_grid_untouched() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..500 {
        let mut grid = random_grid(&mut rng, 0.4);
        let from = random_square(&mut rng);
        let start = rng.bool().then(|| random_square(&mut rng));
        let before = grid.clone();

        let first = best_move(from, &mut grid, start);
        assert_eq!(grid, before);
        if let Some(to) = first {
            assert!(is_knight_move(from, to));
            assert!(grid.is_unvisited(to));
        }

        // Same inputs, same answer
        assert_eq!(best_move(from, &mut grid, start), first);
        assert_eq!(grid, before);
    }
}

#[test]
fn test_rank_moves_sorted_by_degree() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..200 {
        let mut grid = random_grid(&mut rng, 0.3);
        let from = random_square(&mut rng);
        let ranked = rank_moves(from, &mut grid, None);
        for pair in ranked.windows(2) {
            assert!(pair[0].degree <= pair[1].degree);
            if pair[0].degree == pair[1].degree {
                assert!(pair[0].center_distance >= pair[1].center_distance);
            }
        }
    }
}

#[test]
fn test_best_move_takes_last_free_square() {
    // Everything visited except b6, one knight move from a8
    let knight = Position::new(0, 0);
    let last = Position::new(1, 2);
    let mut grid = Grid::new();
    let mut order = 0u8;
    for sq in Position::all().filter(|&sq| sq != last) {
        order += 1;
        grid.visit(sq, order);
    }
    assert_eq!(best_move(knight, &mut grid, None), Some(last));
    assert!(grid.is_unvisited(last));
}

#[test]
fn test_closing_flag_on_last_square() {
    // Fill the board from a tour, then free its final square
    let start = Position::new(0, 0);
    let tour = solve_tour(start, true).unwrap();
    let mut grid = Grid::from_path(&tour[..SQUARES - 1]);
    let last = tour[SQUARES - 1];

    let with_start = evaluate(&mut grid, last, Some(start));
    assert!(with_start.closes_tour);
    assert_eq!(with_start.degree, 0);

    let without_start = evaluate(&mut grid, last, None);
    assert!(!without_start.closes_tour);
    assert!(grid.is_unvisited(last));
}

#[test]
fn test_closing_flag_needs_start_adjacency() {
    let start = Position::new(0, 0);
    let tour = solve_tour(start, false).unwrap();
    assert_eq!(validate_tour(&tour), Ok(TourKind::Open));
    let mut grid = Grid::from_path(&tour[..SQUARES - 1]);
    let c = evaluate(&mut grid, tour[SQUARES - 1], Some(start));
    assert!(!c.closes_tour);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_open_tours_from_every_square() {
    for start in Position::all() {
        let path = solve_tour(start, false).unwrap_or_else(|| panic!("no open tour from {start}"));
        assert_tour(&path, start);
    }
}

#[test]
fn test_closed_tours_from_every_square() {
    for start in Position::all() {
        let mut solver = Solver::new(SolveConfig {
            prefer_closed: true,
            ..SolveConfig::for_testing()
        });
        let path = match solver.solve(start) {
            SolveOutcome::Tour(path) => path,
            other => panic!("no closed tour from {start}: {other:?}"),
        };
        assert_tour(&path, start);
        assert!(is_knight_move(path[SQUARES - 1], start));
        assert_eq!(validate_tour(&path), Ok(TourKind::Closed));
    }
}

#[test]
fn test_pruning_does_not_change_the_tour() {
    for start in Position::all() {
        let pruned = Solver::new(SolveConfig::open()).solve(start);
        let unpruned = Solver::new(SolveConfig {
            prune: false,
            ..SolveConfig::for_testing()
        })
        .solve(start);
        assert_eq!(pruned, unpruned, "tours from {start} differ");
    }
}

#[test]
fn test_pruning_does_not_change_closed_tour() {
    for name in ["c6", "d5", "e4", "f3"] {
        let start = parse_coord(name).unwrap();
        let pruned = Solver::new(SolveConfig::closed()).solve(start);
        let unpruned = Solver::new(SolveConfig {
            prefer_closed: true,
            prune: false,
            ..SolveConfig::for_testing()
        })
        .solve(start);
        assert_eq!(pruned, unpruned, "closed tours from {start} differ");
    }
}

#[test]
fn test_pruning_saves_work_on_closed_corner() {
    let start = Position::new(0, 0);
    let mut pruned = Solver::new(SolveConfig::closed());
    assert!(matches!(pruned.solve(start), SolveOutcome::Tour(_)));

    let mut unpruned = Solver::new(SolveConfig {
        prefer_closed: true,
        prune: false,
        max_nodes: Some(pruned.stats().nodes * 10),
    });
    assert_eq!(unpruned.solve(start), SolveOutcome::NodeLimit);
}

#[test]
fn test_solver_is_reusable() {
    let mut solver = Solver::new(SolveConfig::default());
    let first = solver.solve(Position::new(2, 2));
    let stats = solver.stats();
    let second = solver.solve(Position::new(2, 2));
    assert_eq!(first, second);
    assert_eq!(solver.stats(), stats);
}
