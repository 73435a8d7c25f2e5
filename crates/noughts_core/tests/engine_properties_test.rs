//! Properties of the minimax engine over real positions.

use noughts_core::{
    Board, GameOutcome, Mark, MoveError, NoMoveAvailable, Position, Square, apply_move, best_move,
    evaluate, ranked_moves,
};
use std::collections::HashSet;

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

/// Every position reachable by legal play from the empty board.
fn reachable_positions() -> Vec<(Board, Mark)> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Board::new(), Mark::X)];
    let mut found = Vec::new();
    while let Some((b, to_move)) = stack.pop() {
        if !seen.insert(b) {
            continue;
        }
        found.push((b, to_move));
        if evaluate(&b).is_terminal() {
            continue;
        }
        for pos in b.empty_positions() {
            let next = apply_move(&b, pos.to_index(), to_move).expect("legal move");
            stack.push((next, to_move.opponent()));
        }
    }
    found
}

#[test]
fn test_completes_winning_row() {
    // [A,A,_, B,B,_, _,_,_] with A to move.
    let b = board("XX. OO. ...");
    assert_eq!(best_move(&b, Mark::X), Ok(Position::TopRight));

    let relabeled = b.swapped();
    assert_eq!(best_move(&relabeled, Mark::O), Ok(Position::TopRight));
}

#[test]
fn test_never_picks_occupied_and_never_loses_with_diagonal_start() {
    // [A,_,_, _,A,_, _,_,B]: the square B holds is not a candidate.
    let b = board("X.. .X. ..O");
    let pos = best_move(&b, Mark::X).expect("move available");
    assert_ne!(pos, Position::BottomRight);
    assert!(b.is_empty(pos));

    let ranked = ranked_moves(&b, Mark::X);
    let chosen = ranked
        .iter()
        .find(|(p, _)| *p == pos)
        .map(|(_, s)| *s)
        .expect("chosen move is ranked");
    assert!(chosen >= 0, "engine must not choose a forced loss, scored {}", chosen);
}

#[test]
fn test_best_move_is_always_empty_on_reachable_boards() {
    for (b, to_move) in reachable_positions() {
        match evaluate(&b) {
            GameOutcome::InProgress => {
                let pos = best_move(&b, to_move).expect("in-progress board has a move");
                assert_eq!(b.get(pos), Square::Empty, "board {}", b);
            }
            _ => assert_eq!(best_move(&b, to_move), Err(NoMoveAvailable)),
        }
    }
}

#[test]
fn test_ties_break_to_lowest_index() {
    let b = Board::new();
    let ranked = ranked_moves(&b, Mark::X);
    let top = ranked.iter().map(|(_, s)| *s).max().expect("nine moves");
    let first_best = ranked
        .iter()
        .find(|(_, s)| *s == top)
        .map(|(p, _)| *p)
        .expect("some move has the top score");
    assert_eq!(best_move(&b, Mark::X), Ok(first_best));
}

#[test]
fn test_empty_board_is_a_tie_under_perfect_play() {
    assert!(ranked_moves(&Board::new(), Mark::X).iter().all(|(_, s)| *s == 0));
}

#[test]
fn test_self_play_from_empty_board_ties() {
    let mut b = Board::new();
    let mut to_move = Mark::X;
    while evaluate(&b) == GameOutcome::InProgress {
        let pos = best_move(&b, to_move).expect("move available");
        b = apply_move(&b, pos.to_index(), to_move).expect("engine move is legal");
        to_move = to_move.opponent();
    }
    assert_eq!(evaluate(&b), GameOutcome::Tie);
}

#[test]
fn test_self_play_ties_after_any_opening() {
    for opening in Position::ALL {
        let mut b = apply_move(&Board::new(), opening.to_index(), Mark::X).unwrap();
        let mut to_move = Mark::O;
        while evaluate(&b) == GameOutcome::InProgress {
            let pos = best_move(&b, to_move).unwrap();
            b = apply_move(&b, pos.to_index(), to_move).unwrap();
            to_move = to_move.opponent();
        }
        assert_eq!(evaluate(&b), GameOutcome::Tie, "opening {}", opening);
    }
}

#[test]
fn test_evaluate_symmetric_under_relabeling() {
    for (b, _) in reachable_positions() {
        let swapped = b.swapped();
        let expected = match evaluate(&b) {
            GameOutcome::Win(mark) => GameOutcome::Win(mark.opponent()),
            other => other,
        };
        assert_eq!(evaluate(&swapped), expected, "board {}", b);
    }
}

#[test]
fn test_evaluate_is_pure() {
    for (b, _) in reachable_positions().into_iter().take(500) {
        let copy = b;
        assert_eq!(evaluate(&b), evaluate(&b));
        assert_eq!(b, copy);
    }
}

#[test]
fn test_apply_move_rejects_every_index_on_terminal_board() {
    let won = board("XXX OO. ...");
    let tied = board("XOX XOO OXX");
    for terminal in [won, tied] {
        for index in 0..9 {
            assert_eq!(
                apply_move(&terminal, index, Mark::O),
                Err(MoveError::GameOver),
                "index {} on {}",
                index,
                terminal
            );
        }
    }
}

#[test]
fn test_engine_punishes_a_blunder() {
    // O answered a corner with an edge; X has a forced win.
    let b = board("XO. ... ...");
    let ranked = ranked_moves(&b, Mark::X);
    let pos = best_move(&b, Mark::X).unwrap();
    let chosen = ranked.iter().find(|(p, _)| *p == pos).unwrap().1;
    assert!(chosen > 0, "expected a forced win, got {}", chosen);
}
