//! Pure tic-tac-toe game logic with an exhaustive minimax opponent.
//!
//! # Architecture
//!
//! - **Rules**: [`evaluate`] classifies a [`Board`] as in progress, won, or
//!   tied by scanning the eight winning lines.
//! - **Moves**: [`apply_move`] validates and places a mark, returning a
//!   new board; [`next_turn`] toggles the mark to move.
//! - **Engine**: [`best_move`] runs a full minimax search and returns the
//!   optimal square, or [`NoMoveAvailable`] on a finished board.
//! - **Session**: [`Session`] records mode, mark assignment, and the board
//!   history for a front end that owns it.
//!
//! # Example
//!
//! ```
//! use noughts_core::{GameOutcome, Mark, Position, apply_move, best_move, evaluate};
//!
//! let board = "XX. OO. ...".parse()?;
//! let pos = best_move(&board, Mark::X)?;
//! assert_eq!(pos, Position::TopRight);
//!
//! let board = apply_move(&board, pos.to_index(), Mark::X)?;
//! assert_eq!(evaluate(&board), GameOutcome::Win(Mark::X));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod engine;
mod game;
pub mod invariants;
mod outcome;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::{Move, MoveError, NoMoveAvailable};
pub use contracts::{Contract, GameNotOver, IndexInRange, LegalMove, MoveContract, SquareIsEmpty};
pub use engine::{FirstAvailable, Minimax, Strategy, WIN_SCORE, best_move, ranked_moves, score};
pub use game::{apply_move, next_turn};
pub use outcome::GameOutcome;
pub use position::Position;
pub use rules::{check_winner, evaluate, is_full, winning_line};
pub use session::{GameMode, PlayerAssignment, ResetPolicy, Session, SessionError};
pub use types::{Board, BoardParseError, Mark, Square};
