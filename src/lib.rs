//! Noughts - terminal tic-tac-toe
//!
//! Presentation layer over [`noughts_core`]: configuration, players, the
//! async game loop and plain-text rendering.
//!
//! # Architecture
//!
//! - **Orchestrator**: owns the [`Session`](noughts_core::Session) and asks
//!   each [`Player`] for actions, emitting [`GameEvent`]s
//! - **Players**: humans read lines from a channel; the computer runs a
//!   search strategy after a short delay
//! - **UI**: renders events to stdout
//!
//! # Example
//!
//! ```no_run
//! use noughts::{ComputerPlayer, HumanPlayer, Orchestrator};
//! use noughts_core::{Mark, Minimax, Session};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (_line_tx, line_rx) = mpsc::unbounded_channel();
//! let (event_tx, event_rx) = mpsc::unbounded_channel();
//! tokio::spawn(noughts::print_events(event_rx));
//!
//! let human = HumanPlayer::new("You", noughts::line_input(line_rx));
//! let computer = ComputerPlayer::new("Computer", Arc::new(Minimax), Duration::from_millis(500));
//! let session = Session::against_computer(Mark::X);
//! let mut game = Orchestrator::new(session, Box::new(human), Box::new(computer), event_tx);
//! game.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod orchestrator;
mod players;
mod solve;
mod ui;

// Crate-level exports - Configuration
pub use config::{AppConfig, CONFIG_ENV_VAR, ConfigError, DEFAULT_CONFIG_FILE, OpponentKind};

// Crate-level exports - Game loop
pub use orchestrator::{GameEnd, GameEvent, Orchestrator};

// Crate-level exports - Players
pub use players::{
    ComputerPlayer, HumanPlayer, LineInput, Player, PlayerAction, line_input, parse_action,
    read_line,
};

// Crate-level exports - Analysis
pub use solve::{ScoredMove, SolveReport, infer_to_move, solve};

// Crate-level exports - Rendering
pub use ui::{draw_board, print_events, render};
