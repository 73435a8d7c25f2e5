//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, LineInput, line_input, parse_action, read_line};

use anyhow::Result;
use noughts_core::{Position, Session};

/// What a player wants to do on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Place the mark on turn at a position.
    Place(Position),
    /// Step back to the previous human turn.
    Undo,
    /// Start the game over with the same choices.
    Restart,
    /// Leave the game.
    Quit,
    /// Input that could not be understood.
    Unrecognized(String),
}

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets the next action from this player.
    async fn next_action(&mut self, session: &Session) -> Result<PlayerAction>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Returns true for automated players.
    fn is_computer(&self) -> bool {
        false
    }
}
