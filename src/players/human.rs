//! Human player that reads commands from a line channel.

use super::{Player, PlayerAction};
use anyhow::Result;
use noughts_core::{Position, Session};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument};

/// Line source shared by every human at the same terminal.
pub type LineInput = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Wraps a line receiver for sharing between players and prompts.
pub fn line_input(rx: mpsc::UnboundedReceiver<String>) -> LineInput {
    Arc::new(Mutex::new(rx))
}

/// Reads the next non-blank line, or `None` once input is closed.
pub async fn read_line(input: &LineInput) -> Option<String> {
    let mut rx = input.lock().await;
    while let Some(line) = rx.recv().await {
        if !line.trim().is_empty() {
            return Some(line);
        }
    }
    None
}

/// Human player fed by lines of text (typically stdin).
pub struct HumanPlayer {
    name: String,
    input: LineInput,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: LineInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Parses one line of input into an action.
///
/// Cells are `1`-`9` or a label such as `center`; `u`, `r` and `q`
/// (or `undo`, `restart`, `quit`) are commands.
#[instrument]
pub fn parse_action(line: &str) -> PlayerAction {
    match line.trim().to_lowercase().as_str() {
        "u" | "undo" => PlayerAction::Undo,
        "r" | "restart" => PlayerAction::Restart,
        "q" | "quit" | "exit" => PlayerAction::Quit,
        other => Position::from_label_or_number(other)
            .map(PlayerAction::Place)
            .unwrap_or_else(|| PlayerAction::Unrecognized(line.trim().to_string())),
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn next_action(&mut self, _session: &Session) -> Result<PlayerAction> {
        match read_line(&self.input).await {
            Some(line) => {
                let action = parse_action(&line);
                debug!(player = %self.name, ?action, "Human input");
                Ok(action)
            }
            // Closed input (EOF) ends the game.
            None => Ok(PlayerAction::Quit),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
