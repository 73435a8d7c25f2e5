//! Computer player backed by a search strategy.

use super::{Player, PlayerAction};
use anyhow::{Context, Result};
use noughts_core::{Session, Strategy};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Automated player.
///
/// Waits for a cosmetic delay, then runs the strategy on a blocking
/// thread against a copy of the current board.
pub struct ComputerPlayer {
    name: String,
    strategy: Arc<dyn Strategy>,
    delay: Duration,
}

impl ComputerPlayer {
    /// Creates a new computer player.
    pub fn new(name: impl Into<String>, strategy: Arc<dyn Strategy>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            strategy,
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Player for ComputerPlayer {
    #[instrument(skip(self, session), fields(player = %self.name, strategy = self.strategy.name()))]
    async fn next_action(&mut self, session: &Session) -> Result<PlayerAction> {
        let board = *session.board();
        let mark = session.to_move();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let strategy = Arc::clone(&self.strategy);
        let position = tokio::task::spawn_blocking(move || strategy.choose(&board, mark))
            .await
            .context("Search task failed")??;

        debug!(%position, %mark, "Computer chose move");
        Ok(PlayerAction::Place(position))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
