//! Game orchestration between players.

use crate::players::{Player, PlayerAction};
use anyhow::Result;
use noughts_core::{
    Board, GameMode, GameOutcome, Mark, Move, Position, ResetPolicy, Session, SessionError,
    winning_line,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board or turn changed; redraw.
    StateChanged {
        /// Board at the current step.
        board: Board,
        /// Current step in the history.
        step: usize,
        /// Mark on turn.
        to_move: Mark,
        /// Name of the player on turn.
        player: String,
    },
    /// The computer is searching.
    ComputerThinking {
        /// Name of the computer player.
        player: String,
    },
    /// Move was made.
    MoveMade {
        /// Name of the player who moved.
        player: String,
        /// The move.
        mv: Move,
    },
    /// An action was refused; the game state is unchanged.
    Rejected {
        /// Why the action was refused.
        reason: String,
    },
    /// History was rewound.
    Undone {
        /// Step after rewinding.
        step: usize,
    },
    /// Game was started over.
    Restarted,
    /// Game ended.
    GameOver {
        /// Final board.
        board: Board,
        /// Final outcome.
        outcome: GameOutcome,
        /// Name of the winning player, if any.
        winner: Option<String>,
        /// Winning line, if any.
        line: Option<[Position; 3]>,
    },
}

/// How a single game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// Played to a terminal outcome.
    Finished(GameOutcome),
    /// A player quit first.
    Quit,
}

/// Orchestrates gameplay between two players over one [`Session`].
pub struct Orchestrator {
    session: Session,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    ///
    /// In computer mode the session's assignment must match which player
    /// is automated.
    pub fn new(
        session: Session,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            player_x,
            player_o,
            event_tx,
        }
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consumes the orchestrator, returning the session.
    pub fn into_session(self) -> Session {
        self.session
    }

    fn player(&self, mark: Mark) -> &dyn Player {
        match mark {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }

    fn send(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }

    fn send_state(&self) -> Result<()> {
        let to_move = self.session.to_move();
        self.send(GameEvent::StateChanged {
            board: *self.session.board(),
            step: self.session.step(),
            to_move,
            player: self.player(to_move).name().to_string(),
        })
    }

    /// Runs the game loop until the game ends or a player quits.
    #[instrument(skip(self), fields(mode = %self.session.mode()))]
    pub async fn run(&mut self) -> Result<GameEnd> {
        info!("Starting game orchestration");
        self.send_state()?;

        loop {
            let outcome = self.session.outcome();
            if outcome.is_terminal() {
                let winner = outcome
                    .winner()
                    .map(|mark| self.player(mark).name().to_string());
                info!(%outcome, ?winner, "Game over");
                self.send(GameEvent::GameOver {
                    board: *self.session.board(),
                    outcome,
                    winner,
                    line: winning_line(self.session.board()),
                })?;
                return Ok(GameEnd::Finished(outcome));
            }

            let mark = self.session.to_move();
            let is_computer = self.player(mark).is_computer();
            let player_name = self.player(mark).name().to_string();

            if is_computer {
                self.send(GameEvent::ComputerThinking {
                    player: player_name.clone(),
                })?;
            }

            debug!(player = %player_name, %mark, "Waiting for action");
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let action = player.next_action(&self.session).await?;

            match action {
                PlayerAction::Place(position) => {
                    let result = if is_computer && self.session.mode() == GameMode::PlayerVsComputer {
                        self.session.apply_computer_move(position)
                    } else {
                        self.session.play(position.to_index())
                    };
                    match result {
                        Ok(_) => {
                            self.send(GameEvent::MoveMade {
                                player: player_name,
                                mv: Move::new(mark, position),
                            })?;
                            self.send_state()?;
                        }
                        Err(e) => self.reject(e)?,
                    }
                }
                PlayerAction::Undo => match self.session.undo() {
                    Ok(step) => {
                        self.send(GameEvent::Undone { step })?;
                        self.send_state()?;
                    }
                    Err(e) => self.reject(e)?,
                },
                PlayerAction::Restart => {
                    self.session.reset(ResetPolicy::KeepChoices);
                    self.send(GameEvent::Restarted)?;
                    self.send_state()?;
                }
                PlayerAction::Quit => {
                    info!(player = %player_name, "Player quit");
                    return Ok(GameEnd::Quit);
                }
                PlayerAction::Unrecognized(input) => {
                    self.send(GameEvent::Rejected {
                        reason: format!(
                            "Unrecognized input '{}': enter 1-9, u (undo), r (restart) or q (quit)",
                            input
                        ),
                    })?;
                }
            }
        }
    }

    fn reject(&self, error: SessionError) -> Result<()> {
        // Illegal moves are a no-op for the game, not a failure.
        warn!(%error, "Action rejected");
        self.send(GameEvent::Rejected {
            reason: error.to_string(),
        })
    }
}
