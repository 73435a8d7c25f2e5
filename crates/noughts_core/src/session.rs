//! Play session: mode, mark assignment, and board history.
//!
//! A [`Session`] is an explicit value owned by whoever drives the game
//! (a terminal loop, a test, a GUI). The core functions it calls stay
//! pure; the session only records their results.

use super::action::{Move, MoveError};
use super::engine::Strategy;
use super::game::apply_move;
use super::invariants::{InvariantSet, SessionInvariants};
use super::outcome::GameOutcome;
use super::rules::evaluate;
use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who plays the two marks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans share the board.
    #[strum(serialize = "pvp", to_string = "Player vs. Player")]
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    /// A human plays against the decision engine.
    #[strum(serialize = "pvc", serialize = "pvai", to_string = "Player vs. Computer")]
    #[serde(rename = "pvc", alias = "pvai")]
    PlayerVsComputer,
}

/// Which mark the human controls in [`GameMode::PlayerVsComputer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAssignment {
    human: Mark,
}

impl PlayerAssignment {
    /// Assigns `human` to the person; the computer gets the other mark.
    pub fn new(human: Mark) -> Self {
        Self { human }
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// The computer's mark.
    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }
}

/// What [`Session::reset`] does with the mode and mark choices.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResetPolicy {
    /// Start a new game with the same mode and mark.
    #[default]
    KeepChoices,
    /// Start a new game and ask for the mark again.
    ClearChoices,
}

/// Session-level misuse.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// The computer mode still needs the human's mark.
    #[display("Choose a mark before playing")]
    NotReady,

    /// A mark can only be chosen in computer mode.
    #[display("Marks are only assigned when playing the computer")]
    NotComputerMode,

    /// The mark for this session was already chosen.
    #[display("Mark already chosen: {}", _0)]
    MarkAlreadyChosen(Mark),

    /// The move was attempted by the side that is not on turn.
    #[display("It's not your turn ({} to move)", _0)]
    NotYourTurn(Mark),

    /// The board rejected the move.
    #[from]
    #[display("Illegal move: {}", _0)]
    IllegalMove(MoveError),

    /// A history step outside the recorded plies.
    #[display("Step {} is outside the history (0-{})", step, last)]
    StepOutOfRange {
        /// Requested step.
        step: usize,
        /// Last recorded step.
        last: usize,
    },

    /// The session broke one of its own invariants.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for SessionError {}

/// A single game session.
///
/// History holds one board per ply, starting with the empty board. The
/// current step selects the board on display; playing after stepping
/// back discards the snapshots past the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    pub(crate) mode: GameMode,
    pub(crate) assignment: Option<PlayerAssignment>,
    pub(crate) history: Vec<Board>,
    pub(crate) step: usize,
}

/// Unchecked wire form of a [`Session`].
#[derive(Deserialize)]
struct SessionRecord {
    mode: GameMode,
    assignment: Option<PlayerAssignment>,
    history: Vec<Board>,
    step: usize,
}

impl TryFrom<SessionRecord> for Session {
    type Error = SessionError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        if record.history.is_empty() {
            return Err(SessionError::InvariantViolation(
                "History must start with the empty board".to_string(),
            ));
        }
        if record.step >= record.history.len() {
            return Err(SessionError::StepOutOfRange {
                step: record.step,
                last: record.history.len() - 1,
            });
        }
        // Only the latest snapshot may be finished.
        let played = &record.history[..record.history.len() - 1];
        if played.iter().any(|board| evaluate(board).is_terminal()) {
            return Err(SessionError::IllegalMove(MoveError::GameOver));
        }
        if record.assignment.is_some() && record.mode != GameMode::PlayerVsComputer {
            return Err(SessionError::NotComputerMode);
        }

        let session = Self {
            mode: record.mode,
            assignment: record.assignment,
            history: record.history,
            step: record.step,
        };
        session.verify()?;
        Ok(session)
    }
}

impl Session {
    /// Creates a session on an empty board.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(%mode, "Creating new session");
        Self {
            mode,
            assignment: None,
            history: vec![Board::new()],
            step: 0,
        }
    }

    /// Creates a computer-mode session with the human's mark already chosen.
    #[instrument]
    pub fn against_computer(human: Mark) -> Self {
        let mut session = Self::new(GameMode::PlayerVsComputer);
        session.assignment = Some(PlayerAssignment::new(human));
        session
    }

    /// Assigns the human's mark in computer mode.
    #[instrument(skip(self))]
    pub fn choose_mark(&mut self, human: Mark) -> Result<PlayerAssignment, SessionError> {
        if self.mode != GameMode::PlayerVsComputer {
            return Err(SessionError::NotComputerMode);
        }
        if let Some(existing) = self.assignment {
            return Err(SessionError::MarkAlreadyChosen(existing.human()));
        }

        let assignment = PlayerAssignment::new(human);
        info!(human = %human, computer = %assignment.computer(), "Marks assigned");
        self.assignment = Some(assignment);
        Ok(assignment)
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the mark assignment, if chosen.
    pub fn assignment(&self) -> Option<PlayerAssignment> {
        self.assignment
    }

    /// Returns the computer's mark, if the computer is playing.
    pub fn computer_mark(&self) -> Option<Mark> {
        self.assignment.map(|a| a.computer())
    }

    /// Returns all recorded snapshots.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Returns the current step (number of plies on the displayed board).
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the board at the current step.
    pub fn board(&self) -> &Board {
        &self.history[self.step]
    }

    /// Returns the mark to move. X moves on even steps.
    pub fn to_move(&self) -> Mark {
        if self.step % 2 == 0 { Mark::X } else { Mark::O }
    }

    /// Returns the outcome of the current board.
    pub fn outcome(&self) -> GameOutcome {
        evaluate(self.board())
    }

    /// Returns true once the current board is won or full.
    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Returns true when moves may be played.
    pub fn is_ready(&self) -> bool {
        match self.mode {
            GameMode::PlayerVsPlayer => true,
            GameMode::PlayerVsComputer => self.assignment.is_some(),
        }
    }

    /// Returns true when the computer should move next.
    pub fn is_computer_turn(&self) -> bool {
        self.computer_mark() == Some(self.to_move()) && !self.is_over()
    }

    /// Plays a human move at `index` (0-8) for the mark on turn.
    ///
    /// # Errors
    ///
    /// Fails if the session is not ready, if the computer is on turn, or if
    /// the board rejects the move.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn play(&mut self, index: usize) -> Result<GameOutcome, SessionError> {
        if !self.is_ready() {
            return Err(SessionError::NotReady);
        }
        if self.is_computer_turn() {
            warn!(index, "Human move attempted on computer's turn");
            return Err(SessionError::NotYourTurn(self.to_move()));
        }
        self.push(index, self.to_move())
    }

    /// Snapshot the computer needs to search, if it is on turn.
    pub fn computer_request(&self) -> Option<(Board, Mark)> {
        if self.is_ready() && self.is_computer_turn() {
            Some((*self.board(), self.to_move()))
        } else {
            None
        }
    }

    /// Applies a position chosen for the computer.
    ///
    /// # Errors
    ///
    /// Fails with [`SessionError::NotYourTurn`] if the computer is not on
    /// turn, or if the board rejects the move.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn apply_computer_move(&mut self, position: Position) -> Result<GameOutcome, SessionError> {
        if !self.is_ready() {
            return Err(SessionError::NotReady);
        }
        if !self.is_computer_turn() {
            return Err(SessionError::NotYourTurn(self.to_move()));
        }
        self.push(position.to_index(), self.to_move())
    }

    /// Lets `strategy` move for the computer, synchronously.
    ///
    /// Returns `Ok(None)` when the computer is not on turn or has no move.
    #[instrument(skip(self, strategy), fields(strategy = strategy.name()))]
    pub fn play_computer(&mut self, strategy: &dyn Strategy) -> Result<Option<Move>, SessionError> {
        let Some((board, mark)) = self.computer_request() else {
            return Ok(None);
        };
        match strategy.choose(&board, mark) {
            Ok(position) => {
                self.apply_computer_move(position)?;
                Ok(Some(Move::new(mark, position)))
            }
            Err(no_move) => {
                debug!(%no_move, "Computer has nothing to play");
                Ok(None)
            }
        }
    }

    /// Moves the current step to `step` without discarding history.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), SessionError> {
        let last = self.history.len() - 1;
        if step > last {
            return Err(SessionError::StepOutOfRange { step, last });
        }
        debug!(from = self.step, to = step, "Jumping in history");
        self.step = step;
        Ok(())
    }

    /// Steps back to the previous human turn and returns the new step.
    ///
    /// Against the computer this rewinds the computer's reply too, so the
    /// human is on turn again (unless the computer opened the game).
    #[instrument(skip(self), fields(step = self.step))]
    pub fn undo(&mut self) -> Result<usize, SessionError> {
        if self.step == 0 {
            return Err(SessionError::StepOutOfRange { step: 0, last: self.history.len() - 1 });
        }
        self.step -= 1;
        while self.step > 0 && self.computer_mark() == Some(self.to_move()) {
            self.step -= 1;
        }
        Ok(self.step)
    }

    /// Discards the history and starts over on an empty board.
    #[instrument(skip(self))]
    pub fn reset(&mut self, policy: ResetPolicy) {
        info!(%policy, "Resetting session");
        self.history = vec![Board::new()];
        self.step = 0;
        if policy == ResetPolicy::ClearChoices {
            self.assignment = None;
        }
    }

    /// Switches mode and starts over, forgetting the mark assignment.
    #[instrument(skip(self))]
    pub fn change_mode(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Changing mode");
        self.reset(ResetPolicy::ClearChoices);
        self.mode = mode;
    }

    fn push(&mut self, index: usize, mark: Mark) -> Result<GameOutcome, SessionError> {
        let next = apply_move(self.board(), index, mark)?;
        let mut candidate = self.clone();
        candidate.history.truncate(self.step + 1);
        candidate.history.push(next);
        candidate.step += 1;

        #[cfg(debug_assertions)]
        candidate.verify()?;

        *self = candidate;
        let outcome = self.outcome();
        debug!(index, %mark, %outcome, step = self.step, "Ply recorded");
        Ok(outcome)
    }

    fn verify(&self) -> Result<(), SessionError> {
        SessionInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Session invariants violated");
            SessionError::InvariantViolation(descriptions)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Minimax, Square};

    #[test]
    fn test_pvp_ready_immediately() {
        let session = Session::new(GameMode::PlayerVsPlayer);
        assert!(session.is_ready());
        assert!(!session.is_computer_turn());
        assert_eq!(session.to_move(), Mark::X);
    }

    #[test]
    fn test_pvc_requires_mark() {
        let mut session = Session::new(GameMode::PlayerVsComputer);
        assert_eq!(session.play(0), Err(SessionError::NotReady));
        session.choose_mark(Mark::X).unwrap();
        assert_eq!(session.choose_mark(Mark::O), Err(SessionError::MarkAlreadyChosen(Mark::X)));
        assert!(session.play(0).is_ok());
    }

    #[test]
    fn test_choose_mark_rejected_in_pvp() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        assert_eq!(session.choose_mark(Mark::X), Err(SessionError::NotComputerMode));
    }

    #[test]
    fn test_human_as_o_lets_computer_open() {
        let mut session = Session::against_computer(Mark::O);
        assert!(session.is_computer_turn());
        assert_eq!(session.play(4), Err(SessionError::NotYourTurn(Mark::X)));

        let played = session.play_computer(&Minimax).unwrap().unwrap();
        assert_eq!(played.mark, Mark::X);
        assert_eq!(session.board().get(played.position), Square::Occupied(Mark::X));
        assert!(!session.is_computer_turn());
    }

    #[test]
    fn test_illegal_move_is_wrapped() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        session.play(0).unwrap();
        assert_eq!(
            session.play(0),
            Err(SessionError::IllegalMove(MoveError::SquareOccupied(Position::TopLeft)))
        );
        assert_eq!(session.step(), 1, "rejected move must not record a ply");
    }

    #[test]
    fn test_jump_then_play_truncates() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        for index in [0, 4, 8] {
            session.play(index).unwrap();
        }
        session.jump_to(1).unwrap();
        assert_eq!(session.to_move(), Mark::O);
        session.play(2).unwrap();
        assert_eq!(session.history().len(), 3);
        assert!(session.board().is_empty(Position::Center));
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        assert_eq!(
            session.jump_to(2),
            Err(SessionError::StepOutOfRange { step: 2, last: 0 })
        );
    }

    #[test]
    fn test_undo_against_computer_skips_reply() {
        let mut session = Session::against_computer(Mark::X);
        session.play(0).unwrap();
        session.play_computer(&Minimax).unwrap();
        assert_eq!(session.step(), 2);
        assert_eq!(session.undo(), Ok(0));
        assert_eq!(session.to_move(), Mark::X);
    }

    #[test]
    fn test_reset_policies() {
        let mut session = Session::against_computer(Mark::X);
        session.play(0).unwrap();

        session.reset(ResetPolicy::KeepChoices);
        assert_eq!(session.board(), &Board::new());
        assert!(session.is_ready());

        session.reset(ResetPolicy::ClearChoices);
        assert!(!session.is_ready());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_mode_parses_from_cli_names() {
        assert_eq!("pvp".parse::<GameMode>(), Ok(GameMode::PlayerVsPlayer));
        assert_eq!("pvc".parse::<GameMode>(), Ok(GameMode::PlayerVsComputer));
        assert_eq!("pvai".parse::<GameMode>(), Ok(GameMode::PlayerVsComputer));
        assert_eq!(GameMode::PlayerVsPlayer.to_string(), "Player vs. Player");
    }

    #[test]
    fn test_change_mode_starts_over_without_assignment() {
        let mut session = Session::against_computer(Mark::O);
        session.play_computer(&Minimax).unwrap();

        session.change_mode(GameMode::PlayerVsPlayer);
        assert_eq!(session.mode(), GameMode::PlayerVsPlayer);
        assert_eq!(session.assignment(), None);
        assert_eq!(session.step(), 0);
        assert!(session.is_ready());

        session.change_mode(GameMode::PlayerVsComputer);
        assert!(!session.is_ready());
        assert!(session.choose_mark(Mark::X).is_ok());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_failed_invariant_leaves_session_untouched() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        session.play(4).unwrap();
        // An extra mark sneaks into the latest snapshot.
        session.history[1] = session.history[1].with_mark(Position::TopLeft, Mark::O);
        let before = session.clone();

        let result = session.play(8);
        assert!(matches!(result, Err(SessionError::InvariantViolation(_))));
        assert_eq!(session, before);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_payloads() {
        let empty = r#"{"mode":"pvp","assignment":null,"history":[],"step":0}"#;
        assert!(serde_json::from_str::<Session>(empty).is_err());

        let mut session = Session::new(GameMode::PlayerVsPlayer);
        session.play(4).unwrap();
        let mut value = serde_json::to_value(&session).unwrap();

        value["step"] = serde_json::json!(5);
        assert!(serde_json::from_value::<Session>(value.clone()).is_err());

        // Two marks appear in a single ply.
        value["step"] = serde_json::json!(1);
        value["history"][1] = serde_json::to_value(
            session.history[1].with_mark(Position::TopLeft, Mark::O),
        )
        .unwrap();
        assert!(serde_json::from_value::<Session>(value).is_err());

        // A mark assignment outside computer mode.
        let mut assigned = serde_json::to_value(Session::against_computer(Mark::X)).unwrap();
        assigned["mode"] = serde_json::json!("pvp");
        assert!(serde_json::from_value::<Session>(assigned).is_err());
    }

    #[test]
    fn test_deserialize_accepts_recorded_session() {
        let mut session = Session::against_computer(Mark::X);
        session.play(0).unwrap();
        session.play_computer(&Minimax).unwrap();
        session.jump_to(1).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.to_move(), Mark::O);
    }
}
