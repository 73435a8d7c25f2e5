//! Tests for the game loop between players.

use anyhow::Result;
use noughts::{
    ComputerPlayer, GameEnd, GameEvent, HumanPlayer, Orchestrator, Player, PlayerAction,
    line_input,
};
use noughts_core::{
    FirstAvailable, GameMode, GameOutcome, Mark, Minimax, Position, Session,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Player that replays a fixed list of actions, then quits.
struct ScriptedPlayer {
    name: String,
    actions: VecDeque<PlayerAction>,
}

impl ScriptedPlayer {
    fn new(name: &str, cells: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            actions: cells
                .iter()
                .map(|&index| PlayerAction::Place(Position::from_index(index).unwrap()))
                .collect(),
        }
    }

    fn with_actions(name: &str, actions: Vec<PlayerAction>) -> Self {
        Self {
            name: name.to_string(),
            actions: actions.into(),
        }
    }
}

#[async_trait::async_trait]
impl Player for ScriptedPlayer {
    async fn next_action(&mut self, _session: &Session) -> Result<PlayerAction> {
        Ok(self.actions.pop_front().unwrap_or(PlayerAction::Quit))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn drain(mut event_rx: mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_pvp_game_to_win() {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut game = Orchestrator::new(
        Session::new(GameMode::PlayerVsPlayer),
        Box::new(ScriptedPlayer::new("Alice", &[0, 1, 2])),
        Box::new(ScriptedPlayer::new("Bob", &[3, 4])),
        event_tx,
    );

    let end = game.run().await.unwrap();
    assert_eq!(end, GameEnd::Finished(GameOutcome::Win(Mark::X)));
    assert_eq!(game.session().step(), 5);
    drop(game);

    let events = drain(event_rx);
    let moves = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves, 5);
    match events.last() {
        Some(GameEvent::GameOver { winner, line, .. }) => {
            assert_eq!(winner.as_deref(), Some("Alice"));
            assert_eq!(
                *line,
                Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
            );
        }
        other => panic!("expected game over, got {:?}", other),
    }
}

#[tokio::test]
async fn test_occupied_square_is_rejected_without_state_change() {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut game = Orchestrator::new(
        Session::new(GameMode::PlayerVsPlayer),
        Box::new(ScriptedPlayer::new("Alice", &[4])),
        Box::new(ScriptedPlayer::new("Bob", &[4])),
        event_tx,
    );

    // Bob's rejected move leaves him on turn; his script then runs out.
    assert_eq!(game.run().await.unwrap(), GameEnd::Quit);
    assert_eq!(game.session().step(), 1);
    assert_eq!(game.session().to_move(), Mark::O);
    drop(game);

    let events = drain(event_rx);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::Rejected { reason } if reason.contains("occupied")))
    );
}

#[tokio::test]
async fn test_computer_answers_human_move() {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    line_tx.send("5".to_string()).unwrap();
    line_tx.send("q".to_string()).unwrap();

    let mut game = Orchestrator::new(
        Session::against_computer(Mark::X),
        Box::new(HumanPlayer::new("You", line_input(line_rx))),
        Box::new(ComputerPlayer::new("Computer", Arc::new(Minimax), Duration::ZERO)),
        event_tx,
    );

    assert_eq!(game.run().await.unwrap(), GameEnd::Quit);
    let session = game.session().clone();
    assert_eq!(session.step(), 2);
    assert_eq!(session.to_move(), Mark::X);
    drop(game);

    let events = drain(event_rx);
    assert!(events.iter().any(|e| matches!(e, GameEvent::ComputerThinking { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MoveMade { player, mv } if player == "Computer" && mv.mark() == Mark::O
    )));
}

#[tokio::test]
async fn test_computer_opens_when_human_plays_o() {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    drop(line_tx);

    let mut game = Orchestrator::new(
        Session::against_computer(Mark::O),
        Box::new(ComputerPlayer::new("Computer", Arc::new(FirstAvailable), Duration::ZERO)),
        Box::new(HumanPlayer::new("You", line_input(line_rx))),
        event_tx,
    );

    // Closed input quits once the human is on turn.
    assert_eq!(game.run().await.unwrap(), GameEnd::Quit);
    assert_eq!(game.session().step(), 1);
    assert_eq!(game.session().board().to_string(), "X........");
}

#[tokio::test]
async fn test_undo_skips_computer_reply() {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut game = Orchestrator::new(
        Session::against_computer(Mark::X),
        Box::new(ScriptedPlayer::with_actions(
            "You",
            vec![PlayerAction::Place(Position::Center), PlayerAction::Undo],
        )),
        Box::new(ComputerPlayer::new("Computer", Arc::new(Minimax), Duration::ZERO)),
        event_tx,
    );

    assert_eq!(game.run().await.unwrap(), GameEnd::Quit);
    assert_eq!(game.session().step(), 0);
    assert_eq!(game.session().to_move(), Mark::X);
    drop(game);

    let events = drain(event_rx);
    assert!(events.contains(&GameEvent::Undone { step: 0 }));
}

#[tokio::test]
async fn test_restart_and_unrecognized_input() {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut game = Orchestrator::new(
        Session::new(GameMode::PlayerVsPlayer),
        Box::new(ScriptedPlayer::with_actions(
            "Alice",
            vec![
                PlayerAction::Place(Position::TopLeft),
                PlayerAction::Unrecognized("banana".to_string()),
                PlayerAction::Restart,
            ],
        )),
        Box::new(ScriptedPlayer::new("Bob", &[8])),
        event_tx,
    );

    assert_eq!(game.run().await.unwrap(), GameEnd::Quit);
    let session = game.into_session();
    assert_eq!(session.step(), 0);
    assert_eq!(session.history().len(), 1);

    let events = drain(event_rx);
    assert!(events.contains(&GameEvent::Restarted));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::Rejected { reason } if reason.contains("banana")))
    );
}
