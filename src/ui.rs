//! Plain-text rendering of game events.

use crate::orchestrator::GameEvent;
use noughts_core::{Board, GameOutcome, Position, Square};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::instrument;

/// Draws the board with 1-9 in empty squares and the winning line in
/// brackets.
pub fn draw_board(board: &Board, highlight: Option<[Position; 3]>) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let pos = Position::ALL[row * 3 + col];
                let text = match board.get(pos) {
                    Square::Empty => (pos.to_index() + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                if highlight.is_some_and(|line| line.contains(&pos)) {
                    format!("[{}]", text)
                } else {
                    format!(" {} ", text)
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

/// Renders one event as the text to print.
pub fn render(event: &GameEvent) -> String {
    match event {
        GameEvent::StateChanged {
            board,
            to_move,
            player,
            ..
        } => format!("\n{}\n{}'s Turn ({})\n> ", draw_board(board, None), to_move, player),
        GameEvent::ComputerThinking { player } => format!("{} is thinking...\n", player),
        GameEvent::MoveMade { player, mv } => format!("{} played {}\n", player, mv),
        GameEvent::Rejected { reason } => format!("{}\n> ", reason),
        GameEvent::Undone { step } => format!("Rewound to move {}\n", step),
        GameEvent::Restarted => "New game\n".to_string(),
        GameEvent::GameOver {
            board,
            outcome,
            winner,
            line,
        } => {
            let headline = match (outcome, winner) {
                (GameOutcome::Win(mark), Some(name)) => format!("{} Wins! ({})", mark, name),
                _ => outcome.to_string(),
            };
            format!("\n{}\n{}\n", draw_board(board, *line), headline)
        }
    }
}

/// Prints events to stdout until the channel closes.
#[instrument(skip(event_rx))]
pub async fn print_events(mut event_rx: mpsc::UnboundedReceiver<GameEvent>) {
    while let Some(event) = event_rx.recv().await {
        let mut stdout = std::io::stdout().lock();
        // Broken stdout only loses output; the game keeps its state.
        let _ = write!(stdout, "{}", render(&event));
        let _ = stdout.flush();
    }
}
