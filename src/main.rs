//! Noughts - terminal tic-tac-toe
//!
//! Play against a friend or an unbeatable computer, analyse a board, or
//! watch the engine play itself.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use noughts::cli::{Cli, Command};
use noughts::{
    AppConfig, ComputerPlayer, GameEnd, GameEvent, HumanPlayer, LineInput, OpponentKind,
    Orchestrator, Player, line_input, print_events, read_line, render, solve,
};
use noughts_core::{Board, GameMode, Mark, Minimax, Session};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            mark,
            delay_ms,
            opponent,
            config,
        } => {
            let config = AppConfig::load(config.as_deref())?
                .with_mode(mode)
                .with_human_mark(mark)
                .with_delay_ms(delay_ms)
                .with_opponent(opponent);
            init_tracing(config.log_filter());
            run_play(config).await
        }
        Command::Solve { board, mark, json } => {
            init_tracing("warn");
            run_solve(&board, mark, json)
        }
        Command::SelfPlay { opponent } => {
            init_tracing("warn");
            run_self_play(opponent).await
        }
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins over the default filter.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Forwards stdin lines to a channel from a detached thread.
fn spawn_stdin_reader() -> LineInput {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });
    line_input(line_rx)
}

/// Asks until `parse` accepts an answer; `None` once input is closed.
async fn prompt<T>(
    input: &LineInput,
    question: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    loop {
        print!("{} ", question);
        std::io::stdout().flush().ok();
        let line = read_line(input).await?;
        if let Some(answer) = parse(line.trim()) {
            return Some(answer);
        }
        println!("Sorry, '{}' is not an option.", line.trim());
    }
}

fn parse_mode(answer: &str) -> Option<GameMode> {
    match answer {
        "1" => Some(GameMode::PlayerVsPlayer),
        "2" => Some(GameMode::PlayerVsComputer),
        other => other.parse().ok(),
    }
}

/// Answer to the end-of-game question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextGame {
    Again,
    ChangeMode,
    Stop,
}

fn parse_next_game(answer: &str) -> Option<NextGame> {
    match answer.to_lowercase().as_str() {
        "y" | "yes" => Some(NextGame::Again),
        "m" | "mode" => Some(NextGame::ChangeMode),
        "n" | "no" => Some(NextGame::Stop),
        _ => None,
    }
}

const MODE_QUESTION: &str = "Mode? 1) Player vs. Player  2) Player vs. Computer:";

/// Builds the players for a ready session.
fn players_for(
    session: &Session,
    config: &AppConfig,
    input: &LineInput,
) -> (Box<dyn Player>, Box<dyn Player>) {
    let Some(assignment) = session.assignment() else {
        return (
            Box::new(HumanPlayer::new("Player X", Arc::clone(input))),
            Box::new(HumanPlayer::new("Player O", Arc::clone(input))),
        );
    };

    let human: Box<dyn Player> = Box::new(HumanPlayer::new("You", Arc::clone(input)));
    let computer: Box<dyn Player> = Box::new(ComputerPlayer::new(
        "Computer",
        config.opponent().strategy(),
        config.delay(),
    ));
    match assignment.human() {
        Mark::X => (human, computer),
        Mark::O => (computer, human),
    }
}

/// Interactive game loop with play-again.
#[instrument(skip(config))]
async fn run_play(config: AppConfig) -> Result<()> {
    let input = spawn_stdin_reader();

    let mode = match config.mode() {
        Some(mode) => *mode,
        None => match prompt(&input, MODE_QUESTION, parse_mode).await {
            Some(mode) => mode,
            None => return Ok(()),
        },
    };
    info!(%mode, "Mode selected");

    let mut session = Session::new(mode);
    let mut first_game = true;

    loop {
        if !session.is_ready() {
            let configured = if first_game { *config.human_mark() } else { None };
            let mark = match configured {
                Some(mark) => mark,
                None => match prompt(&input, "Play as X or O?", |a| a.parse::<Mark>().ok()).await {
                    Some(mark) => mark,
                    None => return Ok(()),
                },
            };
            session.choose_mark(mark)?;
        }

        let (player_x, player_o) = players_for(&session, &config, &input);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let printer = tokio::spawn(print_events(event_rx));

        let mut game = Orchestrator::new(session, player_x, player_o, event_tx);
        let end = game.run().await?;
        session = game.into_session();
        printer.await.context("Renderer task failed")?;

        if end == GameEnd::Quit {
            info!("Player quit");
            return Ok(());
        }
        match prompt(&input, "Play again? (y)es, (n)o, or change (m)ode:", parse_next_game).await {
            Some(NextGame::Again) => session.reset(*config.reset_policy()),
            Some(NextGame::ChangeMode) => match prompt(&input, MODE_QUESTION, parse_mode).await {
                Some(mode) => session.change_mode(mode),
                None => return Ok(()),
            },
            Some(NextGame::Stop) | None => return Ok(()),
        }
        first_game = false;
    }
}

/// Prints the analysis of one board.
#[instrument]
fn run_solve(board: &str, mark: Option<Mark>, json: bool) -> Result<()> {
    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board '{}'", board))?;
    let report = solve(&board, mark);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", board.display());
        print!("{}", report.to_text());
    }
    Ok(())
}

/// Plays minimax as X against `opponent` and prints each ply.
#[instrument]
async fn run_self_play(opponent: OpponentKind) -> Result<()> {
    let engine = ComputerPlayer::new("minimax", Arc::new(Minimax), Duration::ZERO);
    let rival = ComputerPlayer::new(opponent.to_string(), opponent.strategy(), Duration::ZERO);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut game = Orchestrator::new(
        Session::new(GameMode::PlayerVsPlayer),
        Box::new(engine),
        Box::new(rival),
        event_tx,
    );
    let end = game.run().await?;
    drop(game);

    while let Some(event) = event_rx.recv().await {
        if matches!(event, GameEvent::MoveMade { .. } | GameEvent::GameOver { .. }) {
            print!("{}", render(&event));
        }
    }
    info!(?end, "Self-play finished");

    if matches!(end, GameEnd::Finished(_)) {
        Ok(())
    } else {
        anyhow::bail!("Self-play ended early")
    }
}
