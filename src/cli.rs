//! Command-line interface for noughts.

use crate::config::OpponentKind;
use clap::{Parser, Subcommand};
use noughts_core::{GameMode, Mark};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or a perfect computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with an unbeatable minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Game mode (pvp or pvc); asked when omitted
        #[arg(long)]
        mode: Option<GameMode>,

        /// Your mark against the computer (x or o); asked when omitted
        #[arg(long)]
        mark: Option<Mark>,

        /// Pause before the computer moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Computer strategy
        #[arg(long, value_enum)]
        opponent: Option<OpponentKind>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the best move and per-square scores for a board
    Solve {
        /// Nine cells of X, O and . (or _ / -), row by row
        board: String,

        /// Side to move; inferred from the mark counts when omitted
        #[arg(long)]
        mark: Option<Mark>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play X against a strategy and print each ply
    SelfPlay {
        /// Strategy playing O
        #[arg(long, value_enum, default_value_t = OpponentKind::Minimax)]
        opponent: OpponentKind,
    },
}
