//! Command-line interface for sugoroku.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sugoroku_engine::Difficulty;

/// Sugoroku - race along a board of effect cells
#[derive(Parser, Debug)]
#[command(name = "sugoroku")]
#[command(about = "Sugoroku board game engine and server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings store file (overrides the config file)
    #[arg(long, global = true)]
    pub settings_path: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal, rolling for every player
    Play {
        /// Player names in seating order
        #[arg(required = true, num_args = 1..)]
        players: Vec<String>,

        /// Difficulty for this game (easy, normal, hard, custom)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the creature catalog
        #[arg(long)]
        offline: bool,

        /// Stop after this many turns even without a winner
        #[arg(long, default_value = "500")]
        max_turns: usize,
    },

    /// Run the HTTP API
    Serve {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Skip the creature catalog
        #[arg(long)]
        offline: bool,
    },

    /// Show or change saved settings
    Settings {
        /// Settings action
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Settings actions
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print saved settings as JSON
    Show,

    /// Save a difficulty preset
    SetDifficulty {
        /// easy, normal, hard or custom
        difficulty: Difficulty,
    },

    /// Turn avatars and decorations on or off
    Avatars {
        /// on or off
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Forget saved settings
    Reset,
}
