//! Sugoroku - unified CLI

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use sugoroku::sugoroku_engine::{Difficulty, GameSettings};
use sugoroku::{
    AppConfig, CatalogProvider, Cli, Command, GameService, LogBroadcaster, LogSink, NewGame, NoCatalog,
    PokeApiCatalog, SettingsAction, SettingsRepository, TomlFileStore, describe_turn, legend, render_board,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_settings_path(cli.settings_path);

    match cli.command {
        Command::Play {
            players,
            difficulty,
            seed,
            offline,
            max_turns,
        } => {
            let config = if offline { config.offline() } else { config };
            run_play(&config, players, difficulty, seed, max_turns).await
        }
        Command::Serve { port, host, offline } => {
            let config = config.with_bind(host, port);
            let config = if offline { config.offline() } else { config };
            run_server(&config).await
        }
        Command::Settings { action } => run_settings(&config, action),
    }
}

/// Wires the service from configuration.
#[instrument(skip(config))]
fn build_service(config: &AppConfig) -> Result<GameService> {
    let store = Arc::new(TomlFileStore::new(config.settings_path().clone()));
    let catalog: Arc<dyn CatalogProvider> = if *config.catalog().enabled() {
        Arc::new(PokeApiCatalog::new(config.catalog())?)
    } else {
        info!("Catalog disabled");
        Arc::new(NoCatalog)
    };

    let service = GameService::new(catalog, SettingsRepository::new(store)).with_broadcaster(Arc::new(LogBroadcaster));
    Ok(if *config.sound_log() {
        service.with_sound(Arc::new(LogSink))
    } else {
        service
    })
}

/// Plays a whole game in the terminal.
#[instrument(skip(config, players))]
async fn run_play(
    config: &AppConfig,
    players: Vec<String>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    max_turns: usize,
) -> Result<()> {
    let service = build_service(config)?;
    let request = NewGame {
        difficulty,
        seed,
        ..NewGame::with_players(players)
    };
    let mut state = service.create_game(request).await?;

    println!("{}", legend());
    println!("{}", render_board(&state));

    let mut turns = 0;
    while !state.game_ended() && turns < max_turns {
        state = service.roll(state.id(), None)?;
        println!("{}", describe_turn(&state, state.last_die_value().unwrap_or_default()));
        turns += 1;
    }

    println!();
    println!("{}", render_board(&state));
    match state.winner() {
        Some(winner) => println!("{} wins after {} turns!", winner.name(), turns),
        None => {
            warn!(turns, "Turn limit reached");
            println!("No winner after {} turns", turns);
        }
    }
    Ok(())
}

/// Runs the HTTP API.
async fn run_server(config: &AppConfig) -> Result<()> {
    let service = Arc::new(build_service(config)?);
    sugoroku::serve(service, config.host(), *config.port()).await?;
    Ok(())
}

/// Shows or edits saved settings.
#[instrument(skip(config))]
fn run_settings(config: &AppConfig, action: SettingsAction) -> Result<()> {
    let repository = SettingsRepository::new(Arc::new(TomlFileStore::new(config.settings_path().clone())));
    let service = GameService::new(Arc::new(NoCatalog), repository.clone());

    let updated = match action {
        SettingsAction::Show => None,
        SettingsAction::SetDifficulty { difficulty } => Some(GameSettings {
            difficulty,
            ..service.settings()?
        }),
        SettingsAction::Avatars { enabled } => Some(GameSettings {
            use_avatars: enabled,
            ..service.settings()?
        }),
        SettingsAction::Reset => {
            repository.reset()?;
            None
        }
    };
    if let Some(settings) = updated {
        service.update_settings(settings)?;
    }

    let settings = service.settings()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
