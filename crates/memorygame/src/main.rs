//! `memgame` - CLI for memorygame
//!
//! This binary provides the terminal front end: interactive play plus the
//! commands for looking up and creating custom boards.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::IsTerminal;

use anyhow::Context;
use clap::Parser;

use memorygame::cli::{Cli, Command, ConfigCommand, CreateCommand, DownloadCommand, PlayCommand};
use memorygame::play::{self, PlayOptions};
use memorygame::render::color_enabled;
use memorygame::store::{download_board, open_store, upload_board};
use memorygame::{init_logging, BoardSize, Config, GameSession};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    match cli.command {
        Command::Play(play_cmd) => runtime.block_on(handle_play(&config, play_cmd)),
        Command::Download(download_cmd) => runtime.block_on(handle_download(&config, &download_cmd)),
        Command::Create(create_cmd) => runtime.block_on(handle_create(&config, create_cmd)),
        Command::Sizes => {
            handle_sizes();
            Ok(())
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_play(config: &Config, cmd: PlayCommand) -> anyhow::Result<()> {
    let board_size = cmd
        .difficulty
        .map_or(config.game.default_difficulty, BoardSize::from);
    let mut session = GameSession::new(board_size, cmd.seed.or(config.game.seed))?;

    let store = open_store(config).context("opening board store")?;
    let options = PlayOptions {
        collection: config.store.collection.clone(),
        color: color_enabled(
            config.game.color && !cmd.no_color,
            std::io::stdout().is_terminal(),
        ),
    };

    if let Some(name) = &cmd.game {
        let board = download_board(store.as_ref(), &options.collection, name)
            .await
            .with_context(|| format!("downloading custom game '{name}'"))?;
        session.apply_custom_board(board)?;
    }

    println!("{}", play::HELP);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play::run(
        &mut session,
        store.as_ref(),
        &options,
        stdin.lock(),
        stdout.lock(),
    )
    .await?;
    Ok(())
}

async fn handle_download(config: &Config, cmd: &DownloadCommand) -> anyhow::Result<()> {
    let store = open_store(config).context("opening board store")?;
    let board = download_board(store.as_ref(), &config.store.collection, &cmd.name).await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        println!("Game:        {}", board.name);
        println!("Board:       {}", board.board_size.description());
        println!("Images:");
        for (index, url) in board.images.iter().enumerate() {
            println!("  {:>2}. {url}", index + 1);
        }
    }
    Ok(())
}

async fn handle_create(config: &Config, cmd: CreateCommand) -> anyhow::Result<()> {
    let store = open_store(config).context("opening board store")?;
    let board = upload_board(
        store.as_ref(),
        &config.store.collection,
        &cmd.name,
        cmd.difficulty.into(),
        cmd.images,
    )
    .await?;

    println!(
        "Created custom game '{}' ({}) in the {} store.",
        board.name,
        board.board_size.description(),
        store.name()
    );
    println!("Play it with: memgame play --game {}", board.name);
    Ok(())
}

fn handle_sizes() {
    println!("{:<8} {:>5} {:>7} {:>6}", "LEVEL", "GRID", "CARDS", "PAIRS");
    for size in BoardSize::all() {
        println!(
            "{:<8} {:>5} {:>7} {:>6}",
            size.to_string(),
            format!("{}x{}", size.height(), size.width()),
            size.num_cards(),
            size.num_pairs()
        );
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Game]");
                println!("  Default difficulty: {}", config.game.default_difficulty);
                match config.game.seed {
                    Some(seed) => println!("  Seed:               {seed}"),
                    None => println!("  Seed:               (random)"),
                }
                println!("  Colour:             {}", config.game.color);
                println!();
                println!("[Store]");
                println!("  Backend:            {}", config.store.backend);
                println!("  Base URL:           {}", config.store.base_url);
                println!(
                    "  API key:            {}",
                    if config.store.api_key.is_some() {
                        "(set)"
                    } else {
                        "(none)"
                    }
                );
                println!("  Timeout (secs):     {}", config.store.timeout_secs);
                println!("  Collection:         {}", config.store.collection);
                println!(
                    "  Database path:      {}",
                    config.database_path().display()
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
