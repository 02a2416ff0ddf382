//! Binary entrypoint for the textquest CLI.
//!
//! Commands:
//! - `play [--world <path>] [--name <name>] [--restore]` - play on stdin/stdout
//! - `init` - write a starter `config.toml`
//! - `check [--world <path>]` - load a world file and summarize it
//!
//! See the library crate docs for module-level details: `textquest::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use textquest::adventure::{
    load_world_from_json, CommandOutcome, ConsoleOutput, GameController, GameStore,
};
use textquest::config::Config;
use textquest::validation::validate_player_name;

#[derive(Parser)]
#[command(name = "textquest")]
#[command(about = "A room-and-puzzle text adventure engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// World file to load instead of the configured one
        #[arg(short, long)]
        world: Option<String>,

        /// Player name for a new game
        #[arg(short, long)]
        name: Option<String>,

        /// Resume from the configured save file
        #[arg(short, long)]
        restore: bool,
    },
    /// Write a default configuration file
    Init,
    /// Load a world file and print a summary
    Check {
        /// World file (defaults to the configured one)
        #[arg(short, long)]
        world: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        Config::create_default(&cli.config).await?;
        println!("Created default configuration at {}", cli.config);
        return Ok(());
    }

    let config = match Config::load(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            // No config file is fine; a broken one is worth knowing about.
            if std::path::Path::new(&cli.config).exists() {
                return Err(e);
            }
            Config::default()
        }
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play {
            world,
            name,
            restore,
        } => play(&config, world, name, restore).await,
        Commands::Check { world } => check(&config, world),
        Commands::Init => Ok(()),
    }
}

async fn play(
    config: &Config,
    world: Option<String>,
    name: Option<String>,
    restore: bool,
) -> Result<()> {
    let store = GameStore::new(&config.game.save_file);

    let controller = if restore {
        let (world, player) = store
            .load()
            .map_err(|e| anyhow!("Failed to restore {}: {}", store.path().display(), e))?;
        GameController::new(world, player, store, ConsoleOutput)
    } else {
        let world_file = world.unwrap_or_else(|| config.game.world_file.clone());
        let world = load_world_from_json(&world_file)
            .map_err(|e| anyhow!("Failed to load world {}: {}", world_file, e))?;
        let name = validate_player_name(name.as_deref().unwrap_or(&config.game.player_name))?;
        GameController::new_game(
            world,
            &name,
            config.game.max_weight,
            config.game.starting_health,
            store,
            ConsoleOutput,
        )?
    };
    let mut controller = controller.with_max_input_length(config.game.max_input_length);

    info!(
        "Starting textquest v{} session {}",
        env!("CARGO_PKG_VERSION"),
        controller.session_id()
    );
    controller.intro();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if controller.process(&line) == CommandOutcome::Quit {
                    break;
                }
            }
            Ok(None) => {
                info!("Input closed; ending session");
                break;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    let stats = textquest::metrics::snapshot();
    info!(
        "Session {} ended: {} commands ({} rejected), {} solved, {} saves, {} restores",
        controller.session_id(),
        stats.commands_processed,
        stats.commands_rejected,
        stats.problems_solved,
        stats.games_saved,
        stats.games_restored
    );
    Ok(())
}

fn check(config: &Config, world: Option<String>) -> Result<()> {
    let world_file = world.unwrap_or_else(|| config.game.world_file.clone());
    let world = load_world_from_json(&world_file)
        .map_err(|e| anyhow!("Failed to load world {}: {}", world_file, e))?;

    println!("{} (version {})", world.name(), world.version());
    println!("  rooms:    {}", world.room_count());
    println!("  items:    {}", world.items().len() + world.spare_items().len());
    println!("  fixtures: {}", world.fixtures().len());
    println!("  puzzles:  {}", world.puzzles().len());
    println!("  monsters: {}", world.monsters().len());
    match world.starting_room() {
        Some(start) => println!("  start:    room {}", start),
        None => warn!("World {} has no rooms", world_file),
    }
    Ok(())
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // -v flags override the configured level
    let level = match verbosity {
        0 => config
            .logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config.logging.file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    match log_file {
        Some(file) => {
            let file = std::sync::Mutex::new(file);
            // The terminal belongs to the game; echo only when stderr is redirected.
            let echo = !atty::is(atty::Stream::Stderr);
            builder.format(move |fmt, record| {
                let line = format!(
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                );
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if echo {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    }

    let _ = builder.try_init();
}
