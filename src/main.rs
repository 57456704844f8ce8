//! Command-line front-end for the Throne Room tournament tool
//!
//! Every command loads the stored snapshot, applies one operation, saves the
//! result and prints a short summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use throne_room::config::AppConfig;
use throne_room::rating::MomentumRatingCalculator;
use throne_room::standings::{standings, to_csv};
use throne_room::storage::{JsonFileStorage, TournamentStorage};
use throne_room::types::PlayerId;
use throne_room::Tournament;
use tracing::{error, info};

/// Throne Room - seat management and momentum ratings for card-game tournaments
#[derive(Parser)]
#[command(name = "throne-room", version)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// State file override
    #[arg(long, value_name = "FILE", help = "Override the tournament state file")]
    state: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a seat
    Seat { seat: String },
    /// Seat a player, registering them on first appearance
    Join { seat: String, player: String },
    /// Remove a player from a seat
    Leave { seat: String, player: String },
    /// Remove a whole seat
    RemoveSeat { seat: String },
    /// Set a player's nickname
    Rename { player: String, nickname: String },
    /// Confirm a seat's finish order, winner first
    Rank {
        seat: String,
        #[arg(required = true)]
        players: Vec<PlayerId>,
    },
    /// Revert the last roster change
    Undo,
    /// Print the leaderboard
    Standings,
    /// Export all players as CSV
    ExportCsv {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if let Some(state) = &args.state {
        config.service.state_file = state.clone();
    }

    throne_room::config::validate_config(&config)?;
    Ok(config)
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    let storage = JsonFileStorage::new(&config.service.state_file);
    info!("Using state file {}", storage.path().display());

    let calculator = Arc::new(MomentumRatingCalculator::new(config.rating.clone())?);
    let mut tournament = Tournament::from_state(
        storage.load()?.unwrap_or_default(),
        calculator,
        config.seats.clone(),
    )?;

    let mutated = match args.command {
        Command::Seat { seat } => {
            if tournament.open_seat(&seat) {
                println!("Seat {} opened", seat);
            } else {
                println!("Seat {} already open", seat);
            }
            true
        }
        Command::Join { seat, player } => {
            let registered = tournament.join(&seat, &player)?;
            println!(
                "{} seated at {}{}",
                player,
                seat,
                if registered { " (new player)" } else { "" }
            );
            true
        }
        Command::Leave { seat, player } => {
            tournament.leave(&seat, &player)?;
            println!("{} removed from {}", player, seat);
            true
        }
        Command::RemoveSeat { seat } => {
            tournament.remove_seat(&seat)?;
            println!("Seat {} removed", seat);
            true
        }
        Command::Rename { player, nickname } => {
            tournament.rename(&player, &nickname)?;
            println!("{} is now {}", player, nickname);
            true
        }
        Command::Rank { seat, players } => {
            let record = tournament.confirm_ranking(&seat, &players)?;
            for change in &record.changes {
                println!(
                    "{}. {:<12} {:>3} -> {:>3} ({:+})",
                    change.rank, change.player_id, change.old_rate, change.new_rate, change.point
                );
            }
            true
        }
        Command::Undo => {
            let action = tournament.undo()?;
            println!("Undone: {:?}", action);
            true
        }
        Command::Standings => {
            for row in standings(tournament.players()) {
                println!(
                    "{:>3}. {:<16} {:>3} ({:+}) {}",
                    row.position,
                    row.nickname,
                    row.rate,
                    row.bonus,
                    row.title.map(|t| t.to_string()).unwrap_or_default()
                );
            }
            false
        }
        Command::ExportCsv { output } => {
            let csv = to_csv(tournament.players());
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    info!("Exported standings to {}", path.display());
                }
                None => println!("{}", csv),
            }
            false
        }
    };

    if mutated {
        storage.save(&tournament.state())?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting {} v{}", config.service.name, throne_room::VERSION);

    if let Err(e) = run(args, config) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
