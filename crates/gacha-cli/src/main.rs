//! CLI frontend for the card gacha.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gacha",
    about = "Collect themed cards with a weighted gacha and upgrade them",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the saved game
    #[arg(short, long, global = true, default_value = ".gacha")]
    data_dir: PathBuf,

    /// RNG seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game in the data directory
    Init,

    /// Show credits, claim timer, and collection progress
    Status,

    /// Spend credits on draws
    Draw {
        /// Number of draws
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Claim the daily credit bonus
    Claim,

    /// Raise a card one rarity tier
    Upgrade {
        /// Card id (e.g. mc_01)
        card: String,
    },

    /// Check whether a card can be upgraded
    Evaluate {
        /// Card id (e.g. mc_01)
        card: String,
    },

    /// List cards with collection info
    Cards {
        /// Filter by theme (minecraft, space, dinosaurs)
        #[arg(short, long)]
        theme: Option<String>,

        /// Filter by current rarity (common, rare, very_rare, epic, legendary)
        #[arg(short, long)]
        rarity: Option<String>,

        /// Search names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Only show owned cards
        #[arg(short, long)]
        owned: bool,

        /// Only show cards that can be upgraded now
        #[arg(short, long)]
        upgradeable: bool,
    },

    /// Show collection statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sample rarities without spending credits
    Simulate {
        /// Number of samples
        #[arg(short = 'n', long, default_value = "1000")]
        draws: u32,
    },

    /// Add draw credits (debug)
    Grant {
        /// Credits to add
        amount: u32,
    },

    /// Add copies of a card (debug)
    Give {
        /// Card id (e.g. mc_01)
        card: String,

        /// Copies to add
        #[arg(short, long, default_value = "1")]
        count: u32,
    },

    /// Erase all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let dir = cli.data_dir.as_path();
    let seed = cli.seed;
    let result = match cli.command {
        Commands::Init => commands::init::run(dir, seed),
        Commands::Status => commands::status::run(dir, seed),
        Commands::Draw { count } => commands::draw::run(dir, seed, count),
        Commands::Claim => commands::claim::run(dir, seed),
        Commands::Upgrade { card } => commands::upgrade::run(dir, seed, &card),
        Commands::Evaluate { card } => commands::upgrade::evaluate(dir, seed, &card),
        Commands::Cards {
            theme,
            rarity,
            search,
            owned,
            upgradeable,
        } => commands::cards::run(
            dir,
            seed,
            theme.as_deref(),
            rarity.as_deref(),
            search.as_deref(),
            owned,
            upgradeable,
        ),
        Commands::Stats { json } => commands::stats::run(dir, seed, json),
        Commands::Simulate { draws } => commands::simulate::run(dir, seed, draws),
        Commands::Grant { amount } => commands::debug::grant(dir, seed, amount),
        Commands::Give { card, count } => commands::debug::give(dir, seed, &card, count),
        Commands::Reset { yes } => commands::reset::run(dir, seed, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
