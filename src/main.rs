//! Pictograph - letter classification and arrow placement from the command line
//!
//! Reads pictograph JSON files, classifies them into letters, resolves arrow
//! offsets, and edits the override store that adjusts those offsets.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pictograph::cli::{
    ClassifyArgs, CliResult, ConfigArgs, LettersArgs, NudgeArgs, PlaceArgs, ResetArgs,
};
use pictograph::config::Config;
use pictograph::constants::APP_BINARY_NAME;

/// Pictograph - letter classification and arrow placement
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a pictograph and place both arrows
    Classify(ClassifyArgs),
    /// Resolve the arrow offset of one track
    Place(PlaceArgs),
    /// Nudge an arrow and store the override (mirrored)
    Nudge(NudgeArgs),
    /// Remove an arrow override and its mirror
    Reset(ResetArgs),
    /// List letters and exemplar counts
    Letters(LettersArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn run(command: &Commands) -> CliResult<()> {
    match command {
        Commands::Classify(args) => args.execute(),
        Commands::Place(args) => args.execute(),
        Commands::Nudge(args) => args.execute(),
        Commands::Reset(args) => args.execute(),
        Commands::Letters(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so JSON output stays clean
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        Config::load()
            .map(|config| config.logging.level)
            .unwrap_or_else(|_| "warn".to_string())
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(&cli.command) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }
}
