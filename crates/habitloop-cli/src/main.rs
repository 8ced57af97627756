use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitloop-cli", version, about = "habitloop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's tasks, level and comment
    Today,
    /// Mark tasks and log minutes for today
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Set today's comment
    Comment {
        /// Comment text, stored as given
        text: String,
    },
    /// Streak, pass rate and cycle progress
    Stats,
    /// Recent days as a level grid
    History,
    /// Level-up suggestions once the cycle goal is reached
    Reward,
    /// Per-task timers
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Export or import a backup file
    Backup {
        #[command(subcommand)]
        action: commands::backup::BackupAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HABITLOOP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today => commands::today::run(),
        Commands::Task { action } => commands::task::run(action),
        Commands::Comment { text } => commands::today::comment(&text),
        Commands::Stats => commands::stats::run(),
        Commands::History => commands::stats::history(),
        Commands::Reward => commands::stats::reward(),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Backup { action } => commands::backup::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
