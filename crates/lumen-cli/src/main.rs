use clap::{Parser, Subcommand};
use lumen_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lumen", version, about = "Lumen activity tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity management
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Focus session logging
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Snapshot store inspection
    Store {
        #[command(subcommand)]
        action: commands::store::StoreAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr; `LUMEN_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("LUMEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config);
    debug!(activities_file = %config.storage.activities_file, "configuration loaded");

    let result = match cli.command {
        Commands::Activity { action } => commands::activity::run(action, &config),
        Commands::Session { action } => commands::session::run(action, &config),
        Commands::Store { action } => commands::store::run(action, &config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
