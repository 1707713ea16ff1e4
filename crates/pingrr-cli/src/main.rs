use clap::{ArgAction, Parser, Subcommand};
use commands::{config, daemon, run};
use pingrr_config::{LoggingConfig, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "pingrr")]
#[command(about = "Pingrr - Add new Trakt list entries to Sonarr and Radarr")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the lists once and add anything new (default)
    #[command(long_about = "Fetch the configured Trakt lists, filter the candidates and add the accepted shows and movies to Sonarr and Radarr. Sends a Pushover summary when enabled.")]
    Run {
        /// Log what would be added without contacting Sonarr/Radarr
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Run repeatedly on a cron schedule
    #[command(long_about = "Stay in the foreground and run on the configured schedule. A run is performed on startup unless --no-startup-run is given.")]
    Daemon {
        /// Cron schedule with a leading seconds field (e.g. '0 0 */6 * * *')
        #[arg(long, value_name = "SCHEDULE")]
        schedule: Option<String>,

        /// Skip the run on startup
        #[arg(long, action = ArgAction::SetTrue)]
        no_startup_run: bool,

        /// Log what would be added without contacting Sonarr/Radarr
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.unwrap_or_else(|| PathManager::default().config_file());

    match cli.command.unwrap_or(Commands::Run { dry_run: false }) {
        Commands::Run { dry_run } => {
            let config = commands::load_config(&config_path)?;
            logging::init_logging(cli.verbose, cli.quiet, &config.logging)
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            run::run_once(&config, dry_run, &output).await
        }
        Commands::Daemon {
            schedule,
            no_startup_run,
            dry_run,
        } => {
            let config = commands::load_config(&config_path)?;
            logging::init_logging(cli.verbose, cli.quiet, &config.logging)
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            daemon::run_daemon(&config, schedule, no_startup_run, dry_run, &output).await
        }
        Commands::Config { cmd } => {
            logging::init_logging(cli.verbose, cli.quiet, &LoggingConfig::default())
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            config::run_config(cmd, &config_path, &output)
        }
    }
}
