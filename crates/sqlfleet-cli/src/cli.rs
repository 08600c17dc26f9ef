//! sqlfleet - replication health checks for MySQL fleets

use clap::{Parser, Subcommand};
use sqlfleet_core::Endpoint;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod fleet;
mod logging;
mod output;

use fleet::Fleet;
use logging::LoggingConfig;
use output::OutputContext;

/// Check and control replication across a fleet of MySQL servers
#[derive(Parser, Debug)]
#[command(name = "sqlfleet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the fleet file
    #[arg(short, long, env = "SQLFLEET_CONFIG", default_value = "fleet.toml")]
    config: PathBuf,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write JSON logs to this directory
    #[arg(long, env = "SQLFLEET_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Write JSON logs to the default log directory
    #[arg(long, conflicts_with = "log_dir")]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every replication pair in the fleet file
    Check,
    /// Show connection, master and slave status of one endpoint
    Instance { endpoint: Endpoint },
    /// Show InnoDB mutex counters
    Innodb { endpoint: Endpoint },
    /// Show global variables matching a LIKE pattern
    Variables {
        endpoint: Endpoint,
        #[arg(default_value = "%")]
        pattern: String,
        /// Show global status counters instead of variables
        #[arg(long)]
        status: bool,
    },
    /// Show running threads
    Processlist { endpoint: Endpoint },
    /// Start both replication threads
    StartSlave { endpoint: Endpoint },
    /// Stop both replication threads
    StopSlave { endpoint: Endpoint },
    /// Kill a thread by process id
    Kill { endpoint: Endpoint, process_id: u64 },
    /// Set a global variable
    SetVariable {
        endpoint: Endpoint,
        key: String,
        value: String,
    },
    /// Point a slave at the current binlog position of a master
    ChangeMaster { slave: Endpoint, master: Endpoint },
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let fleet = Fleet::load(&cli.config)?;
    let output = OutputContext { json: cli.json };

    let result = match &cli.command {
        Commands::Check => commands::check(&fleet, &output).await.map(|healthy| {
            if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }),
        Commands::Instance { endpoint } => {
            commands::instance(&fleet, endpoint, &output).await.map(|_| ExitCode::SUCCESS)
        }
        Commands::Innodb { endpoint } => {
            commands::innodb(&fleet, endpoint, &output).await.map(|_| ExitCode::SUCCESS)
        }
        Commands::Variables {
            endpoint,
            pattern,
            status,
        } => commands::variables(&fleet, endpoint, pattern, *status, &output)
            .await
            .map(|_| ExitCode::SUCCESS),
        Commands::Processlist { endpoint } => commands::process_list(&fleet, endpoint, &output)
            .await
            .map(|_| ExitCode::SUCCESS),
        Commands::StartSlave { endpoint } => {
            commands::start_slave(&fleet, endpoint).await.map(|_| ExitCode::SUCCESS)
        }
        Commands::StopSlave { endpoint } => {
            commands::stop_slave(&fleet, endpoint).await.map(|_| ExitCode::SUCCESS)
        }
        Commands::Kill {
            endpoint,
            process_id,
        } => commands::kill(&fleet, endpoint, *process_id)
            .await
            .map(|_| ExitCode::SUCCESS),
        Commands::SetVariable {
            endpoint,
            key,
            value,
        } => commands::set_variable(&fleet, endpoint, key, value)
            .await
            .map(|_| ExitCode::SUCCESS),
        Commands::ChangeMaster { slave, master } => {
            commands::change_master(&fleet, slave, master, &output)
                .await
                .map(|_| ExitCode::SUCCESS)
        }
    };

    fleet.shutdown().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut log_config = LoggingConfig::for_verbosity(cli.verbose);
    if let Some(dir) = &cli.log_dir {
        log_config = log_config.with_log_dir(dir.clone());
    } else if cli.log_file {
        log_config = log_config.with_log_dir(logging::log_directory());
    }
    let _log_guard = logging::init(log_config)?;

    tracing::debug!(command = ?cli.command, config = %cli.config.display(), "starting");
    run(cli).await
}
