use std::time::Duration;

use anyhow::{Context, Result};
use beacon_core::config::{DEFAULT_HOST, DEFAULT_SERVICE};
use beacon_core::{AgentBuilder, AgentConfig, ConfigError, Endpoint};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Poll a controller, run the tasks it hands out, report the results.
#[derive(Debug, Parser)]
#[command(name = "beacon", version, disable_help_flag = true)]
struct Cli {
    /// Controller host name or address
    #[arg(short = 'h', long, env = "BEACON_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Controller service: http, https or a port number
    #[arg(short = 's', long, env = "BEACON_SERVICE", default_value = DEFAULT_SERVICE)]
    service: String,

    /// Initial mean dwell between beacon cycles, in seconds
    #[arg(long, default_value_t = 1.0)]
    dwell: f64,

    /// How often the execution loop checks the queue, in milliseconds
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Kill `execute` tasks that run longer than this many seconds
    #[arg(long)]
    execute_timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn agent_config(&self) -> Result<AgentConfig, ConfigError> {
        let endpoint = Endpoint::resolve(&self.host, &self.service)?;
        let config = AgentConfig::new(endpoint)
            .with_initial_mean_dwell(self.dwell)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_execute_timeout(self.execute_timeout.map(Duration::from_secs));
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match cli.agent_config() {
        Ok(config) => config,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };
    info!(controller = %config.endpoint, mean_dwell = config.initial_mean_dwell, "beacon starting");

    let agent = AgentBuilder::new(config)
        .build()
        .context("failed to build agent")?;
    agent.run().await.context("agent failed")?;

    info!("beacon stopped");
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `-v`.
fn setup_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
