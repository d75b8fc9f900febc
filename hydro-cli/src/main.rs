//! Hydro CLI - command line tool for the hydro station API.

use clap::Parser;
use hydro_api::{ApiConfig, HttpFetcher};

#[derive(Parser)]
#[command(
    name = "hydro-cli",
    version,
    about = "Hydrological station data toolkit"
)]
struct Cli {
    /// Origin of the station API
    #[arg(long, env = "HYDRO_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Per-request timeout
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: hydro_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ApiConfig {
        base_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
    };
    log::debug!("Using API at {}", config.base_url);
    let fetcher = HttpFetcher::new(config)?;
    hydro_cmd::run(cli.command, fetcher).await
}
