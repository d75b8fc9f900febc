//! Command implementations for the hydro station CLI.
//!
//! Provides subcommands for listing what the station API offers, exporting
//! chart descriptors as JSON, and running the dashboard cascade headless.

use chrono::NaiveDate;
use clap::Subcommand;
use hydro_api::DataFetcher;

pub mod cascade;
pub mod export;
pub mod inspect;

#[derive(Subcommand)]
pub enum Command {
    /// List all stations
    Stations,

    /// List the parameters measured at a station
    Parameters {
        #[arg(short, long)]
        station: String,
    },

    /// List the years with measurements, most recent first
    Years {
        #[arg(short, long)]
        station: String,

        #[arg(short, long)]
        parameter: String,
    },

    /// Write the yearly chart (hourly values over percentile bands) as JSON
    Yearly {
        #[arg(short, long)]
        station: String,

        #[arg(short, long)]
        parameter: String,

        #[arg(short, long)]
        year: i32,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write the series chart as JSON
    Series {
        #[arg(short, long)]
        station: String,

        #[arg(short, long)]
        parameter: String,

        /// First day, YYYY-MM-DD (all data when both bounds are omitted)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the selection cascade against the API and print where it settles
    Cascade {
        /// Station to select after the default one settles
        #[arg(short, long)]
        station: Option<String>,
    },
}

pub async fn run<F: DataFetcher>(command: Command, fetcher: F) -> anyhow::Result<()> {
    match command {
        Command::Stations => inspect::print_stations(&fetcher).await,
        Command::Parameters { station } => inspect::print_parameters(&fetcher, &station).await,
        Command::Years { station, parameter } => {
            inspect::print_years(&fetcher, &station, &parameter).await
        }
        Command::Yearly {
            station,
            parameter,
            year,
            output,
        } => {
            let chart = export::yearly_chart_json(&fetcher, &station, &parameter, year).await?;
            export::write_json(&chart, output.as_deref())
        }
        Command::Series {
            station,
            parameter,
            start,
            end,
            output,
        } => {
            let chart =
                export::series_chart_json(&fetcher, &station, &parameter, start, end).await?;
            export::write_json(&chart, output.as_deref())
        }
        Command::Cascade { station } => {
            let settled = cascade::run_cascade(fetcher, station.as_deref()).await;
            println!("{settled}");
            Ok(())
        }
    }
}
