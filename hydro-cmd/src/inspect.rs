//! Listings of what the station API offers.

use anyhow::Context;
use hydro_api::DataFetcher;
use log::info;

/// One line per station: `id<TAB>label`.
pub async fn station_lines<F: DataFetcher>(fetcher: &F) -> anyhow::Result<Vec<String>> {
    let stations = fetcher
        .list_stations()
        .await
        .context("Failed to list stations")?;
    Ok(stations
        .iter()
        .map(|s| format!("{}\t{}", s.id, s.display_label()))
        .collect())
}

/// One line per parameter: `key<TAB>label [unit]`.
pub async fn parameter_lines<F: DataFetcher>(
    fetcher: &F,
    station: &str,
) -> anyhow::Result<Vec<String>> {
    let parameters = fetcher
        .list_parameters(station)
        .await
        .with_context(|| format!("Failed to list parameters of {station}"))?;
    Ok(parameters
        .iter()
        .map(|p| format!("{}\t{}", p.field, p.axis_title()))
        .collect())
}

/// Years with data, most recent first, as the dashboard offers them.
pub async fn years<F: DataFetcher>(
    fetcher: &F,
    station: &str,
    parameter: &str,
) -> anyhow::Result<Vec<i32>> {
    let mut years = fetcher
        .list_years(station, parameter)
        .await
        .with_context(|| format!("Failed to list years of {station}"))?;
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    Ok(years)
}

pub async fn print_stations<F: DataFetcher>(fetcher: &F) -> anyhow::Result<()> {
    let lines = station_lines(fetcher).await?;
    info!("{} stations", lines.len());
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

pub async fn print_parameters<F: DataFetcher>(fetcher: &F, station: &str) -> anyhow::Result<()> {
    let lines = parameter_lines(fetcher, station).await?;
    if lines.is_empty() {
        info!("Station {station} has no parameters");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

pub async fn print_years<F: DataFetcher>(
    fetcher: &F,
    station: &str,
    parameter: &str,
) -> anyhow::Result<()> {
    for year in years(fetcher, station, parameter).await? {
        println!("{year}");
    }
    Ok(())
}
