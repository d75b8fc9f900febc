//! Chart descriptors as JSON, in the shape the browser hands to Plotly.

use anyhow::Context;
use chrono::NaiveDate;
use hydro_api::DataFetcher;
use hydro_core::parameter::Parameter;
use hydro_dashboard::series_chart::SeriesChartBuilder;
use hydro_dashboard::yearly_chart::YearlyChartBuilder;
use log::{info, warn};
use serde_json::{json, Value};

/// Labels for `key` from the station's parameter list, or the bare key
/// when the station does not list it.
async fn describe_parameter<F: DataFetcher>(
    fetcher: &F,
    station: &str,
    key: &str,
) -> anyhow::Result<Parameter> {
    let parameters = fetcher
        .list_parameters(station)
        .await
        .with_context(|| format!("Failed to list parameters of {station}"))?;
    Ok(match parameters.into_iter().find(|p| p.field == key) {
        Some(parameter) => parameter,
        None => {
            warn!("Station {station} does not list {key}, using it as its own label");
            Parameter::unlabeled(key)
        }
    })
}

/// `{traces, layout}` for one year of hourly values over the percentile bands.
pub async fn yearly_chart_json<F: DataFetcher>(
    fetcher: &F,
    station: &str,
    parameter: &str,
    year: i32,
) -> anyhow::Result<Value> {
    let described = describe_parameter(fetcher, station, parameter).await?;
    let hourly = fetcher
        .get_yearly_hourly(station, parameter, year)
        .await
        .with_context(|| format!("Failed to fetch {year} hourly data of {station}/{parameter}"))?;
    let percentiles = fetcher
        .get_percentiles(station, parameter)
        .await
        .with_context(|| format!("Failed to fetch percentiles of {station}/{parameter}"))?;
    info!(
        "{} hourly points, {} percentile rows",
        hourly.len(),
        percentiles.len()
    );

    let chart = YearlyChartBuilder::default().build(year, &described, &hourly, &percentiles);
    Ok(json!({
        "traces": chart.traces(),
        "layout": chart.layout,
    }))
}

/// `{traces, layout, available}` for a series over `[start, end]`, or over
/// everything when neither bound is given.
pub async fn series_chart_json<F: DataFetcher>(
    fetcher: &F,
    station: &str,
    parameter: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<Value> {
    let described = describe_parameter(fetcher, station, parameter).await?;
    let series = fetcher
        .get_series(station, parameter, start, end)
        .await
        .with_context(|| format!("Failed to fetch series of {station}/{parameter}"))?;
    info!("{} series points", series.data.len());

    let chart = SeriesChartBuilder::default().build(&described, &series);
    let available = chart
        .available
        .map(|(min, max)| json!({ "min": min, "max": max }));
    Ok(json!({
        "traces": chart.traces(),
        "layout": chart.layout,
        "available": available,
    }))
}

/// Pretty-print `value` to `output`, or to stdout when no path is given.
pub fn write_json(value: &Value, output: Option<&str>) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, body).with_context(|| format!("Failed to write {path}"))?;
            info!("Wrote {path}");
        }
        None => println!("{body}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_api::fetcher::scripted::ScriptedFetcher;

    fn fetcher() -> ScriptedFetcher {
        let fetcher = ScriptedFetcher::new();
        fetcher
            .respond(
                "/api/stations/S1/values/",
                r#"[{"django_field_name": "wl_mm", "parameter": "Water Level", "unit": "mm"}]"#,
            )
            .respond(
                "/api/stations/S1/wl_mm/2021/yearly-data/",
                r#"[{"date": "2021-06-01T00:00:00Z", "value": 120.0}]"#,
            )
            .respond(
                "/api/stations/S1/wl_mm/percentiles/",
                r#"[{"string_date_without_year": "06-15T00:00:00", "q10": 1, "q20": 2, "q30": 3, "q40": 4, "q50": 5, "q60": 6, "q70": 7, "q80": 8, "q90": 9}]"#,
            )
            .respond(
                "/api/stations/S1/wl_mm/dataseries/?start=2021-06-01&end=2021-06-30",
                r#"{"min_date": "01-01-2015", "max_date": "30-09-2024", "data": [{"date": "2021-06-01T00:00:00Z", "value": null}]}"#,
            );
        fetcher
    }

    #[tokio::test]
    async fn test_yearly_export() {
        let chart = yearly_chart_json(&fetcher(), "S1", "wl_mm", 2021)
            .await
            .unwrap();
        assert_eq!(chart["traces"].as_array().unwrap().len(), 10);
        assert_eq!(chart["layout"]["yaxis"]["title"], "Water Level [mm]");
        assert_eq!(chart["traces"][2]["fill"], "tonexty");
        assert_eq!(chart["traces"][6]["x"][0], "2021-06-15T00:00:00");
    }

    #[tokio::test]
    async fn test_series_export() {
        let chart = series_chart_json(
            &fetcher(),
            "S1",
            "wl_mm",
            NaiveDate::from_ymd_opt(2021, 6, 1),
            NaiveDate::from_ymd_opt(2021, 6, 30),
        )
        .await
        .unwrap();
        assert_eq!(chart["traces"].as_array().unwrap().len(), 1);
        assert!(chart["traces"][0]["y"][0].is_null());
        assert_eq!(chart["traces"][0]["connectgaps"], false);
        assert_eq!(chart["available"]["min"], "2015-01-01");
        assert_eq!(chart["available"]["max"], "2024-09-30");
    }

    #[tokio::test]
    async fn test_unlisted_parameter_uses_key() {
        let fetcher = fetcher();
        fetcher.respond(
            "/api/stations/S1/ph/dataseries/?start=&end=",
            r#"{"min_date": null, "max_date": null, "data": []}"#,
        );
        let chart = series_chart_json(&fetcher, "S1", "ph", None, None)
            .await
            .unwrap();
        assert_eq!(chart["layout"]["yaxis"]["title"], "ph");
        assert!(chart["available"].is_null());
    }
}
