use btcx_core::{check_series, close_series, markers, parse_chart, parse_events, ClosePoint, Marker};
use serde::Serialize;
use tracing::info;

use crate::cli::MarkersArgs;
use crate::error::CliError;

use super::{load, CommandResult};

#[derive(Debug, Serialize)]
struct MarkersResponseData {
    points: usize,
    events: usize,
    markers: Vec<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<Vec<ClosePoint>>,
}

pub fn run(args: &MarkersArgs) -> Result<CommandResult, CliError> {
    let chart = load(&args.chart, parse_chart)?;
    let events = load(&args.events, parse_events)?;

    let markers = markers(&chart, &events);
    info!(
        points = chart.len(),
        events = events.len(),
        markers = markers.len(),
        "correlated events with chart"
    );

    let series_issue = check_series(&chart);
    let unmatched = events.len().saturating_sub(markers.len());
    let data = MarkersResponseData {
        points: chart.len(),
        events: events.len(),
        markers,
        series: args.with_series.then(|| close_series(&chart)),
    };

    let mut result = CommandResult::ok(serde_json::to_value(data)?);
    if let Some(issue) = series_issue {
        result = result.with_warning(issue.message());
    }
    if unmatched > 0 {
        result = result.with_warning(format!(
            "{unmatched} event(s) have no marker (outside the chart range or sharing a date)"
        ));
    }
    Ok(result)
}
