use btcx_core::ApiConfig;
use serde::Serialize;

use crate::cli::EndpointsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct EndpointsResponseData {
    base_url: String,
    backend: &'static str,
    chart: String,
    events: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain: Option<String>,
}

pub fn run(args: &EndpointsArgs, api: &ApiConfig) -> Result<CommandResult, CliError> {
    let data = EndpointsResponseData {
        base_url: api.base_url().to_owned(),
        backend: api.source_label(),
        chart: api.chart_url(args.days),
        events: api.events_url(args.limit),
        explain: args.event_id.map(|id| api.explain_url(id)),
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?))
}
