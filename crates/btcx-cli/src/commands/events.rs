use btcx_core::{event_rows, parse_events, EventRow};
use serde::Serialize;

use crate::cli::EventsArgs;
use crate::error::CliError;

use super::{load, CommandResult};

#[derive(Debug, Serialize)]
struct EventsResponseData {
    count: usize,
    events: Vec<EventRow>,
}

pub fn run(args: &EventsArgs) -> Result<CommandResult, CliError> {
    let events = load(&args.events, parse_events)?;
    let rows = event_rows(&events);

    let data = EventsResponseData {
        count: rows.len(),
        events: rows,
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?))
}
