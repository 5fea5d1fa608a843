mod endpoints;
mod events;
mod explain;
mod markers;
mod tier;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use btcx_core::{ApiConfig, Envelope, EnvelopeMeta};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let api = ApiConfig::from_optional(cli.api_base.as_deref())?;

    let CommandResult { data, warnings } = match &cli.command {
        Command::Markers(args) => markers::run(args)?,
        Command::Events(args) => events::run(args)?,
        Command::Explain(args) => explain::run(args)?,
        Command::Tier(args) => tier::run(args)?,
        Command::Endpoints(args) => endpoints::run(args, &api)?,
    };

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string())?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::new(meta, data).map_err(CliError::from)
}

/// Reads a saved payload; `-` means stdin.
pub(crate) fn read_payload(path: &Path) -> Result<String, CliError> {
    let snapshot_error = |source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(snapshot_error)?;
        return Ok(buffer);
    }

    let payload = fs::read_to_string(path).map_err(snapshot_error)?;
    debug!(path = %path.display(), bytes = payload.len(), "loaded snapshot");
    Ok(payload)
}

/// Reads and decodes a saved payload.
pub(crate) fn load<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, btcx_core::CoreError>,
) -> Result<T, CliError> {
    let payload = read_payload(path)?;
    parse(&payload).map_err(|source| CliError::Payload {
        path: path.to_path_buf(),
        source,
    })
}
