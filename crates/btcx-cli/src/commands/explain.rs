use btcx_core::{parse_explanation, ExplanationPanel};
use serde_json::json;
use tracing::info;

use crate::cli::ExplainArgs;
use crate::error::CliError;

use super::{load, CommandResult};

pub fn run(args: &ExplainArgs) -> Result<CommandResult, CliError> {
    let explanation = load(&args.explain, parse_explanation)?;
    let panel = ExplanationPanel::build(&explanation);
    info!(
        event_id = panel.event_id,
        factors = panel.factors.len(),
        origin = ?panel.narrative.origin,
        "built explanation panel"
    );

    let warning = panel.factors_issue.map(|issue| issue.message());
    let data = if args.narrative_only {
        json!({
            "eventId": panel.event_id,
            "narrative": panel.narrative,
        })
    } else {
        serde_json::to_value(&panel)?
    };

    let mut result = CommandResult::ok(data);
    if let Some(warning) = warning {
        result = result.with_warning(warning);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    fn explain_file(factors_json: &str) -> NamedTempFile {
        let payload = json!({
            "eventId": 8,
            "eventDate": "2024-03-01",
            "direction": "DOWN",
            "pctChange": "-5.25",
            "confidence": "MED",
            "summary": "Large down move.",
            "factorsJson": factors_json
        });
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(payload.to_string().as_bytes())
            .expect("write");
        file
    }

    #[test]
    fn malformed_factors_become_a_warning() {
        let file = explain_file("not json");
        let args = ExplainArgs {
            explain: PathBuf::from(file.path()),
            narrative_only: false,
        };

        let result = run(&args).expect("must run");
        assert_eq!(
            result.warnings,
            vec![String::from("factorsJson could not be parsed; showing no factors")]
        );
        assert_eq!(result.data["narrative"]["origin"], "fallback");
        assert_eq!(result.data["factors"], json!([]));
    }

    #[test]
    fn narrative_only_output() {
        let file = explain_file("[]");
        let args = ExplainArgs {
            explain: PathBuf::from(file.path()),
            narrative_only: true,
        };

        let result = run(&args).expect("must run");
        assert!(result.warnings.is_empty());
        assert_eq!(result.data["eventId"], 8);
        let text = result.data["narrative"]["text"].as_str().expect("text");
        assert!(text.starts_with("Bitcoin fell 5.25% on 2024-03-01."));
    }
}
