use std::str::FromStr;

use btcx_core::{Tier, TierScale};
use serde::Serialize;

use crate::cli::TierArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct TierResponseData {
    scale: TierScale,
    score: f64,
    tier: Tier,
}

pub fn run(args: &TierArgs) -> Result<CommandResult, CliError> {
    let scale = TierScale::from_str(&args.scale)?;
    let data = TierResponseData {
        scale,
        score: args.score,
        tier: scale.classify(args.score),
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_on_requested_scale() {
        let args = TierArgs {
            scale: String::from("confidence"),
            score: 60.0,
        };
        let result = run(&args).expect("must run");
        assert_eq!(result.data["tier"], "HIGH");
        assert_eq!(result.data["scale"], "confidence");
    }

    #[test]
    fn unknown_scale_is_a_validation_error() {
        let args = TierArgs {
            scale: String::from("percent"),
            score: 0.5,
        };
        let err = run(&args).expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
    }
}
