use std::io::{self, Write};

use btcx_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, envelope, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn render_to<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(out, envelope)?,
    }

    Ok(())
}

fn render_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if let Some(text) = envelope.data.pointer("/narrative/text").and_then(Value::as_str) {
        writeln!(out, "narrative:")?;
        writeln!(out, "  {text}")?;
    }

    writeln!(out, "data:")?;
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        writeln!(out, "  {line}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use btcx_core::EnvelopeMeta;
    use serde_json::json;

    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn envelope() -> Envelope<Value> {
        let mut meta = EnvelopeMeta::new(String::from("req-00000001")).expect("valid meta");
        meta.push_warning("1 event(s) have no marker");
        Envelope::new(meta, json!({"narrative": {"text": "Bitcoin rose 2.00%."}}))
            .expect("valid envelope")
    }

    #[test]
    fn renders_table_sections() {
        let mut out = Vec::new();
        render_to(&mut out, &envelope(), OutputFormat::Table, false).expect("must render");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("request_id  : req-00000001\n"));
        assert!(text.contains("warnings:\n  - 1 event(s) have no marker\n"));
        assert!(text.contains("narrative:\n  Bitcoin rose 2.00%.\n"));
    }

    #[test]
    fn renders_one_json_line() {
        let mut out = Vec::new();
        render_to(&mut out, &envelope(), OutputFormat::Json, false).expect("must render");
        let text = String::from_utf8(out).expect("utf8");

        assert_eq!(text.lines().count(), 1);
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["meta"]["request_id"], "req-00000001");
    }

    #[test]
    fn write_failures_surface_as_io_errors() {
        for format in [OutputFormat::Json, OutputFormat::Table] {
            let err = render_to(&mut ClosedPipe, &envelope(), format, true).expect_err("must fail");
            assert!(matches!(err, CliError::Io(_)));
            assert_eq!(err.exit_code(), 10);
        }
    }
}
