use serde_json::Value;

use crate::cli::OutputFormat;
use crate::envelope::Envelope;
use crate::error::CliError;

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => {
            for line in table_lines(envelope)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn table_lines(envelope: &Envelope) -> Result<Vec<String>, CliError> {
    let meta = &envelope.meta;
    let mut lines = vec![
        format!("request_id  : {}", meta.request_id),
        format!("generated_at: {}", meta.generated_at),
        format!(
            "sources     : {}",
            meta.sources
                .iter()
                .map(|source| source.as_str())
                .collect::<Vec<_>>()
                .join(",")
        ),
        format!("latency_ms  : {}", meta.latency_ms),
    ];
    if meta.has_synthetic_data() {
        lines.push(String::from("note        : includes placeholder data (source=mock)"));
    }

    lines.push(String::from("data:"));
    match &envelope.data {
        Value::Array(rows) if rows.iter().all(Value::is_object) => {
            lines.extend(rows.iter().map(|row| format!("  - {}", row_summary(row))));
        }
        other => {
            let pretty = serde_json::to_string_pretty(other)?;
            lines.extend(pretty.lines().map(|line| format!("  {line}")));
        }
    }

    Ok(lines)
}

/// `key=value` pairs for the scalar fields of one record.
fn row_summary(row: &Value) -> String {
    let Some(fields) = row.as_object() else {
        return row.to_string();
    };
    fields
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some(format!("{key}={text}")),
            Value::Number(number) => Some(format!("{key}={number}")),
            Value::Bool(flag) => Some(format!("{key}={flag}")),
            Value::Null => Some(format!("{key}=-")),
            Value::Array(_) | Value::Object(_) => None,
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use axiom_core::ProviderId;
    use serde_json::json;

    use super::*;
    use crate::envelope::Meta;

    #[test]
    fn table_lists_one_row_per_record() {
        let envelope = Envelope::new(
            Meta::new(3, vec![ProviderId::Mock]),
            json!([
                {"label": "USD/KRW", "rate": 1325.4, "source": "mock"},
                {"label": "USD/JPY", "rate": null, "source": "mock"}
            ]),
        );

        let lines = table_lines(&envelope).expect("renders");
        assert!(lines.iter().any(|line| line.starts_with("note")));
        assert!(lines.contains(&String::from("  - label=USD/KRW  rate=1325.4  source=mock")));
        assert!(lines.contains(&String::from("  - label=USD/JPY  rate=-  source=mock")));
    }

    #[test]
    fn nested_data_is_pretty_printed() {
        let envelope = Envelope::new(
            Meta::new(0, vec![ProviderId::Yahoo]),
            json!({"symbol": "AAPL"}),
        );

        let lines = table_lines(&envelope).expect("renders");
        assert!(lines.contains(&String::from("    \"symbol\": \"AAPL\"")));
        assert!(!lines.iter().any(|line| line.starts_with("note")));
    }
}
