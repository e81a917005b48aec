//! Batch command - infer telemetry from newline-delimited JSON messages.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use payload_infer::{LocationConfig, Message};
use serde::Serialize;

use crate::cli::TelemetryKind;
use crate::report::{self, Report};

/// One output line for a successfully parsed message.
#[derive(Serialize)]
struct Record {
    line: usize,
    #[serde(flatten)]
    report: Report,
}

/// One output line for a message that failed to parse.
#[derive(Serialize)]
struct Failure {
    line: usize,
    error: String,
}

/// Counts for the end-of-run summary.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub messages: usize,
    pub with_telemetry: usize,
    pub failed: usize,
}

pub fn run(
    file: Option<PathBuf>,
    only: Vec<TelemetryKind>,
    config: LocationConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = super::open_input(file.as_deref())?;
    let kinds = report::selected(&only);

    let stdout = io::stdout();
    let summary = process(reader, stdout.lock(), &kinds, config)?;

    eprintln!(
        "{} messages, {} with telemetry, {} failed",
        summary.messages, summary.with_telemetry, summary.failed
    );

    if summary.failed > 0 {
        return Err(format!(
            "{} of {} lines failed to parse",
            summary.failed, summary.messages
        )
        .into());
    }
    Ok(())
}

/// Run inference over every non-blank line of `reader`, writing one JSON
/// record per line to `writer`.
///
/// Lines are split on raw bytes so that a line which is not UTF-8 becomes
/// an error record rather than ending the run.
pub fn process<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    kinds: &[TelemetryKind],
    config: LocationConfig,
) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let mut summary = BatchSummary::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.trim_ascii().is_empty() {
            continue;
        }
        let number = index + 1;
        summary.messages += 1;

        match Message::from_json_slice(&line) {
            Ok(message) => {
                let report = report::infer(&message, kinds, config);
                if !report.is_empty() {
                    summary.with_telemetry += 1;
                }
                let record = Record {
                    line: number,
                    report,
                };
                serde_json::to_writer(&mut writer, &record)?;
            }
            Err(e) => {
                tracing::warn!(line = number, error = %e, "skipping malformed message");
                summary.failed += 1;
                let failure = Failure {
                    line: number,
                    error: e.to_string(),
                };
                serde_json::to_writer(&mut writer, &failure)?;
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::NamedTempFile;

    fn run_batch(input: &[u8]) -> (BatchSummary, Vec<Value>) {
        let mut out = Vec::new();
        let summary = process(input, &mut out, &TelemetryKind::ALL, LocationConfig::default())
            .unwrap();
        let records = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, records)
    }

    #[test]
    fn test_batch_records() {
        let input = b"{\"lat\": 1.0, \"lon\": 2.0}\n\n{\"nav\": \"aabb\"}\n{\"temp\": 20}\n";
        let (summary, records) = run_batch(input);

        assert_eq!(
            summary,
            BatchSummary {
                messages: 3,
                with_telemetry: 2,
                failed: 0,
            }
        );
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["line"], json!(1));
        assert_eq!(records[0]["location"]["latitude"], json!(1.0));
        assert_eq!(records[1]["line"], json!(3));
        assert_eq!(records[1]["gnss"], json!("aabb"));
        assert_eq!(records[2]["line"], json!(4));
        assert_eq!(records[2]["location"], Value::Null);
    }

    #[test]
    fn test_batch_reports_failures() {
        let input = b"{\"lat\": 1.0, \"lon\": 2.0}\nnot json\n[1, 2]\n";
        let (summary, records) = run_batch(input);

        assert_eq!(summary.messages, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(records[1]["line"], json!(2));
        assert!(records[1]["error"].as_str().unwrap().starts_with("JSON error"));
        assert_eq!(records[2]["error"], json!("Expected a JSON object, found array"));
    }

    #[test]
    fn test_batch_continues_past_invalid_utf8() {
        let input = b"{\"lat\": 1.0, \"lon\": 2.0}\n\xff\xfe\n{\"nav\": \"aabb\"}\n";
        let (summary, records) = run_batch(input);

        assert_eq!(
            summary,
            BatchSummary {
                messages: 3,
                with_telemetry: 2,
                failed: 1,
            }
        );
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["line"], json!(2));
        assert!(records[1]["error"].as_str().unwrap().starts_with("JSON error"));
        assert_eq!(records[2]["line"], json!(3));
        assert_eq!(records[2]["gnss"], json!("aabb"));
    }

    #[test]
    fn test_batch_accepts_crlf_lines() {
        let (summary, records) = run_batch(b"{\"nav\": \"00ff\"}\r\n\r\n");

        assert_eq!(summary.messages, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(records[0]["gnss"], json!("00ff"));
    }

    #[test]
    fn test_run_fails_when_a_line_fails() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"{\"nav\": \"aabb\"}\nnot json\n").unwrap();

        let err = run(Some(file.path().to_path_buf()), vec![], LocationConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 lines failed to parse");
    }

    #[test]
    fn test_run_succeeds_on_clean_input() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"{\"nav\": \"aabb\"}\n{\"other\": 1}\n").unwrap();

        assert!(run(Some(file.path().to_path_buf()), vec![], LocationConfig::default()).is_ok());
    }

    #[test]
    fn test_run_missing_file() {
        let err = run(
            Some(PathBuf::from("/nonexistent/batch.ndjson")),
            vec![],
            LocationConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/batch.ndjson"));
    }
}
