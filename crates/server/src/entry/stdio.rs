#![forbid(unsafe_code)]

use crate::server::VocabServer;
use crate::support::parse_request;
use serde_json::Value;
use std::io::{BufRead, Write};

fn write_newline_json(out: &mut impl Write, resp: &Value) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "{}", serde_json::to_string(resp)?)?;
    out.flush()?;
    Ok(())
}

/// Serves newline-delimited JSON-RPC until `input` reaches EOF. Blank lines
/// are skipped; every other line gets at most one response line.
pub(crate) fn run_stdio(
    server: &mut VocabServer,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in input.lines() {
        let line = line?;
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let response = match parse_request(raw) {
            Ok(request) => server.handle(request),
            Err(error) => Some(error),
        };
        if let Some(resp) = response {
            write_newline_json(output, &resp)?;
        }
    }
    Ok(())
}
