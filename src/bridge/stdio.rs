//! Stdio transport for the bridge.
//!
//! Two framings exist in the wild: newline-delimited JSON and
//! `Content-Length` headers followed by a JSON body. The first non-empty
//! line decides which one this session speaks, once per process, so
//! responses never interleave framing styles on the same pipe.

use std::io::{BufRead, BufReader, Write};

use serde_json::Value;
use tracing::info;

use super::{json_rpc_error, BridgeServer, JsonRpcRequest};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StdioMode {
    NewlineJson,
    ContentLength,
}

fn detect_mode_from_first_line(line: &str) -> Option<StdioMode> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(StdioMode::NewlineJson);
    }
    // Some clients send Content-Type before Content-Length; any plausible
    // header line selects header mode.
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
        return Some(StdioMode::ContentLength);
    }
    None
}

fn parse_content_length_header(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    let (key, value) = trimmed.split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

fn read_content_length_frame<R: BufRead>(
    reader: &mut R,
    first_header: &str,
) -> std::io::Result<Option<Vec<u8>>> {
    const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

    let mut content_length: Option<usize> = parse_content_length_header(first_header);
    let mut header = first_header.to_string();

    loop {
        if header.trim_end().is_empty() {
            break;
        }

        header.clear();
        let read = reader.read_line(&mut header)?;
        if read == 0 {
            // EOF mid-header: connection close.
            return Ok(None);
        }

        if content_length.is_none() {
            content_length = parse_content_length_header(&header);
        }
    }

    let Some(len) = content_length else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Missing Content-Length header",
        ));
    };
    if len > MAX_CONTENT_LENGTH_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Content-Length exceeds max allowed size",
        ));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

fn write_frame<W: Write>(writer: &mut W, mode: StdioMode, resp: &Value) -> Result<()> {
    match mode {
        StdioMode::NewlineJson => {
            writeln!(writer, "{}", serde_json::to_string(resp)?)?;
        }
        StdioMode::ContentLength => {
            let body = serde_json::to_vec(resp)?;
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn dispatch_raw<W: Write>(
    server: &mut BridgeServer<'_>,
    writer: &mut W,
    mode: StdioMode,
    raw: &[u8],
) -> Result<()> {
    let data: Value = match serde_json::from_slice(raw) {
        Ok(v) => v,
        Err(e) => {
            let resp = json_rpc_error(None, -32700, &format!("Parse error: {e}"));
            return write_frame(writer, mode, &resp);
        }
    };

    let (id, has_method) = match data.as_object() {
        Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
        None => {
            let resp = json_rpc_error(None, -32600, "Invalid Request");
            return write_frame(writer, mode, &resp);
        }
    };
    if !has_method {
        let resp = json_rpc_error(id, -32600, "Invalid Request");
        return write_frame(writer, mode, &resp);
    }

    let request: JsonRpcRequest = match serde_json::from_value(data) {
        Ok(v) => v,
        Err(e) => {
            let resp = json_rpc_error(id, -32600, &format!("Invalid Request: {e}"));
            return write_frame(writer, mode, &resp);
        }
    };

    if let Some(resp) = server.handle(request) {
        write_frame(writer, mode, &resp)?;
    }
    Ok(())
}

fn serve<R: BufRead, W: Write>(
    server: &mut BridgeServer<'_>,
    reader: &mut R,
    writer: &mut W,
) -> Result<()> {
    let mut mode: Option<StdioMode> = None;

    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }

        let effective_mode = match mode {
            Some(m) => m,
            None => match detect_mode_from_first_line(&line) {
                Some(detected) => {
                    mode = Some(detected);
                    detected
                }
                // Leading garbage or blank lines before the first frame.
                None => continue,
            },
        };

        match effective_mode {
            StdioMode::NewlineJson => {
                let raw = line.trim();
                if raw.is_empty() {
                    continue;
                }
                dispatch_raw(server, writer, effective_mode, raw.as_bytes())?;
            }
            StdioMode::ContentLength => {
                if line.trim().is_empty() {
                    continue;
                }
                let Some(body) = read_content_length_frame(reader, &line)? else {
                    break;
                };
                dispatch_raw(server, writer, effective_mode, &body)?;
            }
        }
    }

    Ok(())
}

/// Serve the bridge over stdin/stdout until EOF.
///
/// # Errors
///
/// Returns an error when the transport itself fails; malformed requests are
/// answered on the wire, not raised.
pub fn run_stdio(server: &mut BridgeServer<'_>) -> Result<()> {
    info!("bridge listening on stdio");
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();
    serve(server, &mut reader, &mut stdout)
}
