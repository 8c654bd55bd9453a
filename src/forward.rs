//! End-to-end forwarding: collect, connect, frame + send, relay.

use std::io::{Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;

use crate::config::ForwardConfig;
use crate::errors::{Fault, ForwardError, Op};
use crate::request::{collect_request, send_request};
use crate::response::relay_response;

/// Run one forwarding pass: request bytes from `input`, response body to
/// `out`. Returns the number of body bytes emitted. `input`/`out` are stdin
/// and stdout in production; tests substitute in-memory streams.
pub fn forward<R: Read, W: Write>(
    cfg: &ForwardConfig,
    input: &mut R,
    out: &mut W,
) -> Result<u64, ForwardError> {
    let body = collect_request(input, cfg.max_request_bytes).map_err(ForwardError::Fault)?;
    if cfg.verbose {
        eprintln!(
            "forward-api-calls: request: {} bytes (cap {})",
            body.len(),
            cfg.max_request_bytes
        );
        if body.len() == cfg.max_request_bytes {
            eprintln!("forward-api-calls: request buffer full; any further input is ignored");
        }
    }

    let mut sock = UnixStream::connect(&cfg.socket_path)
        .map_err(|e| ForwardError::Fault(Fault::new(Op::Connect, e)))?;
    if cfg.verbose {
        eprintln!(
            "forward-api-calls: connected to {}",
            cfg.socket_path.display()
        );
    }

    send_request(&mut sock, &body).map_err(ForwardError::Fault)?;
    // Half-close: no more request data, response still readable.
    sock.shutdown(Shutdown::Write)
        .map_err(|e| ForwardError::Fault(Fault::new(Op::Write, e)))?;

    let emitted = relay_response(&mut sock, out)?;
    if cfg.verbose {
        eprintln!("forward-api-calls: relayed {emitted} body bytes");
    }
    Ok(emitted)
}
