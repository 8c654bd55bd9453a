//! Stdin collection and HTTP request framing.

use std::io::{self, Read, Write};

use crate::errors::{Fault, Op};

/// Read at most `cap` bytes from `input`, accumulating across short reads,
/// until the buffer is full or the stream ends. Input beyond `cap` is left
/// unread (silent truncation). Read errors are fatal, tagged `read()`.
pub fn collect_request<R: Read>(input: &mut R, cap: usize) -> Result<Vec<u8>, Fault> {
    let mut buf = vec![0u8; cap];
    let mut filled = 0usize;
    while filled < cap {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Fault::new(Op::Read, e)),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

/// Format the HTTP/1.0 header for a request body of exactly `len` bytes.
pub fn frame_header(len: usize) -> String {
    format!("POST / HTTP/1.0\r\nContent-Type: text/xml\r\nContent-Length: {len}\r\n\r\n")
}

/// Write the framed request (header, then body) to the transport. The caller
/// half-closes the write direction afterwards.
pub fn send_request<W: Write>(transport: &mut W, body: &[u8]) -> Result<(), Fault> {
    let header = frame_header(body.len());
    transport
        .write_all(header.as_bytes())
        .map_err(|e| Fault::new(Op::Write, e))?;
    transport
        .write_all(body)
        .map_err(|e| Fault::new(Op::Write, e))?;
    transport.flush().map_err(|e| Fault::new(Op::Write, e))?;
    Ok(())
}
