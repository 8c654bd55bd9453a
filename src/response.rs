//! Response relay: strip the HTTP envelope, stream the body verbatim.

use std::io::{self, Read, Write};

use crate::errors::{Fault, ForwardError, Op};

/// Byte-level scanner for the end of an HTTP response header block.
///
/// Three symbol classes: a newline bumps the consecutive-terminator count,
/// non-newline whitespace (CR included) leaves it unchanged, anything else
/// resets it. Two consecutive newline terminators mean the blank line ending
/// the header block, so `\n\n`, `\r\n\r\n` and `\r\n\n` all match without
/// special-casing carriage returns. State persists across chunks and freezes
/// once satisfied; it is never reset within an invocation.
#[derive(Debug, Default)]
pub struct HeaderScanner {
    newlines: u8,
    done: bool,
}

impl HeaderScanner {
    pub fn new() -> Self {
        HeaderScanner::default()
    }

    /// True once the header block (including its blank line) is consumed.
    pub fn header_consumed(&self) -> bool {
        self.done
    }

    /// Advance over `chunk`. Returns the offset of the first body byte when
    /// the terminator has been seen, `None` while still inside headers. Once
    /// satisfied, every later chunk yields `Some(0)` without rescanning.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<usize> {
        if self.done {
            return Some(0);
        }
        for (i, &b) in chunk.iter().enumerate() {
            match b {
                b'\n' => {
                    self.newlines += 1;
                    if self.newlines == 2 {
                        self.done = true;
                        return Some(i + 1);
                    }
                }
                // C isspace() set minus '\n': space, tab, CR, VT, FF
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => {}
                _ => self.newlines = 0,
            }
        }
        None
    }
}

/// Copy the HTTP response body from `transport` to `out`, discarding the
/// header block. Runs until end-of-stream; a peer reset is benign
/// end-of-transmission. Returns the number of body bytes emitted.
///
/// Fatal errors before the first emitted byte become `Fault` (a fault
/// document may still be written); afterwards they become `MidStream` and
/// the already-sent output is left alone.
pub fn relay_response<R: Read, W: Write>(
    transport: &mut R,
    out: &mut W,
) -> Result<u64, ForwardError> {
    let mut scanner = HeaderScanner::new();
    let mut buf = [0u8; 4096];
    let mut emitted: u64 = 0;

    loop {
        let n = match transport.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::ConnectionReset => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(relay_error(Op::Read, e, emitted)),
        };
        let start = match scanner.feed(&buf[..n]) {
            Some(start) => start,
            None => continue,
        };
        let body = &buf[start..n];
        if body.is_empty() {
            continue;
        }
        if let Err(e) = out.write_all(body) {
            return Err(relay_error(Op::Fwrite, e, emitted));
        }
        emitted += body.len() as u64;
    }

    if let Err(e) = out.flush() {
        return Err(relay_error(Op::Fwrite, e, emitted));
    }
    Ok(emitted)
}

fn relay_error(op: Op, source: io::Error, emitted: u64) -> ForwardError {
    if emitted == 0 {
        ForwardError::Fault(Fault::new(op, source))
    } else {
        ForwardError::MidStream {
            op,
            source,
            emitted,
        }
    }
}
