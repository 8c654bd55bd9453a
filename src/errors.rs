//! Error mapping guide:
//! - Every reported failure exits with status 1; the watchdog kill never
//!   reaches user code.
//! - A fault document is owed only while stdout is still untouched; after the
//!   first relayed body byte, failures become `MidStream` and stdout is left
//!   alone so the partial response is not corrupted.
//! - Keep user-visible fault strings in the fixed `<operation>: <message>`
//!   shape via the display_* helpers.

use std::io;

/// Operation tags surfaced in fault strings. The vocabulary is part of the
/// caller-visible contract and does not grow casually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Socket,
    Connect,
    Write,
    Fwrite,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Read => "read()",
            Op::Socket => "socket()",
            Op::Connect => "connect()",
            Op::Write => "write()",
            Op::Fwrite => "fwrite()",
        }
    }
}

/// A failed operation plus the underlying system error.
#[derive(Debug)]
pub struct Fault {
    pub op: Op,
    pub source: io::Error,
}

impl Fault {
    pub fn new(op: Op, source: io::Error) -> Self {
        Fault { op, source }
    }

    /// `<operation>: <system error text>`, the faultString payload.
    pub fn fault_string(&self) -> String {
        format!("{}: {}", self.op.as_str(), self.source)
    }

    /// Render the fixed XML-RPC fault document for stdout. The error text is
    /// an OS error string and goes in verbatim, unescaped.
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version='1.0'?>\n\
             <methodResponse>\n\
             <fault>\n\
             <value><struct>\n\
             <member>\n\
             <name>faultCode</name>\n\
             <value><int>1</int></value>\n\
             </member>\n\
             <member>\n\
             <name>faultString</name>\n\
             <value><string>{}</string></value>\n\
             </member>\n\
             </struct></value>\n\
             </fault>\n\
             </methodResponse>\n",
            self.fault_string()
        )
    }
}

/// Terminal outcome of a forwarding run that did not complete cleanly.
#[derive(Debug)]
pub enum ForwardError {
    /// Failed before any body byte reached stdout; a fault document is owed.
    Fault(Fault),
    /// Failed after `emitted` body bytes were already written; stdout must
    /// not be touched again.
    MidStream {
        op: Op,
        source: io::Error,
        emitted: u64,
    },
}

/// Render a user-facing string for ForwardError (stderr diagnostics only).
pub fn display_for_forward_error(e: &ForwardError) -> String {
    match e {
        ForwardError::Fault(f) => f.fault_string(),
        ForwardError::MidStream {
            op,
            source,
            emitted,
        } => format!(
            "{}: {} (after {} body bytes)",
            op.as_str(),
            source,
            emitted
        ),
    }
}
