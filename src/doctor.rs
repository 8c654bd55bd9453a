//! Environment diagnostics for `--doctor`: report the effective
//! configuration and probe the API socket without touching the protocol.
//! Everything goes to stderr; stdout stays reserved for responses.

use std::net::Shutdown;
use std::os::unix::net::UnixStream;

use nix::unistd::{getgid, getuid};

use crate::config::ForwardConfig;

pub fn run_doctor(cfg: &ForwardConfig) -> bool {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("forward-api-calls doctor");
    eprintln!();
    eprintln!("  version: v{}", version);
    eprintln!(
        "  build:   {} ({}, {}, rustc {})",
        env!("FWD_API_BUILD_DATE"),
        env!("FWD_API_BUILD_TARGET"),
        env!("FWD_API_BUILD_PROFILE"),
        env!("FWD_API_BUILD_RUSTC")
    );
    eprintln!(
        "  host:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    // The API server authorizes callers by the uid/gid it sees on the socket.
    eprintln!(
        "  uid/gid: {}/{}",
        u32::from(getuid()),
        u32::from(getgid())
    );
    eprintln!();
    eprintln!("  socket:      {}", cfg.socket_path.display());
    eprintln!("  timeout:     {}s", cfg.timeout_secs);
    eprintln!("  request cap: {} bytes", cfg.max_request_bytes);
    eprintln!(
        "  exists:      {}",
        if cfg.socket_path.exists() { "yes" } else { "no" }
    );

    let ok = match UnixStream::connect(&cfg.socket_path) {
        Ok(stream) => {
            let _ = stream.shutdown(Shutdown::Both);
            eprintln!("  connect:     {}", paint("ok"));
            true
        }
        Err(e) => {
            eprintln!("  connect:     {}", paint(&format!("failed ({e})")));
            false
        }
    };

    eprintln!();
    eprintln!("doctor: completed diagnostics.");
    ok
}

fn paint(value: &str) -> String {
    if atty::is(atty::Stream::Stderr) {
        format!("\x1b[34;1m{value}\x1b[0m")
    } else {
        value.to_string()
    }
}
