//! Effective settings for one forwarding run.
//!
//! Defaults are compile-time constants; `FWD_API_*` environment variables
//! overlay them, and CLI flags overlay both (resolved in main).

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/node_mgr_api";
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 4096;

#[derive(Debug, Clone)]
pub struct ForwardConfig {
    /// Filesystem path of the API server's listening socket.
    pub socket_path: PathBuf,
    /// Whole-run deadline in seconds; 0 disables the watchdog.
    pub timeout_secs: u32,
    /// Request buffer capacity; stdin beyond this is not read.
    pub max_request_bytes: usize,
    /// Progress diagnostics on stderr.
    pub verbose: bool,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        ForwardConfig {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            verbose: false,
        }
    }
}

impl ForwardConfig {
    /// Defaults overlaid with any `FWD_API_*` environment overrides.
    /// Invalid values are a startup error, reported before the protocol runs.
    pub fn from_env() -> Result<Self> {
        let mut cfg = ForwardConfig::default();

        if let Ok(v) = env::var("FWD_API_SOCKET") {
            if !v.trim().is_empty() {
                cfg.socket_path = PathBuf::from(v);
            }
        }

        if let Ok(v) = env::var("FWD_API_TIMEOUT_SECS") {
            let t = v.trim();
            if !t.is_empty() {
                cfg.timeout_secs = t
                    .parse()
                    .with_context(|| format!("invalid FWD_API_TIMEOUT_SECS: {t:?}"))?;
            }
        }

        if let Ok(v) = env::var("FWD_API_MAX_REQUEST_BYTES") {
            let t = v.trim();
            if !t.is_empty() {
                let n: usize = t
                    .parse()
                    .with_context(|| format!("invalid FWD_API_MAX_REQUEST_BYTES: {t:?}"))?;
                if n == 0 {
                    bail!("FWD_API_MAX_REQUEST_BYTES must be positive");
                }
                cfg.max_request_bytes = n;
            }
        }

        if env::var("FWD_API_VERBOSE").ok().as_deref() == Some("1") {
            cfg.verbose = true;
        }

        Ok(cfg)
    }
}
