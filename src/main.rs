use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use forward_api_calls::config::ForwardConfig;
use forward_api_calls::errors::{display_for_forward_error, ForwardError};
use forward_api_calls::{doctor, forward::forward, watchdog};

#[derive(Parser, Debug)]
#[command(
    name = "forward-api-calls",
    version,
    about = "Forward one XML-RPC request from stdin to the node API socket and print the response body.",
    after_long_help = "Examples:\n  echo '<?xml version=\"1.0\"?><methodCall>...</methodCall>' | forward-api-calls\n  forward-api-calls --socket /run/nodeapi/api.sock --timeout-secs 10\n  forward-api-calls --doctor\n"
)]
struct Cli {
    /// Remote command passed by sshd when this binary is the login shell;
    /// accepted and ignored (the request arrives on stdin)
    #[arg(short = 'c', value_name = "COMMAND", allow_hyphen_values = true)]
    command: Option<String>,

    /// Override the API server socket path
    #[arg(long, value_name = "PATH")]
    socket: Option<PathBuf>,

    /// Override the whole-run deadline in seconds (0 disables it)
    #[arg(long = "timeout-secs", value_name = "SECS")]
    timeout_secs: Option<u32>,

    /// Override the request buffer capacity in bytes
    #[arg(long = "max-request-bytes", value_name = "BYTES")]
    max_request_bytes: Option<usize>,

    /// Run diagnostics against the configured socket and exit
    #[arg(long)]
    doctor: bool,

    /// Print detailed execution info on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut cfg = match ForwardConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("forward-api-calls: {e:#}");
            return ExitCode::from(1);
        }
    };
    if let Some(path) = cli.socket {
        cfg.socket_path = path;
    }
    if let Some(secs) = cli.timeout_secs {
        cfg.timeout_secs = secs;
    }
    if let Some(bytes) = cli.max_request_bytes {
        cfg.max_request_bytes = bytes;
    }
    if cli.verbose {
        cfg.verbose = true;
    }
    if cfg.max_request_bytes == 0 {
        eprintln!("forward-api-calls: --max-request-bytes must be positive");
        return ExitCode::from(1);
    }

    if cli.doctor {
        return if doctor::run_doctor(&cfg) {
            ExitCode::from(0)
        } else {
            ExitCode::from(1)
        };
    }

    if cfg.verbose {
        eprintln!(
            "forward-api-calls: build={} target={} profile={} rust={} ver={}",
            env!("FWD_API_BUILD_DATE"),
            env!("FWD_API_BUILD_TARGET"),
            env!("FWD_API_BUILD_PROFILE"),
            env!("FWD_API_BUILD_RUSTC"),
            env!("CARGO_PKG_VERSION")
        );
        if let Some(cmd) = &cli.command {
            eprintln!("forward-api-calls: ignoring login-shell command {cmd:?}");
        }
        if atty::is(atty::Stream::Stdin) {
            eprintln!("forward-api-calls: reading request from a terminal; end input with Ctrl-D");
        }
    }

    // One deadline over the whole run; SIGALRM's default disposition kills us.
    watchdog::arm(cfg.timeout_secs);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    match forward(&cfg, &mut input, &mut out) {
        Ok(_) => ExitCode::from(0),
        Err(ForwardError::Fault(fault)) => {
            // No body bytes have been written yet; the caller still gets a
            // well-formed XML-RPC reply.
            let _ = out.write_all(fault.to_xml().as_bytes());
            let _ = out.flush();
            if cfg.verbose {
                eprintln!("forward-api-calls: fault: {}", fault.fault_string());
            }
            ExitCode::from(1)
        }
        Err(e @ ForwardError::MidStream { .. }) => {
            // Output already carries body bytes; appending a fault document
            // would corrupt it. Abort and let the caller detect truncation.
            if cfg.verbose {
                eprintln!(
                    "forward-api-calls: aborted mid-relay: {}",
                    display_for_forward_error(&e)
                );
            }
            ExitCode::from(1)
        }
    }
}
