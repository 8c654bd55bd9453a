use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use wait_timeout::ChildExt;

/// Canned upstream reply and the body the forwarder must extract from it.
#[allow(dead_code)]
pub const OK_RESPONSE: &[u8] = b"HTTP/1.0 200 OK\r\nContent-Type: text/xml\r\n\r\n<methodResponse><params><param><value><string>ok</string></value></param></params></methodResponse>";
#[allow(dead_code)]
pub const OK_BODY: &[u8] = b"<methodResponse><params><param><value><string>ok</string></value></param></params></methodResponse>";

/// One-shot stub API server: accepts a single connection, captures the whole
/// request (the forwarder half-closes its write side after sending), then
/// writes `response` and closes. Join to get the captured request bytes.
#[allow(dead_code)]
pub fn spawn_stub_peer(sock_path: &Path, response: Vec<u8>) -> JoinHandle<Vec<u8>> {
    let listener = UnixListener::bind(sock_path).expect("bind stub socket");
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        stream.read_to_end(&mut request).expect("read request");
        stream.write_all(&response).expect("write response");
        stream.flush().expect("flush response");
        request
    })
}

pub struct RunResult {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[allow(dead_code)]
pub fn run_forwarder(args: &[&str], stdin_bytes: &[u8]) -> RunResult {
    run_forwarder_env(args, &[], stdin_bytes)
}

/// Run the real binary with piped stdio, bounded by a coarse timeout so a
/// hung run fails the test instead of wedging the suite.
pub fn run_forwarder_env(args: &[&str], envs: &[(&str, &str)], stdin_bytes: &[u8]) -> RunResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_forward-api-calls"));
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (k, v) in envs {
        cmd.env(k, v);
    }
    let mut child = cmd.spawn().expect("spawn forwarder");

    child
        .stdin
        .take()
        .expect("child stdin")
        .write_all(stdin_bytes)
        .expect("write stdin");
    // The stdin handle drops here, closing the pipe.

    let status = child
        .wait_timeout(Duration::from_secs(30))
        .expect("wait for forwarder")
        .expect("forwarder did not exit within 30s");

    let mut stdout = Vec::new();
    child
        .stdout
        .take()
        .expect("child stdout")
        .read_to_end(&mut stdout)
        .expect("read stdout");
    let mut stderr = Vec::new();
    child
        .stderr
        .take()
        .expect("child stderr")
        .read_to_end(&mut stderr)
        .expect("read stderr");

    RunResult {
        status,
        stdout,
        stderr,
    }
}
