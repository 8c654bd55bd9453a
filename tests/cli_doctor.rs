//! `--doctor` diagnostics: stderr report, stdout untouched, probe result.

mod common;

use std::os::unix::net::UnixListener;
use std::thread;

use common::run_forwarder;

#[test]
fn test_doctor_reports_ok_against_a_listening_socket() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sock = dir.path().join("api.sock");
    let listener = UnixListener::bind(&sock).expect("bind");
    let peer = thread::spawn(move || {
        let _ = listener.accept();
    });

    let res = run_forwarder(&["--doctor", "--socket", sock.to_str().unwrap()], b"");
    assert_eq!(res.status.code(), Some(0));
    assert!(res.stdout.is_empty(), "doctor must not write to stdout");

    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("forward-api-calls doctor"), "stderr: {stderr}");
    assert!(stderr.contains("connect:"), "stderr: {stderr}");
    assert!(stderr.contains("ok"), "stderr: {stderr}");
    peer.join().expect("listener thread");
}

#[test]
fn test_doctor_fails_when_socket_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sock = dir.path().join("missing.sock");

    let res = run_forwarder(&["--doctor", "--socket", sock.to_str().unwrap()], b"");
    assert_eq!(res.status.code(), Some(1));
    assert!(res.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("exists:      no"), "stderr: {stderr}");
    assert!(stderr.contains("failed"), "stderr: {stderr}");
}
