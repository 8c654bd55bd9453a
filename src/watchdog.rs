//! Whole-run deadline via alarm(2).
//!
//! No handler is installed: SIGALRM's default disposition terminates the
//! process abruptly, which is the accepted failure mode for a hung peer. One
//! deadline covers the entire run, stdin reads included; there are no
//! per-step sub-timeouts and no renewal.

use nix::unistd::alarm;

/// Arm the single wall-clock deadline. A value of 0 disables it.
pub fn arm(timeout_secs: u32) {
    if timeout_secs == 0 {
        let _ = alarm::cancel();
    } else {
        let _ = alarm::set(timeout_secs);
    }
}
