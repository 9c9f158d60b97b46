use crate::config::GRACEFUL_WAIT;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::thread;
use tracing::debug;

/// Check if process is alive
///
/// Probes with signal 0. EPERM means the process exists but belongs to
/// someone else, which still counts as alive.
pub fn process_alive(pid: u32) -> bool {
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(_) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

fn send_signal(pid: u32, signal: Signal) -> Result<(), Errno> {
    kill(Pid::from_raw(pid as i32), signal)
}

/// Force-kill a process with SIGKILL.
///
/// A process that disappeared between enumeration and signalling (ESRCH)
/// counts as terminated.
pub fn terminate_forceful(pid: u32) -> Result<(), String> {
    match send_signal(pid, Signal::SIGKILL) {
        Ok(()) => {
            debug!(pid, "sent SIGKILL");
            Ok(())
        }
        Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(format!("SIGKILL failed: {}", errno.desc())),
    }
}

/// Terminate process
///
/// First try graceful termination (SIGTERM), force termination (SIGKILL)
/// if it is still alive after the wait.
pub fn terminate_with_escalation(pid: u32) -> Result<(), String> {
    if !process_alive(pid) {
        return Ok(());
    }

    // Graceful termination
    if send_signal(pid, Signal::SIGTERM).is_ok() {
        thread::sleep(GRACEFUL_WAIT);

        if !process_alive(pid) {
            debug!(pid, "terminated by SIGTERM");
            return Ok(());
        }
    }

    // Force termination
    terminate_forceful(pid)
}
