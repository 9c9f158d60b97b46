//! OS-specific process primitives.
//!
//! Unix gets real signal delivery (probe with signal 0, SIGTERM/SIGKILL);
//! everything else falls back to the process-table crate's kill.

#[cfg(unix)]
pub mod unix;

#[cfg(unix)]
pub use unix::{process_alive, terminate_forceful, terminate_with_escalation};

#[cfg(not(unix))]
pub fn process_alive(pid: u32) -> bool {
    use sysinfo::{Pid, ProcessesToUpdate, System};

    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]), true);
    sys.process(Pid::from_u32(pid)).is_some()
}

#[cfg(not(unix))]
pub fn terminate_forceful(pid: u32) -> Result<(), String> {
    use sysinfo::{Pid, ProcessesToUpdate, System};

    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]), true);
    match sys.process(Pid::from_u32(pid)) {
        // Already gone counts as success
        None => Ok(()),
        Some(process) => {
            if process.kill() {
                Ok(())
            } else {
                Err("kill request was rejected".to_string())
            }
        }
    }
}

#[cfg(not(unix))]
pub fn terminate_with_escalation(pid: u32) -> Result<(), String> {
    // No graceful signal to escalate from on this platform
    terminate_forceful(pid)
}
