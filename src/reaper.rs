//! Process reaper: find gateway processes by name and terminate them.
//!
//! Matching is a case-sensitive substring test against the process name and
//! its command line, the way `ps -ef | grep <name>` behaves. The reaper's
//! own process is always excluded from the match set.

use crate::platform;
use sysinfo::System;

/// One matched process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReapTarget {
    pub pid: u32,
    pub name: String,
    pub cmdline: String,
}

/// Result of signalling one target.
#[derive(Debug, Clone)]
pub struct ReapOutcome {
    pub pid: u32,
    pub name: String,
    /// `None` when the process was terminated, otherwise the failure reason.
    pub error: Option<String>,
}

impl ReapOutcome {
    pub fn terminated(&self) -> bool {
        self.error.is_none()
    }
}

/// Enumerate the process table and collect targets matching `pattern`.
pub fn find_targets(pattern: &str, exclude_pid: u32) -> Vec<ReapTarget> {
    let sys = System::new_all();
    let mut targets = Vec::new();

    for (pid, process) in sys.processes() {
        let pid = pid.as_u32();
        if pid == exclude_pid {
            continue;
        }

        let name = process.name().to_string_lossy().to_string();
        let cmdline = process
            .cmd()
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        if name.contains(pattern) || cmdline.contains(pattern) {
            targets.push(ReapTarget { pid, name, cmdline });
        }
    }

    targets.sort_by_key(|target| target.pid);
    targets
}

/// Signal every target sequentially and report per-PID outcomes.
pub fn terminate_targets(targets: &[ReapTarget], graceful: bool) -> Vec<ReapOutcome> {
    targets
        .iter()
        .map(|target| {
            let result = if graceful {
                platform::terminate_with_escalation(target.pid)
            } else {
                platform::terminate_forceful(target.pid)
            };

            ReapOutcome {
                pid: target.pid,
                name: target.name.clone(),
                error: result.err(),
            }
        })
        .collect()
}
