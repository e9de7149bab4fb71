//! Process table access through `sysinfo`

use crate::capability::native::{spawn_detached, OsFamily};
use crate::capability::{CapResult, CapabilityError, ProcessManager};
use crate::core::types::{ProcessId, ProcessInfo};
use std::process::Command;
use sysinfo::{Pid, Signal, System};

/// Processes listed per "list processes" command
const LIST_LIMIT: usize = 10;

pub struct SysinfoProcesses {
    os: OsFamily,
}

impl SysinfoProcesses {
    pub fn new(os: OsFamily) -> Self {
        Self { os }
    }

    fn snapshot() -> System {
        let mut system = System::new();
        system.refresh_processes();
        system
    }
}

impl ProcessManager for SysinfoProcesses {
    fn list(&self) -> CapResult<Vec<ProcessInfo>> {
        // CPU usage is a delta, so it needs two samples
        let mut system = Self::snapshot();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_processes();

        let mut processes: Vec<ProcessInfo> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.cpu_usage() > 0.0)
            .map(|(pid, process)| ProcessInfo {
                pid: pid.as_u32(),
                name: process.name().to_string(),
                cpu_percent: process.cpu_usage(),
            })
            .collect();

        processes.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        processes.truncate(LIST_LIMIT);
        Ok(processes)
    }

    fn terminate_by_name(&self, name: &str) -> CapResult<Vec<String>> {
        let system = Self::snapshot();
        let needle = name.to_lowercase();
        let own_pid = sysinfo::get_current_pid().ok();
        let mut terminated = Vec::new();

        for (pid, process) in system.processes() {
            if Some(*pid) == own_pid {
                continue;
            }
            if !process.name().to_lowercase().contains(&needle) {
                continue;
            }
            // Processes that vanish or refuse the signal are skipped
            let sent = process.kill_with(Signal::Term).unwrap_or_else(|| process.kill());
            if sent {
                terminated.push(process.name().to_string());
            }
        }

        tracing::debug!("Terminated {} process(es) matching '{}'", terminated.len(), name);
        Ok(terminated)
    }

    fn terminate_pid(&self, pid: ProcessId) -> CapResult<()> {
        let system = Self::snapshot();
        let process = system
            .process(Pid::from_u32(pid))
            .ok_or_else(|| CapabilityError::NotFound(format!("process {}", pid)))?;

        let sent = process.kill_with(Signal::Term).unwrap_or_else(|| process.kill());
        if sent {
            Ok(())
        } else {
            Err(CapabilityError::Failed(format!(
                "Could not terminate process {}",
                pid
            )))
        }
    }

    fn launch(&self, program: &str) -> CapResult<()> {
        let mut parts = program.split_whitespace();
        let Some(executable) = parts.next() else {
            return Err(CapabilityError::Failed("No program given".into()));
        };

        let result = match self.os {
            // `start` resolves App Paths entries and protocol handlers like ms-settings:
            OsFamily::Windows => spawn_detached(Command::new("cmd").args(["/C", "start", "", program])),
            OsFamily::MacOs if !executable.contains('/') => {
                spawn_detached(Command::new("open").args(["-a", program]))
            }
            _ => spawn_detached(Command::new(executable).args(parts)),
        };

        result.map_err(|err| match err {
            CapabilityError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                CapabilityError::NotFound(format!("application '{}'", program))
            }
            other => other,
        })
    }
}
