//! Machine load and network addresses

use crate::capability::{CapResult, CapabilityError, SystemProbe};
use crate::core::types::SystemStats;
use std::net::UdpSocket;
use sysinfo::{Disks, System};

const BYTES_PER_MB: u64 = 1024 * 1024;

pub struct SysinfoProbe;

impl SysinfoProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for SysinfoProbe {
    fn stats(&self) -> CapResult<SystemStats> {
        let mut system = System::new();
        system.refresh_cpu();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu();
        system.refresh_memory();

        let total = system.total_memory();
        let used = system.used_memory();
        let memory_percent = if total > 0 {
            used as f32 / total as f32 * 100.0
        } else {
            0.0
        };

        // Root filesystem, or the first disk when there is no "/" mount
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"))
            .or_else(|| disks.list().first());
        let disk_percent = match disk {
            Some(d) if d.total_space() > 0 => {
                let used = d.total_space().saturating_sub(d.available_space());
                used as f32 / d.total_space() as f32 * 100.0
            }
            _ => 0.0,
        };

        Ok(SystemStats {
            cpu_percent: system.global_cpu_info().cpu_usage(),
            memory_percent,
            memory_used_mb: used / BYTES_PER_MB,
            memory_total_mb: total / BYTES_PER_MB,
            disk_percent,
        })
    }

    fn ip_addresses(&self) -> CapResult<Vec<String>> {
        // Connecting a UDP socket sends nothing; it only selects the outbound interface
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        let outbound = socket
            .connect("8.8.8.8:80")
            .and_then(|_| socket.local_addr())
            .map(|addr| addr.ip());

        match outbound {
            Ok(ip) if !ip.is_unspecified() => Ok(vec![ip.to_string()]),
            _ => Err(CapabilityError::NotFound("active network interface".into())),
        }
    }
}
