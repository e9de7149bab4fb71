//! Capability implementations backed by the host environment
//!
//! Desktop effects are delegated to well-known external tools located on
//! `PATH` at startup; process, system and filesystem access go through
//! `sysinfo` and `std::fs` directly.

pub mod browser;
pub mod clipboard;
pub mod desktop;
pub mod filesystem;
pub mod power;
pub mod process;
pub mod screen;
pub mod system;

pub use browser::ToolBrowser;
pub use clipboard::ArboardClipboard;
pub use desktop::{XdotoolInput, XdotoolWindows};
pub use filesystem::StdFileSystem;
pub use power::ShellPower;
pub use process::SysinfoProcesses;
pub use screen::ToolScreenCapture;
pub use system::SysinfoProbe;

use crate::capability::{CapResult, CapabilityError};
pub use crate::core::types::OsFamily;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// An external program resolved on `PATH`
#[derive(Debug, Clone)]
pub struct Tool {
    name: &'static str,
    path: PathBuf,
}

impl Tool {
    /// Locate `name` on `PATH`
    pub fn find(name: &'static str) -> Option<Self> {
        which::which(name).ok().map(|path| Self { name, path })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run to completion and return stdout; a non-zero exit is a failure
    pub fn run<I, S>(&self, args: I) -> CapResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CapabilityError::Failed(format!(
                "{} exited with {}: {}",
                self.name,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Start without waiting; the child is reaped on a background thread
    pub fn spawn<I, S>(&self, args: I) -> CapResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        spawn_detached(Command::new(&self.path).args(args))
    }
}

/// Spawn a prepared command without waiting on it
pub(crate) fn spawn_detached(command: &mut Command) -> CapResult<()> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
