//! Effector capabilities
//!
//! Every OS-level effect the dispatcher can trigger sits behind one of the
//! traits below. The registry is assembled once at startup: `detect` probes
//! the environment and falls back to the `unsupported` implementations
//! wherever a facility is missing, so callers never branch on availability.

pub mod native;
pub mod probe;
pub mod unsupported;

use crate::core::types::{
    BrightnessChange, Direction, MediaKey, PowerAction, ProcessId, ProcessInfo, SystemStats,
    VolumeChange, WindowCommand,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub use unsupported::Unsupported;

/// Failure reported by a capability
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// The environment lacks the facility this capability needs
    #[error("{capability} unavailable: {reason}")]
    Unavailable {
        capability: &'static str,
        reason: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CapabilityError {
    pub fn unavailable(capability: &'static str, reason: impl Into<String>) -> Self {
        CapabilityError::Unavailable {
            capability,
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CapabilityError::Unavailable { .. })
    }
}

pub type CapResult<T> = std::result::Result<T, CapabilityError>;

/// Enumerate, terminate and launch processes
pub trait ProcessManager: Send + Sync {
    fn list(&self) -> CapResult<Vec<ProcessInfo>>;
    /// Terminate every process whose name contains `name` (case-insensitive).
    /// Returns the names of the terminated processes; empty when none matched.
    fn terminate_by_name(&self, name: &str) -> CapResult<Vec<String>>;
    fn terminate_pid(&self, pid: ProcessId) -> CapResult<()>;
    fn launch(&self, program: &str) -> CapResult<()>;
}

/// Foreground window geometry and state
pub trait WindowManager: Send + Sync {
    fn minimize_all(&self) -> CapResult<()>;
    /// Snap the window whose title contains `title` (or the foreground window)
    /// to one half of the screen. Returns the title that was moved.
    fn snap(&self, title: Option<&str>, direction: Direction) -> CapResult<String>;
    fn apply(&self, command: WindowCommand) -> CapResult<()>;
}

pub trait BrowserLauncher: Send + Sync {
    fn open_url(&self, url: &str) -> CapResult<()>;
}

pub trait ClipboardProvider: Send + Sync {
    fn read_text(&self) -> CapResult<String>;
    fn write_text(&self, text: &str) -> CapResult<()>;
}

pub trait FileSystemProvider: Send + Sync {
    fn create_dir(&self, path: &Path) -> CapResult<()>;
    /// Remove a file, or a directory with its contents
    fn delete(&self, path: &Path) -> CapResult<()>;
    fn rename(&self, from: &Path, to: &Path) -> CapResult<()>;
    fn exists(&self, path: &Path) -> bool;
    /// Case-insensitive substring search over file and directory names.
    /// Roots are walked in order. Once `scan_limit` matches have been
    /// collected no further directory is read, in this root or any later
    /// one; the directory in progress is finished, so the result can
    /// exceed the limit.
    fn search(&self, roots: &[PathBuf], query: &str, scan_limit: usize) -> CapResult<Vec<PathBuf>>;
    fn empty_trash(&self) -> CapResult<()>;
}

pub trait PowerController: Send + Sync {
    fn sleep(&self) -> CapResult<()>;
    fn lock(&self) -> CapResult<()>;
    /// Schedule a transition and return immediately
    fn schedule(&self, action: PowerAction, delay: Duration) -> CapResult<()>;
    /// Cancel a transition scheduled by an earlier call
    fn abort(&self) -> CapResult<()>;
}

pub trait InputInjector: Send + Sync {
    fn type_text(&self, text: &str, interval: Duration) -> CapResult<()>;
    /// Hold the keys down in order, then release them in reverse
    fn press_keys(&self, keys: &[String]) -> CapResult<()>;
    fn media_key(&self, key: MediaKey) -> CapResult<()>;
    fn volume(&self, change: VolumeChange, presses: u32) -> CapResult<()>;
    /// Adjust brightness; returns the resulting level in percent when known
    fn brightness(&self, change: BrightnessChange, step: u8) -> CapResult<Option<u8>>;
}

pub trait ScreenCapture: Send + Sync {
    fn capture(&self, path: &Path) -> CapResult<()>;
}

pub trait SystemProbe: Send + Sync {
    fn stats(&self) -> CapResult<SystemStats>;
    fn ip_addresses(&self) -> CapResult<Vec<String>>;
}

/// The set of effectors a dispatcher invokes
pub struct Capabilities {
    pub processes: Box<dyn ProcessManager>,
    pub windows: Box<dyn WindowManager>,
    pub browser: Box<dyn BrowserLauncher>,
    pub clipboard: Box<dyn ClipboardProvider>,
    pub files: Box<dyn FileSystemProvider>,
    pub power: Box<dyn PowerController>,
    pub input: Box<dyn InputInjector>,
    pub screen: Box<dyn ScreenCapture>,
    pub system: Box<dyn SystemProbe>,
}

impl Capabilities {
    /// A registry where every capability reports itself unavailable
    pub fn unsupported() -> Self {
        let reason = "not configured";
        Self {
            processes: Box::new(Unsupported::new("ProcessManager", reason)),
            windows: Box::new(Unsupported::new("WindowManager", reason)),
            browser: Box::new(Unsupported::new("BrowserLauncher", reason)),
            clipboard: Box::new(Unsupported::new("ClipboardProvider", reason)),
            files: Box::new(Unsupported::new("FileSystemProvider", reason)),
            power: Box::new(Unsupported::new("PowerController", reason)),
            input: Box::new(Unsupported::new("InputInjector", reason)),
            screen: Box::new(Unsupported::new("ScreenCapture", reason)),
            system: Box::new(Unsupported::new("SystemProbe", reason)),
        }
    }

    pub fn with_processes(mut self, processes: impl ProcessManager + 'static) -> Self {
        self.processes = Box::new(processes);
        self
    }

    pub fn with_windows(mut self, windows: impl WindowManager + 'static) -> Self {
        self.windows = Box::new(windows);
        self
    }

    pub fn with_browser(mut self, browser: impl BrowserLauncher + 'static) -> Self {
        self.browser = Box::new(browser);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardProvider + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_files(mut self, files: impl FileSystemProvider + 'static) -> Self {
        self.files = Box::new(files);
        self
    }

    pub fn with_power(mut self, power: impl PowerController + 'static) -> Self {
        self.power = Box::new(power);
        self
    }

    pub fn with_input(mut self, input: impl InputInjector + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_screen(mut self, screen: impl ScreenCapture + 'static) -> Self {
        self.screen = Box::new(screen);
        self
    }

    pub fn with_system(mut self, system: impl SystemProbe + 'static) -> Self {
        self.system = Box::new(system);
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::unsupported()
    }
}
