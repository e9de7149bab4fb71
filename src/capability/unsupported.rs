//! Null-object capability used when the environment lacks a facility

use crate::capability::{
    BrowserLauncher, CapResult, CapabilityError, ClipboardProvider, FileSystemProvider,
    InputInjector, PowerController, ProcessManager, ScreenCapture, SystemProbe, WindowManager,
};
use crate::core::types::{
    BrightnessChange, Direction, MediaKey, PowerAction, ProcessId, ProcessInfo, SystemStats,
    VolumeChange, WindowCommand,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Implements every capability trait by reporting itself unavailable
#[derive(Debug, Clone)]
pub struct Unsupported {
    capability: &'static str,
    reason: String,
}

impl Unsupported {
    pub fn new(capability: &'static str, reason: impl Into<String>) -> Self {
        Self {
            capability,
            reason: reason.into(),
        }
    }

    pub fn capability(&self) -> &'static str {
        self.capability
    }

    fn fail<T>(&self) -> CapResult<T> {
        Err(CapabilityError::unavailable(self.capability, self.reason.clone()))
    }
}

impl ProcessManager for Unsupported {
    fn list(&self) -> CapResult<Vec<ProcessInfo>> {
        self.fail()
    }

    fn terminate_by_name(&self, _name: &str) -> CapResult<Vec<String>> {
        self.fail()
    }

    fn terminate_pid(&self, _pid: ProcessId) -> CapResult<()> {
        self.fail()
    }

    fn launch(&self, _program: &str) -> CapResult<()> {
        self.fail()
    }
}

impl WindowManager for Unsupported {
    fn minimize_all(&self) -> CapResult<()> {
        self.fail()
    }

    fn snap(&self, _title: Option<&str>, _direction: Direction) -> CapResult<String> {
        self.fail()
    }

    fn apply(&self, _command: WindowCommand) -> CapResult<()> {
        self.fail()
    }
}

impl BrowserLauncher for Unsupported {
    fn open_url(&self, _url: &str) -> CapResult<()> {
        self.fail()
    }
}

impl ClipboardProvider for Unsupported {
    fn read_text(&self) -> CapResult<String> {
        self.fail()
    }

    fn write_text(&self, _text: &str) -> CapResult<()> {
        self.fail()
    }
}

impl FileSystemProvider for Unsupported {
    fn create_dir(&self, _path: &Path) -> CapResult<()> {
        self.fail()
    }

    fn delete(&self, _path: &Path) -> CapResult<()> {
        self.fail()
    }

    fn rename(&self, _from: &Path, _to: &Path) -> CapResult<()> {
        self.fail()
    }

    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn search(&self, _roots: &[PathBuf], _query: &str, _scan_limit: usize) -> CapResult<Vec<PathBuf>> {
        self.fail()
    }

    fn empty_trash(&self) -> CapResult<()> {
        self.fail()
    }
}

impl PowerController for Unsupported {
    fn sleep(&self) -> CapResult<()> {
        self.fail()
    }

    fn lock(&self) -> CapResult<()> {
        self.fail()
    }

    fn schedule(&self, _action: PowerAction, _delay: Duration) -> CapResult<()> {
        self.fail()
    }

    fn abort(&self) -> CapResult<()> {
        self.fail()
    }
}

impl InputInjector for Unsupported {
    fn type_text(&self, _text: &str, _interval: Duration) -> CapResult<()> {
        self.fail()
    }

    fn press_keys(&self, _keys: &[String]) -> CapResult<()> {
        self.fail()
    }

    fn media_key(&self, _key: MediaKey) -> CapResult<()> {
        self.fail()
    }

    fn volume(&self, _change: VolumeChange, _presses: u32) -> CapResult<()> {
        self.fail()
    }

    fn brightness(&self, _change: BrightnessChange, _step: u8) -> CapResult<Option<u8>> {
        self.fail()
    }
}

impl ScreenCapture for Unsupported {
    fn capture(&self, _path: &Path) -> CapResult<()> {
        self.fail()
    }
}

impl SystemProbe for Unsupported {
    fn stats(&self) -> CapResult<SystemStats> {
        self.fail()
    }

    fn ip_addresses(&self) -> CapResult<Vec<String>> {
        self.fail()
    }
}
