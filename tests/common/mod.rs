//! Recording fakes for the capability traits

#![allow(dead_code)]

use jarvis::capability::{
    BrowserLauncher, CapResult, CapabilityError, ClipboardProvider, InputInjector,
    PowerController, ProcessManager,
};
use jarvis::core::types::{
    BrightnessChange, MediaKey, PowerAction, ProcessId, ProcessInfo, VolumeChange,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared call log; clones see the same entries
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

pub struct RecordingBrowser {
    pub log: CallLog,
}

impl BrowserLauncher for RecordingBrowser {
    fn open_url(&self, url: &str) -> CapResult<()> {
        self.log.push(url);
        Ok(())
    }
}

/// Process table with a fixed set of running programs
pub struct FakeProcesses {
    pub running: Vec<ProcessInfo>,
    pub log: CallLog,
}

impl FakeProcesses {
    pub fn new(log: CallLog) -> Self {
        let running = [(4821, "chrome.exe"), (4822, "chrome.exe"), (77, "notepad.exe")]
            .into_iter()
            .map(|(pid, name)| ProcessInfo {
                pid,
                name: name.to_string(),
                cpu_percent: 1.0,
            })
            .collect();
        Self { running, log }
    }
}

impl ProcessManager for FakeProcesses {
    fn list(&self) -> CapResult<Vec<ProcessInfo>> {
        Ok(self.running.clone())
    }

    fn terminate_by_name(&self, name: &str) -> CapResult<Vec<String>> {
        let needle = name.to_lowercase();
        let hits: Vec<String> = self
            .running
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .map(|p| p.name.clone())
            .collect();
        self.log.push(format!("terminate_by_name {}", name));
        Ok(hits)
    }

    fn terminate_pid(&self, pid: ProcessId) -> CapResult<()> {
        self.log.push(format!("terminate_pid {}", pid));
        if self.running.iter().any(|p| p.pid == pid) {
            Ok(())
        } else {
            Err(CapabilityError::NotFound(pid.to_string()))
        }
    }

    fn launch(&self, program: &str) -> CapResult<()> {
        self.log.push(format!("launch {}", program));
        Ok(())
    }
}

pub struct RecordingPower {
    pub log: CallLog,
}

impl PowerController for RecordingPower {
    fn sleep(&self) -> CapResult<()> {
        self.log.push("sleep");
        Ok(())
    }

    fn lock(&self) -> CapResult<()> {
        self.log.push("lock");
        Ok(())
    }

    fn schedule(&self, action: PowerAction, delay: Duration) -> CapResult<()> {
        self.log
            .push(format!("schedule {:?} {}", action, delay.as_secs()));
        Ok(())
    }

    fn abort(&self) -> CapResult<()> {
        self.log.push("abort");
        Ok(())
    }
}

/// Input injector that panics on every call
pub struct PanickingInput;

impl InputInjector for PanickingInput {
    fn type_text(&self, _text: &str, _interval: Duration) -> CapResult<()> {
        panic!("keyboard exploded")
    }

    fn press_keys(&self, _keys: &[String]) -> CapResult<()> {
        panic!("keyboard exploded")
    }

    fn media_key(&self, _key: MediaKey) -> CapResult<()> {
        panic!("keyboard exploded")
    }

    fn volume(&self, _change: VolumeChange, _presses: u32) -> CapResult<()> {
        panic!("keyboard exploded")
    }

    fn brightness(&self, _change: BrightnessChange, _step: u8) -> CapResult<Option<u8>> {
        panic!("keyboard exploded")
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    pub text: Mutex<String>,
}

impl ClipboardProvider for MemoryClipboard {
    fn read_text(&self) -> CapResult<String> {
        Ok(self.text.lock().unwrap().clone())
    }

    fn write_text(&self, text: &str) -> CapResult<()> {
        *self.text.lock().unwrap() = text.to_string();
        Ok(())
    }
}
