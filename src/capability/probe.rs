//! One-shot environment probing that assembles the capability registry

use crate::capability::native::{
    ArboardClipboard, OsFamily, ShellPower, StdFileSystem, SysinfoProbe, SysinfoProcesses,
    ToolBrowser, ToolScreenCapture, XdotoolInput, XdotoolWindows,
};
use crate::capability::{Capabilities, Unsupported};

/// Which implementation was chosen for each capability
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub entries: Vec<ProbeEntry>,
}

#[derive(Debug, Clone)]
pub struct ProbeEntry {
    pub capability: &'static str,
    /// Implementation name, or `None` when the unsupported fallback was used
    pub implementation: Option<&'static str>,
    pub note: String,
}

impl ProbeReport {
    fn available(&mut self, capability: &'static str, implementation: &'static str) {
        tracing::info!("{}: using {}", capability, implementation);
        self.entries.push(ProbeEntry {
            capability,
            implementation: Some(implementation),
            note: String::new(),
        });
    }

    fn missing(&mut self, capability: &'static str, reason: String) -> Unsupported {
        tracing::warn!("{}: unavailable ({})", capability, reason);
        self.entries.push(ProbeEntry {
            capability,
            implementation: None,
            note: reason.clone(),
        });
        Unsupported::new(capability, reason)
    }

    pub fn unavailable(&self) -> impl Iterator<Item = &ProbeEntry> {
        self.entries.iter().filter(|e| e.implementation.is_none())
    }
}

impl Capabilities {
    /// Probe the host once and pick an implementation per capability
    pub fn detect() -> (Self, ProbeReport) {
        let os = OsFamily::current();
        let mut report = ProbeReport::default();
        let mut caps = Capabilities::unsupported();

        caps.processes = Box::new(SysinfoProcesses::new(os));
        report.available("ProcessManager", "sysinfo");

        caps.system = Box::new(SysinfoProbe::new());
        report.available("SystemProbe", "sysinfo");

        caps.files = Box::new(StdFileSystem::new(os));
        report.available("FileSystemProvider", "std::fs");

        caps.browser = match ToolBrowser::detect(os) {
            Some(browser) => {
                report.available("BrowserLauncher", "default URL handler");
                Box::new(browser)
            }
            None => Box::new(report.missing(
                "BrowserLauncher",
                format!("no URL opener found on {}", os.name()),
            )),
        };

        caps.clipboard = match ArboardClipboard::open() {
            Ok(clipboard) => {
                report.available("ClipboardProvider", "arboard");
                Box::new(clipboard)
            }
            Err(err) => Box::new(report.missing("ClipboardProvider", err.to_string())),
        };

        caps.power = match ShellPower::detect(os) {
            Some(power) => {
                report.available("PowerController", "shutdown");
                Box::new(power)
            }
            None => Box::new(report.missing("PowerController", "shutdown not found".into())),
        };

        caps.input = match XdotoolInput::detect() {
            Some(input) => {
                report.available("InputInjector", "xdotool");
                Box::new(input)
            }
            None => Box::new(report.missing(
                "InputInjector",
                format!("xdotool not found on {}", os.name()),
            )),
        };

        caps.windows = match XdotoolWindows::detect() {
            Some(windows) => {
                report.available("WindowManager", "xdotool + wmctrl");
                Box::new(windows)
            }
            None => Box::new(report.missing(
                "WindowManager",
                format!("xdotool and wmctrl not found on {}", os.name()),
            )),
        };

        caps.screen = match ToolScreenCapture::detect(os) {
            Some(screen) => {
                report.available("ScreenCapture", "screenshot tool");
                Box::new(screen)
            }
            None => Box::new(report.missing(
                "ScreenCapture",
                format!("no screenshot tool found on {}", os.name()),
            )),
        };

        (caps, report)
    }
}
