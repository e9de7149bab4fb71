use crate::capability::native::{spawn_detached, OsFamily, Tool};
use crate::capability::{BrowserLauncher, CapResult};
use std::process::Command;

/// Opens URLs with the desktop's default handler
pub enum ToolBrowser {
    /// `xdg-open` / `open`
    Opener(Tool),
    /// `rundll32 url.dll,FileProtocolHandler`, which needs no shell quoting
    Windows,
}

impl ToolBrowser {
    pub fn detect(os: OsFamily) -> Option<Self> {
        match os {
            OsFamily::Windows => Some(ToolBrowser::Windows),
            OsFamily::MacOs => Tool::find("open").map(ToolBrowser::Opener),
            OsFamily::Linux | OsFamily::Other => Tool::find("xdg-open").map(ToolBrowser::Opener),
        }
    }
}

impl BrowserLauncher for ToolBrowser {
    fn open_url(&self, url: &str) -> CapResult<()> {
        tracing::info!("Opening {}", url);
        match self {
            ToolBrowser::Opener(tool) => tool.spawn([url]),
            ToolBrowser::Windows => spawn_detached(
                Command::new("rundll32").args(["url.dll,FileProtocolHandler", url]),
            ),
        }
    }
}
