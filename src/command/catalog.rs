//! Friendly application names for the open intent

use crate::command::normalizer::normalize;
use crate::core::types::OsFamily;
use std::collections::BTreeMap;

/// Program to launch per OS family for one friendly name
struct AppEntry {
    name: &'static str,
    windows: &'static str,
    linux: &'static str,
    macos: &'static str,
}

const fn app(
    name: &'static str,
    windows: &'static str,
    linux: &'static str,
    macos: &'static str,
) -> AppEntry {
    AppEntry {
        name,
        windows,
        linux,
        macos,
    }
}

// macOS entries are application names for `open -a`
const APPS: &[AppEntry] = &[
    app("notepad", "notepad.exe", "gedit", "TextEdit"),
    app("calc", "calc.exe", "gnome-calculator", "Calculator"),
    app("calculator", "calc.exe", "gnome-calculator", "Calculator"),
    app("chrome", "chrome.exe", "google-chrome", "Google Chrome"),
    app("browser", "chrome.exe", "x-www-browser", "Safari"),
    app("edge", "msedge.exe", "microsoft-edge", "Microsoft Edge"),
    app("firefox", "firefox.exe", "firefox", "Firefox"),
    app("cmd", "cmd.exe", "x-terminal-emulator", "Terminal"),
    app("command prompt", "cmd.exe", "x-terminal-emulator", "Terminal"),
    app("terminal", "cmd.exe", "x-terminal-emulator", "Terminal"),
    app("powershell", "powershell.exe", "pwsh", "Terminal"),
    app("explorer", "explorer.exe", "nautilus", "Finder"),
    app("files", "explorer.exe", "nautilus", "Finder"),
    app("task manager", "taskmgr.exe", "gnome-system-monitor", "Activity Monitor"),
    app("paint", "mspaint.exe", "pinta", "Preview"),
    app("word", "winword.exe", "libreoffice --writer", "Microsoft Word"),
    app("excel", "excel.exe", "libreoffice --calc", "Microsoft Excel"),
    app("spotify", "spotify.exe", "spotify", "Spotify"),
    app("settings", "ms-settings:", "gnome-control-center", "System Settings"),
    app("control panel", "control.exe", "gnome-control-center", "System Settings"),
    app("vscode", "code.exe", "code", "Visual Studio Code"),
    app("visual studio code", "code.exe", "code", "Visual Studio Code"),
    app("vlc", "vlc.exe", "vlc", "VLC"),
    app("discord", "discord.exe", "discord", "Discord"),
    app("steam", "steam.exe", "steam", "Steam"),
];

/// Maps friendly names ("task manager") to the program the OS should start
#[derive(Debug, Clone)]
pub struct AppCatalog {
    programs: BTreeMap<String, String>,
}

impl AppCatalog {
    /// Built-in names for `os`, with `overrides` taking precedence
    pub fn new(os: OsFamily, overrides: &BTreeMap<String, String>) -> Self {
        let mut programs: BTreeMap<String, String> = APPS
            .iter()
            .map(|entry| {
                let program = match os {
                    OsFamily::Windows => entry.windows,
                    OsFamily::MacOs => entry.macos,
                    OsFamily::Linux | OsFamily::Other => entry.linux,
                };
                (entry.name.to_string(), program.to_string())
            })
            .collect();

        for (name, program) in overrides {
            programs.insert(normalize(name), program.clone());
        }

        Self { programs }
    }

    /// The program behind a friendly name; `None` means launch the name as given
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.programs.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_os_programs() {
        let none = BTreeMap::new();
        let windows = AppCatalog::new(OsFamily::Windows, &none);
        let linux = AppCatalog::new(OsFamily::Linux, &none);
        let mac = AppCatalog::new(OsFamily::MacOs, &none);

        assert_eq!(windows.resolve("task manager"), Some("taskmgr.exe"));
        assert_eq!(linux.resolve("task manager"), Some("gnome-system-monitor"));
        assert_eq!(mac.resolve("task manager"), Some("Activity Monitor"));
    }

    #[test]
    fn test_unknown_name() {
        let catalog = AppCatalog::new(OsFamily::Linux, &BTreeMap::new());
        assert_eq!(catalog.resolve("gimp"), None);
    }

    #[test]
    fn test_overrides_win() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Notepad".to_string(), "kate".to_string());
        overrides.insert("gimp".to_string(), "gimp-2.10".to_string());
        let catalog = AppCatalog::new(OsFamily::Linux, &overrides);
        assert_eq!(catalog.resolve("notepad"), Some("kate"));
        assert_eq!(catalog.resolve("gimp"), Some("gimp-2.10"));
        assert!(catalog.names().any(|n| n == "vlc"));
    }
}
