//! Core type definitions shared by the command pipeline and the capabilities

use serde::{Deserialize, Serialize};

/// Operating system identifier of a running process
pub type ProcessId = u32;

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsFamily {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else if cfg!(target_os = "linux") {
            OsFamily::Linux
        } else {
            OsFamily::Other
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "macOS",
            OsFamily::Linux => "Linux",
            OsFamily::Other => "this platform",
        }
    }
}

/// Horizontal half of the screen a window is snapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Power transitions that are scheduled rather than immediate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Shutdown,
    Restart,
}

/// Media transport keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKey {
    PlayPause,
    NextTrack,
    PreviousTrack,
    Stop,
}

impl MediaKey {
    /// Confirmation shown once the key was sent
    pub fn describe(&self) -> &'static str {
        match self {
            MediaKey::PlayPause => "Play/Pause toggled",
            MediaKey::NextTrack => "Next track",
            MediaKey::PreviousTrack => "Previous track",
            MediaKey::Stop => "Stopped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeChange {
    Up,
    Down,
    Mute,
}

/// Requested brightness adjustment, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightnessChange {
    Up,
    Down,
    Max,
    Min,
    Set(u8),
    /// Report the current level without changing it
    Query,
}

/// State changes applied to the foreground window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowCommand {
    AlwaysOnTop,
    CancelAlwaysOnTop,
    Maximize,
    Minimize,
    Restore,
}

impl WindowCommand {
    pub fn describe(&self) -> &'static str {
        match self {
            WindowCommand::AlwaysOnTop => "Window set to always on top",
            WindowCommand::CancelAlwaysOnTop => "Always on top cancelled",
            WindowCommand::Maximize => "Window maximized",
            WindowCommand::Minimize => "Window minimized",
            WindowCommand::Restore => "Window restored",
        }
    }
}

/// A row of the process table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: ProcessId,
    pub name: String,
    pub cpu_percent: f32,
}

/// Snapshot of machine load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub disk_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_change_serialization() {
        let json = serde_json::to_string(&BrightnessChange::Up).unwrap();
        assert_eq!(json, "\"up\"");
    }

    #[test]
    fn test_media_key_serialization() {
        let json = serde_json::to_string(&MediaKey::PlayPause).unwrap();
        assert_eq!(json, "\"play_pause\"");
    }

    #[test]
    fn test_current_os_has_a_name() {
        assert!(!OsFamily::current().name().is_empty());
    }

    #[test]
    fn test_direction_str() {
        assert_eq!(Direction::Left.as_str(), "left");
        assert_eq!(Direction::Right.as_str(), "right");
    }
}
