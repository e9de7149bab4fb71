//! X11 keyboard and window control through `xdotool`, `wmctrl` and `brightnessctl`

use crate::capability::native::Tool;
use crate::capability::{CapResult, CapabilityError, InputInjector, WindowManager};
use crate::core::types::{BrightnessChange, Direction, MediaKey, VolumeChange, WindowCommand};
use std::time::Duration;

/// Translate common key names to X keysyms
fn keysym(key: &str) -> String {
    let mapped = match key {
        "win" | "windows" | "super" | "cmd" | "command" => "super",
        "ctrl" | "control" => "ctrl",
        "enter" | "return" => "Return",
        "esc" | "escape" => "Escape",
        "tab" => "Tab",
        "space" => "space",
        "backspace" => "BackSpace",
        "delete" | "del" => "Delete",
        "home" => "Home",
        "end" => "End",
        "pageup" => "Prior",
        "pagedown" => "Next",
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        "capslock" => "Caps_Lock",
        "printscreen" => "Print",
        other => {
            if let Some(n) = other.strip_prefix('f') {
                if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) {
                    return format!("F{}", n);
                }
            }
            other
        }
    };
    mapped.to_string()
}

fn media_keysym(key: MediaKey) -> &'static str {
    match key {
        MediaKey::PlayPause => "XF86AudioPlay",
        MediaKey::NextTrack => "XF86AudioNext",
        MediaKey::PreviousTrack => "XF86AudioPrev",
        MediaKey::Stop => "XF86AudioStop",
    }
}

/// Parse the percentage column of `brightnessctl -m` output
/// (`device,class,current,percent%,max`)
fn parse_brightness(output: &str) -> Option<u8> {
    let line = output.lines().next()?;
    let percent = line.split(',').nth(3)?;
    percent.trim().trim_end_matches('%').parse().ok()
}

pub struct XdotoolInput {
    xdotool: Tool,
    brightnessctl: Option<Tool>,
}

impl XdotoolInput {
    pub fn detect() -> Option<Self> {
        let xdotool = Tool::find("xdotool")?;
        Some(Self {
            xdotool,
            brightnessctl: Tool::find("brightnessctl"),
        })
    }
}

impl InputInjector for XdotoolInput {
    fn type_text(&self, text: &str, interval: Duration) -> CapResult<()> {
        let delay = interval.as_millis().to_string();
        self.xdotool
            .run(["type", "--delay", delay.as_str(), "--", text])?;
        Ok(())
    }

    fn press_keys(&self, keys: &[String]) -> CapResult<()> {
        if keys.is_empty() {
            return Err(CapabilityError::Failed("No keys given".into()));
        }
        // xdotool presses a chord in order and releases it in reverse
        let chord = keys.iter().map(|k| keysym(k)).collect::<Vec<_>>().join("+");
        self.xdotool.run(["key", "--", chord.as_str()])?;
        Ok(())
    }

    fn media_key(&self, key: MediaKey) -> CapResult<()> {
        self.xdotool.run(["key", media_keysym(key)])?;
        Ok(())
    }

    fn volume(&self, change: VolumeChange, presses: u32) -> CapResult<()> {
        let (keysym, repeat) = match change {
            VolumeChange::Up => ("XF86AudioRaiseVolume", presses.max(1)),
            VolumeChange::Down => ("XF86AudioLowerVolume", presses.max(1)),
            VolumeChange::Mute => ("XF86AudioMute", 1),
        };
        let repeat = repeat.to_string();
        self.xdotool
            .run(["key", "--repeat", repeat.as_str(), keysym])?;
        Ok(())
    }

    fn brightness(&self, change: BrightnessChange, step: u8) -> CapResult<Option<u8>> {
        let tool = self.brightnessctl.as_ref().ok_or_else(|| {
            CapabilityError::unavailable("InputInjector", "brightnessctl not found")
        })?;

        let output = match change {
            BrightnessChange::Query => tool.run(["-m", "info"])?,
            BrightnessChange::Up => tool.run(["-m", "set", format!("{}%+", step).as_str()])?,
            BrightnessChange::Down => tool.run(["-m", "set", format!("{}%-", step).as_str()])?,
            BrightnessChange::Max => tool.run(["-m", "set", "100%"])?,
            BrightnessChange::Min => tool.run(["-m", "set", "0%"])?,
            BrightnessChange::Set(level) => {
                tool.run(["-m", "set", format!("{}%", level.min(100)).as_str()])?
            }
        };
        Ok(parse_brightness(&output))
    }
}

pub struct XdotoolWindows {
    xdotool: Tool,
    wmctrl: Tool,
}

impl XdotoolWindows {
    pub fn detect() -> Option<Self> {
        Some(Self {
            xdotool: Tool::find("xdotool")?,
            wmctrl: Tool::find("wmctrl")?,
        })
    }

    fn active_window(&self) -> CapResult<String> {
        let id = self.xdotool.run(["getactivewindow"])?;
        let id = id.trim();
        if id.is_empty() {
            return Err(CapabilityError::NotFound("active window".into()));
        }
        Ok(id.to_string())
    }

    fn find_window(&self, title: &str) -> CapResult<String> {
        // xdotool exits non-zero when nothing matches
        let found = self
            .xdotool
            .run(["search", "--onlyvisible", "--name", title])
            .unwrap_or_default();
        found
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| CapabilityError::NotFound(format!("window '{}'", title)))
    }

    fn screen_size(&self) -> CapResult<(u32, u32)> {
        let geometry = self.xdotool.run(["getdisplaygeometry"])?;
        let mut parts = geometry.split_whitespace().map(|p| p.parse::<u32>());
        match (parts.next(), parts.next()) {
            (Some(Ok(w)), Some(Ok(h))) => Ok((w, h)),
            _ => Err(CapabilityError::Failed(format!(
                "Unexpected display geometry '{}'",
                geometry.trim()
            ))),
        }
    }

    fn set_state(&self, action: &str, props: &str) -> CapResult<()> {
        let change = format!("{},{}", action, props);
        self.wmctrl.run(["-r", ":ACTIVE:", "-b", change.as_str()])?;
        Ok(())
    }
}

impl WindowManager for XdotoolWindows {
    fn minimize_all(&self) -> CapResult<()> {
        self.wmctrl.run(["-k", "on"])?;
        Ok(())
    }

    fn snap(&self, title: Option<&str>, direction: Direction) -> CapResult<String> {
        let id = match title {
            Some(title) => self.find_window(title)?,
            None => self.active_window()?,
        };
        let (width, height) = self.screen_size()?;
        let half = width / 2;
        let x = match direction {
            Direction::Left => 0,
            Direction::Right => half,
        };

        // A maximized window ignores move/resize requests
        self.wmctrl.run([
            "-i",
            "-r",
            id.as_str(),
            "-b",
            "remove,maximized_vert,maximized_horz",
        ])?;
        let geometry = format!("0,{},0,{},{}", x, half, height);
        self.wmctrl.run(["-i", "-r", id.as_str(), "-e", geometry.as_str()])?;

        Ok(title.map(str::to_string).unwrap_or_else(|| "active window".to_string()))
    }

    fn apply(&self, command: WindowCommand) -> CapResult<()> {
        match command {
            WindowCommand::AlwaysOnTop => self.set_state("add", "above"),
            WindowCommand::CancelAlwaysOnTop => self.set_state("remove", "above"),
            WindowCommand::Maximize => self.set_state("add", "maximized_vert,maximized_horz"),
            WindowCommand::Restore => self.set_state("remove", "maximized_vert,maximized_horz"),
            WindowCommand::Minimize => {
                let id = self.active_window()?;
                self.xdotool.run(["windowminimize", id.as_str()])?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keysym_translation() {
        assert_eq!(keysym("win"), "super");
        assert_eq!(keysym("enter"), "Return");
        assert_eq!(keysym("f5"), "F5");
        assert_eq!(keysym("a"), "a");
        assert_eq!(keysym("fn"), "fn");
    }

    #[test]
    fn test_parse_brightness_machine_output() {
        let output = "intel_backlight,backlight,1200,50%,2400\n";
        assert_eq!(parse_brightness(output), Some(50));
        assert_eq!(parse_brightness(""), None);
        assert_eq!(parse_brightness("garbage"), None);
    }
}
