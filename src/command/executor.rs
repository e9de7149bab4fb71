//! Command execution - turns an intent and its parameters into capability calls
//!
//! Handlers return `Ok` for every outcome they can describe themselves,
//! including business failures such as "no process matched". Only failures
//! raised by a capability travel back as `Err` and get wrapped by the
//! dispatcher.

use crate::capability::{CapResult, Capabilities, CapabilityError};
use crate::command::calculator::{format_number, number_json};
use crate::command::catalog::AppCatalog;
use crate::command::extractor::{Params, TerminateTarget};
use crate::command::intent::Intent;
use crate::command::result::ActionResult;
use crate::command::website::{google_search_url, youtube_search_url, WebTarget, YOUTUBE_HOME};
use crate::core::config::JarvisConfig;
use crate::core::types::{
    BrightnessChange, Direction, OsFamily, PowerAction, ProcessId, VolumeChange,
};
use rand::seq::SliceRandom;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "I would tell you a UDP joke, but you might not get it.",
    "There are 10 types of people in the world: those who understand binary, and those who don't.",
    "Why did the PowerPoint Presentation cross the road? To get to the other slide.",
    "I'm reading a book on anti-gravity. It's impossible to put down.",
    "Why do Java developers wear glasses? Because they don't C#.",
];

const WEATHER_NOT_CONFIGURED: &str =
    "Weather API not configured. Add OpenWeatherMap API key to enable.";

/// Process rows shown by "list processes"
const TOP_PROCESSES: usize = 10;

/// Executes matched commands against the capability registry
pub struct CommandExecutor {
    caps: Capabilities,
    config: JarvisConfig,
    apps: AppCatalog,
}

impl CommandExecutor {
    pub fn new(caps: Capabilities, config: JarvisConfig) -> Self {
        let apps = AppCatalog::new(OsFamily::current(), &config.apps);
        Self { caps, config, apps }
    }

    pub fn config(&self) -> &JarvisConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Run one matched command
    pub fn execute(&self, intent: Intent, params: Params) -> CapResult<ActionResult> {
        let tag = intent.tag();
        match (intent, params) {
            (Intent::Youtube, Params::Youtube { query }) => self.youtube(query),
            (Intent::Website, Params::Website(target)) => self.website(target),
            (Intent::WebSearch, Params::Search { query }) => self.web_search(&query),
            (Intent::AbortShutdown, _) => {
                self.caps.power.abort()?;
                Ok(ActionResult::ok(tag, "Shutdown aborted"))
            }
            (Intent::Power, Params::Power(action)) => self.schedule_power(action),
            (Intent::Open, Params::App { name }) => self.open(&name),
            (Intent::Close | Intent::Terminate, Params::Process(target)) => {
                self.terminate(intent, target)
            }
            (Intent::MinimizeAll, _) => {
                self.caps.windows.minimize_all()?;
                Ok(ActionResult::ok(tag, "All windows minimized"))
            }
            (Intent::Snap, Params::Snap { window, direction }) => {
                self.snap(window.as_deref(), direction)
            }
            (Intent::Brightness, Params::Brightness(change)) => self.brightness(change),
            (Intent::Media, Params::Media(key)) => {
                self.caps.input.media_key(key)?;
                Ok(ActionResult::ok(tag, key.describe()))
            }
            (Intent::Lock, _) => {
                self.caps.power.lock()?;
                Ok(ActionResult::ok(tag, "System locked"))
            }
            (Intent::EmptyRecycleBin, _) => {
                self.caps.files.empty_trash()?;
                Ok(ActionResult::ok(tag, "Recycle bin emptied"))
            }
            (Intent::WindowState, Params::Window(command)) => {
                self.caps.windows.apply(command)?;
                Ok(ActionResult::ok(tag, command.describe()))
            }
            (Intent::CreateFolder, Params::Folder { name }) => self.create_folder(&name),
            (Intent::Delete, Params::Path(path)) => self.delete(&path),
            (Intent::Rename, Params::Rename { from, to }) => self.rename(&from, &to),
            (Intent::Type, Params::Text(text)) => {
                let interval = Duration::from_millis(self.config.input.typing_interval_ms);
                self.caps.input.type_text(&text, interval)?;
                Ok(ActionResult::ok(tag, format!("Typed: {}", text)))
            }
            (Intent::Press, Params::Keys(keys)) => {
                self.caps.input.press_keys(&keys)?;
                Ok(ActionResult::ok(tag, format!("Pressed {}", keys.join(" "))))
            }
            (Intent::Calculate, Params::Calculation { expression, value }) => Ok(
                ActionResult::ok(tag, format!("{} = {}", expression, format_number(value)))
                    .with_data(json!({
                        "result": number_json(value),
                        "expression": expression,
                    })),
            ),
            (Intent::Joke, _) => {
                let joke = JOKES
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(JOKES[0]);
                Ok(ActionResult::ok(tag, joke))
            }
            (Intent::Weather, _) => Ok(ActionResult::ok(tag, WEATHER_NOT_CONFIGURED)),
            (Intent::ListProcesses, _) => self.list_processes(),
            (Intent::Time, _) => Ok(current_time()),
            (Intent::Network, _) => {
                let ips = self.caps.system.ip_addresses()?;
                let shown: Vec<&str> = ips.iter().take(2).map(String::as_str).collect();
                Ok(
                    ActionResult::ok(tag, format!("IP Addresses: {}", shown.join(", ")))
                        .with_data(json!({ "ips": ips })),
                )
            }
            (Intent::SystemInfo, _) => self.system_info(),
            (Intent::Copy, Params::Text(text)) => {
                self.caps.clipboard.write_text(&text)?;
                Ok(ActionResult::ok(tag, format!("Copied: {}", text))
                    .with_data(json!({ "text": text })))
            }
            (Intent::Paste, _) => {
                self.caps
                    .input
                    .press_keys(&["ctrl".to_string(), "v".to_string()])?;
                let result = ActionResult::ok(tag, "Pasted from clipboard");
                Ok(match self.caps.clipboard.read_text() {
                    Ok(text) => result.with_data(json!({ "text": text })),
                    Err(_) => result,
                })
            }
            (Intent::FindFiles, Params::FileQuery(query)) => self.find_files(&query),
            (Intent::Volume, Params::Volume(change)) => self.volume(change),
            (Intent::Screenshot, _) => self.screenshot(),
            (Intent::Sleep, _) => {
                self.caps.power.sleep()?;
                Ok(ActionResult::ok(tag, "System sleeping"))
            }
            (Intent::Greeting, _) => Ok(ActionResult::ok(tag, "Hello sir. Systems operational.")),
            (intent, params) => {
                tracing::warn!("No handler for {} with {:?}", intent, params);
                Ok(ActionResult::fail(tag, "Unsupported parameters for this command"))
            }
        }
    }

    fn youtube(&self, query: Option<String>) -> CapResult<ActionResult> {
        match query {
            Some(query) => {
                let url = youtube_search_url(&query);
                self.caps.browser.open_url(&url)?;
                Ok(ActionResult::ok(
                    "youtube",
                    format!("Opening YouTube search for: '{}'", query),
                )
                .with_data(json!({ "query": query, "url": url })))
            }
            None => {
                self.caps.browser.open_url(YOUTUBE_HOME)?;
                Ok(ActionResult::ok("youtube", "YouTube opened"))
            }
        }
    }

    fn website(&self, target: WebTarget) -> CapResult<ActionResult> {
        match target {
            WebTarget::Url { site, url } => {
                self.caps.browser.open_url(&url)?;
                Ok(ActionResult::ok("website", format!("Opening {}", site))
                    .with_data(json!({ "site": site, "url": url })))
            }
            WebTarget::Search(query) => self.web_search(&query),
        }
    }

    fn web_search(&self, query: &str) -> CapResult<ActionResult> {
        if query.is_empty() {
            return Ok(ActionResult::fail("search", "No search query provided"));
        }
        let url = google_search_url(query);
        self.caps.browser.open_url(&url)?;
        Ok(
            ActionResult::ok("search", format!("Searching Google for: '{}'", query))
                .with_data(json!({ "query": query, "url": url })),
        )
    }

    fn schedule_power(&self, action: PowerAction) -> CapResult<ActionResult> {
        let secs = self.config.power.shutdown_delay_secs;
        self.caps.power.schedule(action, Duration::from_secs(secs))?;
        let message = match action {
            PowerAction::Restart => format!("Restarting in {} seconds...", secs),
            PowerAction::Shutdown => format!(
                "Shutting down in {} seconds... Say 'abort shutdown' to cancel",
                secs
            ),
        };
        Ok(ActionResult::ok("power", message)
            .with_data(json!({ "action": action, "delay_secs": secs })))
    }

    fn open(&self, name: &str) -> CapResult<ActionResult> {
        match self.apps.resolve(name) {
            Some(program) => {
                self.caps.processes.launch(program)?;
                Ok(ActionResult::ok("open", format!("Opened {}", name))
                    .with_data(json!({ "app": name, "program": program })))
            }
            None => {
                self.caps.processes.launch(name)?;
                Ok(ActionResult::ok("open", format!("Executing {}", name))
                    .with_data(json!({ "app": name })))
            }
        }
    }

    fn terminate(&self, intent: Intent, target: TerminateTarget) -> CapResult<ActionResult> {
        match target {
            TerminateTarget::Pid(pid) => self.terminate_pid(pid),
            TerminateTarget::Name(name) => {
                let closed = self.caps.processes.terminate_by_name(&name)?;
                let result = match (intent, closed.is_empty()) {
                    (Intent::Close, true) => ActionResult::fail(
                        "close",
                        format!("No process matching '{}' found", name),
                    ),
                    (Intent::Close, false) => {
                        ActionResult::ok("close", format!("Closed {}", closed.join(", ")))
                    }
                    (_, true) => ActionResult::fail("kill", "Process not found"),
                    (_, false) => {
                        ActionResult::ok("kill", format!("Killed: {}", closed.join(", ")))
                    }
                };
                Ok(if closed.is_empty() {
                    result
                } else {
                    result.with_data(json!(closed))
                })
            }
        }
    }

    fn terminate_pid(&self, pid: ProcessId) -> CapResult<ActionResult> {
        match self.caps.processes.terminate_pid(pid) {
            Ok(()) => Ok(ActionResult::ok("kill", format!("Killed process {}", pid))
                .with_data(json!({ "pid": pid }))),
            Err(CapabilityError::NotFound(_)) => Ok(ActionResult::fail(
                "kill",
                format!("No process with PID {}", pid),
            )),
            Err(err) => Err(err),
        }
    }

    fn snap(&self, window: Option<&str>, direction: Direction) -> CapResult<ActionResult> {
        match self.caps.windows.snap(window, direction) {
            Ok(title) => Ok(ActionResult::ok(
                "snap",
                format!("Snapped {} to {}", title, direction.as_str()),
            )
            .with_data(json!({ "direction": direction, "window": title }))),
            Err(CapabilityError::NotFound(_)) => Ok(ActionResult::fail(
                "snap",
                format!("Window '{}' not found", window.unwrap_or("active window")),
            )),
            Err(err) => Err(err),
        }
    }

    fn brightness(&self, change: BrightnessChange) -> CapResult<ActionResult> {
        let level = self
            .caps
            .input
            .brightness(change, self.config.input.brightness_step)?;
        let message = match (change, level) {
            (BrightnessChange::Up, Some(l)) => format!("Brightness increased to {}%", l),
            (BrightnessChange::Up, None) => "Brightness increased".to_string(),
            (BrightnessChange::Down, Some(l)) => format!("Brightness decreased to {}%", l),
            (BrightnessChange::Down, None) => "Brightness decreased".to_string(),
            (BrightnessChange::Max, _) => "Brightness set to maximum".to_string(),
            (BrightnessChange::Min, _) => "Brightness set to minimum".to_string(),
            (BrightnessChange::Set(n), _) => format!("Brightness set to {}%", n),
            (BrightnessChange::Query, Some(l)) => format!("Current brightness: {}%", l),
            (BrightnessChange::Query, None) => {
                return Ok(ActionResult::fail(
                    "brightness",
                    "Current brightness could not be read",
                ))
            }
        };
        let result = ActionResult::ok("brightness", message);
        Ok(match level {
            Some(level) => result.with_data(json!({ "level": level })),
            None => result,
        })
    }

    fn volume(&self, change: VolumeChange) -> CapResult<ActionResult> {
        let presses = match change {
            VolumeChange::Mute => 1,
            _ => self.config.input.volume_step_presses,
        };
        self.caps.input.volume(change, presses)?;
        let message = match change {
            VolumeChange::Up => "Volume increased",
            VolumeChange::Down => "Volume decreased",
            VolumeChange::Mute => "Volume muted",
        };
        Ok(ActionResult::ok("volume", message))
    }

    /// A bare name inside the base directory, else the text as a path
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let in_base = self.config.files.base_dir.join(name);
        if self.caps.files.exists(&in_base) {
            return Some(in_base);
        }
        let literal = PathBuf::from(name);
        self.caps.files.exists(&literal).then_some(literal)
    }

    fn create_folder(&self, name: &str) -> CapResult<ActionResult> {
        let path = self.config.files.base_dir.join(name);
        self.caps.files.create_dir(&path)?;
        Ok(ActionResult::ok("folder", format!("Created folder: {}", name))
            .with_data(json!({ "path": path.display().to_string() })))
    }

    fn delete(&self, name: &str) -> CapResult<ActionResult> {
        let Some(path) = self.locate(name) else {
            return Ok(ActionResult::fail("delete", "File not found"));
        };
        self.caps.files.delete(&path)?;
        Ok(ActionResult::ok("delete", format!("Deleted: {}", display_name(&path)))
            .with_data(json!({ "path": path.display().to_string() })))
    }

    fn rename(&self, from: &str, to: &str) -> CapResult<ActionResult> {
        let Some(old) = self.locate(from) else {
            return Ok(ActionResult::fail("rename", format!("File not found: {}", from)));
        };
        let new = old.with_file_name(to);
        self.caps.files.rename(&old, &new)?;
        Ok(ActionResult::ok("rename", format!("Renamed to {}", to))
            .with_data(json!({
                "from": old.display().to_string(),
                "to": new.display().to_string(),
            })))
    }

    fn find_files(&self, query: &str) -> CapResult<ActionResult> {
        let files = &self.config.files;
        let matches = self
            .caps
            .files
            .search(&files.search_roots, query, files.scan_limit)?;
        if matches.is_empty() {
            return Ok(
                ActionResult::ok(Intent::FindFiles.tag(), "No files found").with_data(json!([])),
            );
        }
        let shown: Vec<String> = matches
            .iter()
            .take(files.max_results)
            .map(|p| p.display().to_string())
            .collect();
        Ok(
            ActionResult::ok(Intent::FindFiles.tag(), format!("Found {} matches", matches.len()))
                .with_data(json!(shown)),
        )
    }

    fn list_processes(&self) -> CapResult<ActionResult> {
        let processes = self.caps.processes.list()?;
        let mut top: Vec<String> = processes
            .iter()
            .take(TOP_PROCESSES)
            .map(|p| format!("{} (PID: {})", p.name, p.pid))
            .collect();
        if top.is_empty() {
            top.push("No active processes found".to_string());
        }
        Ok(
            ActionResult::ok("processes", format!("Top processes: {}", top.join(", ")))
                .with_data(json!(top)),
        )
    }

    fn system_info(&self) -> CapResult<ActionResult> {
        let stats = self.caps.system.stats()?;
        let cpu = format!("{:.1}%", stats.cpu_percent);
        let memory = format!(
            "{:.1}% ({}MB/{}MB)",
            stats.memory_percent, stats.memory_used_mb, stats.memory_total_mb
        );
        let disk = format!("{:.1}%", stats.disk_percent);
        Ok(ActionResult::ok(
            "system_info",
            format!("CPU: {}, RAM: {}, Disk: {}", cpu, memory, disk),
        )
        .with_data(json!({ "cpu": cpu, "memory": memory, "disk": disk })))
    }

    fn screenshot(&self) -> CapResult<ActionResult> {
        let shots = &self.config.screenshot;
        let filename = format!(
            "{}_{}.png",
            shots.prefix,
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = shots.directory.join(&filename);
        self.caps.screen.capture(&path)?;
        Ok(ActionResult::ok("screenshot", format!("Screenshot saved: {}", filename))
            .with_data(json!({ "path": path.display().to_string() })))
    }
}

fn current_time() -> ActionResult {
    let now = chrono::Local::now();
    let time = now.format("%I:%M %p").to_string();
    let date = now.format("%A, %B %d, %Y").to_string();
    ActionResult::ok("time", format!("It is {} on {}", time, date))
        .with_data(json!({ "time": time, "date": date }))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor() -> CommandExecutor {
        CommandExecutor::new(Capabilities::unsupported(), JarvisConfig::default())
    }

    #[test]
    fn test_pure_intents_need_no_capabilities() {
        let exec = executor();
        let greeting = exec.execute(Intent::Greeting, Params::None).unwrap();
        assert!(greeting.success);
        assert_eq!(greeting.message, "Hello sir. Systems operational.");

        let joke = exec.execute(Intent::Joke, Params::None).unwrap();
        assert!(JOKES.contains(&joke.message.as_str()));

        let weather = exec.execute(Intent::Weather, Params::None).unwrap();
        assert!(weather.success);
        assert_eq!(weather.action(), Some("weather"));
    }

    #[test]
    fn test_calculation_reports_integer() {
        let result = executor()
            .execute(
                Intent::Calculate,
                Params::Calculation {
                    expression: "2+2".into(),
                    value: 4.0,
                },
            )
            .unwrap();
        assert_eq!(result.message, "2+2 = 4");
        let data = result.data.unwrap();
        assert_eq!(data["result"], json!(4));
        assert_eq!(data["expression"], json!("2+2"));
    }

    #[test]
    fn test_time_format() {
        let result = current_time();
        assert!(result.message.starts_with("It is "));
        let data = result.data.unwrap();
        let time = data["time"].as_str().unwrap();
        assert!(time.ends_with("AM") || time.ends_with("PM"));
    }

    #[test]
    fn test_unavailable_capability_propagates() {
        let err = executor()
            .execute(Intent::Lock, Params::None)
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("PowerController"));
    }

    #[test]
    fn test_mismatched_params_fail_with_tag() {
        let result = executor().execute(Intent::Media, Params::None).unwrap();
        assert!(!result.success);
        assert_eq!(result.action(), Some("media"));
    }
}
