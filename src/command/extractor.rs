//! Parameter extraction for matched commands
//!
//! Each rule names a strategy (strip, capture, split, classify); the
//! extractor runs it over the normalized text and shapes the result into the
//! typed parameters the executor expects. Failures here are business errors:
//! they keep the intent's tag in the result.

use crate::command::calculator;
use crate::command::intent::{find_phrase, Extraction, Intent, IntentRule};
use crate::command::normalizer::Command;
use crate::command::table::IntentTable;
use crate::command::website::{WebTarget, WebsiteResolver};
use crate::core::config::JarvisConfig;
use crate::core::error::{JarvisError, Result};
use crate::core::types::{
    BrightnessChange, Direction, MediaKey, PowerAction, ProcessId, VolumeChange, WindowCommand,
};
use regex::Regex;
use std::cmp::Reverse;
use std::collections::HashMap;
use thiserror::Error;

/// Words in a snap command that never name a window
const SNAP_FILLER: &[&str] = &["left", "right", "window", "to", "the"];

/// A parameter the command text does not supply in usable form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("{0}")]
    InvalidParameter(String),
}

fn invalid(message: impl Into<String>) -> ExtractionFailure {
    ExtractionFailure::InvalidParameter(message.into())
}

/// Process addressed by close/kill/terminate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminateTarget {
    Pid(ProcessId),
    Name(String),
}

impl TerminateTarget {
    /// Numeric targets are process ids; anything else is a name fragment
    pub fn parse(target: &str) -> Self {
        match target.parse::<ProcessId>() {
            Ok(pid) => TerminateTarget::Pid(pid),
            Err(_) => TerminateTarget::Name(target.to_string()),
        }
    }
}

/// Typed parameters of a matched command
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    None,
    /// `None` opens the YouTube home page
    Youtube { query: Option<String> },
    Website(WebTarget),
    Search { query: String },
    Power(PowerAction),
    App { name: String },
    Process(TerminateTarget),
    Snap {
        window: Option<String>,
        direction: Direction,
    },
    Brightness(BrightnessChange),
    Media(MediaKey),
    Window(WindowCommand),
    Volume(VolumeChange),
    Folder { name: String },
    Path(String),
    Rename { from: String, to: String },
    Text(String),
    Keys(Vec<String>),
    Calculation { expression: String, value: f64 },
    FileQuery(String),
}

pub struct ParameterExtractor {
    captures: HashMap<Intent, Vec<Regex>>,
    sites: WebsiteResolver,
    default_folder: String,
}

impl ParameterExtractor {
    /// Compile the capture templates of `table`
    pub fn new(table: &IntentTable, config: &JarvisConfig) -> Result<Self> {
        let mut captures = HashMap::new();
        for rule in table.rules() {
            if let Extraction::Capture(patterns) = rule.extraction {
                let mut compiled = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    let regex = Regex::new(pattern)?;
                    if regex.captures_len() != 2 {
                        return Err(JarvisError::Config(format!(
                            "pattern '{}' for {} must have exactly one capture group",
                            pattern, rule.intent
                        )));
                    }
                    compiled.push(regex);
                }
                captures.insert(rule.intent, compiled);
            }
        }

        Ok(Self {
            captures,
            sites: WebsiteResolver::new(&config.sites),
            default_folder: config.files.default_folder_name.clone(),
        })
    }

    pub fn sites(&self) -> &WebsiteResolver {
        &self.sites
    }

    /// `extract` over the normalized text; website targets are then rebuilt
    /// from the raw command so URLs keep their casing
    pub fn extract_command(
        &self,
        rule: &IntentRule,
        command: &Command,
    ) -> std::result::Result<Params, ExtractionFailure> {
        let params = self.extract(rule, command.normalized())?;
        if let Params::Website(WebTarget::Url { site, .. }) = &params {
            if let Some(original) = command.original_of(site) {
                return Ok(Params::Website(self.sites.resolve_cased(site, &original)));
            }
        }
        Ok(params)
    }

    /// Extract the parameters of `rule` from normalized `text`
    pub fn extract(
        &self,
        rule: &IntentRule,
        text: &str,
    ) -> std::result::Result<Params, ExtractionFailure> {
        match rule.extraction {
            Extraction::None => Ok(Params::None),
            Extraction::Classify => classify(rule.intent, text),
            Extraction::Capture(_) => {
                let captured = self.capture(rule.intent, text);
                match rule.intent {
                    Intent::Youtube => Ok(Params::Youtube { query: captured }),
                    intent => self.shape(intent, captured.unwrap_or_default()),
                }
            }
            Extraction::Strip { leading, anywhere } => {
                self.shape(rule.intent, strip(text, leading, anywhere))
            }
            Extraction::Split { strip: prefixes, separator } => {
                split(&strip(text, prefixes, &[]), separator)
            }
        }
    }

    fn capture(&self, intent: Intent, text: &str) -> Option<String> {
        self.captures.get(&intent)?.iter().find_map(|regex| {
            regex
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|query| !query.is_empty())
        })
    }

    /// Turn the stripped remainder into the intent's parameters
    fn shape(&self, intent: Intent, rest: String) -> std::result::Result<Params, ExtractionFailure> {
        let required = |what: &str| {
            if rest.is_empty() {
                Err(invalid(what))
            } else {
                Ok(rest.clone())
            }
        };

        let params = match intent {
            Intent::Website => {
                let site = required("No website specified")?;
                Params::Website(self.sites.resolve(&site))
            }
            Intent::WebSearch => Params::Search {
                query: required("No search query provided")?,
            },
            Intent::Open => Params::App {
                name: required("No application specified")?,
            },
            Intent::Close | Intent::Terminate => {
                Params::Process(TerminateTarget::parse(&required("No process specified")?))
            }
            Intent::Snap => snap(&rest),
            Intent::CreateFolder => {
                let name = if rest.is_empty() {
                    self.default_folder.clone()
                } else {
                    rest
                };
                if name.contains(['/', '\\']) || name == "." || name == ".." {
                    return Err(invalid(format!("Invalid folder name: {}", name)));
                }
                Params::Folder { name }
            }
            Intent::Delete => Params::Path(required("No file specified")?),
            Intent::Type => Params::Text(required("Nothing to type")?),
            Intent::Copy => Params::Text(required("Nothing to copy")?),
            Intent::Press => {
                let keys: Vec<String> = rest
                    .split(|c: char| c == ' ' || c == '+')
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
                if keys.is_empty() {
                    return Err(invalid("No key specified"));
                }
                Params::Keys(keys)
            }
            Intent::Calculate => {
                let expression = rest.trim_end_matches('?').trim().to_string();
                let value = calculator::evaluate(&expression)
                    .map_err(|e| invalid(format!("Invalid expression: {}", e)))?;
                Params::Calculation { expression, value }
            }
            Intent::FindFiles => Params::FileQuery(required("No search term provided")?),
            _ => Params::Text(rest),
        };
        Ok(params)
    }
}

/// Remove trigger phrases, see `Extraction::Strip`
pub fn strip(text: &str, leading: &[&str], anywhere: &[&str]) -> String {
    let leading = longest_first(leading);
    let mut rest = text.trim();
    let mut stripped = false;

    'outer: loop {
        for phrase in &leading {
            if let Some(tail) = rest.strip_prefix(phrase) {
                if tail.is_empty() || tail.starts_with(' ') {
                    rest = tail.trim_start();
                    stripped = true;
                    continue 'outer;
                }
            }
        }
        break;
    }

    if stripped || anywhere.is_empty() {
        return rest.to_string();
    }
    remove_phrases(rest, anywhere)
}

fn remove_phrases(text: &str, phrases: &[&str]) -> String {
    let mut out = text.to_string();
    for phrase in longest_first(phrases) {
        while let Some(start) = find_phrase(&out, phrase, 0) {
            out.replace_range(start..start + phrase.len(), "");
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn longest_first<'a>(phrases: &[&'a str]) -> Vec<&'a str> {
    let mut sorted = phrases.to_vec();
    sorted.sort_by_key(|p| Reverse(p.len()));
    sorted
}

fn split(rest: &str, separator: &str) -> std::result::Result<Params, ExtractionFailure> {
    let parts: Vec<&str> = rest.split(separator).map(str::trim).collect();
    match parts.as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => Ok(Params::Rename {
            from: from.to_string(),
            to: to.to_string(),
        }),
        _ => Err(invalid("Usage: rename [file] to [newname]")),
    }
}

fn snap(rest: &str) -> Params {
    let words: Vec<&str> = rest.split_whitespace().collect();
    let direction = if words.contains(&"left") {
        Direction::Left
    } else {
        Direction::Right
    };
    let window = words
        .iter()
        .find(|w| !SNAP_FILLER.contains(w))
        .map(|w| w.to_string());
    Params::Snap { window, direction }
}

fn has_word(text: &str, word: &str) -> bool {
    find_phrase(text, word, 0).is_some()
}

fn classify(intent: Intent, text: &str) -> std::result::Result<Params, ExtractionFailure> {
    let params = match intent {
        Intent::Power => {
            if text.contains("restart") || text.contains("reboot") {
                Params::Power(PowerAction::Restart)
            } else {
                Params::Power(PowerAction::Shutdown)
            }
        }
        Intent::Brightness => Params::Brightness(brightness(text)?),
        Intent::Media => {
            let key = if text.contains("play") || text.contains("pause") {
                MediaKey::PlayPause
            } else if text.contains("next") || text.contains("skip") {
                MediaKey::NextTrack
            } else if text.contains("previous") || has_word(text, "back") {
                MediaKey::PreviousTrack
            } else if text.contains("stop") {
                MediaKey::Stop
            } else {
                return Err(invalid("Unknown media command"));
            };
            Params::Media(key)
        }
        Intent::Volume => {
            let change = if has_word(text, "up") || text.contains("increase") {
                VolumeChange::Up
            } else if has_word(text, "down") || text.contains("decrease") {
                VolumeChange::Down
            } else if text.contains("mute") {
                VolumeChange::Mute
            } else {
                return Err(invalid("Specify up, down, or mute"));
            };
            Params::Volume(change)
        }
        Intent::WindowState => {
            let command = if text.contains("always on top") && !text.contains("cancel") {
                WindowCommand::AlwaysOnTop
            } else if text.contains("cancel always on top") || text.contains("normal window") {
                WindowCommand::CancelAlwaysOnTop
            } else if text.contains("maximize") {
                WindowCommand::Maximize
            } else if text.contains("minimize") && !text.contains("all") {
                WindowCommand::Minimize
            } else if text.contains("restore") {
                WindowCommand::Restore
            } else {
                return Err(invalid("Unknown window command"));
            };
            Params::Window(command)
        }
        _ => Params::None,
    };
    Ok(params)
}

fn brightness(text: &str) -> std::result::Result<BrightnessChange, ExtractionFailure> {
    let change = if has_word(text, "up") || text.contains("increase") {
        BrightnessChange::Up
    } else if has_word(text, "down") || text.contains("decrease") || text.contains("lower") {
        BrightnessChange::Down
    } else if text.contains("max") {
        BrightnessChange::Max
    } else if text.contains("min") {
        BrightnessChange::Min
    } else if has_word(text, "set") {
        let level = first_number(text).ok_or_else(|| invalid("Specify a brightness level"))?;
        BrightnessChange::Set(level)
    } else {
        BrightnessChange::Query
    };
    Ok(change)
}

/// First run of digits, clamped to a percentage
fn first_number(text: &str) -> Option<u8> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(value.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::matcher::IntentMatcher;

    fn extract(text: &str) -> std::result::Result<Params, ExtractionFailure> {
        let table = IntentTable::canonical();
        let extractor = ParameterExtractor::new(&table, &JarvisConfig::default()).unwrap();
        let m = IntentMatcher::new(table).match_rule(text).unwrap();
        extractor.extract(m.rule, text)
    }

    #[test]
    fn test_youtube_templates_in_order() {
        assert_eq!(
            extract("play despacito on youtube").unwrap(),
            Params::Youtube {
                query: Some("despacito".into())
            }
        );
        assert_eq!(
            extract("search youtube for cats").unwrap(),
            Params::Youtube {
                query: Some("cats".into())
            }
        );
        assert_eq!(
            extract("open youtube and search for rust talks").unwrap(),
            Params::Youtube {
                query: Some("rust talks".into())
            }
        );
        assert_eq!(
            extract("youtube lofi beats").unwrap(),
            Params::Youtube {
                query: Some("lofi beats".into())
            }
        );
        assert_eq!(extract("youtube").unwrap(), Params::Youtube { query: None });
    }

    #[test]
    fn test_website_chain() {
        assert_eq!(
            extract("go to github").unwrap(),
            Params::Website(WebTarget::Url {
                site: "github".into(),
                url: "https://github.com".into()
            })
        );
        assert_eq!(
            extract("go to foounknownsite123").unwrap(),
            Params::Website(WebTarget::Search("foounknownsite123".into()))
        );
        assert_eq!(
            extract("go to").unwrap_err(),
            invalid("No website specified")
        );
    }

    #[test]
    fn test_website_url_keeps_raw_casing() {
        let table = IntentTable::canonical();
        let extractor = ParameterExtractor::new(&table, &JarvisConfig::default()).unwrap();
        let command = Command::new("Go to https://Example.com/CaseSensitive/Path?Q=1");
        let m = IntentMatcher::new(table)
            .match_rule(command.normalized())
            .unwrap();
        assert_eq!(
            extractor.extract_command(m.rule, &command).unwrap(),
            Params::Website(WebTarget::Url {
                site: "https://Example.com/CaseSensitive/Path?Q=1".into(),
                url: "https://Example.com/CaseSensitive/Path?Q=1".into()
            })
        );
    }

    #[test]
    fn test_search_strip_forms() {
        assert_eq!(
            extract("search google for rust lifetimes").unwrap(),
            Params::Search {
                query: "rust lifetimes".into()
            }
        );
        assert_eq!(
            extract("search for crates on google").unwrap(),
            Params::Search {
                query: "crates on".into()
            }
        );
        assert_eq!(
            extract("search google for").unwrap_err(),
            invalid("No search query provided")
        );
    }

    #[test]
    fn test_numeric_first_targets() {
        assert_eq!(
            extract("kill 4821").unwrap(),
            Params::Process(TerminateTarget::Pid(4821))
        );
        assert_eq!(
            extract("kill chrome").unwrap(),
            Params::Process(TerminateTarget::Name("chrome".into()))
        );
        assert_eq!(
            extract("terminate process 77").unwrap(),
            Params::Process(TerminateTarget::Pid(77))
        );
        assert_eq!(extract("close").unwrap_err(), invalid("No process specified"));
    }

    #[test]
    fn test_rename_split() {
        assert_eq!(
            extract("rename draft.txt to final.txt").unwrap(),
            Params::Rename {
                from: "draft.txt".into(),
                to: "final.txt".into()
            }
        );
        assert_eq!(
            extract("rename a to b to c").unwrap_err(),
            invalid("Usage: rename [file] to [newname]")
        );
    }

    #[test]
    fn test_calculation() {
        assert_eq!(
            extract("what is 2+2").unwrap(),
            Params::Calculation {
                expression: "2+2".into(),
                value: 4.0
            }
        );
        assert_eq!(
            extract("how much is 10 - 4?").unwrap(),
            Params::Calculation {
                expression: "10 - 4".into(),
                value: 6.0
            }
        );
        assert_eq!(
            extract("calculate 1/0").unwrap_err(),
            invalid("Invalid expression: Division by zero")
        );
    }

    #[test]
    fn test_folder_default_and_name() {
        assert_eq!(
            extract("new folder").unwrap(),
            Params::Folder {
                name: "New Folder".into()
            }
        );
        assert_eq!(
            extract("create folder named invoices").unwrap(),
            Params::Folder {
                name: "invoices".into()
            }
        );
        assert!(extract("create folder ../etc").is_err());
    }

    #[test]
    fn test_snap_direction_and_window() {
        assert_eq!(
            extract("snap chrome left").unwrap(),
            Params::Snap {
                window: Some("chrome".into()),
                direction: Direction::Left
            }
        );
        assert_eq!(
            extract("snap window right").unwrap(),
            Params::Snap {
                window: None,
                direction: Direction::Right
            }
        );
    }

    #[test]
    fn test_key_chords() {
        assert_eq!(
            extract("press ctrl+shift t").unwrap(),
            Params::Keys(vec!["ctrl".into(), "shift".into(), "t".into()])
        );
        assert_eq!(extract("press").unwrap_err(), invalid("No key specified"));
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            extract("restart the system").unwrap(),
            Params::Power(PowerAction::Restart)
        );
        assert_eq!(
            extract("turn off the pc").unwrap(),
            Params::Power(PowerAction::Shutdown)
        );
        assert_eq!(
            extract("set brightness to 400").unwrap(),
            Params::Brightness(BrightnessChange::Set(100))
        );
        assert_eq!(
            extract("brightness").unwrap(),
            Params::Brightness(BrightnessChange::Query)
        );
        assert_eq!(
            extract("set the brightness").unwrap_err(),
            invalid("Specify a brightness level")
        );
        assert_eq!(extract("skip").unwrap(), Params::Media(MediaKey::NextTrack));
        assert_eq!(extract("media").unwrap_err(), invalid("Unknown media command"));
        assert_eq!(
            extract("cancel always on top").unwrap(),
            Params::Window(WindowCommand::CancelAlwaysOnTop)
        );
        assert_eq!(
            extract("mute the sound").unwrap(),
            Params::Volume(VolumeChange::Mute)
        );
        assert_eq!(
            extract("sound check").unwrap_err(),
            invalid("Specify up, down, or mute")
        );
    }

    #[test]
    fn test_strip_helpers() {
        assert_eq!(strip("open notepad", &["open"], &[]), "notepad");
        assert_eq!(strip("opener", &["open"], &[]), "opener");
        assert_eq!(strip("please go to github", &["go to"], &["go to"]), "please github");
        assert_eq!(strip("kill kill 5", &["kill"], &[]), "5");
    }

    #[test]
    fn test_multi_group_pattern_rejected() {
        use crate::command::intent::Guard;
        static BAD: &[IntentRule] = &[IntentRule {
            intent: Intent::Youtube,
            guard: Guard::Contains("youtube"),
            exclusions: &[],
            extraction: Extraction::Capture(&[r"(a)(b)"]),
            samples: &[],
        }];
        let result = ParameterExtractor::new(&IntentTable::from_rules(BAD), &JarvisConfig::default());
        assert!(matches!(result, Err(JarvisError::Config(_))));
    }
}
