//! Intents and the declarative pieces an intent rule is built from
//!
//! Guards and extraction strategies are plain data so that every row of the
//! rule table can be printed, compared and tested on its own.

use serde::Serialize;
use std::fmt;

/// Classification of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Youtube,
    Website,
    WebSearch,
    AbortShutdown,
    Power,
    Open,
    Close,
    MinimizeAll,
    Snap,
    Brightness,
    Media,
    Lock,
    EmptyRecycleBin,
    WindowState,
    CreateFolder,
    Delete,
    Rename,
    Type,
    Press,
    Calculate,
    Joke,
    Weather,
    ListProcesses,
    Terminate,
    Time,
    Network,
    SystemInfo,
    Copy,
    Paste,
    FindFiles,
    Volume,
    Screenshot,
    Sleep,
    Greeting,
    /// Nothing in the table matched
    Unknown,
}

impl Intent {
    /// Action tag reported in results.
    ///
    /// Several intents share a tag. Close and Terminate report `kill` instead
    /// when their target turns out to be a process id.
    pub fn tag(&self) -> &'static str {
        match self {
            Intent::Youtube => "youtube",
            Intent::Website => "website",
            Intent::WebSearch | Intent::FindFiles => "search",
            Intent::AbortShutdown | Intent::Power | Intent::Sleep => "power",
            Intent::Open => "open",
            Intent::Close => "close",
            Intent::MinimizeAll => "minimize_all",
            Intent::Snap => "snap",
            Intent::Brightness => "brightness",
            Intent::Media => "media",
            Intent::Lock => "lock",
            Intent::EmptyRecycleBin => "recycle",
            Intent::WindowState => "window",
            Intent::CreateFolder => "folder",
            Intent::Delete => "delete",
            Intent::Rename => "rename",
            Intent::Type => "type",
            Intent::Press => "keypress",
            Intent::Calculate => "calculate",
            Intent::Joke => "joke",
            Intent::Weather => "weather",
            Intent::ListProcesses => "processes",
            Intent::Terminate => "kill",
            Intent::Time => "time",
            Intent::Network => "network",
            Intent::SystemInfo => "system_info",
            Intent::Copy | Intent::Paste => "clipboard",
            Intent::Volume => "volume",
            Intent::Screenshot => "screenshot",
            Intent::Greeting => "greeting",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Predicate over normalized command text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Substring anywhere
    Contains(&'static str),
    /// The text begins with this phrase, ending at a word boundary
    StartsWith(&'static str),
    /// The phrase appears as a whole run of words
    Word(&'static str),
    /// The first word is exactly this
    FirstWord(&'static str),
    /// The whole text is exactly this
    Equals(&'static str),
    /// At least one of these characters appears
    AnyCharOf(&'static str),
    Any(&'static [Guard]),
    All(&'static [Guard]),
}

impl Guard {
    pub fn holds(&self, text: &str) -> bool {
        match self {
            Guard::Contains(needle) => text.contains(needle),
            Guard::StartsWith(prefix) => starts_with_phrase(text, prefix),
            Guard::Word(phrase) => contains_phrase(text, phrase),
            Guard::FirstWord(word) => text.split(' ').next() == Some(*word),
            Guard::Equals(whole) => text == *whole,
            Guard::AnyCharOf(chars) => text.chars().any(|c| chars.contains(c)),
            Guard::Any(guards) => guards.iter().any(|g| g.holds(text)),
            Guard::All(guards) => guards.iter().all(|g| g.holds(text)),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Contains(s) => write!(f, "contains {:?}", s),
            Guard::StartsWith(s) => write!(f, "starts with {:?}", s),
            Guard::Word(s) => write!(f, "word {:?}", s),
            Guard::FirstWord(s) => write!(f, "first word {:?}", s),
            Guard::Equals(s) => write!(f, "equals {:?}", s),
            Guard::AnyCharOf(s) => write!(f, "any of {:?}", s),
            Guard::Any(guards) => write_joined(f, guards, "or"),
            Guard::All(guards) => write_joined(f, guards, "and"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, guards: &[Guard], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, g) in guards.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", g)?;
    }
    write!(f, ")")
}

/// How the parameters of a matched command are pulled out of its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The intent takes no parameters
    None,
    /// Read flags from the whole text (up/down, restart/shutdown, ...)
    Classify,
    /// Remove trigger phrases and keep the remainder verbatim.
    ///
    /// `leading` phrases are removed repeatedly from the start, longest first.
    /// When none of them led the text, every occurrence of an `anywhere`
    /// phrase is removed instead.
    Strip {
        leading: &'static [&'static str],
        anywhere: &'static [&'static str],
    },
    /// Regex templates with one capture group, tried in order
    Capture(&'static [&'static str]),
    /// Remove leading trigger phrases, then split the rest in two
    Split {
        strip: &'static [&'static str],
        separator: &'static str,
    },
}

/// A row of the intent table
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub guard: Guard,
    /// Any exclusion holding suppresses the match
    pub exclusions: &'static [Guard],
    pub extraction: Extraction,
    /// Phrases that must route to this row
    pub samples: &'static [&'static str],
}

impl IntentRule {
    pub fn matches(&self, text: &str) -> bool {
        self.guard.holds(text) && !self.exclusions.iter().any(|e| e.holds(text))
    }
}

fn starts_with_phrase(text: &str, phrase: &str) -> bool {
    text.strip_prefix(phrase)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

/// True when `phrase` occurs in `text` as whole words
pub(crate) fn contains_phrase(text: &str, phrase: &str) -> bool {
    find_phrase(text, phrase, 0).is_some()
}

/// Byte offset of the first whole-word occurrence of `phrase` at or after `from`
pub(crate) fn find_phrase(text: &str, phrase: &str, from: usize) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    let mut search = from;
    while let Some(offset) = text.get(search..).and_then(|rest| rest.find(phrase)) {
        let start = search + offset;
        let end = start + phrase.len();
        let left_ok = start == 0 || text[..start].ends_with(' ');
        let right_ok = end == text.len() || text[end..].starts_with(' ');
        if left_ok && right_ok {
            return Some(start);
        }
        search = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}
