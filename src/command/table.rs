//! The ordered intent table
//!
//! Rows are evaluated top to bottom and the first match wins, so position
//! carries meaning. Several orderings are load-bearing:
//!
//! * youtube phrasing sits above open/start/launch and the media keys
//! * power sits above open/start/launch ("restart" contains "start")
//! * abort sits above the generic shutdown row, which also excludes it
//! * snap sits above window state, which also excludes it
//!
//! Every row carries sample phrases; `IntentTable::validate` checks that
//! each sample still routes to its own row.

use crate::command::intent::{Extraction, Guard, Intent, IntentRule};
use crate::core::error::{JarvisError, Result};

const DIGITS: &str = "0123456789";
const OPERATORS: &str = "+-*/";

static CANONICAL: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Youtube,
        guard: Guard::Any(&[
            Guard::Contains("youtube"),
            Guard::All(&[
                Guard::Contains("play"),
                Guard::Any(&[
                    Guard::Contains("video"),
                    Guard::Contains("song"),
                    Guard::Contains("music"),
                ]),
            ]),
        ]),
        exclusions: &[],
        extraction: Extraction::Capture(&[
            r"play\s+(.+?)\s+on\s+youtube",
            r"play\s+(.+?)\s+youtube",
            r"search\s+youtube\s+for\s+(.+)",
            r"youtube\s+search\s+for\s+(.+)",
            r"find\s+(.+?)\s+on\s+youtube",
            r"open\s+youtube\s+and\s+(?:search\s+for\s+)?(.+)",
            r"youtube\s+(.+)",
        ]),
        samples: &[
            "play despacito on youtube",
            "search youtube for cats",
            "youtube lofi beats",
            "play a relaxing song",
        ],
    },
    IntentRule {
        intent: Intent::Website,
        guard: Guard::Any(&[Guard::Word("go to"), Guard::Word("visit")]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["open website", "go to", "visit"],
            anywhere: &["open website", "go to", "visit"],
        },
        samples: &["go to github", "visit example.com", "go to https://docs.rs"],
    },
    IntentRule {
        intent: Intent::WebSearch,
        guard: Guard::Any(&[
            Guard::StartsWith("search google for"),
            Guard::StartsWith("google search"),
            Guard::All(&[Guard::Contains("search"), Guard::Contains("google")]),
        ]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["search google for", "google search for", "google search"],
            anywhere: &["search", "google", "for"],
        },
        samples: &[
            "search google for rust lifetimes",
            "google search borrow checker",
            "search rust traits on google",
        ],
    },
    IntentRule {
        intent: Intent::AbortShutdown,
        guard: Guard::Any(&[Guard::Contains("abort"), Guard::Contains("cancel shutdown")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["abort shutdown", "cancel shutdown", "abort restart"],
    },
    IntentRule {
        intent: Intent::Power,
        guard: Guard::Any(&[
            Guard::Contains("shutdown"),
            Guard::Contains("shut down"),
            Guard::Contains("restart"),
            Guard::Contains("reboot"),
            Guard::All(&[
                Guard::Contains("turn off"),
                Guard::Any(&[
                    Guard::Contains("computer"),
                    Guard::Contains("pc"),
                    Guard::Contains("system"),
                ]),
            ]),
        ]),
        exclusions: &[Guard::Contains("abort"), Guard::Contains("cancel shutdown")],
        extraction: Extraction::Classify,
        samples: &[
            "restart the system",
            "shutdown",
            "shut down the computer",
            "reboot now",
            "turn off the pc",
        ],
    },
    IntentRule {
        intent: Intent::Open,
        guard: Guard::Any(&[
            Guard::Contains("open"),
            Guard::Contains("start"),
            Guard::Contains("launch"),
        ]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["open", "start", "launch"],
            anywhere: &[],
        },
        samples: &["open notepad", "launch firefox", "start chrome"],
    },
    IntentRule {
        intent: Intent::Close,
        guard: Guard::Any(&[
            Guard::StartsWith("close"),
            Guard::StartsWith("kill"),
            Guard::StartsWith("exit"),
        ]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["close", "kill", "exit"],
            anywhere: &[],
        },
        samples: &["close notepad", "kill 4821", "kill chrome", "exit spotify"],
    },
    IntentRule {
        intent: Intent::MinimizeAll,
        guard: Guard::Any(&[Guard::Contains("minimize all"), Guard::Contains("show desktop")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["minimize all", "minimize all windows", "show desktop"],
    },
    IntentRule {
        intent: Intent::Snap,
        guard: Guard::Contains("snap"),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["snap"],
            anywhere: &["snap"],
        },
        samples: &["snap chrome left", "snap window right", "snap left"],
    },
    IntentRule {
        intent: Intent::Brightness,
        guard: Guard::Contains("brightness"),
        exclusions: &[],
        extraction: Extraction::Classify,
        samples: &["brightness up", "set brightness to 40", "lower the brightness"],
    },
    IntentRule {
        intent: Intent::Media,
        guard: Guard::Any(&[
            Guard::Contains("play"),
            Guard::Contains("pause"),
            Guard::Contains("music"),
            Guard::Contains("media"),
            Guard::Contains("skip"),
            Guard::Contains("next track"),
            Guard::Contains("previous track"),
        ]),
        exclusions: &[Guard::Contains("youtube")],
        extraction: Extraction::Classify,
        samples: &["pause", "next track", "previous track", "skip", "stop the music"],
    },
    IntentRule {
        intent: Intent::Lock,
        guard: Guard::All(&[Guard::Contains("lock"), Guard::Contains("system")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["lock the system", "lock system"],
    },
    IntentRule {
        intent: Intent::EmptyRecycleBin,
        guard: Guard::Any(&[
            Guard::Contains("empty recycle"),
            Guard::Contains("empty bin"),
            Guard::Contains("empty trash"),
        ]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["empty recycle bin", "empty bin", "empty trash"],
    },
    IntentRule {
        intent: Intent::WindowState,
        guard: Guard::Any(&[
            Guard::Contains("always on top"),
            Guard::Contains("maximize window"),
            Guard::Contains("minimize window"),
            Guard::Contains("restore window"),
            Guard::Contains("normal window"),
        ]),
        exclusions: &[Guard::Contains("snap")],
        extraction: Extraction::Classify,
        samples: &[
            "always on top",
            "cancel always on top",
            "maximize window",
            "minimize window",
            "restore window",
            "normal window",
        ],
    },
    IntentRule {
        intent: Intent::CreateFolder,
        guard: Guard::Any(&[Guard::Contains("create folder"), Guard::Contains("new folder")]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &[
                "create a new folder",
                "create new folder",
                "create folder",
                "new folder",
                "named",
                "called",
            ],
            anywhere: &["create folder", "new folder"],
        },
        samples: &["create folder projects", "new folder", "create folder named invoices"],
    },
    IntentRule {
        intent: Intent::Delete,
        guard: Guard::Any(&[Guard::StartsWith("delete"), Guard::StartsWith("remove")]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["delete", "remove"],
            anywhere: &[],
        },
        samples: &["delete notes.txt", "remove old.log"],
    },
    IntentRule {
        intent: Intent::Rename,
        guard: Guard::All(&[Guard::Contains("rename"), Guard::Contains(" to ")]),
        exclusions: &[],
        extraction: Extraction::Split {
            strip: &["rename"],
            separator: " to ",
        },
        samples: &["rename draft.txt to final.txt", "rename report to summary"],
    },
    IntentRule {
        intent: Intent::Type,
        guard: Guard::Any(&[Guard::StartsWith("type"), Guard::StartsWith("write")]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["type", "write"],
            anywhere: &[],
        },
        samples: &["type hello world", "write a short note"],
    },
    IntentRule {
        intent: Intent::Press,
        guard: Guard::Any(&[Guard::StartsWith("press"), Guard::StartsWith("hit")]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["press", "hit"],
            anywhere: &[],
        },
        samples: &["press enter", "hit ctrl c", "press alt tab"],
    },
    IntentRule {
        intent: Intent::Calculate,
        guard: Guard::Any(&[
            Guard::Contains("calculate"),
            Guard::Contains("compute"),
            Guard::All(&[
                Guard::Any(&[Guard::Contains("what is"), Guard::Contains("how much")]),
                Guard::AnyCharOf(DIGITS),
                Guard::AnyCharOf(OPERATORS),
            ]),
        ]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["calculate", "compute", "what is", "how much is", "how much"],
            anywhere: &["calculate", "compute", "what is", "how much is", "how much"],
        },
        samples: &["what is 2+2", "calculate 3 * 4", "how much is 10 - 4?", "compute (1+2)/3"],
    },
    IntentRule {
        intent: Intent::Joke,
        guard: Guard::Contains("joke"),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["tell me a joke"],
    },
    IntentRule {
        intent: Intent::Weather,
        guard: Guard::Contains("weather"),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["what's the weather", "weather today"],
    },
    IntentRule {
        intent: Intent::ListProcesses,
        guard: Guard::Any(&[Guard::Contains("list processes"), Guard::Contains("running apps")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["list processes", "show running apps"],
    },
    IntentRule {
        intent: Intent::Terminate,
        guard: Guard::StartsWith("terminate"),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["terminate", "kill", "process"],
            anywhere: &[],
        },
        samples: &["terminate 1234", "terminate firefox"],
    },
    IntentRule {
        intent: Intent::Time,
        guard: Guard::Contains("time"),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["what time is it", "time"],
    },
    IntentRule {
        intent: Intent::Network,
        guard: Guard::Any(&[Guard::Word("ip"), Guard::Contains("network")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["what is my ip", "network status"],
    },
    IntentRule {
        intent: Intent::SystemInfo,
        guard: Guard::Contains("system info"),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["system info", "show system info"],
    },
    IntentRule {
        intent: Intent::Copy,
        guard: Guard::FirstWord("copy"),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["copy"],
            anywhere: &[],
        },
        samples: &["copy hello there"],
    },
    IntentRule {
        intent: Intent::Paste,
        guard: Guard::Contains("paste"),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["paste", "paste it here"],
    },
    IntentRule {
        intent: Intent::FindFiles,
        guard: Guard::Any(&[Guard::Contains("find"), Guard::Contains("search file")]),
        exclusions: &[],
        extraction: Extraction::Strip {
            leading: &["search files for", "search file", "find files", "find file", "find"],
            anywhere: &["search file", "find"],
        },
        samples: &["find report", "search file budget", "find file invoice"],
    },
    IntentRule {
        intent: Intent::Volume,
        guard: Guard::Any(&[Guard::Contains("volume"), Guard::Contains("sound")]),
        exclusions: &[],
        extraction: Extraction::Classify,
        samples: &["volume up", "mute the sound", "volume down"],
    },
    IntentRule {
        intent: Intent::Screenshot,
        guard: Guard::Contains("screenshot"),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["take a screenshot", "screenshot"],
    },
    IntentRule {
        intent: Intent::Sleep,
        guard: Guard::Any(&[Guard::Contains("sleep"), Guard::Contains("standby")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["sleep", "standby"],
    },
    IntentRule {
        intent: Intent::Greeting,
        guard: Guard::Any(&[Guard::Equals("hello"), Guard::Equals("hi"), Guard::Equals("hey")]),
        exclusions: &[],
        extraction: Extraction::None,
        samples: &["hello", "hi", "hey"],
    },
];

/// An ordered, immutable set of intent rules
#[derive(Debug, Clone, Copy)]
pub struct IntentTable {
    rules: &'static [IntentRule],
}

impl IntentTable {
    pub fn canonical() -> Self {
        Self { rules: CANONICAL }
    }

    /// Build a table from custom rules; order is match priority
    pub fn from_rules(rules: &'static [IntentRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [IntentRule] {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First row matching `text`, with its rank (1-based)
    pub fn first_match(&self, text: &str) -> Option<(usize, &'static IntentRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(text))
            .map(|(i, rule)| (i + 1, rule))
    }

    /// Check that every sample phrase routes to the row that declares it
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            for sample in rule.samples {
                let actual = match self.first_match(sample) {
                    Some((rank, _)) if rank == index + 1 => continue,
                    Some((rank, hit)) => format!("{} (rank {})", hit.intent, rank),
                    None => Intent::Unknown.to_string(),
                };
                return Err(JarvisError::RuleConflict {
                    sample: sample.to_string(),
                    expected: format!("{} (rank {})", rule.intent, index + 1),
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl Default for IntentTable {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table_is_consistent() {
        IntentTable::canonical().validate().unwrap();
    }

    #[test]
    fn test_canonical_table_has_every_intent_once() {
        let table = IntentTable::canonical();
        assert_eq!(table.len(), 34);
        for (i, a) in table.rules().iter().enumerate() {
            for b in &table.rules()[i + 1..] {
                assert_ne!(a.intent, b.intent);
            }
            assert_ne!(a.intent, Intent::Unknown);
        }
    }

    #[test]
    fn test_samples_are_normalized() {
        for rule in IntentTable::canonical().rules() {
            for sample in rule.samples {
                assert_eq!(crate::command::normalizer::normalize(sample), *sample);
            }
        }
    }

    #[test]
    fn test_power_outranks_open() {
        let table = IntentTable::canonical();
        let (_, rule) = table.first_match("restart").unwrap();
        assert_eq!(rule.intent, Intent::Power);
        let (_, rule) = table.first_match("start the restart").unwrap();
        assert_eq!(rule.intent, Intent::Power);
    }

    #[test]
    fn test_window_state_row_excludes_snap() {
        let rule = IntentTable::canonical()
            .rules()
            .iter()
            .find(|r| r.intent == Intent::WindowState)
            .unwrap();
        assert!(rule.matches("maximize window"));
        assert!(rule.guard.holds("snap maximize window left"));
        assert!(!rule.matches("snap maximize window left"));
        assert!(!rule.matches("restore window then snap"));
    }

    #[test]
    fn test_rank_is_one_based() {
        let table = IntentTable::canonical();
        let (rank, rule) = table.first_match("youtube cats").unwrap();
        assert_eq!(rank, 1);
        assert_eq!(rule.intent, Intent::Youtube);
    }

    static SHADOWED: &[IntentRule] = &[
        IntentRule {
            intent: Intent::Open,
            guard: Guard::Contains("start"),
            exclusions: &[],
            extraction: Extraction::None,
            samples: &["start chrome"],
        },
        IntentRule {
            intent: Intent::Power,
            guard: Guard::Contains("restart"),
            exclusions: &[],
            extraction: Extraction::None,
            samples: &["restart"],
        },
    ];

    #[test]
    fn test_validate_reports_shadowed_row() {
        let err = IntentTable::from_rules(SHADOWED).validate().unwrap_err();
        match err {
            JarvisError::RuleConflict {
                sample,
                expected,
                actual,
            } => {
                assert_eq!(sample, "restart");
                assert_eq!(expected, "Power (rank 2)");
                assert_eq!(actual, "Open (rank 1)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
