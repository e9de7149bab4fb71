//! First-match-wins intent classification over the ordered table

use crate::command::intent::{Intent, IntentRule};
use crate::command::table::IntentTable;

/// A matched row
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch {
    /// 1-based position in the table
    pub rank: usize,
    pub rule: &'static IntentRule,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentMatcher {
    table: IntentTable,
}

impl IntentMatcher {
    pub fn new(table: IntentTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &IntentTable {
        &self.table
    }

    /// Classify normalized text; `Intent::Unknown` when no row matches
    pub fn match_intent(&self, normalized: &str) -> Intent {
        self.match_rule(normalized)
            .map_or(Intent::Unknown, |m| m.rule.intent)
    }

    pub fn match_rule(&self, normalized: &str) -> Option<RuleMatch> {
        self.table
            .first_match(normalized)
            .map(|(rank, rule)| RuleMatch { rank, rule })
    }
}
