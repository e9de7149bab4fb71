//! The single entry point: text in, `ActionResult` out

use crate::capability::Capabilities;
use crate::command::executor::CommandExecutor;
use crate::command::extractor::ParameterExtractor;
use crate::command::intent::Intent;
use crate::command::matcher::IntentMatcher;
use crate::command::normalizer::Command;
use crate::command::result::{ActionResult, ResultBuilder};
use crate::command::table::IntentTable;
use crate::core::config::JarvisConfig;
use crate::core::error::Result;
use std::panic::{self, AssertUnwindSafe};

/// Results remembered by a dispatcher, for introspection only
#[derive(Debug, Clone, Default)]
pub struct DispatchState {
    last: Option<ActionResult>,
    processed: u64,
}

impl DispatchState {
    pub fn last(&self) -> Option<&ActionResult> {
        self.last.as_ref()
    }

    /// Commands handled since the dispatcher was built
    pub fn processed(&self) -> u64 {
        self.processed
    }
}

/// Normalize, match, extract, invoke, wrap.
///
/// Holds the capability registry and its own `DispatchState`; `&mut self` on
/// `process_command` keeps one instance single-flight.
pub struct Dispatcher {
    matcher: IntentMatcher,
    extractor: ParameterExtractor,
    executor: CommandExecutor,
    state: DispatchState,
}

impl Dispatcher {
    /// Build over the canonical table
    pub fn new(caps: Capabilities, config: JarvisConfig) -> Result<Self> {
        Self::with_table(IntentTable::canonical(), caps, config)
    }

    /// Build over a custom table; the table and config are validated first
    pub fn with_table(table: IntentTable, caps: Capabilities, config: JarvisConfig) -> Result<Self> {
        config.validate()?;
        table.validate()?;
        let extractor = ParameterExtractor::new(&table, &config)?;
        tracing::debug!("Dispatcher ready with {} intent rules", table.len());

        Ok(Self {
            matcher: IntentMatcher::new(table),
            extractor,
            executor: CommandExecutor::new(caps, config),
            state: DispatchState::default(),
        })
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }

    pub fn config(&self) -> &JarvisConfig {
        self.executor.config()
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    pub fn last_result(&self) -> Option<&ActionResult> {
        self.state.last()
    }

    /// Classify without executing
    pub fn classify(&self, raw: &str) -> Intent {
        self.matcher.match_intent(Command::new(raw).normalized())
    }

    /// Handle one command. Never fails and never panics: every outcome,
    /// including a panicking capability, comes back as an `ActionResult`.
    pub fn process_command(&mut self, raw: &str) -> ActionResult {
        let command = Command::new(raw);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.route(&command)));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => ResultBuilder::from_panic(payload.as_ref()),
        };

        self.state.last = Some(result.clone());
        self.state.processed += 1;
        result
    }

    fn route(&self, command: &Command) -> ActionResult {
        let text = command.normalized();
        let Some(hit) = self.matcher.match_rule(text) else {
            tracing::debug!("No intent matched '{}'", text);
            return ActionResult::fail(
                Intent::Unknown.tag(),
                format!("I don't understand: '{}'", text),
            );
        };

        let intent = hit.rule.intent;
        tracing::debug!("'{}' -> {} (rank {})", text, intent, hit.rank);

        let params = match self.extractor.extract_command(hit.rule, command) {
            Ok(params) => params,
            Err(failure) => {
                tracing::info!("{} rejected: {}", intent, failure);
                return ResultBuilder::finish(ActionResult::fail(intent.tag(), failure.to_string()));
            }
        };

        let result = ResultBuilder::from_capability(self.executor.execute(intent, params));
        if result.success {
            tracing::info!("{}: {}", intent, result.message);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Capabilities::unsupported(), JarvisConfig::default()).unwrap()
    }

    #[test]
    fn test_unknown_command() {
        let mut d = dispatcher();
        let result = d.process_command("asdkjaslkdj");
        assert!(!result.success);
        assert_eq!(result.action(), Some("unknown"));
        assert_eq!(result.message, "I don't understand: 'asdkjaslkdj'");
    }

    #[test]
    fn test_state_tracks_last_result() {
        let mut d = dispatcher();
        assert!(d.last_result().is_none());
        d.process_command("hello");
        assert_eq!(d.last_result().and_then(|r| r.action()), Some("greeting"));
        d.process_command("what is 2+2");
        assert_eq!(d.last_result().and_then(|r| r.action()), Some("calculate"));
        assert_eq!(d.state().processed(), 2);
    }

    #[test]
    fn test_extraction_failure_keeps_tag() {
        let mut d = dispatcher();
        let result = d.process_command("rename a to b to c");
        assert!(!result.success);
        assert_eq!(result.action(), Some("rename"));
        assert_eq!(result.message, "Usage: rename [file] to [newname]");
    }

    #[test]
    fn test_unavailable_capability_is_error_envelope() {
        let mut d = dispatcher();
        let result = d.process_command("lock the system");
        assert!(!result.success);
        assert_eq!(result.action(), Some("error"));
        assert!(result.message.contains("PowerController"));
    }

    #[test]
    fn test_classify_normalizes() {
        assert_eq!(dispatcher().classify("  RESTART the System "), Intent::Power);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = JarvisConfig::default();
        config.files.max_results = 0;
        assert!(Dispatcher::new(Capabilities::unsupported(), config).is_err());
    }
}
