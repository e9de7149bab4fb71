//! The uniform outcome record returned for every command

use crate::capability::CapabilityError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action tag used for failures raised by capabilities
pub const ERROR_TAG: &str = "error";

/// Outcome of one dispatched command.
///
/// Serializes to exactly `success`, `action`, `message` and `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub action: Option<String>,
    pub message: String,
    pub data: Option<Value>,
}

impl ActionResult {
    pub fn ok(action: &str, message: impl Into<String>) -> Self {
        Self {
            success: true,
            action: Some(action.to_string()),
            message: message.into(),
            data: None,
        }
    }

    pub fn fail(action: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            action: Some(action.to_string()),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

/// Folds handler outcomes and capability failures into `ActionResult`s
pub struct ResultBuilder;

impl ResultBuilder {
    /// Capability failures become `error` envelopes carrying the failure text
    pub fn from_capability(outcome: Result<ActionResult, CapabilityError>) -> ActionResult {
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                if err.is_unavailable() {
                    tracing::warn!("{}", err);
                } else {
                    tracing::error!("Capability failed: {}", err);
                }
                ActionResult::fail(ERROR_TAG, err.to_string())
            }
        };
        Self::finish(result)
    }

    /// Envelope for a panic caught at the dispatch boundary
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> ActionResult {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown cause".to_string());
        tracing::error!("Command handler panicked: {}", detail);
        Self::finish(ActionResult::fail(
            ERROR_TAG,
            format!("Internal failure: {}", detail),
        ))
    }

    /// Every result leaves with a non-empty message
    pub fn finish(mut result: ActionResult) -> ActionResult {
        if result.message.trim().is_empty() {
            result.message = if result.success {
                "Done".to_string()
            } else {
                "Command failed".to_string()
            };
        }
        result
    }
}
