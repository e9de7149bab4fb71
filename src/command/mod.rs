//! Command pipeline: normalize, classify, extract, execute

pub mod calculator;
pub mod catalog;
pub mod dispatcher;
pub mod executor;
pub mod extractor;
pub mod intent;
pub mod matcher;
pub mod normalizer;
pub mod result;
pub mod table;
pub mod website;

pub use dispatcher::{DispatchState, Dispatcher};
pub use extractor::{ExtractionFailure, Params, ParameterExtractor, TerminateTarget};
pub use intent::{Extraction, Guard, Intent, IntentRule};
pub use matcher::{IntentMatcher, RuleMatch};
pub use normalizer::{normalize, Command};
pub use result::{ActionResult, ResultBuilder};
pub use table::IntentTable;
