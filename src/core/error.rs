use thiserror::Error;

/// Errors raised while building or hosting a dispatcher.
///
/// None of these ever escape `Dispatcher::process_command`; command-level
/// failures are reported inside an `ActionResult` instead.
#[derive(Error, Debug)]
pub enum JarvisError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Rule conflict: '{sample}' should route to {expected} but routes to {actual}")]
    RuleConflict {
        sample: String,
        expected: String,
        actual: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JarvisError>;
