use thiserror::Error;

/// Boxed error produced by a command action or provider.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// The ways a dispatch can fail.
///
/// Every failure surfaces as data through this enum; nothing above the
/// executor boundary panics or rethrows as part of normal dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The first token of the input matched no registered root alias.
    #[error("no command registered for alias '{0}'")]
    CommandNotFound(String),

    /// The resolved command exists but is currently disabled.
    #[error("command '{0}' is disabled")]
    CommandDisabled(String),

    /// The command's action returned an error; it was caught and reported
    /// to the command's error handler before being surfaced here.
    #[error("command execution failed: {0}")]
    ExecutionFailed(ActionError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
