//! Guarded command execution
//!
//! One executor call runs one command: the disabled guard, the action
//! invocation, and failure containment. Chain policy (which ancestors fire
//! alongside the target) is the resolver's concern, not the executor's.

use crate::command::context::{Context, ExtraArgs};
use crate::command::package::CommandPackage;
use crate::core::error::DispatchError;

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute one command with its context.
    ///
    /// Disabled commands fail without their action being invoked. An
    /// action error is reported to the command's error handler and then
    /// surfaced as [`DispatchError::ExecutionFailed`]; it never propagates
    /// out of the executor any other way.
    pub fn execute<T>(
        &self,
        command: &CommandPackage<T>,
        context: &Context,
        extra: Option<&ExtraArgs>,
    ) -> Result<T, DispatchError> {
        let properties = command.properties();
        if properties.is_disabled() {
            tracing::debug!(command = %properties, "refusing disabled command");
            return Err(DispatchError::CommandDisabled(properties.id().to_string()));
        }

        tracing::debug!(command = %properties, "executing command");
        match command.action().execute(context, extra) {
            Ok(value) => Ok(value),
            Err(error) => {
                command.error_handler().on_error(command, &error);
                Err(DispatchError::ExecutionFailed(error))
            }
        }
    }
}
