//! Runtime command object: action, properties, and error handler

use crate::command::context::{Context, ExtraArgs};
use crate::command::properties::CommandProperties;
use crate::core::error::ActionError;
use std::fmt;

/// A command's executable body.
///
/// Single-method capability: closures with the matching signature implement
/// it via the blanket impl, so no dedicated struct is needed per command.
pub trait ExecutableAction<T>: Send + Sync {
    fn execute(&self, context: &Context, extra: Option<&ExtraArgs>) -> Result<T, ActionError>;
}

impl<T, F> ExecutableAction<T> for F
where
    F: Fn(&Context, Option<&ExtraArgs>) -> Result<T, ActionError> + Send + Sync,
{
    fn execute(&self, context: &Context, extra: Option<&ExtraArgs>) -> Result<T, ActionError> {
        self(context, extra)
    }
}

/// Side-effect hook invoked when a command's action returns an error.
pub trait ErrorHandler<T>: Send + Sync {
    fn on_error(&self, command: &CommandPackage<T>, error: &ActionError);
}

/// Default handler: log the failure and take no other action.
pub struct LoggingErrorHandler;

impl<T> ErrorHandler<T> for LoggingErrorHandler {
    fn on_error(&self, command: &CommandPackage<T>, error: &ActionError) {
        tracing::error!(command = %command.properties(), %error, "command action failed");
    }
}

/// A fully functional command: properties, bound action, error handler.
///
/// Equality is by properties, so re-registering a value-equal package is
/// detected as a conflict regardless of the action bound to it.
pub struct CommandPackage<T> {
    properties: CommandProperties,
    action: Box<dyn ExecutableAction<T>>,
    error_handler: Box<dyn ErrorHandler<T>>,
}

impl<T> CommandPackage<T> {
    pub fn new(properties: CommandProperties, action: impl ExecutableAction<T> + 'static) -> Self {
        Self {
            properties,
            action: Box::new(action),
            error_handler: Box::new(LoggingErrorHandler),
        }
    }

    pub fn with_error_handler(mut self, handler: impl ErrorHandler<T> + 'static) -> Self {
        self.error_handler = Box::new(handler);
        self
    }

    pub fn properties(&self) -> &CommandProperties {
        &self.properties
    }

    /// Swap in different properties before registration, e.g. persisted
    /// overrides loaded from a properties store.
    pub fn replace_properties(&mut self, properties: CommandProperties) {
        self.properties = properties;
    }

    pub fn action(&self) -> &dyn ExecutableAction<T> {
        self.action.as_ref()
    }

    pub fn error_handler(&self) -> &dyn ErrorHandler<T> {
        self.error_handler.as_ref()
    }
}

impl<T> fmt::Debug for CommandPackage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPackage")
            .field("properties", &self.properties)
            .finish()
    }
}

impl<T> PartialEq for CommandPackage<T> {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
    }
}

impl<T> Eq for CommandPackage<T> {}
