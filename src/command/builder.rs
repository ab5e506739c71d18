//! Fluent construction of command packages

use crate::command::package::{CommandPackage, ErrorHandler, ExecutableAction};
use crate::command::properties::PropertiesBuilder;

/// One-stop builder producing a ready-to-register [`CommandPackage`].
///
/// ```
/// use herald::command::builder::CommandBuilder;
/// use herald::command::context::{Context, ExtraArgs};
///
/// let ping = CommandBuilder::new("ping")
///     .prefix("/")
///     .aliases(["ping", "p"])
///     .description("replies with pong")
///     .build(|_: &Context, _: Option<&ExtraArgs>| Ok("pong".to_string()));
/// assert_eq!(ping.properties().id(), "ping");
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    properties: PropertiesBuilder,
}

impl CommandBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            properties: PropertiesBuilder::new(id),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.properties = self.properties.alias(alias);
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = self.properties.aliases(aliases);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.properties = self.properties.prefix(prefix);
        self
    }

    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.properties = self.properties.parent_id(parent_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.properties = self.properties.description(description);
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.properties = self.properties.usage(usage);
        self
    }

    pub fn exec_with_subcommands(mut self, exec: bool) -> Self {
        self.properties = self.properties.exec_with_subcommands(exec);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.properties = self.properties.disabled(disabled);
        self
    }

    pub fn build<T>(self, action: impl ExecutableAction<T> + 'static) -> CommandPackage<T> {
        CommandPackage::new(self.properties.build(), action)
    }

    pub fn build_with_handler<T>(
        self,
        action: impl ExecutableAction<T> + 'static,
        handler: impl ErrorHandler<T> + 'static,
    ) -> CommandPackage<T> {
        CommandPackage::new(self.properties.build(), action).with_error_handler(handler)
    }
}
