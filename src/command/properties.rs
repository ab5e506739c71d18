//! Command identity and settings
//!
//! `CommandProperties` is the value object describing one command: its
//! unique id, the aliases that trigger it, its prefix, parent linkage,
//! documentation metadata, and settings. Everything is fixed at
//! construction except the disabled flag, which is an atomic so
//! enable/disable can be applied while dispatches are in flight.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default values applied by [`PropertiesBuilder`] for unset fields.
pub mod defaults {
    /// Parent id sentinel marking a root-level command.
    pub const ROOT_ID: &str = "";
    pub const NO_PREFIX: &str = "";
    pub const NO_DESCRIPTION: &str = "";
    pub const NO_USAGE: &str = "";
    pub const EXEC_WITH_SUBCOMMANDS: bool = false;
    pub const DISABLED: bool = false;
}

/// Properties associated with every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandProperties {
    id: String,
    aliases: BTreeSet<String>,
    prefix: String,
    parent_id: String,
    description: String,
    usage: String,
    exec_with_subcommands: bool,
    disabled: AtomicBool,
}

impl CommandProperties {
    pub fn builder(id: impl Into<String>) -> PropertiesBuilder {
        PropertiesBuilder::new(id)
    }

    /// Unique id of the command, global across root and sub scopes.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Aliases that trigger this command. Never empty.
    pub fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    /// Prefix prepended to each alias to form the root dispatch key.
    /// Display metadata only for sub-commands.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Id of the owning parent command; [`defaults::ROOT_ID`] for root
    /// commands.
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether this command fires alongside a resolved sub-command.
    pub fn exec_with_subcommands(&self) -> bool {
        self.exec_with_subcommands
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == defaults::ROOT_ID
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    /// Toggle the disabled flag in place. Visible to every holder of a
    /// reference to these properties, including dispatches in flight.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Release);
    }

    /// All root dispatch keys for this command: prefix + alias for each
    /// alias, in alias order.
    pub fn prefixed_aliases(&self) -> impl Iterator<Item = String> + '_ {
        self.aliases.iter().map(|a| format!("{}{}", self.prefix, a))
    }
}

impl Clone for CommandProperties {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            aliases: self.aliases.clone(),
            prefix: self.prefix.clone(),
            parent_id: self.parent_id.clone(),
            description: self.description.clone(),
            usage: self.usage.clone(),
            exec_with_subcommands: self.exec_with_subcommands,
            disabled: AtomicBool::new(self.is_disabled()),
        }
    }
}

impl PartialEq for CommandProperties {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.aliases == other.aliases
            && self.prefix == other.prefix
            && self.parent_id == other.parent_id
            && self.description == other.description
            && self.usage == other.usage
            && self.exec_with_subcommands == other.exec_with_subcommands
            && self.is_disabled() == other.is_disabled()
    }
}

impl Eq for CommandProperties {}

impl fmt::Display for CommandProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (prefix: '{}', aliases: {:?}, parent: '{}')",
            self.id, self.prefix, self.aliases, self.parent_id
        )
    }
}

/// Builder for [`CommandProperties`].
///
/// The alias set defaults to `{id}` when no alias is supplied, so a built
/// properties value always has at least one alias.
#[derive(Debug, Clone)]
pub struct PropertiesBuilder {
    id: String,
    aliases: BTreeSet<String>,
    prefix: String,
    parent_id: String,
    description: String,
    usage: String,
    exec_with_subcommands: bool,
    disabled: bool,
}

impl PropertiesBuilder {
    /// Panics when `id` is empty: an id-less command is a programming
    /// error, not a runtime condition.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "command id cannot be empty");
        Self {
            id,
            aliases: BTreeSet::new(),
            prefix: defaults::NO_PREFIX.to_string(),
            parent_id: defaults::ROOT_ID.to_string(),
            description: defaults::NO_DESCRIPTION.to_string(),
            usage: defaults::NO_USAGE.to_string(),
            exec_with_subcommands: defaults::EXEC_WITH_SUBCOMMANDS,
            disabled: defaults::DISABLED,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn exec_with_subcommands(mut self, exec: bool) -> Self {
        self.exec_with_subcommands = exec;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn build(self) -> CommandProperties {
        let aliases = if self.aliases.is_empty() {
            BTreeSet::from([self.id.clone()])
        } else {
            self.aliases
        };
        CommandProperties {
            id: self.id,
            aliases,
            prefix: self.prefix,
            parent_id: self.parent_id,
            description: self.description,
            usage: self.usage,
            exec_with_subcommands: self.exec_with_subcommands,
            disabled: AtomicBool::new(self.disabled),
        }
    }
}
