//! Per-parent sub-command scope
//!
//! One `SubCommandRegistry` exists per parent command id, created lazily by
//! the root registry when the first child is added and dropped when the
//! last child is removed. Lookup within a sub scope is by bare alias; a
//! sub-command's prefix is display metadata only.

use crate::command::package::CommandPackage;
use ahash::AHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct SubCommandRegistry<T> {
    /// Child id -> package, scoped to one parent.
    commands: AHashMap<String, Arc<CommandPackage<T>>>,
    /// Bare alias -> child id.
    aliases: AHashMap<String, String>,
}

impl<T> Default for SubCommandRegistry<T> {
    fn default() -> Self {
        Self {
            commands: AHashMap::new(),
            aliases: AHashMap::new(),
        }
    }
}

impl<T> SubCommandRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when none of `aliases` collides with an existing child alias.
    pub fn validate_aliases(&self, aliases: &BTreeSet<String>) -> bool {
        aliases.iter().all(|a| !self.aliases.contains_key(a))
    }

    /// True when `id` is not already a child of this scope.
    pub fn validate_unique_id(&self, id: &str) -> bool {
        !self.commands.contains_key(id)
    }

    /// Register a child. Returns false (and leaves the scope unchanged) on
    /// any alias or id conflict within this scope.
    pub fn add_sub_command(&mut self, command: CommandPackage<T>) -> bool {
        let properties = command.properties();
        if !self.validate_aliases(properties.aliases()) {
            tracing::error!(command = %properties, "sub-command alias conflict, not registered");
            return false;
        }
        if !self.validate_unique_id(properties.id()) {
            tracing::error!(command = %properties, "sub-command id conflict, not registered");
            return false;
        }

        let id = properties.id().to_string();
        let aliases: Vec<String> = properties.aliases().iter().cloned().collect();
        for alias in aliases {
            self.aliases.insert(alias, id.clone());
        }
        tracing::debug!(command = %command.properties(), "registered sub-command");
        self.commands.insert(id, Arc::new(command));
        true
    }

    /// Unregister a child and all of its aliases. False when `id` is not
    /// a child of this scope.
    pub fn remove_sub_command(&mut self, id: &str) -> bool {
        let Some(command) = self.commands.remove(id) else {
            return false;
        };
        for alias in command.properties().aliases() {
            self.aliases.remove(alias);
        }
        true
    }

    pub fn command_by_id(&self, id: &str) -> Option<&Arc<CommandPackage<T>>> {
        self.commands.get(id)
    }

    pub fn command_by_alias(&self, alias: &str) -> Option<&Arc<CommandPackage<T>>> {
        self.commands.get(self.aliases.get(alias)?)
    }

    pub fn id_by_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn all_ids(&self, sorted: bool) -> Vec<String> {
        let mut ids: Vec<String> = self.commands.keys().cloned().collect();
        if sorted {
            ids.sort();
        }
        ids
    }

    pub fn all_aliases(&self, sorted: bool) -> Vec<String> {
        let mut aliases: Vec<String> = self.aliases.keys().cloned().collect();
        if sorted {
            aliases.sort();
        }
        aliases
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
