//! Command registry
//!
//! Owns the root-level commands and, per parent command id, a lazily
//! created sub-registry of that parent's children. Root commands are keyed
//! by prefix + alias; children by bare alias within their parent's scope.
//! Command ids are unique across the whole registry, root and nested.
//!
//! Every mutation is a total function returning a bool: a conflicting add
//! returns false and leaves the registry exactly as it was.

use crate::command::package::CommandPackage;
use ahash::AHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

pub mod sub;

pub use sub::SubCommandRegistry;

pub struct CommandRegistry<T> {
    /// Root command id -> package.
    commands: AHashMap<String, Arc<CommandPackage<T>>>,
    /// Prefix + alias -> root command id.
    aliases: AHashMap<String, String>,
    /// Parent command id -> that parent's child scope.
    sub_registries: AHashMap<String, SubCommandRegistry<T>>,
}

impl<T> Default for CommandRegistry<T> {
    fn default() -> Self {
        Self {
            commands: AHashMap::new(),
            aliases: AHashMap::new(),
            sub_registries: AHashMap::new(),
        }
    }
}

impl<T> CommandRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when none of `prefix` + alias collides with a registered root
    /// dispatch key.
    pub fn validate_aliases(&self, prefix: &str, aliases: &BTreeSet<String>) -> bool {
        aliases
            .iter()
            .all(|a| !self.aliases.contains_key(&format!("{prefix}{a}")))
    }

    /// True when `id` is unknown everywhere: not a root command and not a
    /// child in any sub scope.
    pub fn validate_unique_id(&self, id: &str) -> bool {
        !self.commands.contains_key(id)
            && self
                .sub_registries
                .values()
                .all(|sub| sub.validate_unique_id(id))
    }

    /// Register a root command. False on id or prefix+alias conflict, or
    /// when the package declares a parent (root scope takes root commands
    /// only).
    pub fn add_command(&mut self, command: CommandPackage<T>) -> bool {
        let properties = command.properties();
        if !properties.is_root() {
            tracing::error!(command = %properties, "declared parent id, not a root command");
            return false;
        }
        if !self.validate_aliases(properties.prefix(), properties.aliases()) {
            tracing::error!(command = %properties, "alias conflict, not registered");
            return false;
        }
        if !self.validate_unique_id(properties.id()) {
            tracing::error!(command = %properties, "id conflict, not registered");
            return false;
        }

        let id = properties.id().to_string();
        let keys: Vec<String> = properties.prefixed_aliases().collect();
        for key in keys {
            self.aliases.insert(key, id.clone());
        }
        tracing::debug!(command = %command.properties(), "registered command");
        self.commands.insert(id, Arc::new(command));
        true
    }

    /// Register a sub-command under `parent_id`, creating the parent's
    /// child scope on demand. The package must declare the same parent id
    /// it is being registered under; mismatches are rejected.
    pub fn add_sub_command(&mut self, command: CommandPackage<T>, parent_id: &str) -> bool {
        let properties = command.properties();
        if properties.parent_id() != parent_id {
            tracing::error!(
                command = %properties,
                parent_id,
                "declared parent id does not match registration target"
            );
            return false;
        }
        if !self.validate_unique_id(properties.id()) {
            tracing::error!(command = %properties, "id conflict, not registered");
            return false;
        }

        match self.sub_registries.get_mut(parent_id) {
            Some(sub) => sub.add_sub_command(command),
            None => {
                // Scope created only if the add succeeds, so a failed add
                // leaves no empty sub-registry behind.
                let mut sub = SubCommandRegistry::new();
                let added = sub.add_sub_command(command);
                if added {
                    self.sub_registries.insert(parent_id.to_string(), sub);
                }
                added
            }
        }
    }

    /// Unregister a root command, leaving any sub scope under its id
    /// intact (re-registering the same id reattaches the children). Use
    /// [`delete_command`](Self::delete_command) to destroy the subtree.
    pub fn remove_command(&mut self, id: &str) -> bool {
        let Some(command) = self.commands.remove(id) else {
            return false;
        };
        for key in command.properties().prefixed_aliases() {
            self.aliases.remove(&key);
        }
        true
    }

    /// Unregister a root command and recursively destroy its entire
    /// sub-command subtree. All freed aliases become available again.
    pub fn delete_command(&mut self, id: &str) -> bool {
        if !self.remove_command(id) {
            return false;
        }
        self.drop_subtree(id);
        true
    }

    fn drop_subtree(&mut self, parent_id: &str) {
        if let Some(sub) = self.sub_registries.remove(parent_id) {
            for child_id in sub.all_ids(false) {
                self.drop_subtree(&child_id);
            }
        }
    }

    /// Remove one sub-command from its parent's scope; the scope itself is
    /// dropped when its last child goes.
    pub fn remove_sub_command(&mut self, sub_id: &str, parent_id: &str) -> bool {
        let Some(sub) = self.sub_registries.get_mut(parent_id) else {
            return false;
        };
        let removed = sub.remove_sub_command(sub_id);
        if removed && sub.is_empty() {
            self.sub_registries.remove(parent_id);
        }
        removed
    }

    /// Root lookup by prefixed alias (prefix + alias in one string).
    pub fn command_by_alias(&self, alias: &str) -> Option<&Arc<CommandPackage<T>>> {
        self.commands.get(self.aliases.get(alias)?)
    }

    pub fn command_by_id(&self, id: &str) -> Option<&Arc<CommandPackage<T>>> {
        self.commands.get(id)
    }

    /// Lookup anywhere: root scope first, then every sub scope.
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<CommandPackage<T>>> {
        self.commands.get(id).or_else(|| {
            self.sub_registries
                .values()
                .find_map(|sub| sub.command_by_id(id))
        })
    }

    pub fn sub_registry(&self, parent_id: &str) -> Option<&SubCommandRegistry<T>> {
        self.sub_registries.get(parent_id)
    }

    /// Child lookup by bare alias within `parent_id`'s scope.
    pub fn sub_command_by_alias(
        &self,
        alias: &str,
        parent_id: &str,
    ) -> Option<&Arc<CommandPackage<T>>> {
        self.sub_registries.get(parent_id)?.command_by_alias(alias)
    }

    pub fn has_sub_commands(&self, id: &str) -> bool {
        self.sub_registries.contains_key(id)
    }

    /// All root-level commands, optionally sorted by id for deterministic
    /// iteration.
    pub fn all_commands(&self, sort_by_id: bool) -> Vec<Arc<CommandPackage<T>>> {
        let mut commands: Vec<Arc<CommandPackage<T>>> = self.commands.values().cloned().collect();
        if sort_by_id {
            commands.sort_by(|a, b| a.properties().id().cmp(b.properties().id()));
        }
        commands
    }

    /// All root dispatch keys (prefix + alias).
    pub fn all_aliases(&self, sorted: bool) -> Vec<String> {
        let mut aliases: Vec<String> = self.aliases.keys().cloned().collect();
        if sorted {
            aliases.sort();
        }
        aliases
    }

    /// Distinct prefixes across registered root commands.
    pub fn prefixes(&self) -> BTreeSet<String> {
        self.commands
            .values()
            .map(|c| c.properties().prefix().to_string())
            .collect()
    }

    /// Toggle the disabled flag on a command anywhere in the registry.
    /// False when `id` is unknown.
    pub fn set_disabled(&self, id: &str, disabled: bool) -> bool {
        match self.find_by_id(id) {
            Some(command) => {
                command.properties().set_disabled(disabled);
                true
            }
            None => false,
        }
    }

    /// Wipe every command and sub scope.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.aliases.clear();
        self.sub_registries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.sub_registries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::builder::CommandBuilder;
    use crate::command::context::{Context, ExtraArgs};

    fn command(id: &str, prefix: &str, aliases: &[&str]) -> CommandPackage<i32> {
        CommandBuilder::new(id)
            .prefix(prefix)
            .aliases(aliases.iter().copied())
            .build(|_: &Context, _: Option<&ExtraArgs>| Ok(0))
    }

    fn sub_command(id: &str, parent: &str, aliases: &[&str]) -> CommandPackage<i32> {
        CommandBuilder::new(id)
            .parent_id(parent)
            .aliases(aliases.iter().copied())
            .build(|_: &Context, _: Option<&ExtraArgs>| Ok(0))
    }

    #[test]
    fn test_round_trip_lookup() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet", "hi"])));

        let by_id = registry.command_by_id("greet").unwrap();
        assert_eq!(by_id.properties().id(), "greet");
        for key in ["/greet", "/hi"] {
            let by_alias = registry.command_by_alias(key).unwrap();
            assert_eq!(by_alias.properties().id(), "greet");
        }
    }

    #[test]
    fn test_alias_uniqueness_is_per_prefix() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("slash_greet", "/", &["greet"])));
        // same alias under a different prefix is a different dispatch key
        assert!(registry.add_command(command("bang_greet", "!", &["greet"])));
        // same prefix + alias collides
        assert!(!registry.add_command(command("other", "/", &["greet"])));
    }

    #[test]
    fn test_conflicting_add_is_atomic_noop() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));

        let before_aliases = registry.all_aliases(true);
        // id is fresh but one of the two aliases collides: nothing of the
        // candidate may be registered
        assert!(!registry.add_command(command("other", "/", &["other", "greet"])));
        assert_eq!(registry.all_aliases(true), before_aliases);
        assert!(registry.command_by_alias("/other").is_none());
        assert!(registry.command_by_id("other").is_none());
    }

    #[test]
    fn test_idempotent_failure_on_duplicate() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        let before = registry.all_aliases(true);
        assert!(!registry.add_command(command("greet", "/", &["greet"])));
        assert_eq!(registry.all_aliases(true), before);
        assert_eq!(registry.all_commands(true).len(), 1);
    }

    #[test]
    fn test_root_scope_rejects_declared_parent() {
        let mut registry = CommandRegistry::new();
        assert!(!registry.add_command(sub_command("greet.child", "greet", &["child"])));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_sub_command_registration_and_lookup() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave", "w"]), "greet"));

        assert!(registry.has_sub_commands("greet"));
        let wave = registry.sub_command_by_alias("w", "greet").unwrap();
        assert_eq!(wave.properties().id(), "greet.wave");
        // sub-commands are looked up by bare alias, not via the root maps
        assert!(registry.command_by_alias("wave").is_none());
        assert!(registry.command_by_id("greet.wave").is_none());
        assert!(registry.find_by_id("greet.wave").is_some());
    }

    #[test]
    fn test_sub_command_parent_mismatch_rejected() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(!registry.add_sub_command(sub_command("x.wave", "other", &["wave"]), "greet"));
        assert!(!registry.has_sub_commands("greet"));
    }

    #[test]
    fn test_failed_sub_add_leaves_no_empty_scope() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        // id collides with the root command
        assert!(!registry.add_sub_command(sub_command("greet", "greet", &["wave"]), "greet"));
        assert!(!registry.has_sub_commands("greet"));
    }

    #[test]
    fn test_id_uniqueness_is_global() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));

        // a root command may not reuse a nested id
        assert!(!registry.add_command(command("greet.wave", "/", &["unrelated"])));
        // nor may a sibling scope
        assert!(registry.add_command(command("other", "/", &["other"])));
        assert!(!registry.add_sub_command(sub_command("greet.wave", "other", &["wave"]), "other"));
    }

    #[test]
    fn test_remove_sub_command_drops_empty_scope() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));
        assert!(registry.add_sub_command(sub_command("greet.bow", "greet", &["bow"]), "greet"));

        assert!(registry.remove_sub_command("greet.wave", "greet"));
        assert!(registry.has_sub_commands("greet"));
        assert!(registry.remove_sub_command("greet.bow", "greet"));
        assert!(!registry.has_sub_commands("greet"));
        assert!(!registry.remove_sub_command("greet.bow", "greet"));
    }

    #[test]
    fn test_remove_command_keeps_subtree() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));

        assert!(registry.remove_command("greet"));
        assert!(registry.command_by_alias("/greet").is_none());
        assert!(registry.has_sub_commands("greet"));

        // re-registering the same id reattaches the children
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.sub_command_by_alias("wave", "greet").is_some());
    }

    #[test]
    fn test_delete_command_cascades() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));
        assert!(registry
            .add_sub_command(sub_command("greet.wave.big", "greet.wave", &["big"]), "greet.wave"));

        assert!(registry.delete_command("greet"));
        assert!(registry.is_empty());
        assert!(!registry.has_sub_commands("greet"));
        assert!(!registry.has_sub_commands("greet.wave"));

        // the whole id and alias space is free again, nested included
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));
        assert!(registry
            .add_sub_command(sub_command("greet.wave.big", "greet.wave", &["big"]), "greet.wave"));
    }

    #[test]
    fn test_all_commands_sorted() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("zeta", "/", &["zeta"])));
        assert!(registry.add_command(command("alpha", "/", &["alpha"])));
        assert!(registry.add_sub_command(sub_command("zeta.x", "zeta", &["x"]), "zeta"));

        let ids: Vec<String> = registry
            .all_commands(true)
            .iter()
            .map(|c| c.properties().id().to_string())
            .collect();
        // root-level only, in id order
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_prefixes_and_aliases_queries() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet", "hi"])));
        assert!(registry.add_command(command("bang", "!", &["bang"])));

        assert_eq!(
            registry.prefixes(),
            BTreeSet::from(["/".to_string(), "!".to_string()])
        );
        assert_eq!(registry.all_aliases(true), vec!["!bang", "/greet", "/hi"]);
    }

    #[test]
    fn test_set_disabled_reaches_nested_commands() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));

        assert!(registry.set_disabled("greet.wave", true));
        let wave = registry.sub_command_by_alias("wave", "greet").unwrap();
        assert!(wave.properties().is_disabled());

        assert!(registry.set_disabled("greet.wave", false));
        assert!(!wave.properties().is_disabled());

        assert!(!registry.set_disabled("missing", true));
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut registry = CommandRegistry::new();
        assert!(registry.add_command(command("greet", "/", &["greet"])));
        assert!(registry.add_sub_command(sub_command("greet.wave", "greet", &["wave"]), "greet"));

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.command_by_alias("/greet").is_none());
        assert!(registry.add_command(command("greet", "/", &["greet"])));
    }
}
