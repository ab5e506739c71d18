//! Command manager facade
//!
//! Composes the registry, resolver, and executor behind a single
//! `process` entry point. The registry sits behind an `RwLock` so
//! registration and dispatch can race safely; the lock is held only while
//! resolving, never while an action runs. The manager is cheap to clone
//! and shares all state, which is how it moves into async tasks.

use crate::command::context::ExtraArgs;
use crate::command::package::CommandPackage;
use crate::command::provider::CommandProvider;
use crate::core::error::DispatchError;
use crate::dispatch::executor::CommandExecutor;
use crate::dispatch::resolver;
use crate::persist::PropertiesStore;
use crate::registry::CommandRegistry;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;

pub struct CommandManager<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    registry: RwLock<CommandRegistry<T>>,
    executor: CommandExecutor,
    store: Option<Box<dyn PropertiesStore>>,
}

impl<T> Clone for CommandManager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for CommandManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CommandManager<T> {
    pub fn new() -> Self {
        Self::with_optional_store(None)
    }

    /// A manager that overlays persisted properties at registration time
    /// and writes defaults for commands never seen before.
    pub fn with_store(store: impl PropertiesStore + 'static) -> Self {
        Self::with_optional_store(Some(Box::new(store)))
    }

    fn with_optional_store(store: Option<Box<dyn PropertiesStore>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: RwLock::new(CommandRegistry::new()),
                executor: CommandExecutor,
                store,
            }),
        }
    }

    fn registry_read(&self) -> RwLockReadGuard<'_, CommandRegistry<T>> {
        self.inner.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    fn registry_write(&self) -> RwLockWriteGuard<'_, CommandRegistry<T>> {
        self.inner
            .registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Dispatch an input string: resolve the deepest matching command
    /// chain, fire flagged ancestors for their side effects, execute the
    /// target, and return its result.
    pub fn process(&self, input: &str) -> Result<T, DispatchError> {
        self.process_with(input, None)
    }

    /// [`process`](Self::process) with host-supplied extra arguments
    /// forwarded to every executed action.
    pub fn process_with(&self, input: &str, extra: Option<&ExtraArgs>) -> Result<T, DispatchError> {
        tracing::debug!(input, "processing input");
        let resolution = {
            let registry = self.registry_read();
            resolver::resolve(&registry, input)?
        };
        // registry lock released: a slow action cannot block registration

        for (ancestor, context) in &resolution.fire_and_forget {
            // fire-and-forget: result discarded, failures already reported
            // through the ancestor's own error handler
            let _ = self.inner.executor.execute(ancestor, context, extra);
        }
        let (command, context) = &resolution.target;
        self.inner.executor.execute(command, context, extra)
    }

    /// Dispatch on the blocking pool of the ambient tokio runtime. Same
    /// semantics as [`process_with`](Self::process_with), off the calling
    /// thread.
    pub fn process_async(
        &self,
        input: impl Into<String>,
        extra: Option<Arc<ExtraArgs>>,
    ) -> JoinHandle<Result<T, DispatchError>>
    where
        T: Send + 'static,
    {
        let manager = self.clone();
        let input = input.into();
        tokio::task::spawn_blocking(move || manager.process_with(&input, extra.as_deref()))
    }

    /// Register a root command. Applies persisted properties first when a
    /// store is configured.
    pub fn add_command(&self, mut command: CommandPackage<T>) -> bool {
        self.overlay_stored_properties(&mut command);
        self.registry_write().add_command(command)
    }

    /// Register a sub-command under `parent_id`.
    pub fn add_sub_command(&self, mut command: CommandPackage<T>, parent_id: &str) -> bool {
        self.overlay_stored_properties(&mut command);
        self.registry_write().add_sub_command(command, parent_id)
    }

    /// Register every command a provider declares, all or none.
    ///
    /// The batch is validated as a whole first: conflicting ids or
    /// dispatch keys between batch members, or between the batch and the
    /// current registry, reject the entire batch with nothing registered.
    pub fn add_provider(&self, provider: &dyn CommandProvider<T>) -> bool {
        let mut commands = match provider.commands() {
            Ok(commands) => commands,
            Err(error) => {
                tracing::error!(%error, "command provider failed");
                return false;
            }
        };
        if commands.is_empty() {
            return false;
        }
        for command in &mut commands {
            self.overlay_stored_properties(command);
        }

        let mut registry = self.registry_write();
        if !validate_batch(&registry, &commands) {
            return false;
        }
        for command in commands {
            let added = if command.properties().is_root() {
                registry.add_command(command)
            } else {
                let parent_id = command.properties().parent_id().to_string();
                registry.add_sub_command(command, &parent_id)
            };
            debug_assert!(added, "validated batch member failed to register");
        }
        true
    }

    pub fn remove_command(&self, id: &str) -> bool {
        self.registry_write().remove_command(id)
    }

    /// Remove a root command and destroy its entire sub-command subtree.
    pub fn delete_command(&self, id: &str) -> bool {
        self.registry_write().delete_command(id)
    }

    pub fn remove_sub_command(&self, sub_id: &str, parent_id: &str) -> bool {
        self.registry_write().remove_sub_command(sub_id, parent_id)
    }

    pub fn enable_command(&self, id: &str) -> bool {
        self.registry_read().set_disabled(id, false)
    }

    pub fn disable_command(&self, id: &str) -> bool {
        self.registry_read().set_disabled(id, true)
    }

    /// Wipe every command and sub scope.
    pub fn clear_all(&self) {
        self.registry_write().clear();
    }

    pub fn command_by_alias(&self, alias: &str) -> Option<Arc<CommandPackage<T>>> {
        self.registry_read().command_by_alias(alias).cloned()
    }

    pub fn command_by_id(&self, id: &str) -> Option<Arc<CommandPackage<T>>> {
        self.registry_read().find_by_id(id).cloned()
    }

    pub fn sub_command_by_alias(&self, alias: &str, parent_id: &str) -> Option<Arc<CommandPackage<T>>> {
        self.registry_read()
            .sub_command_by_alias(alias, parent_id)
            .cloned()
    }

    pub fn all_commands(&self, sort_by_id: bool) -> Vec<Arc<CommandPackage<T>>> {
        self.registry_read().all_commands(sort_by_id)
    }

    pub fn all_aliases(&self, sorted: bool) -> Vec<String> {
        self.registry_read().all_aliases(sorted)
    }

    pub fn has_sub_commands(&self, id: &str) -> bool {
        self.registry_read().has_sub_commands(id)
    }

    /// Persist the current properties of a registered command through the
    /// configured store. False without a store or for an unknown id.
    pub fn save_properties(&self, id: &str) -> bool {
        let Some(store) = &self.inner.store else {
            return false;
        };
        let registry = self.registry_read();
        match registry.find_by_id(id) {
            Some(command) => store.save(command.properties()),
            None => false,
        }
    }

    fn overlay_stored_properties(&self, command: &mut CommandPackage<T>) {
        let Some(store) = &self.inner.store else {
            return;
        };
        let id = command.properties().id().to_string();
        match store.load(&id) {
            Some(saved) => {
                tracing::debug!(%id, "applying stored command properties");
                command.replace_properties(saved);
            }
            None if !store.contains(&id) => {
                store.save(command.properties());
            }
            // file exists but is unreadable: keep built-in properties and
            // leave the file alone
            None => {}
        }
    }
}

/// Whole-batch validation for provider registration: ids and dispatch keys
/// must be free of conflicts inside the batch and against the registry.
fn validate_batch<T>(registry: &CommandRegistry<T>, commands: &[CommandPackage<T>]) -> bool {
    let mut ids = HashSet::new();
    let mut root_keys = HashSet::new();
    let mut sub_keys = HashSet::new();

    for command in commands {
        let properties = command.properties();
        if !ids.insert(properties.id().to_string()) {
            tracing::error!(id = properties.id(), "conflicting ids within batch");
            return false;
        }
        if !registry.validate_unique_id(properties.id()) {
            tracing::error!(id = properties.id(), "batch id conflicts with registry");
            return false;
        }
        if properties.is_root() {
            for key in properties.prefixed_aliases() {
                if !root_keys.insert(key.clone()) {
                    tracing::error!(%key, "conflicting dispatch keys within batch");
                    return false;
                }
            }
            if !registry.validate_aliases(properties.prefix(), properties.aliases()) {
                tracing::error!(command = %properties, "batch aliases conflict with registry");
                return false;
            }
        } else {
            for alias in properties.aliases() {
                let key = (properties.parent_id().to_string(), alias.clone());
                if !sub_keys.insert(key) {
                    tracing::error!(
                        command = %properties,
                        "conflicting sub-command aliases within batch"
                    );
                    return false;
                }
            }
            if let Some(sub) = registry.sub_registry(properties.parent_id()) {
                if !sub.validate_aliases(properties.aliases()) {
                    tracing::error!(
                        command = %properties,
                        "batch sub-command aliases conflict with registry"
                    );
                    return false;
                }
            }
        }
    }
    true
}
