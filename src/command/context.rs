//! Per-dispatch execution context

use crate::command::properties::CommandProperties;
use std::any::Any;
use std::fmt;

/// Runtime context for one resolved command at one chain depth.
///
/// Ephemeral: a fresh context is built for every level of every dispatch.
/// Two contexts are equal iff alias, args, and properties are all equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// The token that matched this command: the prefixed alias at root
    /// scope, the bare alias within a sub scope.
    pub alias: String,
    /// Remaining argument text, None when the input ended at the alias.
    pub args: Option<String>,
    /// Snapshot of the matched command's properties.
    pub properties: CommandProperties,
}

impl Context {
    pub fn new(
        alias: impl Into<String>,
        args: Option<&str>,
        properties: CommandProperties,
    ) -> Self {
        Self {
            alias: alias.into(),
            args: args.map(str::to_string),
            properties,
        }
    }
}

/// Type-erased extra arguments forwarded from the host to command actions.
///
/// Renders the "optional opaque varargs" part of the dispatch interface: the
/// host stuffs in whatever per-call state its actions need (a message
/// handle, a session, ...) and actions downcast by position.
#[derive(Default)]
pub struct ExtraArgs {
    values: Vec<Box<dyn Any + Send + Sync>>,
}

impl ExtraArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<V: Any + Send + Sync>(mut self, value: V) -> Self {
        self.values.push(Box::new(value));
        self
    }

    /// Typed access to the argument at `index`; None when out of range or
    /// of a different type.
    pub fn get<V: Any>(&self, index: usize) -> Option<&V> {
        self.values.get(index)?.downcast_ref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for ExtraArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraArgs")
            .field("len", &self.values.len())
            .finish()
    }
}
