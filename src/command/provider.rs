//! Declarative batch registration seam
//!
//! A [`CommandProvider`] turns some source of command declarations into a
//! list of packages in one call, so a whole family of commands can be
//! validated and registered together. Hosts implement it over whatever
//! declaration mechanism they have: a hand-written list, a macro, a config
//! file.

use crate::command::package::CommandPackage;
use crate::core::error::ActionError;

/// Error returned when a provider cannot produce its command list.
pub type ProviderError = ActionError;

/// A source of command declarations.
pub trait CommandProvider<T> {
    /// Produce the full set of commands this source declares.
    ///
    /// Fails when the source cannot be introspected; the manager logs the
    /// error and registers nothing.
    fn commands(&self) -> Result<Vec<CommandPackage<T>>, ProviderError>;
}

impl<T, F> CommandProvider<T> for F
where
    F: Fn() -> Result<Vec<CommandPackage<T>>, ProviderError>,
{
    fn commands(&self) -> Result<Vec<CommandPackage<T>>, ProviderError> {
        self()
    }
}
