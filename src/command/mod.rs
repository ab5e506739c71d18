//! Command data model
//!
//! Everything that describes a single command: its properties (identity,
//! aliases, settings), the runtime package binding an executable action and
//! error handler to those properties, the per-dispatch context, and the
//! builder/provider construction paths.

pub mod builder;
pub mod context;
pub mod package;
pub mod properties;
pub mod provider;

pub use builder::CommandBuilder;
pub use context::{Context, ExtraArgs};
pub use package::{CommandPackage, ErrorHandler, ExecutableAction, LoggingErrorHandler};
pub use properties::{CommandProperties, PropertiesBuilder};
pub use provider::CommandProvider;
