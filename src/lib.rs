//! Herald - prefix/alias command dispatch for chat hosts
//!
//! Feed it raw input strings; get typed results back. Commands are
//! registered under a prefix + alias, may nest sub-commands arbitrarily
//! deep, and every dispatch failure (unknown alias, disabled command,
//! action error) comes back as data rather than a panic or rethrow.

pub mod command;
pub mod core;
pub mod dispatch;
pub mod persist;
pub mod registry;
