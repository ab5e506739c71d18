//! Chain resolution
//!
//! Walks an input string down through the registry: root lookup by
//! prefixed alias, then bare-alias descent through sub scopes for as long
//! as the next token matches. The deepest match wins; the first unmatched
//! token and everything after it become the target's argument string,
//! un-retokenized.

use crate::command::context::Context;
use crate::command::package::CommandPackage;
use crate::core::error::DispatchError;
use crate::core::split::split_first_token;
use crate::registry::CommandRegistry;
use std::sync::Arc;

/// Outcome of resolving an input string against the registry.
///
/// Holds `Arc` clones of the matched packages so the caller can release
/// any registry lock before executing anything.
#[derive(Debug)]
pub struct Resolution<T> {
    /// Ancestors flagged `exec_with_subcommands`, root-first; executed for
    /// their side effects only, results discarded.
    pub fire_and_forget: Vec<(Arc<CommandPackage<T>>, Context)>,
    /// The deepest matched command; its result is the chain's result.
    pub target: (Arc<CommandPackage<T>>, Context),
}

/// Resolve `input` to the deepest matching command chain.
pub fn resolve<T>(
    registry: &CommandRegistry<T>,
    input: &str,
) -> Result<Resolution<T>, DispatchError> {
    let token = split_first_token(input);
    let command = registry
        .command_by_alias(token.first)
        .ok_or_else(|| DispatchError::CommandNotFound(token.first.to_string()))?;

    let mut current = Arc::clone(command);
    let mut context = Context::new(token.first, token.rest, current.properties().clone());
    let mut fire_and_forget = Vec::new();

    loop {
        let Some(args) = context.args.clone() else {
            break;
        };
        if !registry.has_sub_commands(current.properties().id()) {
            break;
        }
        let sub_token = split_first_token(&args);
        let Some(sub) = registry.sub_command_by_alias(sub_token.first, current.properties().id())
        else {
            // unmatched token: the current command consumes the whole
            // remainder as its argument string
            break;
        };
        let sub = Arc::clone(sub);
        let sub_context = Context::new(sub_token.first, sub_token.rest, sub.properties().clone());
        if context.properties.exec_with_subcommands() {
            fire_and_forget.push((Arc::clone(&current), context.clone()));
        }
        current = sub;
        context = sub_context;
    }

    Ok(Resolution {
        fire_and_forget,
        target: (current, context),
    })
}
