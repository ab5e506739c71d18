//! Herald - Demo REPL
//!
//! Interactive shell around a `CommandManager<String>`: registers a small
//! demo command set, reads lines from stdin, and dispatches each one
//! through the async entry point.

use clap::Parser;
use herald::command::builder::CommandBuilder;
use herald::command::context::{Context, ExtraArgs};
use herald::command::package::CommandPackage;
use herald::command::provider::ProviderError;
use herald::core::error::{ActionError, DispatchError};
use herald::dispatch::manager::CommandManager;
use herald::persist::JsonPropertiesStore;

use std::io::{self, Write};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "herald", about = "Prefix and alias based command dispatch demo")]
struct Args {
    /// Directory for persisted command properties; omit to keep
    /// everything in memory
    #[arg(long)]
    config_dir: Option<std::path::PathBuf>,

    /// Prefix for the demo commands
    #[arg(long, default_value = "/")]
    prefix: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("herald=debug")
        .init();

    let args = Args::parse();
    tracing::info!("Herald starting...");

    let rt = Runtime::new()?;

    let manager = match &args.config_dir {
        Some(dir) => CommandManager::with_store(JsonPropertiesStore::new(dir)),
        None => CommandManager::new(),
    };

    let prefix = args.prefix.clone();
    if !manager.add_provider(&move || demo_commands(&prefix)) {
        return Err("failed to register demo commands".into());
    }

    println!("\n=== HERALD ===");
    println!("Command dispatch demo. Registered commands:");
    for command in manager.all_commands(true) {
        let props = command.properties();
        println!(
            "  {}{:<24} - {}",
            props.prefix(),
            props.aliases().iter().next().map(String::as_str).unwrap_or(""),
            props.description()
        );
    }
    println!("  quit                     - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim_end_matches(['\r', '\n']);

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let dispatch = {
            let _guard = rt.enter();
            manager.process_async(input, None)
        };
        match rt.block_on(dispatch)? {
            Ok(reply) => println!("{reply}"),
            Err(DispatchError::CommandNotFound(alias)) => {
                println!("No such command: {alias}");
            }
            Err(DispatchError::CommandDisabled(id)) => {
                println!("Command is disabled: {id}");
            }
            Err(DispatchError::ExecutionFailed(error)) => {
                println!("Command failed: {error}");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// The demo command set: a few root commands plus a nested group showing
/// sub-command descent and fire-and-forget parents.
fn demo_commands(prefix: &str) -> Result<Vec<CommandPackage<String>>, ProviderError> {
    let ping = CommandBuilder::new("ping")
        .prefix(prefix)
        .aliases(["ping", "p"])
        .description("replies with pong")
        .build(|_: &Context, _: Option<&ExtraArgs>| Ok("pong".to_string()));

    let echo = CommandBuilder::new("echo")
        .prefix(prefix)
        .alias("echo")
        .description("repeats its arguments")
        .usage("echo <text>")
        .build(|context: &Context, _: Option<&ExtraArgs>| {
            Ok(context.args.clone().unwrap_or_default())
        });

    let greet = CommandBuilder::new("greet")
        .prefix(prefix)
        .aliases(["greet", "hello"])
        .description("greets, or waves via 'greet wave'")
        .exec_with_subcommands(true)
        .build(|context: &Context, _: Option<&ExtraArgs>| {
            let name = context.args.as_deref().unwrap_or("stranger");
            Ok(format!("hello, {name}!"))
        });

    let wave = CommandBuilder::new("greet.wave")
        .parent_id("greet")
        .aliases(["wave", "w"])
        .description("waves back")
        .build(|_: &Context, _: Option<&ExtraArgs>| Ok("*waves*".to_string()));

    let fail = CommandBuilder::new("fail")
        .prefix(prefix)
        .alias("fail")
        .description("always fails, to show error containment")
        .build(|_: &Context, _: Option<&ExtraArgs>| -> Result<String, ActionError> {
            Err("this command always fails".into())
        });

    Ok(vec![ping, echo, greet, wave, fail])
}
