//! Jarvis - Entry Point
//!
//! Interactive command loop, or a single command with `--command`.

use clap::Parser;
use jarvis::capability::Capabilities;
use jarvis::command::Dispatcher;
use jarvis::core::config::load_or_default;
use jarvis::core::error::Result;
use std::io::{self, Write};
use std::path::PathBuf;

/// Desktop command assistant
#[derive(Parser, Debug)]
#[command(name = "jarvis")]
#[command(about = "Resolve free-text commands into desktop actions")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Run one command, print the result as JSON and exit
    #[arg(long)]
    command: Option<String>,

    /// Print the capability probe report on startup
    #[arg(long)]
    probe: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    let (caps, report) = Capabilities::detect();
    if args.probe {
        for entry in &report.entries {
            match entry.implementation {
                Some(name) => println!("  {:<20} {}", entry.capability, name),
                None => println!("  {:<20} unavailable ({})", entry.capability, entry.note),
            }
        }
    }

    let mut dispatcher = Dispatcher::new(caps, config)?;

    if let Some(command) = args.command {
        let result = dispatcher.process_command(&command);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\n=== JARVIS ===");
    println!("Type a command, or 'quit' to exit.");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        let result = dispatcher.process_command(input);
        let marker = if result.success { "ok" } else { "!!" };
        println!(
            "[{}] {}: {}",
            marker,
            result.action().unwrap_or("none"),
            result.message
        );
        if let Some(data) = &result.data {
            println!("     {}", data);
        }
    }

    println!("\nGoodbye! {} command(s) handled.", dispatcher.state().processed());
    Ok(())
}
