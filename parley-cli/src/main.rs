// ABOUTME: Interactive chat REPL backed by a parley ChatSession.
// ABOUTME: Supports reset, token reporting, and language switching commands.

use anyhow::Result;
use rustyline::DefaultEditor;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use parley::prelude::*;

/// Cloud Run sets this; configuration there comes from the service, not a .env file.
fn is_cloud_run() -> bool {
    std::env::var_os("K_SERVICE").is_some()
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parley=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_commands() {
    println!("Commands:");
    println!("  /reset        start the conversation over");
    println!("  /tokens       show the estimated transcript size");
    println!("  /lang <tag>   switch language (en, es, fr, de, pt)");
    println!("  /help         show this list");
    println!("  quit          exit\n");
}

/// Handle a slash command. Returns false if the line was not a command.
fn handle_command(chat: &ChatSession, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("/reset") => {
            chat.reset();
            println!("Conversation context reset successfully\n");
        }
        Some("/tokens") => {
            let context = chat.context();
            println!(
                "total_tokens: {} / {} ({} messages)\n",
                chat.total_tokens(),
                context.max_tokens(),
                context.message_count()
            );
        }
        Some("/lang") => match parts.next() {
            Some(tag) => {
                chat.context().set_language_preference(tag);
                println!("{}\n", chat.welcome());
            }
            None => println!("language: {}\n", chat.context().language_preference()),
        },
        Some("/help") => {
            println!("{}\n", chat.help());
            print_commands();
        }
        _ => return false,
    }
    true
}

async fn run_chat_loop(chat: &ChatSession) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("{}", chat.welcome());
    println!("Type /help for commands, 'quit' to exit.\n");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let _ = rl.add_history_entry(line);

        if handle_command(chat, line) {
            continue;
        }

        match chat.process(line).await {
            Ok(reply) => println!("\n{}\n", reply),
            Err(e) => {
                warn!(error = %e, "turn failed");
                println!("\nFailed to process conversation: {}\n", e);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if !is_cloud_run() {
        // Load .env file if present
        let _ = dotenvy::dotenv();
    }
    init_tracing();

    let chat = ChatSession::from_env()?;
    info!(model = %chat.context().model(), "chat session ready");

    run_chat_loop(&chat).await
}
