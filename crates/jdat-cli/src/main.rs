//! JDAT CLI - plain-text documents of named blocks, each encryptable on its own
//!
//! This is the command-line interface for JDAT. It loads a document, applies
//! one operation from the core library and saves it back.

mod app;
mod cli;
mod commands;
mod config;
mod errors;
mod output;
mod ui;

use clap::Parser;
use jdat_core::VERSION;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{blocks, crypto, edit, file, misc};
use crate::errors::{error_hint, exit_code};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false);
        let hint = error_hint(&e);
        print_error(&ui_ctx, &e.to_string(), hint.as_deref());
        std::process::exit(exit_code(&e));
    }
}

/// Diagnostics go to stderr, filtered by `JDAT_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("JDAT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::New(args)) => file::handle_new(ctx, args)?,
        Some(Commands::List(args)) => blocks::handle_list(ctx, args)?,
        Some(Commands::Show(args)) => blocks::handle_show(ctx, args)?,
        Some(Commands::Find(args)) => blocks::handle_find(ctx, args)?,
        Some(Commands::Get(args)) => blocks::handle_get(ctx, args)?,
        Some(Commands::Add(args)) => edit::handle_add(ctx, args)?,
        Some(Commands::Set(args)) => edit::handle_set(ctx, args)?,
        Some(Commands::Edit(args)) => edit::handle_edit(ctx, args)?,
        Some(Commands::Remove(args)) => edit::handle_remove(ctx, args)?,
        Some(Commands::Comment(args)) => edit::handle_comment(ctx, args)?,
        Some(Commands::Encrypt(args)) => crypto::handle_encrypt(ctx, args)?,
        Some(Commands::Decrypt(args)) => crypto::handle_decrypt(ctx, args)?,
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            println!("JDAT v{}", VERSION);
            println!("\nQuickstart:");
            println!("  jdat new notes");
            println!("  jdat -f notes.jdat add --name user --link u1 --set name=Alice");
            println!("  jdat -f notes.jdat encrypt u1");
            println!("  jdat -f notes.jdat show u1 --decrypt");
            println!("\nRun `jdat --help` for full usage.");
        }
    }

    Ok(())
}
