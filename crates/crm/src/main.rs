//! `crm` -- a small CRM: HTTP API server and terminal client.
//!
//! Parses CLI arguments with clap, loads the layered configuration into a
//! runtime context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use crm_core::{Contact, Lead, Project, Task};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| {
        init_tracing(&ctx);
        dispatch(&ctx, cli.command)
    });

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the configured filter. Logs go to stderr.
fn init_tracing(ctx: &RuntimeContext) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !ctx.verbose => EnvFilter::new(directives),
        _ => EnvFilter::new(ctx.log_filter()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(ctx: &RuntimeContext, command: Option<Commands>) -> anyhow::Result<()> {
    match command {
        Some(Commands::Serve(args)) => commands::serve::run(ctx, &args),
        Some(Commands::Tasks(args)) => commands::entity::run::<Task>(ctx, &args),
        Some(Commands::Leads(args)) => commands::entity::run::<Lead>(ctx, &args),
        Some(Commands::Projects(args)) => commands::entity::run::<Project>(ctx, &args),
        Some(Commands::Contacts(args)) => commands::entity::run::<Contact>(ctx, &args),
        Some(Commands::Dashboard) => commands::dashboard::run(ctx),
        Some(Commands::Config(args)) => commands::config_cmd::run(ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&args),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
