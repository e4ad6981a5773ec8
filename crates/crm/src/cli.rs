//! CLI argument definitions for the `crm` command.
//!
//! Uses clap derive macros. Global flags are available on every
//! subcommand; each entity kind shares the same [`EntityArgs`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// crm -- a small CRM: API server and terminal client.
#[derive(Parser, Debug)]
#[command(
    name = "crm",
    about = "Manage tasks, leads, projects and contacts",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: nearest crm.yaml, or $CRM_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, including the /api prefix.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),

    /// Manage tasks.
    Tasks(EntityArgs),

    /// Manage leads.
    Leads(EntityArgs),

    /// Manage projects.
    Projects(EntityArgs),

    /// Manage contacts.
    Contacts(EntityArgs),

    /// Show headline counts and status distributions.
    Dashboard,

    /// Show or create the configuration file.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

/// Arguments for `crm serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (default: server.bind).
    #[arg(long)]
    pub bind: Option<String>,

    /// SQLite database file (default: database.path).
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Arguments for `crm <entity>`.
#[derive(Args, Debug)]
pub struct EntityArgs {
    #[command(subcommand)]
    pub command: EntityCommands,
}

/// Per-entity subcommands.
#[derive(Subcommand, Debug)]
pub enum EntityCommands {
    /// List records, newest first.
    List(ListArgs),

    /// Show one record.
    Show(IdArgs),

    /// Create a record from key=value fields.
    Create(CreateArgs),

    /// Update fields of a record.
    Update(UpdateArgs),

    /// Delete a record.
    Delete(IdArgs),
}

/// Arguments for `crm <entity> list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only rows whose displayed text contains this (case-insensitive).
    #[arg(long, short)]
    pub search: Option<String>,
}

/// A single record id.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Record id.
    pub id: String,
}

/// Arguments for `crm <entity> create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Field assignment, e.g. `-f title="Call Bob"` (repeatable).
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Arguments for `crm <entity> update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record id.
    pub id: String,

    /// Field assignment, e.g. `-f status=Completed` (repeatable).
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", required = true)]
    pub fields: Vec<String>,
}

/// Arguments for `crm config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Write a crm.yaml with default values.
    Init(ConfigInitArgs),
}

/// Arguments for `crm config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `crm completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
