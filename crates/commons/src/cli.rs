//! Clap derive structures for the `commons` CLI.
//!
//! Defines the command tree, global flags, and shared output types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// commons -- browse and curate the community program directory
#[derive(Debug, Parser)]
#[command(
    name = "commons",
    version,
    about = "Browse and curate the Commons program directory",
    long_about = "A command-line client for the Commons directory of community programs\n\
        and the providers that run them.\n\n\
        Talks to the directory API for programs, providers, and profiles, and to\n\
        the hosted auth service for magic-link and Google sign-in.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Deployment profile to use
    #[arg(long, short = 'p', env = "COMMONS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Directory API base URL (overrides profile)
    #[arg(long, env = "COMMONS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Auth service URL (overrides profile)
    #[arg(long, env = "COMMONS_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "COMMONS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "COMMONS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "COMMONS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Serve the built-in sample directory without touching the network
    #[arg(long, env = "COMMONS_OFFLINE", global = true)]
    pub offline: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit community programs
    #[command(alias = "prog")]
    Programs(ProgramsArgs),

    /// Browse program providers
    #[command(alias = "prov")]
    Providers(ProvidersArgs),

    /// Sign in and out of the directory
    Auth(AuthArgs),

    /// Show the signed-in user's profile
    Profile,

    /// Resolve an app path against the route table
    Route(RouteArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Programs ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProgramsArgs {
    #[command(subcommand)]
    pub command: ProgramsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProgramsCommand {
    /// List programs
    #[command(alias = "ls")]
    List(ProgramFilter),

    /// Show one program
    Get {
        /// Program ID
        id: String,
    },

    /// Add a program to the directory
    Create(ProgramCreateArgs),

    /// Change fields of an existing program
    Update(ProgramUpdateArgs),

    /// Mark a program as approved
    Approve {
        /// Program ID
        id: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct ProgramFilter {
    /// Only programs in this category (case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Only programs run by this provider ID
    #[arg(long)]
    pub provider: Option<String>,

    /// Free-text search over name, description, category, and address
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only programs running today
    #[arg(long)]
    pub active: bool,
}

/// Program fields shared by create and update.
#[derive(Debug, Default, Args)]
pub struct ProgramFields {
    /// Category, e.g. "Food Security"
    #[arg(long)]
    pub category: Option<String>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// First day the program runs (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day the program runs (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Session times, e.g. "10:00 - 14:00"
    #[arg(long)]
    pub date_interval: Option<String>,

    /// Recurrence, e.g. "Weekly"
    #[arg(long)]
    pub repeat_interval: Option<String>,

    /// Map place identifier
    #[arg(long)]
    pub place_id: Option<String>,

    /// Street address or area
    #[arg(long)]
    pub address: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Program website
    #[arg(long)]
    pub website: Option<String>,

    /// Provider ID that runs the program
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProgramCreateArgs {
    /// Program name
    #[arg(long, required_unless_present = "from_file")]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: ProgramFields,

    /// Read the full request body from a JSON file
    #[arg(long, short = 'F', conflicts_with = "name")]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ProgramUpdateArgs {
    /// Program ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: ProgramFields,

    /// Set or clear the approval flag
    #[arg(long)]
    pub approved: Option<bool>,

    /// Read the patch from a JSON file
    #[arg(long, short = 'F', conflicts_with = "name")]
    pub from_file: Option<PathBuf>,
}

// ── Providers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProvidersArgs {
    #[command(subcommand)]
    pub command: ProvidersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// List providers
    #[command(alias = "ls")]
    List,

    /// Show one provider and its programs
    Get {
        /// Provider ID
        id: String,
    },
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Email a magic link and one-time code
    Login {
        /// Address to send the link to
        #[arg(long, short = 'e')]
        email: String,

        /// Do not create an account for unknown addresses
        #[arg(long)]
        no_signup: bool,
    },

    /// Exchange the emailed one-time code for a session
    Verify {
        /// Address the code was sent to
        #[arg(long, short = 'e')]
        email: String,

        /// The one-time code from the email
        #[arg(long)]
        code: String,
    },

    /// Print the Google sign-in URL
    Google,

    /// Sign out and forget the stored session
    Logout,

    /// Show the current sign-in state
    Status,
}

// ── Route ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// App path, e.g. /programs/p1 (omit to list the route table)
    pub path: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Display the effective configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
