//! Clap derive structures for the `oauthdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// oauthdesk -- administer OAuth applications from the command line
#[derive(Debug, Parser)]
#[command(
    name = "oauthdesk",
    version,
    about = "Manage OAuth applications, scopes, secrets and grants",
    long_about = "A command-line console for an OAuth authorization service.\n\n\
        Register client applications, declare their scopes, issue secrets,\n\
        grant authorizations and check your quotas.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "OAUTHDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Authorization server URL (overrides profile)
    #[arg(long, short = 's', env = "OAUTHDESK_SERVER", global = true)]
    pub server: Option<String>,

    /// Id of the signed-in user (overrides profile)
    #[arg(long, short = 'u', env = "OAUTHDESK_USER_ID", global = true)]
    pub user_id: Option<i64>,

    /// Bearer token
    #[arg(long, env = "OAUTHDESK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OAUTHDESK_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "OAUTHDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (defaults to the profile's)
    #[arg(long, env = "OAUTHDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

#[derive(Debug, Clone, ValueEnum)]
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
    /// Manage registered client applications
    #[command(alias = "app", alias = "a")]
    Apps(AppsArgs),

    /// Manage the scopes an application exposes
    Scopes(ScopesArgs),

    /// Manage client secrets of an application
    Secrets(SecretsArgs),

    /// View and grant authorizations
    #[command(alias = "auth")]
    Authorizations(AuthorizationsArgs),

    /// Show quota usage
    Summary,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLICATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List your applications
    #[command(alias = "ls")]
    List,

    /// Register a new application
    Create {
        /// Display name
        #[arg(long)]
        name: String,

        /// Public website of the application
        #[arg(long)]
        website: String,

        /// Redirect target for authorization responses
        #[arg(long)]
        callback: String,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Remove {
        /// Application id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCOPES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ScopesArgs {
    #[command(subcommand)]
    pub command: ScopesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScopesCommand {
    /// List the scopes of an application
    #[command(alias = "ls")]
    List {
        /// Application id
        app: i64,
    },

    /// Declare a new scope
    Create {
        /// Application id
        app: i64,

        /// Scope name (e.g. "profile:read")
        #[arg(long)]
        name: String,

        /// Human-readable description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a scope
    #[command(alias = "rm")]
    Remove {
        /// Application id
        app: i64,

        /// Scope id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SECRETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SecretsCommand {
    /// List the secrets of an application
    #[command(alias = "ls")]
    List {
        /// Application id
        app: i64,
    },

    /// Issue a new client id / secret pair
    Create {
        /// Application id
        app: i64,
    },

    /// Revoke a secret
    #[command(alias = "rm")]
    Remove {
        /// Application id
        app: i64,

        /// Secret id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTHORIZATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthorizationsArgs {
    #[command(subcommand)]
    pub command: AuthorizationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthorizationsCommand {
    /// List the grants you have given
    #[command(alias = "ls")]
    List,

    /// Grant a client application access (authorization-code flow)
    Create {
        /// Hex-encoded client id of the requesting application
        #[arg(long)]
        client_id: String,

        /// Requested scope name
        #[arg(long)]
        scope: String,

        /// Redirect URI (must match the application's callback)
        #[arg(long)]
        redirect_uri: String,

        /// Opaque state echoed back to the client
        #[arg(long, default_value = "")]
        state: String,
    },

    /// Revoke a grant
    #[command(alias = "rm")]
    Remove {
        /// Authorization id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Store a bearer token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
