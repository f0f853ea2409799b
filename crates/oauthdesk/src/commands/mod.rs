//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod apps;
pub mod authorizations;
pub mod config_cmd;
pub mod scopes;
pub mod secrets;
pub mod summary;
pub mod util;

use oauthdesk_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a store-backed command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    profile: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = util::require_session(console, profile)?;

    match cmd {
        Command::Apps(args) => apps::handle(console, &ctx, args, global).await,
        Command::Scopes(args) => scopes::handle(console, &ctx, args, global).await,
        Command::Secrets(args) => secrets::handle(console, &ctx, args, global).await,
        Command::Authorizations(args) => {
            authorizations::handle(console, &ctx, args, global).await
        }
        Command::Summary => summary::handle(console, &ctx, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not need a session".into(),
        )),
    }
}
