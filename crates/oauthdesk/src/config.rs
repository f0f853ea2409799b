//! CLI-side configuration: layers global flags over the shared profile
//! config from `oauthdesk-config`.
//!
//! Core never sees these types -- it receives a pre-built `ConsoleConfig`
//! and, when credentials are available, a `SessionContext`.

use secrecy::SecretString;

use oauthdesk_config::{Config, Profile};
use oauthdesk_core::{ConsoleConfig, SessionContext, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use oauthdesk_config::{config_path, load_config_or_default};

/// Everything a store-backed command needs before it can run.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub console: ConsoleConfig,
    /// `None` when no user id or token could be found.
    pub session: Option<SessionContext>,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// Comma-separated profile names, for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Merge config file, profile and global flags.
///
/// Precedence: flag > env var > profile > defaults.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = oauthdesk_config::load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.server.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(user_id) = global.user_id {
        profile.user_id = Some(user_id);
    }

    let mut console = oauthdesk_config::profile_to_console_config(&profile, &cfg.defaults)?;
    if global.insecure {
        console.tls = TlsVerification::DangerAcceptInvalid;
    }

    let session = resolve_session(global, &profile, &profile_name)?;

    Ok(Resolved {
        profile_name,
        console,
        session,
    })
}

/// Build a session from the `--token` flag or the profile's token chain.
///
/// A profile without a user id or token yields `None`; commands then report
/// "not signed in". Keyring failures still surface as errors.
fn resolve_session(
    global: &GlobalOpts,
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<SessionContext>, CliError> {
    let token = global.token.clone().map(SecretString::from);
    match oauthdesk_config::resolve_session(profile, profile_name, token) {
        Ok(ctx) => Ok(Some(ctx)),
        Err(e) if e.is_missing_credentials() => Ok(None),
        Err(e) => Err(e.into()),
    }
}
