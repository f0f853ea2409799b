//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use oauthdesk_core::{Console, CoreError, EntityId, Identified, SessionContext};

use crate::error::CliError;

/// The active session, or a "not signed in" error naming the profile.
pub fn require_session(console: &Console, profile: &str) -> Result<Arc<SessionContext>, CliError> {
    console.require_session().map_err(|err| match err {
        CoreError::NotSignedIn => CliError::NotSignedIn {
            profile: profile.into(),
        },
        other => other.into(),
    })
}

/// Find an entity by id in a freshly selected snapshot.
pub fn find_by_id<T: Identified>(
    snapshot: &[Arc<T>],
    id: EntityId,
    resource_type: &str,
    list_command: &str,
) -> Result<Arc<T>, CliError> {
    snapshot
        .iter()
        .find(|entity| entity.id() == id)
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: resource_type.into(),
            identifier: id.to_string(),
            list_command: list_command.into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use oauthdesk_core::Scope;

    use super::*;

    #[test]
    fn find_by_id_reports_missing_entity() {
        let snapshot = vec![Arc::new(Scope {
            id: EntityId::new(1),
            name: "profile:read".into(),
            description: None,
        })];

        let found = find_by_id(&snapshot, EntityId::new(1), "scope", "scopes list 3").unwrap();
        assert_eq!(found.name, "profile:read");

        let err = find_by_id(&snapshot, EntityId::new(9), "scope", "scopes list 3").unwrap_err();
        assert!(matches!(err, CliError::NotFound { ref identifier, .. } if identifier == "9"));
    }
}
