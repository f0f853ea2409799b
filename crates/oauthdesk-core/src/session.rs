// ── Session context ──
//
// Who is signed in and with which bearer token. Stores never read this
// on their own: callers fetch a `SessionContext` and pass it into every
// operation.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::model::UserId;

/// The signed-in account, as far as stores are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
}

/// Credentials for one request: the owner id and the bearer token.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user: CurrentUser,
    token: SecretString,
}

impl SessionContext {
    pub fn new(user_id: UserId, token: SecretString) -> Self {
        Self {
            user: CurrentUser { id: user_id },
            token,
        }
    }

    pub fn user(&self) -> CurrentUser {
        self.user
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

/// Process-wide holder for the active session.
///
/// Reads are lock-free; signing in or out swaps the whole context.
#[derive(Debug, Default)]
pub struct Session {
    current: ArcSwapOption<SessionContext>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A holder that starts out signed in.
    pub fn signed_in(context: SessionContext) -> Self {
        let session = Self::new();
        session.sign_in(context);
        session
    }

    pub fn sign_in(&self, context: SessionContext) {
        self.current.store(Some(Arc::new(context)));
    }

    /// Clear the session, returning the context that was active.
    pub fn sign_out(&self) -> Option<Arc<SessionContext>> {
        self.current.swap(None)
    }

    pub fn current(&self) -> Option<Arc<SessionContext>> {
        self.current.load_full()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current.load().as_ref().map(|ctx| ctx.user())
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.load().is_some()
    }
}
