// ── Console facade ──
//
// Owns the API client, the session holder and the five entity stores.
// Consumers (the CLI today) go through this type instead of wiring
// stores themselves.

use std::sync::Arc;

use oauthdesk_api::ApiClient;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::session::{Session, SessionContext};
use crate::store::{
    ApplicationStore, AuthorizationStore, EntityStore, ScopeStore, SecretStore, SummaryStore,
};

/// Entry point to the administration API.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`. Construction spawns one
/// queue task per store, so it must happen inside a Tokio runtime.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    client: ApiClient,
    session: Session,
    applications: ApplicationStore,
    scopes: ScopeStore,
    secrets: SecretStore,
    authorizations: AuthorizationStore,
    summary: SummaryStore,
}

impl Console {
    /// Build the HTTP client from `config` and start the stores.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.url.as_str(), &config.transport())?;
        debug!(base_url = %client.base_url(), "console client ready");
        Ok(Self::with_client(config, client))
    }

    /// Use a prebuilt client (tests point this at a mock server).
    pub fn with_client(config: ConsoleConfig, client: ApiClient) -> Self {
        Self {
            inner: Arc::new(ConsoleInner {
                applications: EntityStore::new(client.clone()),
                scopes: EntityStore::new(client.clone()),
                secrets: EntityStore::new(client.clone()),
                authorizations: EntityStore::new(client.clone()),
                summary: EntityStore::new(client.clone()),
                config,
                client,
                session: Session::new(),
            }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// The active session, or `NotSignedIn`.
    pub fn require_session(&self) -> Result<Arc<SessionContext>, CoreError> {
        self.inner.session.current().ok_or(CoreError::NotSignedIn)
    }

    pub fn applications(&self) -> &ApplicationStore {
        &self.inner.applications
    }

    pub fn scopes(&self) -> &ScopeStore {
        &self.inner.scopes
    }

    pub fn secrets(&self) -> &SecretStore {
        &self.inner.secrets
    }

    pub fn authorizations(&self) -> &AuthorizationStore {
        &self.inner.authorizations
    }

    pub fn summary(&self) -> &SummaryStore {
        &self.inner.summary
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("url", &self.inner.config.url.as_str())
            .field("signed_in", &self.inner.session.is_signed_in())
            .finish_non_exhaustive()
    }
}
