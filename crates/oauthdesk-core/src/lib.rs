// oauthdesk-core: Reactive entity stores between oauthdesk-api and consumers.

pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::Console;
pub use error::CoreError;
pub use session::{CurrentUser, Session, SessionContext};
pub use store::{
    ApplicationStore, AuthorizationStore, EntityStore, PublishChannel, ScopeStore, SecretStore,
    SummaryStore,
};
pub use stream::{SnapshotStream, Subscription};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Application, Authorization, AuthorizationGrant, EntityId, Identified, NewApplication,
    NewAuthorization, NewScope, NewSecret, Scope, Secret, Summary, SummaryQuota, UserId,
};
