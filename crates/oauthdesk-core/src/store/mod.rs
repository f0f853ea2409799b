// ── Reactive entity stores ──
//
// Cached snapshots of remote collections with push-based change
// notification.

mod channel;
mod collection;
mod entity_store;
mod resource;

pub use channel::PublishChannel;
pub use collection::{Append, Collection, List, RemoveById, Singleton};
pub use entity_store::{EntityOf, EntityStore, SnapshotOf};
pub use resource::{
    Applications, Authorizations, Creatable, Removable, Resource, Scopes, Secrets, Summaries,
};

/// Store of the signed-in user's applications.
pub type ApplicationStore = EntityStore<Applications>;
/// Store of one application's scopes.
///
/// The snapshot does not remember its application: it holds whatever the
/// last `select` fetched, and `create`/`remove` edit it regardless of the
/// parent they address. Select the application you mean to work on first.
pub type ScopeStore = EntityStore<Scopes>;
/// Store of one application's secrets.
///
/// Like [`ScopeStore`], the snapshot belongs to the application last
/// selected; mutations under another parent still land in it.
pub type SecretStore = EntityStore<Secrets>;
/// Store of the grants the signed-in user has given.
pub type AuthorizationStore = EntityStore<Authorizations>;
pub type SummaryStore = EntityStore<Summaries>;
