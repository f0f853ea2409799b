// ── Resource descriptors ──
//
// One marker type per remote collection. A marker names the snapshot
// shape, the parent key (if the collection is nested under an
// application), the URL layout, and which mutations the server allows.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::collection::{Collection, List, Singleton};
use super::entity_store::EntityOf;
use crate::model::{
    Application, Authorization, AuthorizationGrant, EntityId, NewApplication, NewAuthorization,
    NewScope, NewSecret, Scope, Secret, Summary, UserId,
};

/// A remote collection owned by the signed-in user.
pub trait Resource: Send + Sync + 'static {
    type Collection: Collection;
    /// Key of the enclosing record: `()` for top-level collections,
    /// the application id for nested ones.
    type Parent: Copy + std::fmt::Debug + Send + Sync + 'static;

    /// Short name used in logs and errors.
    const NAME: &'static str;

    /// Path of the collection relative to the API root.
    fn collection_path(user: UserId, parent: Self::Parent) -> String;
}

/// Resources that accept new members via `POST` on the collection path.
pub trait Creatable: Resource {
    type Payload: Serialize + Send + Sync + 'static;
    /// Body the server answers a successful `POST` with.
    type Created: DeserializeOwned + Send + Sync + 'static;

    /// The member to append for a `POST` answer, if the answer is one.
    fn admit(created: &Arc<Self::Created>) -> Option<Arc<EntityOf<Self>>>;
}

/// Resources whose members can be deleted individually.
pub trait Removable: Resource {
    fn member_path(user: UserId, parent: Self::Parent, id: EntityId) -> String {
        format!("{}/{id}", Self::collection_path(user, parent))
    }
}

// ── Applications ─────────────────────────────────────────────────────

pub struct Applications;

impl Resource for Applications {
    type Collection = List<Application>;
    type Parent = ();
    const NAME: &'static str = "applications";

    fn collection_path(user: UserId, (): ()) -> String {
        format!("users/{user}/applications")
    }
}

impl Creatable for Applications {
    type Payload = NewApplication;
    type Created = Application;

    fn admit(created: &Arc<Application>) -> Option<Arc<Application>> {
        Some(Arc::clone(created))
    }
}

impl Removable for Applications {}

// ── Scopes (per application) ─────────────────────────────────────────

pub struct Scopes;

impl Resource for Scopes {
    type Collection = List<Scope>;
    type Parent = EntityId;
    const NAME: &'static str = "scopes";

    fn collection_path(user: UserId, application: EntityId) -> String {
        format!("users/{user}/applications/{application}/scopes")
    }
}

impl Creatable for Scopes {
    type Payload = NewScope;
    type Created = Scope;

    fn admit(created: &Arc<Scope>) -> Option<Arc<Scope>> {
        Some(Arc::clone(created))
    }
}

impl Removable for Scopes {}

// ── Secrets (per application) ────────────────────────────────────────

pub struct Secrets;

impl Resource for Secrets {
    type Collection = List<Secret>;
    type Parent = EntityId;
    const NAME: &'static str = "secrets";

    fn collection_path(user: UserId, application: EntityId) -> String {
        format!("users/{user}/applications/{application}/secrets")
    }
}

impl Creatable for Secrets {
    type Payload = NewSecret;
    type Created = Secret;

    fn admit(created: &Arc<Secret>) -> Option<Arc<Secret>> {
        Some(Arc::clone(created))
    }
}

impl Removable for Secrets {}

// ── Authorizations ───────────────────────────────────────────────────

pub struct Authorizations;

impl Resource for Authorizations {
    type Collection = List<Authorization>;
    type Parent = ();
    const NAME: &'static str = "authorizations";

    fn collection_path(user: UserId, (): ()) -> String {
        format!("users/{user}/authorizations")
    }
}

// A grant answers with a code for the client, not with the stored record;
// the new authorization shows up on the next select.
impl Creatable for Authorizations {
    type Payload = NewAuthorization;
    type Created = AuthorizationGrant;

    fn admit(_: &Arc<AuthorizationGrant>) -> Option<Arc<Authorization>> {
        None
    }
}

impl Removable for Authorizations {}

// ── Summary ──────────────────────────────────────────────────────────

pub struct Summaries;

impl Resource for Summaries {
    type Collection = Singleton<Summary>;
    type Parent = ();
    const NAME: &'static str = "summary";

    fn collection_path(user: UserId, (): ()) -> String {
        format!("users/{user}/summary")
    }
}
