// ── Snapshot shapes ──
//
// A store's cached value is either an ordered list of entities or a
// single record. These strategies say how a fetched response becomes a
// snapshot and how create/remove rewrite one. Snapshots are immutable:
// every change produces a new value, so a subscriber holding an old
// snapshot never sees it mutate.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::model::{EntityId, Identified};

/// How a store holds and replaces its snapshot.
pub trait Collection: Send + Sync + 'static {
    type Entity: DeserializeOwned + Clone + Send + Sync + 'static;
    /// What subscribers receive.
    type Snapshot: Clone + Send + Sync + std::fmt::Debug + 'static;
    /// Body decoded from a select response.
    type Response: DeserializeOwned + Send + 'static;

    /// The snapshot before the first successful select.
    fn unset() -> Self::Snapshot;

    /// Snapshot built from a fresh select response.
    fn replace(response: Self::Response) -> Self::Snapshot;
}

/// Collections that can take one more entity at the end.
pub trait Append: Collection {
    fn append(current: &Self::Snapshot, entity: Arc<Self::Entity>) -> Self::Snapshot;
}

/// Collections that can drop entities by identity.
pub trait RemoveById: Collection {
    fn id_of(entity: &Self::Entity) -> EntityId;

    /// Drop every entry whose id matches. Missing ids are not an error.
    fn remove(current: &Self::Snapshot, id: EntityId) -> Self::Snapshot;
}

// ── Ordered list ─────────────────────────────────────────────────────

/// Server-ordered list of entities. Unset is the empty list.
pub struct List<T>(PhantomData<fn() -> T>);

impl<T> Collection for List<T>
where
    T: DeserializeOwned + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    type Entity = T;
    type Snapshot = Arc<Vec<Arc<T>>>;
    type Response = Vec<T>;

    fn unset() -> Self::Snapshot {
        Arc::new(Vec::new())
    }

    fn replace(response: Vec<T>) -> Self::Snapshot {
        Arc::new(response.into_iter().map(Arc::new).collect())
    }
}

impl<T> Append for List<T>
where
    T: DeserializeOwned + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn append(current: &Self::Snapshot, entity: Arc<T>) -> Self::Snapshot {
        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(entity);
        Arc::new(next)
    }
}

impl<T> RemoveById for List<T>
where
    T: DeserializeOwned + Clone + Send + Sync + std::fmt::Debug + Identified + 'static,
{
    fn id_of(entity: &T) -> EntityId {
        entity.id()
    }

    fn remove(current: &Self::Snapshot, id: EntityId) -> Self::Snapshot {
        Arc::new(
            current
                .iter()
                .filter(|entity| entity.id() != id)
                .cloned()
                .collect(),
        )
    }
}

// ── Singleton ────────────────────────────────────────────────────────

/// One record per user. Unset is `None`.
pub struct Singleton<T>(PhantomData<fn() -> T>);

impl<T> Collection for Singleton<T>
where
    T: DeserializeOwned + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    type Entity = T;
    type Snapshot = Option<Arc<T>>;
    type Response = T;

    fn unset() -> Self::Snapshot {
        None
    }

    fn replace(response: T) -> Self::Snapshot {
        Some(Arc::new(response))
    }
}
