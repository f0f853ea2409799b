// ── Generic entity store ──
//
// One store per remote collection. Every operation is queued and run by a
// single background task, so snapshot updates land in the order calls were
// issued. Results go back to the caller over a oneshot; successful updates
// also go out to every subscriber.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use oauthdesk_api::ApiClient;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::channel::PublishChannel;
use super::collection::{Append, Collection, RemoveById};
use super::resource::{Creatable, Removable, Resource};
use crate::error::CoreError;
use crate::session::SessionContext;
use crate::stream::Subscription;

/// Entity type held by the store for resource `R`.
pub type EntityOf<R> = <<R as Resource>::Collection as Collection>::Entity;
/// Snapshot type published by the store for resource `R`.
pub type SnapshotOf<R> = <<R as Resource>::Collection as Collection>::Snapshot;
type ResponseOf<R> = <<R as Resource>::Collection as Collection>::Response;

const QUEUE_DEPTH: usize = 64;

struct StoreShared<R: Resource> {
    client: ApiClient,
    channel: PublishChannel<SnapshotOf<R>>,
}

type Job<R> = Box<dyn FnOnce(Arc<StoreShared<R>>) -> BoxFuture<'static, ()> + Send>;

/// Client-side cache of one remote collection.
///
/// Cheap to clone; clones share the snapshot, the subscribers and the
/// operation queue. The queue task stops once the last clone is dropped.
pub struct EntityStore<R: Resource> {
    shared: Arc<StoreShared<R>>,
    queue: mpsc::Sender<Job<R>>,
}

impl<R: Resource> Clone for EntityStore<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            queue: self.queue.clone(),
        }
    }
}

impl<R: Resource> std::fmt::Debug for EntityStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("resource", &R::NAME)
            .field("channel", &self.shared.channel)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> EntityStore<R> {
    /// Create an unset store and start its queue task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(client: ApiClient) -> Self {
        let shared = Arc::new(StoreShared {
            client,
            channel: PublishChannel::new(<R::Collection as Collection>::unset()),
        });
        let (queue, rx) = mpsc::channel(QUEUE_DEPTH);
        tokio::spawn(process_queue(Arc::clone(&shared), rx));
        Self { shared, queue }
    }

    // ── Local reads ──────────────────────────────────────────────────

    /// The current snapshot. No I/O.
    pub fn snapshot(&self) -> SnapshotOf<R> {
        self.shared.channel.latest()
    }

    /// Observe the store: the current snapshot first, then every update.
    pub fn subscribe(&self) -> Subscription<SnapshotOf<R>> {
        self.shared.channel.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.channel.subscriber_count()
    }

    /// Number of snapshots published so far.
    pub fn version(&self) -> u64 {
        self.shared.channel.version()
    }

    // ── Remote operations ────────────────────────────────────────────

    /// Fetch the collection and replace the snapshot with it.
    ///
    /// On failure the snapshot is left as it was and nothing is published.
    pub async fn select(
        &self,
        ctx: &SessionContext,
        parent: R::Parent,
    ) -> Result<SnapshotOf<R>, CoreError> {
        let path = R::collection_path(ctx.user().id, parent);
        let token = ctx.token().clone();

        self.run(move |shared| async move {
            match shared.client.get::<ResponseOf<R>>(&path, &token).await {
                Ok(response) => {
                    let snapshot = <R::Collection as Collection>::replace(response);
                    shared.channel.publish(snapshot.clone());
                    debug!(store = R::NAME, path = %path, "snapshot replaced");
                    Ok(snapshot)
                }
                Err(e) => {
                    warn!(store = R::NAME, path = %path, error = %e, "select failed, snapshot unchanged");
                    Err(e.into())
                }
            }
        })
        .await
    }

    /// Queue `op` behind every earlier operation and wait for its result.
    ///
    /// Once queued, the operation runs to completion even if the returned
    /// future is dropped.
    async fn run<T, F, Fut>(&self, op: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(Arc<StoreShared<R>>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job<R> = Box::new(move |shared: Arc<StoreShared<R>>| {
            async move {
                let result = op(shared).await;
                // The caller may have stopped waiting; the update still stands.
                let _ = reply_tx.send(result);
            }
            .boxed()
        });

        self.queue
            .send(job)
            .await
            .map_err(|_| CoreError::StoreClosed { store: R::NAME })?;

        reply_rx
            .await
            .map_err(|_| CoreError::StoreClosed { store: R::NAME })?
    }
}

impl<R> EntityStore<R>
where
    R: Creatable,
    R::Collection: Append,
{
    /// Create a member remotely and append the server's copy.
    ///
    /// Returns the server's answer. When that answer is not itself a member
    /// (see [`Creatable::admit`]) the snapshot is left for the next select.
    pub async fn create(
        &self,
        ctx: &SessionContext,
        parent: R::Parent,
        payload: R::Payload,
    ) -> Result<Arc<R::Created>, CoreError> {
        let path = R::collection_path(ctx.user().id, parent);
        let token = ctx.token().clone();

        self.run(move |shared| async move {
            match shared
                .client
                .post::<R::Created, _>(&path, &payload, &token)
                .await
            {
                Ok(created) => {
                    let created = Arc::new(created);
                    if let Some(entity) = R::admit(&created) {
                        shared.channel.update(|current| {
                            <R::Collection as Append>::append(current, entity)
                        });
                        debug!(store = R::NAME, path = %path, "entity appended");
                    } else {
                        debug!(store = R::NAME, path = %path, "created, snapshot unchanged");
                    }
                    Ok(created)
                }
                Err(e) => {
                    warn!(store = R::NAME, path = %path, error = %e, "create failed, snapshot unchanged");
                    Err(e.into())
                }
            }
        })
        .await
    }
}

impl<R> EntityStore<R>
where
    R: Removable,
    R::Collection: RemoveById,
{
    /// Delete `entity` remotely and drop it from the snapshot.
    ///
    /// Matching is by id; the remaining entries keep their order.
    pub async fn remove(
        &self,
        ctx: &SessionContext,
        parent: R::Parent,
        entity: &EntityOf<R>,
    ) -> Result<(), CoreError> {
        let id = <R::Collection as RemoveById>::id_of(entity);
        let path = R::member_path(ctx.user().id, parent, id);
        let token = ctx.token().clone();

        self.run(move |shared| async move {
            match shared.client.delete(&path, &token).await {
                Ok(()) => {
                    shared
                        .channel
                        .update(|current| <R::Collection as RemoveById>::remove(current, id));
                    debug!(store = R::NAME, path = %path, "entity removed");
                    Ok(())
                }
                Err(e) => {
                    warn!(store = R::NAME, path = %path, error = %e, "remove failed, snapshot unchanged");
                    Err(e.into())
                }
            }
        })
        .await
    }
}

// ── Queue task ───────────────────────────────────────────────────────

/// Run queued operations one at a time until every store handle is gone.
async fn process_queue<R: Resource>(shared: Arc<StoreShared<R>>, mut rx: mpsc::Receiver<Job<R>>) {
    while let Some(job) = rx.recv().await {
        job(Arc::clone(&shared)).await;
    }
    debug!(store = R::NAME, "store queue closed");
}
