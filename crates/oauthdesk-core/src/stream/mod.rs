// ── Snapshot subscriptions ──
//
// Consumer side of a store's publish channel.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// A live feed of snapshots from one store.
///
/// The first value is the snapshot current at subscription time; each
/// later value is a snapshot the store published afterwards. Dropping the
/// subscription unregisters it.
pub struct Subscription<S> {
    current: Option<S>,
    receiver: mpsc::UnboundedReceiver<S>,
}

impl<S: Clone> Subscription<S> {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<S>) -> Self {
        Self {
            current: None,
            receiver,
        }
    }

    /// Wait for the next snapshot.
    /// Returns `None` once the store has been dropped and the backlog drained.
    pub async fn recv(&mut self) -> Option<S> {
        let next = self.receiver.recv().await?;
        self.current = Some(next.clone());
        Some(next)
    }

    /// Take the next snapshot if one is already queued.
    pub fn try_recv(&mut self) -> Option<S> {
        let next = self.receiver.try_recv().ok()?;
        self.current = Some(next.clone());
        Some(next)
    }

    /// The last snapshot this subscription yielded.
    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> SnapshotStream<S> {
        SnapshotStream {
            inner: UnboundedReceiverStream::new(self.receiver),
        }
    }
}

impl<S> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// `Stream` adapter over a [`Subscription`].
pub struct SnapshotStream<S> {
    inner: UnboundedReceiverStream<S>,
}

impl<S> Stream for SnapshotStream<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn tracks_current_value() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sub = Subscription::new(rx);
        assert!(sub.current().is_none());

        tx.send(3u8).unwrap();
        assert_eq!(sub.recv().await, Some(3));
        assert_eq!(sub.current(), Some(&3));
    }

    #[tokio::test]
    async fn stream_ends_when_sender_drops() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(1u8).unwrap();
        tx.send(2u8).unwrap();
        drop(tx);

        let values: Vec<u8> = Subscription::new(rx).into_stream().collect().await;
        assert_eq!(values, vec![1, 2]);
    }
}
