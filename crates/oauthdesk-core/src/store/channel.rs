// ── Replay-latest publish channel ──
//
// Holds the most recent snapshot and pushes every new one to all live
// subscribers, in publish order. A subscriber that joins late receives
// the current value first, then every later publish.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::stream::Subscription;

struct ChannelState<S> {
    latest: S,
    version: u64,
    subscribers: Vec<mpsc::UnboundedSender<S>>,
}

/// Multi-subscriber channel that replays its latest value.
///
/// Unlike a `watch` channel, intermediate values are never coalesced:
/// each subscriber observes every published snapshot.
pub struct PublishChannel<S: Clone + Send + 'static> {
    state: Mutex<ChannelState<S>>,
}

impl<S: Clone + Send + 'static> PublishChannel<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: Mutex::new(ChannelState {
                latest: initial,
                version: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a subscriber. The current value is delivered immediately.
    pub fn subscribe(&self) -> Subscription<S> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        // A fresh receiver is alive, so this send cannot fail.
        let _ = tx.send(state.latest.clone());
        state.subscribers.push(tx);
        Subscription::new(rx)
    }

    /// Replace the latest value and deliver it to every subscriber.
    ///
    /// Subscribers whose receiving side has been dropped are pruned.
    pub fn publish(&self, value: S) {
        let mut state = self.lock();
        state
            .subscribers
            .retain(|tx| tx.send(value.clone()).is_ok());
        state.latest = value;
        state.version += 1;
    }

    /// Derive the next value from the current one and publish it,
    /// atomically with respect to other publishers.
    pub fn update(&self, f: impl FnOnce(&S) -> S) -> S {
        let mut state = self.lock();
        let next = f(&state.latest);
        state.subscribers.retain(|tx| tx.send(next.clone()).is_ok());
        state.latest = next.clone();
        state.version += 1;
        next
    }

    /// The most recently published value.
    pub fn latest(&self) -> S {
        self.lock().latest.clone()
    }

    /// Number of publishes since creation.
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Live subscribers. Dropped ones are only noticed on the next publish.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl<S: Clone + Send + 'static> std::fmt::Debug for PublishChannel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("PublishChannel")
            .field("version", &state.version)
            .field("subscribers", &state.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn late_subscriber_sees_latest_first() {
        let channel = PublishChannel::new(0u32);
        channel.publish(1);
        channel.publish(2);

        let mut sub = channel.subscribe();
        assert_eq!(sub.recv().await, Some(2));
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn every_publish_is_delivered_in_order() {
        let channel = PublishChannel::new(0u32);
        let mut sub = channel.subscribe();
        channel.publish(1);
        channel.update(|v| v + 10);

        assert_eq!(sub.recv().await, Some(0));
        assert_eq!(sub.recv().await, Some(1));
        assert_eq!(sub.recv().await, Some(11));
        assert_eq!(channel.version(), 2);
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let channel = PublishChannel::new(String::new());
        let kept = channel.subscribe();
        drop(channel.subscribe());
        assert_eq!(channel.subscriber_count(), 2);

        channel.publish("next".into());
        assert_eq!(channel.subscriber_count(), 1);
        drop(kept);
    }
}
