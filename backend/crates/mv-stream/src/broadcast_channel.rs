use crate::{ReplayConfig, ReplayMode, StreamMetrics, SubscriptionHandle};

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// Single-writer, many-reader channel that replays history to late joiners.
///
/// Every subscriber observes the same total order of items. Publishing never
/// waits on subscribers: items are appended to a shared replay buffer and each
/// subscription reads it through its own cursor, so a slow reader only delays
/// itself.
pub struct BroadcastChannel<T> {
    inner: Arc<ChannelInner<T>>,
}

pub(crate) struct ChannelInner<T> {
    pub(crate) name: &'static str,
    pub(crate) config: ReplayConfig,
    pub(crate) state: Mutex<ChannelState<T>>,
    /// Carries the total number of items ever published; bumped on close too
    pub(crate) published: watch::Sender<u64>,
    pub(crate) metrics: StreamMetrics,
}

pub(crate) struct ChannelState<T> {
    pub(crate) buffer: VecDeque<T>,
    /// Absolute index of `buffer[0]` in the publish sequence
    pub(crate) evicted: u64,
    pub(crate) subscribers: HashSet<u64>,
    pub(crate) next_id: u64,
    pub(crate) closed: bool,
}

impl<T> ChannelState<T> {
    pub(crate) fn total(&self) -> u64 {
        self.evicted + self.buffer.len() as u64
    }
}

impl<T> ChannelInner<T> {
    pub(crate) fn lock(&self) -> MutexGuard<'_, ChannelState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn deregister(&self, id: u64) {
        let mut state = self.lock();
        if state.subscribers.remove(&id) {
            let remaining = state.subscribers.len();
            drop(state);

            self.metrics.subscription_changed("removed", remaining);
            log::debug!(
                "Subscriber {} left channel {} ({} remaining subscribers)",
                id,
                self.name,
                remaining
            );
        }
    }
}

impl<T: Clone> BroadcastChannel<T> {
    pub fn new(name: &'static str, config: ReplayConfig) -> Self {
        let (published, _) = watch::channel(0);

        log::info!(
            "Created broadcast channel {} (mode: {:?}, require_subscriber: {})",
            name,
            config.mode,
            config.require_subscriber
        );

        Self {
            inner: Arc::new(ChannelInner {
                name,
                config,
                state: Mutex::new(ChannelState {
                    buffer: VecDeque::new(),
                    evicted: 0,
                    subscribers: HashSet::new(),
                    next_id: 0,
                    closed: false,
                }),
                published,
                metrics: StreamMetrics::new(name),
            }),
        }
    }

    /// Append an item and wake every subscriber.
    ///
    /// Returns `false` when the item was not accepted: the channel is closed,
    /// or it requires a subscriber and has none.
    pub fn publish(&self, item: T) -> bool {
        let mut state = self.inner.lock();

        if state.closed {
            log::warn!("Publish to closed channel {} ignored", self.inner.name);
            return false;
        }

        if self.inner.config.require_subscriber && state.subscribers.is_empty() {
            drop(state);
            self.inner.metrics.item_rejected();
            log::debug!(
                "Publish to channel {} rejected, no active subscribers",
                self.inner.name
            );
            return false;
        }

        state.buffer.push_back(item);

        let mut evicted = 0;
        if let ReplayMode::Latest(window) = self.inner.config.mode {
            while state.buffer.len() > window {
                state.buffer.pop_front();
                state.evicted += 1;
                evicted += 1;
            }
        }

        let total = state.total();
        let buffered = state.buffer.len();
        let subscribers = state.subscribers.len();

        // Signal while still holding the lock so wake-ups follow publish order.
        self.inner.published.send_replace(total);
        drop(state);

        if evicted > 0 {
            self.inner.metrics.items_evicted(evicted);
        }
        self.inner.metrics.item_published(buffered);
        log::debug!(
            "Published item #{} to channel {} ({} subscribers)",
            total,
            self.inner.name,
            subscribers
        );

        true
    }

    /// Join the channel. The cursor starts at the beginning of the replay window.
    pub fn subscribe(&self) -> SubscriptionHandle<T> {
        let mut state = self.inner.lock();

        let cursor = match self.inner.config.mode {
            ReplayMode::All => state.evicted,
            ReplayMode::Latest(window) => state
                .total()
                .saturating_sub(window as u64)
                .max(state.evicted),
        };

        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.insert(id);
        let active = state.subscribers.len();

        // Taken under the lock so no publish can slip between cursor and receiver.
        let published = self.inner.published.subscribe();
        drop(state);

        self.inner.metrics.subscription_changed("added", active);
        log::debug!(
            "Subscriber {} joined channel {} at cursor {} ({} total subscribers)",
            id,
            self.inner.name,
            cursor,
            active
        );

        SubscriptionHandle::new(id, cursor, Arc::clone(&self.inner), published)
    }

    /// Stop accepting items. Subscribers drain what is buffered, then see `Closed`.
    pub fn close(&self) {
        let mut state = self.inner.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        let total = state.total();
        self.inner.published.send_replace(total);
        drop(state);

        log::info!("Closed broadcast channel {}", self.inner.name);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Number of items currently held for replay
    pub fn len(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().buffer.is_empty()
    }

    /// Total number of items ever accepted, including evicted ones
    pub fn published_count(&self) -> u64 {
        self.inner.lock().total()
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn config(&self) -> ReplayConfig {
        self.inner.config
    }
}

impl<T> Clone for BroadcastChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
