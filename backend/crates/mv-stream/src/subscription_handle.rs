use crate::broadcast_channel::ChannelInner;
use crate::{Result as StreamErrorResult, StreamError};

use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;

/// One subscriber's read position in a [`crate::BroadcastChannel`].
///
/// Dropping the handle deregisters it, the same as [`SubscriptionHandle::cancel`].
pub struct SubscriptionHandle<T> {
    id: u64,
    cursor: u64,
    inner: Arc<ChannelInner<T>>,
    published: watch::Receiver<u64>,
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
    registered: bool,
}

/// Cancels a subscription from another task, waking it if it is suspended.
#[derive(Clone)]
pub struct Canceller {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }
}

impl<T: Clone> SubscriptionHandle<T> {
    pub(crate) fn new(
        id: u64,
        cursor: u64,
        inner: Arc<ChannelInner<T>>,
        published: watch::Receiver<u64>,
    ) -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);

        Self {
            id,
            cursor,
            inner,
            published,
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
            registered: true,
        }
    }

    /// Wait for the item at the cursor, return it and advance.
    ///
    /// Fails with `Cancelled` once the handle is cancelled, `Closed` after the
    /// channel is closed and drained, and `Lagged` when a latest-N window
    /// evicted items this subscriber had not read yet; reading resumes at the
    /// oldest retained item after a `Lagged`.
    pub async fn next_item(&mut self) -> StreamErrorResult<T> {
        loop {
            // Mark seen before inspecting the buffer; a publish after this
            // point makes `changed()` resolve immediately.
            self.published.borrow_and_update();

            if let Some(result) = self.try_next() {
                return result;
            }

            tokio::select! {
                biased;
                _ = self.cancel_rx.changed() => {}
                changed = self.published.changed() => {
                    if changed.is_err() {
                        self.release();
                        return Err(StreamError::closed());
                    }
                }
            }
        }
    }

    /// Non-blocking read: `None` when the subscriber is caught up.
    pub fn try_next(&mut self) -> Option<StreamErrorResult<T>> {
        if *self.cancel_rx.borrow() {
            self.release();
            return Some(Err(StreamError::cancelled()));
        }

        let state = self.inner.lock();

        if self.cursor < state.evicted {
            let missed = state.evicted - self.cursor;
            self.cursor = state.evicted;
            drop(state);

            self.inner.metrics.subscriber_lagged(missed);
            log::warn!(
                "Subscriber {} on channel {} lagged, missed {} items",
                self.id,
                self.inner.name,
                missed
            );
            return Some(Err(StreamError::lagged(missed)));
        }

        let offset = (self.cursor - state.evicted) as usize;
        if let Some(item) = state.buffer.get(offset) {
            let item = item.clone();
            drop(state);
            self.cursor += 1;
            return Some(Ok(item));
        }

        if state.closed {
            return Some(Err(StreamError::closed()));
        }

        None
    }

    /// Release the handle. Later reads fail with `Cancelled`.
    pub fn cancel(&mut self) {
        self.cancel_tx.send_replace(true);
        self.release();
    }

    pub fn canceller(&self) -> Canceller {
        Canceller {
            cancel_tx: Arc::clone(&self.cancel_tx),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Absolute position of the next item this handle will read
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Adapt into a stream of items. The stream ends on cancel or close;
    /// `Lagged` is yielded as an error and reading continues.
    pub fn into_stream(self) -> impl Stream<Item = StreamErrorResult<T>> + Send + 'static
    where
        T: Send + 'static,
    {
        futures::stream::unfold(self, |mut handle| async move {
            match handle.next_item().await {
                Ok(item) => Some((Ok(item), handle)),
                Err(e) if e.is_terminal() => None,
                Err(e) => Some((Err(e), handle)),
            }
        })
    }
}

impl<T> SubscriptionHandle<T> {
    fn release(&mut self) {
        if self.registered {
            self.registered = false;
            self.inner.deregister(self.id);
        }
    }
}

impl<T> Drop for SubscriptionHandle<T> {
    fn drop(&mut self) {
        self.release();
    }
}
