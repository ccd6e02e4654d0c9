use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::sync::mpsc;

use crate::domain::WinEvent;

type Callback = Arc<dyn Fn(&WinEvent) + Send + Sync>;

/// Returned by `subscribe`; hand it back to `unsubscribe` to stop notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Notifies interested parties about freshly inserted events.
///
/// A trigger only: subscribers re-fetch or fold the single delta into their
/// own state. Aggregation never reads from here.
#[derive(Default)]
pub struct LiveFeed {
    next_id: AtomicU64,
    subscribers: Mutex<BTreeMap<u64, Callback>>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, on_insert: F) -> SubscriptionHandle
    where
        F: Fn(&WinEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                subscribers.insert(id, Arc::new(on_insert));
            }
            Err(poisoned) => {
                warn!("Live feed registry was poisoned, recovering");
                poisoned.into_inner().insert(id, Arc::new(on_insert));
            }
        }
        debug!("Live feed subscription {} added", id);
        SubscriptionHandle(id)
    }

    /// Returns false when the handle was already removed
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let removed = match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.remove(&handle.0),
            Err(poisoned) => poisoned.into_inner().remove(&handle.0),
        };
        removed.is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Subscribe with a channel instead of a callback. Dropping the listener
    /// unsubscribes it.
    pub fn listen(self: &Arc<Self>) -> FeedListener {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        FeedListener {
            feed: Arc::clone(self),
            handle,
            rx,
        }
    }

    /// Invoke every current subscriber in subscription order
    pub fn publish(&self, event: &WinEvent) {
        // Snapshot so callbacks may (un)subscribe without deadlocking
        let callbacks: Vec<Callback> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        };

        debug!("Publishing event {} to {} subscribers", event.id, callbacks.len());
        for callback in callbacks {
            callback(event);
        }
    }
}

/// Channel end of a feed subscription, see `LiveFeed::listen`
pub struct FeedListener {
    feed: Arc<LiveFeed>,
    handle: SubscriptionHandle,
    rx: mpsc::UnboundedReceiver<WinEvent>,
}

impl FeedListener {
    pub async fn recv(&mut self) -> Option<WinEvent> {
        self.rx.recv().await
    }
}

impl Drop for FeedListener {
    fn drop(&mut self) {
        self.feed.unsubscribe(self.handle);
        debug!("Live feed listener {} closed", self.handle.0);
    }
}
