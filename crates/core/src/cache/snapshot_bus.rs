//! Observer registry for reactive queries.
//!
//! The storage layer publishes the full current result set for a partition
//! after every committed write; subscribers hold a watch channel that always
//! carries the latest snapshot. Delivery never blocks the writer, slow
//! observers skip intermediate snapshots, and dropping a subscription
//! releases it deterministically.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;

/// Registry of per-key snapshot channels for one entity kind.
///
/// Keys are partition keys (or a global key for unpartitioned kinds). Each
/// key maps to a single watch channel shared by all of its subscribers.
pub struct SnapshotBus<T> {
    channels: DashMap<String, watch::Sender<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> SnapshotBus<T> {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribes to a key, seeding the channel with `initial` when no live
    /// channel exists. Because the seed is the current committed result set
    /// and every later commit publishes, a new subscriber immediately
    /// observes the current state.
    pub fn subscribe_with(
        &self,
        key: &str,
        initial: impl FnOnce() -> Vec<T>,
    ) -> Snapshots<T> {
        let rx = match self.channels.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                let (tx, rx) = watch::channel(initial());
                slot.insert(tx);
                rx
            }
            Entry::Occupied(slot) => {
                let sender = slot.get();
                if sender.receiver_count() == 0 {
                    // All previous subscribers are gone; the retained value
                    // may predate writes that skipped publishing. Reseed.
                    sender.send_replace(initial());
                }
                sender.subscribe()
            }
        };
        Snapshots { rx }
    }

    /// Publishes a freshly committed result set to any live subscribers.
    /// A key nobody observes is dropped from the registry.
    pub fn publish(&self, key: &str, rows: Vec<T>) {
        if let Some(sender) = self.channels.get(key) {
            if sender.receiver_count() == 0 {
                drop(sender);
                self.channels.remove(key);
                return;
            }
            sender.send_replace(rows);
        }
    }

    /// Whether anyone currently observes the key. Lets writers skip the
    /// post-commit re-query when there is no audience.
    pub fn has_observers(&self, key: &str) -> bool {
        self.channels
            .get(key)
            .map(|sender| sender.receiver_count() > 0)
            .unwrap_or(false)
    }
}

impl<T: Clone + Send + Sync + 'static> Default for SnapshotBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A live sequence of full query snapshots for one key.
pub struct Snapshots<T> {
    rx: watch::Receiver<Vec<T>>,
}

impl<T: Clone> Snapshots<T> {
    /// The latest snapshot without waiting.
    pub fn current(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Waits for the next committed snapshot after the last one seen.
    /// Returns `None` once the publishing side is gone.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
