//! Observer lists and one-shot registrations.
//!
//! Providers publish change batches through an [`Emitter`]. Subscribing
//! returns a [`Registration`] that removes the listener when disposed or
//! dropped. Watches use the same handle type.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::Mutex;
use tokio::sync::mpsc;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A handle to something that must be released exactly once.
///
/// Disposing runs the release action; later calls do nothing. Dropping an
/// undisposed registration disposes it.
#[must_use = "dropping a Registration releases it immediately"]
pub struct Registration {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Registration {
    /// Creates a registration that runs `release` when disposed.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A registration with nothing to release.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Releases the underlying resource. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

struct Listeners<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener<T>)>>,
}

/// An explicit observer list.
///
/// Each [`fire`](Emitter::fire) delivers one value to every listener
/// subscribed at that moment, in subscription order.
pub struct Emitter<T> {
    listeners: Arc<Listeners<T>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Listeners {
                next_id: AtomicU64::new(1),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Adds a listener. It stays subscribed until the registration is released.
    pub fn subscribe<F>(&self, listener: F) -> Registration
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.listeners.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.entries.lock().push((id, Arc::new(listener)));

        let listeners = Arc::downgrade(&self.listeners);
        Registration::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.entries.lock().retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Delivers `value` to all current listeners.
    pub fn fire(&self, value: &T) {
        // Snapshot so listeners may subscribe or unsubscribe while being called.
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .entries
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.entries.lock().len()
    }
}

impl<T: Clone + Send + 'static> Emitter<T> {
    /// Subscribes through an unbounded channel, for async consumers.
    ///
    /// The listener is removed when the returned registration is released.
    pub fn subscribe_channel(&self) -> (mpsc::UnboundedReceiver<T>, Registration) {
        let (tx, rx) = mpsc::unbounded_channel();
        let registration = self.subscribe(move |value: &T| {
            let _ = tx.send(value.clone());
        });
        (rx, registration)
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.entries.lock().len())
            .finish()
    }
}
