//! In-process event relay
//!
//! One inbound engine stream is demultiplexed into independently
//! subscribable named topics. Each topic keeps an ordered listener
//! registry: insertion order is invocation order for a given emission.

use std::sync::{Arc, Mutex, Weak};

/// Callback registered on a topic
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Callback<T>)>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

/// One named event topic with an ordered listener registry.
///
/// Clones share the registry.
pub struct Topic<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Default for Topic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Topic<T> {
    /// Create an empty topic
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// Register a callback.
    ///
    /// Returns a handle whose [`Subscription::unsubscribe`] removes
    /// exactly this callback and nothing else.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(callback)));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Remove every listener, regardless of outstanding handles
    pub fn clear(&self) {
        self.registry.lock().unwrap().listeners.clear();
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.registry.lock().unwrap().listeners.len()
    }

    /// Invoke all listeners in subscription order.
    ///
    /// The registry lock is not held during callbacks, so a listener may
    /// subscribe or unsubscribe without deadlocking; such changes take
    /// effect from the next emission.
    pub fn emit(&self, event: &T) {
        let listeners: Vec<Callback<T>> = {
            let registry = self.registry.lock().unwrap();
            registry
                .listeners
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };
        for listener in listeners {
            listener(event);
        }
    }
}

/// Handle for removing a single registered callback.
///
/// A handle that outlives a [`Topic::clear`] is inert.
pub struct Subscription<T> {
    registry: Weak<Mutex<Registry<T>>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Remove the callback this handle was created for
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
