use parking_lot::RwLock;
use std::sync::Arc;

/// Callback interface for cross-service edges.
///
/// Most listeners only care about add events; remove and update default to
/// no-ops so implementations stay one method long.
pub trait ServiceListener<V>: Send + Sync {
    fn process_add(&self, value: &V);

    fn process_remove(&self, _value: &V) {}

    fn process_update(&self, _value: &V) {}
}

/// Ordered collection of listeners with synchronous fan-out.
///
/// Listeners are invoked in registration order on the caller's stack; the
/// stack fully unwinds before the owning service handles its next message.
pub struct ListenerSet<V> {
    inner: RwLock<Vec<Arc<dyn ServiceListener<V>>>>,
}

impl<V> ListenerSet<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }

    pub fn add(&self, listener: Arc<dyn ServiceListener<V>>) {
        self.inner.write().push(listener);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn notify_add(&self, value: &V) {
        let listeners = self.inner.read().clone();
        for listener in &listeners {
            listener.process_add(value);
        }
    }

    pub fn notify_update(&self, value: &V) {
        let listeners = self.inner.read().clone();
        for listener in &listeners {
            listener.process_update(value);
        }
    }
}

impl<V> Default for ListenerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
