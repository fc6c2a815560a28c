use crate::listener::ServiceListener;
use crate::Result;
use std::sync::Arc;

/// Keyed, listener-bearing service contract.
///
/// `on_message` is the single mutation entry point a connector invokes for
/// new or updated data; concrete services add their own domain mutators
/// (book a trade, quote an inquiry) which funnel through the same store and
/// fan-out machinery.
pub trait Service<V>: Send + Sync {
    /// Fetch a copy of the stored value for `key`, if any.
    fn get_data(&self, key: &str) -> Option<V>;

    /// Ingest a value: store it under its key, then notify listeners in
    /// registration order.
    fn on_message(&self, value: V) -> Result<()>;

    /// Register a listener for callbacks on events flowing through this
    /// service. Listeners are invoked in the order they were added.
    fn add_listener(&self, listener: Arc<dyn ServiceListener<V>>);

    /// Number of registered listeners.
    fn listener_count(&self) -> usize;
}
