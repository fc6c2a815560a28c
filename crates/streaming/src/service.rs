use crate::types::PriceStream;
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::sync::Arc;
use tracing::error;

/// Publishes two-way price streams to downstream sinks, keyed on product
/// identifier.
pub struct StreamingService {
    streams: KeyedStore<PriceStream>,
    listeners: ListenerSet<PriceStream>,
}

impl StreamingService {
    pub fn new() -> Self {
        Self {
            streams: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Fan a stream out to every registered listener.
    pub fn publish_price(&self, stream: &PriceStream) {
        self.listeners.notify_add(stream);
    }
}

impl Default for StreamingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<PriceStream> for StreamingService {
    fn get_data(&self, key: &str) -> Option<PriceStream> {
        self.streams.get(key)
    }

    fn on_message(&self, stream: PriceStream) -> Result<()> {
        self.streams
            .insert(stream.product_id().to_string(), stream);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<PriceStream>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Edge from the algo streaming layer into streaming.
pub struct StreamingAlgoListener {
    service: Arc<StreamingService>,
}

impl StreamingAlgoListener {
    pub fn new(service: Arc<StreamingService>) -> Self {
        Self { service }
    }
}

impl ServiceListener<PriceStream> for StreamingAlgoListener {
    fn process_add(&self, stream: &PriceStream) {
        if let Err(err) = self.service.on_message(stream.clone()) {
            error!(%err, product = stream.product_id(), "stream ingest failed");
            return;
        }
        self.service.publish_price(stream);
    }
}
