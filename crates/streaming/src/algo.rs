use crate::types::{Price, PriceStream, PriceStreamOrder};
use market_data::PricingSide;
use rust_decimal_macros::dec;
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::error;

const BASE_VISIBLE_QUANTITY: i64 = 10_000_000;

/// Turns internal prices into two-sided streams with an alternating size
/// ladder: visible quantity flips between 10MM and 20MM per event, hidden
/// is always twice visible.
pub struct AlgoStreamingService {
    streams: KeyedStore<PriceStream>,
    listeners: ListenerSet<PriceStream>,
    parity: AtomicBool,
}

impl AlgoStreamingService {
    pub fn new() -> Self {
        Self {
            streams: KeyedStore::new(),
            listeners: ListenerSet::new(),
            parity: AtomicBool::new(false),
        }
    }

    /// Build and publish a stream from a price update.
    pub fn publish_price(&self, price: &Price) -> PriceStream {
        let half_spread = price.bid_offer_spread / dec!(2);
        let bid = price.mid - half_spread;
        let offer = price.mid + half_spread;

        let doubled = self.parity.fetch_xor(true, Ordering::Relaxed);
        let visible = if doubled {
            BASE_VISIBLE_QUANTITY * 2
        } else {
            BASE_VISIBLE_QUANTITY
        };
        let hidden = visible * 2;

        let stream = PriceStream::new(
            price.product.clone(),
            PriceStreamOrder::new(bid, visible, hidden, PricingSide::Bid),
            PriceStreamOrder::new(offer, visible, hidden, PricingSide::Offer),
        );

        self.streams
            .insert(stream.product_id().to_string(), stream.clone());
        self.listeners.notify_add(&stream);
        stream
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<PriceStream> for AlgoStreamingService {
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

/// Edge from pricing into the algo streaming layer.
pub struct AlgoStreamingPriceListener {
    service: Arc<AlgoStreamingService>,
}

impl AlgoStreamingPriceListener {
    pub fn new(service: Arc<AlgoStreamingService>) -> Self {
        Self { service }
    }
}

impl ServiceListener<Price> for AlgoStreamingPriceListener {
    fn process_add(&self, price: &Price) {
        if price.bid_offer_spread.is_sign_negative() {
            error!(product = price.product_id(), "negative spread, price ignored");
            return;
        }
        self.service.publish_price(price);
    }
}
