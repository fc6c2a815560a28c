use crate::types::{BidOffer, OrderBook};
use service_core::{
    KeyedStore, ListenerSet, Result, Service, ServiceError, ServiceListener,
};
use std::sync::Arc;
use tracing::debug;

/// Distributes depth-N order books, keyed on product identifier.
pub struct MarketDataService {
    depth: usize,
    books: KeyedStore<OrderBook>,
    listeners: ListenerSet<OrderBook>,
}

impl MarketDataService {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            books: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Best bid and offer for a product.
    ///
    /// Fails with `MissingDepth` when either stack is empty and with
    /// `UnknownProduct` when no book has been ingested for the id.
    pub fn best_bid_offer(&self, product_id: &str) -> Result<BidOffer> {
        let book = self
            .books
            .get(product_id)
            .ok_or_else(|| ServiceError::UnknownProduct(product_id.to_string()))?;

        match (book.best_bid(), book.best_offer()) {
            (Some(bid), Some(offer)) => Ok(BidOffer {
                bid: bid.clone(),
                offer: offer.clone(),
            }),
            _ => Err(ServiceError::MissingDepth(product_id.to_string())),
        }
    }

    /// The most recent full-depth book for a product, unchanged.
    pub fn aggregate_depth(&self, product_id: &str) -> Option<OrderBook> {
        self.books.get(product_id)
    }
}

impl Service<OrderBook> for MarketDataService {
    fn get_data(&self, key: &str) -> Option<OrderBook> {
        self.books.get(key)
    }

    fn on_message(&self, book: OrderBook) -> Result<()> {
        debug!(
            product = book.product_id(),
            bids = book.bid_stack.len(),
            offers = book.offer_stack.len(),
            "order book update"
        );
        self.books.insert(book.product_id().to_string(), book.clone());
        self.listeners.notify_add(&book);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<OrderBook>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Order, PricingSide};
    use rust_decimal_macros::dec;

    fn sample_book() -> OrderBook {
        OrderBook::new(
            products::bond_for_ticker("5Y").unwrap(),
            vec![Order::new(dec!(99.50), 10_000_000, PricingSide::Bid)],
            vec![Order::new(dec!(99.75), 10_000_000, PricingSide::Offer)],
        )
    }

    #[test]
    fn stores_and_serves_best_bid_offer() {
        let service = MarketDataService::new(5);
        service.on_message(sample_book()).unwrap();

        let top = service.best_bid_offer("91282CJN2").unwrap();
        assert_eq!(top.bid.price, dec!(99.50));
        assert_eq!(top.offer.price, dec!(99.75));
        assert_eq!(top.spread(), dec!(0.25));
    }

    #[test]
    fn unknown_product_is_an_error() {
        let service = MarketDataService::new(5);
        assert!(matches!(
            service.best_bid_offer("91282CJL6"),
            Err(ServiceError::UnknownProduct(_))
        ));
    }

    #[test]
    fn empty_stack_reports_missing_depth() {
        let service = MarketDataService::new(5);
        let mut book = sample_book();
        book.offer_stack.clear();
        service.on_message(book).unwrap();

        assert!(matches!(
            service.best_bid_offer("91282CJN2"),
            Err(ServiceError::MissingDepth(_))
        ));
    }

    #[test]
    fn aggregate_depth_returns_latest_book() {
        let service = MarketDataService::new(5);
        service.on_message(sample_book()).unwrap();
        let mut updated = sample_book();
        updated.bid_stack[0].price = dec!(99.00);
        service.on_message(updated.clone()).unwrap();

        assert_eq!(service.aggregate_depth("91282CJN2"), Some(updated));
    }
}
