use crate::order_id::OrderIdGenerator;
use crate::types::{ExecutionOrder, OrderType};
use market_data::{BidOffer, MarketDataService, OrderBook, PricingSide};
use products::Bond;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Crossing threshold: the algo aggresses only when the top-of-book spread
/// is at most 1/128 of a dollar.
pub const TIGHT_SPREAD: Decimal = dec!(0.0078125);

/// Crossing layer listening to order-book updates.
///
/// When the market is tight it emits one MARKET order that crosses the
/// spread, alternating the aggressed side per crossing event across the
/// whole service instance: first the bid is hit, then the offer is lifted,
/// and so on.
pub struct AlgoExecutionService {
    executions: KeyedStore<ExecutionOrder>,
    listeners: ListenerSet<ExecutionOrder>,
    order_ids: OrderIdGenerator,
    crossings: AtomicU64,
}

impl AlgoExecutionService {
    pub fn new() -> Self {
        Self {
            executions: KeyedStore::new(),
            listeners: ListenerSet::new(),
            order_ids: OrderIdGenerator::new(),
            crossings: AtomicU64::new(0),
        }
    }

    /// Evaluate a top-of-book pair against the crossing policy.
    ///
    /// Returns the emitted order, or `None` when the spread is too wide. A
    /// skipped market does not consume a turn in the side alternation.
    pub fn algo_execute(&self, product: &Bond, top: &BidOffer) -> Option<ExecutionOrder> {
        if top.spread() > TIGHT_SPREAD {
            return None;
        }

        let crossing = self.crossings.fetch_add(1, Ordering::Relaxed);
        let (side, price, quantity) = if crossing % 2 == 0 {
            (PricingSide::Bid, top.bid.price, top.bid.quantity)
        } else {
            (PricingSide::Offer, top.offer.price, top.offer.quantity)
        };

        let order = ExecutionOrder {
            product: product.clone(),
            side,
            order_id: self.order_ids.next_id(),
            order_type: OrderType::Market,
            price,
            visible_quantity: quantity,
            hidden_quantity: 0,
            parent_order_id: None,
            is_child_order: false,
        };

        debug!(
            product = order.product_id(),
            order_id = %order.order_id,
            side = %order.side,
            "crossing tight market"
        );
        self.executions
            .insert(order.product_id().to_string(), order.clone());
        self.listeners.notify_add(&order);
        Some(order)
    }
}

impl Default for AlgoExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<ExecutionOrder> for AlgoExecutionService {
    fn get_data(&self, key: &str) -> Option<ExecutionOrder> {
        self.executions.get(key)
    }

    fn on_message(&self, order: ExecutionOrder) -> Result<()> {
        self.executions
            .insert(order.product_id().to_string(), order);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<ExecutionOrder>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Edge from the market-data service into the algo layer.
///
/// Top of book comes from the market-data service's own accessor, so a book
/// with an empty side surfaces as `MissingDepth` and the crossing event is
/// skipped.
pub struct AlgoExecutionBookListener {
    service: Arc<AlgoExecutionService>,
    market_data: Arc<MarketDataService>,
}

impl AlgoExecutionBookListener {
    pub fn new(service: Arc<AlgoExecutionService>, market_data: Arc<MarketDataService>) -> Self {
        Self {
            service,
            market_data,
        }
    }
}

impl ServiceListener<OrderBook> for AlgoExecutionBookListener {
    fn process_add(&self, book: &OrderBook) {
        match self.market_data.best_bid_offer(book.product_id()) {
            Ok(top) => {
                self.service.algo_execute(&book.product, &top);
            }
            Err(err) => warn!(%err, "crossing skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data::Order;

    fn two_year() -> Bond {
        products::bond_for_ticker("2Y").unwrap()
    }

    fn top_with_spread(spread: Decimal) -> BidOffer {
        let bid = dec!(100) - spread;
        BidOffer {
            bid: Order::new(bid, 10_000_000, PricingSide::Bid),
            offer: Order::new(dec!(100), 10_000_000, PricingSide::Offer),
        }
    }

    #[test]
    fn tight_market_alternates_sides_starting_with_bid() {
        let service = AlgoExecutionService::new();
        let product = two_year();
        let top = top_with_spread(TIGHT_SPREAD);

        let first = service.algo_execute(&product, &top).unwrap();
        assert_eq!(first.side, PricingSide::Bid);
        assert_eq!(first.price, dec!(99.9921875));
        assert_eq!(first.visible_quantity, 10_000_000);
        assert_eq!(first.hidden_quantity, 0);
        assert_eq!(first.order_type, OrderType::Market);
        assert!(!first.is_child_order);
        assert!(first.parent_order_id.is_none());

        let second = service.algo_execute(&product, &top).unwrap();
        assert_eq!(second.side, PricingSide::Offer);
        assert_eq!(second.price, dec!(100));

        let third = service.algo_execute(&product, &top).unwrap();
        assert_eq!(third.side, PricingSide::Bid);
        assert_ne!(first.order_id, second.order_id);
        assert_ne!(second.order_id, third.order_id);
    }

    #[test]
    fn wide_market_produces_no_order() {
        let service = AlgoExecutionService::new();
        let product = two_year();
        assert_eq!(
            service.algo_execute(&product, &top_with_spread(dec!(0.015625))),
            None
        );

        // a skipped market must not consume a turn in the alternation
        let order = service
            .algo_execute(&product, &top_with_spread(TIGHT_SPREAD))
            .unwrap();
        assert_eq!(order.side, PricingSide::Bid);
    }

    #[test]
    fn listener_crosses_through_the_market_data_accessor() {
        let market_data = Arc::new(MarketDataService::new(1));
        let algo = Arc::new(AlgoExecutionService::new());
        let listener =
            AlgoExecutionBookListener::new(Arc::clone(&algo), Arc::clone(&market_data));

        let book = OrderBook::new(
            two_year(),
            vec![Order::new(dec!(99.9921875), 10_000_000, PricingSide::Bid)],
            vec![Order::new(dec!(100), 10_000_000, PricingSide::Offer)],
        );
        market_data.on_message(book.clone()).unwrap();
        listener.process_add(&book);

        let order = algo.get_data("91282CJL6").unwrap();
        assert_eq!(order.side, PricingSide::Bid);
        assert_eq!(order.price, dec!(99.9921875));
    }

    #[test]
    fn empty_stack_skips_the_crossing_event() {
        let market_data = Arc::new(MarketDataService::new(1));
        let algo = Arc::new(AlgoExecutionService::new());
        let listener =
            AlgoExecutionBookListener::new(Arc::clone(&algo), Arc::clone(&market_data));

        let book = OrderBook::new(
            two_year(),
            vec![Order::new(dec!(99.9921875), 10_000_000, PricingSide::Bid)],
            vec![],
        );
        market_data.on_message(book.clone()).unwrap();
        listener.process_add(&book);

        assert!(algo.get_data("91282CJL6").is_none());

        // the next tight book still starts the alternation on the bid
        let tight = OrderBook::new(
            two_year(),
            vec![Order::new(dec!(99.9921875), 10_000_000, PricingSide::Bid)],
            vec![Order::new(dec!(100), 10_000_000, PricingSide::Offer)],
        );
        market_data.on_message(tight.clone()).unwrap();
        listener.process_add(&tight);
        assert_eq!(
            algo.get_data("91282CJL6").unwrap().side,
            PricingSide::Bid
        );
    }
}
