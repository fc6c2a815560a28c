use crate::service::TradeBookingService;
use crate::types::{Book, Trade, TradeSide};
use execution::ExecutionOrder;
use market_data::PricingSide;
use service_core::{Service, ServiceListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::error;

/// Books execution-service output as trades.
///
/// Side maps BID to BUY and OFFER to SELL; the booked quantity doubles the
/// order's visible quantity, matching the upstream booking arithmetic this
/// pipeline reproduces. Books are assigned round-robin TRSY1, TRSY2, TRSY3
/// with a counter local to this listener instance.
pub struct ExecutionToTradeListener {
    service: Arc<TradeBookingService>,
    next_book: AtomicUsize,
}

impl ExecutionToTradeListener {
    pub fn new(service: Arc<TradeBookingService>) -> Self {
        Self {
            service,
            next_book: AtomicUsize::new(0),
        }
    }

    fn convert(&self, order: &ExecutionOrder) -> Trade {
        let side = match order.side {
            PricingSide::Bid => TradeSide::Buy,
            PricingSide::Offer => TradeSide::Sell,
        };
        let slot = self.next_book.fetch_add(1, Ordering::Relaxed);
        Trade {
            product: order.product.clone(),
            trade_id: order.order_id.clone(),
            price: order.price,
            book: Book::ALL[slot % Book::ALL.len()],
            quantity: order.visible_quantity * 2,
            side,
        }
    }
}

impl ServiceListener<ExecutionOrder> for ExecutionToTradeListener {
    fn process_add(&self, order: &ExecutionOrder) {
        let trade = self.convert(order);
        if let Err(err) = self.service.on_message(trade) {
            error!(%err, order_id = %order.order_id, "failed to book execution");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use execution::OrderType;
    use rust_decimal_macros::dec;

    fn order(id: &str, side: PricingSide) -> ExecutionOrder {
        ExecutionOrder {
            product: products::bond_for_ticker("7Y").unwrap(),
            side,
            order_id: id.to_string(),
            order_type: OrderType::Market,
            price: dec!(99.5),
            visible_quantity: 5_000_000,
            hidden_quantity: 0,
            parent_order_id: None,
            is_child_order: false,
        }
    }

    #[test]
    fn books_wrap_round_robin() {
        let service = Arc::new(TradeBookingService::new());
        let listener = ExecutionToTradeListener::new(Arc::clone(&service));

        for id in ["AAAAAAAA", "BBBBBBBB", "CCCCCCCC", "DDDDDDDD"] {
            listener.process_add(&order(id, PricingSide::Bid));
        }

        assert_eq!(service.get_data("AAAAAAAA").unwrap().book, Book::Trsy1);
        assert_eq!(service.get_data("BBBBBBBB").unwrap().book, Book::Trsy2);
        assert_eq!(service.get_data("CCCCCCCC").unwrap().book, Book::Trsy3);
        assert_eq!(service.get_data("DDDDDDDD").unwrap().book, Book::Trsy1);
    }

    #[test]
    fn conversion_doubles_visible_quantity_and_maps_side() {
        let service = Arc::new(TradeBookingService::new());
        let listener = ExecutionToTradeListener::new(Arc::clone(&service));

        listener.process_add(&order("AAAAAAAA", PricingSide::Bid));
        listener.process_add(&order("BBBBBBBB", PricingSide::Offer));

        let buy = service.get_data("AAAAAAAA").unwrap();
        assert_eq!(buy.side, TradeSide::Buy);
        assert_eq!(buy.quantity, 10_000_000);
        assert_eq!(buy.price, dec!(99.5));

        let sell = service.get_data("BBBBBBBB").unwrap();
        assert_eq!(sell.side, TradeSide::Sell);
    }
}
