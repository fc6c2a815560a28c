use crate::types::Trade;
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::sync::Arc;
use tracing::debug;

/// Books trades to their book, keyed on trade id.
pub struct TradeBookingService {
    trades: KeyedStore<Trade>,
    listeners: ListenerSet<Trade>,
}

impl TradeBookingService {
    pub fn new() -> Self {
        Self {
            trades: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Record a trade in the keyed store without fan-out.
    pub fn book_trade(&self, trade: &Trade) {
        debug!(
            trade_id = %trade.trade_id,
            product = trade.product_id(),
            book = %trade.book,
            side = %trade.side,
            quantity = trade.quantity,
            "booking trade"
        );
        self.trades.insert(trade.trade_id.clone(), trade.clone());
    }

    #[inline]
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn trade_ids(&self) -> Vec<String> {
        self.trades.keys()
    }
}

impl Default for TradeBookingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Trade> for TradeBookingService {
    fn get_data(&self, key: &str) -> Option<Trade> {
        self.trades.get(key)
    }

    fn on_message(&self, trade: Trade) -> Result<()> {
        self.book_trade(&trade);
        self.listeners.notify_add(&trade);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<Trade>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Book, TradeSide};
    use rust_decimal_macros::dec;

    #[test]
    fn booking_is_idempotent_by_trade_id() {
        let service = TradeBookingService::new();
        let trade = Trade {
            product: products::bond_for_ticker("2Y").unwrap(),
            trade_id: "T1".to_string(),
            price: dec!(100),
            book: Book::Trsy1,
            quantity: 1_000_000,
            side: TradeSide::Buy,
        };

        service.on_message(trade.clone()).unwrap();
        service.on_message(trade).unwrap();

        assert_eq!(service.trade_count(), 1);
        assert_eq!(service.get_data("T1").unwrap().quantity, 1_000_000);
    }
}
