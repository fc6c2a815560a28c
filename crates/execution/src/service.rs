use crate::types::{ExecutionOrder, Market};
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::sync::Arc;
use tracing::{error, info};

/// Accepts algo executions and re-publishes them downstream, keyed on
/// product identifier.
pub struct ExecutionService {
    orders: KeyedStore<ExecutionOrder>,
    listeners: ListenerSet<ExecutionOrder>,
}

impl ExecutionService {
    pub fn new() -> Self {
        Self {
            orders: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Execute an order on a market. The venue tag goes to the audit log;
    /// routing is identical to the listener path.
    pub fn execute_order(&self, order: ExecutionOrder, market: Market) -> Result<()> {
        info!(
            order_id = %order.order_id,
            product = order.product_id(),
            %market,
            "executing order"
        );
        self.on_message(order)
    }
}

impl Default for ExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<ExecutionOrder> for ExecutionService {
    fn get_data(&self, key: &str) -> Option<ExecutionOrder> {
        self.orders.get(key)
    }

    fn on_message(&self, order: ExecutionOrder) -> Result<()> {
        self.orders
            .insert(order.product_id().to_string(), order.clone());
        self.listeners.notify_add(&order);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<ExecutionOrder>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Edge from the algo-execution layer into the execution service.
pub struct ExecutionAlgoListener {
    service: Arc<ExecutionService>,
}

impl ExecutionAlgoListener {
    pub fn new(service: Arc<ExecutionService>) -> Self {
        Self { service }
    }
}

impl ServiceListener<ExecutionOrder> for ExecutionAlgoListener {
    fn process_add(&self, order: &ExecutionOrder) {
        if let Err(err) = self.service.on_message(order.clone()) {
            error!(%err, order_id = %order.order_id, "execution ingest failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderType;
    use market_data::PricingSide;
    use parking_lot::Mutex;
    use rust_decimal::Decimal;

    fn sample_order(order_id: &str) -> ExecutionOrder {
        ExecutionOrder {
            product: products::bond_for_ticker("10Y").unwrap(),
            side: PricingSide::Bid,
            order_id: order_id.to_string(),
            order_type: OrderType::Market,
            price: Decimal::from(100),
            visible_quantity: 10_000_000,
            hidden_quantity: 0,
            parent_order_id: None,
            is_child_order: false,
        }
    }

    struct Capture(Arc<Mutex<Vec<String>>>);

    impl ServiceListener<ExecutionOrder> for Capture {
        fn process_add(&self, order: &ExecutionOrder) {
            self.0.lock().push(order.order_id.clone());
        }
    }

    #[test]
    fn stores_by_product_and_fans_out() {
        let service = ExecutionService::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Arc::new(Capture(Arc::clone(&seen))));

        service.on_message(sample_order("AAAAAAAA")).unwrap();
        service.on_message(sample_order("BBBBBBBB")).unwrap();

        // keyed by product, so the second order overwrites the first
        assert_eq!(
            service.get_data("91282CJJ1").unwrap().order_id,
            "BBBBBBBB"
        );
        assert_eq!(*seen.lock(), vec!["AAAAAAAA", "BBBBBBBB"]);
    }

    #[test]
    fn direct_execution_routes_like_the_listener_path() {
        let service = ExecutionService::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Arc::new(Capture(Arc::clone(&seen))));

        service
            .execute_order(sample_order("CCCCCCCC"), Market::Cme)
            .unwrap();
        assert_eq!(*seen.lock(), vec!["CCCCCCCC"]);
    }
}
