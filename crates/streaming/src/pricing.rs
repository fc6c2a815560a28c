use crate::types::Price;
use products::parse_fractional;
use service_core::{
    split_fields, subscribe_lines, KeyedStore, ListenerSet, Result, Service, ServiceError,
    ServiceListener,
};
use std::io::BufRead;
use std::sync::Arc;
use tracing::info;

/// Manages mid prices and bid/offer spreads, keyed on product identifier.
pub struct PricingService {
    prices: KeyedStore<Price>,
    listeners: ListenerSet<Price>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            prices: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Price> for PricingService {
    fn get_data(&self, key: &str) -> Option<Price> {
        self.prices.get(key)
    }

    fn on_message(&self, price: Price) -> Result<()> {
        self.prices
            .insert(price.product_id().to_string(), price.clone());
        self.listeners.notify_add(&price);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<Price>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Reads price records of the form `ticker, midFractional, spreadDecimal`.
pub struct PricingConnector {
    service: Arc<PricingService>,
}

impl PricingConnector {
    pub fn new(service: Arc<PricingService>) -> Self {
        Self { service }
    }

    pub fn subscribe<R: BufRead>(&self, reader: R) -> Result<usize> {
        let accepted = subscribe_lines(reader, |line| self.ingest_line(line))?;
        info!(accepted, "price feed drained");
        Ok(accepted)
    }

    fn ingest_line(&self, line: &str) -> Result<()> {
        let fields = split_fields(line);
        if fields.len() != 3 {
            return Err(ServiceError::parse(line, "expected 3 fields"));
        }

        let product = products::bond_for_ticker(fields[0])
            .ok_or_else(|| ServiceError::UnknownProduct(fields[0].to_string()))?;
        let mid = parse_fractional(fields[1])
            .map_err(|e| ServiceError::parse(line, e.to_string()))?;
        let spread: rust_decimal::Decimal = fields[2]
            .parse()
            .map_err(|_| ServiceError::parse(line, "bad spread"))?;
        if spread.is_sign_negative() {
            return Err(ServiceError::parse(line, "negative spread"));
        }

        self.service.on_message(Price::new(product, mid, spread))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_prices_and_keys_by_cusip() {
        let service = Arc::new(PricingService::new());
        let connector = PricingConnector::new(Arc::clone(&service));

        let feed = "2Y,99-16,0.0078125\n30Y,100-08+,0.015625\n";
        let accepted = connector.subscribe(feed.as_bytes()).unwrap();
        assert_eq!(accepted, 2);

        let price = service.get_data("912810TV0").unwrap();
        assert_eq!(price.mid, dec!(100.265625));
        assert_eq!(price.bid_offer_spread, dec!(0.015625));
    }

    #[test]
    fn negative_spread_is_rejected() {
        let service = Arc::new(PricingService::new());
        let connector = PricingConnector::new(Arc::clone(&service));

        let accepted = connector.subscribe("2Y,99-16,-0.01\n".as_bytes()).unwrap();
        assert_eq!(accepted, 0);
        assert!(service.get_data("91282CJL6").is_none());
    }
}
