use crate::service::MarketDataService;
use crate::types::{Order, OrderBook, PricingSide};
use parking_lot::Mutex;
use products::parse_fractional;
use service_core::{split_fields, subscribe_lines, Result, Service, ServiceError};
use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;
use tracing::info;

#[derive(Default)]
struct DepthBuffer {
    bids: Vec<Order>,
    offers: Vec<Order>,
}

/// Reads depth rows of the form
/// `ticker, midFractional, halfSpread, bidQty, offerQty`, accumulating one
/// buffer per product and flushing a full book every `depth` rows.
pub struct MarketDataConnector {
    service: Arc<MarketDataService>,
    buffers: Mutex<HashMap<String, DepthBuffer>>,
}

impl MarketDataConnector {
    pub fn new(service: Arc<MarketDataService>) -> Self {
        Self {
            service,
            buffers: Mutex::new(HashMap::new()),
        }
    }

    pub fn subscribe<R: BufRead>(&self, reader: R) -> Result<usize> {
        let accepted = subscribe_lines(reader, |line| self.ingest_line(line))?;
        info!(accepted, "market data feed drained");
        Ok(accepted)
    }

    fn ingest_line(&self, line: &str) -> Result<()> {
        let fields = split_fields(line);
        if fields.len() < 4 {
            return Err(ServiceError::parse(line, "expected at least 4 fields"));
        }

        let ticker = fields[0];
        let product = products::bond_for_ticker(ticker)
            .ok_or_else(|| ServiceError::UnknownProduct(ticker.to_string()))?;
        let mid = parse_fractional(fields[1])
            .map_err(|e| ServiceError::parse(line, e.to_string()))?;
        let half_spread: rust_decimal::Decimal = fields[2]
            .parse()
            .map_err(|_| ServiceError::parse(line, "bad half-spread"))?;
        let bid_qty: i64 = fields[3]
            .parse()
            .map_err(|_| ServiceError::parse(line, "bad bid quantity"))?;
        let offer_qty: i64 = match fields.get(4) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ServiceError::parse(line, "bad offer quantity"))?,
            None => bid_qty,
        };

        let depth = self.service.depth();
        let full = {
            let mut buffers = self.buffers.lock();
            let buffer = buffers.entry(product.product_id.clone()).or_default();
            buffer.bids.push(Order::new(mid - half_spread, bid_qty, PricingSide::Bid));
            buffer
                .offers
                .push(Order::new(mid + half_spread, offer_qty, PricingSide::Offer));

            if buffer.bids.len() >= depth {
                let flushed = std::mem::take(buffer);
                Some(OrderBook::new(product, flushed.bids, flushed.offers))
            } else {
                None
            }
        };

        if let Some(book) = full {
            self.service.on_message(book)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn flushes_on_every_fifth_row_per_product() {
        let service = Arc::new(MarketDataService::new(5));
        let connector = MarketDataConnector::new(Arc::clone(&service));

        let mut feed = String::new();
        for level in 0..5 {
            feed.push_str(&format!("2Y,99-16,0.0078125,{},{}\n", level + 1, level + 1));
        }
        // interleave a different product that never completes its depth
        feed.push_str("5Y,99-00,0.0078125,1000,1000\n");

        let accepted = connector.subscribe(feed.as_bytes()).unwrap();
        assert_eq!(accepted, 6);

        let book = service.aggregate_depth("91282CJL6").unwrap();
        assert_eq!(book.bid_stack.len(), 5);
        assert_eq!(book.bid_stack[0].price, dec!(99.4921875));
        assert_eq!(book.offer_stack[0].price, dec!(99.5078125));
        assert_eq!(book.bid_stack[4].quantity, 5);

        assert!(service.aggregate_depth("91282CJN2").is_none());
    }

    #[test]
    fn bad_lines_are_dropped_without_aborting() {
        let service = Arc::new(MarketDataService::new(1));
        let connector = MarketDataConnector::new(Arc::clone(&service));

        let feed = "2Y,99-16,0.0078125,1000,1000\n99Y,99-16,0.0078125,1,1\n2Y,nonsense,0.0078125,1,1\n";
        let accepted = connector.subscribe(feed.as_bytes()).unwrap();
        assert_eq!(accepted, 1);
        assert!(service.aggregate_depth("91282CJL6").is_some());
    }

    #[test]
    fn buffer_resets_after_flush() {
        let service = Arc::new(MarketDataService::new(2));
        let connector = MarketDataConnector::new(Arc::clone(&service));

        let feed = "2Y,99-16,0.0078125,1,1\n2Y,99-16,0.0078125,2,2\n2Y,99-16,0.015625,3,3\n";
        connector.subscribe(feed.as_bytes()).unwrap();

        // first two rows flushed; third row is buffered for the next book
        let book = service.aggregate_depth("91282CJL6").unwrap();
        assert_eq!(book.bid_stack.len(), 2);
        assert_eq!(book.bid_stack[1].quantity, 2);
    }
}
