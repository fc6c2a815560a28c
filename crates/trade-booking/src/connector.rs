use crate::service::TradeBookingService;
use crate::types::{Book, Trade, TradeSide};
use products::parse_fractional;
use service_core::{split_fields, subscribe_lines, Result, Service, ServiceError};
use std::io::BufRead;
use std::sync::Arc;
use tracing::info;

/// Reads trade records of the form
/// `ticker, tradeId, priceFractional, book, quantity, BUY|SELL`.
pub struct TradeBookingConnector {
    service: Arc<TradeBookingService>,
}

impl TradeBookingConnector {
    pub fn new(service: Arc<TradeBookingService>) -> Self {
        Self { service }
    }

    pub fn subscribe<R: BufRead>(&self, reader: R) -> Result<usize> {
        let accepted = subscribe_lines(reader, |line| self.ingest_line(line))?;
        info!(accepted, "trade feed drained");
        Ok(accepted)
    }

    fn ingest_line(&self, line: &str) -> Result<()> {
        let fields = split_fields(line);
        if fields.len() != 6 {
            return Err(ServiceError::parse(line, "expected 6 fields"));
        }

        let product = products::bond_for_ticker(fields[0])
            .ok_or_else(|| ServiceError::UnknownProduct(fields[0].to_string()))?;
        let price = parse_fractional(fields[2])
            .map_err(|e| ServiceError::parse(line, e.to_string()))?;
        let book: Book = fields[3]
            .parse()
            .map_err(|e: String| ServiceError::parse(line, e))?;
        let quantity: i64 = fields[4]
            .parse()
            .map_err(|_| ServiceError::parse(line, "bad quantity"))?;
        let side: TradeSide = fields[5]
            .parse()
            .map_err(|e: String| ServiceError::parse(line, e))?;

        self.service.on_message(Trade {
            product,
            trade_id: fields[1].to_string(),
            price,
            book,
            quantity,
            side,
        })
    }
}
