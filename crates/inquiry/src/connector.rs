use crate::service::InquiryService;
use crate::types::{Inquiry, InquiryState};
use products::parse_fractional;
use service_core::{split_fields, subscribe_lines, Connector, Result, Service, ServiceError};
use std::io::BufRead;
use std::sync::{Arc, Weak};
use tracing::info;
use trade_booking::TradeSide;

/// Outbound quote channel back to the client.
///
/// Publishing a quote acknowledges it and completes the inquiry: the
/// connector replays the inquiry into the service as QUOTED, then
/// immediately as DONE. It holds the service weakly; the service owns the
/// connector.
pub struct InquiryQuoteConnector {
    service: Weak<InquiryService>,
}

impl InquiryQuoteConnector {
    pub fn new(service: Weak<InquiryService>) -> Self {
        Self { service }
    }
}

impl Connector<Inquiry> for InquiryQuoteConnector {
    fn publish(&self, mut inquiry: Inquiry) -> Result<()> {
        let Some(service) = self.service.upgrade() else {
            return Ok(());
        };

        inquiry.state = InquiryState::Quoted;
        service.on_message(inquiry.clone())?;

        inquiry.state = InquiryState::Done;
        service.on_message(inquiry)
    }
}

/// Reads inbound inquiries of the form
/// `inquiryId, ticker, BUY|SELL, quantity, priceFractional`.
pub struct InquiryConnector {
    service: Arc<InquiryService>,
}

impl InquiryConnector {
    pub fn new(service: Arc<InquiryService>) -> Self {
        Self { service }
    }

    pub fn subscribe<R: BufRead>(&self, reader: R) -> Result<usize> {
        let accepted = subscribe_lines(reader, |line| self.ingest_line(line))?;
        info!(accepted, "inquiry feed drained");
        Ok(accepted)
    }

    fn ingest_line(&self, line: &str) -> Result<()> {
        let fields = split_fields(line);
        if fields.len() != 5 {
            return Err(ServiceError::parse(line, "expected 5 fields"));
        }

        let product = products::bond_for_ticker(fields[1])
            .ok_or_else(|| ServiceError::UnknownProduct(fields[1].to_string()))?;
        let side: TradeSide = fields[2]
            .parse()
            .map_err(|e: String| ServiceError::parse(line, e))?;
        let quantity: i64 = fields[3]
            .parse()
            .map_err(|_| ServiceError::parse(line, "bad quantity"))?;
        let price = parse_fractional(fields[4])
            .map_err(|e| ServiceError::parse(line, e.to_string()))?;

        self.service.on_message(Inquiry {
            inquiry_id: fields[0].to_string(),
            product,
            side,
            quantity,
            price,
            state: InquiryState::Received,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn inbound_lines_settle_through_the_quote_loop() {
        let service = InquiryService::new();
        let connector = InquiryConnector::new(Arc::clone(&service));

        let feed = "I1,2Y,BUY,146000,100-213\nI2,10Y,SELL,150000,99-08+\n";
        let accepted = connector.subscribe(feed.as_bytes()).unwrap();
        assert_eq!(accepted, 2);

        let settled = service.get_data("I1").unwrap();
        assert_eq!(settled.state, InquiryState::Done);
        assert_eq!(settled.price, dec!(100));
        assert_eq!(settled.quantity, 146_000);
        assert_eq!(service.get_data("I2").unwrap().state, InquiryState::Done);
    }

    #[test]
    fn malformed_inquiries_are_dropped() {
        let service = InquiryService::new();
        let connector = InquiryConnector::new(Arc::clone(&service));

        let feed = "I1,2Y,BUY,146000\nI2,2Y,MAYBE,1,100-00\nI3,40Y,BUY,1,100-00\n";
        let accepted = connector.subscribe(feed.as_bytes()).unwrap();
        assert_eq!(accepted, 0);
        assert!(service.get_data("I1").is_none());
    }
}
