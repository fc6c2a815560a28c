use crate::connector::InquiryQuoteConnector;
use crate::types::{Inquiry, InquiryState};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use service_core::{
    Connector, KeyedStore, ListenerSet, Result, Service, ServiceError, ServiceListener,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Quote an inbound inquiry at par.
const AUTO_QUOTE: Decimal = Decimal::ONE_HUNDRED;

/// Customer inquiry service, keyed on inquiry id (not product id: every
/// inquiry is unique).
///
/// Inbound inquiries arrive in RECEIVED and are auto-quoted; the quote
/// round-trips through the quote connector, which replays the inquiry back
/// into `on_message` as QUOTED and then DONE. Terminal inquiries are
/// immutable.
pub struct InquiryService {
    inquiries: KeyedStore<Inquiry>,
    listeners: ListenerSet<Inquiry>,
    quote_connector: Mutex<Option<Arc<InquiryQuoteConnector>>>,
}

impl InquiryService {
    pub fn new() -> Arc<Self> {
        let service = Arc::new(Self {
            inquiries: KeyedStore::new(),
            listeners: ListenerSet::new(),
            quote_connector: Mutex::new(None),
        });
        let connector = Arc::new(InquiryQuoteConnector::new(Arc::downgrade(&service)));
        *service.quote_connector.lock() = Some(connector);
        service
    }

    /// Quote an inquiry back to the client.
    ///
    /// The connector drives the QUOTED and DONE transitions, re-entering
    /// `on_message` for each so listeners observe the full trajectory.
    pub fn send_quote(&self, inquiry_id: &str, price: Decimal) -> Result<()> {
        let mut inquiry = self
            .inquiries
            .get(inquiry_id)
            .ok_or_else(|| ServiceError::UnknownProduct(inquiry_id.to_string()))?;
        if inquiry.state.is_terminal() {
            return Err(self.frozen(&inquiry, InquiryState::Quoted));
        }

        inquiry.price = price;
        let connector = self.quote_connector.lock().clone();
        match connector {
            Some(connector) => connector.publish(inquiry),
            None => Ok(()),
        }
    }

    /// Reject an inquiry from the client. Terminal.
    pub fn reject_inquiry(&self, inquiry_id: &str) -> Result<()> {
        self.transition(inquiry_id, InquiryState::Rejected, |state| {
            !state.is_terminal()
        })
    }

    /// Customer walked away after the quote. Only valid from QUOTED.
    pub fn customer_reject(&self, inquiry_id: &str) -> Result<()> {
        self.transition(inquiry_id, InquiryState::CustomerRejected, |state| {
            state == InquiryState::Quoted
        })
    }

    fn transition<F>(&self, inquiry_id: &str, to: InquiryState, allowed: F) -> Result<()>
    where
        F: Fn(InquiryState) -> bool,
    {
        let mut inquiry = self
            .inquiries
            .get(inquiry_id)
            .ok_or_else(|| ServiceError::UnknownProduct(inquiry_id.to_string()))?;
        if !allowed(inquiry.state) {
            return Err(self.frozen(&inquiry, to));
        }

        info!(inquiry_id, from = %inquiry.state, %to, "inquiry transition");
        inquiry.state = to;
        self.inquiries.insert(inquiry_id.to_string(), inquiry.clone());
        self.listeners.notify_add(&inquiry);
        Ok(())
    }

    fn frozen(&self, inquiry: &Inquiry, to: InquiryState) -> ServiceError {
        ServiceError::InvalidTransition {
            key: inquiry.inquiry_id.clone(),
            from: inquiry.state.to_string(),
            to: to.to_string(),
        }
    }
}

impl Service<Inquiry> for InquiryService {
    fn get_data(&self, key: &str) -> Option<Inquiry> {
        self.inquiries.get(key)
    }

    fn on_message(&self, inquiry: Inquiry) -> Result<()> {
        if let Some(existing) = self.inquiries.get(&inquiry.inquiry_id) {
            if existing.state.is_terminal() {
                let err = self.frozen(&existing, inquiry.state);
                warn!(%err, "ignoring update to settled inquiry");
                return Err(err);
            }
        }

        self.inquiries
            .insert(inquiry.inquiry_id.clone(), inquiry.clone());
        self.listeners.notify_add(&inquiry);

        if inquiry.state == InquiryState::Received {
            self.send_quote(&inquiry.inquiry_id, AUTO_QUOTE)?;
        }
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<Inquiry>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;
    use rust_decimal_macros::dec;
    use trade_booking::TradeSide;

    fn inbound(id: &str) -> Inquiry {
        Inquiry {
            inquiry_id: id.to_string(),
            product: products::bond_for_ticker("2Y").unwrap(),
            side: TradeSide::Buy,
            quantity: 1_000_000,
            price: dec!(100.83203125),
            state: InquiryState::Received,
        }
    }

    struct StateTrail(Arc<PlMutex<Vec<InquiryState>>>);

    impl ServiceListener<Inquiry> for StateTrail {
        fn process_add(&self, inquiry: &Inquiry) {
            self.0.lock().push(inquiry.state);
        }
    }

    #[test]
    fn inbound_inquiry_runs_received_quoted_done() {
        let service = InquiryService::new();
        let trail = Arc::new(PlMutex::new(Vec::new()));
        service.add_listener(Arc::new(StateTrail(Arc::clone(&trail))));

        service.on_message(inbound("I1")).unwrap();

        assert_eq!(
            *trail.lock(),
            vec![
                InquiryState::Received,
                InquiryState::Quoted,
                InquiryState::Done
            ]
        );
        let settled = service.get_data("I1").unwrap();
        assert_eq!(settled.state, InquiryState::Done);
        assert_eq!(settled.price, dec!(100));
    }

    #[test]
    fn done_inquiries_are_immutable() {
        let service = InquiryService::new();
        service.on_message(inbound("I1")).unwrap();

        assert!(matches!(
            service.send_quote("I1", dec!(99)),
            Err(ServiceError::InvalidTransition { .. })
        ));
        assert!(service.reject_inquiry("I1").is_err());

        // price never changed after settlement
        assert_eq!(service.get_data("I1").unwrap().price, dec!(100));
    }

    #[test]
    fn rejection_is_terminal_from_any_live_state() {
        let service = InquiryService::new();
        let mut inquiry = inbound("I2");
        inquiry.state = InquiryState::Quoted;
        service.on_message(inquiry).unwrap();

        service.reject_inquiry("I2").unwrap();
        assert_eq!(
            service.get_data("I2").unwrap().state,
            InquiryState::Rejected
        );
        assert!(service.customer_reject("I2").is_err());
    }

    #[test]
    fn customer_reject_requires_quoted() {
        let service = InquiryService::new();
        let mut inquiry = inbound("I3");
        inquiry.state = InquiryState::Quoted;
        service.on_message(inquiry).unwrap();

        service.customer_reject("I3").unwrap();
        assert_eq!(
            service.get_data("I3").unwrap().state,
            InquiryState::CustomerRejected
        );
    }

    #[test]
    fn unknown_inquiry_cannot_be_quoted() {
        let service = InquiryService::new();
        assert!(service.send_quote("missing", dec!(100)).is_err());
    }
}
