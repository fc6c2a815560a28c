use products::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use trade_booking::TradeSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

impl InquiryState {
    /// Terminal states admit no further transition.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InquiryState::Done | InquiryState::Rejected | InquiryState::CustomerRejected
        )
    }
}

impl fmt::Display for InquiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InquiryState::Received => "RECEIVED",
            InquiryState::Quoted => "QUOTED",
            InquiryState::Done => "DONE",
            InquiryState::Rejected => "REJECTED",
            InquiryState::CustomerRejected => "CUSTOMER_REJECTED",
        };
        write!(f, "{label}")
    }
}

/// A customer inquiry for a quote on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: String,
    pub product: Bond,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: Decimal,
    pub state: InquiryState,
}

impl Inquiry {
    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!InquiryState::Received.is_terminal());
        assert!(!InquiryState::Quoted.is_terminal());
        assert!(InquiryState::Done.is_terminal());
        assert!(InquiryState::Rejected.is_terminal());
        assert!(InquiryState::CustomerRejected.is_terminal());
    }
}
