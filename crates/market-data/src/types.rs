use products::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a two-way market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingSide {
    Bid,
    Offer,
}

impl fmt::Display for PricingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingSide::Bid => write!(f, "BID"),
            PricingSide::Offer => write!(f, "OFFER"),
        }
    }
}

/// One level of market-data depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub price: Decimal,
    pub quantity: i64,
    pub side: PricingSide,
}

impl Order {
    pub fn new(price: Decimal, quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Top-of-book pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

impl BidOffer {
    #[inline]
    pub fn spread(&self) -> Decimal {
        self.offer.price - self.bid.price
    }
}

/// Snapshot order book for one product.
///
/// Position 0 of each stack is the best level: highest bid, lowest offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub product: Bond,
    pub bid_stack: Vec<Order>,
    pub offer_stack: Vec<Order>,
}

impl OrderBook {
    pub fn new(product: Bond, bid_stack: Vec<Order>, offer_stack: Vec<Order>) -> Self {
        Self {
            product,
            bid_stack,
            offer_stack,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }

    #[inline]
    pub fn best_bid(&self) -> Option<&Order> {
        self.bid_stack.first()
    }

    #[inline]
    pub fn best_offer(&self) -> Option<&Order> {
        self.offer_stack.first()
    }

    /// Top-of-book spread, if both sides have depth.
    pub fn top_spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) => Some(offer.price - bid.price),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_year() -> Bond {
        products::bond_for_ticker("2Y").unwrap()
    }

    #[test]
    fn best_levels_come_from_position_zero() {
        let book = OrderBook::new(
            two_year(),
            vec![
                Order::new(dec!(99.50), 10_000_000, PricingSide::Bid),
                Order::new(dec!(99.25), 20_000_000, PricingSide::Bid),
            ],
            vec![
                Order::new(dec!(99.75), 10_000_000, PricingSide::Offer),
                Order::new(dec!(100.00), 20_000_000, PricingSide::Offer),
            ],
        );

        assert_eq!(book.best_bid().unwrap().price, dec!(99.50));
        assert_eq!(book.best_offer().unwrap().price, dec!(99.75));
        assert_eq!(book.top_spread(), Some(dec!(0.25)));
    }

    #[test]
    fn empty_side_has_no_spread() {
        let book = OrderBook::new(
            two_year(),
            vec![],
            vec![Order::new(dec!(99.75), 1, PricingSide::Offer)],
        );
        assert_eq!(book.top_spread(), None);
    }
}
