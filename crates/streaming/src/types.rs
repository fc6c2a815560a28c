use market_data::PricingSide;
use products::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Internal price: mid plus the full bid/offer distance around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub product: Bond,
    pub mid: Decimal,
    pub bid_offer_spread: Decimal,
}

impl Price {
    pub fn new(product: Bond, mid: Decimal, bid_offer_spread: Decimal) -> Self {
        Self {
            product,
            mid,
            bid_offer_spread,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }
}

/// One side of a streamed two-way market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub side: PricingSide,
}

impl PriceStreamOrder {
    pub fn new(price: Decimal, visible_quantity: i64, hidden_quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }

    #[inline]
    pub fn total_quantity(&self) -> i64 {
        self.visible_quantity + self.hidden_quantity
    }
}

/// A two-way streamed market for one product. `bid.price <= offer.price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStream {
    pub product: Bond,
    pub bid_order: PriceStreamOrder,
    pub offer_order: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(product: Bond, bid_order: PriceStreamOrder, offer_order: PriceStreamOrder) -> Self {
        debug_assert!(bid_order.price <= offer_order.price);
        Self {
            product,
            bid_order,
            offer_order,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }
}
