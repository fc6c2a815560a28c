use market_data::PricingSide;
use products::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Fok,
    Ioc,
    Market,
    Limit,
    Stop,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderType::Fok => "FOK",
            OrderType::Ioc => "IOC",
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
        };
        write!(f, "{label}")
    }
}

/// Venue an order is executed against. Recorded for the audit trail; it does
/// not alter routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    Brokertec,
    Espeed,
    Cme,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Market::Brokertec => "BROKERTEC",
            Market::Espeed => "ESPEED",
            Market::Cme => "CME",
        };
        write!(f, "{label}")
    }
}

/// An order placeable on an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub product: Bond,
    pub side: PricingSide,
    pub order_id: String,
    pub order_type: OrderType,
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub parent_order_id: Option<String>,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }

    #[inline]
    pub fn total_quantity(&self) -> i64 {
        self.visible_quantity + self.hidden_quantity
    }
}
