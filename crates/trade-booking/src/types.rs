use products::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade or inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Signed multiplier applied to quantities: BUY adds, SELL subtracts.
    #[inline]
    pub fn sign(&self) -> i64 {
        match self {
            TradeSide::Buy => 1,
            TradeSide::Sell => -1,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            other => Err(format!("unknown side {other:?}")),
        }
    }
}

/// The three Treasury trading books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Book {
    Trsy1,
    Trsy2,
    Trsy3,
}

impl Book {
    pub const ALL: [Book; 3] = [Book::Trsy1, Book::Trsy2, Book::Trsy3];
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Book::Trsy1 => write!(f, "TRSY1"),
            Book::Trsy2 => write!(f, "TRSY2"),
            Book::Trsy3 => write!(f, "TRSY3"),
        }
    }
}

impl FromStr for Book {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRSY1" => Ok(Book::Trsy1),
            "TRSY2" => Ok(Book::Trsy2),
            "TRSY3" => Ok(Book::Trsy3),
            other => Err(format!("unknown book {other:?}")),
        }
    }
}

/// A booked trade against a particular book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub product: Bond,
    pub trade_id: String,
    pub price: Decimal,
    pub book: Book,
    pub quantity: i64,
    pub side: TradeSide,
}

impl Trade {
    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }

    /// Quantity signed by side.
    #[inline]
    pub fn signed_quantity(&self) -> i64 {
        self.side.sign() * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_and_signs() {
        assert_eq!("BUY".parse::<TradeSide>().unwrap().sign(), 1);
        assert_eq!("SELL".parse::<TradeSide>().unwrap().sign(), -1);
        assert!("HOLD".parse::<TradeSide>().is_err());
    }

    #[test]
    fn book_round_trips_through_display() {
        for book in Book::ALL {
            assert_eq!(book.to_string().parse::<Book>().unwrap(), book);
        }
    }
}
