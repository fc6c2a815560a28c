use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondIdType {
    Cusip,
    Isin,
}

/// Immutable bond identity. Equality and hashing are by `product_id` alone;
/// the descriptive fields ride along for display and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bond {
    pub product_id: String,
    pub id_type: BondIdType,
    pub ticker: String,
    pub coupon: Decimal,
    pub maturity: NaiveDate,
}

impl Bond {
    pub fn new(
        product_id: impl Into<String>,
        id_type: BondIdType,
        ticker: impl Into<String>,
        coupon: Decimal,
        maturity: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            id_type,
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

impl PartialEq for Bond {
    fn eq(&self, other: &Self) -> bool {
        self.product_id == other.product_id
    }
}

impl Eq for Bond {}

impl Hash for Bond {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.product_id.hash(state);
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ticker, self.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn equality_is_by_product_id() {
        let maturity = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        let a = Bond::new("91282CJL6", BondIdType::Cusip, "2Y", dec!(4.875), maturity);
        let mut b = a.clone();
        b.coupon = dec!(0);
        assert_eq!(a, b);

        let c = Bond::new("91282CJP7", BondIdType::Cusip, "2Y", dec!(4.875), maturity);
        assert_ne!(a, c);
    }
}
