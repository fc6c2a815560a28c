use crate::bond::{Bond, BondIdType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tenors of the seven pre-registered on-the-run Treasuries.
pub const TICKERS: [&str; 7] = ["2Y", "3Y", "5Y", "7Y", "10Y", "20Y", "30Y"];

fn maturity(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("static maturity date")
}

/// Look up the on-the-run Treasury for a tenor ticker.
pub fn bond_for_ticker(ticker: &str) -> Option<Bond> {
    let bond = match ticker {
        "2Y" => Bond::new(
            "91282CJL6",
            BondIdType::Cusip,
            "2Y",
            dec!(4.875),
            maturity(2025, 11, 30),
        ),
        "3Y" => Bond::new(
            "91282CJP7",
            BondIdType::Cusip,
            "3Y",
            dec!(4.375),
            maturity(2026, 12, 15),
        ),
        "5Y" => Bond::new(
            "91282CJN2",
            BondIdType::Cusip,
            "5Y",
            dec!(4.375),
            maturity(2028, 11, 30),
        ),
        "7Y" => Bond::new(
            "91282CJM4",
            BondIdType::Cusip,
            "7Y",
            dec!(4.375),
            maturity(2030, 11, 30),
        ),
        "10Y" => Bond::new(
            "91282CJJ1",
            BondIdType::Cusip,
            "10Y",
            dec!(4.5),
            maturity(2033, 11, 15),
        ),
        "20Y" => Bond::new(
            "912810TW8",
            BondIdType::Cusip,
            "20Y",
            dec!(4.75),
            maturity(2043, 11, 15),
        ),
        "30Y" => Bond::new(
            "912810TV0",
            BondIdType::Cusip,
            "30Y",
            dec!(4.75),
            maturity(2053, 11, 15),
        ),
        _ => return None,
    };
    Some(bond)
}

/// Per-unit PV01 for a CUSIP, as of the static snapshot.
pub fn pv01_for(product_id: &str) -> Option<Decimal> {
    let pv01 = match product_id {
        "91282CJL6" => dec!(0.0184433),
        "91282CJP7" => dec!(0.0278920),
        "91282CJN2" => dec!(0.0451297),
        "91282CJM4" => dec!(0.0613336),
        "91282CJJ1" => dec!(0.0840999),
        "912810TW8" => dec!(0.1410550),
        "912810TV0" => dec!(0.1890362),
        _ => return None,
    };
    Some(pv01)
}

/// All seven pre-registered Treasuries in tenor order.
pub fn all_bonds() -> Vec<Bond> {
    TICKERS
        .iter()
        .filter_map(|ticker| bond_for_ticker(ticker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ticker_resolves() {
        for ticker in TICKERS {
            let bond = bond_for_ticker(ticker).unwrap();
            assert_eq!(bond.ticker, ticker);
            assert_eq!(bond.product_id.len(), 9);
            assert!(pv01_for(&bond.product_id).is_some());
        }
    }

    #[test]
    fn unknown_ticker_is_none() {
        assert!(bond_for_ticker("50Y").is_none());
        assert!(pv01_for("000000000").is_none());
    }

    #[test]
    fn pv01_table_matches_snapshot() {
        assert_eq!(pv01_for("91282CJL6"), Some(dec!(0.0184433)));
        assert_eq!(pv01_for("912810TV0"), Some(dec!(0.1890362)));
    }

    #[test]
    fn all_bonds_in_tenor_order() {
        let bonds = all_bonds();
        assert_eq!(bonds.len(), 7);
        assert_eq!(bonds[0].ticker, "2Y");
        assert_eq!(bonds[6].ticker, "30Y");
    }
}
