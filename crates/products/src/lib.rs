//! Product reference data for the seven on-the-run U.S. Treasuries, plus the
//! fractional price codec and timestamp formatting shared by the pipeline.

pub mod bond;
pub mod fractional;
pub mod statics;

pub use bond::{Bond, BondIdType};
pub use fractional::{format_fractional, parse_fractional, FractionError};
pub use statics::{all_bonds, bond_for_ticker, pv01_for, TICKERS};

use chrono::{DateTime, Utc};

/// Timestamp format used by every persisted record: `YYYY-MM-DD HH:MM:SS.mmm`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_has_millisecond_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(format_timestamp(ts), "2024-01-15 09:30:00.250");
    }
}
