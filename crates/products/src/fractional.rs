use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FractionError {
    #[error("missing '-' separator in {0:?}")]
    MissingSeparator(String),

    #[error("bad whole part in {0:?}")]
    BadWhole(String),

    #[error("bad 32nds field in {0:?}")]
    BadThirtySeconds(String),

    #[error("bad 256ths field in {0:?}")]
    BadTwoFiftySixths(String),
}

/// Parse the Treasury fractional quote `whole-XXY` into a decimal price.
///
/// `XX` is a zero-padded count of 1/32nds; the optional trailing `Y` is a
/// digit 0-7 of extra 1/256ths, with `+` standing for 4/256ths. So `99-00`
/// is 99.0 and `100-08+` is 100 + 8/32 + 4/256.
pub fn parse_fractional(text: &str) -> Result<Decimal, FractionError> {
    let (whole_part, fraction_part) = text
        .split_once('-')
        .ok_or_else(|| FractionError::MissingSeparator(text.to_string()))?;

    let whole: i64 = whole_part
        .trim()
        .parse()
        .map_err(|_| FractionError::BadWhole(text.to_string()))?;

    if fraction_part.len() < 2 || !fraction_part.is_char_boundary(2) {
        return Err(FractionError::BadThirtySeconds(text.to_string()));
    }
    let thirty_seconds: u32 = fraction_part[..2]
        .parse()
        .map_err(|_| FractionError::BadThirtySeconds(text.to_string()))?;
    if thirty_seconds > 31 {
        return Err(FractionError::BadThirtySeconds(text.to_string()));
    }

    let two_fifty_sixths: u32 = match &fraction_part[2..] {
        "" => 0,
        "+" => 4,
        digit => {
            let parsed: u32 = digit
                .parse()
                .map_err(|_| FractionError::BadTwoFiftySixths(text.to_string()))?;
            if parsed > 7 {
                return Err(FractionError::BadTwoFiftySixths(text.to_string()));
            }
            parsed
        }
    };

    Ok(Decimal::from(whole)
        + Decimal::from(thirty_seconds) / dec!(32)
        + Decimal::from(two_fifty_sixths) / dec!(256))
}

/// Render a decimal price in the `whole-XXY` convention.
///
/// The 256ths residue is rounded to the nearest eighth of a 32nd; a residue
/// of 4 prints as `+` and a residue of 0 is omitted.
pub fn format_fractional(price: Decimal) -> String {
    let whole = price.trunc();
    let fraction = price - whole;
    let mut whole = whole.to_i64().unwrap_or(0);

    let in_thirty_seconds = fraction * dec!(32);
    let mut thirty_seconds = in_thirty_seconds.trunc().to_i64().unwrap_or(0);
    let mut eighths = ((in_thirty_seconds - in_thirty_seconds.trunc()) * dec!(8))
        .round()
        .to_i64()
        .unwrap_or(0);

    if eighths == 8 {
        eighths = 0;
        thirty_seconds += 1;
    }
    if thirty_seconds == 32 {
        thirty_seconds = 0;
        whole += 1;
    }

    let suffix = match eighths {
        0 => String::new(),
        4 => "+".to_string(),
        digit => digit.to_string(),
    };

    format!("{}-{:02}{}", whole, thirty_seconds, suffix)
}
