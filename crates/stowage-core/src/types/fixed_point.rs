use std::fmt::{self, Display};
use thiserror::Error as ThisError;

const DECIMALS: usize = 8;
const SCALE: i128 = 100_000_000; // 10^8

///
/// FixedPointError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FixedPointError {
    #[error("invalid fixed-point literal: '{0}'")]
    Syntax(String),

    #[error("fixed-point literal has more than {DECIMALS} fractional digits: '{0}'")]
    Precision(String),

    #[error("fixed-point literal out of range: '{0}'")]
    Range(String),
}

// Parse `[-]digits[.digits]` into a value scaled by 10^8.
fn parse_scaled(literal: &str, allow_negative: bool) -> Result<i128, FixedPointError> {
    let syntax = || FixedPointError::Syntax(literal.to_string());

    let (negative, body) = match literal.strip_prefix('-') {
        Some(rest) if allow_negative => (true, rest),
        Some(_) => return Err(FixedPointError::Range(literal.to_string())),
        None => (false, literal),
    };

    let (integer, fraction) = match body.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (body, ""),
    };

    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() || !digits_only(integer) || !digits_only(fraction) {
        return Err(syntax());
    }
    if body.contains('.') && fraction.is_empty() {
        return Err(syntax());
    }
    if fraction.len() > DECIMALS {
        return Err(FixedPointError::Precision(literal.to_string()));
    }

    let range = || FixedPointError::Range(literal.to_string());

    // 20 integer digits already exceed any 64-bit scaled value.
    if integer.trim_start_matches('0').len() > 20 {
        return Err(range());
    }
    let whole: i128 = integer.parse().map_err(|_| syntax())?;

    let mut frac: i128 = 0;
    if !fraction.is_empty() {
        let padded = format!("{fraction:0<DECIMALS$}");
        frac = padded.parse().map_err(|_| syntax())?;
    }

    let magnitude = whole
        .checked_mul(SCALE)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(range)?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn fmt_scaled(f: &mut fmt::Formatter<'_>, negative: bool, magnitude: u128) -> fmt::Result {
    let scale = SCALE.unsigned_abs();
    let sign = if negative { "-" } else { "" };

    write!(
        f,
        "{sign}{}.{:0width$}",
        magnitude / scale,
        magnitude % scale,
        width = DECIMALS
    )
}

///
/// Fix64
///
/// Signed fixed-point with 8 fractional digits.
/// Stores numbers as `i64` representing value × 1e8 (e.g., -1.25 → -125_000_000).
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fix64(i64);

impl Fix64 {
    pub const DECIMALS: u32 = 8;

    /// Construct from the raw scaled integer. No scaling applied.
    #[must_use]
    pub const fn from_atomic(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parse a decimal literal such as `-12.5` or `0.00000001`.
    pub fn parse(literal: &str) -> Result<Self, FixedPointError> {
        let scaled = parse_scaled(literal, true)?;
        let raw =
            i64::try_from(scaled).map_err(|_| FixedPointError::Range(literal.to_string()))?;

        Ok(Self(raw))
    }
}

impl Display for Fix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scaled(f, self.0 < 0, u128::from(self.0.unsigned_abs()))
    }
}

///
/// UFix64
///
/// Unsigned fixed-point with 8 fractional digits.
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UFix64(u64);

impl UFix64 {
    pub const DECIMALS: u32 = 8;

    #[must_use]
    pub const fn from_atomic(raw: u64) -> Self {
        Self(raw)
    }

    /// Construct from whole units. Scales by 1e8, saturating on overflow.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(100_000_000))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn parse(literal: &str) -> Result<Self, FixedPointError> {
        let scaled = parse_scaled(literal, false)?;
        let raw =
            u64::try_from(scaled).map_err(|_| FixedPointError::Range(literal.to_string()))?;

        Ok(Self(raw))
    }
}

impl Display for UFix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scaled(f, false, u128::from(self.0))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix64_parses_and_formats_canonically() {
        let v = Fix64::parse("-12.5").unwrap();
        assert_eq!(v.get(), -1_250_000_000);
        assert_eq!(v.to_string(), "-12.50000000");

        assert_eq!(Fix64::parse("0.00000001").unwrap().get(), 1);
        assert_eq!(Fix64::parse("7").unwrap().to_string(), "7.00000000");
    }

    #[test]
    fn fix64_extremes_round_trip() {
        for raw in [i64::MIN, i64::MAX, 0, -1] {
            let v = Fix64::from_atomic(raw);
            assert_eq!(Fix64::parse(&v.to_string()), Ok(v));
        }
    }

    #[test]
    fn ufix64_rejects_negative_and_excess_precision() {
        assert!(matches!(
            UFix64::parse("-1.0"),
            Err(FixedPointError::Range(_))
        ));
        assert!(matches!(
            UFix64::parse("1.000000001"),
            Err(FixedPointError::Precision(_))
        ));
        assert!(matches!(
            UFix64::parse("184467440738.00000000"),
            Err(FixedPointError::Range(_))
        ));
    }

    #[test]
    fn malformed_literals_are_syntax_errors() {
        for literal in ["", ".5", "1.", "1.2.3", "abc", "+1.0", "1e8", " 1.0"] {
            assert!(
                matches!(Fix64::parse(literal), Err(FixedPointError::Syntax(_))),
                "{literal:?} should be a syntax error"
            );
        }
    }

    #[test]
    fn ufix64_max_formats_exactly() {
        let v = UFix64::from_atomic(u64::MAX);

        assert_eq!(v.to_string(), "184467440737.09551615");
        assert_eq!(UFix64::parse("184467440737.09551615"), Ok(v));
        assert_eq!(UFix64::from_units(3).to_string(), "3.00000000");
    }
}
