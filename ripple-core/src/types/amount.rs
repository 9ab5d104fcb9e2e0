//! Native and issued currency amounts.
use super::{AccountId, Currency};
use crate::{codec::FormatError, utils::DROPS_PER_XRP};
use serde_json::{json, Value};
use std::{fmt, str::FromStr};

/// Smallest normalized mantissa of a non-zero issued value.
pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
/// Largest normalized mantissa of an issued value.
pub const MAX_MANTISSA: u64 = 9_999_999_999_999_999;
/// Smallest exponent of a non-zero issued value.
pub const MIN_EXPONENT: i32 = -96;
/// Largest exponent of an issued value.
pub const MAX_EXPONENT: i32 = 80;
/// Largest drop count the 62 value bits of a native amount can carry.
pub const MAX_NATIVE_DROPS: u64 = (1 << 62) - 1;

const SIGNIFICANT_DIGITS: usize = 16;

/// A decimal value `mantissa * 10^exponent` in the normalized form issued amounts use.
///
/// Non-zero values always have a 16-digit mantissa and an exponent in `[-96, 80]`. Zero is
/// represented with a zero mantissa and exponent and is never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IssuedValue {
    mantissa: u64,
    exponent: i32,
    negative: bool,
}

impl IssuedValue {
    /// Zero.
    pub const ZERO: IssuedValue = IssuedValue { mantissa: 0, exponent: 0, negative: false };

    /// Builds a value from an arbitrary mantissa and exponent, normalizing it.
    ///
    /// Values too small to represent become zero, values too large are rejected. When `strict`
    /// is set, mantissas that would lose non-zero digits during normalization are rejected
    /// instead of truncated.
    pub fn new(
        mantissa: u64,
        exponent: i32,
        negative: bool,
        strict: bool,
    ) -> Result<Self, FormatError> {
        if mantissa == 0 {
            return Ok(Self::ZERO)
        }

        let mut mantissa = mantissa;
        let mut exponent = exponent as i64;
        while mantissa < MIN_MANTISSA {
            mantissa *= 10;
            exponent -= 1;
        }
        while mantissa > MAX_MANTISSA {
            if strict && mantissa % 10 != 0 {
                return Err(FormatError::InvalidAmount(format!(
                    "{mantissa}e{exponent} has more than {SIGNIFICANT_DIGITS} significant digits"
                )))
            }
            mantissa /= 10;
            exponent += 1;
        }

        if exponent < MIN_EXPONENT as i64 {
            return Ok(Self::ZERO)
        }
        if exponent > MAX_EXPONENT as i64 {
            return Err(FormatError::InvalidAmount(format!("exponent {exponent} is too large")))
        }

        Ok(IssuedValue { mantissa, exponent: exponent as i32, negative })
    }

    /// Parses decimal or scientific notation, e.g. `-1.25`, `100`, `5e-3`.
    pub fn parse(input: &str, strict: bool) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidAmount(input.to_string());

        let (negative, body) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        let (number, exp) = match body.find(|c| c == 'e' || c == 'E') {
            Some(idx) => {
                (&body[..idx], body[idx + 1..].parse::<i32>().map_err(|_| invalid())?)
            }
            None => (body, 0),
        };
        let (integer, fraction) = match number.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (number, ""),
        };
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() && fraction.is_empty() || !is_digits(integer) || !is_digits(fraction)
        {
            return Err(invalid())
        }

        let digits = format!("{integer}{fraction}");
        let mut exponent = exp as i64 - fraction.len() as i64;

        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::ZERO)
        }
        let significant = digits.trim_end_matches('0');
        exponent += (digits.len() - significant.len()) as i64;

        let significant = if significant.len() > SIGNIFICANT_DIGITS {
            if strict {
                return Err(FormatError::InvalidAmount(format!(
                    "{input} has more than {SIGNIFICANT_DIGITS} significant digits"
                )))
            }
            exponent += (significant.len() - SIGNIFICANT_DIGITS) as i64;
            &significant[..SIGNIFICANT_DIGITS]
        } else {
            significant
        };

        let mantissa = significant.parse::<u64>().map_err(|_| invalid())?;
        let exponent = i32::try_from(exponent).map_err(|_| invalid())?;
        Self::new(mantissa, exponent, negative, strict)
    }

    /// The normalized mantissa (zero for zero).
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// The normalized exponent (zero for zero).
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Whether the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// The same magnitude with the opposite sign.
    #[must_use]
    pub fn negate(self) -> Self {
        if self.is_zero() {
            return self
        }
        IssuedValue { negative: !self.negative, ..self }
    }
}

/// Canonical text: plain decimal for exponents in `[-25, 0]`, `<digits>e<exp>` otherwise.
impl fmt::Display for IssuedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0")
        }
        if self.negative {
            f.write_str("-")?;
        }

        if self.exponent < -25 || self.exponent > 0 {
            let mut mantissa = self.mantissa;
            let mut exponent = self.exponent;
            while mantissa % 10 == 0 {
                mantissa /= 10;
                exponent += 1;
            }
            return write!(f, "{mantissa}e{exponent}")
        }

        let digits = self.mantissa.to_string();
        let point = digits.len() as i32 + self.exponent;
        let (integer, fraction) = if point <= 0 {
            ("0".to_string(), format!("{}{}", "0".repeat((-point) as usize), digits))
        } else {
            let point = point as usize;
            (digits[..point].to_string(), digits[point..].to_string())
        };
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            f.write_str(&integer)
        } else {
            write!(f, "{integer}.{fraction}")
        }
    }
}

impl FromStr for IssuedValue {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssuedValue::parse(s, true)
    }
}

/// A balance of an issued currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssuedAmount {
    /// The numeric value
    pub value: IssuedValue,
    /// The currency code, never the native sentinel
    pub currency: Currency,
    /// The issuing account
    pub issuer: AccountId,
}

/// Either a drop count of the native currency or an issued balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Amount {
    /// Drops of the native currency
    Native(u64),
    /// An issued currency balance
    Issued(IssuedAmount),
}

impl Amount {
    /// A native amount, rejecting values above the 62-bit bound.
    pub fn drops(drops: u64) -> Result<Self, FormatError> {
        if drops > MAX_NATIVE_DROPS {
            return Err(FormatError::OutOfRange { what: "native amount", value: drops.to_string() })
        }
        Ok(Amount::Native(drops))
    }

    /// An issued amount. The currency must not be the native sentinel.
    pub fn issued(
        value: IssuedValue,
        currency: Currency,
        issuer: AccountId,
    ) -> Result<Self, FormatError> {
        if currency.is_native() {
            return Err(FormatError::InvalidAmount(
                "issued amounts cannot use the native currency code".to_string(),
            ))
        }
        Ok(Amount::Issued(IssuedAmount { value, currency, issuer }))
    }

    /// Whether this is a native amount.
    pub fn is_native(&self) -> bool {
        matches!(self, Amount::Native(_))
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Amount::Native(drops) => *drops == 0,
            Amount::Issued(issued) => issued.value.is_zero(),
        }
    }

    /// Parses a native amount from its string form.
    ///
    /// Strict mode only accepts whole drops. Otherwise a string containing a decimal point is
    /// read as whole units of the native currency, with at most six fractional digits.
    pub fn parse_native(input: &str, strict: bool) -> Result<Self, FormatError> {
        let out_of_range =
            || FormatError::OutOfRange { what: "native amount", value: input.to_string() };

        if input.starts_with('-') {
            return Err(out_of_range())
        }
        if let Some((units, fraction)) = input.split_once('.') {
            if strict {
                return Err(FormatError::InvalidAmount(format!(
                    "{input}: native amounts must be given in whole drops"
                )))
            }
            let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
            if !is_digits(units) || !is_digits(fraction) || units.len() + fraction.len() == 0 {
                return Err(FormatError::InvalidAmount(input.to_string()))
            }
            let fraction = fraction.trim_end_matches('0');
            if fraction.len() > 6 {
                return Err(FormatError::InvalidAmount(format!(
                    "{input}: more precision than one drop"
                )))
            }
            let units =
                if units.is_empty() { 0 } else { units.parse::<u64>().map_err(|_| out_of_range())? };
            let fraction_drops = if fraction.is_empty() {
                0
            } else {
                format!("{fraction:0<6}").parse::<u64>().map_err(|_| out_of_range())?
            };
            let drops = units
                .checked_mul(DROPS_PER_XRP)
                .and_then(|d| d.checked_add(fraction_drops))
                .ok_or_else(out_of_range)?;
            return Amount::drops(drops)
        }

        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidAmount(input.to_string()))
        }
        let drops = input.parse::<u64>().map_err(|_| out_of_range())?;
        Amount::drops(drops)
    }

    /// Reads an amount from its JSON form: a drop string or number for native amounts, an
    /// object with `value`, `currency` and `issuer` for issued ones, or a
    /// `value/currency/issuer` string.
    pub fn from_json(value: &Value, strict: bool) -> Result<Self, FormatError> {
        match value {
            Value::String(s) => match s.split('/').collect::<Vec<_>>().as_slice() {
                [single] => Amount::parse_native(single, strict),
                [value, currency, issuer] => Amount::issued(
                    IssuedValue::parse(value, strict)?,
                    currency.parse()?,
                    issuer.parse()?,
                ),
                _ => Err(FormatError::InvalidAmount(s.clone())),
            },
            Value::Number(n) => match n.as_u64() {
                Some(drops) => Amount::drops(drops),
                None => Err(FormatError::OutOfRange { what: "native amount", value: n.to_string() }),
            },
            Value::Object(map) => {
                let text = match map.get("value") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => return Err(FormatError::InvalidAmount("missing value".to_string())),
                };
                let currency = match map.get("currency") {
                    Some(Value::String(s)) => s.parse::<Currency>()?,
                    _ => return Err(FormatError::InvalidAmount("missing currency".to_string())),
                };
                let issuer = match map.get("issuer") {
                    Some(Value::String(s)) => s.parse::<AccountId>()?,
                    _ => return Err(FormatError::InvalidAmount("missing issuer".to_string())),
                };
                Amount::issued(IssuedValue::parse(&text, strict)?, currency, issuer)
            }
            _ => Err(FormatError::InvalidAmount(value.to_string())),
        }
    }

    /// The JSON form: a drop string for native amounts, an object for issued ones.
    pub fn to_json(&self) -> Value {
        match self {
            Amount::Native(drops) => Value::String(drops.to_string()),
            Amount::Issued(issued) => json!({
                "currency": issued.currency.to_string(),
                "issuer": issued.issuer.to_address(),
                "value": issued.value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Native(drops) => write!(f, "{drops}"),
            Amount::Issued(issued) => {
                write!(f, "{}/{}/{}", issued.value, issued.currency, issued.issuer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_into_sixteen_digits() {
        let one = IssuedValue::parse("1", true).unwrap();
        assert_eq!(one.mantissa(), MIN_MANTISSA);
        assert_eq!(one.exponent(), -15);
        assert_eq!(one.to_string(), "1");

        let big = IssuedValue::parse("9999999999999999e80", true).unwrap();
        assert_eq!(big.mantissa(), MAX_MANTISSA);
        assert_eq!(big.exponent(), MAX_EXPONENT);
        assert!(IssuedValue::parse("1e97", true).is_err());
    }

    #[test]
    fn canonical_text() {
        for (input, text) in [
            ("0.5", "0.5"),
            ("-1.25", "-1.25"),
            ("100", "100"),
            ("1000000000000000", "1000000000000000"),
            ("1e16", "1e16"),
            ("0.0000000001", "0.0000000001"),
            ("123e-30", "123e-30"),
            ("000", "0"),
            ("-0", "0"),
        ] {
            assert_eq!(IssuedValue::parse(input, true).unwrap().to_string(), text, "{input}");
        }
    }

    #[test]
    fn underflow_becomes_zero() {
        assert!(IssuedValue::parse("1e-200", true).unwrap().is_zero());
    }

    #[test]
    fn strict_precision() {
        let input = "1.23456789012345678";
        assert!(IssuedValue::parse(input, true).is_err());
        let truncated = IssuedValue::parse(input, false).unwrap();
        assert_eq!(truncated.to_string(), "1.234567890123456");
        // trailing zeros are not significant
        assert!(IssuedValue::parse("12345678901234560000", true).is_ok());
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", ".", "1.2.3", "abc", "1e", "--1", "1e5.5"] {
            assert!(IssuedValue::parse(input, false).is_err(), "{input}");
        }
    }

    #[test]
    fn native_amounts() {
        assert_eq!(Amount::parse_native("1000", true).unwrap(), Amount::Native(1000));
        assert!(Amount::parse_native("1.5", true).is_err());
        assert_eq!(Amount::parse_native("1.5", false).unwrap(), Amount::Native(1_500_000));
        assert!(Amount::parse_native("0.0000001", false).is_err());
        assert!(Amount::parse_native("-1", false).is_err());
        assert!(Amount::drops(MAX_NATIVE_DROPS).is_ok());
        assert!(Amount::drops(MAX_NATIVE_DROPS + 1).is_err());
    }

    #[test]
    fn json_forms() {
        let issued = json!({
            "value": "1.5",
            "currency": "USD",
            "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
        });
        let amount = Amount::from_json(&issued, true).unwrap();
        assert_eq!(amount.to_json(), issued);

        let triplet = Amount::from_json(
            &json!("1.5/USD/rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"),
            true,
        )
        .unwrap();
        assert_eq!(triplet, amount);

        assert_eq!(Amount::from_json(&json!(25), true).unwrap(), Amount::Native(25));
        assert!(Amount::from_json(&json!(-25), true).is_err());

        let native_currency = json!({
            "value": "1",
            "currency": "XRP",
            "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
        });
        assert!(Amount::from_json(&native_currency, true).is_err());
    }
}
