use crate::codec::FormatError;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Characters allowed in a three-character currency code.
const ISO_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789<>(){}[]|?!@#$%^&*";

/// A 20-byte currency code.
///
/// The all-zero code is the native currency and prints as `XRP`. Standard codes keep three
/// ASCII characters at bytes 12..15 with every other byte zero. Codes with a leading `0x01`
/// byte carry demurrage parameters. Everything else is opaque and prints as 40 hex digits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(pub [u8; 20]);

/// Demurrage parameters packed into a currency code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Demurrage {
    /// The three-character code shown to users
    pub code: [u8; 3],
    /// Reference start of the interest period, in network time
    pub start_date: u32,
    /// The e-folding time of the rate, in seconds
    pub interest_period: f64,
}

impl Currency {
    /// Width in bytes.
    pub const LEN: usize = 20;

    /// The native currency sentinel.
    pub const XRP: Currency = Currency([0u8; 20]);

    /// Builds a standard code from three characters.
    pub fn from_code(code: &str) -> Result<Self, FormatError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| ISO_CHARSET.contains(b)) {
            return Err(FormatError::InvalidCurrency(code.to_string()))
        }
        if code == "XRP" {
            return Ok(Currency::XRP)
        }
        let mut out = [0u8; 20];
        out[12..15].copy_from_slice(bytes);
        Ok(Currency(out))
    }

    /// Packs demurrage parameters into a code tagged with `0x01`.
    pub fn from_demurrage(demurrage: &Demurrage) -> Self {
        let mut out = [0u8; 20];
        out[0] = 0x01;
        out[1..4].copy_from_slice(&demurrage.code);
        out[4..8].copy_from_slice(&demurrage.start_date.to_be_bytes());
        out[8..16].copy_from_slice(&demurrage.interest_period.to_be_bytes());
        Currency(out)
    }

    /// Whether this is the native currency sentinel.
    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The three-character code if the currency is in standard form.
    pub fn iso_code(&self) -> Option<&str> {
        let standard = self.0[..12].iter().chain(&self.0[15..]).all(|b| *b == 0);
        if !standard || self.is_native() {
            return None
        }
        let code = &self.0[12..15];
        if !code.iter().all(|b| ISO_CHARSET.contains(b)) || code == b"XRP" {
            return None
        }
        std::str::from_utf8(code).ok()
    }

    /// Whether the code carries demurrage parameters.
    pub fn is_demurrage(&self) -> bool {
        self.0[0] == 0x01
    }

    /// Unpacks the demurrage parameters, if any.
    pub fn demurrage(&self) -> Option<Demurrage> {
        if !self.is_demurrage() {
            return None
        }
        let mut code = [0u8; 3];
        code.copy_from_slice(&self.0[1..4]);
        let mut date = [0u8; 4];
        date.copy_from_slice(&self.0[4..8]);
        let mut rate = [0u8; 8];
        rate.copy_from_slice(&self.0[8..16]);
        Some(Demurrage {
            code,
            start_date: u32::from_be_bytes(date),
            interest_period: f64::from_be_bytes(rate),
        })
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Currency {
    type Error = FormatError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 20] = src.try_into().map_err(|_| FormatError::InvalidLength {
            what: "Currency",
            expected: Self::LEN,
            got: src.len(),
        })?;
        Ok(Currency(bytes))
    }
}

/// Accepts `XRP` (or an empty string), a three-character code, or 40 hex digits.
impl FromStr for Currency {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            0 => Ok(Currency::XRP),
            3 => Currency::from_code(s),
            40 => {
                let bytes =
                    hex::decode(s).map_err(|_| FormatError::InvalidCurrency(s.to_string()))?;
                Currency::try_from(bytes.as_slice())
            }
            _ => Err(FormatError::InvalidCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return f.write_str("XRP")
        }
        match self.iso_code() {
            Some(code) => f.write_str(code),
            None => f.write_str(&hex::encode_upper(self.0)),
        }
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({self})")
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_code_layout() {
        let usd: Currency = "USD".parse().unwrap();
        let mut expected = [0u8; 20];
        expected[12..15].copy_from_slice(b"USD");
        assert_eq!(usd.0, expected);
        assert_eq!(usd.to_string(), "USD");
        assert_eq!(usd.iso_code(), Some("USD"));
    }

    #[test]
    fn native_sentinel() {
        assert!("XRP".parse::<Currency>().unwrap().is_native());
        assert_eq!(Currency::XRP.to_string(), "XRP");
        assert_eq!(Currency::XRP.iso_code(), None);
    }

    #[test]
    fn opaque_codes_print_as_hex() {
        let hex = "0158415500000000C1F76FF6ECB0BAC600000000";
        let currency: Currency = hex.parse().unwrap();
        assert_eq!(currency.to_string(), hex);
        assert!(currency.is_demurrage());
        let demurrage = currency.demurrage().unwrap();
        assert_eq!(&demurrage.code, b"XAU");
        assert_eq!(demurrage.start_date, 0);
        assert_eq!(Currency::from_demurrage(&demurrage), currency);
    }

    #[test]
    fn rejects_bad_codes() {
        assert!("US".parse::<Currency>().is_err());
        assert!("U D".parse::<Currency>().is_err());
        assert!("zz".repeat(20).parse::<Currency>().is_err());
    }
}
