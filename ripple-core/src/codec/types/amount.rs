//! The 8 or 48 byte amount layout and raw currency codes.
use crate::{
    codec::{FormatError, SerializedBuffer},
    types::{AccountId, Amount, Currency, IssuedAmount, IssuedValue, MAX_NATIVE_DROPS},
};
use serde_json::Value;

/// Offset added to an issued value's exponent in bits 61..54.
pub const AMOUNT_EXPONENT_BIAS: i32 = 97;

const NOT_NATIVE: u64 = 1 << 63;
const POSITIVE: u64 = 1 << 62;
const MANTISSA_MASK: u64 = (1 << 54) - 1;

/// The canonical encoding of an issued zero: only the non-native bit.
const ISSUED_ZERO: u64 = NOT_NATIVE;

/// Appends the wire form of an amount.
pub fn write_amount(buf: &mut SerializedBuffer, amount: &Amount) {
    match amount {
        Amount::Native(drops) => buf.append(&(POSITIVE | drops).to_be_bytes()),
        Amount::Issued(issued) => {
            buf.append(&issued_value_bits(&issued.value).to_be_bytes());
            buf.append(issued.currency.as_bytes());
            buf.append(issued.issuer.as_bytes());
        }
    }
}

fn issued_value_bits(value: &IssuedValue) -> u64 {
    if value.is_zero() {
        return ISSUED_ZERO
    }
    let sign = if value.is_negative() { 0 } else { POSITIVE };
    let exponent = (value.exponent() + AMOUNT_EXPONENT_BIAS) as u64;
    NOT_NATIVE | sign | (exponent << 54) | value.mantissa()
}

/// Reads an amount, rejecting negative native values and non-normalized issued values.
pub fn read_amount(buf: &mut SerializedBuffer) -> Result<Amount, FormatError> {
    let bits = u64::from_be_bytes(buf.read_array::<8>()?);
    let positive = bits & POSITIVE != 0;

    if bits & NOT_NATIVE == 0 {
        let drops = bits & MAX_NATIVE_DROPS;
        if !positive && drops != 0 {
            return Err(FormatError::InvalidAmount(format!("negative native amount -{drops}")))
        }
        return Ok(Amount::Native(drops))
    }

    let mantissa = bits & MANTISSA_MASK;
    let value = if mantissa == 0 {
        IssuedValue::ZERO
    } else {
        let exponent = ((bits >> 54) & 0xff) as i32 - AMOUNT_EXPONENT_BIAS;
        let value = IssuedValue::new(mantissa, exponent, !positive, true)?;
        if value.mantissa() != mantissa || value.exponent() != exponent {
            return Err(FormatError::InvalidAmount(format!(
                "non-canonical issued value {mantissa}e{exponent}"
            )))
        }
        value
    };

    let currency = Currency(buf.read_array::<20>()?);
    let issuer = AccountId(buf.read_array::<20>()?);
    Ok(Amount::Issued(IssuedAmount { value, currency, issuer }))
}

/// Writes an amount from its JSON form.
pub fn encode_amount(
    buf: &mut SerializedBuffer,
    value: &Value,
    strict: bool,
) -> Result<(), FormatError> {
    let amount = Amount::from_json(value, strict)?;
    write_amount(buf, &amount);
    Ok(())
}

/// Reads an amount into its JSON form.
pub fn decode_amount(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    Ok(read_amount(buf)?.to_json())
}

/// Writes a raw 20-byte currency code from `XRP`, a three-character code or 40 hex digits.
pub fn encode_currency(buf: &mut SerializedBuffer, value: &Value) -> Result<(), FormatError> {
    let code = value.as_str().ok_or_else(|| FormatError::InvalidCurrency(value.to_string()))?;
    buf.append(code.parse::<Currency>()?.as_bytes());
    Ok(())
}

/// Reads a raw 20-byte currency code into its display form.
pub fn decode_currency(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    Ok(Value::String(Currency(buf.read_array::<20>()?).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const ISSUER_HEX: &str = "B5F762798A53D543A014CAF8B297CFF8F2F937E8";
    const USD_HEX: &str = "0000000000000000000000005553440000000000";

    fn encoded(value: Value) -> String {
        let mut buf = SerializedBuffer::new();
        encode_amount(&mut buf, &value, true).unwrap();
        buf.to_hex()
    }

    fn round_trip(value: Value) -> Value {
        let mut buf = SerializedBuffer::new();
        encode_amount(&mut buf, &value, true).unwrap();
        decode_amount(&mut buf).unwrap()
    }

    #[test]
    fn native_layout() {
        assert_eq!(encoded(json!("0")), "4000000000000000");
        assert_eq!(encoded(json!("1000000")), "40000000000F4240");
        assert_eq!(encoded(json!(MAX_NATIVE_DROPS.to_string())), "7FFFFFFFFFFFFFFF");
        assert_eq!(round_trip(json!(MAX_NATIVE_DROPS.to_string())), json!("4611686018427387903"));

        let mut buf = SerializedBuffer::new();
        assert!(encode_amount(&mut buf, &json!("4611686018427387904"), true).is_err());
        assert!(encode_amount(&mut buf, &json!("-1"), true).is_err());
    }

    #[test]
    fn negative_native_is_rejected_on_decode() {
        let mut buf = SerializedBuffer::from_hex("0000000000000001").unwrap();
        assert!(matches!(read_amount(&mut buf), Err(FormatError::InvalidAmount(_))));

        let mut buf = SerializedBuffer::from_hex("0000000000000000").unwrap();
        assert_eq!(read_amount(&mut buf).unwrap(), Amount::Native(0));
    }

    #[test]
    fn issued_layout() {
        let one = json!({ "value": "1", "currency": "USD", "issuer": ISSUER });
        assert_eq!(encoded(one.clone()), format!("D4838D7EA4C68000{USD_HEX}{ISSUER_HEX}"));
        assert_eq!(round_trip(one.clone()), one);

        let negative = json!({ "value": "-1.5", "currency": "USD", "issuer": ISSUER });
        assert_eq!(encoded(negative.clone()), format!("9485543DF729C000{USD_HEX}{ISSUER_HEX}"));
        assert_eq!(round_trip(negative.clone()), negative);
    }

    #[test]
    fn issued_zero() {
        let zero = json!({ "value": "0", "currency": "USD", "issuer": ISSUER });
        assert_eq!(encoded(zero.clone()), format!("8000000000000000{USD_HEX}{ISSUER_HEX}"));
        assert_eq!(round_trip(zero.clone()), zero);

        let mut buf =
            SerializedBuffer::from_hex(&format!("C000000000000000{USD_HEX}{ISSUER_HEX}")).unwrap();
        assert_eq!(decode_amount(&mut buf).unwrap(), zero);
    }

    #[test]
    fn non_canonical_issued_is_rejected() {
        // mantissa 1 with no normalization
        let mut buf =
            SerializedBuffer::from_hex(&format!("D440000000000001{USD_HEX}{ISSUER_HEX}")).unwrap();
        assert!(read_amount(&mut buf).is_err());
    }

    #[test]
    fn currency_codes() {
        let mut buf = SerializedBuffer::new();
        encode_currency(&mut buf, &json!("USD")).unwrap();
        encode_currency(&mut buf, &json!("XRP")).unwrap();
        assert_eq!(buf.to_hex(), format!("{USD_HEX}{}", "00".repeat(20)));
        assert_eq!(decode_currency(&mut buf).unwrap(), json!("USD"));
        assert_eq!(decode_currency(&mut buf).unwrap(), json!("XRP"));
    }
}
