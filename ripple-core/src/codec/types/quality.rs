//! Exchange-rate qualities: an unsigned decimal packed into 8 bytes.
use crate::{
    codec::{FormatError, SerializedBuffer},
    types::IssuedValue,
};
use serde_json::Value;

/// Offset added to a quality's exponent in the top byte. Distinct from the amount bias.
pub const QUALITY_EXPONENT_BIAS: i32 = 100;

const MANTISSA_MASK: u64 = (1 << 56) - 1;

/// Packs a non-negative value: top byte exponent + 100, low 56 bits mantissa.
pub fn quality_to_bytes(value: &IssuedValue) -> Result<[u8; 8], FormatError> {
    if value.is_zero() {
        return Ok([0u8; 8])
    }
    if value.is_negative() {
        return Err(FormatError::InvalidAmount(format!("negative quality {value}")))
    }
    let exponent = value.exponent() + QUALITY_EXPONENT_BIAS;
    if !(0..=255).contains(&exponent) {
        return Err(FormatError::OutOfRange { what: "quality exponent", value: value.to_string() })
    }
    Ok(((exponent as u64) << 56 | value.mantissa()).to_be_bytes())
}

/// Unpacks a quality.
pub fn quality_from_bytes(bytes: [u8; 8]) -> Result<IssuedValue, FormatError> {
    let bits = u64::from_be_bytes(bytes);
    let mantissa = bits & MANTISSA_MASK;
    let exponent = (bits >> 56) as i32 - QUALITY_EXPONENT_BIAS;
    IssuedValue::new(mantissa, exponent, false, false)
}

/// Writes a quality from a decimal string or an `amount/currency/issuer` triplet.
pub fn encode_quality(buf: &mut SerializedBuffer, value: &Value) -> Result<(), FormatError> {
    let text = match value {
        Value::String(s) => s.split('/').next().unwrap_or_default().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(FormatError::InvalidAmount(value.to_string())),
    };
    buf.append(&quality_to_bytes(&IssuedValue::parse(&text, true)?)?);
    Ok(())
}

/// Reads a quality as a decimal string.
pub fn decode_quality(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    Ok(Value::String(quality_from_bytes(buf.read_array::<8>()?)?.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::types::amount::{write_amount, AMOUNT_EXPONENT_BIAS};
    use crate::types::{AccountId, Amount, Currency};
    use serde_json::json;

    #[test]
    fn packs_exponent_with_its_own_bias() {
        let mut buf = SerializedBuffer::new();
        encode_quality(&mut buf, &json!("1.5")).unwrap();
        assert_eq!(buf.to_hex(), "5505543DF729C000");
        assert_eq!(decode_quality(&mut buf).unwrap(), json!("1.5"));
    }

    #[test]
    fn triplet_uses_the_amount_part() {
        let mut a = SerializedBuffer::new();
        encode_quality(&mut a, &json!("1.5/USD/rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")).unwrap();
        let mut b = SerializedBuffer::new();
        encode_quality(&mut b, &json!("1.5")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn amount_and_quality_biases_differ() {
        let value: IssuedValue = "123.45".parse().unwrap();
        let quality = quality_to_bytes(&value).unwrap();

        let mut buf = SerializedBuffer::new();
        write_amount(
            &mut buf,
            &Amount::issued(value, Currency::from_code("USD").unwrap(), AccountId::ONE).unwrap(),
        );
        let bits = u64::from_be_bytes(buf.as_bytes()[..8].try_into().unwrap());
        let amount_exponent = ((bits >> 54) & 0xff) as i32;
        let quality_exponent = quality[0] as i32;

        assert_eq!(amount_exponent, value.exponent() + AMOUNT_EXPONENT_BIAS);
        assert_eq!(quality_exponent, value.exponent() + QUALITY_EXPONENT_BIAS);
        assert_eq!(quality_exponent - amount_exponent, 3);
    }

    #[test]
    fn zero_and_negative() {
        assert_eq!(quality_to_bytes(&IssuedValue::ZERO).unwrap(), [0u8; 8]);
        assert!(quality_from_bytes([0u8; 8]).unwrap().is_zero());
        let negative: IssuedValue = "-1".parse().unwrap();
        assert!(quality_to_bytes(&negative).is_err());
    }
}
