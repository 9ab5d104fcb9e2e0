//! Variable-length blobs and account identifiers.
use crate::{
    codec::{
        varint::{read_variable_length, write_variable_length},
        FormatError, SerializedBuffer,
    },
    types::AccountId,
};
use serde_json::Value;

/// Writes a length-prefixed blob from a hex string.
pub fn encode_blob(
    buf: &mut SerializedBuffer,
    field: &str,
    value: &Value,
) -> Result<(), FormatError> {
    let hex = value.as_str().ok_or_else(|| FormatError::UnexpectedValue {
        field: field.to_string(),
        expected: "a hex string",
    })?;
    write_variable_length(buf, &hex::decode(hex)?)
}

/// Reads a length-prefixed blob as uppercase hex.
pub fn decode_blob(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    Ok(Value::String(hex::encode_upper(read_variable_length(buf)?)))
}

/// Writes a length-prefixed account id from an address or 40 hex digits.
pub fn encode_account(
    buf: &mut SerializedBuffer,
    field: &str,
    value: &Value,
) -> Result<(), FormatError> {
    let account = match value {
        Value::String(s) => s.parse::<AccountId>()?,
        _ => {
            return Err(FormatError::UnexpectedValue {
                field: field.to_string(),
                expected: "an address",
            })
        }
    };
    write_variable_length(buf, account.as_bytes())
}

/// Reads a length-prefixed account id. The declared length must be exactly 20.
pub fn read_account(buf: &mut SerializedBuffer) -> Result<AccountId, FormatError> {
    let bytes = read_variable_length(buf)?;
    AccountId::try_from(bytes.as_slice())
}

/// Reads a length-prefixed account id as its address.
pub fn decode_account(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    Ok(Value::String(read_account(buf)?.to_address()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blob_prefix() {
        let mut buf = SerializedBuffer::new();
        encode_blob(&mut buf, "Domain", &json!("6578616d706c652e636f6d")).unwrap();
        assert_eq!(buf.to_hex(), "0B6578616D706C652E636F6D");
        assert_eq!(decode_blob(&mut buf).unwrap(), json!("6578616D706C652E636F6D"));

        assert!(encode_blob(&mut buf, "Domain", &json!("abc")).is_err());
        assert!(encode_blob(&mut buf, "Domain", &json!(12)).is_err());
    }

    #[test]
    fn account_round_trip() {
        let address = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
        let mut buf = SerializedBuffer::new();
        encode_account(&mut buf, "Account", &json!(address)).unwrap();
        assert_eq!(buf.to_hex(), "14B5F762798A53D543A014CAF8B297CFF8F2F937E8");
        assert_eq!(decode_account(&mut buf).unwrap(), json!(address));
    }

    #[test]
    fn account_length_must_be_twenty() {
        let mut buf = SerializedBuffer::from_hex("13B5F762798A53D543A014CAF8B297CFF8F2F937").unwrap();
        assert_eq!(
            read_account(&mut buf).unwrap_err(),
            FormatError::InvalidLength { what: "AccountID", expected: 20, got: 19 }
        );
    }
}
