//! Fixed-width hashes and `Vector256`.
use crate::{
    codec::{
        varint::{read_variable_length, write_variable_length},
        FormatError, SerializedBuffer,
    },
    types::Hash256,
};
use serde_json::Value;

/// Writes a hex string of exactly `width` bytes.
pub fn encode_hash(
    buf: &mut SerializedBuffer,
    field: &str,
    what: &'static str,
    width: usize,
    value: &Value,
) -> Result<(), FormatError> {
    let hex = value.as_str().ok_or_else(|| FormatError::UnexpectedValue {
        field: field.to_string(),
        expected: "a hex string",
    })?;
    let bytes = hex::decode(hex)?;
    if bytes.len() != width {
        return Err(FormatError::InvalidLength { what, expected: width, got: bytes.len() })
    }
    buf.append(&bytes);
    Ok(())
}

/// Reads `width` bytes as uppercase hex.
pub fn decode_hash(buf: &mut SerializedBuffer, width: usize) -> Result<Value, FormatError> {
    Ok(Value::String(hex::encode_upper(buf.read(width)?)))
}

/// Writes a length-prefixed run of 256-bit hashes from a JSON array of hex strings.
pub fn encode_vector256(
    buf: &mut SerializedBuffer,
    field: &str,
    value: &Value,
) -> Result<(), FormatError> {
    let items = value.as_array().ok_or_else(|| FormatError::UnexpectedValue {
        field: field.to_string(),
        expected: "an array of 256-bit hashes",
    })?;

    let mut bytes = Vec::with_capacity(items.len() * Hash256::LEN);
    for item in items {
        let hash = match item {
            Value::String(s) => s.parse::<Hash256>()?,
            _ => {
                return Err(FormatError::UnexpectedValue {
                    field: field.to_string(),
                    expected: "an array of 256-bit hashes",
                })
            }
        };
        bytes.extend_from_slice(hash.as_bytes());
    }
    write_variable_length(buf, &bytes)
}

/// Reads a length-prefixed run of 256-bit hashes.
pub fn decode_vector256(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    let bytes = read_variable_length(buf)?;
    if bytes.len() % Hash256::LEN != 0 {
        return Err(FormatError::InvalidLength {
            what: "Vector256",
            expected: (bytes.len() / Hash256::LEN + 1) * Hash256::LEN,
            got: bytes.len(),
        })
    }
    Ok(Value::Array(
        bytes
            .chunks(Hash256::LEN)
            .map(|chunk| Value::String(hex::encode_upper(chunk)))
            .collect(),
    ))
}
