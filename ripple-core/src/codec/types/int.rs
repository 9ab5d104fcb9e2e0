//! Fixed-width big-endian unsigned integers.
use crate::codec::{FormatError, SerializedBuffer};
use serde_json::Value;

/// Writes a `width`-byte integer from a JSON number or decimal string.
pub fn encode_uint(
    buf: &mut SerializedBuffer,
    field: &str,
    width: usize,
    value: &Value,
) -> Result<(), FormatError> {
    let n = match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| out_of_range(width, n.to_string()))?,
        Value::String(s) => s.parse::<u64>().map_err(|_| out_of_range(width, s.clone()))?,
        _ => {
            return Err(FormatError::UnexpectedValue {
                field: field.to_string(),
                expected: "an unsigned integer",
            })
        }
    };
    write_uint(buf, width, n)
}

/// Writes `n` as a `width`-byte integer, rejecting values that do not fit.
pub fn write_uint(buf: &mut SerializedBuffer, width: usize, n: u64) -> Result<(), FormatError> {
    if width < 8 && n >> (8 * width) != 0 {
        return Err(out_of_range(width, n.to_string()))
    }
    buf.append(&n.to_be_bytes()[8 - width..]);
    Ok(())
}

/// Reads a `width`-byte integer.
pub fn read_uint(buf: &mut SerializedBuffer, width: usize) -> Result<u64, FormatError> {
    let mut out = [0u8; 8];
    out[8 - width..].copy_from_slice(buf.read(width)?);
    Ok(u64::from_be_bytes(out))
}

/// Writes a 64-bit integer from a JSON number or a string of at most 16 hex digits.
pub fn encode_uint64(
    buf: &mut SerializedBuffer,
    field: &str,
    value: &Value,
) -> Result<(), FormatError> {
    let n = match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| out_of_range(8, n.to_string()))?,
        Value::String(s) => {
            if s.starts_with('-') {
                return Err(out_of_range(8, s.clone()))
            }
            if s.is_empty() || s.len() > 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(FormatError::UnexpectedValue {
                    field: field.to_string(),
                    expected: "at most 16 hex digits",
                })
            }
            u64::from_str_radix(s, 16).map_err(|_| out_of_range(8, s.clone()))?
        }
        _ => {
            return Err(FormatError::UnexpectedValue {
                field: field.to_string(),
                expected: "a number or hex string",
            })
        }
    };
    write_uint(buf, 8, n)
}

/// Reads a 64-bit integer as 16 uppercase hex digits.
pub fn decode_uint64(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    Ok(Value::String(format!("{:016X}", read_uint(buf, 8)?)))
}

fn out_of_range(width: usize, value: String) -> FormatError {
    let what = match width {
        1 => "UInt8",
        2 => "UInt16",
        4 => "UInt32",
        _ => "UInt64",
    };
    FormatError::OutOfRange { what, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encoded(width: usize, value: Value) -> Result<String, FormatError> {
        let mut buf = SerializedBuffer::new();
        encode_uint(&mut buf, "Test", width, &value)?;
        Ok(buf.to_hex())
    }

    #[test]
    fn widths_and_ranges() {
        assert_eq!(encoded(1, json!(255)).unwrap(), "FF");
        assert!(encoded(1, json!(256)).is_err());
        assert_eq!(encoded(2, json!("513")).unwrap(), "0201");
        assert_eq!(encoded(4, json!(4294967295u64)).unwrap(), "FFFFFFFF");
        assert!(encoded(4, json!(4294967296u64)).is_err());
        assert!(encoded(4, json!(-1)).is_err());
        assert!(encoded(4, json!(1.5)).is_err());
        assert!(encoded(4, json!(true)).is_err());
    }

    #[test]
    fn fixed_widths_read_back() {
        for (width, n) in [(1, 0u64), (1, 0xA5), (2, 0), (2, 0xBEEF), (4, 1), (4, 0xFFFF_FFFF)] {
            let mut buf = SerializedBuffer::new();
            encode_uint(&mut buf, "Test", width, &json!(n)).unwrap();
            assert_eq!(buf.len(), width);
            assert_eq!(read_uint(&mut buf, width).unwrap(), n);
            assert!(buf.is_exhausted());
        }
    }

    #[test]
    fn uint64_hex() {
        let mut buf = SerializedBuffer::new();
        encode_uint64(&mut buf, "IndexNext", &json!("ff")).unwrap();
        assert_eq!(buf.to_hex(), "00000000000000FF");
        assert_eq!(decode_uint64(&mut buf).unwrap(), json!("00000000000000FF"));

        let mut buf = SerializedBuffer::new();
        encode_uint64(&mut buf, "IndexNext", &json!(16)).unwrap();
        assert_eq!(buf.to_hex(), "0000000000000010");

        let mut buf = SerializedBuffer::new();
        assert!(encode_uint64(&mut buf, "IndexNext", &json!("-1")).is_err());
        assert!(encode_uint64(&mut buf, "IndexNext", &json!("10000000000000000")).is_err());
        assert!(encode_uint64(&mut buf, "IndexNext", &json!("xyz")).is_err());
        assert!(buf.is_empty());
    }
}
