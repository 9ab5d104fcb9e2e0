//! Length prefixes for variable-length fields.
use super::{FormatError, SerializedBuffer};

/// Largest length a one-byte prefix carries.
pub const MAX_SINGLE_BYTE_LENGTH: usize = 192;
/// Largest length a two-byte prefix carries.
pub const MAX_DOUBLE_BYTE_LENGTH: usize = 12480;
/// Largest length any prefix carries.
pub const MAX_LENGTH: usize = 918744;

/// Encodes `len` as a 1, 2 or 3 byte prefix.
pub fn encode_length(len: usize) -> Result<Vec<u8>, FormatError> {
    if len <= MAX_SINGLE_BYTE_LENGTH {
        Ok(vec![len as u8])
    } else if len <= MAX_DOUBLE_BYTE_LENGTH {
        let len = len - (MAX_SINGLE_BYTE_LENGTH + 1);
        Ok(vec![193 + (len >> 8) as u8, (len & 0xff) as u8])
    } else if len <= MAX_LENGTH {
        let len = len - (MAX_DOUBLE_BYTE_LENGTH + 1);
        Ok(vec![241 + (len >> 16) as u8, ((len >> 8) & 0xff) as u8, (len & 0xff) as u8])
    } else {
        Err(FormatError::VarIntOverflow(len))
    }
}

/// Reads a length prefix at the cursor.
pub fn decode_length(buf: &mut SerializedBuffer) -> Result<usize, FormatError> {
    let b1 = buf.read_u8()? as usize;
    match b1 {
        0..=192 => Ok(b1),
        193..=240 => {
            let b2 = buf.read_u8()? as usize;
            Ok(MAX_SINGLE_BYTE_LENGTH + 1 + (b1 - 193) * 256 + b2)
        }
        241..=254 => {
            let b2 = buf.read_u8()? as usize;
            let b3 = buf.read_u8()? as usize;
            Ok(MAX_DOUBLE_BYTE_LENGTH + 1 + (b1 - 241) * 65536 + b2 * 256 + b3)
        }
        _ => Err(FormatError::InvalidVarInt(b1 as u8)),
    }
}

/// Appends a length prefix followed by `data`.
pub fn write_variable_length(buf: &mut SerializedBuffer, data: &[u8]) -> Result<(), FormatError> {
    buf.append(&encode_length(data.len())?);
    buf.append(data);
    Ok(())
}

/// Reads a length prefix and the bytes it covers.
pub fn read_variable_length(buf: &mut SerializedBuffer) -> Result<Vec<u8>, FormatError> {
    let len = decode_length(buf)?;
    Ok(buf.read(len)?.to_vec())
}
