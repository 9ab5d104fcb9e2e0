use super::{
    types::{parse_fields, write_fields},
    CodecError, EncodeOptions, Envelope, FormatError, SchemaError,
};
use crate::{
    types::Hash256,
    utils::{hash_with_prefix, HashPrefix},
};
use serde_json::{Map, Value};
use std::fmt;

/// A byte container with an append-only write side and a read cursor.
///
/// Reads past the end fail with [`FormatError::BufferUnderrun`]; nothing is ever zero-filled.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SerializedBuffer {
    buffer: Vec<u8>,
    pointer: usize,
}

impl SerializedBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the bytes encoded by a hex string.
    pub fn from_hex(hex: &str) -> Result<Self, FormatError> {
        Ok(Self::from(hex::decode(hex)?))
    }

    /// Serializes a JSON record with default (strict) options.
    pub fn from_json(record: &Value) -> Result<Self, CodecError> {
        match record {
            Value::Object(map) => Self::serialize(map, &EncodeOptions::default()),
            _ => Err(SchemaError::NotAnObject.into()),
        }
    }

    /// Serializes a record into canonical bytes.
    ///
    /// The envelope is resolved from `TransactionType`, `LedgerEntryType` or `AffectedNodes`
    /// and the record is checked against its format before anything is written.
    pub fn serialize(
        record: &Map<String, Value>,
        options: &EncodeOptions,
    ) -> Result<Self, CodecError> {
        let envelope = Envelope::of(record)?;
        envelope.validate(record)?;

        let mut buf = Self::new();
        write_fields(&mut buf, record, options)?;
        Ok(buf)
    }

    /// Appends raw bytes.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Reads `n` bytes and advances the cursor.
    pub fn read(&mut self, n: usize) -> Result<&[u8], FormatError> {
        let start = self.pointer;
        self.check(n)?;
        self.pointer += n;
        Ok(&self.buffer[start..start + n])
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.read(1)?[0])
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Returns the next `n` bytes without moving the cursor.
    pub fn peek(&self, n: usize) -> Result<&[u8], FormatError> {
        self.check(n)?;
        Ok(&self.buffer[self.pointer..self.pointer + n])
    }

    /// Moves the cursor back to the start.
    pub fn reset_pointer(&mut self) {
        self.pointer = 0;
    }

    /// The cursor position.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pointer
    }

    /// Whether the cursor reached the end.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Total length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Uppercase hex of the whole buffer.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.buffer)
    }

    /// Reads `(field, value)` pairs from the cursor until the buffer is exhausted.
    pub fn parse(&mut self) -> Result<Map<String, Value>, CodecError> {
        parse_fields(self)
    }

    /// Parses the whole buffer without disturbing the cursor.
    pub fn to_json(&self) -> Result<Map<String, Value>, CodecError> {
        let mut reader = SerializedBuffer::from(self.buffer.clone());
        reader.parse()
    }

    /// Hashes the contents with a domain prefix.
    pub fn hash(&self, prefix: HashPrefix) -> Hash256 {
        hash_with_prefix(Some(prefix), &self.buffer)
    }

    fn check(&self, n: usize) -> Result<(), FormatError> {
        if n > self.remaining() {
            return Err(FormatError::BufferUnderrun { requested: n, remaining: self.remaining() })
        }
        Ok(())
    }
}

impl From<Vec<u8>> for SerializedBuffer {
    fn from(buffer: Vec<u8>) -> Self {
        SerializedBuffer { buffer, pointer: 0 }
    }
}

impl From<&[u8]> for SerializedBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl AsRef<[u8]> for SerializedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl fmt::Display for SerializedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SerializedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializedBuffer")
            .field("buffer", &self.to_hex())
            .field("pointer", &self.pointer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAYMENT_HEX: &str = "120000220000000024000000016140000000000F424068400000000000000A730074008114B5F762798A53D543A014CAF8B297CFF8F2F937E88314D28B177E48D9A8D057E70F7E464B498367281B98";

    fn payment() -> Value {
        json!({
            "TransactionType": "Payment",
            "Flags": 0,
            "Sequence": 1,
            "Amount": "1000000",
            "Fee": "10",
            "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "Destination": "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD",
            "SigningPubKey": "",
            "TxnSignature": "",
        })
    }

    #[test]
    fn cursor_reads_and_peeks() {
        let mut buf = SerializedBuffer::new();
        buf.append(&[1, 2, 3]);
        assert_eq!(buf.peek(2).unwrap(), &[1, 2]);
        assert_eq!(buf.read(2).unwrap(), &[1, 2]);
        assert_eq!(buf.remaining(), 1);
        assert_eq!(
            buf.read(2).unwrap_err(),
            FormatError::BufferUnderrun { requested: 2, remaining: 1 }
        );
        buf.reset_pointer();
        assert_eq!(buf.read_array::<3>().unwrap(), [1, 2, 3]);
        assert!(buf.is_exhausted());
    }

    #[test]
    fn serializes_golden_payment() {
        let buf = SerializedBuffer::from_json(&payment()).unwrap();
        assert_eq!(buf.to_hex(), PAYMENT_HEX);
    }

    #[test]
    fn field_order_does_not_matter() {
        let forward = payment();
        let mut reversed = Map::new();
        for (key, value) in forward.as_object().unwrap().iter().rev() {
            reversed.insert(key.clone(), value.clone());
        }
        let a = SerializedBuffer::from_json(&forward).unwrap();
        let b = SerializedBuffer::serialize(&reversed, &EncodeOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parses_back_to_the_record() {
        let buf = SerializedBuffer::from_hex(PAYMENT_HEX).unwrap();
        let parsed = buf.to_json().unwrap();
        assert_eq!(Value::Object(parsed), payment());
        assert_eq!(buf.pointer(), 0);
    }

    #[test]
    fn annotations_are_ignored() {
        let mut record = payment();
        record["hash"] = json!("not a wire field");
        assert_eq!(SerializedBuffer::from_json(&record).unwrap().to_hex(), PAYMENT_HEX);
    }

    #[test]
    fn schema_violations_write_nothing() {
        let mut record = payment();
        record.as_object_mut().unwrap().remove("Destination");
        assert_eq!(
            SerializedBuffer::from_json(&record).unwrap_err(),
            CodecError::Schema(SchemaError::MissingFields(vec!["Destination".into()]))
        );

        let mut record = payment();
        record["Bogus"] = json!(1);
        assert_eq!(
            SerializedBuffer::from_json(&record).unwrap_err(),
            CodecError::Schema(SchemaError::UnknownFields(vec!["Bogus".into()]))
        );

        assert_eq!(
            SerializedBuffer::from_json(&json!([])).unwrap_err(),
            CodecError::Schema(SchemaError::NotAnObject)
        );
    }

    #[test]
    fn hashes_with_prefix() {
        let buf = SerializedBuffer::from_hex(PAYMENT_HEX).unwrap();
        let mut prefixed = HashPrefix::TransactionId.to_bytes().to_vec();
        prefixed.extend_from_slice(buf.as_bytes());
        assert_eq!(buf.hash(HashPrefix::TransactionId), crate::utils::sha512_half(prefixed));
    }
}
