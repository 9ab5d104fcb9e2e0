//! The canonical binary encoding of transactions, ledger entries and metadata.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod buffer;
pub use buffer::SerializedBuffer;

pub mod definitions;
pub use definitions::{EnumField, LedgerEntryType, TransactionResult, TransactionType};

mod error;
pub use error::{CodecError, FormatError, Result, SchemaError};

pub mod fields;
pub use fields::{field_by_code, field_by_name, FieldDef, WireType};

pub mod formats;
pub use formats::{Envelope, Requirement};

pub mod types;
pub use types::{quality_from_bytes, quality_to_bytes, AMOUNT_EXPONENT_BIAS, QUALITY_EXPONENT_BIAS};

pub mod varint;

/// Options threaded through every encode call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Reject native amounts with a decimal point and issued values with more than 16
    /// significant digits instead of reinterpreting or truncating them.
    pub strict: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { strict: true }
    }
}

impl EncodeOptions {
    /// Options that reinterpret or truncate ambiguous amounts instead of rejecting them.
    pub fn lenient() -> Self {
        EncodeOptions { strict: false }
    }
}

/// Serializes a JSON record into uppercase hex.
pub fn encode(record: &Value) -> Result<String> {
    Ok(SerializedBuffer::from_json(record)?.to_hex())
}

/// Serializes a record into canonical bytes with the given options.
pub fn encode_with(record: &Map<String, Value>, options: &EncodeOptions) -> Result<Vec<u8>> {
    Ok(SerializedBuffer::serialize(record, options)?.into_bytes())
}

/// Parses hex-encoded canonical bytes back into a JSON record.
pub fn decode(hex: &str) -> Result<Map<String, Value>> {
    SerializedBuffer::from_hex(hex)?.parse()
}
