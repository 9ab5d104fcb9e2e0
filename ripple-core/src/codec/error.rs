//! Error definitions for the binary codec.
use crate::utils::Base58Error;
use thiserror::Error;

/// A type alias for std's Result with the codec's error as the default error type.
pub type Result<T, E = CodecError> = std::result::Result<T, E>;

/// Malformed or out-of-range input to a single field codec. Never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    /// Hex decoding failed
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    /// Base58 decoding failed
    #[error(transparent)]
    Base58(#[from] Base58Error),
    /// A fixed-width value had the wrong number of bytes
    #[error("invalid {what} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// the kind of value being decoded
        what: &'static str,
        /// required width
        expected: usize,
        /// actual width
        got: usize,
    },
    /// A number does not fit in the field's width or is negative
    #[error("{what} out of range: {value}")]
    OutOfRange {
        /// the kind of value being encoded
        what: &'static str,
        /// textual form of the offending value
        value: String,
    },
    /// A length prefix is too large to encode
    #[error("length {0} exceeds the variable-length maximum of 918744")]
    VarIntOverflow(usize),
    /// A length prefix starts with a byte no encoding produces
    #[error("invalid variable-length prefix byte 0x{0:02x}")]
    InvalidVarInt(u8),
    /// A read went past the end of the buffer
    #[error("buffer underrun: requested {requested} bytes, {remaining} remaining")]
    BufferUnderrun {
        /// bytes requested
        requested: usize,
        /// bytes left after the cursor
        remaining: usize,
    },
    /// A field header referenced a (type, field) pair the registry does not know
    #[error("unknown field with type code {type_code} and field code {field_code}")]
    UnknownFieldCode {
        /// type code from the header
        type_code: u8,
        /// field code from the header
        field_code: u8,
    },
    /// A field header used the extended form for a code below 16
    #[error("non-canonical field header")]
    InvalidHeader,
    /// The JSON value has the wrong shape for the field
    #[error("field {field} expects {expected}")]
    UnexpectedValue {
        /// the field name
        field: String,
        /// what the codec accepts
        expected: &'static str,
    },
    /// An enumerated field held a name or number outside of its table
    #[error("unknown {field} value: {value}")]
    UnknownEnumValue {
        /// the field name
        field: &'static str,
        /// the offending name or number
        value: String,
    },
    /// An amount could not be parsed or represented
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// A currency code could not be parsed
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),
    /// A path step had none of its flags set or a malformed member
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// A record does not match the shape its envelope type requires. Raised before any bytes
/// are emitted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    /// The record lacks `TransactionType`, `LedgerEntryType` and `AffectedNodes`
    #[error("record must contain either TransactionType, LedgerEntryType or AffectedNodes")]
    UnknownEnvelope,
    /// `TransactionType` names no known transaction
    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),
    /// `LedgerEntryType` names no known ledger entry
    #[error("unknown ledger entry type: {0}")]
    UnknownLedgerEntryType(String),
    /// Required fields are absent
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    /// Wire fields that the envelope does not define
    #[error("unknown fields for this record type: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
    /// A wire-looking key that is not in the field registry
    #[error("JSON contains unknown field: {0:?}")]
    UnknownField(String),
    /// Something other than a JSON object was given where a record is required
    #[error("expected a JSON object")]
    NotAnObject,
}

/// Errors returned by whole-record operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// A single field failed to encode or decode
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The record shape is invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        CodecError::Format(err.into())
    }
}

impl From<Base58Error> for CodecError {
    fn from(err: Base58Error) -> Self {
        CodecError::Format(err.into())
    }
}
