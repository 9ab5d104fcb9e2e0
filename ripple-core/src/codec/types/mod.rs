//! One codec per wire type, dispatched on [`WireType`].

pub mod amount;
pub use amount::{decode_currency, encode_currency, read_amount, write_amount, AMOUNT_EXPONENT_BIAS};

pub mod blob;
pub mod hash;
pub mod int;

mod object;
pub(crate) use object::{parse_fields, write_fields};
pub use object::{ARRAY_END_MARKER, OBJECT_END_MARKER};

pub mod path;
pub use path::{read_pathset, write_pathset};

pub mod quality;
pub use quality::{
    decode_quality, encode_quality, quality_from_bytes, quality_to_bytes, QUALITY_EXPONENT_BIAS,
};

use super::{
    definitions::{EnumField, LedgerEntryType, TransactionResult, TransactionType},
    CodecError, EncodeOptions, FieldDef, FormatError, SerializedBuffer, WireType,
};
use serde_json::Value;

/// Writes `value` with the codec of `def`'s wire type. The header is not written.
pub fn encode_value(
    buf: &mut SerializedBuffer,
    def: &FieldDef,
    value: &Value,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let field = def.name;
    match def.wire_type {
        WireType::UInt8 => match field {
            "TransactionResult" => encode_enum::<TransactionResult>(buf, field, 1, value)?,
            _ => int::encode_uint(buf, field, 1, value)?,
        },
        WireType::UInt16 => match field {
            "TransactionType" => encode_enum::<TransactionType>(buf, field, 2, value)?,
            "LedgerEntryType" => encode_enum::<LedgerEntryType>(buf, field, 2, value)?,
            _ => int::encode_uint(buf, field, 2, value)?,
        },
        WireType::UInt32 => int::encode_uint(buf, field, 4, value)?,
        WireType::UInt64 => int::encode_uint64(buf, field, value)?,
        WireType::Hash128 => hash::encode_hash(buf, field, "Hash128", 16, value)?,
        WireType::Hash160 => hash::encode_hash(buf, field, "Hash160", 20, value)?,
        WireType::Hash256 => hash::encode_hash(buf, field, "Hash256", 32, value)?,
        WireType::Amount => amount::encode_amount(buf, value, options.strict)?,
        WireType::VariableLength => blob::encode_blob(buf, field, value)?,
        WireType::Account => blob::encode_account(buf, field, value)?,
        WireType::Object => object::encode_object(buf, def, value, options)?,
        WireType::Array => object::encode_array(buf, def, value, options)?,
        WireType::PathSet => path::encode_pathset(buf, field, value)?,
        WireType::Vector256 => hash::encode_vector256(buf, field, value)?,
    }
    Ok(())
}

/// Reads a value with the codec of `def`'s wire type. The header was already consumed.
pub fn decode_value(buf: &mut SerializedBuffer, def: &FieldDef) -> Result<Value, CodecError> {
    let value = match def.wire_type {
        WireType::UInt8 => {
            let n = int::read_uint(buf, 1)?;
            match def.name {
                "TransactionResult" => enum_name::<TransactionResult>(n),
                _ => n.into(),
            }
        }
        WireType::UInt16 => {
            let n = int::read_uint(buf, 2)?;
            match def.name {
                "TransactionType" => enum_name::<TransactionType>(n),
                "LedgerEntryType" => enum_name::<LedgerEntryType>(n),
                _ => n.into(),
            }
        }
        WireType::UInt32 => int::read_uint(buf, 4)?.into(),
        WireType::UInt64 => int::decode_uint64(buf)?,
        WireType::Hash128 => hash::decode_hash(buf, 16)?,
        WireType::Hash160 => hash::decode_hash(buf, 20)?,
        WireType::Hash256 => hash::decode_hash(buf, 32)?,
        WireType::Amount => amount::decode_amount(buf)?,
        WireType::VariableLength => blob::decode_blob(buf)?,
        WireType::Account => blob::decode_account(buf)?,
        WireType::Object => object::decode_object(buf, def)?,
        WireType::Array => object::decode_array(buf)?,
        WireType::PathSet => path::decode_pathset(buf)?,
        WireType::Vector256 => hash::decode_vector256(buf)?,
    };
    Ok(value)
}

/// An enumerated integer field: a mnemonic from `E`'s table or a plain number.
fn encode_enum<E>(
    buf: &mut SerializedBuffer,
    field: &'static str,
    width: usize,
    value: &Value,
) -> Result<(), FormatError>
where
    E: EnumField,
{
    match value {
        Value::String(name) if !name.bytes().all(|b| b.is_ascii_digit()) => {
            let code = name
                .parse::<E>()
                .map_err(|_| FormatError::UnknownEnumValue { field, value: name.clone() })?;
            int::write_uint(buf, width, code.code())
        }
        _ => int::encode_uint(buf, field, width, value),
    }
}

/// The mnemonic for `n`, or `n` itself when the table has no entry.
fn enum_name<E: EnumField>(n: u64) -> Value {
    match E::from_code(n) {
        Some(known) => Value::String(known.as_ref().to_string()),
        None => n.into(),
    }
}
