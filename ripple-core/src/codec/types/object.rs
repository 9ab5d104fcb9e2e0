//! Nested objects, arrays and memos, plus the field loop shared with top-level records.
use super::{decode_value, encode_value};
use crate::codec::{
    fields::{decode_header, field_by_code, field_by_name, is_wire_key},
    CodecError, EncodeOptions, FieldDef, FormatError, SchemaError, SerializedBuffer,
};
use serde_json::{Map, Value};

/// Written after the fields of a nested object.
pub const OBJECT_END_MARKER: u8 = 0xE1;
/// Written after the elements of an array.
pub const ARRAY_END_MARKER: u8 = 0xF1;

const OBJECT_END: (u8, u8) = (14, 1);
const ARRAY_END: (u8, u8) = (15, 1);

const MEMO_FIELDS: [&str; 3] = ["MemoType", "MemoFormat", "MemoData"];

/// Writes every wire field of `record` in canonical order. No end marker is written.
pub fn write_fields(
    buf: &mut SerializedBuffer,
    record: &Map<String, Value>,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let mut fields = Vec::with_capacity(record.len());
    for (key, value) in record {
        if !is_wire_key(key) {
            continue
        }
        let def = field_by_name(key).ok_or_else(|| SchemaError::UnknownField(key.clone()))?;
        fields.push((def, value));
    }
    fields.sort_by_key(|(def, _)| def.sort_key());

    for (def, value) in fields {
        buf.append(&def.header());
        encode_value(buf, def, value, options)?;
    }
    Ok(())
}

/// Reads fields until the buffer is exhausted.
pub fn parse_fields(buf: &mut SerializedBuffer) -> Result<Map<String, Value>, CodecError> {
    let mut record = Map::new();
    while !buf.is_exhausted() {
        let def = read_registered(buf)?;
        let value = decode_value(buf, def)?;
        record.insert(def.name.to_string(), value);
    }
    Ok(record)
}

fn read_registered(buf: &mut SerializedBuffer) -> Result<&'static FieldDef, FormatError> {
    let (type_code, field_code) = decode_header(buf)?;
    field_by_code(type_code, field_code)
        .ok_or(FormatError::UnknownFieldCode { type_code, field_code })
}

/// Writes a nested object followed by its end marker.
pub fn encode_object(
    buf: &mut SerializedBuffer,
    def: &FieldDef,
    value: &Value,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let object = value.as_object().ok_or_else(|| FormatError::UnexpectedValue {
        field: def.name.to_string(),
        expected: "an object",
    })?;
    if def.name == "Memo" {
        let unknown: Vec<String> = object
            .keys()
            .filter(|key| is_wire_key(key) && !MEMO_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(SchemaError::UnknownFields(unknown).into())
        }
    }
    write_fields(buf, object, options)?;
    buf.append(&[OBJECT_END_MARKER]);
    Ok(())
}

/// Reads a nested object up to its end marker.
pub fn decode_object(buf: &mut SerializedBuffer, def: &FieldDef) -> Result<Value, CodecError> {
    let mut object = Map::new();
    loop {
        let codes = decode_header(buf)?;
        if codes == OBJECT_END {
            break
        }
        let (type_code, field_code) = codes;
        let inner = field_by_code(type_code, field_code)
            .ok_or(FormatError::UnknownFieldCode { type_code, field_code })?;
        let value = decode_value(buf, inner)?;
        object.insert(inner.name.to_string(), value);
    }
    if def.name == "Memo" {
        annotate_memo(&mut object);
    }
    Ok(Value::Object(object))
}

/// Writes each `{ "Name": value }` element as its bare inner field, then the end marker.
pub fn encode_array(
    buf: &mut SerializedBuffer,
    def: &FieldDef,
    value: &Value,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let unexpected = || FormatError::UnexpectedValue {
        field: def.name.to_string(),
        expected: "an array of single-field objects",
    };
    let items = value.as_array().ok_or_else(unexpected)?;
    for item in items {
        let (name, inner) = match item.as_object() {
            Some(wrapper) if wrapper.len() == 1 => wrapper.iter().next().ok_or_else(unexpected)?,
            _ => return Err(unexpected().into()),
        };
        let inner_def =
            field_by_name(name).ok_or_else(|| SchemaError::UnknownField(name.clone()))?;
        buf.append(&inner_def.header());
        encode_value(buf, inner_def, inner, options)?;
    }
    buf.append(&[ARRAY_END_MARKER]);
    Ok(())
}

/// Reads array elements up to the end marker.
pub fn decode_array(buf: &mut SerializedBuffer) -> Result<Value, CodecError> {
    let mut items = Vec::new();
    loop {
        let codes = decode_header(buf)?;
        if codes == ARRAY_END {
            break
        }
        let (type_code, field_code) = codes;
        let inner = field_by_code(type_code, field_code)
            .ok_or(FormatError::UnknownFieldCode { type_code, field_code })?;
        let value = decode_value(buf, inner)?;
        let mut wrapper = Map::new();
        wrapper.insert(inner.name.to_string(), value);
        items.push(Value::Object(wrapper));
    }
    Ok(Value::Array(items))
}

/// Adds best-effort text renderings of a memo's hex members. Undecodable members are left
/// as hex only.
fn annotate_memo(memo: &mut Map<String, Value>) {
    let text = |key: &str| {
        memo.get(key)
            .and_then(Value::as_str)
            .and_then(|hex| hex::decode(hex).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok())
    };
    let memo_type = text("MemoType");
    let memo_format = text("MemoFormat");
    let memo_data = text("MemoData");

    if let Some(memo_type) = memo_type {
        if memo_type != "unformatted_memo" {
            memo.insert("parsed_memo_type".to_string(), Value::String(memo_type));
        }
    }
    let parsed_data = match (memo_format.as_deref(), memo_data) {
        (Some("json"), Some(data)) => serde_json::from_str::<Value>(&data).ok(),
        (Some("text"), Some(data)) => Some(Value::String(data)),
        _ => None,
    };
    if let Some(format) = memo_format {
        memo.insert("parsed_memo_format".to_string(), Value::String(format));
    }
    if let Some(data) = parsed_data {
        memo.insert("parsed_memo_data".to_string(), data);
    }
}
