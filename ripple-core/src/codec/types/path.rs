//! Path sets: alternatives separated by `0xFF`, terminated by `0x00`.
use crate::{
    codec::{FormatError, SerializedBuffer},
    types::{AccountId, Currency, Path, PathSet, PathStep},
};
use serde_json::Value;

const TYPE_ACCOUNT: u8 = 0x01;
const TYPE_CURRENCY: u8 = 0x10;
const TYPE_ISSUER: u8 = 0x20;
const PATH_SEPARATOR: u8 = 0xFF;
const PATHSET_END: u8 = 0x00;

/// Appends the wire form of a path set.
pub fn write_pathset(buf: &mut SerializedBuffer, set: &PathSet) -> Result<(), FormatError> {
    for (i, path) in set.paths().iter().enumerate() {
        if path.is_empty() {
            return Err(FormatError::InvalidPath(format!("path {i} has no steps")))
        }
        if i > 0 {
            buf.append(&[PATH_SEPARATOR]);
        }
        for step in path {
            if step.is_empty() {
                return Err(FormatError::InvalidPath("path step has no members".to_string()))
            }
            let mut kind = 0u8;
            if step.account.is_some() {
                kind |= TYPE_ACCOUNT;
            }
            if step.currency.is_some() {
                kind |= TYPE_CURRENCY;
            }
            if step.issuer.is_some() {
                kind |= TYPE_ISSUER;
            }
            buf.append(&[kind]);
            if let Some(account) = &step.account {
                buf.append(account.as_bytes());
            }
            if let Some(currency) = &step.currency {
                buf.append(currency.as_bytes());
            }
            if let Some(issuer) = &step.issuer {
                buf.append(issuer.as_bytes());
            }
        }
    }
    buf.append(&[PATHSET_END]);
    Ok(())
}

/// Reads a path set.
pub fn read_pathset(buf: &mut SerializedBuffer) -> Result<PathSet, FormatError> {
    let mut paths = Vec::new();
    let mut current: Path = Vec::new();
    loop {
        match buf.read_u8()? {
            PATHSET_END => break,
            PATH_SEPARATOR => paths.push(std::mem::take(&mut current)),
            kind => {
                if kind & !(TYPE_ACCOUNT | TYPE_CURRENCY | TYPE_ISSUER) != 0 {
                    return Err(FormatError::InvalidPath(format!("unknown step type 0x{kind:02x}")))
                }
                let mut step = PathStep::default();
                if kind & TYPE_ACCOUNT != 0 {
                    step.account = Some(AccountId(buf.read_array::<20>()?));
                }
                if kind & TYPE_CURRENCY != 0 {
                    step.currency = Some(Currency(buf.read_array::<20>()?));
                }
                if kind & TYPE_ISSUER != 0 {
                    step.issuer = Some(AccountId(buf.read_array::<20>()?));
                }
                current.push(step);
            }
        }
    }
    if !current.is_empty() || !paths.is_empty() {
        paths.push(current);
    }
    Ok(PathSet(paths))
}

/// Writes a path set from its JSON form. Informational `type` keys are ignored.
pub fn encode_pathset(
    buf: &mut SerializedBuffer,
    field: &str,
    value: &Value,
) -> Result<(), FormatError> {
    let set: PathSet = serde_json::from_value(value.clone())
        .map_err(|err| FormatError::InvalidPath(format!("{field}: {err}")))?;
    write_pathset(buf, &set)
}

/// Reads a path set into its JSON form.
pub fn decode_pathset(buf: &mut SerializedBuffer) -> Result<Value, FormatError> {
    let set = read_pathset(buf)?;
    serde_json::to_value(&set).map_err(|err| FormatError::InvalidPath(err.to_string()))
}
