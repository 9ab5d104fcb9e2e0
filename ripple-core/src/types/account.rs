use crate::{
    codec::FormatError,
    utils::{base58, hash160},
};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A 20-byte account identifier, rendered as a Base58Check address starting with `r`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// Width in bytes.
    pub const LEN: usize = 20;

    /// `rrrrrrrrrrrrrrrrrrrrrhoLvTp`, used as a placeholder issuer.
    pub const ZERO: AccountId = AccountId([0u8; 20]);

    /// `rrrrrrrrrrrrrrrrrrrrBZbvji`, the "no account" marker in trust lines.
    pub const ONE: AccountId =
        AccountId([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

    /// `RIPEMD160(SHA256(public_key))`.
    pub fn from_public_key<T: AsRef<[u8]>>(public_key: T) -> Self {
        AccountId(hash160(public_key))
    }

    /// Decodes a Base58Check address.
    pub fn from_address(address: &str) -> Result<Self, FormatError> {
        let payload = base58::decode_versioned(
            address,
            &[base58::VER_ACCOUNT_ID],
            Some(Self::LEN),
        )?
        .1;
        Self::try_from(payload.as_slice())
    }

    /// Encodes the id as a Base58Check address.
    pub fn to_address(&self) -> String {
        base58::encode_check(base58::VER_ACCOUNT_ID, &self.0)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for AccountId {
    type Error = FormatError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 20] = src.try_into().map_err(|_| FormatError::InvalidLength {
            what: "AccountID",
            expected: Self::LEN,
            got: src.len(),
        })?;
        Ok(AccountId(bytes))
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        AccountId(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Accepts a Base58Check address or 40 hex digits.
impl FromStr for AccountId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            let bytes = hex::decode(s)?;
            return Self::try_from(bytes.as_slice())
        }
        Self::from_address(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_address())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
