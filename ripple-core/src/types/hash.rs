use crate::codec::FormatError;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

macro_rules! fixed_hash {
    ($(#[$attr:meta])* $name:ident, $len:expr, $what:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Copies `src` into a new value.
            ///
            /// # Panics
            ///
            /// If `src` is not exactly `LEN` bytes long. Use `TryFrom<&[u8]>` for untrusted input.
            pub fn from_slice(src: &[u8]) -> Self {
                let mut out = [0u8; $len];
                out.copy_from_slice(src);
                Self(out)
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Whether every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = FormatError;

            fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
                if src.len() != $len {
                    return Err(FormatError::InvalidLength { what: $what, expected: $len, got: src.len() })
                }
                Ok(Self::from_slice(src))
            }
        }

        impl FromStr for $name {
            type Err = FormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s)?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode_upper(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(D::Error::custom)
            }
        }
    };
}

fixed_hash!(
    /// A 128-bit value, e.g. `EmailHash`.
    Hash128,
    16,
    "Hash128"
);
fixed_hash!(
    /// A 160-bit value, e.g. the currency and issuer of a book directory.
    Hash160,
    20,
    "Hash160"
);
fixed_hash!(
    /// A 256-bit value: transaction ids, ledger indexes and signing hashes.
    Hash256,
    32,
    "Hash256"
);
