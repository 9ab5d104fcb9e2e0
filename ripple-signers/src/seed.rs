//! 128-bit seeds and their string forms.
use crate::{wallet::KeyPair, KeyDerivationError};
use rand::{CryptoRng, Rng};
use ripple_core::utils::{base58, sha512_half};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The signature scheme a seed derives keys for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// ECDSA over secp256k1
    #[default]
    Secp256k1,
    /// EdDSA over curve25519
    Ed25519,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Secp256k1 => f.write_str("secp256k1"),
            KeyType::Ed25519 => f.write_str("ed25519"),
        }
    }
}

/// 16 bytes of entropy from which every key of an account is derived.
///
/// The entropy is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed {
    entropy: [u8; 16],
    key_type: KeyType,
}

impl Seed {
    /// Width of the entropy in bytes.
    pub const LEN: usize = 16;

    /// Wraps raw entropy.
    pub fn new(entropy: [u8; 16], key_type: KeyType) -> Self {
        Seed { entropy, key_type }
    }

    /// Draws fresh entropy from `rng`.
    pub fn random<R: Rng + CryptoRng>(rng: &mut R, key_type: KeyType) -> Self {
        let mut entropy = [0u8; 16];
        rng.fill_bytes(&mut entropy);
        Seed { entropy, key_type }
    }

    /// The first 16 bytes of `sha512_half(passphrase)`.
    pub fn from_passphrase(passphrase: &str, key_type: KeyType) -> Self {
        let digest = sha512_half(passphrase.as_bytes());
        let mut entropy = [0u8; 16];
        entropy.copy_from_slice(&digest.as_bytes()[..16]);
        Seed { entropy, key_type }
    }

    /// The raw entropy.
    pub fn entropy(&self) -> &[u8; 16] {
        &self.entropy
    }

    /// The scheme keys are derived for.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The Base58Check form: `s…` for secp256k1, `sEd…` for ed25519.
    pub fn to_base58(&self) -> String {
        let version = match self.key_type {
            KeyType::Secp256k1 => base58::VER_FAMILY_SEED,
            KeyType::Ed25519 => base58::VER_ED25519_SEED,
        };
        base58::encode_check(version, &self.entropy)
    }

    /// Derives the key pair for `account_index`. In root mode the secp256k1 root key is used
    /// directly and the index is ignored.
    pub fn derive_keypair(
        &self,
        account_index: u32,
        root: bool,
    ) -> Result<KeyPair, KeyDerivationError> {
        KeyPair::derive(self, account_index, root)
    }
}

/// Accepts `s…` and `sEd…` Base58Check seeds and 32 hex digits (secp256k1).
impl FromStr for Seed {
    type Err = KeyDerivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyDerivationError::MissingSecret)
        }

        if s.len() == 32 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            let mut entropy = [0u8; 16];
            hex::decode_to_slice(s, &mut entropy).map_err(|_| KeyDerivationError::InvalidSeed)?;
            return Ok(Seed::new(entropy, KeyType::Secp256k1))
        }

        let (version, payload) = base58::decode_versioned(
            s,
            &[base58::VER_ED25519_SEED, base58::VER_FAMILY_SEED],
            Some(Self::LEN),
        )
        .map_err(|_| KeyDerivationError::InvalidSeed)?;
        let key_type =
            if version == base58::VER_ED25519_SEED { KeyType::Ed25519 } else { KeyType::Secp256k1 };
        let entropy: [u8; 16] =
            payload.as_slice().try_into().map_err(|_| KeyDerivationError::InvalidSeed)?;
        Ok(Seed::new(entropy, key_type))
    }
}

// do not log the entropy
impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed").field("key_type", &self.key_type).finish_non_exhaustive()
    }
}
