mod ed25519;
mod secp256k1;

use crate::{KeyDerivationError, KeyType, Seed, SignatureError, Signer};
use ripple_core::{types::AccountId, utils::base58};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A 33-byte public key: a compressed secp256k1 point or `0xED` followed by an ed25519 key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// Length in bytes of either key kind.
    pub const LEN: usize = 33;

    /// Checks the length and the leading tag byte. Curve membership is checked on verification.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes: [u8; 33] = bytes.try_into().map_err(|_| SignatureError::InvalidPublicKey)?;
        match bytes[0] {
            0x02 | 0x03 | ed25519::PUBLIC_KEY_TAG => Ok(PublicKey(bytes)),
            _ => Err(SignatureError::InvalidPublicKey),
        }
    }

    pub fn key_type(&self) -> KeyType {
        if self.0[0] == ed25519::PUBLIC_KEY_TAG {
            KeyType::Ed25519
        } else {
            KeyType::Secp256k1
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `RIPEMD160(SHA256(key))`
    pub fn account_id(&self) -> AccountId {
        AccountId::from_public_key(self.0)
    }

    /// Verifies `signature` over `message` with the scheme the key is tagged for.
    pub fn verify<M: AsRef<[u8]>>(
        &self,
        message: M,
        signature: &[u8],
    ) -> Result<(), SignatureError> {
        match self.key_type() {
            KeyType::Secp256k1 => secp256k1::verify(&self.0, message.as_ref(), signature),
            KeyType::Ed25519 => ed25519::verify(&self.0, message.as_ref(), signature),
        }
    }

    /// Uppercase hex, the `SigningPubKey` form.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Base58Check with the node public key version (`n…`).
    pub fn to_node_public(&self) -> String {
        base58::encode_check(base58::VER_NODE_PUBLIC, &self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        PublicKey::from_slice(&bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

enum SigningKey {
    Secp256k1(k256::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

/// A private-public key pair derived from a [`Seed`], used to sign transactions.
///
/// # Examples
///
/// ```
/// use ripple_signers::{KeyPair, Signer};
///
/// let keys = KeyPair::from_secret("snoPBrXtMeMyMHUVTgbuqAfg1SUTb", 0, false).unwrap();
/// assert_eq!(keys.address(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
///
/// let signature = keys.sign(b"hello").unwrap();
/// keys.public_key().verify(b"hello", &signature).unwrap();
/// ```
pub struct KeyPair {
    signer: SigningKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// The account key at index 0.
    pub fn from_seed(seed: &Seed) -> Result<Self, KeyDerivationError> {
        Self::derive(seed, 0, false)
    }

    /// Derives the key of `account_index`. `root` selects the secp256k1 family generator itself;
    /// ed25519 seeds only have index 0 and ignore `root`.
    pub fn derive(
        seed: &Seed,
        account_index: u32,
        root: bool,
    ) -> Result<Self, KeyDerivationError> {
        let (signer, public_key) = match seed.key_type() {
            KeyType::Secp256k1 => {
                let key = secp256k1::derive(seed.entropy(), account_index, root)?;
                let public = secp256k1::signing_public_key(&key);
                (SigningKey::Secp256k1(key), public)
            }
            KeyType::Ed25519 => {
                let key = ed25519::derive(seed.entropy(), account_index)?;
                let public = ed25519::public_key(&key);
                (SigningKey::Ed25519(key), public)
            }
        };
        Ok(KeyPair { signer, public_key: PublicKey(public_key) })
    }

    /// Parses `secret` as a seed and derives from it.
    pub fn from_secret(
        secret: &str,
        account_index: u32,
        root: bool,
    ) -> Result<Self, KeyDerivationError> {
        let seed: Seed = secret.parse()?;
        Self::derive(&seed, account_index, root)
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn account_id(&self) -> AccountId {
        self.public_key.account_id()
    }

    /// The classic `r…` address.
    pub fn address(&self) -> String {
        self.account_id().to_address()
    }

    pub fn key_type(&self) -> KeyType {
        self.public_key.key_type()
    }

    /// Signs `message`. secp256k1 keys sign `sha512_half(message)` and return DER; ed25519
    /// keys sign the message itself and return 64 bytes.
    pub fn sign<M: AsRef<[u8]>>(&self, message: M) -> Result<Vec<u8>, SignatureError> {
        match &self.signer {
            SigningKey::Secp256k1(key) => secp256k1::sign(key, message.as_ref()),
            SigningKey::Ed25519(key) => Ok(ed25519::sign(key, message.as_ref())),
        }
    }

    pub fn verify<M: AsRef<[u8]>>(
        &self,
        message: M,
        signature: &[u8],
    ) -> Result<(), SignatureError> {
        self.public_key.verify(message, signature)
    }
}

impl Signer for KeyPair {
    type Error = SignatureError;

    fn sign_message<S: AsRef<[u8]>>(&self, message: S) -> Result<Vec<u8>, Self::Error> {
        self.sign(message)
    }

    fn public_key(&self) -> PublicKey {
        self.public_key
    }

    fn account_id(&self) -> AccountId {
        self.public_key.account_id()
    }
}

// do not log the private key
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_type", &self.key_type())
            .field("public_key", &self.public_key)
            .finish()
    }
}
