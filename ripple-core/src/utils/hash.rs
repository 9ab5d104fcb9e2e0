//! Hashing primitives used for content identifiers, signing and account ids.

use crate::types::Hash256;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// Four-byte tags prepended to data before hashing so that identical bytes hashed for
/// different purposes never produce the same identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HashPrefix {
    /// `TXN\0`, transaction id
    TransactionId = 0x5458_4E00,
    /// `SND\0`, transaction plus metadata
    TransactionNode = 0x534E_4400,
    /// `MIN\0`, inner node in a SHAMap
    InnerNode = 0x4D49_4E00,
    /// `MLN\0`, leaf node in a SHAMap
    LeafNode = 0x4D4C_4E00,
    /// `STX\0`, single signing
    TransactionSign = 0x5354_5800,
    /// `stx\0`, single signing on the test network
    TransactionSignTestnet = 0x7374_7800,
    /// `SMT\0`, multi-signing
    TransactionMultiSign = 0x534D_5400,
    /// `LWR\0`, ledger header
    Ledger = 0x4C57_5200,
    /// `VAL\0`, validation
    Validation = 0x5641_4C00,
    /// `PRP\0`, proposal
    Proposal = 0x5052_5000,
}

impl HashPrefix {
    /// Big-endian bytes of the prefix.
    pub const fn to_bytes(self) -> [u8; 4] {
        (self as u32).to_be_bytes()
    }
}

/// First 32 bytes of the SHA-512 digest of `data`.
pub fn sha512_half<T: AsRef<[u8]>>(data: T) -> Hash256 {
    let digest = Sha512::digest(data.as_ref());
    Hash256::from_slice(&digest[..32])
}

/// `sha512_half(prefix || data)`, or plain `sha512_half(data)` when no prefix is given.
pub fn hash_with_prefix<T: AsRef<[u8]>>(prefix: Option<HashPrefix>, data: T) -> Hash256 {
    let mut hasher = Sha512::new();
    if let Some(prefix) = prefix {
        hasher.update(prefix.to_bytes());
    }
    hasher.update(data.as_ref());
    Hash256::from_slice(&hasher.finalize()[..32])
}

/// `RIPEMD160(SHA256(data))`, the hash used for account ids.
pub fn hash160<T: AsRef<[u8]>>(data: T) -> [u8; 20] {
    let sha = Sha256::digest(data.as_ref());
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_spell_their_tags() {
        assert_eq!(&HashPrefix::TransactionId.to_bytes(), b"TXN\0");
        assert_eq!(&HashPrefix::TransactionSign.to_bytes(), b"STX\0");
        assert_eq!(&HashPrefix::TransactionSignTestnet.to_bytes(), b"stx\0");
        assert_eq!(&HashPrefix::Ledger.to_bytes(), b"LWR\0");
    }

    #[test]
    fn passphrase_seed() {
        // the genesis account's seed is the truncated hash of "masterpassphrase"
        let hash = sha512_half(b"masterpassphrase");
        assert_eq!(hex::encode(&hash.as_bytes()[..16]), "dedce9ce67b451d852fd4e846fcde31c");
    }

    #[test]
    fn prefixes_partition_the_hash_space() {
        let data = b"identical bytes";
        let id = hash_with_prefix(Some(HashPrefix::TransactionId), data);
        let sign = hash_with_prefix(Some(HashPrefix::TransactionSign), data);
        let plain = hash_with_prefix(None, data);
        assert_ne!(id, sign);
        assert_ne!(id, plain);
        assert_eq!(plain, sha512_half(data));

        let mut prefixed = b"TXN\0".to_vec();
        prefixed.extend_from_slice(data);
        assert_eq!(id, sha512_half(prefixed));
    }

    #[test]
    fn empty_hash160() {
        assert_eq!(hex::encode(hash160(b"")), "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb");
    }
}
