//! Base58Check encoding over the Ripple alphabet.
//!
//! The alphabet is `rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz`, so a leading
//! zero byte is rendered as `r`. The checksum is the first four bytes of a double SHA-256 over
//! `version || payload`.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// The alphabet used for every Base58 string on the network.
pub const ALPHABET: &bs58::Alphabet = bs58::Alphabet::RIPPLE;

/// Number of checksum bytes appended before encoding.
pub const CHECKSUM_LEN: usize = 4;

/// Version prefix of a 20-byte account id (`r...`).
pub const VER_ACCOUNT_ID: &[u8] = &[0x00];
/// Version prefix of a node (validator) public key (`n...`).
pub const VER_NODE_PUBLIC: &[u8] = &[0x1C];
/// Version prefix of a node private key.
pub const VER_NODE_PRIVATE: &[u8] = &[0x20];
/// Version prefix of a secp256k1 family seed (`s...`).
pub const VER_FAMILY_SEED: &[u8] = &[0x21];
/// Version prefix of an account private key.
pub const VER_ACCOUNT_PRIVATE: &[u8] = &[0x22];
/// Version prefix of an account public key (`a...`).
pub const VER_ACCOUNT_PUBLIC: &[u8] = &[0x23];
/// Version prefix of an ed25519 seed (`sEd...`).
pub const VER_ED25519_SEED: &[u8] = &[0x01, 0xE1, 0x4B];

/// Errors produced while decoding Base58 and Base58Check strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Base58Error {
    /// A character outside of the alphabet was found
    #[error("invalid base58 character {character:?} at index {index}")]
    InvalidCharacter {
        /// the offending character
        character: char,
        /// its position in the input
        index: usize,
    },
    /// The decoded data is shorter than the version plus the checksum
    #[error("base58 data too short: {0} bytes")]
    TooShort(usize),
    /// The trailing checksum does not match the data
    #[error("base58 checksum mismatch")]
    ChecksumMismatch,
    /// None of the candidate version prefixes match
    #[error("unexpected base58 version prefix")]
    VersionMismatch,
    /// The payload has a different length than required
    #[error("invalid payload length: got {got}, expected {expected}")]
    PayloadLength {
        /// decoded payload length
        got: usize,
        /// required payload length
        expected: usize,
    },
    /// Catch-all for decoder failures without position information
    #[error("invalid base58 string: {0}")]
    Other(String),
}

impl From<bs58::decode::Error> for Base58Error {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                Base58Error::InvalidCharacter { character, index }
            }
            other => Base58Error::Other(other.to_string()),
        }
    }
}

/// Encodes `bytes` without a checksum.
pub fn encode<T: AsRef<[u8]>>(bytes: T) -> String {
    bs58::encode(bytes.as_ref()).with_alphabet(ALPHABET).into_string()
}

/// Decodes a string without verifying any checksum.
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    Ok(bs58::decode(input).with_alphabet(ALPHABET).into_vec()?)
}

/// The four checksum bytes of `data`.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encodes `version || payload || checksum`.
pub fn encode_check(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);
    let check = checksum(&data);
    data.extend_from_slice(&check);
    encode(data)
}

/// Decodes a checksummed string and splits off the trailing checksum, returning
/// `version || payload`. Fails before returning anything if the checksum is wrong.
pub fn decode_check_raw(input: &str) -> Result<Vec<u8>, Base58Error> {
    let mut data = decode(input)?;
    if data.len() < CHECKSUM_LEN + 1 {
        return Err(Base58Error::TooShort(data.len()))
    }
    let split = data.len() - CHECKSUM_LEN;
    if checksum(&data[..split]) != data[split..] {
        return Err(Base58Error::ChecksumMismatch)
    }
    data.truncate(split);
    Ok(data)
}

/// Decodes a checksummed string that must carry exactly `version`, returning the payload.
pub fn decode_check(version: &[u8], input: &str) -> Result<Vec<u8>, Base58Error> {
    decode_versioned(input, &[version], None).map(|(_, payload)| payload)
}

/// Decodes a checksummed string against several candidate version prefixes.
///
/// Candidates are tried in order and may have different lengths. When `expected_len` is set
/// a candidate only matches if the remaining payload has that length, which is how a 1-byte
/// and a 3-byte prefix sharing a first byte are told apart.
pub fn decode_versioned<'a>(
    input: &str,
    candidates: &[&'a [u8]],
    expected_len: Option<usize>,
) -> Result<(&'a [u8], Vec<u8>), Base58Error> {
    let data = decode_check_raw(input)?;

    let mut length_mismatch = None;
    for version in candidates {
        if data.len() < version.len() || !data.starts_with(version) {
            continue
        }
        let payload = &data[version.len()..];
        match expected_len {
            Some(expected) if payload.len() != expected => {
                length_mismatch = Some(Base58Error::PayloadLength { got: payload.len(), expected });
            }
            _ => return Ok((*version, payload.to_vec())),
        }
    }

    Err(length_mismatch.unwrap_or(Base58Error::VersionMismatch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zeros_map_to_first_character() {
        assert_eq!(encode([0u8, 0, 1]), "rrp");
        assert_eq!(decode("rrp").unwrap(), vec![0, 0, 1]);
        assert_eq!(encode([]), "");
    }

    #[test]
    fn rejects_foreign_characters() {
        // `0`, `O`, `I` and `l` are not part of any base58 alphabet
        let err = decode("r0").unwrap_err();
        assert!(matches!(err, Base58Error::InvalidCharacter { character: '0', index: 1 }));
    }

    #[test]
    fn account_zero_and_one() {
        assert_eq!(encode_check(VER_ACCOUNT_ID, &[0u8; 20]), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");
        let mut one = [0u8; 20];
        one[19] = 1;
        assert_eq!(encode_check(VER_ACCOUNT_ID, &one), "rrrrrrrrrrrrrrrrrrrrBZbvji");
        assert_eq!(decode_check(VER_ACCOUNT_ID, "rrrrrrrrrrrrrrrrrrrrBZbvji").unwrap(), one);
    }

    #[test]
    fn check_roundtrip() {
        let payload = (0u8..16).collect::<Vec<_>>();
        let encoded = encode_check(VER_FAMILY_SEED, &payload);
        assert_eq!(decode_check(VER_FAMILY_SEED, &encoded).unwrap(), payload);
    }

    #[test]
    fn flipping_any_character_breaks_the_checksum() {
        let encoded = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
        assert!(decode_check(VER_FAMILY_SEED, encoded).is_ok());

        let alphabet = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";
        for i in 0..encoded.len() {
            let original = encoded.as_bytes()[i] as char;
            let replacement =
                alphabet.chars().find(|c| *c != original).expect("alphabet has 58 characters");
            let mut mutated = encoded.to_string();
            mutated.replace_range(i..i + 1, &replacement.to_string());
            assert!(decode_check(VER_FAMILY_SEED, &mutated).is_err(), "mutation at {i} accepted");
        }
    }

    #[test]
    fn multi_byte_versions() {
        let entropy = (1u8..=16).collect::<Vec<_>>();
        let encoded = encode_check(VER_ED25519_SEED, &entropy);
        assert_eq!(encoded, "sEdSKaCy2JT7JaM7v95H9SxkhP9wS2r");

        let (version, payload) =
            decode_versioned(&encoded, &[VER_FAMILY_SEED, VER_ED25519_SEED], Some(16)).unwrap();
        assert_eq!(version, VER_ED25519_SEED);
        assert_eq!(payload, entropy);

        let (version, _) = decode_versioned(
            "snoPBrXtMeMyMHUVTgbuqAfg1SUTb",
            &[VER_ED25519_SEED, VER_FAMILY_SEED],
            Some(16),
        )
        .unwrap();
        assert_eq!(version, VER_FAMILY_SEED);
    }

    #[test]
    fn wrong_version_is_rejected() {
        let err = decode_check(VER_ACCOUNT_ID, "snoPBrXtMeMyMHUVTgbuqAfg1SUTb").unwrap_err();
        assert_eq!(err, Base58Error::VersionMismatch);

        let err = decode_versioned("snoPBrXtMeMyMHUVTgbuqAfg1SUTb", &[VER_FAMILY_SEED], Some(20))
            .unwrap_err();
        assert_eq!(err, Base58Error::PayloadLength { got: 16, expected: 20 });
    }
}
