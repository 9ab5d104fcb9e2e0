//! ed25519 keys. A seed derives exactly one key; the public key carries an `0xED` tag byte.
use crate::{KeyDerivationError, SignatureError};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use ripple_core::utils::sha512_half;

/// Tag byte prepended to the 32-byte public key.
pub const PUBLIC_KEY_TAG: u8 = 0xED;

pub(crate) fn derive(
    entropy: &[u8; 16],
    account_index: u32,
) -> Result<SigningKey, KeyDerivationError> {
    if account_index != 0 {
        return Err(KeyDerivationError::UnsupportedAccountIndex(account_index))
    }
    Ok(SigningKey::from_bytes(&sha512_half(entropy).0))
}

pub(crate) fn public_key(key: &SigningKey) -> [u8; 33] {
    let mut out = [0u8; 33];
    out[0] = PUBLIC_KEY_TAG;
    out[1..].copy_from_slice(key.verifying_key().as_bytes());
    out
}

/// Signs the raw message; ed25519 hashes internally.
pub(crate) fn sign(key: &SigningKey, message: &[u8]) -> Vec<u8> {
    key.sign(message).to_bytes().to_vec()
}

pub(crate) fn verify(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<(), SignatureError> {
    let point: &[u8; 32] = match public_key {
        [PUBLIC_KEY_TAG, rest @ ..] => {
            rest.try_into().map_err(|_| SignatureError::InvalidPublicKey)?
        }
        _ => return Err(SignatureError::InvalidPublicKey),
    };
    let key = VerifyingKey::from_bytes(point).map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature =
        Signature::from_slice(signature).map_err(|_| SignatureError::MalformedSignature)?;
    key.verify(message, &signature).map_err(|_| SignatureError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const ENTROPY: [u8; 16] = hex!("0102030405060708090A0B0C0D0E0F10");

    #[test]
    fn derives_tagged_key() {
        let key = derive(&ENTROPY, 0).unwrap();
        assert_eq!(
            public_key(&key),
            hex!("ED01FA53FA5A7E77798F882ECE20B1ABC00BB358A9E55A202D0D0676BD0CE37A63")
        );
        assert_eq!(
            derive(&ENTROPY, 1).unwrap_err(),
            KeyDerivationError::UnsupportedAccountIndex(1)
        );
    }

    #[test]
    fn deterministic_signature() {
        let key = derive(&ENTROPY, 0).unwrap();
        let signature = sign(&key, b"hello");
        assert_eq!(
            signature,
            hex!("7A11CA7C4CCB089309B950B812C2BE76942F79943500AEA45BD8CC6FFA7650DDF623BBCEEE35DF02C84985FC9610358D5F52CA1C6120429114F47094BDA44C04")
        );
        verify(&public_key(&key), b"hello", &signature).unwrap();
    }

    #[test]
    fn verification_failures() {
        let key = derive(&ENTROPY, 0).unwrap();
        let public = public_key(&key);
        let signature = sign(&key, b"hello");

        assert!(matches!(
            verify(&public, b"world", &signature).unwrap_err(),
            SignatureError::VerificationFailed
        ));
        assert!(matches!(
            verify(&public, b"hello", &signature[..63]).unwrap_err(),
            SignatureError::MalformedSignature
        ));
        assert!(matches!(
            verify(&public[1..], b"hello", &signature).unwrap_err(),
            SignatureError::InvalidPublicKey
        ));
    }
}
