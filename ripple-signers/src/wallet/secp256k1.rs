//! secp256k1 key families: the root generator, per-account keys and DER signatures.
use crate::{KeyDerivationError, SignatureError};
use k256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature, SigningKey, VerifyingKey,
    },
    elliptic_curve::sec1::ToEncodedPoint,
    FieldBytes, NonZeroScalar, PublicKey,
};
use ripple_core::utils::sha512_half;
use tracing::trace;

/// Length of a compressed point.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Hashes successive `prefix || counter` buffers until the digest is a scalar in `(0, n)`.
fn first_scalar(prefix: &[u8]) -> Result<NonZeroScalar, KeyDerivationError> {
    let mut buf = Vec::with_capacity(prefix.len() + 4);
    for counter in 0..=u32::MAX {
        buf.clear();
        buf.extend_from_slice(prefix);
        buf.extend_from_slice(&counter.to_be_bytes());

        let digest = sha512_half(&buf);
        let candidate: Option<NonZeroScalar> =
            NonZeroScalar::from_repr(*FieldBytes::from_slice(digest.as_bytes())).into();
        if let Some(scalar) = candidate {
            if counter > 0 {
                trace!(counter, "skipped out of range key candidates");
            }
            return Ok(scalar)
        }
    }
    Err(KeyDerivationError::SearchExhausted)
}

/// Compressed SEC1 encoding of `scalar * G`.
pub(crate) fn public_key(scalar: &NonZeroScalar) -> [u8; PUBLIC_KEY_LEN] {
    let point = PublicKey::from_secret_scalar(scalar).to_encoded_point(true);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(point.as_bytes());
    out
}

/// The family generator of a seed.
pub(crate) fn root_scalar(entropy: &[u8; 16]) -> Result<NonZeroScalar, KeyDerivationError> {
    first_scalar(entropy)
}

/// Derives the signing key of `account_index`, or the root key itself when `root` is set.
pub(crate) fn derive(
    entropy: &[u8; 16],
    account_index: u32,
    root: bool,
) -> Result<SigningKey, KeyDerivationError> {
    let root_key = root_scalar(entropy)?;
    if root {
        return Ok(SigningKey::from(root_key))
    }

    let mut prefix = Vec::with_capacity(PUBLIC_KEY_LEN + 4);
    prefix.extend_from_slice(&public_key(&root_key));
    prefix.extend_from_slice(&account_index.to_be_bytes());
    let tweak = first_scalar(&prefix)?;

    let sum = *root_key + *tweak;
    let scalar: Option<NonZeroScalar> = NonZeroScalar::new(sum).into();
    scalar.map(SigningKey::from).ok_or(KeyDerivationError::InvalidKey)
}

/// Compressed public key of a signing key.
pub(crate) fn signing_public_key(key: &SigningKey) -> [u8; PUBLIC_KEY_LEN] {
    public_key(key.as_nonzero_scalar())
}

/// Deterministic (RFC 6979) low-S signature over `sha512_half(message)`, DER encoded.
pub(crate) fn sign(key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let digest = sha512_half(message);
    let signature: Signature = key.sign_prehash(digest.as_bytes())?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(signature.to_der().as_bytes().to_vec())
}

pub(crate) fn verify(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<(), SignatureError> {
    let key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature =
        Signature::from_der(signature).map_err(|_| SignatureError::MalformedSignature)?;
    let digest = sha512_half(message);
    key.verify_prehash(digest.as_bytes(), &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const MASTER: [u8; 16] = hex!("DEDCE9CE67B451D852FD4E846FCDE31C");

    #[test]
    fn root_key() {
        let root = root_scalar(&MASTER).unwrap();
        assert_eq!(
            public_key(&root),
            hex!("03D49C56E1B185F1BE899AE66A02EFC17F78EA6FC53AF85E0FE54C6E8B7F8C71A8")
        );
        let key = derive(&MASTER, 7, true).unwrap();
        assert_eq!(signing_public_key(&key), public_key(&root));
    }

    #[test]
    fn account_keys() {
        let first = derive(&MASTER, 0, false).unwrap();
        assert_eq!(
            signing_public_key(&first),
            hex!("0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020")
        );
        let second = derive(&MASTER, 1, false).unwrap();
        assert_eq!(
            signing_public_key(&second),
            hex!("02CD8C4CE87F86AAD1D9D18B03DE28E6E756F040BD72A9C127862833EB90D60BAD")
        );
    }

    #[test]
    fn signatures_are_deterministic_and_low_s() {
        let key = derive(&MASTER, 0, false).unwrap();
        let a = sign(&key, b"hello").unwrap();
        let b = sign(&key, b"hello").unwrap();
        assert_eq!(a, b);
        // DER sequence tag
        assert_eq!(a[0], 0x30);

        let parsed = Signature::from_der(&a).unwrap();
        assert!(parsed.normalize_s().is_none());

        let public = signing_public_key(&key);
        verify(&public, b"hello", &a).unwrap();
        assert!(matches!(
            verify(&public, b"hellO", &a).unwrap_err(),
            SignatureError::VerificationFailed
        ));
    }

    #[test]
    fn rejects_garbage() {
        let key = derive(&MASTER, 0, false).unwrap();
        let public = signing_public_key(&key);
        assert!(matches!(
            verify(&public, b"hello", &[0x30, 0x00]).unwrap_err(),
            SignatureError::MalformedSignature
        ));
        assert!(matches!(
            verify(&[0x05; 33], b"hello", &sign(&key, b"hello").unwrap()).unwrap_err(),
            SignatureError::InvalidPublicKey
        ));
    }
}
