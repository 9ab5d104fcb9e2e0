//! Errors raised while deriving keys, signing and driving the transaction pipeline.
use ripple_core::codec::{CodecError, FormatError, SchemaError};
use thiserror::Error;

/// A seed or key could not be produced. Secret material is never included in the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyDerivationError {
    /// No secret was configured
    #[error("no secret was provided")]
    MissingSecret,
    /// The secret is not a Base58Check seed or 32 hex digits
    #[error("the secret is not a valid seed")]
    InvalidSeed,
    /// Derived key material is not a valid private key
    #[error("derived key material is invalid")]
    InvalidKey,
    /// No valid scalar was found within 2^32 candidates
    #[error("key search exhausted after 2^32 candidates")]
    SearchExhausted,
    /// ed25519 seeds derive exactly one key
    #[error("ed25519 seeds do not support account index {0}")]
    UnsupportedAccountIndex(u32),
}

/// Signature creation or verification failed.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Public key bytes are not a compressed secp256k1 point or an `0xED`-tagged ed25519 key
    #[error("invalid public key")]
    InvalidPublicKey,
    /// Signature bytes could not be decoded
    #[error("malformed signature")]
    MalformedSignature,
    /// The signature does not match the message and key
    #[error("signature verification failed")]
    VerificationFailed,
    /// Error propagated from k256's ECDSA module
    #[error(transparent)]
    EcdsaError(#[from] k256::ecdsa::Error),
    /// Error propagated from the hex crate
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
}

/// A locally configured limit refused the transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The fee is above `SigningOptions::max_fee`
    #[error("fee of {fee} drops exceeds the configured maximum of {max_fee} drops")]
    FeeTooHigh {
        /// the transaction's fee
        fee: u64,
        /// the configured maximum
        max_fee: u64,
    },
}

/// Error thrown by the transaction pipeline
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The record could not be encoded
    #[error(transparent)]
    CodecError(#[from] CodecError),
    /// The secret could not be turned into a key pair
    #[error(transparent)]
    KeyDerivationError(#[from] KeyDerivationError),
    /// Signing or verification failed
    #[error(transparent)]
    SignatureError(#[from] SignatureError),
    /// A local limit refused the transaction
    #[error(transparent)]
    PolicyError(#[from] PolicyError),
    /// An external signer failed
    #[error("signer error: {0}")]
    SignerError(String),
    /// `Fee` is absent and the network context has none
    #[error("transaction has no Fee and no fee estimate was supplied")]
    MissingFee,
    /// `Sequence` is absent and the network context has none
    #[error("transaction has no Sequence and no account sequence was supplied")]
    MissingSequence,
    /// The operation needs a later state
    #[error("transaction must be {required} first")]
    InvalidState {
        /// the state the operation needs
        required: &'static str,
    },
    /// The transaction was serialized and can no longer change
    #[error("transaction was serialized and can no longer be modified")]
    Immutable,
    /// The signer's public key differs from `SigningPubKey`
    #[error("signer public key does not match SigningPubKey")]
    SignerMismatch,
}

impl From<FormatError> for TransactionError {
    fn from(err: FormatError) -> Self {
        TransactionError::CodecError(err.into())
    }
}

impl From<SchemaError> for TransactionError {
    fn from(err: SchemaError) -> Self {
        TransactionError::CodecError(err.into())
    }
}
