#![cfg_attr(docsrs, feature(doc_cfg))]
//! Seeds, key pairs and the transaction signing pipeline.
//!
//! A [`Seed`] derives a [`KeyPair`] for either secp256k1 or ed25519. A [`Transaction`] moves
//! from a draft through completion (fee, sequence, expiry and signing key), signing and
//! serialization into a hex blob ready for submission.
//!
//! ```
//! use ripple_signers::{NetworkContext, SigningOptions, Transaction};
//! use serde_json::json;
//!
//! let mut tx = Transaction::from_json(json!({
//!     "TransactionType": "Payment",
//!     "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
//!     "Destination": "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD",
//!     "Amount": "1000000",
//! }))
//! .unwrap()
//! .with_secret("snoPBrXtMeMyMHUVTgbuqAfg1SUTb")
//! .with_options(SigningOptions::default().max_fee(100));
//!
//! tx.complete(&NetworkContext::new().fee(12).sequence(7).ledger_index(500)).unwrap();
//! tx.sign().unwrap();
//! tx.verify_signature().unwrap();
//!
//! let (blob, id) = tx.serialize().unwrap();
//! println!("{id}: {blob}");
//! ```
//!
//! Implement [`Signer`] to sign with keys held elsewhere, such as a hardware module.
mod error;
pub use error::{KeyDerivationError, PolicyError, SignatureError, TransactionError};

mod options;
pub use options::SigningOptions;

mod seed;
pub use seed::{KeyType, Seed};

mod transaction;
pub use transaction::{NetworkContext, Transaction, TransactionState, TF_FULLY_CANONICAL_SIG};

mod wallet;
pub use wallet::{KeyPair, PublicKey};

use ripple_core::types::AccountId;
use std::error::Error;

/// Trait for signing transactions and messages
///
/// Implement this trait to support different signing modes, e.g. hardware or hosted keys.
pub trait Signer: std::fmt::Debug + Send + Sync {
    type Error: Error + Send + Sync;

    /// Signs `message` with the scheme of [`public_key`](Signer::public_key): secp256k1 signers
    /// sign `sha512_half(message)` and return DER, ed25519 signers sign the message itself.
    fn sign_message<S: AsRef<[u8]>>(&self, message: S) -> Result<Vec<u8>, Self::Error>;

    /// The key placed in `SigningPubKey`
    fn public_key(&self) -> PublicKey;

    /// The signer's account
    fn account_id(&self) -> AccountId;
}
