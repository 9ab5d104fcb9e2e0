#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # ripple
//!
//! A client-side library for the Ripple protocol: the canonical binary codec for
//! transactions, ledger entries and metadata, seed and key derivation, and a signing pipeline
//! that turns a JSON draft into a submittable blob.
//!
//! ## Quickstart
//!
//! ```
//! use ripple::prelude::*;
//! use serde_json::json;
//!
//! let mut tx = Transaction::from_json(json!({
//!     "TransactionType": "Payment",
//!     "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
//!     "Destination": "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD",
//!     "Amount": "1000000",
//! }))
//! .unwrap()
//! .with_secret("snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
//!
//! let context = NetworkContext::new().fee(10).sequence(1).ledger_index(80_000_000);
//! let (blob, id) = tx.prepare(&context).unwrap();
//!
//! // the blob decodes back into the signed record
//! let decoded = ripple::core::codec::decode(&blob).unwrap();
//! assert_eq!(decoded["TxnSignature"], tx.tx_json()["TxnSignature"]);
//! assert_eq!(Some(id), tx.hash());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: value types, the binary codec and hashing utilities, with [`types`] and
//!   [`utils`] also re-exported at the top level
//! - [`signers`]: seeds, key pairs and the transaction pipeline
//! - [`prelude`]: the commonly used items of both

/// # ripple-core
///
/// Value types (amounts, accounts, currencies, paths), the field registry and record formats,
/// and the codec that turns JSON records into canonical bytes and back.
///
/// ```rust
/// use ripple::core::{codec, types::AccountId};
///
/// let account: AccountId = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse().unwrap();
/// assert_eq!(hex::encode_upper(account), "B5F762798A53D543A014CAF8B297CFF8F2F937E8");
///
/// let record = codec::decode("1200002400000001").unwrap();
/// assert_eq!(record["TransactionType"], "Payment");
/// assert_eq!(record["Sequence"], 1);
/// ```
pub mod core {
    pub use ripple_core::*;
}

/// # ripple-signers
///
/// Seeds in their `s…`/`sEd…` Base58Check forms, secp256k1 and ed25519 key pairs, and the
/// draft → completed → signed → serialized transaction lifecycle.
///
/// ```rust
/// use ripple::signers::{KeyType, Seed};
///
/// let seed = Seed::from_passphrase("masterpassphrase", KeyType::Secp256k1);
/// let keys = seed.derive_keypair(0, false).unwrap();
/// assert_eq!(seed.to_base58(), "snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
/// assert_eq!(keys.address(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
/// ```
pub mod signers {
    pub use ripple_signers::*;
}

// Re-export ripple_core::{types, utils}
pub use ripple_core::{types, utils};

/// Easy imports of frequently used type definitions and traits
pub mod prelude {
    pub use ripple_core::{
        codec::{CodecError, EncodeOptions, SerializedBuffer, TransactionType},
        types::*,
    };

    pub use ripple_signers::*;
}
