#![cfg_attr(docsrs, feature(doc_cfg))]
//! Ripple protocol types, the canonical binary codec and hashing utilities.
//! _It is recommended to use the `types`, `codec` and `utils` re-exports of the `ripple` crate
//! instead of this crate directly._
//!
//! ## Serializing a transaction
//!
//! Records are plain JSON maps keyed by field name. Fields are written in canonical order
//! (ascending type code, then field code) regardless of insertion order, and lowercase keys
//! are treated as client annotations and skipped.
//!
//! ```rust
//! use ripple_core::codec::SerializedBuffer;
//! use serde_json::json;
//!
//! let tx = json!({
//!     "TransactionType": "Payment",
//!     "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
//!     "Destination": "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD",
//!     "Amount": "1000000",
//!     "Fee": "10",
//!     "Sequence": 1,
//!     "SigningPubKey": "",
//! });
//!
//! let buf = SerializedBuffer::from_json(&tx).unwrap();
//! assert!(buf.to_hex().starts_with("1200002400000001"));
//! assert_eq!(buf.to_json().unwrap()["Amount"], json!("1000000"));
//! ```
//!
//! ## Hashing
//!
//! Every hash on the network is the first half of a SHA-512 digest, usually over a 4-byte
//! domain prefix. See [`utils::HashPrefix`].
pub mod codec;

pub mod types;

/// Hashing, Base58Check and other utilities
pub mod utils;
