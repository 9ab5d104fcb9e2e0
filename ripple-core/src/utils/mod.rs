/// Base58Check encoding with the network's alphabet and version prefixes
pub mod base58;
pub use base58::Base58Error;

mod hash;
pub use hash::{hash160, hash_with_prefix, sha512_half, HashPrefix};

/// Number of drops in one unit of the native currency.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Uppercase hex, the form every hash and blob takes in JSON.
pub fn to_hex_upper<T: AsRef<[u8]>>(bytes: T) -> String {
    hex::encode_upper(bytes)
}
