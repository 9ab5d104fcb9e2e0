//! Value types carried by wire fields.

mod account;
pub use account::AccountId;

mod amount;
pub use amount::{
    Amount, IssuedAmount, IssuedValue, MAX_EXPONENT, MAX_MANTISSA, MAX_NATIVE_DROPS,
    MIN_EXPONENT, MIN_MANTISSA,
};

mod currency;
pub use currency::{Currency, Demurrage};

mod hash;
pub use hash::{Hash128, Hash160, Hash256};

mod path;
pub use path::{Path, PathSet, PathStep};
