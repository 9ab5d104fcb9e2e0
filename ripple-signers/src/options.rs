//! Local signing configuration.
use ripple_core::{codec::EncodeOptions, utils::HashPrefix};
use serde::{Deserialize, Serialize};

/// Knobs the transaction pipeline reads while completing and signing a draft.
///
/// Every field has a default, so a partial JSON or TOML table deserializes.
///
/// ```
/// use ripple_signers::SigningOptions;
///
/// let options = SigningOptions::default().max_fee(5_000).testnet(true);
/// assert_eq!(options.max_fee, 5_000);
/// assert_eq!(options.last_ledger_offset, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningOptions {
    /// Highest fee, in drops, the pipeline accepts.
    pub max_fee: u64,
    /// Added to the current ledger index to fill `LastLedgerSequence`.
    pub last_ledger_offset: u32,
    /// Set the fully canonical signature flag on completion.
    pub canonical_signing: bool,
    /// Sign with the test network prefix.
    pub testnet: bool,
    /// Which account of the seed's key family signs.
    pub account_index: u32,
    /// Sign with the secp256k1 root key instead of an account key.
    pub root_key: bool,
    /// Passed to the codec as [`EncodeOptions::strict`].
    pub strict_amounts: bool,
}

impl Default for SigningOptions {
    fn default() -> Self {
        SigningOptions {
            max_fee: 1_000_000,
            last_ledger_offset: 3,
            canonical_signing: true,
            testnet: false,
            account_index: 0,
            root_key: false,
            strict_amounts: true,
        }
    }
}

impl SigningOptions {
    #[must_use]
    pub fn max_fee(mut self, drops: u64) -> Self {
        self.max_fee = drops;
        self
    }

    #[must_use]
    pub fn last_ledger_offset(mut self, offset: u32) -> Self {
        self.last_ledger_offset = offset;
        self
    }

    #[must_use]
    pub fn canonical_signing(mut self, enabled: bool) -> Self {
        self.canonical_signing = enabled;
        self
    }

    #[must_use]
    pub fn testnet(mut self, enabled: bool) -> Self {
        self.testnet = enabled;
        self
    }

    #[must_use]
    pub fn account_index(mut self, index: u32) -> Self {
        self.account_index = index;
        self
    }

    #[must_use]
    pub fn root_key(mut self, enabled: bool) -> Self {
        self.root_key = enabled;
        self
    }

    #[must_use]
    pub fn strict_amounts(mut self, enabled: bool) -> Self {
        self.strict_amounts = enabled;
        self
    }

    /// The codec options derived from these settings.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions { strict: self.strict_amounts }
    }

    /// `STX\0` on the main network, `stx\0` on the test network.
    pub fn signing_prefix(&self) -> HashPrefix {
        if self.testnet {
            HashPrefix::TransactionSignTestnet
        } else {
            HashPrefix::TransactionSign
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_config_uses_defaults() {
        let options: SigningOptions =
            serde_json::from_value(json!({ "max_fee": 12, "testnet": true })).unwrap();
        assert_eq!(options, SigningOptions::default().max_fee(12).testnet(true));
        assert_eq!(options.signing_prefix().to_bytes(), *b"stx\0");
        assert_eq!(SigningOptions::default().signing_prefix().to_bytes(), *b"STX\0");
    }

    #[test]
    fn encode_options_follow_strictness() {
        assert!(SigningOptions::default().encode_options().strict);
        assert_eq!(
            SigningOptions::default().strict_amounts(false).encode_options(),
            EncodeOptions::lenient()
        );
    }
}
