use super::{AccountId, Currency};
use serde::{Deserialize, Serialize};

/// One hop of a payment path. At least one member must be set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    /// Ripple through this account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountId>,
    /// Convert into this currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Issuer of the currency after this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<AccountId>,
}

impl PathStep {
    /// A step through an account.
    pub fn account(account: AccountId) -> Self {
        PathStep { account: Some(account), ..Default::default() }
    }

    /// A step through an order book.
    pub fn book(currency: Currency, issuer: Option<AccountId>) -> Self {
        PathStep { currency: Some(currency), issuer, ..Default::default() }
    }

    /// Whether no member is set.
    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.currency.is_none() && self.issuer.is_none()
    }
}

/// A sequence of steps.
pub type Path = Vec<PathStep>;

/// Alternative paths for a cross-currency payment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSet(pub Vec<Path>);

impl PathSet {
    /// The paths in order.
    pub fn paths(&self) -> &[Path] {
        &self.0
    }

    /// Whether the set contains no path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Path>> for PathSet {
    fn from(paths: Vec<Path>) -> Self {
        PathSet(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ignores_informational_keys() {
        let value = json!([[{
            "currency": "USD",
            "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "type": 48,
            "type_hex": "0000000000000030"
        }]]);
        let set: PathSet = serde_json::from_value(value).unwrap();
        assert_eq!(set.paths()[0][0].currency, Some("USD".parse().unwrap()));
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!([[{ "currency": "USD", "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh" }]])
        );
    }
}
