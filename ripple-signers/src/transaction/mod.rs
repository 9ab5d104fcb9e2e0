//! The draft → completed → signed → serialized lifecycle of a transaction.
mod builder;

use crate::{KeyPair, PolicyError, PublicKey, Signer, SigningOptions, TransactionError};
use ripple_core::{
    codec::{encode_with, FormatError},
    types::{Amount, Hash256},
    utils::{hash_with_prefix, sha512_half, HashPrefix},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace, warn};

/// Requires the signature to be in fully canonical (low-S) form.
pub const TF_FULLY_CANONICAL_SIG: u32 = 0x8000_0000;

/// Where a [`Transaction`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    /// Fields are being filled in
    Draft,
    /// Fee, sequence and signing key are set
    Completed,
    /// `TxnSignature` matches the current fields
    Signed,
    /// The blob and id were produced; no further changes are accepted
    Serialized,
}

/// Values the pipeline cannot know by itself: the fee estimate, the account's next sequence
/// and the current validated ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkContext {
    /// Fee in drops, used when `Fee` is absent
    pub fee: Option<u64>,
    /// Account sequence, used when `Sequence` is absent
    pub sequence: Option<u32>,
    /// Current ledger index, used to fill `LastLedgerSequence`
    pub ledger_index: Option<u32>,
}

impl NetworkContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fee(mut self, drops: u64) -> Self {
        self.fee = Some(drops);
        self
    }

    #[must_use]
    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    #[must_use]
    pub fn ledger_index(mut self, index: u32) -> Self {
        self.ledger_index = Some(index);
        self
    }
}

/// A transaction record together with the secret and options used to sign it.
///
/// ```
/// use ripple_signers::{NetworkContext, Transaction};
///
/// let mut tx = Transaction::payment(
///     "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
///     "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD",
///     "1000000",
/// )
/// .with_secret("snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
///
/// let context = NetworkContext::new().fee(10).sequence(1).ledger_index(100);
/// let (blob, id) = tx.prepare(&context).unwrap();
///
/// assert_eq!(tx.tx_json()["LastLedgerSequence"], 103);
/// assert!(blob.starts_with("12000022800000002400000001"));
/// assert_eq!(id.to_string().len(), 64);
/// ```
#[derive(Clone)]
pub struct Transaction {
    tx_json: Map<String, Value>,
    state: TransactionState,
    secret: Option<String>,
    options: SigningOptions,
    /// The last signature produced here and the signing hash it covers
    signed: Option<(Hash256, String)>,
    blob: Option<String>,
    hash: Option<Hash256>,
}

impl Transaction {
    /// A draft from a JSON record.
    pub fn new(tx_json: Map<String, Value>) -> Self {
        Transaction {
            tx_json,
            state: TransactionState::Draft,
            secret: None,
            options: SigningOptions::default(),
            signed: None,
            blob: None,
            hash: None,
        }
    }

    /// A draft from a JSON value, which must be an object.
    pub fn from_json(value: Value) -> Result<Self, TransactionError> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            _ => Err(ripple_core::codec::SchemaError::NotAnObject.into()),
        }
    }

    /// Sets the seed used by [`complete`](Self::complete) and [`sign`](Self::sign).
    #[must_use]
    pub fn with_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: SigningOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tx_json(&self) -> &Map<String, Value> {
        &self.tx_json
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn options(&self) -> &SigningOptions {
        &self.options
    }

    /// The uppercase hex blob, once serialized.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// The transaction id, once serialized.
    pub fn hash(&self) -> Option<Hash256> {
        self.hash
    }

    /// Sets a field. A signed transaction falls back to completed since its signature no
    /// longer covers the record.
    pub fn set_field<V: Into<Value>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        self.tx_json.insert(name.to_string(), value.into());
        self.invalidate_signature();
        Ok(())
    }

    /// Removes a field, returning its previous value.
    pub fn remove_field(&mut self, name: &str) -> Result<Option<Value>, TransactionError> {
        self.ensure_mutable()?;
        let removed = self.tx_json.remove(name);
        if removed.is_some() {
            self.invalidate_signature();
        }
        Ok(removed)
    }

    /// Fills in the signing key, fee, sequence and expiry from the configured secret. A
    /// `SigningPubKey` already present in the record is kept.
    pub fn complete(&mut self, context: &NetworkContext) -> Result<(), TransactionError> {
        let keys = self.key_pair()?;
        self.complete_with_key(keys.public_key(), context)
    }

    /// Like [`complete`](Self::complete) but takes the signing key from an external signer.
    pub fn complete_with<S: Signer>(
        &mut self,
        signer: &S,
        context: &NetworkContext,
    ) -> Result<(), TransactionError> {
        self.complete_with_key(signer.public_key(), context)
    }

    fn complete_with_key(
        &mut self,
        public_key: PublicKey,
        context: &NetworkContext,
    ) -> Result<(), TransactionError> {
        self.ensure_mutable()?;

        // work on a copy so a failed step leaves the draft untouched
        let mut tx_json = self.tx_json.clone();
        if !tx_json.contains_key("SigningPubKey") {
            tx_json.insert("SigningPubKey".to_string(), Value::String(public_key.to_hex()));
        }

        let fee = match tx_json.get("Fee") {
            Some(value) => fee_drops(value, self.options.strict_amounts)?,
            None => {
                let fee = context.fee.ok_or(TransactionError::MissingFee)?;
                tx_json.insert("Fee".to_string(), Value::String(fee.to_string()));
                fee
            }
        };
        if fee > self.options.max_fee {
            warn!(fee, max_fee = self.options.max_fee, "refusing transaction with excessive fee");
            return Err(PolicyError::FeeTooHigh { fee, max_fee: self.options.max_fee }.into())
        }

        if !tx_json.contains_key("Sequence") {
            let sequence = context.sequence.ok_or(TransactionError::MissingSequence)?;
            tx_json.insert("Sequence".to_string(), sequence.into());
        }

        if let (false, Some(ledger)) =
            (tx_json.contains_key("LastLedgerSequence"), context.ledger_index)
        {
            let last = ledger.saturating_add(self.options.last_ledger_offset);
            tx_json.insert("LastLedgerSequence".to_string(), last.into());
        }

        if self.options.canonical_signing {
            let flags = match tx_json.get("Flags") {
                None => 0,
                Some(value) => flags_value(value)?,
            };
            tx_json.insert("Flags".to_string(), (flags | TF_FULLY_CANONICAL_SIG).into());
        }

        // the completed record must encode before it is accepted
        encode_with(&tx_json, &self.options.encode_options())?;

        debug!(
            account = ?tx_json.get("Account"),
            sequence = ?tx_json.get("Sequence"),
            fee,
            "completed transaction"
        );
        self.tx_json = tx_json;
        self.state = TransactionState::Completed;
        Ok(())
    }

    /// The prefixed canonical bytes a signature covers: everything except `TxnSignature`.
    pub fn signing_data(&self) -> Result<Vec<u8>, TransactionError> {
        if self.state == TransactionState::Draft {
            return Err(TransactionError::InvalidState { required: "completed" })
        }
        let mut unsigned = self.tx_json.clone();
        unsigned.remove("TxnSignature");

        let mut data = self.options.signing_prefix().to_bytes().to_vec();
        data.extend(encode_with(&unsigned, &self.options.encode_options())?);
        Ok(data)
    }

    /// `sha512_half` of [`signing_data`](Self::signing_data).
    pub fn signing_hash(&self) -> Result<Hash256, TransactionError> {
        Ok(sha512_half(self.signing_data()?))
    }

    /// Signs with the key pair derived from the configured secret.
    pub fn sign(&mut self) -> Result<(), TransactionError> {
        let keys = self.key_pair()?;
        self.sign_with(&keys)
    }

    /// Signs with any [`Signer`] whose public key matches `SigningPubKey`. If the signing hash
    /// is unchanged since the last signature produced here, that signature is restored instead
    /// of signing again.
    pub fn sign_with<S: Signer>(&mut self, signer: &S) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        if self.state == TransactionState::Draft {
            return Err(TransactionError::InvalidState { required: "completed" })
        }

        let expected = self.tx_json.get("SigningPubKey").and_then(Value::as_str).unwrap_or("");
        if !expected.eq_ignore_ascii_case(&signer.public_key().to_hex()) {
            return Err(TransactionError::SignerMismatch)
        }

        let signing_hash = self.signing_hash()?;
        if let Some((hash, signature)) = &self.signed {
            if *hash == signing_hash {
                trace!(hash = %signing_hash, "signing hash unchanged, keeping signature");
                self.tx_json.insert("TxnSignature".to_string(), Value::String(signature.clone()));
                self.state = TransactionState::Signed;
                return Ok(())
            }
        }

        let signature = signer
            .sign_message(self.signing_data()?)
            .map(hex::encode_upper)
            .map_err(|err| TransactionError::SignerError(err.to_string()))?;
        self.tx_json.insert("TxnSignature".to_string(), Value::String(signature.clone()));
        self.signed = Some((signing_hash, signature));
        self.state = TransactionState::Signed;

        debug!(account = %signer.account_id(), hash = %signing_hash, "signed transaction");
        Ok(())
    }

    /// Produces the uppercase hex blob and the id, `hash(TXN\0 || blob)`. The transaction is
    /// frozen afterwards; calling again returns the same values.
    pub fn serialize(&mut self) -> Result<(String, Hash256), TransactionError> {
        if let (TransactionState::Serialized, Some(blob), Some(hash)) =
            (self.state, &self.blob, self.hash)
        {
            return Ok((blob.clone(), hash))
        }
        if self.state != TransactionState::Signed {
            return Err(TransactionError::InvalidState { required: "signed" })
        }

        let bytes = encode_with(&self.tx_json, &self.options.encode_options())?;
        let hash = hash_with_prefix(Some(HashPrefix::TransactionId), &bytes);
        let blob = hex::encode_upper(&bytes);

        debug!(%hash, size = bytes.len(), "serialized transaction");
        self.blob = Some(blob.clone());
        self.hash = Some(hash);
        self.state = TransactionState::Serialized;
        Ok((blob, hash))
    }

    /// Completes, signs and serializes in one go.
    pub fn prepare(
        &mut self,
        context: &NetworkContext,
    ) -> Result<(String, Hash256), TransactionError> {
        let keys = self.key_pair()?;
        self.complete_with_key(keys.public_key(), context)?;
        self.sign_with(&keys)?;
        self.serialize()
    }

    /// Checks `TxnSignature` against `SigningPubKey` and the current fields.
    pub fn verify_signature(&self) -> Result<(), TransactionError> {
        let field = |name: &'static str| {
            self.tx_json.get(name).and_then(Value::as_str).ok_or_else(|| {
                TransactionError::from(FormatError::UnexpectedValue {
                    field: name.to_string(),
                    expected: "a hex string",
                })
            })
        };
        let public_key: PublicKey = field("SigningPubKey")?.parse()?;
        let signature = hex::decode(field("TxnSignature")?).map_err(FormatError::from)?;
        public_key.verify(self.signing_data()?, &signature)?;
        Ok(())
    }

    fn key_pair(&self) -> Result<KeyPair, TransactionError> {
        let secret = self.secret.as_deref().unwrap_or("");
        Ok(KeyPair::from_secret(secret, self.options.account_index, self.options.root_key)?)
    }

    fn ensure_mutable(&self) -> Result<(), TransactionError> {
        if self.state == TransactionState::Serialized {
            return Err(TransactionError::Immutable)
        }
        Ok(())
    }

    fn invalidate_signature(&mut self) {
        if self.state == TransactionState::Signed {
            self.state = TransactionState::Completed;
        }
    }
}

/// Reads `Fee`, which must be a native amount.
fn fee_drops(value: &Value, strict: bool) -> Result<u64, TransactionError> {
    match Amount::from_json(value, strict)? {
        Amount::Native(drops) => Ok(drops),
        Amount::Issued(_) => Err(FormatError::UnexpectedValue {
            field: "Fee".to_string(),
            expected: "a native amount",
        }
        .into()),
    }
}

fn flags_value(value: &Value) -> Result<u32, TransactionError> {
    value
        .as_u64()
        .and_then(|flags| u32::try_from(flags).ok())
        .ok_or_else(|| {
            FormatError::UnexpectedValue { field: "Flags".to_string(), expected: "a u32" }.into()
        })
}

// do not log the secret
impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("tx_json", &self.tx_json)
            .field("state", &self.state)
            .field("options", &self.options)
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyDerivationError, SignatureError};
    use serde_json::json;

    const MASTER: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
    const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const BOB: &str = "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD";

    fn draft() -> Transaction {
        Transaction::from_json(json!({
            "TransactionType": "Payment",
            "Account": ALICE,
            "Destination": BOB,
            "Amount": "1000000",
        }))
        .unwrap()
        .with_secret(MASTER)
    }

    fn context() -> NetworkContext {
        NetworkContext::new().fee(10).sequence(1).ledger_index(1000)
    }

    #[test]
    fn completes_from_context() {
        let mut tx = draft();
        tx.complete(&context()).unwrap();

        let json = tx.tx_json();
        assert_eq!(tx.state(), TransactionState::Completed);
        assert_eq!(json["Fee"], json!("10"));
        assert_eq!(json["Sequence"], json!(1));
        assert_eq!(json["LastLedgerSequence"], json!(1003));
        assert_eq!(json["Flags"], json!(TF_FULLY_CANONICAL_SIG));
        assert_eq!(
            json["SigningPubKey"],
            json!("0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020")
        );
    }

    #[test]
    fn keeps_explicit_fields() {
        let mut tx = draft();
        tx.set_field("Fee", "12").unwrap();
        tx.set_field("Sequence", 9).unwrap();
        tx.set_field("LastLedgerSequence", 5000).unwrap();
        tx.set_field("Flags", 0x0002_0000).unwrap();
        tx.complete(&NetworkContext::new()).unwrap();

        let json = tx.tx_json();
        assert_eq!(json["Fee"], json!("12"));
        assert_eq!(json["Sequence"], json!(9));
        assert_eq!(json["LastLedgerSequence"], json!(5000));
        assert_eq!(json["Flags"], json!(0x8002_0000u32));
    }

    #[test]
    fn failed_completion_writes_nothing() {
        let mut tx = draft();
        let before = tx.tx_json().clone();

        let err = tx.complete(&NetworkContext::new().sequence(1)).unwrap_err();
        assert!(matches!(err, TransactionError::MissingFee));
        let err = tx.complete(&NetworkContext::new().fee(10)).unwrap_err();
        assert!(matches!(err, TransactionError::MissingSequence));
        let err = tx.complete(&context().fee(2_000_000)).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::PolicyError(PolicyError::FeeTooHigh {
                fee: 2_000_000,
                max_fee: 1_000_000
            })
        ));

        assert_eq!(tx.tx_json(), &before);
        assert_eq!(tx.state(), TransactionState::Draft);
    }

    #[test]
    fn secret_is_required() {
        let mut tx = Transaction::from_json(json!({ "TransactionType": "Payment" })).unwrap();
        assert!(matches!(
            tx.complete(&context()).unwrap_err(),
            TransactionError::KeyDerivationError(KeyDerivationError::MissingSecret)
        ));

        let mut tx = draft().with_secret("not a seed");
        assert!(matches!(
            tx.complete(&context()).unwrap_err(),
            TransactionError::KeyDerivationError(KeyDerivationError::InvalidSeed)
        ));
    }

    #[test]
    fn schema_errors_surface_on_completion() {
        let mut tx = draft();
        tx.remove_field("Destination").unwrap();
        assert!(matches!(tx.complete(&context()).unwrap_err(), TransactionError::CodecError(_)));
        assert_eq!(tx.state(), TransactionState::Draft);
    }

    #[test]
    fn state_order_is_enforced() {
        let mut tx = draft();
        assert!(matches!(
            tx.sign().unwrap_err(),
            TransactionError::InvalidState { required: "completed" }
        ));
        assert!(matches!(
            tx.serialize().unwrap_err(),
            TransactionError::InvalidState { required: "signed" }
        ));

        tx.complete(&context()).unwrap();
        assert!(matches!(
            tx.serialize().unwrap_err(),
            TransactionError::InvalidState { required: "signed" }
        ));
        tx.sign().unwrap();
        tx.serialize().unwrap();

        assert!(matches!(tx.set_field("Fee", "11").unwrap_err(), TransactionError::Immutable));
        assert!(matches!(tx.remove_field("Fee").unwrap_err(), TransactionError::Immutable));
        assert!(matches!(tx.sign().unwrap_err(), TransactionError::Immutable));
    }

    #[test]
    fn resigning_reuses_signature() {
        let mut tx = draft();
        tx.complete(&context()).unwrap();
        tx.sign().unwrap();
        let first = tx.tx_json()["TxnSignature"].clone();
        let first_hash = tx.signing_hash().unwrap();

        tx.sign().unwrap();
        assert_eq!(tx.tx_json()["TxnSignature"], first);

        tx.set_field("Amount", "2000000").unwrap();
        assert_eq!(tx.state(), TransactionState::Completed);
        assert_ne!(tx.signing_hash().unwrap(), first_hash);

        tx.sign().unwrap();
        assert_ne!(tx.tx_json()["TxnSignature"], first);
        tx.verify_signature().unwrap();
    }

    #[test]
    fn tampering_breaks_verification() {
        let mut tx = draft();
        tx.complete(&context()).unwrap();
        tx.sign().unwrap();
        tx.verify_signature().unwrap();

        tx.set_field("Amount", "999").unwrap();
        assert!(matches!(
            tx.verify_signature().unwrap_err(),
            TransactionError::SignatureError(SignatureError::VerificationFailed)
        ));
    }

    #[test]
    fn signer_must_match_signing_key() {
        let mut tx = draft();
        tx.complete(&context()).unwrap();
        let other = KeyPair::from_secret(MASTER, 1, false).unwrap();
        assert!(matches!(tx.sign_with(&other).unwrap_err(), TransactionError::SignerMismatch));

        // a key already in the record is kept, so it has to go before switching signers
        tx.complete_with(&other, &context()).unwrap();
        assert!(matches!(tx.sign_with(&other).unwrap_err(), TransactionError::SignerMismatch));
        tx.remove_field("SigningPubKey").unwrap();
        tx.complete_with(&other, &context()).unwrap();
        tx.sign_with(&other).unwrap();
        tx.verify_signature().unwrap();
    }

    #[test]
    fn preset_signing_key_survives_completion() {
        let mut tx = draft();
        tx.set_field("SigningPubKey", "").unwrap();
        tx.complete(&context()).unwrap();
        assert_eq!(tx.tx_json()["SigningPubKey"], json!(""));
        assert!(matches!(tx.sign().unwrap_err(), TransactionError::SignerMismatch));

        let key = KeyPair::from_secret(MASTER, 1, false).unwrap().public_key().to_hex();
        let mut tx = draft();
        tx.set_field("SigningPubKey", key.as_str()).unwrap();
        tx.complete(&context()).unwrap();
        assert_eq!(tx.tx_json()["SigningPubKey"], json!(key));
    }

    #[test]
    fn resigning_restores_replaced_signature() {
        let mut tx = draft();
        tx.complete(&context()).unwrap();
        tx.sign().unwrap();
        let signature = tx.tx_json()["TxnSignature"].clone();

        tx.set_field("TxnSignature", "DEADBEEF").unwrap();
        assert_eq!(tx.state(), TransactionState::Completed);
        tx.sign().unwrap();
        assert_eq!(tx.tx_json()["TxnSignature"], signature);
        tx.verify_signature().unwrap();

        let (blob, _) = tx.serialize().unwrap();
        assert!(!blob.contains("DEADBEEF"));
    }

    #[test]
    fn testnet_changes_signing_prefix() {
        let mut main = draft();
        main.complete(&context()).unwrap();
        let mut test = draft().with_options(SigningOptions::default().testnet(true));
        test.complete(&context()).unwrap();

        assert_eq!(&main.signing_data().unwrap()[..4], b"STX\0");
        assert_eq!(&test.signing_data().unwrap()[..4], b"stx\0");
        assert_eq!(main.signing_data().unwrap()[4..], test.signing_data().unwrap()[4..]);
        assert_ne!(main.signing_hash().unwrap(), test.signing_hash().unwrap());
    }

    #[test]
    fn serialize_is_idempotent() {
        let mut tx = draft();
        let (blob, hash) = tx.prepare(&context()).unwrap();
        assert_eq!(tx.serialize().unwrap(), (blob.clone(), hash));
        assert_eq!(tx.blob(), Some(blob.as_str()));
        assert_eq!(tx.hash(), Some(hash));
        assert_eq!(tx.state(), TransactionState::Serialized);
    }

    #[test]
    fn debug_hides_secret() {
        let tx = draft();
        assert!(!format!("{tx:?}").contains(MASTER));
    }
}
