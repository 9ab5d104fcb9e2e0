//! Record layouts: which fields each transaction type, ledger entry type and metadata record
//! may or must carry.
use super::{
    definitions::{LedgerEntryType, TransactionType},
    fields::is_wire_key,
    SchemaError,
};
use serde_json::{Map, Value};

/// Whether a field must be present in a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Must be present
    Required,
    /// May be present
    Optional,
    /// May be present, omitted when it holds the default value
    Default,
}

use Requirement::{Default as D, Optional as O, Required as R};

/// A record layout.
pub type Format = &'static [(&'static str, Requirement)];

const TRANSACTION_COMMON: Format = &[
    ("TransactionType", R),
    ("Flags", O),
    ("SourceTag", O),
    ("LastLedgerSequence", O),
    ("Account", R),
    ("Sequence", R),
    ("Fee", R),
    ("OperationLimit", O),
    ("SigningPubKey", R),
    ("TxnSignature", O),
    ("AccountTxnID", O),
    ("Memos", O),
    ("Signers", O),
];

const LEDGER_ENTRY_COMMON: Format =
    &[("LedgerIndex", O), ("LedgerEntryType", R), ("Flags", R)];

const METADATA: Format = &[
    ("TransactionIndex", R),
    ("TransactionResult", R),
    ("AffectedNodes", R),
    ("DeliveredAmount", O),
];

/// Fields specific to a transaction type, on top of the common transaction fields.
pub fn transaction_format(tx_type: TransactionType) -> Format {
    use TransactionType::*;
    match tx_type {
        Payment => &[
            ("Destination", R),
            ("Amount", R),
            ("SendMax", O),
            ("Paths", D),
            ("InvoiceID", O),
            ("DestinationTag", O),
            ("DeliverMin", O),
        ],
        EscrowCreate => &[
            ("Destination", R),
            ("Amount", R),
            ("Condition", O),
            ("CancelAfter", O),
            ("FinishAfter", O),
            ("DestinationTag", O),
        ],
        EscrowFinish => &[
            ("Owner", R),
            ("OfferSequence", R),
            ("Fulfillment", O),
            ("Condition", O),
        ],
        AccountSet => &[
            ("EmailHash", O),
            ("WalletLocator", O),
            ("WalletSize", O),
            ("MessageKey", O),
            ("Domain", O),
            ("TransferRate", O),
            ("SetFlag", O),
            ("ClearFlag", O),
            ("TickSize", O),
        ],
        EscrowCancel => &[("Owner", R), ("OfferSequence", R)],
        SetRegularKey => &[("RegularKey", O)],
        NickNameSet => &[("MinimumOffer", O)],
        OfferCreate => &[
            ("TakerPays", R),
            ("TakerGets", R),
            ("Expiration", O),
            ("OfferSequence", O),
        ],
        OfferCancel => &[("OfferSequence", R)],
        Contract => &[
            ("Expiration", R),
            ("BondAmount", R),
            ("StampEscrow", R),
            ("RippleEscrow", R),
            ("CreateCode", O),
            ("FundCode", O),
            ("RemoveCode", O),
            ("ExpireCode", O),
        ],
        TicketCreate => &[("Target", O), ("Expiration", O)],
        TicketCancel => &[("TicketID", R)],
        SignerListSet => &[("SignerQuorum", R), ("SignerEntries", O)],
        PaymentChannelCreate => &[
            ("Destination", R),
            ("Amount", R),
            ("SettleDelay", R),
            ("PublicKey", R),
            ("CancelAfter", O),
            ("DestinationTag", O),
        ],
        PaymentChannelFund => &[("Amount", R), ("Expiration", O)],
        PaymentChannelClaim => &[
            ("Amount", O),
            ("Balance", O),
            ("Signature", O),
            ("PublicKey", O),
        ],
        TrustSet => &[("LimitAmount", O), ("QualityIn", O), ("QualityOut", O)],
        EnableAmendment => &[("Amendment", R)],
        SetFee => &[
            ("BaseFee", R),
            ("ReferenceFeeUnits", R),
            ("ReserveBase", R),
            ("ReserveIncrement", R),
        ],
    }
}

/// Fields specific to a ledger entry type, on top of the common ledger entry fields.
pub fn ledger_entry_format(entry_type: LedgerEntryType) -> Format {
    use LedgerEntryType::*;
    match entry_type {
        AccountRoot => &[
            ("Sequence", R),
            ("PreviousTxnLgrSeq", R),
            ("TransferRate", O),
            ("WalletSize", O),
            ("OwnerCount", R),
            ("EmailHash", O),
            ("PreviousTxnID", R),
            ("AccountTxnID", O),
            ("WalletLocator", O),
            ("Balance", R),
            ("MessageKey", O),
            ("Domain", O),
            ("Account", R),
            ("RegularKey", O),
            ("TickSize", O),
        ],
        DirectoryNode => &[
            ("Owner", O),
            ("TakerPaysCurrency", O),
            ("TakerPaysIssuer", O),
            ("TakerGetsCurrency", O),
            ("TakerGetsIssuer", O),
            ("ExchangeRate", O),
            ("Indexes", R),
            ("RootIndex", R),
            ("IndexNext", O),
            ("IndexPrevious", O),
        ],
        RippleState => &[
            ("Balance", R),
            ("LowLimit", R),
            ("HighLimit", R),
            ("PreviousTxnID", R),
            ("PreviousTxnLgrSeq", R),
            ("LowNode", O),
            ("LowQualityIn", O),
            ("LowQualityOut", O),
            ("HighNode", O),
            ("HighQualityIn", O),
            ("HighQualityOut", O),
        ],
        Offer => &[
            ("Account", R),
            ("Sequence", R),
            ("TakerPays", R),
            ("TakerGets", R),
            ("BookDirectory", R),
            ("BookNode", R),
            ("OwnerNode", R),
            ("PreviousTxnID", R),
            ("PreviousTxnLgrSeq", R),
            ("Expiration", O),
        ],
        LedgerHashes => &[("LastLedgerSequence", O), ("Hashes", R)],
        Amendments => &[("Amendments", R)],
        FeeSettings => &[
            ("BaseFee", R),
            ("ReferenceFeeUnits", R),
            ("ReserveBase", R),
            ("ReserveIncrement", R),
        ],
        SignerList => &[
            ("OwnerNode", R),
            ("SignerQuorum", R),
            ("SignerEntries", R),
            ("SignerListID", R),
            ("PreviousTxnID", R),
            ("PreviousTxnLgrSeq", R),
        ],
        Ticket => &[
            ("Account", R),
            ("Sequence", R),
            ("OwnerNode", R),
            ("Target", O),
            ("Expiration", O),
        ],
        Escrow => &[
            ("Account", R),
            ("Destination", R),
            ("Amount", R),
            ("Condition", O),
            ("CancelAfter", O),
            ("FinishAfter", O),
            ("SourceTag", O),
            ("DestinationTag", O),
            ("OwnerNode", R),
            ("PreviousTxnID", R),
            ("PreviousTxnLgrSeq", R),
        ],
        PayChannel => &[
            ("Account", R),
            ("Destination", R),
            ("Amount", R),
            ("Balance", R),
            ("PublicKey", R),
            ("SettleDelay", R),
            ("Expiration", O),
            ("CancelAfter", O),
            ("SourceTag", O),
            ("DestinationTag", O),
            ("OwnerNode", R),
            ("PreviousTxnID", R),
            ("PreviousTxnLgrSeq", R),
        ],
    }
}

/// The kind of top-level record being serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// A transaction of the given type
    Transaction(TransactionType),
    /// A ledger entry of the given type
    LedgerEntry(LedgerEntryType),
    /// Transaction metadata
    Metadata,
}

impl Envelope {
    /// Determines the envelope from `TransactionType`, `LedgerEntryType` or `AffectedNodes`,
    /// in that order.
    pub fn of(record: &Map<String, Value>) -> Result<Self, SchemaError> {
        if let Some(value) = record.get("TransactionType") {
            let tx_type = match value {
                Value::String(name) => name.parse::<TransactionType>().ok(),
                Value::Number(n) => {
                    n.as_u64().and_then(|n| u16::try_from(n).ok()).and_then(|n| n.try_into().ok())
                }
                _ => None,
            };
            return tx_type
                .map(Envelope::Transaction)
                .ok_or_else(|| SchemaError::UnknownTransactionType(display_value(value)))
        }
        if let Some(value) = record.get("LedgerEntryType") {
            let entry_type = match value {
                Value::String(name) => name.parse::<LedgerEntryType>().ok(),
                Value::Number(n) => {
                    n.as_u64().and_then(|n| u16::try_from(n).ok()).and_then(|n| n.try_into().ok())
                }
                _ => None,
            };
            return entry_type
                .map(Envelope::LedgerEntry)
                .ok_or_else(|| SchemaError::UnknownLedgerEntryType(display_value(value)))
        }
        if record.contains_key("AffectedNodes") {
            return Ok(Envelope::Metadata)
        }
        Err(SchemaError::UnknownEnvelope)
    }

    /// The full field list: common fields followed by type-specific ones.
    pub fn fields(&self) -> impl Iterator<Item = &'static (&'static str, Requirement)> {
        let (common, specific) = match self {
            Envelope::Transaction(tx_type) => (TRANSACTION_COMMON, transaction_format(*tx_type)),
            Envelope::LedgerEntry(entry_type) => {
                (LEDGER_ENTRY_COMMON, ledger_entry_format(*entry_type))
            }
            Envelope::Metadata => (METADATA, &[][..]),
        };
        common.iter().chain(specific.iter())
    }

    /// Checks that every required field is present and every wire field is allowed.
    pub fn validate(&self, record: &Map<String, Value>) -> Result<(), SchemaError> {
        let missing: Vec<String> = self
            .fields()
            .filter(|(name, requirement)| {
                *requirement == Requirement::Required && !record.contains_key(*name)
            })
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingFields(missing))
        }

        let unknown: Vec<String> = record
            .keys()
            .filter(|key| is_wire_key(key) && !self.fields().any(|(name, _)| *name == key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(SchemaError::UnknownFields(unknown))
        }
        Ok(())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn envelope_selection() {
        let tx = record(json!({ "TransactionType": "Payment", "AffectedNodes": [] }));
        assert_eq!(Envelope::of(&tx).unwrap(), Envelope::Transaction(TransactionType::Payment));

        let numeric = record(json!({ "TransactionType": 7 }));
        assert_eq!(
            Envelope::of(&numeric).unwrap(),
            Envelope::Transaction(TransactionType::OfferCreate)
        );

        let entry = record(json!({ "LedgerEntryType": "RippleState" }));
        assert_eq!(
            Envelope::of(&entry).unwrap(),
            Envelope::LedgerEntry(LedgerEntryType::RippleState)
        );

        let meta = record(json!({ "AffectedNodes": [] }));
        assert_eq!(Envelope::of(&meta).unwrap(), Envelope::Metadata);

        assert_eq!(Envelope::of(&record(json!({}))).unwrap_err(), SchemaError::UnknownEnvelope);
        assert_eq!(
            Envelope::of(&record(json!({ "TransactionType": "Bogus" }))).unwrap_err(),
            SchemaError::UnknownTransactionType("Bogus".to_string())
        );
    }

    #[test]
    fn reports_missing_and_unknown_fields() {
        let envelope = Envelope::Transaction(TransactionType::OfferCancel);
        let tx = record(json!({
            "TransactionType": "OfferCancel",
            "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "Fee": "10",
            "SigningPubKey": "",
        }));
        assert_eq!(
            envelope.validate(&tx).unwrap_err(),
            SchemaError::MissingFields(vec!["Sequence".into(), "OfferSequence".into()])
        );

        let mut tx = tx;
        tx.insert("Sequence".into(), json!(1));
        tx.insert("OfferSequence".into(), json!(2));
        tx.insert("Destination".into(), json!("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        tx.insert("hash".into(), json!("ignored"));
        assert_eq!(
            envelope.validate(&tx).unwrap_err(),
            SchemaError::UnknownFields(vec!["Destination".into()])
        );

        tx.remove("Destination");
        envelope.validate(&tx).unwrap();
    }
}
