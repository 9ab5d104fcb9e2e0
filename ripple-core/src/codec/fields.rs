//! The field registry: every wire field's name, type code and field code, plus the header
//! that identifies a field in the byte stream.
use super::{FormatError, SerializedBuffer};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::{AsRefStr, Display};

/// The value representation of a field, identified on the wire by its type code.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum WireType {
    UInt16 = 1,
    UInt32 = 2,
    UInt64 = 3,
    Hash128 = 4,
    Hash256 = 5,
    Amount = 6,
    #[strum(serialize = "Blob")]
    VariableLength = 7,
    Account = 8,
    Object = 14,
    Array = 15,
    UInt8 = 16,
    Hash160 = 17,
    PathSet = 18,
    Vector256 = 19,
}

impl WireType {
    /// The type code written in field headers.
    pub fn code(self) -> u8 {
        self.into()
    }
}

/// A registered field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    /// The JSON key
    pub name: &'static str,
    /// The value representation
    pub wire_type: WireType,
    /// The ordinal within the type
    pub nth: u8,
}

impl FieldDef {
    /// Canonical ordering key: type code first, then field code.
    pub fn sort_key(&self) -> (u8, u8) {
        (self.wire_type.code(), self.nth)
    }

    /// The encoded header for this field.
    pub fn header(&self) -> Vec<u8> {
        encode_header(self.wire_type.code(), self.nth)
    }
}

/// `(type, [(nth, name)])` for every known field. Object and Array code 1 is the end marker
/// and has no entry.
const FIELDS: &[(WireType, &[(u8, &str)])] = &[
    (WireType::UInt16, &[(1, "LedgerEntryType"), (2, "TransactionType"), (3, "SignerWeight")]),
    (
        WireType::UInt32,
        &[
            (2, "Flags"),
            (3, "SourceTag"),
            (4, "Sequence"),
            (5, "PreviousTxnLgrSeq"),
            (6, "LedgerSequence"),
            (7, "CloseTime"),
            (8, "ParentCloseTime"),
            (9, "SigningTime"),
            (10, "Expiration"),
            (11, "TransferRate"),
            (12, "WalletSize"),
            (13, "OwnerCount"),
            (14, "DestinationTag"),
            (16, "HighQualityIn"),
            (17, "HighQualityOut"),
            (18, "LowQualityIn"),
            (19, "LowQualityOut"),
            (20, "QualityIn"),
            (21, "QualityOut"),
            (22, "StampEscrow"),
            (23, "BondAmount"),
            (24, "LoadFee"),
            (25, "OfferSequence"),
            (26, "FirstLedgerSequence"),
            (27, "LastLedgerSequence"),
            (28, "TransactionIndex"),
            (29, "OperationLimit"),
            (30, "ReferenceFeeUnits"),
            (31, "ReserveBase"),
            (32, "ReserveIncrement"),
            (33, "SetFlag"),
            (34, "ClearFlag"),
            (35, "SignerQuorum"),
            (36, "CancelAfter"),
            (37, "FinishAfter"),
            (38, "SignerListID"),
            (39, "SettleDelay"),
        ],
    ),
    (
        WireType::UInt64,
        &[
            (1, "IndexNext"),
            (2, "IndexPrevious"),
            (3, "BookNode"),
            (4, "OwnerNode"),
            (5, "BaseFee"),
            (6, "ExchangeRate"),
            (7, "LowNode"),
            (8, "HighNode"),
        ],
    ),
    (WireType::Hash128, &[(1, "EmailHash")]),
    (
        WireType::Hash256,
        &[
            (1, "LedgerHash"),
            (2, "ParentHash"),
            (3, "TransactionHash"),
            (4, "AccountHash"),
            (5, "PreviousTxnID"),
            (6, "LedgerIndex"),
            (7, "WalletLocator"),
            (8, "RootIndex"),
            (9, "AccountTxnID"),
            (16, "BookDirectory"),
            (17, "InvoiceID"),
            (18, "Nickname"),
            (19, "Amendment"),
            (20, "TicketID"),
            (21, "Digest"),
        ],
    ),
    (
        WireType::Amount,
        &[
            (1, "Amount"),
            (2, "Balance"),
            (3, "LimitAmount"),
            (4, "TakerPays"),
            (5, "TakerGets"),
            (6, "LowLimit"),
            (7, "HighLimit"),
            (8, "Fee"),
            (9, "SendMax"),
            (10, "DeliverMin"),
            (16, "MinimumOffer"),
            (17, "RippleEscrow"),
            (18, "DeliveredAmount"),
        ],
    ),
    (
        WireType::VariableLength,
        &[
            (1, "PublicKey"),
            (2, "MessageKey"),
            (3, "SigningPubKey"),
            (4, "TxnSignature"),
            (5, "Generator"),
            (6, "Signature"),
            (7, "Domain"),
            (8, "FundCode"),
            (9, "RemoveCode"),
            (10, "ExpireCode"),
            (11, "CreateCode"),
            (12, "MemoType"),
            (13, "MemoData"),
            (14, "MemoFormat"),
            (16, "Fulfillment"),
            (17, "Condition"),
            (18, "MasterSignature"),
        ],
    ),
    (
        WireType::Account,
        &[
            (1, "Account"),
            (2, "Owner"),
            (3, "Destination"),
            (4, "Issuer"),
            (5, "Authorize"),
            (6, "Unauthorize"),
            (7, "Target"),
            (8, "RegularKey"),
        ],
    ),
    (
        WireType::Object,
        &[
            (2, "TransactionMetaData"),
            (3, "CreatedNode"),
            (4, "DeletedNode"),
            (5, "ModifiedNode"),
            (6, "PreviousFields"),
            (7, "FinalFields"),
            (8, "NewFields"),
            (9, "TemplateEntry"),
            (10, "Memo"),
            (11, "SignerEntry"),
            (16, "Signer"),
        ],
    ),
    (
        WireType::Array,
        &[
            (3, "Signers"),
            (4, "SignerEntries"),
            (5, "Template"),
            (6, "Necessary"),
            (7, "Sufficient"),
            (8, "AffectedNodes"),
            (9, "Memos"),
        ],
    ),
    (
        WireType::UInt8,
        &[(1, "CloseResolution"), (2, "Method"), (3, "TransactionResult"), (16, "TickSize")],
    ),
    (
        WireType::Hash160,
        &[
            (1, "TakerPaysCurrency"),
            (2, "TakerPaysIssuer"),
            (3, "TakerGetsCurrency"),
            (4, "TakerGetsIssuer"),
        ],
    ),
    (WireType::PathSet, &[(1, "Paths")]),
    (WireType::Vector256, &[(1, "Indexes"), (2, "Hashes"), (3, "Amendments")]),
];

static BY_NAME: Lazy<HashMap<&'static str, FieldDef>> = Lazy::new(|| {
    FIELDS
        .iter()
        .flat_map(|(wire_type, fields)| {
            fields.iter().map(move |(nth, name)| {
                (*name, FieldDef { name: *name, wire_type: *wire_type, nth: *nth })
            })
        })
        .collect()
});

static BY_CODE: Lazy<HashMap<(u8, u8), FieldDef>> =
    Lazy::new(|| BY_NAME.values().map(|def| (def.sort_key(), *def)).collect());

/// Looks a field up by its JSON key.
pub fn field_by_name(name: &str) -> Option<&'static FieldDef> {
    BY_NAME.get(name)
}

/// Looks a field up by its type and field codes.
pub fn field_by_code(type_code: u8, field_code: u8) -> Option<&'static FieldDef> {
    BY_CODE.get(&(type_code, field_code))
}

/// Whether a JSON key names a wire field. Lowercase-initial keys are client annotations.
pub fn is_wire_key(key: &str) -> bool {
    key.chars().next().map_or(false, |c| c.is_ascii_uppercase())
}

/// Encodes the 1 to 3 byte header of a field.
pub fn encode_header(type_code: u8, field_code: u8) -> Vec<u8> {
    match (type_code < 16, field_code < 16) {
        (true, true) => vec![(type_code << 4) | field_code],
        (false, true) => vec![field_code, type_code],
        (true, false) => vec![type_code << 4, field_code],
        (false, false) => vec![0, type_code, field_code],
    }
}

/// Reads a field header and returns its `(type, field)` codes.
pub fn decode_header(buf: &mut SerializedBuffer) -> Result<(u8, u8), FormatError> {
    let first = buf.read_u8()?;
    let mut type_code = first >> 4;
    let mut field_code = first & 0x0f;
    if type_code == 0 {
        type_code = buf.read_u8()?;
        if type_code < 16 {
            return Err(FormatError::InvalidHeader)
        }
    }
    if field_code == 0 {
        field_code = buf.read_u8()?;
        if field_code < 16 {
            return Err(FormatError::InvalidHeader)
        }
    }
    Ok((type_code, field_code))
}

/// Reads a header and resolves it against the registry.
pub fn read_field(buf: &mut SerializedBuffer) -> Result<&'static FieldDef, FormatError> {
    let (type_code, field_code) = decode_header(buf)?;
    field_by_code(type_code, field_code)
        .ok_or(FormatError::UnknownFieldCode { type_code, field_code })
}
