//! Enumerated field values: transaction types, ledger entry types and transaction results.
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Enumerated values that travel on the wire as unsigned integers and in JSON as names.
pub trait EnumField: Sized + Copy + FromStr + AsRef<str> {
    /// The integer written on the wire.
    fn code(self) -> u64;

    /// The variant for a wire integer, if the table has one.
    fn from_code(code: u64) -> Option<Self>;
}

macro_rules! impl_enum_field {
    ($($name:ident => $repr:ty),* $(,)?) => {$(
        impl EnumField for $name {
            fn code(self) -> u64 {
                <$repr>::from(self) as u64
            }

            fn from_code(code: u64) -> Option<Self> {
                <$repr>::try_from(code).ok().and_then(|code| Self::try_from(code).ok())
            }
        }
    )*};
}

/// Values of the `TransactionType` field.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u16)]
pub enum TransactionType {
    Payment = 0,
    EscrowCreate = 1,
    EscrowFinish = 2,
    AccountSet = 3,
    EscrowCancel = 4,
    SetRegularKey = 5,
    NickNameSet = 6,
    OfferCreate = 7,
    OfferCancel = 8,
    Contract = 9,
    TicketCreate = 10,
    TicketCancel = 11,
    SignerListSet = 12,
    PaymentChannelCreate = 13,
    PaymentChannelFund = 14,
    PaymentChannelClaim = 15,
    TrustSet = 20,
    EnableAmendment = 100,
    SetFee = 101,
}

/// Values of the `LedgerEntryType` field.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u16)]
pub enum LedgerEntryType {
    SignerList = 0x53,
    Ticket = 0x54,
    AccountRoot = 0x61,
    DirectoryNode = 0x64,
    Amendments = 0x66,
    LedgerHashes = 0x68,
    Offer = 0x6f,
    RippleState = 0x72,
    FeeSettings = 0x73,
    Escrow = 0x75,
    PayChannel = 0x78,
}

/// Values of the `TransactionResult` metadata field.
///
/// Only results that can end up in a validated ledger are listed: success and the
/// fee-claimed `tec` class.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum TransactionResult {
    #[strum(serialize = "tesSUCCESS")]
    Success = 0,
    #[strum(serialize = "tecCLAIM")]
    Claim = 100,
    #[strum(serialize = "tecPATH_PARTIAL")]
    PathPartial = 101,
    #[strum(serialize = "tecUNFUNDED_ADD")]
    UnfundedAdd = 102,
    #[strum(serialize = "tecUNFUNDED_OFFER")]
    UnfundedOffer = 103,
    #[strum(serialize = "tecUNFUNDED_PAYMENT")]
    UnfundedPayment = 104,
    #[strum(serialize = "tecFAILED_PROCESSING")]
    FailedProcessing = 105,
    #[strum(serialize = "tecDIR_FULL")]
    DirFull = 121,
    #[strum(serialize = "tecINSUF_RESERVE_LINE")]
    InsufReserveLine = 122,
    #[strum(serialize = "tecINSUF_RESERVE_OFFER")]
    InsufReserveOffer = 123,
    #[strum(serialize = "tecNO_DST")]
    NoDst = 124,
    #[strum(serialize = "tecNO_DST_INSUF_XRP")]
    NoDstInsufXrp = 125,
    #[strum(serialize = "tecNO_LINE_INSUF_RESERVE")]
    NoLineInsufReserve = 126,
    #[strum(serialize = "tecNO_LINE_REDUNDANT")]
    NoLineRedundant = 127,
    #[strum(serialize = "tecPATH_DRY")]
    PathDry = 128,
    #[strum(serialize = "tecUNFUNDED")]
    Unfunded = 129,
    #[strum(serialize = "tecNO_ALTERNATIVE_KEY")]
    NoAlternativeKey = 130,
    #[strum(serialize = "tecNO_REGULAR_KEY")]
    NoRegularKey = 131,
    #[strum(serialize = "tecOWNERS")]
    Owners = 132,
    #[strum(serialize = "tecNO_ISSUER")]
    NoIssuer = 133,
    #[strum(serialize = "tecNO_AUTH")]
    NoAuth = 134,
    #[strum(serialize = "tecNO_LINE")]
    NoLine = 135,
    #[strum(serialize = "tecINSUFF_FEE")]
    InsuffFee = 136,
    #[strum(serialize = "tecFROZEN")]
    Frozen = 137,
    #[strum(serialize = "tecNO_TARGET")]
    NoTarget = 138,
    #[strum(serialize = "tecNO_PERMISSION")]
    NoPermission = 139,
    #[strum(serialize = "tecNO_ENTRY")]
    NoEntry = 140,
    #[strum(serialize = "tecINSUFFICIENT_RESERVE")]
    InsufficientReserve = 141,
    #[strum(serialize = "tecNEED_MASTER_KEY")]
    NeedMasterKey = 142,
    #[strum(serialize = "tecDST_TAG_NEEDED")]
    DstTagNeeded = 143,
    #[strum(serialize = "tecINTERNAL")]
    Internal = 144,
    #[strum(serialize = "tecOVERSIZE")]
    Oversize = 145,
}

impl_enum_field!(
    TransactionType => u16,
    LedgerEntryType => u16,
    TransactionResult => u8,
);

impl TransactionResult {
    /// Whether the transaction applied as intended.
    pub fn is_success(&self) -> bool {
        *self == TransactionResult::Success
    }
}
