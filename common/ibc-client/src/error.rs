use core::fmt;

use ibc_codec::DecodeError;
use ibc_paths::{BadIdentifier, EmptyPrefix, PrefixedPath};
#[cfg(test)]
use pretty_assertions::assert_eq;

use crate::StoreError;

/// Error returned by client state validation and verification.
///
/// Every error is terminal for the call which returned it.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    derive_more::From,
    derive_more::Display,
    strum::IntoStaticStr,
)]
pub enum Error {
    /// An identifier failed format rules before a path could be built.
    InvalidIdentifier(BadIdentifier),

    /// Counterparty’s commitment prefix is empty.
    InvalidPrefix(EmptyPrefix),

    /// Client state violates one of its invariants.
    Validation(ValidationError),

    /// Stored state doesn’t match the claim (or exists where it shouldn’t).
    Verification(VerificationError),

    /// Stored bytes couldn’t be decoded into the expected record.
    Decode(DecodeError),

    /// The store failed to service a read.
    Store(StoreError),
}

impl Error {
    /// Returns name of the error variant.
    pub fn name(&self) -> &'static str { self.into() }

    /// Returns verification failure if this is a verification error.
    pub fn as_verification(&self) -> Option<&VerificationError> {
        match self {
            Self::Verification(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for Error {}

// ==== Validation =============================================================

/// Client state invariant which doesn’t hold.
///
/// Validation reports the first violated invariant only.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum ValidationError {
    /// Client identifier doesn’t pass host identifier rules.
    #[display(fmt = "{}", _0)]
    ClientId(BadIdentifier),

    #[display(fmt = "chain id cannot be blank")]
    BlankChainId,

    #[display(fmt = "height must be positive: {}", _0)]
    NonPositiveHeight(u64),

    /// Client height may only move forward.
    #[display(fmt = "height cannot decrease: {} < {}", new, current)]
    HeightDecreased { current: u64, new: u64 },
}

// ==== Verification ===========================================================

/// The verification operation which failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum VerificationKind {
    #[strum(serialize = "client consensus state verification failed")]
    ClientConsensusState,
    #[strum(serialize = "connection state verification failed")]
    ConnectionState,
    #[strum(serialize = "channel state verification failed")]
    ChannelState,
    #[strum(serialize = "packet commitment verification failed")]
    PacketCommitment,
    #[strum(serialize = "packet acknowledgement verification failed")]
    PacketAcknowledgement,
    #[strum(serialize = "packet acknowledgement absence verification failed")]
    PacketAckAbsence,
    #[strum(serialize = "next sequence receive verification failed")]
    NextSequenceRecv,
}

/// What exactly went wrong during verification.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Failure {
    /// Nothing is stored at the path.
    #[display(fmt = "not found")]
    NotFound,

    /// A value is stored but differs from the claimed one.
    #[display(fmt = "claimed {} ≠ stored {}", claimed, stored)]
    Mismatch { claimed: String, stored: String },

    /// A value is stored where absence was claimed.
    #[display(fmt = "expected no value but one is present")]
    UnexpectedPresence,

    /// Stored value is too short to be interpreted.
    #[display(fmt = "malformed value of {} bytes", len)]
    Malformed { len: usize },
}

/// Verification of a particular kind failed at given store path.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "{} for path {}: {}", kind, path, failure)]
pub struct VerificationError {
    pub kind: VerificationKind,
    pub path: String,
    pub failure: Failure,
}

impl VerificationError {
    pub fn new(
        kind: VerificationKind,
        path: &PrefixedPath,
        failure: Failure,
    ) -> Self {
        Self { kind, path: path.to_string(), failure }
    }

    pub fn not_found(kind: VerificationKind, path: &PrefixedPath) -> Self {
        Self::new(kind, path, Failure::NotFound)
    }

    /// Constructs mismatch failure reporting both values.
    pub fn mismatch(
        kind: VerificationKind,
        path: &PrefixedPath,
        claimed: impl fmt::Display,
        stored: impl fmt::Display,
    ) -> Self {
        let failure = Failure::Mismatch {
            claimed: claimed.to_string(),
            stored: stored.to_string(),
        };
        Self::new(kind, path, failure)
    }
}

/// Formats bytes as upper-case hexadecimal string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(fmtr, "{byte:02X}"))
    }
}

impl fmt::Debug for Hex<'_> {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, fmtr)
    }
}

// ==== Tests ==================================================================

#[test]
fn test_display() {
    let prefix = crate::CommitmentPrefix::try_from(b"ibc".to_vec()).unwrap();
    let path = ibc_paths::Path::commitment("transfer", "channel-0", 42).unwrap();
    let path = PrefixedPath::new(&prefix, path).unwrap();

    let err = Error::from(VerificationError::mismatch(
        VerificationKind::PacketCommitment,
        &path,
        Hex(&[0xCA, 0xFE, 0xBA, 0xBE]),
        Hex(&[0xDE, 0xAD, 0xBE, 0xEF]),
    ));
    assert_eq!("Verification", err.name());
    insta::assert_snapshot!(
        err.to_string(),
        @"packet commitment verification failed for path /ibc/commitments%2Fports%2Ftransfer%2Fchannels%2Fchannel-0%2Fsequences%2F42: claimed CAFEBABE ≠ stored DEADBEEF"
    );

    let err = Error::from(VerificationError::not_found(
        VerificationKind::NextSequenceRecv,
        &path,
    ));
    insta::assert_snapshot!(
        err.to_string(),
        @"next sequence receive verification failed for path /ibc/commitments%2Fports%2Ftransfer%2Fchannels%2Fchannel-0%2Fsequences%2F42: not found"
    );

    let err = Error::from(ValidationError::NonPositiveHeight(0));
    insta::assert_snapshot!(err.to_string(), @"height must be positive: 0");

    let err = Error::from(EmptyPrefix);
    assert_eq!("InvalidPrefix", err.name());
    assert_eq!(None, err.as_verification());
}

#[test]
fn test_hex() {
    assert_eq!("", Hex(&[]).to_string());
    assert_eq!("000FA0FF", Hex(&[0x00, 0x0F, 0xA0, 0xFF]).to_string());
}
