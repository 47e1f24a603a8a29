use core::fmt;
use core::fmt::Write;

use super::ibc;
use super::path::Path;

/// Prefix used by IBC module stores unless configured otherwise.
pub const DEFAULT_PREFIX: &[u8] = b"ibc";

/// Commitment prefix cannot be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "commitment prefix cannot be empty")]
pub struct EmptyPrefix;

/// A [`Path`] placed under a counterparty’s commitment prefix.
///
/// The store key is the key-path rendering of the two segments:
/// `/<prefix>/<path>` where each segment is escaped like a URL path segment.
/// Most notably, `/` within a segment is encoded as `%2F` so for example
/// `ibc` with `ports/transfer/channels/channel-0` becomes
/// `/ibc/ports%2Ftransfer%2Fchannels%2Fchannel-0`.  Since separators never
/// survive escaping, distinct (prefix, path) pairs never share a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixedPath {
    prefix: ibc::CommitmentPrefix,
    path: Path,
}

impl PrefixedPath {
    /// Places `path` under `prefix`; fails if the prefix is empty.
    pub fn new(
        prefix: &ibc::CommitmentPrefix,
        path: Path,
    ) -> Result<Self, EmptyPrefix> {
        if prefix.as_bytes().is_empty() {
            return Err(EmptyPrefix);
        }
        Ok(Self { prefix: prefix.clone(), path })
    }

    /// Returns the key under which the value is held in the store.
    pub fn to_key(&self) -> Vec<u8> { self.to_string().into_bytes() }
}

impl fmt::Display for PrefixedPath {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.write_char('/')?;
        write_segment(fmtr, self.prefix.as_bytes())?;
        fmtr.write_char('/')?;
        write_segment(fmtr, self.path.to_string().as_bytes())
    }
}

/// Writes a single key-path segment percent-escaping all bytes which aren’t
/// allowed verbatim in a URL path segment.
fn write_segment(fmtr: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for &byte in bytes {
        if is_verbatim(byte) {
            fmtr.write_char(char::from(byte))?;
        } else {
            write!(fmtr, "%{byte:02X}")?;
        }
    }
    Ok(())
}

fn is_verbatim(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.~$&+:=@".contains(&byte)
}

// ==== Tests ==================================================================

#[cfg(test)]
fn prefix(bytes: &[u8]) -> ibc::CommitmentPrefix {
    ibc::CommitmentPrefix::try_from(bytes.to_vec()).unwrap()
}

#[test]
fn test_empty_prefix() {
    let path = Path::connection("connection-0").unwrap();
    let empty = ibc::CommitmentPrefix::default();
    assert_eq!(Err(EmptyPrefix), PrefixedPath::new(&empty, path.clone()));
    assert!(ibc::CommitmentPrefix::try_from(Vec::<u8>::new()).is_err());
    assert!(PrefixedPath::new(&prefix(DEFAULT_PREFIX), path).is_ok());
}

#[test]
fn test_key() {
    #[track_caller]
    fn check(want: &str, prefix_bytes: &[u8], path: Path) {
        let prefixed = PrefixedPath::new(&prefix(prefix_bytes), path).unwrap();
        assert_eq!(want, prefixed.to_string());
        assert_eq!(want.as_bytes(), prefixed.to_key().as_slice());
    }

    check(
        "/ibc/commitments%2Fports%2Ftransfer%2Fchannels%2Fchannel-0%2Fsequences%2F42",
        b"ibc",
        Path::commitment("transfer", "channel-0", 42).unwrap(),
    );
    check(
        "/ibc/consensusState%2Flocalhost",
        b"ibc",
        Path::consensus_state("localhost").unwrap(),
    );
    check(
        "/my%2Fstore%00%FF/connections%2Fconnection-1",
        b"my/store\0\xff",
        Path::connection("connection-1").unwrap(),
    );
    check(
        "/ibc/ports%2Fodd%23%5Bport%5D%3C%3E%2Fchannels%2Fchannel-0",
        b"ibc",
        Path::channel_end("odd#[port]<>", "channel-0").unwrap(),
    );
}

#[test]
fn test_key_has_two_separators() {
    let path = Path::next_sequence_recv("transfer", "channel-0").unwrap();
    for bytes in ["ibc", "ibc/nextSequenceRecv", "/", "a//b"] {
        let key = PrefixedPath::new(&prefix(bytes.as_bytes()), path.clone());
        let key = key.unwrap().to_key();
        assert_eq!(b'/', key[0]);
        assert_eq!(2, key.iter().filter(|&&b| b == b'/').count(), "{bytes}");
    }
}
