use core::fmt;
use core::str::FromStr;

use super::ibc;

type Result<T, E = BadIdentifier> = core::result::Result<T, E>;

/// Separator between path segments.  Never valid inside an identifier.
const SEPARATOR: char = '/';

// ==== Identifier kinds =======================================================

/// Kind of an identifier which takes part in a path.
///
/// Each kind has its own length bounds enforced by the host identifier rules;
/// the character set and the ban on the path separator are common to all of
/// them.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum IdKind {
    Client,
    Connection,
    Port,
    Channel,
}

// ==== Errors =================================================================

/// Identifier doesn’t satisfy host identifier rules.
///
/// Reported before any path gets constructed so that a malformed identifier
/// can never be smuggled into a store key.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "invalid {} identifier `{}`: {}", kind, id, reason)]
pub struct BadIdentifier {
    pub kind: IdKind,
    pub id: String,
    pub reason: Reason,
}

/// Why an identifier has been rejected.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Reason {
    #[display(fmt = "identifier cannot be blank")]
    Blank,
    #[display(fmt = "identifier cannot contain separator '{}'", SEPARATOR)]
    Separator,
    /// Rejected by the host identifier rules (length or character set).  The
    /// description comes from the validator.
    #[display(fmt = "{}", _0)]
    Invalid(String),
}

impl BadIdentifier {
    fn new(kind: IdKind, id: &str, reason: Reason) -> Self {
        Self { kind, id: id.into(), reason }
    }
}

// ==== Parsing ================================================================

/// Parses client identifier.
#[inline]
pub fn client_id(id: &str) -> Result<ibc::ClientId> { parse(IdKind::Client, id) }

/// Parses connection identifier.
#[inline]
pub fn connection_id(id: &str) -> Result<ibc::ConnectionId> {
    parse(IdKind::Connection, id)
}

/// Parses port identifier.
#[inline]
pub fn port_id(id: &str) -> Result<ibc::PortId> { parse(IdKind::Port, id) }

/// Parses channel identifier.
#[inline]
pub fn channel_id(id: &str) -> Result<ibc::ChannelId> {
    parse(IdKind::Channel, id)
}

/// Checks the rules common to all identifier kinds and then hands the string
/// over to the typed identifier’s parser which applies kind-specific bounds.
fn parse<T>(kind: IdKind, id: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if id.trim().is_empty() {
        Err(BadIdentifier::new(kind, id, Reason::Blank))
    } else if id.contains(SEPARATOR) {
        Err(BadIdentifier::new(kind, id, Reason::Separator))
    } else {
        T::from_str(id).map_err(|err| {
            BadIdentifier::new(kind, id, Reason::Invalid(err.to_string()))
        })
    }
}

// ==== Tests ==================================================================

#[test]
fn test_valid() {
    assert_eq!("localhost", client_id("localhost").unwrap().as_str());
    assert_eq!("07-tendermint-0", client_id("07-tendermint-0").unwrap().as_str());
    assert_eq!("connection-0", connection_id("connection-0").unwrap().as_str());
    assert_eq!("transfer", port_id("transfer").unwrap().as_str());
    assert_eq!("channel-0", channel_id("channel-0").unwrap().as_str());
    let odd = "port.with_[odd]<chars>";
    assert_eq!(odd, port_id(odd).unwrap().as_str());
}

#[test]
fn test_blank_and_separator() {
    use strum::IntoEnumIterator;

    fn check(kind: IdKind, id: &str) -> Result<()> {
        match kind {
            IdKind::Client => client_id(id).map(|_| ()),
            IdKind::Connection => connection_id(id).map(|_| ()),
            IdKind::Port => port_id(id).map(|_| ()),
            IdKind::Channel => channel_id(id).map(|_| ()),
        }
    }

    for kind in IdKind::iter() {
        for blank in ["", " ", "\t\n"] {
            assert_eq!(
                Err(BadIdentifier::new(kind, blank, Reason::Blank)),
                check(kind, blank),
                "kind: {kind}"
            );
        }
        for bad in ["foo/bar/baz", "/transfer", "channel-0/"] {
            assert_eq!(
                Err(BadIdentifier::new(kind, bad, Reason::Separator)),
                check(kind, bad),
                "kind: {kind}"
            );
        }
    }
}

#[test]
fn test_invalid() {
    for bad in ["foo bar", "foo?bar", "foo,bar"] {
        let err = port_id(bad).unwrap_err();
        assert_eq!((IdKind::Port, bad), (err.kind, err.id.as_str()));
        assert!(matches!(err.reason, Reason::Invalid(_)), "id: {bad}");
    }

    // Length bounds differ per kind.
    assert!(port_id("ab").is_ok());
    assert!(port_id("a").is_err());
    assert!(client_id("short").is_err());
    assert!(connection_id("conn-0").is_err());
}

#[test]
fn test_display() {
    let err = channel_id("").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid channel identifier ``: identifier cannot be blank"
    );
    let err = client_id("local/host").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid client identifier `local/host`: identifier cannot contain separator '/'"
    );
}
