use core::str::FromStr;

use super::ibc;
use super::ids::{self, BadIdentifier};

/// A canonical path under which a piece of IBC state is stored.
///
/// The textual form (see `Display`) is the on-disk format shared by every
/// implementation within a deployment and must not change:
///
/// ```text
/// consensusState/{client_id}
/// connections/{connection_id}
/// ports/{port_id}/channels/{channel_id}
/// commitments/ports/{port_id}/channels/{channel_id}/sequences/{sequence}
/// acks/ports/{port_id}/channels/{channel_id}/sequences/{sequence}
/// nextSequenceRecv/ports/{port_id}/channels/{channel_id}
/// ```
///
/// Paths can only be built from validated identifiers thus none of the
/// components can contain the `/` separator.  This makes the mapping
/// injective and [`Path::from_str`] its inverse.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Path {
    #[display(fmt = "consensusState/{}", _0)]
    ConsensusState(ibc::ClientId),

    #[display(fmt = "connections/{}", _0)]
    Connection(ibc::ConnectionId),

    #[display(fmt = "ports/{}/channels/{}", _0, _1)]
    ChannelEnd(ibc::PortId, ibc::ChannelId),

    #[display(
        fmt = "commitments/ports/{}/channels/{}/sequences/{}",
        port_id,
        channel_id,
        sequence
    )]
    Commitment {
        port_id: ibc::PortId,
        channel_id: ibc::ChannelId,
        sequence: u64,
    },

    #[display(
        fmt = "acks/ports/{}/channels/{}/sequences/{}",
        port_id,
        channel_id,
        sequence
    )]
    Ack {
        port_id: ibc::PortId,
        channel_id: ibc::ChannelId,
        sequence: u64,
    },

    #[display(fmt = "nextSequenceRecv/ports/{}/channels/{}", _0, _1)]
    NextSequenceRecv(ibc::PortId, ibc::ChannelId),
}

/// Error when parsing a textual path.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From, derive_more::Display)]
pub enum BadPath {
    /// One of the identifiers in the path is malformed.
    BadIdentifier(BadIdentifier),

    /// The sequence component isn’t a canonical decimal `u64`.
    #[from(ignore)]
    #[display(fmt = "invalid sequence `{}`", _0)]
    BadSequence(String),

    /// The path doesn’t match any known template.
    #[from(ignore)]
    #[display(fmt = "unknown path `{}`", _0)]
    Unknown(String),
}

impl Path {
    /// Constructs path of a consensus state of given client.
    pub fn consensus_state(client_id: &str) -> Result<Self, BadIdentifier> {
        ids::client_id(client_id).map(Self::ConsensusState)
    }

    /// Constructs path of a connection end.
    pub fn connection(connection_id: &str) -> Result<Self, BadIdentifier> {
        ids::connection_id(connection_id).map(Self::Connection)
    }

    /// Constructs path of a channel end.
    pub fn channel_end(
        port_id: &str,
        channel_id: &str,
    ) -> Result<Self, BadIdentifier> {
        let (port_id, channel_id) = port_channel(port_id, channel_id)?;
        Ok(Self::ChannelEnd(port_id, channel_id))
    }

    /// Constructs path of an outgoing packet commitment.
    pub fn commitment(
        port_id: &str,
        channel_id: &str,
        sequence: u64,
    ) -> Result<Self, BadIdentifier> {
        let (port_id, channel_id) = port_channel(port_id, channel_id)?;
        Ok(Self::Commitment { port_id, channel_id, sequence })
    }

    /// Constructs path of an incoming packet acknowledgement.
    pub fn ack(
        port_id: &str,
        channel_id: &str,
        sequence: u64,
    ) -> Result<Self, BadIdentifier> {
        let (port_id, channel_id) = port_channel(port_id, channel_id)?;
        Ok(Self::Ack { port_id, channel_id, sequence })
    }

    /// Constructs path of the next sequence number to be received on
    /// a channel.
    pub fn next_sequence_recv(
        port_id: &str,
        channel_id: &str,
    ) -> Result<Self, BadIdentifier> {
        let (port_id, channel_id) = port_channel(port_id, channel_id)?;
        Ok(Self::NextSequenceRecv(port_id, channel_id))
    }
}

fn port_channel(
    port_id: &str,
    channel_id: &str,
) -> Result<(ibc::PortId, ibc::ChannelId), BadIdentifier> {
    Ok((ids::port_id(port_id)?, ids::channel_id(channel_id)?))
}

impl FromStr for Path {
    type Err = BadPath;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let parts = path.split('/').collect::<Vec<_>>();
        Ok(match parts.as_slice() {
            ["consensusState", client] => Self::consensus_state(client)?,
            ["connections", connection] => Self::connection(connection)?,
            ["ports", port, "channels", channel] => {
                Self::channel_end(port, channel)?
            }
            [
                "commitments",
                "ports",
                port,
                "channels",
                channel,
                "sequences",
                seq,
            ] => Self::commitment(port, channel, parse_sequence(seq)?)?,
            ["acks", "ports", port, "channels", channel, "sequences", seq] => {
                Self::ack(port, channel, parse_sequence(seq)?)?
            }
            ["nextSequenceRecv", "ports", port, "channels", channel] => {
                Self::next_sequence_recv(port, channel)?
            }
            _ => return Err(BadPath::Unknown(path.into())),
        })
    }
}

/// Parses sequence number insisting on its canonical decimal form so that
/// formatting the parsed path gives back the exact same string.
fn parse_sequence(seq: &str) -> Result<u64, BadPath> {
    u64::from_str(seq)
        .ok()
        .filter(|num| num.to_string() == seq)
        .ok_or_else(|| BadPath::BadSequence(seq.into()))
}

impl From<ibc::path::ConnectionPath> for Path {
    fn from(path: ibc::path::ConnectionPath) -> Self { Self::Connection(path.0) }
}

impl From<ibc::path::CommitmentPath> for Path {
    fn from(path: ibc::path::CommitmentPath) -> Self {
        Self::Commitment {
            port_id: path.port_id,
            channel_id: path.channel_id,
            sequence: u64::from(path.sequence),
        }
    }
}

impl From<ibc::path::AckPath> for Path {
    fn from(path: ibc::path::AckPath) -> Self {
        Self::Ack {
            port_id: path.port_id,
            channel_id: path.channel_id,
            sequence: u64::from(path.sequence),
        }
    }
}

impl From<ibc::path::SeqRecvPath> for Path {
    fn from(path: ibc::path::SeqRecvPath) -> Self {
        Self::NextSequenceRecv(path.0, path.1)
    }
}

// ==== Tests ==================================================================
